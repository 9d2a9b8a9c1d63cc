use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

pub const DEFAULT_GRAMMAR: &str = "E
E -> E + T | E - T | T
T -> T * F | T / F | F
F -> ( E ) | n";

#[derive(Debug, Parser)]
#[command(name = "lr1")]
#[command(about = "Builds a canonical LR(1) parser for a grammar and traces the parse of each input line")]
pub struct Cli {
    /// Grammar file: start symbol on the first line, then `LHS -> ALT | ALT` lines
    #[arg(short, long)]
    pub grammar: Option<PathBuf>,

    /// Parse this line instead of reading stdin; may be repeated
    #[arg(short = 'e', long = "expr")]
    pub exprs: Vec<String>,

    #[arg(long)]
    pub no_color: bool,

    /// Skip the grammar, FIRST set, item set, transition and table report
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn grammar_text(&self) -> Result<String> {
        match &self.grammar {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read grammar file {}", path.display())),
            None => Ok(DEFAULT_GRAMMAR.to_string()),
        }
    }
}
