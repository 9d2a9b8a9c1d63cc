use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use parser::{Grammar, LR1Parser, Parse, Symbol};
use tokenizer::{lex_effective, Token};

use crate::cli::Cli;
use crate::render::Style;

mod cli;
mod render;

fn to_symbol(token: &Token) -> Option<Symbol> {
    match token {
        Token::Integer(_) => Some(Symbol::terminal("n")),
        Token::Punctuator(c) => Some(Symbol::terminal(c.to_string())),
        Token::Whitespace => None,
    }
}

fn run_line(parser: &LR1Parser, line: &str, style: &Style, out: &mut impl Write) -> Result<()> {
    let tokens = match lex_effective(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}\n", e);
            return Ok(());
        }
    };
    let symbols: Vec<Symbol> = tokens.iter().filter_map(to_symbol).collect();
    debug!("{} tokens from {:?}", symbols.len(), line);
    writeln!(out, "{}\n{}\n", style.heading("Token Stream"), render::token_stream(&symbols))?;
    let trace = symbols.parse(parser)?;
    info!("{:?}: {:?}, had_error = {}", line, trace.status(), trace.had_error());
    writeln!(out, "{}\n{}\n", style.heading("Parsing procedure"), render::trace(&trace, style))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let text = cli.grammar_text()?;
    let grammar = Grammar::from_text(&text).context("invalid grammar")?;
    let parser = LR1Parser::new(grammar).context("failed to build the LR(1) parser")?;
    let style = Style::new(!cli.no_color);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !cli.quiet {
        writeln!(out, "{}", render::report(&parser, &style))?;
    }

    if !cli.exprs.is_empty() {
        for line in &cli.exprs {
            run_line(&parser, line, &style, &mut out)?;
        }
        return Ok(());
    }

    eprintln!("Enter a line of expression, or 'q' to quit.\n");
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "q" {
            break;
        }
        run_line(&parser, line, &style, &mut out)?;
        out.flush()?;
    }
    Ok(())
}
