use std::convert::TryFrom;

use log::debug;

use crate::automaton::Automaton;
use crate::engine::{ParserEngine, Trace};
use crate::error::{BuildError, ParseError};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::table::ParsingTable;

#[derive(Debug, Clone)]
pub struct LR1Parser {
    grammar: Grammar,
    automaton: Automaton,
    table: ParsingTable,
}

impl LR1Parser {
    /// Augments `grammar` and builds everything the engine needs from it.
    pub fn new(mut grammar: Grammar) -> Result<Self, BuildError> {
        grammar.self_augment();
        grammar.build_production_index();
        grammar.build_first_set();
        let automaton = Automaton::new(&grammar)?;
        let table = ParsingTable::new(&automaton, &grammar)?;
        debug!("LR(1) parser ready: {} productions, {} states", grammar.production_count(), automaton.state_count());
        Ok(LR1Parser { grammar, automaton, table })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn table(&self) -> &ParsingTable {
        &self.table
    }

    pub fn engine(&self) -> ParserEngine<'_> {
        ParserEngine::new(&self.grammar, &self.table)
    }

    pub fn parse(&self, input: impl IntoIterator<Item=Symbol>) -> Result<Trace, ParseError> {
        self.engine().parse(input)
    }
}

impl TryFrom<Grammar> for LR1Parser {
    type Error = BuildError;

    fn try_from(grammar: Grammar) -> Result<Self, Self::Error> {
        LR1Parser::new(grammar)
    }
}
