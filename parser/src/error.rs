use thiserror::Error;

use crate::grammar::Production;
use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar text is empty")]
    Empty,
    #[error("line {line}: missing `->` separator in {text:?}")]
    MissingSeparator { line: usize, text: String },
    #[error("line {line}: left-hand side {lhs:?} is not a non-terminal")]
    InvalidLhs { line: usize, lhs: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("grammar is not augmented: start symbol {start} must have exactly one single-symbol production")]
    NotAugmented { start: Symbol },
    #[error("production `{production}` has no rule number; build the production index first")]
    UnindexedProduction { production: Production },
}

/// Table and grammar disagree. Never produced by a table built from the same grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no goto entry for state {state} on {symbol}")]
    MissingGoto { state: usize, symbol: Symbol },
    #[error("stack underflow while reducing by rule {rule}")]
    StackUnderflow { rule: usize },
    #[error("reduce action references unknown rule {rule}")]
    UnknownRule { rule: usize },
}
