pub use crate::automaton::Automaton;
pub use crate::engine::{Parse, ParseStatus, ParserEngine, Trace, TraceRow, ERROR_FINISH};
pub use crate::error::{BuildError, GrammarError, ParseError};
pub use crate::grammar::{FirstSet, Grammar, Production};
pub use crate::item::Item;
pub use crate::item_set::ItemSet;
pub use crate::parser::LR1Parser;
pub use crate::symbol::{Symbol, SymbolKind, END_SYMBOL_NAME, EPSILON};
pub use crate::table::{Action, ParsingTable};

mod automaton;
mod engine;
mod error;
mod grammar;
mod item;
mod item_set;
mod parser;
mod symbol;
mod table;
