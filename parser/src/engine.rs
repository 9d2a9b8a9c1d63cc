use log::{debug, trace};

use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::parser::LR1Parser;
use crate::symbol::Symbol;
use crate::table::{Action, ParsingTable};

pub const ERROR_FINISH: &str = "Finish [ERROR OCCURRED]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Running,
    Accepted,
    Rejected,
}

/// One step of a parse, recorded before the action is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub states: Vec<usize>,
    pub symbols: Vec<Symbol>,
    pub input: Vec<Symbol>,
    pub action: Action,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    rows: Vec<TraceRow>,
    status: ParseStatus,
    had_error: bool,
}

impl Trace {
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// True once recovery has run, whatever the final status.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ParseStatus::Accepted
    }

    /// Header row, then one `[stack, symbols, input, action]` row per step.
    pub fn entries(&self) -> Vec<[String; 4]> {
        let mut entries = vec![["Stack", "Symbols", "Input", "Action"].map(String::from)];
        entries.extend(self.rows.iter().map(|row| [
            row.states.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
            row.symbols.iter().map(ToString::to_string).collect(),
            row.input.iter().map(ToString::to_string).collect(),
            row.description.clone(),
        ]));
        if self.had_error && entries.len() > 1 {
            if let Some(last) = entries.last_mut() {
                last[3] = ERROR_FINISH.to_string();
            }
        }
        entries
    }
}

/// Runs the shift-reduce loop over one table. Holds no per-parse state.
#[derive(Debug, Clone, Copy)]
pub struct ParserEngine<'a> {
    grammar: &'a Grammar,
    table: &'a ParsingTable,
}

impl<'a> ParserEngine<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a ParsingTable) -> Self {
        ParserEngine { grammar, table }
    }

    pub fn describe(&self, action: Action) -> String {
        match action {
            Action::Error => "Error".to_string(),
            Action::Shift(state) => format!("Shift {}", state),
            Action::Goto(state) => format!("Goto {}", state),
            Action::Reduce(rule) => match self.grammar.production(rule) {
                Some(production) => format!("Reduce {}", production),
                None => format!("Reduce r{}", rule),
            },
            Action::Accept => "Accept".to_string(),
        }
    }

    /// Syntax errors end up in the trace. `Err` means the grammar and table disagree.
    pub fn parse(&self, input: impl IntoIterator<Item=Symbol>) -> Result<Trace, ParseError> {
        let mut input: Vec<Symbol> = input.into_iter().collect();
        if !input.last().map_or(false, Symbol::is_end) {
            input.push(Symbol::end());
        }

        let mut states = vec![0usize];
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut cursor = 0;
        let mut rows = Vec::new();
        let mut had_error = false;
        let mut status = ParseStatus::Running;
        while status == ParseStatus::Running {
            let state = states.last().copied().unwrap_or_default();
            let current = input.get(cursor).cloned().unwrap_or_else(Symbol::end);
            let action = self.table.get_action(state, &current);
            let description = self.describe(action);
            trace!("{:?} | {} | {}", states, current, description);
            rows.push(TraceRow {
                states: states.clone(),
                symbols: symbols.clone(),
                input: input.get(cursor..).unwrap_or_default().to_vec(),
                action,
                description,
            });

            match action {
                Action::Accept => status = ParseStatus::Accepted,
                // a non-terminal in the input is taken as already reduced
                Action::Shift(next) | Action::Goto(next) => {
                    states.push(next);
                    symbols.push(current);
                    cursor += 1;
                }
                Action::Reduce(rule) => {
                    let production = self.grammar.production(rule).ok_or(ParseError::UnknownRule { rule })?;
                    let len = production.rhs.len();
                    if symbols.len() < len {
                        return Err(ParseError::StackUnderflow { rule });
                    }
                    states.truncate(states.len() - len);
                    symbols.truncate(symbols.len() - len);
                    let top = states.last().copied().unwrap_or_default();
                    match self.table.get_action(top, &production.lhs) {
                        Action::Goto(next) => {
                            states.push(next);
                            symbols.push(production.lhs.clone());
                        }
                        _ => return Err(ParseError::MissingGoto { state: top, symbol: production.lhs.clone() }),
                    }
                }
                Action::Error => {
                    had_error = true;
                    if !self.recover(&mut states, &mut symbols, &current) {
                        status = ParseStatus::Rejected;
                    }
                }
            }
        }
        debug!("parse finished after {} steps: {:?}, had_error = {}", rows.len(), status, had_error);
        Ok(Trace { rows, status, had_error })
    }

    /// Panic mode: drop stack entries until the top state has an action on `current`.
    /// The input is left untouched.
    fn recover(&self, states: &mut Vec<usize>, symbols: &mut Vec<Symbol>, current: &Symbol) -> bool {
        while symbols.pop().is_some() {
            states.pop();
            let top = states.last().copied().unwrap_or_default();
            if self.table.get_action(top, current) != Action::Error {
                debug!("recovered in state {} on {}", top, current);
                return true;
            }
        }
        debug!("no state on the stack accepts {}", current);
        false
    }
}

pub trait Parse: IntoIterator {
    fn parse(self, parser: &LR1Parser) -> Result<Trace, ParseError>;
}

impl<I: IntoIterator<Item=Symbol>> Parse for I {
    fn parse(self, parser: &LR1Parser) -> Result<Trace, ParseError> {
        parser.parse(self)
    }
}
