use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::{debug, trace};

use crate::automaton::Automaton;
use crate::error::BuildError;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Error,
    Shift(usize),
    Goto(usize),
    Reduce(usize),
    Accept,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Error => Ok(()),
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Goto(state) => write!(f, "{}", state),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::Accept => f.write_str("acc"),
        }
    }
}

/// The ACTION/GOTO matrix.
///
/// Columns are 1-based: terminals in name order, then `$`, then non-terminals in name
/// order. Column 0 is never written. Conflicting writes are resolved by overwriting, with
/// reduce/accept entries written before shift/goto entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingTable {
    terminals: BTreeMap<Symbol, usize>,
    non_terminals: BTreeMap<Symbol, usize>,
    table: Vec<Vec<Action>>,
}

impl ParsingTable {
    pub fn new(automaton: &Automaton, grammar: &Grammar) -> Result<Self, BuildError> {
        let mut column = 0;
        let mut terminals = BTreeMap::new();
        for symbol in grammar.terminals() {
            column += 1;
            terminals.insert(symbol, column);
        }
        column += 1;
        let end_column = column;
        terminals.insert(Symbol::end(), end_column);
        let mut non_terminals = BTreeMap::new();
        for symbol in grammar.non_terminals() {
            column += 1;
            non_terminals.insert(symbol, column);
        }

        let mut table = Vec::with_capacity(automaton.state_count());
        for (state_id, state) in automaton.states().enumerate() {
            let mut row = vec![Action::Error; column + 1];

            // accept and reduce
            for item in state.iter().filter(|item| item.is_complete()) {
                if &item.lhs == grammar.start_symbol() {
                    set_cell(&mut row, state_id, end_column, &Symbol::end(), Action::Accept);
                } else {
                    let rule = grammar.rule_number(&item.lhs, &item.rhs)
                        .ok_or_else(|| BuildError::UnindexedProduction { production: Production::new(item.lhs.clone(), item.rhs.clone()) })?;
                    if let Some(&column) = terminals.get(&item.lookahead) {
                        set_cell(&mut row, state_id, column, &item.lookahead, Action::Reduce(rule));
                    }
                }
            }

            // shift and goto
            for (symbol, &target) in automaton.transitions().get(state_id).into_iter().flatten() {
                if symbol.is_terminal() {
                    if let Some(&column) = terminals.get(symbol) {
                        set_cell(&mut row, state_id, column, symbol, Action::Shift(target));
                    }
                } else if let Some(&column) = non_terminals.get(symbol) {
                    set_cell(&mut row, state_id, column, symbol, Action::Goto(target));
                }
            }
            table.push(row);
        }
        debug!("built parsing table: {} states x {} columns", table.len(), column);
        Ok(ParsingTable { terminals, non_terminals, table })
    }

    /// [`Action::Error`] for cells never written, unknown states and symbols without a
    /// column of their kind.
    pub fn get_action(&self, state: usize, symbol: &Symbol) -> Action {
        let columns = if symbol.is_terminal() { &self.terminals } else { &self.non_terminals };
        columns.get(symbol)
            .and_then(|&column| self.table.get(state)?.get(column))
            .copied()
            .unwrap_or_default()
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    /// Includes the unused column 0.
    pub fn column_count(&self) -> usize {
        self.terminals.len() + self.non_terminals.len() + 1
    }

    pub fn terminal_columns(&self) -> &BTreeMap<Symbol, usize> {
        &self.terminals
    }

    pub fn non_terminal_columns(&self) -> &BTreeMap<Symbol, usize> {
        &self.non_terminals
    }

    /// Column symbols in column order.
    pub fn columns(&self) -> Vec<&Symbol> {
        let mut columns: Vec<_> = self.terminals.iter().chain(&self.non_terminals).collect();
        columns.sort_by_key(|(_, column)| **column);
        columns.into_iter().map(|(symbol, _)| symbol).collect()
    }

    pub fn row(&self, state: usize) -> Option<&[Action]> {
        self.table.get(state).map(Vec::as_slice)
    }
}

fn set_cell(row: &mut [Action], state: usize, column: usize, symbol: &Symbol, action: Action) {
    let cell = &mut row[column];
    if *cell != Action::Error && *cell != action {
        trace!("state {} on {}: {:?} overwritten by {:?}", state, symbol, cell, action);
    }
    *cell = action;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::automaton::Automaton;
    use crate::grammar::tests::{prepared, ARITHMETIC, SMALL};
    use crate::symbol::Symbol;
    use crate::table::{Action, ParsingTable};

    fn build(text: &str) -> (crate::grammar::Grammar, Automaton, ParsingTable) {
        let grammar = prepared(text);
        let automaton = Automaton::new(&grammar).unwrap();
        let table = ParsingTable::new(&automaton, &grammar).unwrap();
        (grammar, automaton, table)
    }

    #[test]
    fn columns() {
        let (_, _, table) = build(SMALL);
        let names: Vec<_> = table.columns().into_iter().map(Symbol::name).collect();
        assert_eq!(names, vec!["+", "n", "$", "E", "E'", "T"]);
        assert_eq!(table.terminal_columns()[&Symbol::end()], 3);
        assert_eq!(table.non_terminal_columns()[&Symbol::non_terminal("E")], 4);
        assert_eq!(table.column_count(), 7);
    }

    #[test]
    fn small_grammar() {
        use Action::*;
        let (_, _, table) = build(SMALL);
        // rules: 0 E->E+T, 1 E->T, 2 E'->E, 3 T->n
        //              -      +          n          $          E        E'     T
        let expect = vec![
            vec![Error, Error, Shift(3), Error, Goto(1), Error, Goto(2)],
            vec![Error, Shift(4), Error, Accept, Error, Error, Error],
            vec![Error, Reduce(1), Error, Reduce(1), Error, Error, Error],
            vec![Error, Reduce(3), Error, Reduce(3), Error, Error, Error],
            vec![Error, Error, Shift(3), Error, Error, Error, Goto(5)],
            vec![Error, Reduce(0), Error, Reduce(0), Error, Error, Error],
        ];
        assert_eq!(table.state_count(), expect.len());
        for (state, row) in expect.iter().enumerate() {
            assert_eq!(table.row(state).unwrap(), row.as_slice());
        }
    }

    #[test]
    fn get_action() {
        let (_, _, table) = build(SMALL);
        assert_eq!(table.get_action(0, &Symbol::terminal("n")), Action::Shift(3));
        assert_eq!(table.get_action(0, &Symbol::non_terminal("T")), Action::Goto(2));
        assert_eq!(table.get_action(1, &Symbol::end()), Action::Accept);
        assert_eq!(table.get_action(0, &Symbol::terminal("+")), Action::Error);
        assert_eq!(table.get_action(0, &Symbol::terminal("(")), Action::Error);
        assert_eq!(table.get_action(0, &Symbol::terminal("T")), Action::Error);
        assert_eq!(table.get_action(42, &Symbol::terminal("n")), Action::Error);
    }

    #[test]
    fn rebuild_is_identical() {
        let (grammar, automaton, table) = build(ARITHMETIC);
        assert_eq!(ParsingTable::new(&automaton, &grammar).unwrap(), table);
    }

    #[test]
    fn reduce_rules_resolve() {
        let (grammar, automaton, table) = build(ARITHMETIC);
        for (state_id, state) in automaton.states().enumerate() {
            for item in state.iter().filter(|item| item.is_complete() && &item.lhs != grammar.start_symbol()) {
                match table.get_action(state_id, &item.lookahead) {
                    Action::Reduce(rule) => {
                        let production = grammar.production(rule).unwrap();
                        assert_eq!(production.lhs, item.lhs);
                        assert_eq!(production.rhs.len(), item.rhs.len());
                    }
                    other => panic!("expected reduce in state {} on {}, found {:?}", state_id, item.lookahead, other),
                }
            }
        }
    }

    #[test]
    fn shift_overwrites_reduce() {
        let _ = env_logger::builder().is_test(true).try_init();
        // E -> E + E is ambiguous: after `E + E` on `+` both shift and reduce apply.
        let (grammar, automaton, table) = build("E\nE -> E + E | n");
        let plus = Symbol::terminal("+");
        let rule = grammar.rule_number(&Symbol::non_terminal("E"), &[Symbol::non_terminal("E"), plus.clone(), Symbol::non_terminal("E")]).unwrap();
        let conflicted = automaton.states()
            .position(|state| state.iter().any(|item| item.is_complete() && item.rhs.len() == 3 && item.lookahead == plus))
            .unwrap();
        assert!(automaton.transition(conflicted, &plus).is_some());
        assert!(matches!(table.get_action(conflicted, &plus), Action::Shift(_)));
        assert_eq!(table.get_action(conflicted, &Symbol::end()), Action::Reduce(rule));
    }

    #[test]
    fn display() {
        assert_eq!(Action::Error.to_string(), "");
        assert_eq!(Action::Shift(4).to_string(), "s4");
        assert_eq!(Action::Goto(2).to_string(), "2");
        assert_eq!(Action::Reduce(1).to_string(), "r1");
        assert_eq!(Action::Accept.to_string(), "acc");
    }
}
