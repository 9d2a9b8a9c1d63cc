use std::collections::BTreeMap;

use indexmap::IndexSet;
use log::{debug, trace};

use crate::error::BuildError;
use crate::grammar::Grammar;
use crate::item::Item;
use crate::item_set::ItemSet;
use crate::symbol::Symbol;

/// The canonical collection of LR(1) item sets.
///
/// State ids are insertion order: state 0 is the closure of `[S' -> · S, $]`, and every
/// other state gets the next id the first time it is reached. States are deduplicated by
/// full item-set equality, never by core, so this is the canonical LR(1) automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: IndexSet<ItemSet>,
    transitions: Vec<BTreeMap<Symbol, usize>>,
}

impl Automaton {
    pub fn new(grammar: &Grammar) -> Result<Self, BuildError> {
        let start = grammar.start_symbol();
        let not_augmented = || BuildError::NotAugmented { start: start.clone() };
        if !grammar.is_augmented() {
            return Err(not_augmented());
        }
        let start_rhs = grammar.productions_of(start).next().ok_or_else(not_augmented)?;

        let mut start_state = ItemSet::new();
        start_state.push(Item::new(start.clone(), start_rhs.clone(), 0, Symbol::end()));
        start_state.self_closure(grammar);

        let mut states = IndexSet::new();
        states.insert(start_state);
        let mut transitions = vec![BTreeMap::new()];
        let mut index = 0;
        while let Some(state) = states.get_index(index) {
            let gotos: Vec<_> = state.next_symbols()
                .into_iter()
                .map(|symbol| {
                    let next = state.go(grammar, &symbol);
                    (symbol, next)
                })
                .filter(|(_, next)| !next.is_empty())
                .collect();
            for (symbol, next) in gotos {
                let (target, inserted) = states.insert_full(next);
                if inserted {
                    transitions.push(BTreeMap::new());
                    trace!("I{} --- {} --> I{} (new)", index, symbol, target);
                }
                transitions[index].insert(symbol, target);
            }
            index += 1;
        }
        debug!("built canonical LR(1) automaton with {} states", states.len());
        Ok(Automaton { states, transitions })
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: usize) -> Option<&ItemSet> {
        self.states.get_index(id)
    }

    pub fn states(&self) -> impl Iterator<Item=&ItemSet> {
        self.states.iter()
    }

    pub fn transitions(&self) -> &[BTreeMap<Symbol, usize>] {
        &self.transitions
    }

    pub fn transition(&self, from: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(from)?.get(symbol).copied()
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.states.iter().eq(other.states.iter()) && self.transitions == other.transitions
    }
}

impl Eq for Automaton {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use crate::automaton::Automaton;
    use crate::error::BuildError;
    use crate::grammar::tests::{prepared, ARITHMETIC, SMALL};
    use crate::grammar::Grammar;
    use crate::symbol::Symbol;

    fn edges(edges: &[(&str, usize)]) -> BTreeMap<Symbol, usize> {
        edges.iter().map(|(name, target)| (Symbol::classify(name), *target)).collect()
    }

    #[test]
    fn small_grammar() {
        let grammar = prepared(SMALL);
        let automaton = Automaton::new(&grammar).unwrap();
        // 0: [E'->.E,$] [E->.E+T,$+] [E->.T,$+] [T->.n,$+]
        // 1: [E'->E.,$] [E->E.+T,$+]
        // 2: [E->T.,$+]
        // 3: [T->n.,$+]
        // 4: [E->E+.T,$+] [T->.n,$+]
        // 5: [E->E+T.,$+]
        assert_eq!(automaton.state_count(), 6);
        assert_eq!(automaton.transitions(), &[
            edges(&[("E", 1), ("T", 2), ("n", 3)]),
            edges(&[("+", 4)]),
            edges(&[]),
            edges(&[]),
            edges(&[("T", 5), ("n", 3)]),
            edges(&[]),
        ]);
        assert_eq!(automaton.state(4).unwrap().len(), 4);
        assert_eq!(automaton.transition(4, &Symbol::terminal("n")), Some(3));
        assert_eq!(automaton.transition(2, &Symbol::terminal("n")), None);
    }

    #[test]
    fn accepting_state_exists() {
        let grammar = prepared(SMALL);
        let automaton = Automaton::new(&grammar).unwrap();
        let accepting: Vec<_> = automaton.states()
            .enumerate()
            .filter(|(_, state)| state.iter().any(|item| item.is_complete() && &item.lhs == grammar.start_symbol() && item.lookahead.is_end()))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(accepting, vec![1]);
    }

    #[test]
    fn canonical_state_count() {
        // LALR(1) merges this down to 7 states.
        let grammar = prepared("S\nS -> C C\nC -> c C | d");
        let automaton = Automaton::new(&grammar).unwrap();
        assert_eq!(automaton.state_count(), 10);
    }

    #[test]
    fn transitions_agree_with_go() {
        let grammar = prepared(ARITHMETIC);
        let automaton = Automaton::new(&grammar).unwrap();
        for (from, edges) in automaton.transitions().iter().enumerate() {
            let state = automaton.state(from).unwrap();
            assert_eq!(edges.keys().cloned().collect::<Vec<_>>(), state.next_symbols().into_iter().collect::<Vec<_>>());
            for (symbol, to) in edges {
                assert_eq!(&state.go(&grammar, symbol), automaton.state(*to).unwrap());
            }
        }
    }

    #[test]
    fn deterministic() {
        let grammar = prepared(ARITHMETIC);
        let a = Automaton::new(&grammar).unwrap();
        let b = Automaton::new(&prepared(ARITHMETIC)).unwrap();
        assert_eq!(a.state_count(), b.state_count());
        assert_eq!(a.transitions(), b.transitions());
        assert!(a == b);
    }

    #[test]
    fn requires_augmented_grammar() {
        let grammar = Grammar::from_text(SMALL).unwrap();
        assert_eq!(Automaton::new(&grammar), Err(BuildError::NotAugmented { start: Symbol::non_terminal("E") }));
    }
}
