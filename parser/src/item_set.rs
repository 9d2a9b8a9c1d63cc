use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use log::trace;

use crate::grammar::Grammar;
use crate::item::Item;
use crate::symbol::Symbol;

/// One automaton state. Two item sets are the same state iff they hold exactly the same items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemSet {
    items: BTreeSet<Item>,
}

impl ItemSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, item: Item) -> bool {
        self.items.insert(item)
    }

    pub fn items(&self) -> &BTreeSet<Item> {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item=&Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_symbols(&self) -> BTreeSet<Symbol> {
        self.items.iter()
            .filter_map(Item::next_symbol)
            .cloned()
            .collect()
    }

    pub fn self_closure(&mut self, grammar: &Grammar) {
        let mut round = 0usize;
        loop {
            let mut update = BTreeSet::new();
            for item in &self.items {
                let non_terminal = match item.next_symbol() {
                    Some(symbol) if symbol.is_non_terminal() => symbol,
                    _ => continue,
                };
                for lookahead in grammar.first(&item.back_slice(1)) {
                    for rhs in grammar.productions_of(non_terminal) {
                        update.insert(Item::new(non_terminal.clone(), rhs.clone(), 0, lookahead.clone()));
                    }
                }
            }
            let mut updated = false;
            for item in update {
                updated |= self.items.insert(item);
            }
            round += 1;
            if !updated { break; }
        }
        trace!("closure settled at {} items after {} rounds", self.items.len(), round);
    }

    /// Empty when no item has `symbol` after its dot.
    pub fn go(&self, grammar: &Grammar, symbol: &Symbol) -> ItemSet {
        let mut next = ItemSet::new();
        for item in &self.items {
            if item.next_symbol() == Some(symbol) {
                next.push(item.advance_dot());
            }
        }
        if !next.is_empty() {
            next.self_closure(grammar);
        }
        next
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item=Item>>(iter: I) -> Self {
        ItemSet { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::collections::btree_set::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Display for ItemSet {
    /// Items that differ only in lookahead share one line.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut last: Option<&Item> = None;
        for item in &self.items {
            match last {
                Some(last) if last.is_mergeable(item) => write!(f, " {}", item.lookahead)?,
                Some(_) => {
                    f.write_str("\n")?;
                    item.fmt_core(f)?;
                    write!(f, ", {}", item.lookahead)?;
                }
                None => {
                    item.fmt_core(f)?;
                    write!(f, ", {}", item.lookahead)?;
                }
            }
            last = Some(item);
        }
        Ok(())
    }
}
