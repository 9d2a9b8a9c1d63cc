use std::fmt::{Display, Formatter};

use crate::symbol::Symbol;

/// An LR(1) item: a production with a dot position and one lookahead symbol.
///
/// Field order matters: the derived ordering is (lhs, rhs, dot, lookahead).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Item {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>, dot: usize, lookahead: Symbol) -> Self {
        debug_assert!(dot <= rhs.len());
        Item { lhs, rhs, dot, lookahead }
    }

    pub fn is_complete(&self) -> bool {
        self.dot >= self.rhs.len()
    }

    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.rhs.get(self.dot)
    }

    /// Callers check `!self.is_complete()` first.
    pub fn advance_dot(&self) -> Self {
        debug_assert!(!self.is_complete(), "advancing a complete item");
        Item {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        }
    }

    pub fn is_mergeable(&self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs && self.dot == other.dot
    }

    /// The rhs from `dot + offset` on, followed by the lookahead.
    pub fn back_slice(&self, offset: usize) -> Vec<Symbol> {
        let start = (self.dot + offset).min(self.rhs.len());
        self.rhs[start..].iter()
            .chain(Some(&self.lookahead))
            .cloned()
            .collect()
    }

    pub(crate) fn fmt_core(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for (i, symbol) in self.rhs.iter().enumerate() {
            if i == self.dot {
                f.write_str(" ·")?;
            }
            write!(f, " {}", symbol)?;
        }
        if self.is_complete() {
            f.write_str(" ·")?;
        }
        Ok(())
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_core(f)?;
        write!(f, ", {}", self.lookahead)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::item::Item;
    use crate::symbol::Symbol;

    fn sum(dot: usize, lookahead: &str) -> Item {
        Item::new(
            Symbol::non_terminal("E"),
            vec![Symbol::non_terminal("E"), Symbol::terminal("+"), Symbol::non_terminal("T")],
            dot,
            Symbol::terminal(lookahead),
        )
    }

    #[test]
    fn advance_dot() {
        let item = sum(0, "$");
        assert_eq!(item.next_symbol(), Some(&Symbol::non_terminal("E")));
        let item = item.advance_dot().advance_dot().advance_dot();
        assert_eq!(item, sum(3, "$"));
        assert!(item.is_complete());
        assert_eq!(item.next_symbol(), None);
    }

    #[test]
    fn back_slice() {
        assert_eq!(sum(0, "$").back_slice(1), vec![Symbol::terminal("+"), Symbol::non_terminal("T"), Symbol::end()]);
        assert_eq!(sum(1, "+").back_slice(1), vec![Symbol::non_terminal("T"), Symbol::terminal("+")]);
        assert_eq!(sum(2, "+").back_slice(1), vec![Symbol::terminal("+")]);
        assert_eq!(sum(0, "$").back_slice(0), vec![Symbol::non_terminal("E"), Symbol::terminal("+"), Symbol::non_terminal("T"), Symbol::end()]);
    }

    #[test]
    fn lookahead_is_part_of_identity() {
        assert_ne!(sum(0, "$"), sum(0, "+"));
        assert!(sum(0, "$") < sum(0, "+"));
        assert!(sum(0, "+") < sum(1, "$"));
        assert!(sum(0, "$").is_mergeable(&sum(0, "+")));
        assert!(!sum(0, "$").is_mergeable(&sum(1, "$")));
    }

    #[test]
    fn display() {
        assert_eq!(sum(1, "+").to_string(), "E -> E · + T, +");
        assert_eq!(sum(3, "$").to_string(), "E -> E + T ·, $");
        assert_eq!(Item::new(Symbol::non_terminal("A"), vec![], 0, Symbol::end()).to_string(), "A -> ·, $");
    }
}
