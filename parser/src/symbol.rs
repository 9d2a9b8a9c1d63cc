use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

pub const END_SYMBOL_NAME: &str = "$";
pub const EPSILON: &str = "ε";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// A grammar symbol.
///
/// Two symbols are the same symbol iff their names are equal; the kind only
/// decides which table namespace the symbol lives in. A grammar must never use
/// one name with both kinds.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol { name: name.into(), kind }
    }

    pub fn terminal(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::Terminal)
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::NonTerminal)
    }

    /// Classifies a grammar-text token: uppercase first character means non-terminal.
    pub fn classify(name: &str) -> Self {
        if name.chars().next().map_or(false, char::is_uppercase) {
            Self::non_terminal(name)
        } else {
            Self::terminal(name)
        }
    }

    pub fn empty() -> Self {
        Self::terminal("")
    }

    pub fn end() -> Self {
        Self::terminal(END_SYMBOL_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn is_non_terminal(&self) -> bool {
        self.kind == SymbolKind::NonTerminal
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_end(&self) -> bool {
        self.name == END_SYMBOL_NAME
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str(EPSILON)
        } else {
            f.write_str(&self.name)
        }
    }
}
