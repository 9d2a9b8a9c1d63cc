use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::iter::once;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::GrammarError;
use crate::symbol::{Symbol, EPSILON};

pub type FirstSet = BTreeMap<Symbol, BTreeSet<Symbol>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Production { lhs, rhs }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " {}", EPSILON);
        }
        for symbol in &self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// A context-free grammar together with the tables derived from it.
///
/// The usual lifecycle is [`Grammar::from_text`], then [`Grammar::self_augment`],
/// [`Grammar::build_production_index`] and [`Grammar::build_first_set`]; after
/// that the grammar is only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start_symbol: Symbol,
    productions: BTreeMap<Symbol, BTreeSet<Vec<Symbol>>>,
    first_set: FirstSet,
    production_index: BTreeMap<Production, usize>,
    production_list: Vec<Production>,
}

impl Grammar {
    pub fn new(start_symbol: Symbol) -> Self {
        Grammar {
            start_symbol,
            productions: BTreeMap::new(),
            first_set: BTreeMap::new(),
            production_index: BTreeMap::new(),
            production_list: Vec::new(),
        }
    }

    /// Reads the line-based grammar format:
    ///
    /// ```text
    /// E
    /// E -> E + T | T
    /// T -> n
    /// ```
    pub fn from_text(text: &str) -> Result<Self, GrammarError> {
        let mut lines = text.lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end()))
            .filter(|(_, line)| !line.trim().is_empty());
        let (_, start) = lines.next().ok_or(GrammarError::Empty)?;
        let mut grammar = Grammar::new(Symbol::non_terminal(start.trim()));
        for (line, text) in lines {
            let (lhs, alternatives) = text.split_once("->")
                .ok_or_else(|| GrammarError::MissingSeparator { line, text: text.to_string() })?;
            let lhs = lhs.trim();
            if lhs.contains(char::is_whitespace) || !Symbol::classify(lhs).is_non_terminal() {
                return Err(GrammarError::InvalidLhs { line, lhs: lhs.to_string() });
            }
            let lhs = Symbol::non_terminal(lhs);
            for alternative in alternatives.split(" | ") {
                let rhs = alternative.split(' ')
                    .filter(|token| !token.is_empty() && *token != EPSILON)
                    .map(Symbol::classify)
                    .collect();
                grammar.push_production(lhs.clone(), rhs);
            }
        }
        debug!("read grammar with start symbol {} and {} productions", grammar.start_symbol, grammar.production_count());
        Ok(grammar)
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn productions(&self) -> &BTreeMap<Symbol, BTreeSet<Vec<Symbol>>> {
        &self.productions
    }

    pub fn productions_of(&self, lhs: &Symbol) -> impl Iterator<Item=&Vec<Symbol>> {
        self.productions.get(lhs).into_iter().flatten()
    }

    pub fn production_count(&self) -> usize {
        self.productions.values().map(BTreeSet::len).sum()
    }

    pub fn production(&self, rule: usize) -> Option<&Production> {
        self.production_list.get(rule)
    }

    pub fn production_list(&self) -> &[Production] {
        &self.production_list
    }

    pub fn rule_number(&self, lhs: &Symbol, rhs: &[Symbol]) -> Option<usize> {
        self.production_index.get(&Production::new(lhs.clone(), rhs.to_vec())).copied()
    }

    pub fn first_set(&self) -> &FirstSet {
        &self.first_set
    }

    /// Empty symbols are dropped from `rhs`, so `A -> ε` is stored as an empty sequence.
    pub fn push_production(&mut self, lhs: Symbol, rhs: Vec<Symbol>) {
        let rhs = rhs.into_iter().filter(|symbol| !symbol.is_empty()).collect();
        self.productions.entry(lhs)
            .or_insert_with(|| BTreeSet::new())
            .insert(rhs);
    }

    pub fn push_productions(&mut self, lhs: Symbol, rhs_set: impl IntoIterator<Item=Vec<Symbol>>) {
        for rhs in rhs_set {
            self.push_production(lhs.clone(), rhs);
        }
    }

    /// Terminals used on right-hand sides. The empty symbol is not included.
    pub fn terminals(&self) -> BTreeSet<Symbol> {
        self.productions.values()
            .flatten()
            .flatten()
            .filter(|symbol| symbol.is_terminal() && !symbol.is_empty())
            .cloned()
            .collect()
    }

    pub fn non_terminals(&self) -> BTreeSet<Symbol> {
        let mut non_terminals: BTreeSet<_> = self.productions.keys().cloned().collect();
        non_terminals.extend(self.productions.values()
            .flatten()
            .flatten()
            .filter(|symbol| symbol.is_non_terminal())
            .cloned());
        non_terminals
    }

    pub fn has_empty_production(&self) -> bool {
        self.productions.values().flatten().any(Vec::is_empty)
    }

    fn uses(&self, symbol: &Symbol) -> bool {
        self.productions.contains_key(symbol) ||
            self.productions.values().flatten().flatten().any(|used| used == symbol)
    }

    pub fn is_augmented(&self) -> bool {
        self.productions.get(&self.start_symbol)
            .map_or(false, |rhs_set| rhs_set.len() == 1 && rhs_set.iter().all(|rhs| rhs.len() == 1))
    }

    /// Adds `S' -> S` under a fresh name and makes `S'` the start symbol.
    ///
    /// Not re-entrant: a second call augments the already augmented grammar again.
    pub fn self_augment(&mut self) {
        let mut name = format!("{}'", self.start_symbol.name());
        while self.uses(&Symbol::non_terminal(name.as_str())) {
            name.push('\'');
        }
        let augmented = Symbol::non_terminal(name);
        self.push_production(augmented.clone(), vec![self.start_symbol.clone()]);
        debug!("augmented grammar: {} -> {}", augmented, self.start_symbol);
        self.start_symbol = augmented;
    }

    pub fn build_production_index(&mut self) {
        self.production_index.clear();
        self.production_list.clear();
        for (lhs, rhs_set) in &self.productions {
            for rhs in rhs_set {
                let production = Production::new(lhs.clone(), rhs.clone());
                self.production_index.insert(production.clone(), self.production_list.len());
                self.production_list.push(production);
            }
        }
        debug!("indexed {} productions", self.production_list.len());
    }

    pub fn build_first_set(&mut self) {
        let mut first_set = FirstSet::new();
        for terminal in self.terminals() {
            first_set.insert(terminal.clone(), once(terminal).collect());
        }
        for non_terminal in self.non_terminals() {
            first_set.insert(non_terminal, BTreeSet::new());
        }
        if self.has_empty_production() {
            first_set.insert(Symbol::empty(), once(Symbol::empty()).collect());
        }

        let mut round = 0usize;
        loop {
            let mut updated = false;
            for (lhs, rhs_set) in &self.productions {
                for rhs in rhs_set {
                    let update = if rhs.is_empty() {
                        once(Symbol::empty()).collect()
                    } else {
                        first_of(&first_set, rhs)
                    };
                    let set = first_set.entry(lhs.clone()).or_insert_with(|| BTreeSet::new());
                    for symbol in update {
                        updated |= set.insert(symbol);
                    }
                }
            }
            round += 1;
            trace!("FIRST round {}: updated = {}", round, updated);
            if !updated { break; }
        }
        first_set.insert(Symbol::end(), once(Symbol::end()).collect());
        debug!("FIRST sets reached a fixed point after {} rounds", round);
        self.first_set = first_set;
    }

    /// FIRST of a symbol string. Contains the empty symbol only if every symbol of a
    /// non-empty `string` can derive the empty string.
    pub fn first(&self, string: &[Symbol]) -> BTreeSet<Symbol> {
        first_of(&self.first_set, string)
    }
}

fn first_of(first_set: &FirstSet, string: &[Symbol]) -> BTreeSet<Symbol> {
    let mut result = BTreeSet::new();
    for symbol in string {
        let first = if let Some(first) = first_set.get(symbol) { first } else { return result; };
        result.extend(first.iter().filter(|symbol| !symbol.is_empty()).cloned());
        if !first.contains(&Symbol::empty()) { return result; }
    }
    if !string.is_empty() {
        result.insert(Symbol::empty());
    }
    result
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::from_text(s)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn join<'a>(symbols: impl IntoIterator<Item=&'a Symbol>) -> String {
            symbols.into_iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        }
        writeln!(f, "StartSymbol: {}", self.start_symbol)?;
        writeln!(f, "Terminals: {{{}}}", join(&self.terminals()))?;
        writeln!(f, "NonTerminals: {{{}}}", join(&self.non_terminals()))?;
        writeln!(f, "Productions: {{")?;
        for (lhs, rhs_set) in &self.productions {
            for rhs in rhs_set {
                match self.rule_number(lhs, rhs) {
                    Some(rule) => writeln!(f, "  ({}) {}", rule, Production::new(lhs.clone(), rhs.clone()))?,
                    None => writeln!(f, "  (-) {}", Production::new(lhs.clone(), rhs.clone()))?,
                }
            }
        }
        write!(f, "}}")
    }
}
