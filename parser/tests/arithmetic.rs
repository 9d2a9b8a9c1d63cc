use parser::{Action, Grammar, LR1Parser, Parse, ParseStatus, Symbol, ERROR_FINISH};
use pretty_assertions::assert_eq;

const ARITHMETIC: &str = "E
E -> E + T | E - T | T
T -> T * F | T / F | F
F -> ( E ) | n";

fn arithmetic() -> LR1Parser {
    LR1Parser::new(Grammar::from_text(ARITHMETIC).unwrap()).unwrap()
}

fn symbols(text: &str) -> Vec<Symbol> {
    text.split_whitespace().map(Symbol::classify).collect()
}

#[test]
fn accept_nested_expression() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = arithmetic();
    let trace = symbols("( n + n ) * n - n / n").parse(&parser).unwrap();
    assert_eq!(trace.status(), ParseStatus::Accepted);
    assert!(!trace.had_error());
    let last = trace.rows().last().unwrap();
    assert_eq!(last.action, Action::Accept);
    assert_eq!(last.symbols, vec![Symbol::non_terminal("E")]);
    for row in trace.rows() {
        assert_eq!(row.states.len(), row.symbols.len() + 1);
        assert_eq!(row.states[0], 0);
    }
    let shifts = trace.rows().iter().filter(|row| matches!(row.action, Action::Shift(_))).count();
    assert_eq!(shifts, 11);
}

#[test]
fn parse_from_iterator() {
    let parser = arithmetic();
    let trace = "n * ( n - n )".split(' ').map(Symbol::classify).parse(&parser).unwrap();
    assert!(trace.is_accepted());
    let entries = trace.entries();
    assert_eq!(&entries[1][..3], &["0", "", "n*(n-n)$"].map(String::from)[..]);
    assert!(entries[1][3].starts_with("Shift "));
}

#[test]
fn recover_from_repeated_operand() {
    let parser = arithmetic();
    let trace = symbols("n n + n").parse(&parser).unwrap();
    assert_eq!(trace.status(), ParseStatus::Accepted);
    assert!(trace.had_error());
    assert_eq!(trace.rows().iter().filter(|row| row.action == Action::Error).count(), 1);
    assert_eq!(trace.entries().last().unwrap()[3], ERROR_FINISH);
}

#[test]
fn reject() {
    let parser = arithmetic();
    for text in ["n + * n", "n )", "( n", "* n"] {
        let trace = symbols(text).parse(&parser).unwrap();
        assert_eq!(trace.status(), ParseStatus::Rejected, "{}", text);
        assert!(trace.had_error(), "{}", text);
        assert_eq!(trace.rows().last().unwrap().action, Action::Error, "{}", text);
    }
}

#[test]
fn unknown_terminal_is_a_syntax_error() {
    let parser = arithmetic();
    let trace = symbols("n % n").parse(&parser).unwrap();
    assert!(trace.had_error());
    assert_eq!(trace.status(), ParseStatus::Rejected);
}

#[test]
fn empty_productions() {
    let parser = LR1Parser::new(Grammar::from_text("S\nS -> a S b | ε").unwrap()).unwrap();
    for text in ["", "a b", "a a b b"] {
        let trace = symbols(text).parse(&parser).unwrap();
        assert!(trace.is_accepted(), "{:?}", text);
        assert!(!trace.had_error(), "{:?}", text);
    }
    let trace = symbols("a b b").parse(&parser).unwrap();
    assert!(trace.had_error());
}

#[test]
fn deterministic_construction() {
    let a = arithmetic();
    let b = arithmetic();
    assert_eq!(a.automaton().state_count(), b.automaton().state_count());
    assert_eq!(a.automaton().transitions(), b.automaton().transitions());
    assert_eq!(a.table(), b.table());
    assert_eq!(a.grammar().production_list(), b.grammar().production_list());
}
