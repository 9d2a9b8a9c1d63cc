use parser::{Automaton, FirstSet, LR1Parser, ParsingTable, Symbol, Trace};

const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Style { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, title: &str) -> String {
        self.paint(GREEN, &format!("==== {} ====", title))
    }
}

fn cell(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!(" {:<width$} ", text, width = width),
        Align::Center => format!(" {:^width$} ", text, width = width),
        Align::Right => format!(" {:>width$} ", text, width = width),
    }
}

fn rule(widths: &[usize], left: &str, middle: &str, right: &str) -> String {
    let segments: Vec<_> = widths.iter().map(|width| "─".repeat(width + 2)).collect();
    format!("{}{}{}", left, segments.join(middle), right)
}

/// Draws `rows` as a box table with `rows[0]` as the header. `align` gets (row, column).
pub fn box_table<R: AsRef<[String]>>(rows: &[R], style: &Style, align: impl Fn(usize, usize) -> Align) -> String {
    let columns = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }
    let mut widths = vec![0; columns];
    for row in rows {
        for (width, text) in widths.iter_mut().zip(row.as_ref()) {
            *width = (*width).max(text.chars().count());
        }
    }
    let line = |i: usize, row: &[String]| {
        let mut line = String::from("│");
        for (j, width) in widths.iter().enumerate() {
            let text = row.get(j).map_or("", String::as_str);
            line.push_str(&cell(text, *width, align(i, j)));
            line.push('│');
        }
        line
    };

    let mut lines = Vec::with_capacity(rows.len() + 3);
    let header = [
        rule(&widths, "┌", "┬", "┐"),
        line(0, rows[0].as_ref()),
        rule(&widths, "├", "┼", "┤"),
    ].join("\n");
    lines.push(style.paint(YELLOW, &header));
    for (i, row) in rows.iter().enumerate().skip(1) {
        lines.push(line(i, row.as_ref()));
    }
    lines.push(rule(&widths, "└", "┴", "┘"));
    lines.join("\n")
}

pub fn first_sets(first_set: &FirstSet) -> String {
    first_set.iter()
        .map(|(symbol, set)| {
            if set.is_empty() {
                format!("FIRST( {} ) = {{ }}", symbol)
            } else {
                let set: Vec<_> = set.iter().map(ToString::to_string).collect();
                format!("FIRST( {} ) = {{ {} }}", symbol, set.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn item_sets(automaton: &Automaton, style: &Style) -> String {
    automaton.states()
        .enumerate()
        .map(|(id, state)| format!("{}\n{}", style.paint(YELLOW, &format!("I{}:", id)), state))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn transitions(automaton: &Automaton) -> String {
    automaton.transitions()
        .iter()
        .enumerate()
        .filter(|(_, edges)| !edges.is_empty())
        .map(|(id, edges)| {
            let label = format!("I{}", id);
            let indent = " ".repeat(label.len());
            edges.iter()
                .enumerate()
                .map(|(i, (symbol, target))| {
                    let from = if i == 0 { label.as_str() } else { indent.as_str() };
                    format!("{} --- {} --> I{}", from, symbol, target)
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn parsing_table(table: &ParsingTable, style: &Style) -> String {
    let mut rows = Vec::with_capacity(table.state_count() + 1);
    rows.push(Some(String::new()).into_iter()
        .chain(table.columns().into_iter().map(ToString::to_string))
        .collect::<Vec<_>>());
    for state in 0..table.state_count() {
        let cells = table.row(state).unwrap_or_default();
        rows.push(Some(format!("I{}", state)).into_iter()
            .chain(cells.iter().skip(1).map(ToString::to_string))
            .collect());
    }
    box_table(&rows, style, |i, _| if i == 0 { Align::Center } else { Align::Left })
}

pub fn token_stream(symbols: &[Symbol]) -> String {
    symbols.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

pub fn trace(trace: &Trace, style: &Style) -> String {
    box_table(&trace.entries(), style, |i, j| match (i, j) {
        (0, _) => Align::Center,
        (_, 2) => Align::Right,
        _ => Align::Left,
    })
}

/// Everything known about the parser before any input is read.
pub fn report(parser: &LR1Parser, style: &Style) -> String {
    let automaton = parser.automaton();
    [
        (style.heading("Augmented Grammar"), parser.grammar().to_string()),
        (style.heading("FIRST Set"), first_sets(parser.grammar().first_set())),
        (style.heading("LR(1) Sets of Items"), item_sets(automaton, style)),
        (style.heading("LR(1) DFA"), transitions(automaton)),
        (style.heading("Parsing Table"), parsing_table(parser.table(), style)),
    ].iter()
        .map(|(heading, body)| format!("{}\n{}\n", heading, body))
        .collect::<Vec<_>>()
        .join("\n")
}
