use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use crate::source::{strip_quoted, SourceView};
use flowcraft_common::DiagramKind;

const OPENERS: [char; 3] = ['[', '(', '{'];
const CLOSERS: [char; 3] = [']', ')', '}'];

/// Opens an asymmetric flowchart node, `A>flag]`
const FLAG: char = '>';

fn closer_for(open: char) -> char {
    match open {
        '[' | FLAG => ']',
        '(' => ')',
        _ => '}',
    }
}

fn is_opener(c: char) -> bool {
    OPENERS.contains(&c) || c == FLAG
}

/// ER cardinality markers such as `||--o{` or `}|..|{`
fn is_relationship(token: &str) -> bool {
    (token.contains("--") || token.contains(".."))
        && token.chars().all(|c| matches!(c, '|' | 'o' | '{' | '}' | '-' | '.'))
}

/// The bracket characters of one line that count towards balance.
///
/// Quoted labels are ignored. Message text after `:` is free-form in
/// sequence, state and ER diagrams, and ER relationship tokens carry braces
/// that are not brackets. In flowcharts a `>` right after a node id opens a
/// flag shape closed by `]`.
fn bracket_chars(line: &str, kind: Option<DiagramKind>) -> Vec<char> {
    let bare = strip_quoted(line);
    let mut text = bare.as_str();

    if matches!(
        kind,
        Some(DiagramKind::Sequence | DiagramKind::State | DiagramKind::EntityRelationship)
    ) {
        if let Some(colon) = text.find(':') {
            text = &text[..colon];
        }
    }

    let tokens: Vec<&str> = if kind == Some(DiagramKind::EntityRelationship) {
        text.split_whitespace().filter(|t| !is_relationship(t)).collect()
    } else {
        vec![text]
    };

    let flags = kind == Some(DiagramKind::Flowchart);
    let mut chars = Vec::new();
    for token in tokens {
        let mut depth = 0usize;
        let mut previous = None;
        for c in token.chars() {
            let flag_open = flags
                && c == FLAG
                && depth == 0
                && previous.is_some_and(|p: char| p.is_alphanumeric() || p == '_');
            if OPENERS.contains(&c) || flag_open {
                depth += 1;
                chars.push(c);
            } else if CLOSERS.contains(&c) {
                depth = depth.saturating_sub(1);
                chars.push(c);
            }
            previous = Some(c);
        }
    }
    chars
}

/// Warns about lines whose bracket counts differ.
///
/// Multi-line blocks (class bodies, subgraphs) trip this on purpose; it is
/// only a hint, the document-wide check decides validity.
pub struct LineBracketRule;

impl ValidationRule for LineBracketRule {
    fn name(&self) -> &'static str {
        "line-brackets"
    }

    fn description(&self) -> &'static str {
        "Each line should open and close the same number of brackets"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (number, line) in source.significant() {
            let brackets = bracket_chars(line, source.kind());
            let opened = brackets.iter().filter(|c| is_opener(**c)).count();
            let closed = brackets.len() - opened;

            if opened != closed {
                diagnostics.push(
                    Diagnostic::warning(self.name(), "Potentially unmatched brackets")
                        .at_line(number),
                );
            }
        }

        diagnostics
    }
}

/// Errors on brackets that never close, close the wrong opener, or close
/// nothing at all, tracked across the whole document.
pub struct BracketBalanceRule;

impl ValidationRule for BracketBalanceRule {
    fn name(&self) -> &'static str {
        "bracket-balance"
    }

    fn description(&self) -> &'static str {
        "Brackets must be balanced across the document"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut stack: Vec<(char, usize)> = Vec::new();

        for (number, line) in source.significant() {
            for c in bracket_chars(line, source.kind()) {
                if is_opener(c) {
                    stack.push((c, number));
                } else {
                    match stack.pop() {
                        Some((open, _)) if closer_for(open) == c => {}
                        Some((open, opened_at)) => diagnostics.push(
                            Diagnostic::error(
                                self.name(),
                                format!(
                                    "Mismatched '{}' closes '{}' opened on line {}",
                                    c, open, opened_at
                                ),
                            )
                            .at_line(number),
                        ),
                        None => diagnostics.push(
                            Diagnostic::error(self.name(), format!("Unexpected closing '{}'", c))
                                .at_line(number),
                        ),
                    }
                }
            }
        }

        for (open, opened_at) in stack {
            diagnostics.push(
                Diagnostic::error(self.name(), format!("Unclosed '{}'", open)).at_line(opened_at),
            );
        }

        diagnostics
    }
}
