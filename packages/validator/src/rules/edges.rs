use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use crate::source::SourceView;
use flowcraft_common::DiagramKind;
use regex::Regex;
use std::sync::LazyLock;

/// Flowchart edge operators: dotted, thick, plain arrow, open link
const EDGE: &str = r"(?:-\.+->|={2,}>|-{2,}>|-{3,})";

static EDGE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EDGE).expect("edge pattern is valid"));

static EDGE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[^|]*\|").expect("label pattern is valid"));

static TRAILING_EDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\s*(?:\|[^|]*\|)?\s*;?\s*$", EDGE)).expect("trailing pattern is valid")
});

static LEADING_EDGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*{}", EDGE)).expect("leading pattern is valid"));

fn is_flowchart(source: &SourceView<'_>) -> bool {
    source.kind() == Some(DiagramKind::Flowchart)
}

/// Drop the heads of bidirectional or circle/cross edges (`A <--> B`,
/// `A o---o B`) left attached to a segment by the split. `x` and `o` only
/// count when they touch the operator and are apart from the node id.
fn strip_edge_heads(segment: &str) -> &str {
    let mut rest = segment;
    if let Some(head) = rest.strip_suffix('<') {
        rest = head;
    } else if let Some(head) = rest.strip_suffix(['x', 'o']) {
        if head.ends_with(char::is_whitespace) {
            rest = head;
        }
    }
    if let Some(tail) = rest.strip_prefix(['x', 'o']) {
        if tail.starts_with(char::is_whitespace) {
            rest = tail;
        }
    }
    rest
}

/// Extract the node identifier from one side of an edge, dropping
/// edge labels, shapes, class shorthands and inline `-- text` labels.
fn node_ids(segment: &str) -> Vec<String> {
    let mut rest = strip_edge_heads(segment).trim().trim_end_matches(';').trim();
    if let Some(m) = EDGE_LABEL.find(rest) {
        rest = rest[m.end()..].trim();
    }
    if let Some(index) = rest.find(" -- ") {
        rest = &rest[..index];
    }

    rest.split('&')
        .map(|part| {
            let part = part.trim();
            let end = part
                .find(|c: char| matches!(c, '[' | '(' | '{' | '>' | '@'))
                .unwrap_or(part.len());
            let id = &part[..end];
            let id = id.split(":::").next().unwrap_or(id);
            id.trim().to_string()
        })
        .filter(|id| !id.is_empty())
        .collect()
}

/// Warns about flowchart node IDs that contain whitespace
pub struct NodeIdSpacesRule;

impl ValidationRule for NodeIdSpacesRule {
    fn name(&self) -> &'static str {
        "node-id-spaces"
    }

    fn description(&self) -> &'static str {
        "Node IDs on either side of an edge should not contain spaces"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        if !is_flowchart(source) {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (number, line) in source.body() {
            if !EDGE_SPLIT.is_match(line) {
                continue;
            }
            for segment in EDGE_SPLIT.split(line) {
                for id in node_ids(segment) {
                    if id.contains(char::is_whitespace) {
                        diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!("Node ID '{}' contains spaces", id),
                            )
                            .at_line(number),
                        );
                    }
                }
            }
        }

        diagnostics
    }
}

/// Errors on flowchart edges without a source or target node
pub struct DanglingEdgeRule;

impl ValidationRule for DanglingEdgeRule {
    fn name(&self) -> &'static str {
        "dangling-edge"
    }

    fn description(&self) -> &'static str {
        "Every edge needs a node on both ends"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        if !is_flowchart(source) {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (number, line) in source.body() {
            if LEADING_EDGE.is_match(line) {
                diagnostics.push(
                    Diagnostic::error(self.name(), "Edge is missing a source node").at_line(number),
                );
            }
            if TRAILING_EDGE.is_match(line) {
                diagnostics.push(
                    Diagnostic::error(self.name(), "Edge is missing a target node").at_line(number),
                );
            }
        }

        diagnostics
    }
}
