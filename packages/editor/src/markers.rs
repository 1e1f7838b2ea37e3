//! Validator output as line decorations for the editing surface.

use flowcraft_common::ValidationResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSeverity {
    Error,
    Warning,
}

/// A message pinned to a 1-based line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub line: usize,
    pub severity: MarkerSeverity,
    pub message: String,
}

/// Split a `Line N: message` entry. Entries without the prefix return `None`
/// for the line and the whole text as the message.
pub fn parse_line_prefix(entry: &str) -> (Option<usize>, &str) {
    let Some(rest) = entry.strip_prefix("Line ") else {
        return (None, entry);
    };
    let Some((number, message)) = rest.split_once(':') else {
        return (None, entry);
    };
    match number.trim().parse::<usize>() {
        Ok(line) if line > 0 => (Some(line), message.trim_start()),
        _ => (None, entry),
    }
}

/// Build markers for a verdict. Unlocated messages go on line 1; lines past
/// the end of the document are clamped to the last line.
pub fn markers_for(result: &ValidationResult, line_count: usize) -> Vec<Marker> {
    let last_line = line_count.max(1);
    let tagged = result
        .errors
        .iter()
        .map(|e| (MarkerSeverity::Error, e))
        .chain(result.warnings.iter().map(|w| (MarkerSeverity::Warning, w)));

    let mut markers: Vec<Marker> = tagged
        .map(|(severity, entry)| {
            let (line, message) = parse_line_prefix(entry);
            Marker {
                line: line.unwrap_or(1).min(last_line),
                severity,
                message: message.to_string(),
            }
        })
        .collect();

    markers.sort_by_key(|m| (m.line, m.severity != MarkerSeverity::Error));
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_prefix() {
        assert_eq!(
            parse_line_prefix("Line 3: Unterminated string"),
            (Some(3), "Unterminated string")
        );
        assert_eq!(parse_line_prefix("Empty diagram"), (None, "Empty diagram"));
        assert_eq!(parse_line_prefix("Line x: nope"), (None, "Line x: nope"));
        assert_eq!(parse_line_prefix("Line 0: nope"), (None, "Line 0: nope"));
    }

    #[test]
    fn test_markers_sorted_errors_first() {
        let result = ValidationResult::from_messages(
            vec!["Line 4: Unclosed '['".to_string()],
            vec![
                "Diagram type not clearly specified in first line".to_string(),
                "Line 4: Potentially unmatched brackets".to_string(),
            ],
        );

        let markers = markers_for(&result, 5);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].line, 1);
        assert_eq!(markers[0].severity, MarkerSeverity::Warning);
        assert_eq!(markers[1].line, 4);
        assert_eq!(markers[1].severity, MarkerSeverity::Error);
        assert_eq!(markers[1].message, "Unclosed '['");
        assert_eq!(markers[2].severity, MarkerSeverity::Warning);
    }

    #[test]
    fn test_lines_are_clamped() {
        let result = ValidationResult::from_messages(vec!["Line 9: Unclosed '('".to_string()], vec![]);
        assert_eq!(markers_for(&result, 2)[0].line, 2);
    }
}
