use flowcraft_common::{header_line, DiagramKind};

/// Pre-split view of a diagram description shared by all rules
#[derive(Debug)]
pub struct SourceView<'a> {
    lines: Vec<&'a str>,
    skipped: Vec<bool>,
    header: Option<usize>,
    kind: Option<DiagramKind>,
}

impl<'a> SourceView<'a> {
    pub fn new(source: &'a str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let mut skipped = vec![false; lines.len()];

        let mut in_front_matter = false;
        for (index, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed == "---" {
                in_front_matter = !in_front_matter;
                skipped[index] = true;
            } else if in_front_matter || trimmed.is_empty() || trimmed.starts_with("%%") {
                skipped[index] = true;
            }
        }

        let header = header_line(source).map(|(index, _)| index);
        let kind = header.and_then(|index| DiagramKind::from_header(lines[index]));

        Self {
            lines,
            skipped,
            header,
            kind,
        }
    }

    /// True when there is nothing but whitespace, comments or front matter
    pub fn is_blank(&self) -> bool {
        self.header.is_none()
    }

    pub fn kind(&self) -> Option<DiagramKind> {
        self.kind
    }

    /// The header line, if any, with its one-based line number
    pub fn header(&self) -> Option<(usize, &'a str)> {
        self.header.map(|index| (index + 1, self.lines[index]))
    }

    /// Content lines after the header, as `(one-based line number, line)`.
    ///
    /// Blank lines, `%%` comments and front matter are excluded.
    pub fn body(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        let start = self.header.map(|index| index + 1).unwrap_or(self.lines.len());
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .filter(move |(index, _)| !self.skipped[*index])
            .map(|(index, line)| (index + 1, *line))
    }

    /// Header plus body, i.e. every significant line
    pub fn significant(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.header().into_iter().chain(self.body())
    }
}

/// Strip the contents of double-quoted strings, keeping the quotes.
///
/// Brackets inside labels such as `A["(draft)"]` must not count towards
/// bracket balance.
pub(crate) fn strip_quoted(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            out.push(c);
        } else if !in_quotes {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_skips_noise() {
        let view = SourceView::new("%% intro\ngraph TD\n\n  A --> B\n  %% note\n  B --> C");
        assert_eq!(view.header(), Some((2, "graph TD")));
        let body: Vec<_> = view.body().collect();
        assert_eq!(body, vec![(4, "  A --> B"), (6, "  B --> C")]);
        assert_eq!(view.kind(), Some(DiagramKind::Flowchart));
    }

    #[test]
    fn test_blank_view() {
        assert!(SourceView::new("").is_blank());
        assert!(SourceView::new("  \n%% only a comment").is_blank());
    }

    #[test]
    fn test_strip_quoted() {
        assert_eq!(strip_quoted(r#"A["(draft)"] --> B"#), r#"A[""] --> B"#);
    }
}
