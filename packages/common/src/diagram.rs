use serde::{Deserialize, Serialize};

/// Diagram families recognised by the header keyword on the first
/// significant line of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Journey,
    Gantt,
    Pie,
    GitGraph,
    Mindmap,
    Timeline,
    ZenUml,
    Sankey,
}

/// Header keywords, lowercased, paired with the kind they introduce.
/// `graph` is the legacy spelling of `flowchart`.
pub const DIAGRAM_KEYWORDS: &[(&str, DiagramKind)] = &[
    ("graph", DiagramKind::Flowchart),
    ("flowchart", DiagramKind::Flowchart),
    ("sequencediagram", DiagramKind::Sequence),
    ("classdiagram", DiagramKind::Class),
    ("statediagram", DiagramKind::State),
    ("erdiagram", DiagramKind::EntityRelationship),
    ("journey", DiagramKind::Journey),
    ("gantt", DiagramKind::Gantt),
    ("pie", DiagramKind::Pie),
    ("gitgraph", DiagramKind::GitGraph),
    ("mindmap", DiagramKind::Mindmap),
    ("timeline", DiagramKind::Timeline),
    ("zenuml", DiagramKind::ZenUml),
    ("sankey", DiagramKind::Sankey),
];

impl DiagramKind {
    /// Detect the diagram kind from a full description.
    pub fn detect(source: &str) -> Option<Self> {
        header_line(source).and_then(|(_, line)| Self::from_header(line))
    }

    /// Match a single header line against the known keywords
    pub fn from_header(line: &str) -> Option<Self> {
        let lowered = line.trim().to_lowercase();
        DIAGRAM_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.starts_with(keyword))
            .map(|(_, kind)| *kind)
    }

    pub fn label(self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "Flowchart",
            DiagramKind::Sequence => "Sequence",
            DiagramKind::Class => "Class",
            DiagramKind::State => "State",
            DiagramKind::EntityRelationship => "Entity Relationship",
            DiagramKind::Journey => "Journey",
            DiagramKind::Gantt => "Gantt",
            DiagramKind::Pie => "Pie",
            DiagramKind::GitGraph => "Git Graph",
            DiagramKind::Mindmap => "Mindmap",
            DiagramKind::Timeline => "Timeline",
            DiagramKind::ZenUml => "ZenUML",
            DiagramKind::Sankey => "Sankey",
        }
    }
}

/// Locate the header line: the first line that is not blank, not a `%%`
/// comment and not inside a `---` front-matter block.
///
/// Returns the zero-based line index together with the line.
pub fn header_line(source: &str) -> Option<(usize, &str)> {
    let mut in_front_matter = false;

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed == "---" {
            in_front_matter = !in_front_matter;
            continue;
        }
        if in_front_matter || trimmed.is_empty() || trimmed.starts_with("%%") {
            continue;
        }
        return Some((index, line));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_common_kinds() {
        assert_eq!(DiagramKind::detect("graph TD\n A-->B"), Some(DiagramKind::Flowchart));
        assert_eq!(DiagramKind::detect("sequenceDiagram\n A->>B: hi"), Some(DiagramKind::Sequence));
        assert_eq!(DiagramKind::detect("stateDiagram-v2\n [*] --> A"), Some(DiagramKind::State));
        assert_eq!(DiagramKind::detect("pie title Pets"), Some(DiagramKind::Pie));
        assert_eq!(DiagramKind::detect("A --> B"), None);
    }

    #[test]
    fn test_header_skips_comments_and_front_matter() {
        let source = "---\ntitle: Demo\n---\n%% a comment\n\nflowchart LR\n A --> B";
        assert_eq!(header_line(source), Some((5, "flowchart LR")));
        assert_eq!(DiagramKind::detect(source), Some(DiagramKind::Flowchart));
    }

    #[test]
    fn test_empty_source_has_no_header() {
        assert_eq!(header_line(""), None);
        assert_eq!(header_line("   \n\n"), None);
    }
}
