use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use crate::source::SourceView;

/// Warns when the first significant line does not name a diagram type
pub struct DiagramHeaderRule;

impl ValidationRule for DiagramHeaderRule {
    fn name(&self) -> &'static str {
        "diagram-header"
    }

    fn description(&self) -> &'static str {
        "The first line must declare a known diagram type"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        if source.header().is_some() && source.kind().is_none() {
            vec![Diagnostic::warning(
                self.name(),
                "Diagram type not clearly specified in first line",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_header_passes() {
        let view = SourceView::new("classDiagram\n  Animal <|-- Dog");
        assert!(DiagramHeaderRule.check(&view).is_empty());
    }

    #[test]
    fn test_unknown_header_warns() {
        let view = SourceView::new("A --> B");
        let diagnostics = DiagramHeaderRule.check(&view);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }
}
