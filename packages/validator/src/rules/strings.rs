use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use crate::source::SourceView;

/// Reports lines with an odd number of double quotes
pub struct UnterminatedStringRule;

impl ValidationRule for UnterminatedStringRule {
    fn name(&self) -> &'static str {
        "unterminated-string"
    }

    fn description(&self) -> &'static str {
        "Quoted labels must be closed on the line they start"
    }

    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic> {
        source
            .significant()
            .filter(|(_, line)| line.matches('"').count() % 2 == 1)
            .map(|(number, _)| {
                Diagnostic::error(self.name(), "Unterminated string").at_line(number)
            })
            .collect()
    }
}
