use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use crate::source::SourceView;
use flowcraft_common::ValidationResult;
use std::panic::{self, AssertUnwindSafe};

/// Message reported when a rule blows up instead of returning diagnostics
pub const INTERNAL_FAILURE_MESSAGE: &str = "Validation failed due to an internal error";

/// Runs every registered rule over a description.
///
/// Stateless between calls: the same input always yields the same verdict.
#[derive(Debug, Default)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Collect diagnostics from all rules, ordered by line.
    ///
    /// Document-level findings (no line) come first.
    pub fn diagnostics(&self, content: &str) -> Vec<Diagnostic> {
        let view = SourceView::new(content);
        let mut diagnostics: Vec<Diagnostic> = self
            .registry
            .rules()
            .iter()
            .flat_map(|rule| rule.check(&view))
            .collect();

        diagnostics.sort_by_key(|d| d.line.unwrap_or(0));
        diagnostics
    }

    /// Validate a description. Never panics and never fails: a broken rule
    /// turns into a single generic error entry.
    pub fn validate(&self, content: &str) -> ValidationResult {
        if SourceView::new(content).is_blank() {
            return ValidationResult::valid().with_warning("Empty diagram");
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.diagnostics(content))) {
            Ok(diagnostics) => fold(diagnostics),
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                tracing::error!("validation rule panicked: {}", detail);
                ValidationResult::internal_failure(INTERNAL_FAILURE_MESSAGE)
            }
        }
    }
}

fn fold(diagnostics: Vec<Diagnostic>) -> ValidationResult {
    let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics.into_iter().partition(|d| d.is_error());

    ValidationResult::from_messages(
        errors.iter().map(ToString::to_string).collect(),
        warnings.iter().map(ToString::to_string).collect(),
    )
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Validate with the built-in rule set
pub fn validate_mermaid_syntax(content: &str) -> ValidationResult {
    Validator::new().validate(content)
}
