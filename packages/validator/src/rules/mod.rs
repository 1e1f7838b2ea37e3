mod brackets;
mod edges;
mod header;
mod strings;

pub use brackets::{BracketBalanceRule, LineBracketRule};
pub use edges::{DanglingEdgeRule, NodeIdSpacesRule};
pub use header::DiagramHeaderRule;
pub use strings::UnterminatedStringRule;

use crate::diagnostic::Diagnostic;
use crate::source::SourceView;

/// Trait for implementing validation rules
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Inspect the whole description
    fn check(&self, source: &SourceView<'_>) -> Vec<Diagnostic>;
}

/// Registry of all active validation rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DiagramHeaderRule),
                Box::new(LineBracketRule),
                Box::new(BracketBalanceRule),
                Box::new(UnterminatedStringRule),
                Box::new(NodeIdSpacesRule),
                Box::new(DanglingEdgeRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_builtin_rules() {
        let registry = RuleRegistry::default();
        let names: Vec<_> = registry.rules().iter().map(|r| r.name()).collect();
        assert!(names.contains(&"diagram-header"));
        assert!(names.contains(&"bracket-balance"));
        assert!(names.contains(&"dangling-edge"));
    }

    #[test]
    fn test_empty_registry() {
        assert!(RuleRegistry::empty().rules().is_empty());
    }
}
