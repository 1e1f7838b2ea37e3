//! # Flowcraft Validator
//!
//! Fast, forgiving syntax checks for diagram descriptions.
//!
//! The validator never fails on malformed input: every rule reports
//! [`Diagnostic`]s, and the collected diagnostics are folded into a
//! [`ValidationResult`](flowcraft_common::ValidationResult). A rule that
//! panics is contained and reported as a single generic error entry.
//!
//! ```rust,ignore
//! use flowcraft_validator::validate_mermaid_syntax;
//!
//! let verdict = validate_mermaid_syntax("graph TD\n  A --> B");
//! assert!(verdict.is_valid);
//! ```

mod diagnostic;
mod errors;
mod rules;
mod source;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use errors::ValidatorError;
pub use rules::{RuleRegistry, ValidationRule};
pub use source::SourceView;
pub use validator::{validate_mermaid_syntax, Validator, INTERNAL_FAILURE_MESSAGE};
