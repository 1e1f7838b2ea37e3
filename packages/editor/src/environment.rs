//! # Editor environment
//!
//! Process-wide editing environment: the registered language definitions
//! the surface uses for highlighting and file association. Initialised once
//! on first use, shared by every surface, and torn down explicitly when the
//! last holder releases it (window close).
//!
//! ```text
//! EditingSurface::new ──► ENVIRONMENT.acquire() ──► init on first holder
//! EditingSurface drop ──► EnvironmentHandle drop ──► teardown on last holder
//! ```

use flowcraft_common::DIAGRAM_KEYWORDS;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Syntax description registered with the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinition {
    pub id: &'static str,
    pub extensions: Vec<&'static str>,
    pub line_comment: &'static str,
    /// Lowercased diagram header keywords
    pub keywords: Vec<&'static str>,
    pub arrows: Vec<&'static str>,
}

impl LanguageDefinition {
    pub fn mermaid() -> Self {
        Self {
            id: "mermaid",
            extensions: vec!["mmd", "mermaid"],
            line_comment: "%%",
            keywords: DIAGRAM_KEYWORDS.iter().map(|(keyword, _)| *keyword).collect(),
            arrows: vec!["-->", "---", "-.->", "==>", "->>", "-->>", "-x", "--x"],
        }
    }

    pub fn handles_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// `line` opens with a diagram header keyword
    pub fn is_header(&self, line: &str) -> bool {
        let lowered = line.trim().to_lowercase();
        !lowered.is_empty() && self.keywords.iter().any(|k| lowered.starts_with(k))
    }

    pub fn is_comment(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.line_comment)
    }
}

/// Shared editing environment
#[derive(Debug)]
pub struct EditorEnvironment {
    languages: HashMap<&'static str, LanguageDefinition>,
}

impl EditorEnvironment {
    fn initialise() -> Self {
        let mermaid = LanguageDefinition::mermaid();
        tracing::debug!("editor environment initialised ({} language)", mermaid.id);
        Self {
            languages: HashMap::from([(mermaid.id, mermaid)]),
        }
    }

    pub fn language(&self, id: &str) -> Option<&LanguageDefinition> {
        self.languages.get(id)
    }

    pub fn language_for_extension(&self, extension: &str) -> Option<&LanguageDefinition> {
        self.languages
            .values()
            .find(|language| language.handles_extension(extension))
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageDefinition> {
        self.languages.values()
    }
}

#[derive(Debug, Default)]
struct Slot {
    environment: Option<Arc<EditorEnvironment>>,
    holders: usize,
    initialisations: usize,
}

/// Init-once holder for an [`EditorEnvironment`]
#[derive(Debug)]
pub struct EnvironmentRegistry {
    slot: Mutex<Slot>,
}

/// The process-wide registry used by editing surfaces
pub static ENVIRONMENT: EnvironmentRegistry = EnvironmentRegistry::new();

impl EnvironmentRegistry {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                environment: None,
                holders: 0,
                initialisations: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a holder, initialising the environment if it is not live
    pub fn acquire(&self) -> EnvironmentHandle<'_> {
        let mut slot = self.lock();
        let environment = match &slot.environment {
            Some(environment) => Arc::clone(environment),
            None => {
                let environment = Arc::new(EditorEnvironment::initialise());
                slot.environment = Some(Arc::clone(&environment));
                slot.initialisations += 1;
                environment
            }
        };
        slot.holders += 1;

        EnvironmentHandle {
            registry: self,
            environment,
        }
    }

    /// The live environment, if any holder exists
    pub fn current(&self) -> Option<Arc<EditorEnvironment>> {
        self.lock().environment.clone()
    }

    pub fn holders(&self) -> usize {
        self.lock().holders
    }

    /// How many times the environment has been built
    pub fn initialisations(&self) -> usize {
        self.lock().initialisations
    }

    fn release(&self) {
        let mut slot = self.lock();
        slot.holders = slot.holders.saturating_sub(1);
        if slot.holders == 0 && slot.environment.take().is_some() {
            tracing::debug!("editor environment torn down");
        }
    }
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the environment alive; releasing the last one tears it down
#[derive(Debug)]
pub struct EnvironmentHandle<'a> {
    registry: &'a EnvironmentRegistry,
    environment: Arc<EditorEnvironment>,
}

impl EnvironmentHandle<'_> {
    pub fn environment(&self) -> &EditorEnvironment {
        &self.environment
    }

    /// Explicit teardown; same as dropping the handle
    pub fn release(self) {}
}

impl Drop for EnvironmentHandle<'_> {
    fn drop(&mut self) {
        self.registry.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialised_once_while_held() {
        let registry = EnvironmentRegistry::new();
        assert!(registry.current().is_none());

        let first = registry.acquire();
        let second = registry.acquire();
        assert_eq!(registry.initialisations(), 1);
        assert_eq!(registry.holders(), 2);
        assert!(std::ptr::eq(first.environment(), second.environment()));

        drop(first);
        assert!(registry.current().is_some());

        second.release();
        assert!(registry.current().is_none());
        assert_eq!(registry.holders(), 0);
    }

    #[test]
    fn test_reinitialised_after_teardown() {
        let registry = EnvironmentRegistry::new();
        registry.acquire().release();
        let _handle = registry.acquire();
        assert_eq!(registry.initialisations(), 2);
    }

    #[test]
    fn test_mermaid_language() {
        let registry = EnvironmentRegistry::new();
        let handle = registry.acquire();
        let environment = handle.environment();

        let mermaid = environment.language("mermaid").unwrap();
        assert!(mermaid.is_header("sequenceDiagram"));
        assert!(mermaid.is_header("graph TD"));
        assert!(mermaid.is_header("stateDiagram-v2"));
        assert!(!mermaid.is_header("A --> B"));
        assert!(mermaid.is_comment("  %% note"));
        assert_eq!(environment.language_for_extension("MMD").map(|l| l.id), Some("mermaid"));
        assert!(environment.language_for_extension("png").is_none());
    }
}
