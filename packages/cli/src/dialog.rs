use colored::Colorize;
use flowcraft_workspace::{FileDialog, FileFilter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Terminal file dialog: asks for a path on stdin, an empty answer cancels
pub struct PromptDialog {
    input: Mutex<Box<dyn BufRead + Send>>,
    base: PathBuf,
}

impl PromptDialog {
    pub fn stdin(base: impl Into<PathBuf>) -> Self {
        Self::with_input(Box::new(io::BufReader::new(io::stdin())), base)
    }

    pub fn with_input(input: Box<dyn BufRead + Send>, base: impl Into<PathBuf>) -> Self {
        Self {
            input: Mutex::new(input),
            base: base.into(),
        }
    }

    fn ask(&self, verb: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        eprint!("{} {} ({}): ", "?".cyan().bold(), verb, describe(filters));
        let _ = io::stderr().flush();

        let mut answer = String::new();
        let mut input = self.input.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match input.read_line(&mut answer) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("could not read answer: {}", e);
                return None;
            }
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        Some(self.base.join(answer))
    }
}

impl FileDialog for PromptDialog {
    fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask("Open", filters)
    }

    fn save_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask("Save as", filters)
    }
}

fn describe(filters: &[FileFilter]) -> String {
    filters
        .iter()
        .map(|filter| {
            let patterns: Vec<String> = filter.extensions.iter().map(|e| format!("*.{}", e)).collect();
            format!("{}: {}", filter.name, patterns.join(" "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
