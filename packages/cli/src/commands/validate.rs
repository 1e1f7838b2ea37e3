use crate::config::Context;
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use flowcraft_common::ValidationResult;
use flowcraft_validator::Validator;
use std::fs;
use std::path::{Path, PathBuf};

use crate::shell::StatusBadge;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Diagram file to check
    pub file: PathBuf,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn validate(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve(&args.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let result = Validator::new().validate(&source);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_verdict(&args.file, &result);
    }

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

pub fn print_verdict(file: &Path, result: &ValidationResult) {
    if let Some(badge) = StatusBadge::from_validation(Some(result)) {
        println!("{} {}", file.display(), paint_badge(badge));
    }

    for error in &result.errors {
        println!("  {} {}", "error".red().bold(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "warning".yellow().bold(), warning);
    }
}

pub fn paint_badge(badge: StatusBadge) -> colored::ColoredString {
    let text = badge.to_string();
    match badge {
        StatusBadge::Valid => text.green().bold(),
        StatusBadge::Warnings(_) => text.yellow().bold(),
        StatusBadge::Errors(_) => text.red().bold(),
    }
}
