use crate::config::Context;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use flowcraft_common::RecentFileEntry;
use flowcraft_workspace::NoDialog;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct RecentArgs {
    #[command(subcommand)]
    pub command: Option<RecentCommand>,
}

#[derive(Debug, Subcommand)]
pub enum RecentCommand {
    /// Show recently opened files, most recent first
    List,

    /// Forget all recent files
    Clear,
}

pub fn recent(args: RecentArgs, ctx: &Context) -> Result<()> {
    let workspace = ctx.workspace(Arc::new(NoDialog))?;

    match args.command.unwrap_or(RecentCommand::List) {
        RecentCommand::List => print_recent(&workspace.files.recent_files()),
        RecentCommand::Clear => {
            workspace.files.clear_recent_files()?;
            println!("{} Recent files cleared", "✓".green());
        }
    }

    Ok(())
}

pub fn print_recent(entries: &[RecentFileEntry]) {
    if entries.is_empty() {
        println!("{}", "No recent files".dimmed());
        return;
    }

    for entry in entries {
        println!(
            "  {:<24} {}  {}",
            entry.name.bright_white(),
            entry.last_opened.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            entry.path
        );
    }
}
