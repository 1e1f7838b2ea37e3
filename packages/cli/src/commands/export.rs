use crate::config::Context;
use crate::dialog::PromptDialog;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use flowcraft_common::Theme;
use flowcraft_renderer::DiagramRenderer;
use flowcraft_validator::Validator;
use std::path::PathBuf;
use std::sync::Arc;

use super::validate::print_verdict;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Diagram file to export
    pub file: PathBuf,

    /// Output format (png, svg, pdf)
    #[arg(short, long)]
    pub format: String,

    /// Output path; asked for when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Theme (light, dark); defaults to the configured theme
    #[arg(short, long)]
    pub theme: Option<Theme>,
}

pub fn export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let workspace = ctx.workspace(Arc::new(PromptDialog::stdin(&ctx.cwd)))?;
    let file = workspace.files.load_file(Some(&ctx.resolve(&args.file)))?;

    let theme = ctx.theme(args.theme);
    let artifact = if file.content.trim().is_empty() {
        None
    } else {
        let verdict = Validator::new().validate(&file.content);
        if !verdict.is_valid {
            print_verdict(&args.file, &verdict);
            bail!("Fix the syntax errors before exporting");
        }
        Some(DiagramRenderer::mermaid(theme).render(&file.content)?)
    };

    let out = args.out.map(|out| ctx.resolve(&out));
    let written = workspace.export(artifact.as_ref(), &args.format, out)?;

    println!(
        "{} Exported {} → {}",
        "✓".green(),
        args.file.display(),
        written.display()
    );
    Ok(())
}
