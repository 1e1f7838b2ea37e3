use crate::config::Context;
use anyhow::{bail, Context as _, Result};
use clap::Args;
use colored::Colorize;
use flowcraft_common::Theme;
use flowcraft_editor::ZoomFactor;
use flowcraft_renderer::DiagramRenderer;
use flowcraft_validator::Validator;
use std::fs;
use std::path::PathBuf;

use super::validate::print_verdict;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Diagram file to render
    pub file: PathBuf,

    /// Theme (light, dark); defaults to the configured theme
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Display scale applied to the SVG (0.5 to 3.0)
    #[arg(short, long)]
    pub zoom: Option<f32>,
}

pub fn render(args: RenderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve(&args.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if source.trim().is_empty() {
        bail!("{} is empty", args.file.display());
    }

    let verdict = Validator::new().validate(&source);
    if !verdict.is_valid {
        print_verdict(&args.file, &verdict);
        bail!("Fix the syntax errors before rendering");
    }

    let theme = ctx.theme(args.theme);
    let artifact = DiagramRenderer::mermaid(theme).render(&source)?;

    let svg = match args.zoom.map(ZoomFactor::new) {
        Some(zoom) => artifact.scaled_svg(zoom.get()),
        None => artifact.svg().to_string(),
    };

    match args.out {
        Some(out) => {
            let out = ctx.resolve(&out);
            fs::write(&out, &svg)
                .with_context(|| format!("Failed to save file: {}", out.display()))?;
            eprintln!(
                "{} {} → {} ({} theme)",
                "✓".green(),
                args.file.display(),
                out.display(),
                theme
            );
        }
        None => println!("{}", svg),
    }

    Ok(())
}
