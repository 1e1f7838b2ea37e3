mod commands;
mod config;
mod dialog;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, export, recent, render, templates, validate, EditArgs, ExportArgs, RecentArgs,
    RenderArgs, TemplatesArgs, ValidateArgs,
};
use config::Context;
use tracing_subscriber::EnvFilter;

/// Flowcraft Studio - live diagram authoring in the terminal
#[derive(Parser, Debug)]
#[command(name = "flowcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log controller and I/O activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit a diagram with a live preview
    Edit(EditArgs),

    /// Check a diagram's syntax
    Validate(ValidateArgs),

    /// Render a diagram to SVG
    Render(RenderArgs),

    /// Export a diagram as png, svg or pdf
    Export(ExportArgs),

    /// Browse the template catalog
    Templates(TemplatesArgs),

    /// Show or clear recently opened files
    Recent(RecentArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::load(&cwd)?;

    match cli.command {
        Command::Edit(args) => edit(args, &ctx).await,
        Command::Validate(args) => validate(args, &ctx),
        Command::Render(args) => render(args, &ctx),
        Command::Export(args) => export(args, &ctx),
        Command::Templates(args) => templates(args, &ctx),
        Command::Recent(args) => recent(args, &ctx),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
