use crate::config::Context;
use crate::dialog::PromptDialog;
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use flowcraft_workspace::TemplateCatalog;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: Option<TemplatesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List templates by category
    List,

    /// Print a template's content
    Show {
        /// Template id, e.g. flowchart-basic
        id: String,
    },

    /// Start a new diagram file from a template
    New {
        /// Template id
        id: String,

        /// Where to write the diagram; asked for when omitted
        path: Option<PathBuf>,
    },
}

pub fn templates(args: TemplatesArgs, ctx: &Context) -> Result<()> {
    let catalog = TemplateCatalog::builtin();

    match args.command.unwrap_or(TemplatesCommand::List) {
        TemplatesCommand::List => print_catalog(&catalog),
        TemplatesCommand::Show { id } => {
            let template = lookup(&catalog, &id)?;
            println!("{}", template.content);
        }
        TemplatesCommand::New { id, path } => {
            let template = lookup(&catalog, &id)?;
            let workspace = ctx.workspace(Arc::new(PromptDialog::stdin(&ctx.cwd)))?;
            let path = path.map(|p| ctx.resolve(&p));
            let written = workspace.files.save_file(&template.content, path.as_deref())?;
            println!(
                "{} Created {} from {}",
                "✓".green(),
                written.display(),
                template.name.bright_white()
            );
        }
    }

    Ok(())
}

fn lookup<'a>(catalog: &'a TemplateCatalog, id: &str) -> Result<&'a flowcraft_common::Template> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow!("Unknown template: {}", id))
}

pub fn print_catalog(catalog: &TemplateCatalog) {
    for (category, templates) in catalog.by_category() {
        println!("{}", category.bright_blue().bold());
        for template in templates {
            println!(
                "  {:<18} {}",
                template.id.cyan(),
                template.description.dimmed()
            );
        }
    }
}
