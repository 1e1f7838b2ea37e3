use crate::commands::recent::print_recent;
use crate::commands::templates::print_catalog;
use crate::commands::validate::paint_badge;
use crate::config::Context;
use crate::shell::{
    NotificationKind, Notifications, PanelKey, PreviewPanel, ShellCommand, StatusBadge, Tab,
};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use flowcraft_common::Theme;
use flowcraft_editor::{ControllerHandle, EditingSurface, MarkerSeverity, Snapshot};
use flowcraft_renderer::DiagramRenderer;
use flowcraft_validator::Validator;
use flowcraft_workspace::{FileWatcher, NoDialog, Workspace};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Diagram file to edit; created on first save if missing
    pub file: PathBuf,

    /// Theme (light, dark); defaults to the configured theme
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Start from a template instead of the file's content
    #[arg(long)]
    pub template: Option<String>,

    /// Write the displayed diagram here (overrides `previewPath`)
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Do not reload the file when it changes on disk
    #[arg(long)]
    pub no_watch: bool,
}

/// Interactive session: stdin is the editing surface and command line,
/// the preview is written to a file.
pub async fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let session = Session::open(args, ctx)?;
    session.run().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    ctx: Context,
    workspace: Workspace,
    controller: Arc<ControllerHandle>,
    surface: EditingSurface,
    watcher: Option<FileWatcher>,
    watch: bool,
    preview_path: Option<PathBuf>,
    theme: Theme,
    tab: Tab,
    notifications: Notifications,
    panel: Option<PanelKey>,
    badge: Option<StatusBadge>,
    quit_armed: bool,
}

impl Session {
    fn open(args: EditArgs, ctx: &Context) -> Result<Self> {
        let path = ctx.resolve(&args.file);
        let workspace = ctx.workspace(Arc::new(NoDialog))?;

        let template = match &args.template {
            Some(id) => Some(
                workspace
                    .templates
                    .get(id)
                    .ok_or_else(|| anyhow!("Unknown template: {}", id))?
                    .content
                    .clone(),
            ),
            None => None,
        };
        let content = if template.is_none() && path.exists() {
            workspace.files.load_file(Some(&path))?.content
        } else {
            String::new()
        };

        let theme = ctx.theme(args.theme);
        let controller = Arc::new(ControllerHandle::spawn(
            ctx.config.controller_config().with_theme(theme),
            Arc::new(Validator::new()),
            Arc::new(DiagramRenderer::mermaid(theme)),
        ));

        let mut surface = EditingSurface::new().with_sink(controller.clone());
        surface.load(&content, Some(path.clone()))?;
        if let Some(template) = template {
            surface.set_value(&template)?;
        }

        let preview_path = args
            .preview
            .or_else(|| ctx.config.preview_path.clone())
            .map(|p| ctx.resolve(&p));

        let mut session = Self {
            ctx: ctx.clone(),
            workspace,
            controller,
            surface,
            watcher: None,
            watch: !args.no_watch,
            preview_path,
            theme,
            tab: Tab::Editor,
            notifications: Notifications::default(),
            panel: None,
            badge: None,
            quit_armed: false,
        };
        session.watch_file(&path);
        Ok(session)
    }

    async fn run(mut self) -> Result<()> {
        let mut snapshots = self.controller.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.print_banner();

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                },
                Some(content) = next_external(&mut self.watcher) => self.reload(&content),
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = snapshots.borrow_and_update().clone();
                    self.present(&snapshot);
                }
            }
        }

        self.close().await;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if !line.trim_start().starts_with(':') {
            self.append(line);
            return Flow::Continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(command) => match self.execute(command) {
                Ok(flow) => flow,
                Err(e) => {
                    self.notify(NotificationKind::Error, e.to_string());
                    Flow::Continue
                }
            },
            Err(e) => {
                println!("{} {}", "?".yellow(), e);
                Flow::Continue
            }
        }
    }

    /// Typed text goes through the surface as a user edit
    fn append(&mut self, line: &str) {
        let at = self.surface.value().len();
        let text = if at == 0 {
            line.to_string()
        } else {
            format!("\n{}", line)
        };
        if let Err(e) = self.surface.insert(at, &text) {
            tracing::warn!("edit rejected: {}", e);
        }
        self.quit_armed = false;
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        if command != ShellCommand::Quit {
            self.quit_armed = false;
        }

        match command {
            ShellCommand::NewFromTemplate(id) => {
                let template = self
                    .workspace
                    .templates
                    .get(&id)
                    .ok_or_else(|| anyhow!("Unknown template: {}", id))?
                    .clone();
                self.surface.set_value(&template.content)?;
                self.notify(NotificationKind::Success, format!("Inserted {}", template.name));
            }
            ShellCommand::Open(path) => {
                let path = path.map(|p| self.ctx.resolve(&p));
                let file = self.workspace.files.load_file(path.as_deref())?;
                let path = file.path.map(PathBuf::from);
                self.surface.load(&file.content, path.clone())?;
                if let Some(path) = path {
                    self.watch_file(&path);
                    self.notify(NotificationKind::Success, format!("Opened {}", path.display()));
                }
            }
            ShellCommand::Save => {
                let path = self.surface.path().map(Path::to_path_buf);
                self.save(path)?;
            }
            ShellCommand::SaveAs(path) => {
                let path = path.map(|p| self.ctx.resolve(&p));
                self.save(path)?;
            }
            ShellCommand::Export { format, path } => {
                let render = self.controller.current_render();
                let path = path.map(|p| self.ctx.resolve(&p));
                let written = self
                    .workspace
                    .export(render.artifact().map(|a| a.as_ref()), &format, path)?;
                self.notify(
                    NotificationKind::Success,
                    format!("Exported to {}", written.display()),
                );
            }
            ShellCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.controller.change_theme(self.theme)?;
                println!("{} {} theme", "◐".cyan(), self.theme);
            }
            ShellCommand::ZoomIn => self.controller.zoom_in()?,
            ShellCommand::ZoomOut => self.controller.zoom_out()?,
            ShellCommand::ZoomReset => self.controller.force_refresh()?,
            ShellCommand::ClearRecent => {
                self.workspace.files.clear_recent_files()?;
                self.notify(NotificationKind::Success, "Recent files cleared");
            }
            ShellCommand::ShowTab(tab) => {
                self.tab = tab;
                self.show_tab();
            }
            ShellCommand::Undo => {
                if !self.surface.undo()? {
                    println!("{}", "Nothing to undo".dimmed());
                }
            }
            ShellCommand::Redo => {
                if !self.surface.redo()? {
                    println!("{}", "Nothing to redo".dimmed());
                }
            }
            ShellCommand::Print => {
                self.tab = Tab::Editor;
                self.show_tab();
            }
            ShellCommand::Help => println!("{}", ShellCommand::HELP),
            ShellCommand::Quit => {
                if self.surface.is_dirty() && !self.quit_armed {
                    self.quit_armed = true;
                    println!(
                        "{} Unsaved changes. :save, or :quit again to discard them",
                        "⚠️".yellow()
                    );
                    return Ok(Flow::Continue);
                }
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn save(&mut self, path: Option<PathBuf>) -> Result<()> {
        let content = self.surface.value().to_string();
        let written = self.workspace.files.save_file(&content, path.as_deref())?;

        let moved = self.surface.path() != Some(written.as_path());
        self.surface.mark_saved(written.clone());
        if moved {
            self.watch_file(&written);
        }
        if let Some(watcher) = &mut self.watcher {
            watcher.mark_seen(content);
        }

        self.notify(NotificationKind::Success, format!("Saved {}", written.display()));
        Ok(())
    }

    /// External modification of the open file
    fn reload(&mut self, content: &str) {
        match self.surface.set_value(content) {
            Ok(true) => {
                if let Some(path) = self.surface.path().map(Path::to_path_buf) {
                    self.surface.mark_saved(path);
                }
                self.notify(NotificationKind::Success, "Reloaded from disk");
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("reload rejected: {}", e),
        }
    }

    fn watch_file(&mut self, path: &Path) {
        if !self.watch {
            return;
        }
        self.watcher = match FileWatcher::new(path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!("not watching {}: {}", path.display(), e);
                None
            }
        };
    }

    /// Repaint whatever changed in the snapshot
    fn present(&mut self, snapshot: &Snapshot) {
        if snapshot.text == self.surface.value() {
            self.surface.set_markers(snapshot.validation.as_ref());
        }

        let badge = StatusBadge::from_validation(snapshot.validation.as_ref());
        if badge != self.badge {
            self.badge = badge;
            if let Some(badge) = badge {
                println!("{} {}", "●".dimmed(), paint_badge(badge));
            }
        }

        let panel = PreviewPanel::from_snapshot(snapshot);
        let key = panel.key();
        if self.panel.as_ref() == Some(&key) {
            return;
        }
        self.panel = Some(key);

        print_panel(&panel);
        if let PreviewPanel::Diagram { artifact, zoom } = &panel {
            self.write_preview(&artifact.scaled_svg(zoom.get()));
        }
    }

    fn write_preview(&mut self, svg: &str) {
        let Some(path) = self.preview_path.clone() else {
            return;
        };
        if let Err(e) = self.workspace.files.file_system().write(&path, svg.as_bytes()) {
            self.notify(NotificationKind::Error, format!("Failed to save file: {}", e));
        }
    }

    fn show_tab(&mut self) {
        println!("{}", format!("── {} ──", self.tab).bright_blue().bold());
        match self.tab {
            Tab::Editor => self.print_editor(),
            Tab::Preview => {
                print_panel(&PreviewPanel::from_snapshot(&self.controller.snapshot()));
                let now = Instant::now();
                for notification in self.notifications.active(now) {
                    println!("  {}", paint_notification(notification.kind, &notification.message));
                }
            }
            Tab::Templates => print_catalog(&self.workspace.templates),
            Tab::Recent => print_recent(&self.workspace.files.recent_files()),
        }
    }

    fn print_editor(&self) {
        let title = match self.surface.path() {
            Some(path) => path.display().to_string(),
            None => "untitled".to_string(),
        };
        let dirty = if self.surface.is_dirty() { " *" } else { "" };
        println!("{}{}", title.bright_white(), dirty);

        for (index, line) in self.surface.value().lines().enumerate() {
            let number = index + 1;
            println!("{:>4} │ {}", number.to_string().dimmed(), line);
            for marker in self.surface.markers_on(number) {
                let label = match marker.severity {
                    MarkerSeverity::Error => "error".red().bold(),
                    MarkerSeverity::Warning => "warning".yellow().bold(),
                };
                println!("     │ {} {}", label, marker.message);
            }
        }
    }

    fn print_banner(&self) {
        println!("{}", "✏️  Flowcraft Studio".bright_blue().bold());
        if let Some(path) = self.surface.path() {
            println!("   File:    {}", path.display());
        }
        if let Some(preview) = &self.preview_path {
            println!("   Preview: {}", preview.display());
        }
        println!("   Type diagram lines, or :help for commands");
        println!();
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let notification = match kind {
            NotificationKind::Success => self.notifications.success(message),
            NotificationKind::Error => self.notifications.error(message),
        };
        println!("{}", paint_notification(notification.kind, &notification.message));
    }

    async fn close(self) {
        let Session {
            controller,
            surface,
            watcher,
            ..
        } = self;

        drop(watcher);
        surface.close();
        match Arc::try_unwrap(controller) {
            Ok(controller) => controller.shutdown().await,
            Err(_) => tracing::warn!("controller still shared at exit"),
        }
    }
}

async fn next_external(watcher: &mut Option<FileWatcher>) -> Option<String> {
    match watcher {
        Some(watcher) => watcher.next_change().await,
        None => std::future::pending().await,
    }
}

fn paint_notification(kind: NotificationKind, message: &str) -> String {
    match kind {
        NotificationKind::Success => format!("{} {}", "✓".green(), message),
        NotificationKind::Error => format!("{} {}", "✗".red(), message.red()),
    }
}

fn print_panel(panel: &PreviewPanel) {
    match panel {
        PreviewPanel::Placeholder => {
            println!("{}", "Start typing to see a preview".dimmed());
        }
        PreviewPanel::FixErrors { errors } => {
            println!("{}", "Fix syntax errors to see the preview".red().bold());
            for error in errors {
                println!("  {}", error);
            }
        }
        PreviewPanel::Rendering => println!("{}", "Rendering…".dimmed()),
        PreviewPanel::Failed { message } => {
            println!("{} {}", "Render failed:".red().bold(), message);
        }
        PreviewPanel::Diagram { artifact, zoom } => {
            let size = artifact
                .size()
                .map(|(w, h)| format!("{:.0}×{:.0}", w, h))
                .unwrap_or_else(|| "unsized".to_string());
            println!(
                "{} diagram {} at {} ({} theme)",
                "▣".green(),
                size,
                zoom,
                artifact.theme()
            );
        }
    }
}
