//! View model of the studio window: the active tab, what the preview panel
//! shows, the status badge and transient notifications.
//!
//! Everything here is derived from a controller [`Snapshot`]; the shell
//! never decides what should be rendered, it only displays it and forwards
//! commands.

use anyhow::{anyhow, bail};
use flowcraft_common::ValidationResult;
use flowcraft_editor::{RenderOutcome, Snapshot, ZoomFactor};
use flowcraft_renderer::{Artifact, ArtifactId};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Editor,
    Preview,
    Templates,
    Recent,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Editor, Tab::Preview, Tab::Templates, Tab::Recent];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Editor => "Editor",
            Tab::Preview => "Preview",
            Tab::Templates => "Templates",
            Tab::Recent => "Recent",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown tab: {}", s))
    }
}

/// Content of the preview panel
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewPanel {
    /// Nothing typed yet
    Placeholder,
    /// The verdict says the text is broken; no render is attempted
    FixErrors { errors: Vec<String> },
    /// Valid or not yet validated, and no artifact to show yet
    Rendering,
    Failed { message: String },
    Diagram {
        artifact: Arc<Artifact>,
        zoom: ZoomFactor,
    },
}

impl PreviewPanel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        if snapshot.is_blank() {
            return PreviewPanel::Placeholder;
        }

        if let Some(validation) = snapshot.validation.as_ref().filter(|v| !v.is_valid) {
            return PreviewPanel::FixErrors {
                errors: validation.errors.clone(),
            };
        }

        match &snapshot.render {
            RenderOutcome::Empty => PreviewPanel::Rendering,
            RenderOutcome::Failed(message) => PreviewPanel::Failed {
                message: message.clone(),
            },
            RenderOutcome::Rendered(artifact) => PreviewPanel::Diagram {
                artifact: Arc::clone(artifact),
                zoom: snapshot.zoom,
            },
        }
    }

    pub fn artifact(&self) -> Option<&Arc<Artifact>> {
        match self {
            PreviewPanel::Diagram { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    /// Identity used to tell whether the panel needs repainting
    pub fn key(&self) -> PanelKey {
        match self {
            PreviewPanel::Placeholder => PanelKey::Placeholder,
            PreviewPanel::FixErrors { errors } => PanelKey::FixErrors(errors.clone()),
            PreviewPanel::Rendering => PanelKey::Rendering,
            PreviewPanel::Failed { message } => PanelKey::Failed(message.clone()),
            PreviewPanel::Diagram { artifact, zoom } => PanelKey::Diagram(artifact.id(), *zoom),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKey {
    Placeholder,
    FixErrors(Vec<String>),
    Rendering,
    Failed(String),
    Diagram(ArtifactId, ZoomFactor),
}

/// Validation badge next to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Valid,
    Errors(usize),
    Warnings(usize),
}

impl StatusBadge {
    /// `None` while there is no verdict (blank text)
    pub fn from_validation(validation: Option<&ValidationResult>) -> Option<Self> {
        let validation = validation?;
        let badge = if !validation.errors.is_empty() {
            StatusBadge::Errors(validation.errors.len())
        } else if !validation.warnings.is_empty() {
            StatusBadge::Warnings(validation.warnings.len())
        } else {
            StatusBadge::Valid
        };
        Some(badge)
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusBadge::Valid => f.write_str("Valid"),
            StatusBadge::Errors(1) => f.write_str("1 error"),
            StatusBadge::Errors(n) => write!(f, "{} errors", n),
            StatusBadge::Warnings(1) => f.write_str("1 warning"),
            StatusBadge::Warnings(n) => write!(f, "{} warnings", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    raised_at: Instant,
}

/// Transient messages for I/O outcomes
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn success(&mut self, message: impl Into<String>) -> &Notification {
        self.push(NotificationKind::Success, message.into(), Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> &Notification {
        self.push(NotificationKind::Error, message.into(), Instant::now())
    }

    fn push(&mut self, kind: NotificationKind, message: String, raised_at: Instant) -> &Notification {
        self.items.push(Notification {
            kind,
            message,
            raised_at,
        });
        &self.items[self.items.len() - 1]
    }

    /// Drop expired notifications and return the ones still visible
    pub fn active(&mut self, now: Instant) -> &[Notification] {
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < NOTIFICATION_TTL);
        &self.items
    }
}

/// Commands typed into the live session, prefixed with `:`
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    NewFromTemplate(String),
    Open(Option<PathBuf>),
    Save,
    SaveAs(Option<PathBuf>),
    Export {
        format: String,
        path: Option<PathBuf>,
    },
    ToggleTheme,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ClearRecent,
    ShowTab(Tab),
    Undo,
    Redo,
    Print,
    Help,
    Quit,
}

impl ShellCommand {
    pub const HELP: &'static str = "\
:new <template>        replace the text with a template
:open [path]           load a file
:save                  save to the current file
:save-as [path]        save under a new name
:export <fmt> [path]   export the preview (png, svg, pdf)
:theme                 toggle light/dark
:zoom in|out|reset     zoom the preview; reset also re-renders
:clear-recent          forget recent files
:tab <name>            show editor, preview, templates or recent
:undo / :redo          step through edit history
:print                 show the current text
:quit                  leave the session
Lines without a leading ':' are appended to the text.";
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(rest) = line.trim().strip_prefix(':') else {
            bail!("Commands start with ':'");
        };
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();
        let path = arg.map(PathBuf::from);

        let command = match name {
            "new" => ShellCommand::NewFromTemplate(
                arg.ok_or_else(|| anyhow!("Usage: :new <template>"))?.to_string(),
            ),
            "open" | "o" => ShellCommand::Open(path),
            "save" | "w" => ShellCommand::Save,
            "save-as" => ShellCommand::SaveAs(path),
            "export" => ShellCommand::Export {
                format: arg
                    .ok_or_else(|| anyhow!("Usage: :export <png|svg|pdf> [path]"))?
                    .to_string(),
                path: words.next().map(PathBuf::from),
            },
            "theme" => ShellCommand::ToggleTheme,
            "zoom" => match arg {
                Some("in") | Some("+") => ShellCommand::ZoomIn,
                Some("out") | Some("-") => ShellCommand::ZoomOut,
                Some("reset") | Some("0") => ShellCommand::ZoomReset,
                _ => bail!("Usage: :zoom in|out|reset"),
            },
            "clear-recent" => ShellCommand::ClearRecent,
            "tab" => ShellCommand::ShowTab(
                arg.ok_or_else(|| anyhow!("Usage: :tab <name>"))?.parse()?,
            ),
            "templates" => ShellCommand::ShowTab(Tab::Templates),
            "recent" => ShellCommand::ShowTab(Tab::Recent),
            "preview" => ShellCommand::ShowTab(Tab::Preview),
            "undo" | "u" => ShellCommand::Undo,
            "redo" => ShellCommand::Redo,
            "print" | "p" => ShellCommand::Print,
            "help" | "h" | "?" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            other => bail!("Unknown command: :{}", other),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_common::Theme;

    fn snapshot(text: &str) -> Snapshot {
        Snapshot {
            text: text.to_string(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_blank_text_shows_placeholder() {
        let mut snap = snapshot("  \n");
        snap.render = RenderOutcome::Failed("stale".into());
        assert_eq!(PreviewPanel::from_snapshot(&snap), PreviewPanel::Placeholder);
    }

    #[test]
    fn test_invalid_verdict_wins_over_artifact() {
        let mut snap = snapshot("graph TD\n  A[");
        snap.validation = Some(ValidationResult::from_messages(
            vec!["Line 2: Unclosed '['".into()],
            vec![],
        ));
        snap.render = RenderOutcome::Rendered(Arc::new(Artifact::new("<svg/>".into(), Theme::Light)));

        assert_eq!(
            PreviewPanel::from_snapshot(&snap),
            PreviewPanel::FixErrors {
                errors: vec!["Line 2: Unclosed '['".into()]
            }
        );
    }

    #[test]
    fn test_unknown_verdict_renders() {
        let snap = snapshot("graph TD");
        assert_eq!(PreviewPanel::from_snapshot(&snap), PreviewPanel::Rendering);

        let mut failed = snapshot("graph TD");
        failed.validation = Some(ValidationResult::valid());
        failed.render = RenderOutcome::Failed("unsupported".into());
        assert_eq!(
            PreviewPanel::from_snapshot(&failed),
            PreviewPanel::Failed {
                message: "unsupported".into()
            }
        );
    }

    #[test]
    fn test_zoom_changes_key_not_artifact() {
        let artifact = Arc::new(Artifact::new("<svg/>".into(), Theme::Dark));
        let mut snap = snapshot("graph TD\n  A --> B");
        snap.render = RenderOutcome::Rendered(Arc::clone(&artifact));

        let before = PreviewPanel::from_snapshot(&snap);
        snap.zoom = snap.zoom.zoom_in();
        let after = PreviewPanel::from_snapshot(&snap);

        assert_ne!(before.key(), after.key());
        assert_eq!(before.artifact().map(|a| a.id()), after.artifact().map(|a| a.id()));
    }

    #[test]
    fn test_badge() {
        assert_eq!(StatusBadge::from_validation(None), None);
        assert_eq!(
            StatusBadge::from_validation(Some(&ValidationResult::valid())).map(|b| b.to_string()),
            Some("Valid".to_string())
        );

        let warned = ValidationResult::valid().with_warning("Empty diagram");
        assert_eq!(StatusBadge::from_validation(Some(&warned)).unwrap().to_string(), "1 warning");

        let broken = ValidationResult::from_messages(vec!["a".into(), "b".into()], vec!["c".into()]);
        assert_eq!(StatusBadge::from_validation(Some(&broken)).unwrap().to_string(), "2 errors");
    }

    #[test]
    fn test_notifications_expire() {
        let mut notifications = Notifications::default();
        let start = Instant::now();
        notifications.push(NotificationKind::Error, "Failed to read file: gone".into(), start);
        notifications.push(NotificationKind::Success, "Saved".into(), start + Duration::from_secs(3));

        assert_eq!(notifications.active(start + Duration::from_secs(1)).len(), 2);
        let left = notifications.active(start + Duration::from_secs(5));
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].message, "Saved");
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(":q".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
        assert_eq!(
            ":new flowchart-basic".parse::<ShellCommand>().unwrap(),
            ShellCommand::NewFromTemplate("flowchart-basic".into())
        );
        assert_eq!(
            ":export png out/flow.png".parse::<ShellCommand>().unwrap(),
            ShellCommand::Export {
                format: "png".into(),
                path: Some(PathBuf::from("out/flow.png"))
            }
        );
        assert_eq!(":save-as".parse::<ShellCommand>().unwrap(), ShellCommand::SaveAs(None));
        assert_eq!(":zoom reset".parse::<ShellCommand>().unwrap(), ShellCommand::ZoomReset);
        assert_eq!(
            ":tab recent".parse::<ShellCommand>().unwrap(),
            ShellCommand::ShowTab(Tab::Recent)
        );

        let err = ":frobnicate".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: :frobnicate");
        assert!(":zoom sideways".parse::<ShellCommand>().is_err());
        assert!("graph TD".parse::<ShellCommand>().is_err());
    }
}
