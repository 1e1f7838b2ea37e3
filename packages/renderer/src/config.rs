use flowcraft_common::{DiagramKind, Theme};
use serde::{Deserialize, Serialize};

/// Per-diagram-type layout spacing, in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub node_spacing: f32,
    pub rank_spacing: f32,
}

impl LayoutOptions {
    /// Fixed defaults per diagram type; not user-editable.
    pub fn for_kind(kind: Option<DiagramKind>) -> Self {
        match kind {
            Some(DiagramKind::Flowchart) => Self {
                node_spacing: 50.0,
                rank_spacing: 50.0,
            },
            Some(DiagramKind::Sequence) => Self {
                node_spacing: 60.0,
                rank_spacing: 40.0,
            },
            Some(DiagramKind::Class) | Some(DiagramKind::EntityRelationship) => Self {
                node_spacing: 70.0,
                rank_spacing: 70.0,
            },
            Some(DiagramKind::State) => Self {
                node_spacing: 55.0,
                rank_spacing: 60.0,
            },
            _ => Self::default(),
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_spacing: 50.0,
            rank_spacing: 50.0,
        }
    }
}

/// Colours the engine paints with, derived from the [`Theme`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub node_fill: String,
    pub node_border: String,
    pub text: String,
    pub line: String,
    pub secondary: String,
    pub tertiary: String,
    pub cluster_fill: String,
    pub cluster_border: String,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: "#FFFFFF".to_string(),
                node_fill: "#ECECFF".to_string(),
                node_border: "#9370DB".to_string(),
                text: "#333333".to_string(),
                line: "#333333".to_string(),
                secondary: "#FFFFDE".to_string(),
                tertiary: "#F4F4F4".to_string(),
                cluster_fill: "#FFFFDE".to_string(),
                cluster_border: "#AAAA33".to_string(),
            },
            Theme::Dark => Self {
                background: "#1E1E2E".to_string(),
                node_fill: "#313244".to_string(),
                node_border: "#585B70".to_string(),
                text: "#CDD6F4".to_string(),
                line: "#7F849C".to_string(),
                secondary: "#45475A".to_string(),
                tertiary: "#313244".to_string(),
                cluster_fill: "#181825".to_string(),
                cluster_border: "#45475A".to_string(),
            },
        }
    }

    /// Background as an RGB triple, for rasterisation
    pub fn background_rgb(&self) -> [u8; 3] {
        parse_hex(&self.background).unwrap_or([255, 255, 255])
    }
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() < 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Process-wide engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub theme: Theme,
    pub palette: Palette,
}

impl EngineConfig {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            palette: Palette::for_theme(theme),
        }
    }

    pub fn layout_for(&self, source: &str) -> LayoutOptions {
        LayoutOptions::for_kind(DiagramKind::detect(source))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_rgb() {
        assert_eq!(Palette::for_theme(Theme::Light).background_rgb(), [255, 255, 255]);
        assert_eq!(Palette::for_theme(Theme::Dark).background_rgb(), [0x1E, 0x1E, 0x2E]);
    }

    #[test]
    fn test_layout_defaults_per_kind() {
        let config = EngineConfig::default();
        assert_eq!(config.layout_for("classDiagram").node_spacing, 70.0);
        assert_eq!(config.layout_for("pie title x"), LayoutOptions::default());
    }
}
