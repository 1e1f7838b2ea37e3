use flowcraft_common::Theme;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a rendered artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(u64);

impl ArtifactId {
    fn next() -> Self {
        Self(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact-{}", self.0)
    }
}

/// A rendered diagram: a self-contained SVG document.
///
/// Immutable once built. Zoom and export read from it; neither produces a
/// new artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    id: ArtifactId,
    svg: String,
    theme: Theme,
    size: Option<(f32, f32)>,
}

impl Artifact {
    pub fn new(svg: String, theme: Theme) -> Self {
        let size = svg_size(&svg);
        Self {
            id: ArtifactId::next(),
            svg,
            theme,
            size,
        }
    }

    pub fn id(&self) -> ArtifactId {
        self.id
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Intrinsic `(width, height)` of the root element, when declared
    pub fn size(&self) -> Option<(f32, f32)> {
        self.size
    }

    /// SVG markup scaled by `factor` for display.
    ///
    /// The artifact is wrapped, not re-rendered.
    pub fn scaled_svg(&self, factor: f32) -> String {
        match self.size {
            Some((width, height)) if (factor - 1.0).abs() > f32::EPSILON => format!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\" viewBox=\"0 0 {:.2} {:.2}\">{}</svg>",
                width * factor,
                height * factor,
                width,
                height,
                strip_xml_declaration(&self.svg)
            ),
            _ => self.svg.clone(),
        }
    }
}

fn strip_xml_declaration(svg: &str) -> &str {
    let trimmed = svg.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return trimmed[end + 2..].trim_start();
        }
    }
    trimmed
}

/// Read width/height from the root `<svg>` tag, falling back to the viewBox
fn svg_size(svg: &str) -> Option<(f32, f32)> {
    let start = svg.find("<svg")?;
    let end = start + svg[start..].find('>')?;
    let tag = &svg[start..end];

    let width = attribute(tag, "width").and_then(parse_length);
    let height = attribute(tag, "height").and_then(parse_length);
    if let (Some(w), Some(h)) = (width, height) {
        return Some((w, h));
    }

    let view_box = attribute(tag, "viewBox")?;
    let parts: Vec<f32> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse().ok())
        .collect();
    match parts.as_slice() {
        [_, _, w, h] => Some((*w, *h)),
        _ => None,
    }
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

fn parse_length(value: &str) -> Option<f32> {
    let number = value.trim().trim_end_matches("px");
    number.parse().ok().filter(|n: &f32| *n > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100"><rect/></svg>"#;

    #[test]
    fn test_ids_are_unique() {
        let a = Artifact::new(SVG.to_string(), Theme::Light);
        let b = Artifact::new(SVG.to_string(), Theme::Light);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_size_from_attributes() {
        let artifact = Artifact::new(SVG.to_string(), Theme::Light);
        assert_eq!(artifact.size(), Some((200.0, 100.0)));
    }

    #[test]
    fn test_size_from_view_box() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 320 240"></svg>"#;
        assert_eq!(svg_size(svg), Some((320.0, 240.0)));
    }

    #[test]
    fn test_scaled_svg_wraps_without_touching_artifact() {
        let artifact = Artifact::new(SVG.to_string(), Theme::Dark);
        let zoomed = artifact.scaled_svg(1.5);
        assert!(zoomed.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="300.00" height="150.00""#));
        assert!(zoomed.contains(SVG));
        assert_eq!(artifact.svg(), SVG);
        assert_eq!(artifact.scaled_svg(1.0), SVG);
    }
}
