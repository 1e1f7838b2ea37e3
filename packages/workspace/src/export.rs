//! Export of the currently displayed artifact.
//!
//! Export serialises the artifact it is handed; it never renders. Exporting
//! while a newer render is in flight writes the older, displayed artifact.

use crate::dialog::{FileDialog, FileFilter};
use crate::errors::{ExportError, ExportResult};
use flowcraft_common::{ExportFormat, FileSystem};
use flowcraft_renderer::pdf::svg_to_pdf;
use flowcraft_renderer::raster::{svg_to_png, RasterOptions};
use flowcraft_renderer::{Artifact, Palette};
use std::path::PathBuf;

/// Encode an artifact in `format`
pub fn encode_artifact(artifact: &Artifact, format: ExportFormat) -> ExportResult<Vec<u8>> {
    let options = RasterOptions {
        background: Palette::for_theme(artifact.theme()).background_rgb(),
        ..RasterOptions::default()
    };

    let bytes = match format {
        ExportFormat::Svg => artifact.svg().as_bytes().to_vec(),
        ExportFormat::Png => svg_to_png(artifact.svg(), options)?,
        ExportFormat::Pdf => svg_to_pdf(artifact.svg(), options)?,
    };
    Ok(bytes)
}

/// Write `artifact` as `format` to `path`, asking the dialog when no path is
/// given. Returns the path written.
pub fn export_diagram(
    artifact: Option<&Artifact>,
    format: &str,
    path: Option<PathBuf>,
    dialog: &dyn FileDialog,
    fs: &dyn FileSystem,
) -> ExportResult<PathBuf> {
    let format: ExportFormat = format
        .parse()
        .map_err(|_| ExportError::UnsupportedFormat(format.to_string()))?;
    let artifact = artifact.ok_or(ExportError::NoArtifact)?;

    let path = match path {
        Some(path) => path,
        None => dialog
            .save_file(&FileFilter::export(format.extension()))
            .ok_or(ExportError::Cancelled)?,
    };

    let bytes = encode_artifact(artifact, format)?;
    fs.write(&path, &bytes).map_err(|e| {
        tracing::warn!("export to {} failed: {}", path.display(), e);
        ExportError::Write(e)
    })?;

    tracing::info!("exported {} as {} ({} bytes)", artifact.id(), format, bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::NoDialog;
    use flowcraft_common::{MockFileSystem, Theme};
    use std::path::Path;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

    fn artifact(theme: Theme) -> Artifact {
        Artifact::new(SVG.to_string(), theme)
    }

    #[test]
    fn test_svg_export_writes_artifact_text() {
        let fs = MockFileSystem::new();
        let artifact = artifact(Theme::Light);
        let path = export_diagram(
            Some(&artifact),
            "svg",
            Some(PathBuf::from("/out/flow.svg")),
            &NoDialog,
            &fs,
        )
        .unwrap();

        assert_eq!(fs.contents(&path).unwrap(), SVG.as_bytes());
    }

    #[test]
    fn test_png_uses_theme_background() {
        let fs = MockFileSystem::new();
        let artifact = artifact(Theme::Dark);
        export_diagram(
            Some(&artifact),
            "png",
            Some(PathBuf::from("/out/flow.png")),
            &NoDialog,
            &fs,
        )
        .unwrap();

        let png = fs.contents(Path::new("/out/flow.png")).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_pdf_export() {
        let bytes = encode_artifact(&artifact(Theme::Light), ExportFormat::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn test_failures_carry_user_messages() {
        let fs = MockFileSystem::new();
        let artifact = artifact(Theme::Light);

        let err = export_diagram(Some(&artifact), "gif", None, &NoDialog, &fs).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported format");

        let err = export_diagram(None, "svg", None, &NoDialog, &fs).unwrap_err();
        assert_eq!(err.to_string(), "No rendered diagram to export");

        let err = export_diagram(Some(&artifact), "svg", None, &NoDialog, &fs).unwrap_err();
        assert_eq!(err.to_string(), "Export cancelled");

        let read_only = MockFileSystem::read_only();
        let err = export_diagram(
            Some(&artifact),
            "svg",
            Some(PathBuf::from("/x.svg")),
            &NoDialog,
            &read_only,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to export: Permission denied");
    }
}
