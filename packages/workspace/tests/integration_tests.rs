use flowcraft_common::{RealFileSystem, Theme};
use flowcraft_renderer::Artifact;
use flowcraft_workspace::{NoDialog, StorageError, StudioConfig, Workspace};
use std::fs;
use std::sync::Arc;

fn open(state_dir: &std::path::Path) -> Workspace {
    let config = StudioConfig {
        state_dir: Some(state_dir.to_path_buf()),
        ..StudioConfig::default()
    };
    Workspace::open(config, Arc::new(RealFileSystem), Arc::new(NoDialog)).unwrap()
}

#[test]
fn test_recent_files_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let first = dir.path().join("first.mmd");
    let second = dir.path().join("second.mmd");

    let workspace = open(&state);
    workspace.files.save_file("graph TD\n  A --> B", Some(&first)).unwrap();
    workspace.files.save_file("pie\n  \"A\" : 1", Some(&second)).unwrap();
    workspace.files.load_file(Some(&first)).unwrap();
    drop(workspace);

    let reopened = open(&state);
    let names: Vec<String> = reopened
        .files
        .recent_files()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["first.mmd", "second.mmd"]);

    reopened.files.clear_recent_files().unwrap();
    assert!(open(&state).files.recent_files().is_empty());
}

#[test]
fn test_failed_load_leaves_recent_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open(&dir.path().join("state"));

    let err = workspace
        .files
        .load_file(Some(&dir.path().join("missing.mmd")))
        .unwrap_err();
    assert!(matches!(err, StorageError::Read(_)));
    assert!(err.to_string().starts_with("Failed to read file: "));
    assert!(workspace.files.recent_files().is_empty());

    let err = workspace.files.load_file(None).unwrap_err();
    assert_eq!(err.to_string(), "File selection cancelled");
}

#[test]
fn test_export_writes_displayed_svg() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open(&dir.path().join("state"));
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#;
    let artifact = Artifact::new(svg.to_string(), Theme::Dark);

    let out = dir.path().join("flow.svg");
    let written = workspace
        .export(Some(&artifact), "SVG", Some(out.clone()))
        .unwrap();

    assert_eq!(written, out);
    assert_eq!(fs::read_to_string(&out).unwrap(), svg);
}
