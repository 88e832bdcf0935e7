use std::path::PathBuf;

use egui_kittest::Harness;
use linefold_ui::{App, StartupArgs};
use tempfile::TempDir;

/// Creates a standard test harness with the app at 1024x768.
///
/// The config file lives in the returned temp dir, which must outlive the harness.
pub fn create_harness() -> (Harness<'static, App>, TempDir) {
    create_harness_with_file(None)
}

/// Same as [`create_harness`], opening `file` on startup.
pub fn create_harness_with_file(file: Option<PathBuf>) -> (Harness<'static, App>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let args = StartupArgs {
        file,
        config_path: Some(dir.path().join("linefold.json")),
    };
    let harness = Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 768.0))
        .build_eframe(move |cc| App::new(cc, args));
    (harness, dir)
}

/// Writes `content` to `name` inside a fresh temp dir.
pub fn write_source(name: &str, content: &str) -> (PathBuf, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (path, dir)
}
