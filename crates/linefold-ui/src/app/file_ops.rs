//! File operations: opening files and live reload.

use std::path::Path;

use anyhow::{Context, Result};
use linefold_core::Document;

use super::App;

/// Loads `path` as a document, monitored for external changes if `live_reload`.
fn load_document(path: &Path, live_reload: bool) -> Result<Document> {
    let mut doc =
        Document::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    doc.live_monitoring = live_reload;
    Ok(doc)
}

impl App {
    /// Opens a file dialog and loads the selected file.
    pub(crate) fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Open File");
        if let Some(dir) = self.doc.file_path.as_deref().and_then(Path::parent) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_path(&path);
        }
    }

    /// Replaces the document with the contents of `path` and attaches a
    /// fresh sidebar to it. On failure the current document stays open and
    /// the error is shown in the status bar.
    pub fn open_path(&mut self, path: &Path) {
        match load_document(path, self.config.live_reload) {
            Ok(mut doc) => {
                // The old sidebar is dropped here, cancelling its timers.
                self.sidebar = Self::attach_sidebar(&self.config, &mut doc);
                self.doc = doc;
                self.status_message = None;
                self.apply_sidebar_visibility(std::time::Instant::now());
            }
            Err(e) => {
                tracing::error!("{e:#}");
                self.status_message = Some(format!("Failed to open {}", path.display()));
            }
        }
    }

    /// Reloads the document if its file changed on disk.
    ///
    /// The sidebar is told about the change so its debounced rebuild picks
    /// up the new content; existing folds survive when their regions do.
    pub(crate) fn check_live_monitored_file(&mut self) {
        if !self.doc.live_monitoring || !self.doc.has_changed_on_disk() {
            return;
        }
        if let Err(e) = self.doc.reload_from_disk() {
            tracing::warn!("Live reload failed for '{}': {e:#}", self.doc.title);
            return;
        }
        self.sidebar.on_content_changed(&mut self.doc);
    }

    /// Toggles live monitoring for the current document.
    pub fn set_live_reload(&mut self, enabled: bool) {
        self.config.live_reload = enabled;
        self.doc.live_monitoring = enabled && self.doc.file_path.is_some();
    }
}
