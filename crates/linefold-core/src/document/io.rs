//! File I/O for documents: opening, change detection and live reload.

use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::encoding::load_text;

use super::Document;

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl Document {
    /// Opens a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let text = load_text(path)?;
        let mut doc = Self::from_text(&text);
        doc.file_path = Some(path.to_path_buf());
        doc.title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        doc.last_known_mtime = modified_time(path);
        tracing::info!("Opened '{}' ({} lines)", path.display(), doc.buffer.len_lines());
        Ok(doc)
    }

    /// Returns true if the backing file's mtime moved past the last known one.
    pub fn has_changed_on_disk(&self) -> bool {
        let Some(path) = &self.file_path else {
            return false;
        };
        let Some(current) = modified_time(path) else {
            return false;
        };
        match self.last_known_mtime {
            Some(known) => current > known,
            None => true,
        }
    }

    /// Reloads the document from disk, keeping caret, scroll and fold visibility
    /// where they still fit.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no backing file or it cannot be read.
    pub fn reload_from_disk(&mut self) -> Result<()> {
        let path = self
            .file_path
            .as_ref()
            .context("no file path set for reload")?
            .clone();
        let text = load_text(&path)?;
        self.set_text(&text);
        self.last_known_mtime = modified_time(&path);
        tracing::debug!("Reloaded '{}' from disk", path.display());
        Ok(())
    }
}
