//! Status bar rendering for the application.
//!
//! Shows caret position, line count, fold and selection summaries, live
//! reload state, the last error and the file path.

use eframe::egui;
use egui::{Color32, RichText};
use linefold_core::cursor::LineSelection;

use super::App;

/// Formats a whole-line selection, e.g. `Sel 3-7 (5 lines)`.
fn format_selection(selection: LineSelection) -> String {
    let count = selection.line_count();
    if count == 1 {
        format!("Sel {} (1 line)", selection.start_line)
    } else {
        format!(
            "Sel {}-{} ({count} lines)",
            selection.start_line, selection.end_line
        )
    }
}

/// Formats the fold summary, e.g. `2/5 folded`.
fn format_folds(folded: usize, regions: usize) -> String {
    format!("{folded}/{regions} folded")
}

impl App {
    /// Renders the status bar at the bottom of the window.
    pub(crate) fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        let caret = self.doc.caret;
        let line_count = self.doc.buffer.len_lines();
        let selection = self.doc.selection;
        let regions = self.sidebar.catalog().len();
        let folded = self.sidebar.folds().len();
        let live_monitoring = self.doc.live_monitoring;
        let file_path_display = self.doc.file_path.as_ref().map(|p| p.display().to_string());

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(format!("Ln {}, Col {}", caret.line, caret.col + 1))
                    .selectable(false),
            );
            ui.separator();
            ui.add(egui::Label::new(format!("{line_count} lines")).selectable(false));

            if regions > 0 {
                ui.separator();
                ui.add(egui::Label::new(format_folds(folded, regions)).selectable(false));
            }

            if let Some(selection) = selection {
                ui.separator();
                ui.add(egui::Label::new(format_selection(selection)).selectable(false));
            }

            if !self.sidebar.is_shown() {
                ui.separator();
                ui.add(
                    egui::Label::new(RichText::new("Sidebar hidden").color(Color32::GRAY))
                        .selectable(false),
                );
            }

            if live_monitoring {
                ui.separator();
                ui.add(egui::Label::new("LIVE").selectable(false));
            }

            // Right-aligned section: last error and file path
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(ref path_str) = file_path_display {
                    ui.add(
                        egui::Label::new(RichText::new(path_str).small().color(Color32::GRAY))
                            .selectable(false),
                    );
                }
                if let Some(message) = &self.status_message {
                    if file_path_display.is_some() {
                        ui.separator();
                    }
                    ui.add(
                        egui::Label::new(RichText::new(message).color(Color32::LIGHT_RED))
                            .selectable(false),
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection_single_line() {
        assert_eq!(format_selection(LineSelection::new(4, 4)), "Sel 4 (1 line)");
    }

    #[test]
    fn test_format_selection_range_is_ordered() {
        assert_eq!(
            format_selection(LineSelection::new(9, 3)),
            "Sel 3-9 (7 lines)"
        );
    }

    #[test]
    fn test_format_folds() {
        assert_eq!(format_folds(0, 3), "0/3 folded");
    }
}
