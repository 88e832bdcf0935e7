//! Sidebar and text pane theme.
//!
//! Defines the colors used for the gutter, fold indicators, the text pane
//! and its selection highlight.

use egui::{Color32, FontId};

/// Visual configuration shared by the gutter and the text pane.
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub font_size: f32,
    pub font_id: FontId,
    pub bg_color: Color32,
    pub text_color: Color32,
    pub selection_color: Color32,
    pub line_number_color: Color32,
    pub line_number_bg: Color32,
    pub current_line_highlight: Color32,
    pub gutter_separator_color: Color32,
    pub fold_indicator_color: Color32,
    /// Color of the marker drawn after a folded header line.
    pub folded_marker_color: Color32,
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl EditorTheme {
    /// Dark theme preset.
    pub fn dark() -> Self {
        Self {
            font_size: 14.0,
            font_id: FontId::monospace(14.0),
            bg_color: Color32::from_rgb(30, 30, 30),
            text_color: Color32::from_rgb(212, 212, 212),
            selection_color: Color32::from_rgba_premultiplied(50, 100, 200, 100),
            line_number_color: Color32::from_rgb(120, 120, 120),
            line_number_bg: Color32::from_rgb(37, 37, 37),
            current_line_highlight: Color32::from_rgb(45, 45, 45),
            gutter_separator_color: Color32::from_rgb(60, 60, 60),
            fold_indicator_color: Color32::from_rgb(150, 150, 150),
            folded_marker_color: Color32::from_rgb(90, 140, 200),
        }
    }

    /// Light theme preset.
    pub fn light() -> Self {
        Self {
            font_size: 14.0,
            font_id: FontId::monospace(14.0),
            bg_color: Color32::from_rgb(255, 255, 255),
            text_color: Color32::from_rgb(30, 30, 30),
            selection_color: Color32::from_rgba_premultiplied(100, 150, 230, 100),
            line_number_color: Color32::from_rgb(130, 130, 130),
            line_number_bg: Color32::from_rgb(240, 240, 240),
            current_line_highlight: Color32::from_rgb(232, 242, 254),
            gutter_separator_color: Color32::from_rgb(200, 200, 200),
            fold_indicator_color: Color32::from_rgb(110, 110, 110),
            folded_marker_color: Color32::from_rgb(40, 100, 180),
        }
    }

    /// Picks the preset matching egui's dark/light mode.
    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Returns a copy using `font_size` for both text and line numbers.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self.font_id = FontId::monospace(font_size);
        self
    }
}
