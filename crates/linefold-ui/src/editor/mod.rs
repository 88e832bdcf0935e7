mod gutter;
mod text_pane;
mod theme;
mod widget;

use egui::text::{LayoutJob, TextFormat};
use egui::{FontId, Ui};
use linefold_core::Document;

pub use gutter::{gutter_width, GutterLayout};
pub use theme::EditorTheme;
pub use widget::EditorWidget;

/// Horizontal gap between the gutter separator and the first text column.
pub(crate) const TEXT_LEFT_PADDING: f32 = 6.0;

/// Measures the width of a single character in the monospace font.
pub(crate) fn measure_char_width(ui: &Ui, font_id: &FontId) -> f32 {
    let mut job = LayoutJob::default();
    job.append(
        "M",
        0.0,
        TextFormat {
            font_id: font_id.clone(),
            ..Default::default()
        },
    );
    let galley = ui.fonts_mut(|f| f.layout_job(job));
    galley.rect.width()
}

/// Logical lines whose rows intersect a viewport of `height` pixels, paired
/// with the viewport-relative y of each row's top edge.
pub fn visible_lines(doc: &Document, height: f32) -> Vec<(usize, f32)> {
    let line_height = doc.line_height();
    let first_row = (doc.scroll_y / line_height).floor().max(0.0) as usize;
    let mut lines = Vec::new();
    let mut row = first_row;
    loop {
        let top = row as f32 * line_height - doc.scroll_y;
        if top >= height {
            break;
        }
        let Some(line) = doc.line_at_row(row) else {
            break;
        };
        lines.push((line, top));
        row += 1;
    }
    lines
}
