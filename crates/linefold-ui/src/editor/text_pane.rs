//! Read-only text pane painting.

use egui::{Painter, Pos2, Rect, Vec2};
use linefold_core::{Document, LineNumbers};

use super::theme::EditorTheme;
use super::TEXT_LEFT_PADDING;

/// Label drawn after a folded header, e.g. `⋯ 4 lines`.
pub(crate) fn folded_marker(hidden_lines: usize) -> String {
    if hidden_lines == 1 {
        "⋯ 1 line".to_string()
    } else {
        format!("⋯ {hidden_lines} lines")
    }
}

/// Paints the visible lines with caret-line and selection highlights.
pub(crate) fn paint_text(
    painter: &Painter,
    rect: Rect,
    visible: &[(usize, f32)],
    sidebar: &LineNumbers,
    doc: &Document,
    theme: &EditorTheme,
    char_width: f32,
) {
    let painter = painter.with_clip_rect(rect);
    let line_height = doc.line_height();

    for &(line, top) in visible {
        let line_y = rect.min.y + top;
        let row_rect = Rect::from_min_size(
            Pos2::new(rect.min.x, line_y),
            Vec2::new(rect.width(), line_height),
        );
        if doc.selection.is_some_and(|s| s.contains(line)) {
            painter.rect_filled(row_rect, 0.0, theme.selection_color);
        } else if doc.caret.line == line {
            painter.rect_filled(row_rect, 0.0, theme.current_line_highlight);
        }

        let text = match doc.buffer.line_text(line - 1) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping line {line}: {e:#}");
                continue;
            }
        };
        let text_rect = painter.text(
            Pos2::new(rect.min.x + TEXT_LEFT_PADDING, line_y + line_height * 0.15),
            egui::Align2::LEFT_TOP,
            text,
            theme.font_id.clone(),
            theme.text_color,
        );

        let Some(row) = sidebar.row_for_line(line) else {
            continue;
        };
        let hidden = row
            .region
            .filter(|_| row.is_folded)
            .and_then(|id| sidebar.catalog().get(id))
            .map(|region| region.hidden_len());
        if let Some(hidden) = hidden {
            painter.text(
                Pos2::new(text_rect.max.x + char_width, line_y + line_height * 0.15),
                egui::Align2::LEFT_TOP,
                folded_marker(hidden),
                theme.font_id.clone(),
                theme.folded_marker_color,
            );
        }
    }
}
