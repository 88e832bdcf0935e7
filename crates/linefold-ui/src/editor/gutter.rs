//! Line-number gutter painting and hit testing.
//!
//! The gutter is two columns: right-aligned line numbers, then a narrow
//! column of `[-]`/`[+]` fold indicators on region header lines. Rows come
//! from the sidebar's display rows so folded lines never get a number.

use egui::{Painter, Pos2, Rect, Stroke, Vec2};
use linefold_core::{Document, LineNumbers};

use super::theme::EditorTheme;

/// Column widths of the gutter, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterLayout {
    pub numbers_width: f32,
    pub indicator_width: f32,
}

/// Which part of the gutter a pointer x falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GutterZone {
    Numbers,
    Indicators,
}

impl GutterLayout {
    pub fn total(&self) -> f32 {
        self.numbers_width + self.indicator_width
    }

    /// Classifies `x`, relative to the gutter's left edge.
    pub(crate) fn zone_at(&self, x: f32) -> Option<GutterZone> {
        if x < 0.0 || x >= self.total() {
            None
        } else if x < self.numbers_width {
            Some(GutterZone::Numbers)
        } else {
            Some(GutterZone::Indicators)
        }
    }
}

/// Computes gutter column widths for `line_count` lines.
///
/// The number column fits at least three digits; either column collapses
/// to zero when turned off.
pub fn gutter_width(
    line_count: usize,
    digit_width: f32,
    show_line_numbers: bool,
    show_fold_indicators: bool,
) -> GutterLayout {
    let numbers_width = if show_line_numbers {
        let digits = if line_count == 0 {
            1
        } else {
            (line_count as f64).log10().floor() as usize + 1
        }
        .max(3);
        (digits as f32 + 1.0) * digit_width + 8.0
    } else {
        0.0
    };
    let indicator_width = if show_fold_indicators {
        digit_width * 2.0
    } else {
        0.0
    };
    GutterLayout {
        numbers_width,
        indicator_width,
    }
}

/// Paints the gutter into `rect` for the rows visible in `doc`.
pub(crate) fn paint_gutter(
    painter: &Painter,
    rect: Rect,
    layout: GutterLayout,
    visible: &[(usize, f32)],
    sidebar: &LineNumbers,
    doc: &Document,
    theme: &EditorTheme,
) {
    let painter = painter.with_clip_rect(rect);
    let line_height = doc.line_height();

    painter.rect_filled(rect, 0.0, theme.line_number_bg);
    painter.line_segment(
        [
            Pos2::new(rect.max.x, rect.min.y),
            Pos2::new(rect.max.x, rect.max.y),
        ],
        Stroke::new(1.0, theme.gutter_separator_color),
    );

    for &(line, top) in visible {
        let line_y = rect.min.y + top;
        let selected = doc.selection.is_some_and(|s| s.contains(line));

        if doc.caret.line == line || selected {
            let highlight = Rect::from_min_size(
                Pos2::new(rect.min.x, line_y),
                Vec2::new(rect.width(), line_height),
            );
            let color = if selected {
                theme.selection_color
            } else {
                theme.current_line_highlight
            };
            painter.rect_filled(highlight, 0.0, color);
        }

        if layout.numbers_width > 0.0 {
            let color = if doc.caret.line == line {
                theme.text_color
            } else {
                theme.line_number_color
            };
            painter.text(
                Pos2::new(
                    rect.min.x + layout.numbers_width - 8.0,
                    line_y + line_height * 0.15,
                ),
                egui::Align2::RIGHT_TOP,
                line.to_string(),
                theme.font_id.clone(),
                color,
            );
        }

        if layout.indicator_width > 0.0 {
            let Some(row) = sidebar.row_for_line(line) else {
                continue;
            };
            if row.is_fold_anchor {
                let center = Pos2::new(
                    rect.min.x + layout.numbers_width + layout.indicator_width / 2.0,
                    line_y + line_height / 2.0,
                );
                let size = (line_height * 0.55).min(layout.indicator_width - 2.0);
                paint_fold_indicator(&painter, center, size, row.is_folded, theme);
            }
        }
    }
}

/// Draws a boxed minus (expanded) or plus (folded).
fn paint_fold_indicator(
    painter: &Painter,
    center: Pos2,
    size: f32,
    folded: bool,
    theme: &EditorTheme,
) {
    let half = size / 2.0;
    let stroke = Stroke::new(1.0, theme.fold_indicator_color);
    let corners = [
        Pos2::new(center.x - half, center.y - half),
        Pos2::new(center.x + half, center.y - half),
        Pos2::new(center.x + half, center.y + half),
        Pos2::new(center.x - half, center.y + half),
    ];
    for i in 0..corners.len() {
        painter.line_segment([corners[i], corners[(i + 1) % corners.len()]], stroke);
    }

    let arm = half * 0.6;
    painter.line_segment(
        [
            Pos2::new(center.x - arm, center.y),
            Pos2::new(center.x + arm, center.y),
        ],
        stroke,
    );
    if folded {
        painter.line_segment(
            [
                Pos2::new(center.x, center.y - arm),
                Pos2::new(center.x, center.y + arm),
            ],
            Stroke::new(1.0, theme.folded_marker_color),
        );
    }
}
