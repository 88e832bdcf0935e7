//! The editor widget: a line-number gutter beside a read-only text pane.
//!
//! Pointer input on the gutter is translated into sidebar events (fold
//! clicks, line-selection drags, auto-scroll when the drag leaves the
//! viewport). Painting happens after input so the frame reflects the
//! latest fold and selection state.

use std::time::Instant;

use egui::{Pos2, Rect, Response, Sense, Ui};
use linefold_core::{Document, DragPhase, LineNumbers, TextView};

use super::gutter::{gutter_width, paint_gutter, GutterLayout, GutterZone};
use super::text_pane::paint_text;
use super::theme::EditorTheme;
use super::{measure_char_width, visible_lines};

/// The gutter plus text pane, drawn over the whole available area.
pub struct EditorWidget<'a> {
    doc: &'a mut Document,
    sidebar: &'a mut LineNumbers,
    theme: &'a EditorTheme,
    line_height: f32,
    now: Instant,
    pub show_line_numbers: bool,
    pub show_fold_indicators: bool,
}

impl<'a> EditorWidget<'a> {
    pub fn new(
        doc: &'a mut Document,
        sidebar: &'a mut LineNumbers,
        theme: &'a EditorTheme,
        line_height: f32,
        now: Instant,
    ) -> Self {
        Self {
            doc,
            sidebar,
            theme,
            line_height,
            now,
            show_line_numbers: true,
            show_fold_indicators: true,
        }
    }

    /// Handles input and paints the widget.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let rect = response.rect;

        let char_width = measure_char_width(ui, &self.theme.font_id);
        let layout = if self.sidebar.is_shown() {
            gutter_width(
                self.doc.line_count(),
                char_width,
                self.show_line_numbers,
                self.show_fold_indicators,
            )
        } else {
            GutterLayout {
                numbers_width: 0.0,
                indicator_width: 0.0,
            }
        };
        let gutter_rect = Rect::from_min_max(
            rect.min,
            Pos2::new(rect.min.x + layout.total(), rect.max.y),
        );
        let text_area = Rect::from_min_max(Pos2::new(gutter_rect.max.x, rect.min.y), rect.max);

        self.doc.set_metrics(self.line_height, rect.height());

        self.handle_input(ui, &response, rect, gutter_rect, text_area, layout);

        painter.rect_filled(rect, 0.0, self.theme.bg_color);
        let visible = visible_lines(self.doc, rect.height());
        paint_text(
            &painter,
            text_area,
            &visible,
            self.sidebar,
            self.doc,
            self.theme,
            char_width,
        );
        if layout.total() > 0.0 {
            paint_gutter(
                &painter,
                gutter_rect,
                layout,
                &visible,
                self.sidebar,
                self.doc,
                self.theme,
            );
        }

        response
    }

    fn handle_input(
        &mut self,
        ui: &Ui,
        response: &Response,
        rect: Rect,
        gutter_rect: Rect,
        text_area: Rect,
        layout: GutterLayout,
    ) {
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
            if scroll_delta.y != 0.0 {
                self.doc.scroll_by(-scroll_delta.y);
            }
        }

        // Gutter drags select whole lines; y is relative to the viewport top.
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                if gutter_rect.contains(pos) {
                    self.sidebar.pointer_down(pos.y - rect.min.y, &mut *self.doc);
                }
            }
        }

        let phase = self.sidebar.drag_phase();
        if response.dragged() && phase != DragPhase::Idle {
            if let Some(pos) = response.interact_pointer_pos() {
                let y = pos.y - rect.min.y;
                let outside = y < 0.0 || y > rect.height();
                match (phase, outside) {
                    (DragPhase::Dragging, true) => {
                        self.sidebar.pointer_left(y, self.now, &mut *self.doc);
                    }
                    (DragPhase::AutoScrolling, false) => {
                        self.sidebar.pointer_entered(y, self.now, &mut *self.doc);
                    }
                    _ => self.sidebar.pointer_move(y, self.now, &mut *self.doc),
                }
            }
        }

        if response.drag_stopped() && self.sidebar.drag_phase() != DragPhase::Idle {
            self.sidebar.pointer_up();
        }

        if response.clicked() {
            let Some(pos) = response.interact_pointer_pos() else {
                return;
            };
            let y = pos.y - rect.min.y;
            match layout.zone_at(pos.x - gutter_rect.min.x) {
                Some(GutterZone::Indicators) => {
                    if let Some(line) = self.doc.pixel_to_line(y) {
                        self.sidebar.on_fold_anchor_clicked(line, &mut *self.doc);
                    }
                }
                Some(GutterZone::Numbers) => {
                    self.sidebar.pointer_down(y, &mut *self.doc);
                    self.sidebar.pointer_up();
                }
                None if text_area.contains(pos) => {
                    if let Some(line) = self.doc.pixel_to_line(y) {
                        self.doc.selection = None;
                        self.doc.set_caret(line, 0);
                    }
                }
                None => {}
            }
        }
    }
}
