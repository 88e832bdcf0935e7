//! Menu bar rendering for the application.
//!
//! Contains the File and View menus.

use std::time::Instant;

use eframe::egui;

use super::App;

impl App {
    /// Renders the menu bar with File and View menus.
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open...").clicked() {
                    self.open_file_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                let mut gutter_changed = false;
                gutter_changed |= ui
                    .checkbox(&mut self.config.show_line_numbers, "Line Numbers")
                    .changed();
                gutter_changed |= ui
                    .checkbox(&mut self.config.show_fold_indicators, "Fold Indicators")
                    .changed();
                if gutter_changed {
                    self.apply_sidebar_visibility(Instant::now());
                }

                let mut live_reload = self.config.live_reload;
                if ui.checkbox(&mut live_reload, "Live Reload").changed() {
                    self.set_live_reload(live_reload);
                }

                ui.separator();
                let has_regions = !self.sidebar.catalog().is_empty();
                if ui
                    .add_enabled(has_regions, egui::Button::new("Fold All"))
                    .clicked()
                {
                    self.fold_all();
                    ui.close();
                }
                let has_folds = !self.sidebar.folds().is_empty();
                if ui
                    .add_enabled(has_folds, egui::Button::new("Unfold All"))
                    .clicked()
                {
                    self.unfold_all();
                    ui.close();
                }
            });
        });
    }
}
