//! Main application state and eframe integration.
//!
//! The `App` owns one document, the line-number sidebar attached to it and
//! the loaded configuration. Each frame it renders the panels, then hands
//! the clock to the sidebar so debounced rebuilds and auto-scroll ticks
//! run, then checks the backing file for external changes.

mod file_ops;
mod menu_bar;
mod status_bar;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use linefold_config::SidebarConfig;
use linefold_core::{parser_for, Document, LineNumbers, SidebarSettings};

use crate::editor::{EditorTheme, EditorWidget};

/// Arguments passed from the CLI to the app at startup.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// File to open on startup.
    pub file: Option<PathBuf>,
    /// Overrides the default config file location.
    pub config_path: Option<PathBuf>,
}

/// Converts the persisted config into the sidebar's timing settings.
pub fn sidebar_settings(config: &SidebarConfig) -> SidebarSettings {
    SidebarSettings {
        rebuild_interval: config.rebuild_interval(),
        poll_interval: config.poll_interval(),
        auto_scroll_tick: config.auto_scroll_tick(),
    }
}

/// The main application state.
pub struct App {
    pub doc: Document,
    pub sidebar: LineNumbers,
    pub theme: EditorTheme,
    pub config: SidebarConfig,
    pub(crate) config_path: PathBuf,
    pub last_file_check: Instant,
    /// Last error shown in the status bar, if any.
    pub status_message: Option<String>,
}

impl App {
    /// Creates a new App instance.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = args
            .config_path
            .clone()
            .unwrap_or_else(SidebarConfig::config_path);
        let config = SidebarConfig::load_or_create(&config_path);
        let dark_mode = cc.egui_ctx.style().visuals.dark_mode;
        tracing::info!("Using config at {}", config_path.display());

        let mut app = Self::with_config(config, config_path, dark_mode);
        if let Some(path) = &args.file {
            app.open_path(path);
        }
        app
    }

    /// Builds the app around an empty document.
    pub(crate) fn with_config(
        config: SidebarConfig,
        config_path: PathBuf,
        dark_mode: bool,
    ) -> Self {
        let theme = EditorTheme::for_dark_mode(dark_mode).with_font_size(config.font_size);
        let mut doc = Document::new();
        let sidebar = Self::attach_sidebar(&config, &mut doc);
        let mut app = Self {
            doc,
            sidebar,
            theme,
            config,
            config_path,
            last_file_check: Instant::now(),
            status_message: None,
        };
        app.apply_sidebar_visibility(Instant::now());
        app
    }

    /// Creates a sidebar for `doc` with the configured timings. Only Python
    /// sources get fold regions.
    pub(crate) fn attach_sidebar(config: &SidebarConfig, doc: &mut Document) -> LineNumbers {
        let first_line = doc.buffer.line_text(0).unwrap_or_default();
        LineNumbers::new(
            parser_for(doc.file_path.as_deref(), &first_line),
            sidebar_settings(config),
            doc,
            Instant::now(),
        )
    }

    /// Hides the sidebar when both gutter columns are off, shows it otherwise.
    pub fn apply_sidebar_visibility(&mut self, now: Instant) {
        if self.config.show_line_numbers || self.config.show_fold_indicators {
            self.sidebar.show(now, &mut self.doc);
        } else {
            self.sidebar.hide();
        }
    }

    /// Folds every region in the document.
    pub fn fold_all(&mut self) -> usize {
        self.sidebar.fold_all(&mut self.doc)
    }

    /// Unfolds every folded region.
    pub fn unfold_all(&mut self) -> usize {
        self.sidebar.unfold_all(&mut self.doc)
    }

    /// Time until the next frame is needed for timers or file checks.
    pub(crate) fn next_repaint(&self, now: Instant) -> Duration {
        let file_check = if self.doc.live_monitoring {
            self.config
                .file_check_interval()
                .saturating_sub(now.saturating_duration_since(self.last_file_check))
        } else {
            self.config.file_check_interval()
        };
        self.sidebar
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(file_check, |timer| timer.min(file_check))
    }

    /// Updates the OS window title to reflect the document.
    fn update_window_title(&self, ctx: &egui::Context) {
        let title = match &self.doc.file_path {
            Some(path) => format!("{} - linefold", path.display()),
            None => format!("{} - linefold", self.doc.title),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

/// Returns true if the window stopped receiving pointer input this frame.
fn window_focus_lost(ctx: &egui::Context) -> bool {
    ctx.input(|i| {
        !i.focused
            || i
                .events
                .iter()
                .any(|e| matches!(e, egui::Event::WindowFocused(false)))
    })
}

impl eframe::App for App {
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_window_title(ctx);

        let panel_fill = ctx.style().visuals.panel_fill;
        let faint_bg = ctx.style().visuals.faint_bg_color;

        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui, ctx);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(faint_bg)
                    .inner_margin(egui::Margin::symmetric(8, 3)),
            )
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        let now = Instant::now();
        let line_height = self.config.line_height();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.bg_color))
            .show(ctx, |ui| {
                let mut editor = EditorWidget::new(
                    &mut self.doc,
                    &mut self.sidebar,
                    &self.theme,
                    line_height,
                    now,
                );
                editor.show_line_numbers = self.config.show_line_numbers;
                editor.show_fold_indicators = self.config.show_fold_indicators;
                editor.show(ui);
            });

        // A release that happens while the window is unfocused never reaches us.
        if window_focus_lost(ctx) {
            self.sidebar.cancel_drag();
        }

        // Debounced rebuilds and auto-scroll ticks.
        self.sidebar.advance(now, &mut self.doc);

        if self.doc.live_monitoring
            && self.last_file_check.elapsed() >= self.config.file_check_interval()
        {
            self.check_live_monitored_file();
            self.last_file_check = Instant::now();
        }

        ctx.request_repaint_after(self.next_repaint(Instant::now()));
    }

    fn on_exit(&mut self) {
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!("Failed to save config: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linefold_core::{RegionId, TextView};

    /// Helper: create an App for unit-testing (no rendering needed).
    fn test_app() -> App {
        App::with_config(
            SidebarConfig::default(),
            PathBuf::from("linefold-test.json"),
            true,
        )
    }

    #[test]
    fn test_sidebar_settings_from_config() {
        let config = SidebarConfig {
            rebuild_interval_ms: 500,
            poll_interval_ms: 200,
            auto_scroll_tick_ms: 30,
            ..SidebarConfig::default()
        };
        let settings = sidebar_settings(&config);
        assert_eq!(settings.rebuild_interval, Duration::from_millis(500));
        assert_eq!(settings.poll_interval, Duration::from_millis(200));
        assert_eq!(settings.auto_scroll_tick, Duration::from_millis(30));
    }

    #[test]
    fn test_new_app_has_empty_document() {
        let app = test_app();
        assert_eq!(app.doc.line_count(), 1);
        assert!(app.sidebar.is_shown());
        assert!(app.sidebar.catalog().is_empty());
    }

    #[test]
    fn test_theme_uses_config_font_size() {
        let app = App::with_config(
            SidebarConfig {
                font_size: 18.0,
                ..SidebarConfig::default()
            },
            PathBuf::from("linefold-test.json"),
            false,
        );
        assert!((app.theme.font_size - 18.0).abs() < f32::EPSILON);
        assert_eq!(app.theme.bg_color, EditorTheme::light().bg_color);
    }

    #[test]
    fn test_hiding_both_columns_hides_sidebar() {
        let mut app = test_app();
        app.config.show_line_numbers = false;
        app.config.show_fold_indicators = false;
        app.apply_sidebar_visibility(Instant::now());
        assert!(!app.sidebar.is_shown());
        assert_eq!(app.sidebar.next_deadline(), None);

        app.config.show_fold_indicators = true;
        app.apply_sidebar_visibility(Instant::now());
        assert!(app.sidebar.is_shown());
        assert!(app.sidebar.next_deadline().is_some());
    }

    #[test]
    fn test_fold_all_and_unfold_all() {
        let mut app = test_app();
        app.doc.set_text("def f():\n    a\n    b\nclass C:\n    x = 1\n    y = 2\n");
        app.sidebar = App::attach_sidebar(&app.config, &mut app.doc);

        assert_eq!(app.fold_all(), 2);
        assert!(app.sidebar.folds().is_folded(RegionId::new(1, 3)));
        assert_eq!(app.doc.hidden_ranges(), &[2..=3, 5..=6]);

        assert_eq!(app.unfold_all(), 2);
        assert!(app.doc.hidden_ranges().is_empty());
    }

    #[test]
    fn test_next_repaint_waits_for_sidebar_poll() {
        let app = test_app();
        let now = Instant::now();
        assert!(app.next_repaint(now) <= app.config.poll_interval());
    }
}
