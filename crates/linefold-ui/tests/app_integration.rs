/// Integration tests for the linefold App using egui_kittest.
///
/// These tests exercise the full `eframe::App::update` loop through AccessKit
/// queries and state inspection.
mod common;

use std::time::{Duration, Instant, SystemTime};

use egui_kittest::kittest::Queryable;
use linefold_core::cursor::LineSelection;
use linefold_core::{DragPhase, RegionId, TextView, ToggleOutcome};

use common::{create_harness, create_harness_with_file, write_source};

const SOURCE: &str = "\
import os

def load(path):
    with open(path) as f:
        return f.read()

class Store:
    def get(self):
        return 1
";

// ── A. App Initialization ──────────────────────────────────────────────────

#[test]
fn test_app_initial_state() {
    let (harness, _dir) = create_harness();
    let app = harness.state();
    assert_eq!(app.doc.line_count(), 1);
    assert!(app.sidebar.is_shown());
    assert!(app.sidebar.next_deadline().is_some());
}

#[test]
fn test_default_config_is_written() {
    let (harness, dir) = create_harness();
    assert!(dir.path().join("linefold.json").exists());
    assert!(harness.state().config.show_line_numbers);
}

#[test]
fn test_menus_exist() {
    let (harness, _dir) = create_harness();
    harness.get_by_label("File");
    harness.get_by_label("View");
}

// ── B. Status Bar ──────────────────────────────────────────────────────────

#[test]
fn test_status_bar_shows_position() {
    let (harness, _dir) = create_harness();
    harness.get_by_label("Ln 1, Col 1");
}

#[test]
fn test_status_bar_shows_line_count() {
    let (harness, _dir) = create_harness();
    harness.get_by_label("1 lines");
}

#[test]
fn test_status_bar_without_regions_has_no_fold_summary() {
    let (harness, _dir) = create_harness();
    assert!(harness.query_by_label("0/0 folded").is_none());
}

// ── C. Opening Files ───────────────────────────────────────────────────────

#[test]
fn test_open_file_on_startup_finds_regions() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (harness, _dir) = create_harness_with_file(Some(path));
    let app = harness.state();
    assert_eq!(app.doc.title, "store.py");
    assert!(app.doc.live_monitoring);

    let catalog = app.sidebar.catalog();
    assert!(catalog.contains(RegionId::new(3, 5)));
    assert!(catalog.contains(RegionId::new(4, 5)));
    assert!(catalog.contains(RegionId::new(7, 9)));
    assert!(catalog.contains(RegionId::new(8, 9)));
    harness.get_by_label("0/4 folded");
    harness.get_by_label("LIVE");
}

#[test]
fn test_open_missing_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.py");
    let (harness, _dir) = create_harness_with_file(Some(missing.clone()));
    assert_eq!(harness.state().doc.line_count(), 1);
    harness.get_by_label(&format!("Failed to open {}", missing.display()));
}

#[test]
fn test_plain_text_file_has_no_fold_regions() {
    let (path, _src) = write_source("notes.txt", "if x:\n    a\nelse:\n    b\n");
    let (mut harness, _dir) = create_harness_with_file(Some(path));
    let app = harness.state_mut();
    assert!(app.sidebar.catalog().is_empty());
    assert_eq!(
        app.sidebar.on_fold_anchor_clicked(1, &mut app.doc),
        ToggleOutcome::Ignored
    );
    harness.run();
    harness.get_by_label("5 lines");
    assert!(harness.query_by_label("0/0 folded").is_none());
}

#[test]
fn test_python_shebang_script_folds_without_extension() {
    let (path, _src) = write_source("tool", "#!/usr/bin/env python3\nif x:\n    a\n    b\n");
    let (harness, _dir) = create_harness_with_file(Some(path));
    assert!(harness.state().sidebar.catalog().contains(RegionId::new(2, 4)));
}

// ── D. Folding ─────────────────────────────────────────────────────────────

#[test]
fn test_fold_anchor_click_hides_body() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (mut harness, _dir) = create_harness_with_file(Some(path));

    let app = harness.state_mut();
    let outcome = app.sidebar.on_fold_anchor_clicked(3, &mut app.doc);
    assert_eq!(outcome, ToggleOutcome::Folded(RegionId::new(3, 5)));
    harness.run();

    let app = harness.state();
    assert_eq!(app.doc.hidden_ranges(), &[4..=5]);
    assert_eq!(app.sidebar.row_for_line(6).map(|r| r.display_row), Some(4));
    assert!(app.sidebar.row_for_line(4).is_none());
    harness.get_by_label("1/4 folded");
}

#[test]
fn test_fold_all_then_unfold_all() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (mut harness, _dir) = create_harness_with_file(Some(path));

    assert_eq!(harness.state_mut().fold_all(), 4);
    harness.run();
    assert_eq!(harness.state().doc.hidden_ranges(), &[4..=5, 8..=9]);
    harness.get_by_label("4/4 folded");

    assert_eq!(harness.state_mut().unfold_all(), 4);
    harness.run();
    assert!(harness.state().doc.hidden_ranges().is_empty());
    harness.get_by_label("0/4 folded");
}

#[test]
fn test_clicking_line_without_region_is_ignored() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (mut harness, _dir) = create_harness_with_file(Some(path));

    let app = harness.state_mut();
    let outcome = app.sidebar.on_fold_anchor_clicked(1, &mut app.doc);
    assert_eq!(outcome, ToggleOutcome::Ignored);
    harness.run();
    assert!(harness.state().doc.hidden_ranges().is_empty());
}

// ── E. Drag Selection ──────────────────────────────────────────────────────

#[test]
fn test_drag_selects_whole_lines() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (mut harness, _dir) = create_harness_with_file(Some(path));
    harness.run();

    let app = harness.state_mut();
    let lh = app.doc.line_height();
    app.sidebar.pointer_down(lh * 2.5, &mut app.doc);
    app.sidebar.pointer_move(lh * 0.5, Instant::now(), &mut app.doc);
    app.sidebar.pointer_up();
    harness.run();

    let app = harness.state();
    assert_eq!(app.doc.selection, Some(LineSelection::new(1, 3)));
    assert_eq!(app.doc.caret.line, 1);
    harness.get_by_label("Sel 1-3 (3 lines)");
}

#[test]
fn test_drag_onto_folded_header_selects_hidden_body() {
    let (path, _src) = write_source("store.py", SOURCE);
    let (mut harness, _dir) = create_harness_with_file(Some(path));
    harness.run();

    let app = harness.state_mut();
    app.sidebar.toggle_fold(RegionId::new(3, 5), &mut app.doc);
    let lh = app.doc.line_height();
    // Rows: 1, 2, 3 (folded 3..5), 6.
    app.sidebar.pointer_down(lh * 0.5, &mut app.doc);
    app.sidebar.pointer_move(lh * 2.5, Instant::now(), &mut app.doc);
    app.sidebar.pointer_up();
    harness.run();

    assert_eq!(
        harness.state().doc.selection,
        Some(LineSelection::new(1, 5))
    );
}

#[test]
fn test_update_loop_drives_auto_scroll() {
    let text: Vec<String> = (1..=300).map(|i| format!("value_{i} = {i}")).collect();
    let (path, _src) = write_source("long.py", &text.join("\n"));
    let (mut harness, _dir) = create_harness_with_file(Some(path));
    harness.run();

    let app = harness.state_mut();
    let lh = app.doc.line_height();
    app.doc.scroll_by(lh * 100.0);
    let start_scroll = app.doc.scroll_y;
    app.sidebar.pointer_down(lh * 2.5, &mut app.doc);
    app.sidebar.pointer_left(-20.0, Instant::now(), &mut app.doc);
    assert_eq!(app.sidebar.drag_phase(), DragPhase::AutoScrolling);

    // The first tick is due immediately; the next frame fires it.
    harness.run();
    let app = harness.state();
    assert!(app.doc.scroll_y < start_scroll);
    let top = app.doc.selection.map(|s| s.start_line).unwrap_or(usize::MAX);
    assert!(top < 103);

    let app = harness.state_mut();
    app.sidebar.pointer_up();
    assert_eq!(app.sidebar.drag_phase(), DragPhase::Idle);
}

#[test]
fn test_focus_loss_cancels_auto_scroll() {
    let text: Vec<String> = (1..=300).map(|i| format!("value_{i} = {i}")).collect();
    let (path, _src) = write_source("long.py", &text.join("\n"));
    let (mut harness, _dir) = create_harness_with_file(Some(path));
    harness.run();

    let app = harness.state_mut();
    let lh = app.doc.line_height();
    app.doc.scroll_by(lh * 100.0);
    let start_scroll = app.doc.scroll_y;
    app.sidebar.pointer_down(lh * 2.5, &mut app.doc);
    app.sidebar.pointer_left(-20.0, Instant::now(), &mut app.doc);
    assert_eq!(app.sidebar.drag_phase(), DragPhase::AutoScrolling);

    // The first tick is already due, but focus loss is handled before it fires.
    harness.event(egui::Event::WindowFocused(false));
    harness.run();

    let app = harness.state();
    assert_eq!(app.sidebar.drag_phase(), DragPhase::Idle);
    assert_eq!(app.doc.scroll_y, start_scroll);
    assert_eq!(app.doc.selection.map(|s| s.end_line), Some(103));
    // The rebuild poll survives.
    assert!(app.sidebar.next_deadline().is_some());
    assert!(app.sidebar.is_shown());
}

// ── F. Sidebar Visibility ──────────────────────────────────────────────────

#[test]
fn test_hiding_sidebar_cancels_timers() {
    let (mut harness, _dir) = create_harness();
    let app = harness.state_mut();
    app.config.show_line_numbers = false;
    app.config.show_fold_indicators = false;
    app.apply_sidebar_visibility(Instant::now());
    harness.run();

    assert!(!harness.state().sidebar.is_shown());
    assert_eq!(harness.state().sidebar.next_deadline(), None);
    harness.get_by_label("Sidebar hidden");

    let app = harness.state_mut();
    app.config.show_line_numbers = true;
    app.apply_sidebar_visibility(Instant::now());
    harness.run();
    assert!(harness.state().sidebar.is_shown());
    assert!(harness.query_by_label("Sidebar hidden").is_none());
}

#[test]
fn test_hidden_sidebar_ignores_pointer_down() {
    let (mut harness, _dir) = create_harness();
    let app = harness.state_mut();
    app.config.show_line_numbers = false;
    app.config.show_fold_indicators = false;
    app.apply_sidebar_visibility(Instant::now());

    let app = harness.state_mut();
    app.sidebar.pointer_down(5.0, &mut app.doc);
    assert_eq!(app.sidebar.drag_phase(), DragPhase::Idle);
    assert_eq!(app.doc.selection, None);
}

// ── G. Live Reload ─────────────────────────────────────────────────────────

#[test]
fn test_live_reload_through_update_loop() {
    let (path, _src) = write_source("store.py", "x = 1\n");
    let (mut harness, _dir) = create_harness_with_file(Some(path.clone()));
    assert!(harness.state().sidebar.catalog().is_empty());

    std::fs::write(&path, SOURCE).unwrap();
    let app = harness.state_mut();
    app.doc.last_known_mtime = Some(SystemTime::UNIX_EPOCH);
    app.last_file_check = Instant::now() - Duration::from_secs(5);
    harness.run();

    let app = harness.state();
    assert_eq!(app.doc.content(), SOURCE);
    assert_eq!(app.doc.line_count(), 10);
    harness.get_by_label("10 lines");
}
