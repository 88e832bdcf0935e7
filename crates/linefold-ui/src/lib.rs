//! egui front end for the linefold sidebar.
//!
//! [`EditorWidget`] paints a line-number gutter with fold indicators beside
//! a read-only text pane and turns pointer input into sidebar events.
//! [`App`] hosts one document in an eframe window.

pub mod app;
pub mod editor;

pub use app::{sidebar_settings, App, StartupArgs};
pub use editor::{EditorTheme, EditorWidget};
