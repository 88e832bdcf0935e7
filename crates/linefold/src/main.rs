#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use linefold_core::{parser_for, Document, LineNumbers, SidebarSettings};

/// A read-only source viewer with a line-number sidebar and code folding.
#[derive(Parser, Debug)]
#[command(name = "linefold", version, about)]
struct Cli {
    /// File to open on startup.
    file: Option<PathBuf>,

    /// Path to the config file (defaults to linefold.json next to the executable).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the display rows of FILE as JSON and exit without opening a window.
    #[arg(long, requires = "file")]
    dump_rows: bool,

    /// With --dump-rows, fold every region before printing.
    #[arg(long, requires = "dump_rows")]
    fold_all: bool,
}

/// Parses `path` and returns its display rows as pretty JSON.
fn dump_rows(path: &Path, fold_all: bool) -> Result<String> {
    let mut doc = Document::open(path)?;
    let first_line = doc.buffer.line_text(0).unwrap_or_default();
    let mut sidebar = LineNumbers::new(
        parser_for(Some(path), &first_line),
        SidebarSettings::default(),
        &mut doc,
        Instant::now(),
    );
    if fold_all {
        let folded = sidebar.fold_all(&mut doc);
        tracing::debug!("Folded {folded} regions");
    }
    serde_json::to_string_pretty(&sidebar.current_display_rows())
        .context("failed to serialize display rows")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if cli.dump_rows {
        if let Some(path) = &cli.file {
            println!("{}", dump_rows(path, cli.fold_all)?);
        }
        return Ok(());
    }

    tracing::info!("Starting linefold");

    let startup_args = linefold_ui::StartupArgs {
        file: cli.file,
        config_path: cli.config,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "linefold",
        native_options,
        Box::new(move |cc| Ok(Box::new(linefold_ui::App::new(cc, startup_args)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
