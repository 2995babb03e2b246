mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SuperstoreApp;
use eframe::egui;

/// Dataset read when no path is given on the command line.
const DEFAULT_DATA_FILE: &str = "Sample - Superstore.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    // One-shot load before the interactive loop starts; a data problem at
    // this point is fatal.
    let dataset = match data::loader::load_cached(&path) {
        Ok(dataset) => dataset,
        Err(err) => {
            log::error!("failed to load {}: {err}", path.display());
            std::process::exit(2);
        }
    };
    log::info!(
        "loaded {} orders: {} segments, {} categories, {} years",
        dataset.len(),
        dataset.segments.len(),
        dataset.categories.len(),
        dataset.years.len()
    );

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Análisis Superstore",
        options,
        Box::new(move |cc| Ok(Box::new(SuperstoreApp::new(cc, dataset, source)))),
    )
}
