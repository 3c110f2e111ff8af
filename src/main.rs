mod app;
mod concepts;
mod engine;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{info, warn};

use concepts::Dataset;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with nodes and concept mappings; the built-in theorists otherwise.
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let (dataset, source) = match &args.dataset {
        Some(path) => (Dataset::load(path)?, path.display().to_string()),
        None => (Dataset::builtin(), "built-in dataset".to_owned()),
    };

    let concepts = dataset.concept_table();
    info!(
        "loaded {} nodes and {} concepts from {source}",
        dataset.nodes.len(),
        concepts.len()
    );
    if concepts.is_empty() {
        warn!("no concepts mapped; every grouping will show the fallback text");
    }

    let tick_interval = Duration::from_millis(args.tick_ms);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "thresholds",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ThresholdsApp::new(
                cc,
                &dataset,
                tick_interval,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to open the canvas window: {error}"))
}
