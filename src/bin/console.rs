//! Healthmap Console Binary
//!
//! This is a demonstration driver for the overlay engine. It loads a
//! seed set, walks through a few interaction events while rendering
//! frame summaries to the log, then leaves the live-update loop running
//! until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin healthmap-console
//!
//! # With a custom configuration file
//! HEALTHMAP_CONFIG=./healthmap.toml cargo run --bin healthmap-console
//! ```
//!
//! # Environment Variables
//!
//! - `HEALTHMAP_CONFIG`: Path to the TOML configuration (default: search standard locations)
//! - `HEALTHMAP_SEED`: Path to a JSON seed file (default: built-in Delhi dataset)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use healthmap_engine::adapter::{MapAdapter, MapEvent};
use healthmap_engine::api::MapFrame;
use healthmap_engine::config::EngineConfig;
use healthmap_engine::models::seed::{delhi_seed, parse_seed_json_str};
use healthmap_engine::OverlayEngine;

/// Adapter that renders frames as log lines.
struct ConsoleAdapter;

impl MapAdapter for ConsoleAdapter {
    fn render(&mut self, frame: &MapFrame) {
        info!(
            facilities = frame.facilities.len(),
            zones = frame.zones.len(),
            selection = ?frame.selection,
            available_beds = frame.counters.total_available_beds,
            active_facilities = frame.counters.active_facility_count,
            "frame"
        );
        for overlay in &frame.zones {
            info!(
                disease = %overlay.zone.disease,
                severity = ?overlay.zone.severity,
                cases = overlay.zone.case_count,
                color = %overlay.style.color,
                ring_points = overlay.ring.len(),
                "zone overlay"
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting healthmap console");

    let config = match env::var("HEALTHMAP_CONFIG") {
        Ok(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        Err(_) => EngineConfig::from_default_location().unwrap_or_else(|_| {
            info!("No configuration file found, using defaults");
            EngineConfig::default()
        }),
    };

    let seed = match env::var("HEALTHMAP_SEED") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file {}", path))?;
            parse_seed_json_str(&json)?
        }
        Err(_) => delhi_seed(),
    };

    let mut engine = OverlayEngine::new(seed, config)?;
    info!("Engine initialized successfully");

    let mut adapter = ConsoleAdapter;

    // Initial frame, then a short interaction walkthrough.
    engine.render_to(&mut adapter)?;

    engine.dispatch(MapEvent::facility(1));
    info!(detail = ?engine.selection_detail(), "selected facility 1");
    engine.render_to(&mut adapter)?;

    engine.dispatch(MapEvent::zone(1));
    info!(detail = ?engine.selection_detail(), "selected zone 1");
    engine.render_to(&mut adapter)?;

    engine.clear_selection();
    engine.render_to(&mut adapter)?;

    engine.start_live_updates();
    info!("Live updates running; press Ctrl-C to exit");

    tokio::signal::ctrl_c().await?;

    engine.shutdown();
    info!(ticks = engine.ticks_completed(), "Stopped");

    Ok(())
}
