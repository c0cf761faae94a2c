//! # Healthmap Engine
//!
//! Geospatial overlay engine for a healthcare map UI.
//!
//! This crate owns everything behind the rendered map: the facility and
//! outbreak-zone data model, circular zone boundaries approximated as
//! polygon rings, severity-to-color mapping, the selection state machine
//! feeding the detail panel, and a simulated realtime feed that nudges
//! the dashboard aggregates on a timer. Rendering itself stays outside;
//! an [`adapter::MapAdapter`] implementation on the other side of the
//! boundary draws whatever frames the engine composes.
//!
//! ## Features
//!
//! - **Entity Store**: In-memory, snapshot-consistent source of truth
//!   for facilities, zones, and dashboard counters
//! - **Boundary Geometry**: Center-plus-radius to closed polygon ring,
//!   equirectangular approximation
//! - **Severity Mapping**: Color tokens and paint-order weights per
//!   severity level, overridable from configuration
//! - **Live Updates**: Timer-driven random walk over display aggregates,
//!   with deterministic seeding for tests
//! - **Selection**: Toggle and mutual-exclusion semantics over
//!   facilities and zones
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Entity types and shared payload types
//! - [`store`]: The in-memory entity store
//! - [`services`]: Pure computation and the live-update loop
//! - [`adapter`]: The in-process rendering boundary
//! - [`engine`]: The facade bundling everything behind one handle
//! - [`config`]: TOML configuration

pub mod adapter;

pub mod api;

pub mod config;

pub mod engine;

pub mod models;

pub mod services;

pub mod store;

pub use engine::{EngineError, OverlayEngine};
