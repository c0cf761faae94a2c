//! Service layer for the overlay engine.
//!
//! Each service is a small, mostly pure piece of the pipeline: boundary
//! geometry, severity mapping, frame composition, selection state, and
//! the live-update loop. The engine facade wires them together.

pub mod boundary;

pub mod overlay;

pub mod selection;

pub mod severity;

pub mod simulator;

pub use boundary::{circle_ring, GeometryError, DEFAULT_RING_STEPS};
pub use overlay::compute_map_frame;
pub use selection::{selection_detail, SelectionController};
pub use severity::{facility_marker_color, severity_weight, SeverityPalette};
pub use simulator::{run_tick, RealtimeSimulator, SimulatorConfig, TickReport, ZoneChurn};
