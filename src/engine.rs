//! Engine facade.
//!
//! Bundles the entity store, the selection state, and the live-update
//! loop behind one handle so an embedding application deals with a
//! single type.

use tracing::{debug, info};

use crate::adapter::{EntityKind, MapAdapter, MapEvent};
use crate::api::{FacilityId, Selection, ZoneId};
use crate::config::{ConfigError, EngineConfig};
use crate::models::seed::{delhi_seed, SeedSet};
use crate::services::boundary::GeometryError;
use crate::services::overlay::{compute_map_frame, MapFrame};
use crate::services::selection::{selection_detail, SelectionController, SelectionDetail};
use crate::services::simulator::{RealtimeSimulator, ZoneChurn};
use crate::store::{GeoEntityStore, StoreError};

/// Error type for engine construction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Top-level engine handle.
pub struct OverlayEngine {
    store: GeoEntityStore,
    selection: SelectionController,
    simulator: RealtimeSimulator,
    config: EngineConfig,
}

impl OverlayEngine {
    /// Build an engine over a seed set, validating both the seed and the
    /// configuration on the way in. A configuration that fails
    /// `EngineConfig::validate` never reaches the live-update task.
    pub fn new(seed: SeedSet, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = GeoEntityStore::from_seed(seed)?;
        let simulator = RealtimeSimulator::new(store.clone(), config.simulator_config());

        Ok(Self {
            store,
            selection: SelectionController::new(),
            simulator,
            config,
        })
    }

    /// Build an engine over the built-in Delhi dataset.
    pub fn with_delhi_seed(config: EngineConfig) -> Result<Self, EngineError> {
        Self::new(delhi_seed(), config)
    }

    /// Shared handle to the entity store.
    pub fn store(&self) -> &GeoEntityStore {
        &self.store
    }

    /// Route an interaction event into the selection state and return
    /// the resulting selection.
    pub fn dispatch(&mut self, event: MapEvent) -> Selection {
        let result = match event.kind {
            EntityKind::Facility => self.selection.select_facility(FacilityId::new(event.id)),
            EntityKind::Zone => self.selection.select_zone(ZoneId::new(event.id)),
        };
        debug!(kind = %event.kind, id = event.id, selection = ?result, "dispatched map event");
        result
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Detail payload for the current selection, if it still resolves.
    pub fn selection_detail(&self) -> Option<SelectionDetail> {
        selection_detail(&self.store, self.selection.current())
    }

    /// Compose a frame from the current store state and selection.
    pub fn frame(&self) -> Result<MapFrame, GeometryError> {
        compute_map_frame(
            self.store.snapshot(),
            self.selection.current(),
            &self.config.severity_colors,
            self.config.engine.circle_resolution_steps,
        )
    }

    /// Compose a frame and hand it to the adapter.
    pub fn render_to(&self, adapter: &mut dyn MapAdapter) -> Result<(), GeometryError> {
        let frame = self.frame()?;
        adapter.render(&frame);
        Ok(())
    }

    /// Install a zone churn hook on the live-update loop. Takes effect
    /// from the next `start_live_updates`.
    pub fn set_zone_churn<C: ZoneChurn + 'static>(&mut self, churn: C) {
        self.simulator.set_zone_churn(churn);
    }

    /// Start the live-update loop; a running loop is replaced. Must be
    /// called from within a Tokio runtime.
    pub fn start_live_updates(&mut self) {
        info!("starting live updates");
        self.simulator.start();
    }

    /// Stop the live-update loop. Idempotent; call on teardown.
    pub fn shutdown(&mut self) {
        self.simulator.stop();
    }

    /// Whether the live-update loop is currently running.
    pub fn live_updates_running(&self) -> bool {
        self.simulator.is_running()
    }

    /// Ticks applied by the live-update loop so far.
    pub fn ticks_completed(&self) -> u64 {
        self.simulator.ticks_completed()
    }
}
