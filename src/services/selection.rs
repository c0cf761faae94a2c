//! Map selection state machine.

use serde::{Deserialize, Serialize};

use crate::api::{Facility, FacilityId, OutbreakZone, Selection, ZoneId};
use crate::store::GeoEntityStore;

/// Detail-panel payload for the current selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionDetail {
    Facility(Facility),
    Zone(OutbreakZone),
}

/// Selection state over facilities and zones.
///
/// At most one entity is selected at a time. Selecting the entity that is
/// already selected deselects it; selecting anything else replaces the
/// current selection. Ids are not validated here: a selection may point
/// at an entity the store no longer knows, in which case the detail
/// lookup yields nothing and the selection stays put.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    current: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    /// Toggle-select a facility. Returns the resulting selection.
    pub fn select_facility(&mut self, id: FacilityId) -> Selection {
        self.current = if self.current == Selection::Facility(id) {
            Selection::None
        } else {
            Selection::Facility(id)
        };
        self.current
    }

    /// Toggle-select a zone. Returns the resulting selection.
    pub fn select_zone(&mut self, id: ZoneId) -> Selection {
        self.current = if self.current == Selection::Zone(id) {
            Selection::None
        } else {
            Selection::Zone(id)
        };
        self.current
    }

    /// Drop any selection. Harmless when nothing is selected.
    pub fn clear(&mut self) {
        self.current = Selection::None;
    }
}

/// Resolve the detail payload for a selection against the store.
///
/// Stale ids fail soft: the lookup returns `None` and no error surfaces.
pub fn selection_detail(store: &GeoEntityStore, selection: Selection) -> Option<SelectionDetail> {
    match selection {
        Selection::None => None,
        Selection::Facility(id) => store.get_facility(id).ok().map(SelectionDetail::Facility),
        Selection::Zone(id) => store.get_zone(id).ok().map(SelectionDetail::Zone),
    }
}
