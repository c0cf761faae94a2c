//! In-process rendering boundary.
//!
//! The engine never talks to a map library directly. It hands composed
//! frames to a [`MapAdapter`] and receives interaction events back as
//! plain [`MapEvent`] values, so any rendering surface (a browser
//! bridge, a test recorder, a console dump) can sit on the other side
//! without the engine knowing which one it is.

use serde::{Deserialize, Serialize};

use crate::services::overlay::MapFrame;

/// Entity kind referenced by an interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Facility,
    Zone,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Facility => write!(f, "facility"),
            EntityKind::Zone => write!(f, "zone"),
        }
    }
}

/// A click or tap on a map entity, as reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEvent {
    pub kind: EntityKind,
    pub id: u32,
}

impl MapEvent {
    pub fn facility(id: u32) -> Self {
        Self {
            kind: EntityKind::Facility,
            id,
        }
    }

    pub fn zone(id: u32) -> Self {
        Self {
            kind: EntityKind::Zone,
            id,
        }
    }
}

/// Rendering surface for composed frames.
///
/// `render` is fire-and-forget: the engine neither waits for drawing nor
/// hears back about it.
pub trait MapAdapter {
    fn render(&mut self, frame: &MapFrame);
}
