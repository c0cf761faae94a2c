//! Error types for store operations.

use crate::adapter::EntityKind;
use crate::api::{FacilityId, ZoneId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Requested entity does not exist in the store.
    #[error("Not found: {kind} {id}")]
    NotFound { kind: EntityKind, id: u32 },

    /// Seed data violated an entity invariant.
    #[error("Invalid seed: {message}")]
    InvalidSeed { message: String },
}

impl StoreError {
    /// Create a not-found error for a facility.
    pub fn facility_not_found(id: FacilityId) -> Self {
        Self::NotFound {
            kind: EntityKind::Facility,
            id: id.value(),
        }
    }

    /// Create a not-found error for a zone.
    pub fn zone_not_found(id: ZoneId) -> Self {
        Self::NotFound {
            kind: EntityKind::Zone,
            id: id.value(),
        }
    }

    /// Create an invalid-seed error.
    pub fn invalid_seed(message: impl Into<String>) -> Self {
        Self::InvalidSeed {
            message: message.into(),
        }
    }
}
