//! Public API surface for the overlay engine.
//!
//! This file consolidates the entity and payload types shared across the
//! engine. All types derive Serialize/Deserialize so frames can cross the
//! process boundary as JSON when the rendering layer wants them that way.

pub use crate::adapter::EntityKind;
pub use crate::adapter::MapEvent;
pub use crate::services::overlay::FacilityMarker;
pub use crate::services::overlay::MapFrame;
pub use crate::services::overlay::ZoneOverlay;
pub use crate::services::overlay::ZoneStyle;
pub use crate::services::selection::SelectionDetail;

use serde::{Deserialize, Serialize};

/// Healthcare facility identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FacilityId(pub u32);

/// Outbreak zone identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl FacilityId {
    pub fn new(value: u32) -> Self {
        FacilityId(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl ZoneId {
    pub fn new(value: u32) -> Self {
        ZoneId(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FacilityId> for u32 {
    fn from(id: FacilityId) -> Self {
        id.0
    }
}

impl From<ZoneId> for u32 {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

/// Geographic point (latitude, longitude).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Facility ownership category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityType {
    Government,
    Private,
}

/// Operational status of a facility.
///
/// Degraded and closed facilities stay listed but are excluded from the
/// live bed aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityStatus {
    Operational,
    Degraded,
    Closed,
}

/// Outbreak severity. Ordering is Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Direction of the recent case-count movement in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Healthcare facility (hospital, clinic).
///
/// Only `beds_available` mutates after creation; everything else is fixed
/// reference data from the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    /// Street address shown in the detail panel
    pub address: String,
    /// Contact phone number
    pub phone: String,
    pub coordinates: GeoPoint,
    /// Ownership category (drives the marker color)
    #[serde(rename = "type")]
    pub kind: FacilityType,
    /// Medical specialties in display order
    pub specialties: Vec<String>,
    /// Total staffed beds
    pub bed_capacity: u32,
    /// Currently free beds, always within [0, bed_capacity]
    pub beds_available: u32,
    /// Public rating on a 0 to 5 scale
    pub rating: f64,
    pub status: FacilityStatus,
}

/// Disease outbreak zone rendered as a circular overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutbreakZone {
    pub id: ZoneId,
    /// Disease name (e.g. "Dengue")
    pub disease: String,
    /// Center of the affected area
    pub center: GeoPoint,
    /// Affected radius in meters, strictly positive
    pub radius_meters: f64,
    pub severity: Severity,
    /// Reported case count; 0 means the zone is resolved
    pub case_count: u32,
    pub trend: CaseTrend,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl OutbreakZone {
    /// A zone with no remaining cases stays on the map but loses its
    /// severity color.
    pub fn is_resolved(&self) -> bool {
        self.case_count == 0
    }
}

/// Current selection on the map. Derived UI state, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Facility(FacilityId),
    Zone(ZoneId),
}

/// Dashboard aggregates shown alongside the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateCounters {
    /// Display counter random-walked by the live feed, floored at 0
    pub active_facility_count: u32,
    /// Display counter for active alerts
    pub active_alert_count: u32,
    /// Sum of beds_available over operational facilities, computed at read
    pub total_available_beds: u32,
    pub last_update: chrono::DateTime<chrono::Utc>,
}
