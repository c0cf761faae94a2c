//! In-memory geographic entity store.
//!
//! This module is the single source of truth for facilities, zones, and
//! the dashboard aggregates. It follows the same shape as the rest of the
//! engine's shared state: a cheaply cloneable handle over one
//! `parking_lot::RwLock`, with every operation taking the lock exactly
//! once so readers observe an entity either before or after a mutation,
//! never mid-write.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::{
    AggregateCounters, CaseTrend, Facility, FacilityId, FacilityStatus, GeoPoint, OutbreakZone,
    ZoneId,
};
use crate::models::seed::{delhi_seed, SeedSet};

pub mod error;

pub use error::{StoreError, StoreResult};

/// Entity data behind the store lock.
///
/// Entities live in vectors so listing preserves seed order; the id maps
/// only hold indices into them.
struct StoreData {
    facilities: Vec<Facility>,
    facility_index: HashMap<FacilityId, usize>,
    zones: Vec<OutbreakZone>,
    zone_index: HashMap<ZoneId, usize>,
    active_facility_count: u32,
    active_alert_count: u32,
    last_update: DateTime<Utc>,
}

/// One consistent cut of the store, taken under a single lock
/// acquisition. Frame composition works from this so a concurrent tick
/// can never land between the entity lists and the counters.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub facilities: Vec<Facility>,
    pub zones: Vec<OutbreakZone>,
    pub counters: AggregateCounters,
}

/// Cloneable handle to the in-memory entity store.
#[derive(Clone)]
pub struct GeoEntityStore {
    data: Arc<RwLock<StoreData>>,
}

impl GeoEntityStore {
    /// Build a store from a seed set, validating every entity invariant.
    pub fn from_seed(seed: SeedSet) -> StoreResult<Self> {
        validate_seed(&seed)?;

        let facility_index = seed
            .facilities
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();
        let zone_index = seed
            .zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.id, i))
            .collect();

        Ok(Self {
            data: Arc::new(RwLock::new(StoreData {
                facilities: seed.facilities,
                facility_index,
                zones: seed.zones,
                zone_index,
                active_facility_count: seed.active_facility_count,
                active_alert_count: seed.active_alert_count,
                last_update: Utc::now(),
            })),
        })
    }

    /// Build a store from the built-in Delhi dataset.
    pub fn with_delhi_seed() -> StoreResult<Self> {
        Self::from_seed(delhi_seed())
    }

    /// All facilities in seed order.
    pub fn list_facilities(&self) -> Vec<Facility> {
        self.data.read().facilities.clone()
    }

    /// All zones in seed order.
    pub fn list_zones(&self) -> Vec<OutbreakZone> {
        self.data.read().zones.clone()
    }

    /// Look up a facility by id.
    pub fn get_facility(&self, id: FacilityId) -> StoreResult<Facility> {
        let data = self.data.read();
        data.facility_index
            .get(&id)
            .map(|&i| data.facilities[i].clone())
            .ok_or_else(|| StoreError::facility_not_found(id))
    }

    /// Look up a zone by id.
    pub fn get_zone(&self, id: ZoneId) -> StoreResult<OutbreakZone> {
        let data = self.data.read();
        data.zone_index
            .get(&id)
            .map(|&i| data.zones[i].clone())
            .ok_or_else(|| StoreError::zone_not_found(id))
    }

    /// Apply a signed delta to a facility's available beds and return the
    /// new value.
    ///
    /// The result saturates into `[0, bed_capacity]`; hitting either bound
    /// is normal operation, not an error. Nothing else on the facility
    /// changes.
    pub fn apply_bed_delta(&self, id: FacilityId, delta: i64) -> StoreResult<u32> {
        let mut data = self.data.write();
        let idx = *data
            .facility_index
            .get(&id)
            .ok_or_else(|| StoreError::facility_not_found(id))?;

        let facility = &mut data.facilities[idx];
        let capacity = i64::from(facility.bed_capacity);
        let updated = i64::from(facility.beds_available)
            .saturating_add(delta)
            .clamp(0, capacity);
        facility.beds_available = updated as u32;

        Ok(facility.beds_available)
    }

    /// One live-feed tick: shift the active-facility display counter
    /// (floored at 0) and stamp the update time. No entity data moves.
    pub fn apply_live_tick(&self, delta: i64, now: DateTime<Utc>) {
        let mut data = self.data.write();
        let updated = i64::from(data.active_facility_count)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        data.active_facility_count = updated as u32;
        data.last_update = now;
    }

    /// Update the refreshable fields of a zone (case count, trend, update
    /// time). The geometry and severity of a zone are fixed at seed time.
    pub fn refresh_zone(
        &self,
        id: ZoneId,
        case_count: u32,
        trend: CaseTrend,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut data = self.data.write();
        let idx = *data
            .zone_index
            .get(&id)
            .ok_or_else(|| StoreError::zone_not_found(id))?;

        let zone = &mut data.zones[idx];
        zone.case_count = case_count;
        zone.trend = trend;
        zone.last_updated = now;

        Ok(())
    }

    /// Aggregate snapshot.
    ///
    /// The bed total is derived here rather than stored, so it can never
    /// drift from the per-facility values. Facilities that are not
    /// operational keep their entities but drop out of the total.
    pub fn counters(&self) -> AggregateCounters {
        counters_of(&self.data.read())
    }

    /// Everything a frame needs, in one consistent cut.
    pub fn snapshot(&self) -> StoreSnapshot {
        let data = self.data.read();
        StoreSnapshot {
            facilities: data.facilities.clone(),
            zones: data.zones.clone(),
            counters: counters_of(&data),
        }
    }
}

fn counters_of(data: &StoreData) -> AggregateCounters {
    let total_available_beds = data
        .facilities
        .iter()
        .filter(|f| f.status == FacilityStatus::Operational)
        .map(|f| f.beds_available)
        .sum();

    AggregateCounters {
        active_facility_count: data.active_facility_count,
        active_alert_count: data.active_alert_count,
        total_available_beds,
        last_update: data.last_update,
    }
}

fn validate_seed(seed: &SeedSet) -> StoreResult<()> {
    let mut facility_ids = HashSet::new();
    for facility in &seed.facilities {
        if !facility_ids.insert(facility.id) {
            return Err(StoreError::invalid_seed(format!(
                "duplicate facility id {}",
                facility.id
            )));
        }
        GeoPoint::new(facility.coordinates.latitude, facility.coordinates.longitude).map_err(
            |e| StoreError::invalid_seed(format!("facility {}: {}", facility.id, e)),
        )?;
        if facility.beds_available > facility.bed_capacity {
            return Err(StoreError::invalid_seed(format!(
                "facility {}: beds_available {} exceeds bed_capacity {}",
                facility.id, facility.beds_available, facility.bed_capacity
            )));
        }
        if !(0.0..=5.0).contains(&facility.rating) {
            return Err(StoreError::invalid_seed(format!(
                "facility {}: rating {} outside the 0 to 5 scale",
                facility.id, facility.rating
            )));
        }
    }

    let mut zone_ids = HashSet::new();
    for zone in &seed.zones {
        if !zone_ids.insert(zone.id) {
            return Err(StoreError::invalid_seed(format!(
                "duplicate zone id {}",
                zone.id
            )));
        }
        GeoPoint::new(zone.center.latitude, zone.center.longitude)
            .map_err(|e| StoreError::invalid_seed(format!("zone {}: {}", zone.id, e)))?;
        if !zone.radius_meters.is_finite() || zone.radius_meters <= 0.0 {
            return Err(StoreError::invalid_seed(format!(
                "zone {}: radius must be positive, got {}",
                zone.id, zone.radius_meters
            )));
        }
    }

    Ok(())
}
