// ============================================================================
// Seed Data
// ============================================================================
//
// The engine always starts from a seed set: the built-in Delhi dataset or a
// JSON document in the same shape. Invariant checking happens once, in
// `GeoEntityStore::from_seed`, so both paths get the same scrutiny.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};

use crate::api::{
    CaseTrend, Facility, FacilityId, FacilityStatus, FacilityType, GeoPoint, OutbreakZone,
    Severity, ZoneId,
};

/// Complete startup dataset for the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SeedSet {
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub zones: Vec<OutbreakZone>,
    /// Initial value of the live facility display counter
    #[serde(default = "default_active_facility_count")]
    pub active_facility_count: u32,
    /// Initial value of the active alert counter
    #[serde(default = "default_active_alert_count")]
    pub active_alert_count: u32,
}

fn default_active_facility_count() -> u32 {
    248
}

fn default_active_alert_count() -> u32 {
    12
}

fn validate_input_seed(seed_json: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(seed_json).context("Invalid seed JSON")?;
    let has_facilities = value
        .as_object()
        .and_then(|obj| obj.get("facilities"))
        .is_some();
    if !has_facilities {
        anyhow::bail!("Missing required 'facilities' field");
    }
    Ok(())
}

/// Parse a seed set from a JSON string.
///
/// This deserializes the document using Serde. Entity invariants (bed
/// counts, coordinate ranges, unique ids) are deliberately not checked
/// here; `GeoEntityStore::from_seed` validates every seed the same way.
pub fn parse_seed_json_str(seed_json: &str) -> Result<SeedSet> {
    validate_input_seed(seed_json)?;

    let seed: SeedSet =
        serde_json::from_str(seed_json).context("Failed to deserialize seed JSON using Serde")?;

    Ok(seed)
}

/// The built-in Delhi dataset: five major hospitals and four outbreak
/// zones around the city center.
pub fn delhi_seed() -> SeedSet {
    let now = Utc::now();

    SeedSet {
        facilities: vec![
            Facility {
                id: FacilityId::new(1),
                name: "AIIMS Delhi".to_string(),
                address: "AIIMS Campus, Ansari Nagar, New Delhi".to_string(),
                phone: "+91-11-2658-8500".to_string(),
                coordinates: GeoPoint {
                    latitude: 28.5672,
                    longitude: 77.2100,
                },
                kind: FacilityType::Government,
                specialties: vec![
                    "Cardiology".to_string(),
                    "Neurology".to_string(),
                    "Oncology".to_string(),
                    "Emergency".to_string(),
                ],
                bed_capacity: 2478,
                beds_available: 142,
                rating: 4.5,
                status: FacilityStatus::Operational,
            },
            Facility {
                id: FacilityId::new(2),
                name: "Safdarjung Hospital".to_string(),
                address: "Ring Road, Safdarjung Enclave, New Delhi".to_string(),
                phone: "+91-11-2670-6123".to_string(),
                coordinates: GeoPoint {
                    latitude: 28.5694,
                    longitude: 77.2086,
                },
                kind: FacilityType::Government,
                specialties: vec![
                    "Emergency".to_string(),
                    "General Medicine".to_string(),
                    "Surgery".to_string(),
                ],
                bed_capacity: 1500,
                beds_available: 89,
                rating: 4.2,
                status: FacilityStatus::Operational,
            },
            Facility {
                id: FacilityId::new(3),
                name: "Apollo Hospital".to_string(),
                address: "Press Enclave Road, Sarita Vihar, Delhi".to_string(),
                phone: "+91-11-2692-5858".to_string(),
                coordinates: GeoPoint {
                    latitude: 28.5425,
                    longitude: 77.2676,
                },
                kind: FacilityType::Private,
                specialties: vec![
                    "Cardiology".to_string(),
                    "Transplant".to_string(),
                    "Cancer Care".to_string(),
                ],
                bed_capacity: 695,
                beds_available: 23,
                rating: 4.8,
                status: FacilityStatus::Operational,
            },
            Facility {
                id: FacilityId::new(4),
                name: "Fortis Hospital Noida".to_string(),
                address: "B-22, Sector 62, Noida".to_string(),
                phone: "+91-120-247-2222".to_string(),
                coordinates: GeoPoint {
                    latitude: 28.5355,
                    longitude: 77.2150,
                },
                kind: FacilityType::Private,
                specialties: vec![
                    "Orthopedics".to_string(),
                    "Neurosurgery".to_string(),
                    "Pediatrics".to_string(),
                ],
                bed_capacity: 525,
                beds_available: 67,
                rating: 4.6,
                status: FacilityStatus::Operational,
            },
            Facility {
                id: FacilityId::new(5),
                name: "Max Hospital Saket".to_string(),
                address: "1-2 Press Enclave Road, Saket, New Delhi".to_string(),
                phone: "+91-11-2651-5050".to_string(),
                coordinates: GeoPoint {
                    latitude: 28.5244,
                    longitude: 77.2177,
                },
                kind: FacilityType::Private,
                specialties: vec![
                    "Cardiac Surgery".to_string(),
                    "Oncology".to_string(),
                    "Transplant".to_string(),
                ],
                bed_capacity: 400,
                beds_available: 12,
                rating: 4.7,
                status: FacilityStatus::Operational,
            },
        ],
        zones: vec![
            OutbreakZone {
                id: ZoneId::new(1),
                disease: "Dengue".to_string(),
                center: GeoPoint {
                    latitude: 28.6000,
                    longitude: 77.2200,
                },
                radius_meters: 3000.0,
                severity: Severity::High,
                case_count: 145,
                trend: CaseTrend::Increasing,
                last_updated: now - Duration::hours(2),
            },
            OutbreakZone {
                id: ZoneId::new(2),
                disease: "Chikungunya".to_string(),
                center: GeoPoint {
                    latitude: 28.5500,
                    longitude: 77.2400,
                },
                radius_meters: 2500.0,
                severity: Severity::Medium,
                case_count: 67,
                trend: CaseTrend::Stable,
                last_updated: now - Duration::hours(4),
            },
            OutbreakZone {
                id: ZoneId::new(3),
                disease: "Malaria".to_string(),
                center: GeoPoint {
                    latitude: 28.5800,
                    longitude: 77.1800,
                },
                radius_meters: 2000.0,
                severity: Severity::Low,
                case_count: 23,
                trend: CaseTrend::Decreasing,
                last_updated: now - Duration::hours(6),
            },
            OutbreakZone {
                id: ZoneId::new(4),
                disease: "COVID-19 Cluster".to_string(),
                center: GeoPoint {
                    latitude: 28.6200,
                    longitude: 77.2500,
                },
                radius_meters: 1500.0,
                severity: Severity::Medium,
                case_count: 34,
                trend: CaseTrend::Stable,
                last_updated: now - Duration::hours(1),
            },
        ],
        active_facility_count: default_active_facility_count(),
        active_alert_count: default_active_alert_count(),
    }
}
