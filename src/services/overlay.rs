//! Map frame composition.
//!
//! Gathers one store snapshot into a single renderable payload: facility
//! markers, zone overlays with their derived boundary rings, the current
//! selection with its detail, and the aggregate counters. Rings and
//! colors are derived here on every composition and never stored.

use serde::{Deserialize, Serialize};

use crate::api::{AggregateCounters, Facility, GeoPoint, OutbreakZone, Selection};
use crate::services::boundary::{circle_ring, GeometryError};
use crate::services::selection::SelectionDetail;
use crate::services::severity::{facility_marker_color, severity_weight, SeverityPalette};
use crate::store::StoreSnapshot;

/// Fill opacity for zone overlays.
const ZONE_FILL_OPACITY: f64 = 0.2;
/// Stroke width for zone outlines.
const ZONE_LINE_WIDTH: f64 = 2.0;
/// Stroke opacity for zone outlines.
const ZONE_LINE_OPACITY: f64 = 0.8;

/// One facility marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMarker {
    pub facility: Facility,
    /// Marker color token derived from the ownership category
    pub color: String,
}

/// Rendering hints for one zone overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStyle {
    pub color: String,
    pub fill_opacity: f64,
    pub line_width: f64,
    pub line_opacity: f64,
}

/// One zone overlay with its derived boundary ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneOverlay {
    pub zone: OutbreakZone,
    /// Closed polygon ring approximating the zone circle
    pub ring: Vec<GeoPoint>,
    pub style: ZoneStyle,
    /// Severity sort weight; overlays are ordered by it, highest first
    pub weight: u8,
}

/// One composed render payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFrame {
    pub facilities: Vec<FacilityMarker>,
    pub zones: Vec<ZoneOverlay>,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<SelectionDetail>,
    pub counters: AggregateCounters,
}

/// Compose a frame from a store snapshot.
///
/// Zone overlays come out ordered by severity weight, highest first, so
/// the most severe zones paint on top; zones of equal severity keep seed
/// order. The selection detail is resolved against the same snapshot,
/// and a selection pointing at an unknown id simply resolves to no
/// detail.
pub fn compute_map_frame(
    snapshot: StoreSnapshot,
    selection: Selection,
    palette: &SeverityPalette,
    ring_steps: u32,
) -> Result<MapFrame, GeometryError> {
    let detail = resolve_detail(&snapshot, selection);

    let facilities = snapshot
        .facilities
        .into_iter()
        .map(|facility| {
            let color = facility_marker_color(facility.kind).to_string();
            FacilityMarker { facility, color }
        })
        .collect();

    let mut zones = Vec::with_capacity(snapshot.zones.len());
    for zone in snapshot.zones {
        let ring = circle_ring(zone.center, zone.radius_meters, ring_steps)?;
        let style = ZoneStyle {
            color: palette.zone_color(&zone).to_string(),
            fill_opacity: ZONE_FILL_OPACITY,
            line_width: ZONE_LINE_WIDTH,
            line_opacity: ZONE_LINE_OPACITY,
        };
        let weight = severity_weight(zone.severity);
        zones.push(ZoneOverlay {
            zone,
            ring,
            style,
            weight,
        });
    }
    // Stable sort keeps seed order within a severity level.
    zones.sort_by_key(|overlay| std::cmp::Reverse(overlay.weight));

    Ok(MapFrame {
        facilities,
        zones,
        selection,
        detail,
        counters: snapshot.counters,
    })
}

fn resolve_detail(snapshot: &StoreSnapshot, selection: Selection) -> Option<SelectionDetail> {
    match selection {
        Selection::None => None,
        Selection::Facility(id) => snapshot
            .facilities
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .map(SelectionDetail::Facility),
        Selection::Zone(id) => snapshot
            .zones
            .iter()
            .find(|z| z.id == id)
            .cloned()
            .map(SelectionDetail::Zone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FacilityId, Severity, ZoneId};
    use crate::services::boundary::DEFAULT_RING_STEPS;
    use crate::store::GeoEntityStore;

    fn delhi_snapshot() -> StoreSnapshot {
        GeoEntityStore::with_delhi_seed().unwrap().snapshot()
    }

    fn default_frame(selection: Selection) -> MapFrame {
        compute_map_frame(
            delhi_snapshot(),
            selection,
            &SeverityPalette::default(),
            DEFAULT_RING_STEPS,
        )
        .unwrap()
    }

    #[test]
    fn test_frame_carries_all_entities() {
        let frame = default_frame(Selection::None);
        assert_eq!(frame.facilities.len(), 5);
        assert_eq!(frame.zones.len(), 4);
    }

    #[test]
    fn test_zones_ordered_by_severity_desc() {
        let frame = default_frame(Selection::None);

        let weights: Vec<u8> = frame.zones.iter().map(|z| z.weight).collect();
        assert_eq!(weights, vec![2, 1, 1, 0]);

        assert_eq!(frame.zones[0].zone.disease, "Dengue");
        assert_eq!(frame.zones[3].zone.disease, "Malaria");
        // Equal severities keep seed order.
        assert_eq!(frame.zones[1].zone.id, ZoneId::new(2));
        assert_eq!(frame.zones[2].zone.id, ZoneId::new(4));
    }

    #[test]
    fn test_zone_rings_are_closed_with_configured_resolution() {
        let frame = default_frame(Selection::None);
        for overlay in &frame.zones {
            assert_eq!(overlay.ring.len(), DEFAULT_RING_STEPS as usize + 1);
            assert_eq!(overlay.ring.first(), overlay.ring.last());
        }
    }

    #[test]
    fn test_zone_style_hints() {
        let frame = default_frame(Selection::None);
        let dengue = &frame.zones[0];

        assert_eq!(dengue.style.color, "#ef4444");
        assert_eq!(dengue.style.fill_opacity, 0.2);
        assert_eq!(dengue.style.line_width, 2.0);
        assert_eq!(dengue.style.line_opacity, 0.8);
    }

    #[test]
    fn test_marker_colors_follow_ownership() {
        let frame = default_frame(Selection::None);

        let aiims = &frame.facilities[0];
        assert_eq!(aiims.facility.name, "AIIMS Delhi");
        assert_eq!(aiims.color, "#3b82f6");

        let apollo = &frame.facilities[2];
        assert_eq!(apollo.facility.name, "Apollo Hospital");
        assert_eq!(apollo.color, "#10b981");
    }

    #[test]
    fn test_resolved_zone_loses_severity_color() {
        let store = GeoEntityStore::with_delhi_seed().unwrap();
        store
            .refresh_zone(
                ZoneId::new(1),
                0,
                crate::api::CaseTrend::Decreasing,
                chrono::Utc::now(),
            )
            .unwrap();

        let frame = compute_map_frame(
            store.snapshot(),
            Selection::None,
            &SeverityPalette::default(),
            DEFAULT_RING_STEPS,
        )
        .unwrap();

        let dengue = frame
            .zones
            .iter()
            .find(|z| z.zone.id == ZoneId::new(1))
            .unwrap();
        assert!(dengue.zone.is_resolved());
        assert_eq!(dengue.style.color, "#6b7280");
        // The recorded severity still drives the paint order.
        assert_eq!(dengue.zone.severity, Severity::High);
        assert_eq!(dengue.weight, 2);
    }

    #[test]
    fn test_selection_detail_in_frame() {
        let frame = default_frame(Selection::Facility(FacilityId::new(2)));

        assert_eq!(frame.selection, Selection::Facility(FacilityId::new(2)));
        match frame.detail {
            Some(SelectionDetail::Facility(ref f)) => {
                assert_eq!(f.name, "Safdarjung Hospital")
            }
            ref other => panic!("expected facility detail, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_selection_keeps_frame_usable() {
        let frame = default_frame(Selection::Zone(ZoneId::new(99)));

        assert_eq!(frame.selection, Selection::Zone(ZoneId::new(99)));
        assert!(frame.detail.is_none());
        assert_eq!(frame.zones.len(), 4);
    }

    #[test]
    fn test_counters_ride_along() {
        let frame = default_frame(Selection::None);
        assert_eq!(frame.counters.active_facility_count, 248);
        assert_eq!(frame.counters.active_alert_count, 12);
        assert_eq!(frame.counters.total_available_beds, 333);
    }

    #[test]
    fn test_invalid_resolution_propagates() {
        let result = compute_map_frame(
            delhi_snapshot(),
            Selection::None,
            &SeverityPalette::default(),
            2,
        );
        assert!(matches!(
            result,
            Err(GeometryError::InvalidResolution { steps: 2 })
        ));
    }

    #[test]
    fn test_frame_serializes() {
        let frame = default_frame(Selection::Facility(FacilityId::new(1)));
        let json = serde_json::to_string(&frame).unwrap();

        assert!(json.contains("\"AIIMS Delhi\""));
        assert!(json.contains("\"#ef4444\""));
        // Facility ownership serializes under the upstream field name.
        assert!(json.contains("\"type\":\"Government\""));
    }
}
