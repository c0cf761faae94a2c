use healthmap_engine::adapter::{MapAdapter, MapEvent};
use healthmap_engine::api::{
    CaseTrend, Facility, FacilityId, FacilityStatus, FacilityType, GeoPoint, MapFrame, Selection,
    SelectionDetail, ZoneId,
};
use healthmap_engine::config::{ConfigError, EngineConfig};
use healthmap_engine::models::seed::{parse_seed_json_str, SeedSet};
use healthmap_engine::services::boundary::METERS_PER_DEGREE_LONGITUDE;
use healthmap_engine::store::{GeoEntityStore, StoreError};
use healthmap_engine::{EngineError, OverlayEngine};

fn delhi_engine() -> OverlayEngine {
    OverlayEngine::with_delhi_seed(EngineConfig::default()).unwrap()
}

fn single_facility_seed(capacity: u32, available: u32) -> SeedSet {
    SeedSet {
        facilities: vec![Facility {
            id: FacilityId::new(1),
            name: "City Hospital".to_string(),
            address: "1 Hospital Road".to_string(),
            phone: "+91-00-0000-0000".to_string(),
            coordinates: GeoPoint::new(28.60, 77.20).unwrap(),
            kind: FacilityType::Government,
            specialties: vec!["Emergency".to_string()],
            bed_capacity: capacity,
            beds_available: available,
            rating: 4.0,
            status: FacilityStatus::Operational,
        }],
        zones: vec![],
        active_facility_count: 1,
        active_alert_count: 0,
    }
}

struct RecordingAdapter {
    frames: Vec<MapFrame>,
}

impl MapAdapter for RecordingAdapter {
    fn render(&mut self, frame: &MapFrame) {
        self.frames.push(frame.clone());
    }
}

#[test]
fn test_dengue_ring_end_to_end() {
    let engine = delhi_engine();
    let frame = engine.frame().unwrap();

    // Highest severity paints first in the overlay list.
    let dengue = &frame.zones[0];
    assert_eq!(dengue.zone.disease, "Dengue");
    assert_eq!(dengue.style.color, "#ef4444");
    assert_eq!(dengue.weight, 2);

    // 80 segments plus the closing vertex.
    assert_eq!(dengue.ring.len(), 81);
    assert_eq!(dengue.ring.first(), dengue.ring.last());

    // The sweep starts due east of the center.
    let first = dengue.ring[0];
    assert!((first.latitude - 28.60).abs() < 1e-12);
    let expected_lng = 77.22 + 3000.0 / METERS_PER_DEGREE_LONGITUDE;
    assert!((first.longitude - expected_lng).abs() < 1e-12);
}

#[test]
fn test_bed_saturation_end_to_end() {
    let engine = OverlayEngine::new(single_facility_seed(100, 5), EngineConfig::default()).unwrap();

    let updated = engine
        .store()
        .apply_bed_delta(FacilityId::new(1), -10)
        .unwrap();
    assert_eq!(updated, 0);

    let frame = engine.frame().unwrap();
    assert_eq!(frame.facilities[0].facility.beds_available, 0);
    assert_eq!(frame.counters.total_available_beds, 0);

    // The floor is not sticky; beds can come back.
    let restored = engine
        .store()
        .apply_bed_delta(FacilityId::new(1), 3)
        .unwrap();
    assert_eq!(restored, 3);
}

#[test]
fn test_selection_lifecycle_through_events() {
    let mut engine = delhi_engine();

    assert_eq!(engine.selection(), Selection::None);
    assert!(engine.selection_detail().is_none());

    engine.dispatch(MapEvent::facility(3));
    match engine.selection_detail() {
        Some(SelectionDetail::Facility(f)) => assert_eq!(f.name, "Apollo Hospital"),
        other => panic!("expected facility detail, got {:?}", other),
    }

    // Same event again toggles the selection off.
    engine.dispatch(MapEvent::facility(3));
    assert_eq!(engine.selection(), Selection::None);

    // A zone replaces a facility outright.
    engine.dispatch(MapEvent::facility(1));
    engine.dispatch(MapEvent::zone(2));
    assert_eq!(engine.selection(), Selection::Zone(ZoneId::new(2)));
    match engine.selection_detail() {
        Some(SelectionDetail::Zone(z)) => assert_eq!(z.disease, "Chikungunya"),
        other => panic!("expected zone detail, got {:?}", other),
    }

    engine.clear_selection();
    assert_eq!(engine.selection(), Selection::None);
}

#[test]
fn test_stale_selection_yields_no_detail() {
    let mut engine = delhi_engine();

    engine.dispatch(MapEvent::facility(999));
    assert_eq!(engine.selection(), Selection::Facility(FacilityId::new(999)));
    assert!(engine.selection_detail().is_none());

    // The frame still composes and carries the stale selection.
    let frame = engine.frame().unwrap();
    assert_eq!(frame.selection, Selection::Facility(FacilityId::new(999)));
    assert!(frame.detail.is_none());
}

#[test]
fn test_frames_flow_through_adapter() {
    let mut engine = delhi_engine();
    let mut adapter = RecordingAdapter { frames: vec![] };

    engine.render_to(&mut adapter).unwrap();
    engine.dispatch(MapEvent::facility(1));
    engine.render_to(&mut adapter).unwrap();

    assert_eq!(adapter.frames.len(), 2);
    assert_eq!(adapter.frames[0].selection, Selection::None);
    assert_eq!(
        adapter.frames[1].selection,
        Selection::Facility(FacilityId::new(1))
    );
    // Both frames carry the full entity set regardless of selection.
    assert_eq!(adapter.frames[0].zones.len(), 4);
    assert_eq!(adapter.frames[1].zones.len(), 4);
}

#[test]
fn test_unknown_entity_lookups_error() {
    let store = GeoEntityStore::with_delhi_seed().unwrap();

    let missing_facility = store.get_facility(FacilityId::new(404));
    assert!(matches!(
        missing_facility,
        Err(StoreError::NotFound { id: 404, .. })
    ));

    let missing_zone = store.get_zone(ZoneId::new(404));
    assert!(missing_zone.is_err());

    let missing_delta = store.apply_bed_delta(FacilityId::new(404), 1);
    assert!(missing_delta.is_err());
}

#[test]
fn test_engine_from_json_seed() {
    let json = serde_json::to_string(&single_facility_seed(40, 15)).unwrap();
    let seed = parse_seed_json_str(&json).unwrap();

    let engine = OverlayEngine::new(seed, EngineConfig::default()).unwrap();
    let frame = engine.frame().unwrap();

    assert_eq!(frame.facilities.len(), 1);
    assert_eq!(frame.facilities[0].facility.name, "City Hospital");
    assert_eq!(frame.counters.total_available_beds, 15);
}

#[test]
fn test_invalid_seed_rejected_at_engine_construction() {
    // beds_available above capacity never reaches the store.
    let result = OverlayEngine::new(single_facility_seed(10, 11), EngineConfig::default());
    assert!(matches!(
        result,
        Err(EngineError::Store(StoreError::InvalidSeed { .. }))
    ));
}

#[test]
fn test_invalid_config_rejected_at_engine_construction() {
    // An inverted delta range must fail here, not inside the tick task.
    let mut config = EngineConfig::default();
    config.engine.random_delta_range = (3, -3);

    let result = OverlayEngine::new(single_facility_seed(10, 5), config);
    assert!(matches!(
        result,
        Err(EngineError::Config(ConfigError::Invalid(_)))
    ));
}

#[test]
fn test_configured_ring_resolution_flows_into_frames() {
    let config: EngineConfig = toml::from_str(
        r#"
[engine]
circle_resolution_steps = 12
"#,
    )
    .unwrap();

    let engine = OverlayEngine::with_delhi_seed(config).unwrap();
    let frame = engine.frame().unwrap();

    for overlay in &frame.zones {
        assert_eq!(overlay.ring.len(), 13);
    }
}

#[test]
fn test_configured_palette_flows_into_frames() {
    let config: EngineConfig = toml::from_str(
        r##"
[severity_colors]
high = "#aa0000"
"##,
    )
    .unwrap();

    let engine = OverlayEngine::with_delhi_seed(config).unwrap();
    let frame = engine.frame().unwrap();

    assert_eq!(frame.zones[0].style.color, "#aa0000");
    // Untouched levels keep their defaults.
    let malaria = frame.zones.iter().find(|z| z.zone.disease == "Malaria").unwrap();
    assert_eq!(malaria.style.color, "#10b981");
}

#[test]
fn test_zone_refresh_reaches_next_frame() {
    let engine = delhi_engine();

    engine
        .store()
        .refresh_zone(ZoneId::new(3), 0, CaseTrend::Decreasing, chrono::Utc::now())
        .unwrap();

    let frame = engine.frame().unwrap();
    let malaria = frame.zones.iter().find(|z| z.zone.id == ZoneId::new(3)).unwrap();
    assert!(malaria.zone.is_resolved());
    assert_eq!(malaria.style.color, "#6b7280");
}
