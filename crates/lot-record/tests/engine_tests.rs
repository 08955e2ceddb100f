//! End-to-end tests: catch input → LOT ID → record → export.

use chrono::NaiveDate;
use proptest::prelude::*;
use std::sync::Arc;

use lot_core::{
    CatchInput, CounterScope, EngineConfig, LotError, LotPattern, MemoryCounterStore,
    SpeciesCatalog, VesselConfig,
};
use lot_out::ExportTarget;
use lot_record::{build, TraceabilityEngine};

fn vessel() -> VesselConfig {
    VesselConfig::new("HRV000123456", "ZD-123", "HRVLOG1234567890123")
        .with_gear("GNS")
        .with_vessel_name("Sv. Nikola")
}

fn jan6() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()
}

fn sea_bass(kg: f64) -> CatchInput {
    let species = SpeciesCatalog::adriatic().get("BSS").unwrap().clone();
    CatchInput::by_weight(species, vessel(), "37.2.1", jan6(), kg)
        .with_pattern(LotPattern::WithDate)
}

fn octopus(count: u32) -> CatchInput {
    let species = SpeciesCatalog::adriatic().get("OCC").unwrap().clone();
    CatchInput::by_units(species, vessel(), "37.1.3", jan6(), count)
        .with_pattern(LotPattern::WithCounter)
}

#[test]
fn test_sea_bass_scenario() {
    let engine = TraceabilityEngine::default();
    let created = engine.create_lot(&sea_bass(25.5)).unwrap();
    let record = &created.record;

    assert_eq!(record.lot_id, "HRVLOG1234567890123-BSS-20260106");
    assert_eq!(record.fishing.catch_date_display(), "06/01/2026");
    assert_eq!(record.production_area.description, "Jadransko more - srednji dio");
    assert_eq!(record.vessel.vessel_name.as_deref(), Some("Sv. Nikola"));
    assert!(engine.validate(record).valid);

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["fishing"]["catch_date"], "06/01/2026");
    assert_eq!(json["quantity"]["quantity_type"], "WEIGHT");
    assert!(json["quantity"]["unit_count"].is_null());
    assert_eq!(json["metadata"]["compliance_standard"], "EU_2023_2842");
}

#[test]
fn test_sea_bass_zero_weight() {
    let engine = TraceabilityEngine::default();
    let err = engine.create_lot(&sea_bass(0.0)).unwrap_err();

    assert_eq!(err.code(), "VALIDATION");
    assert_eq!(err.messages(), vec!["Net weight must be greater than 0 kg"]);
}

#[test]
fn test_undersized_exceeding_weight() {
    let input = sea_bass(10.0).with_undersized_weight(12.0);
    let err = build("HRVLOG1234567890123-BSS-20260106", &input).unwrap_err();
    assert!(err.messages()[0].contains("cannot exceed total"));
}

#[test]
fn test_units_scenario_with_undersized() {
    let engine = TraceabilityEngine::default();

    let created = engine.create_lot(&octopus(50).with_undersized_units(5)).unwrap();
    assert_eq!(created.record.lot_id, "HRVLOG1234567890123-OCC-001");
    assert_eq!(created.record.quantity.measure.undersized_unit_count(), Some(5));
    assert!(!created.report.exempt_eligible);

    let err = engine.create_lot(&octopus(50).with_undersized_units(60)).unwrap_err();
    assert!(err.messages()[0].contains("cannot exceed total"));
}

#[test]
fn test_small_catch_reports_exemption() {
    let engine = TraceabilityEngine::default();
    let created = engine.create_lot(&sea_bass(6.0)).unwrap();
    assert!(created.report.exempt_eligible);
    assert!(created.report.warnings.iter().any(|w| w.starts_with("Article 58.8")));
}

#[test]
fn test_prerequisites_surface_before_building() {
    let engine = TraceabilityEngine::default();
    let mut input = sea_bass(20.0);
    input.vessel.logbook_number = "HRV-123".to_string();
    input.vessel.cfr_number.clear();

    match engine.create_lot(&input).unwrap_err() {
        LotError::Prerequisite(e) => assert_eq!(e.violations.len(), 2),
        other => panic!("expected prerequisite error, got {}", other),
    }
}

#[test]
fn test_export_registered_lot() {
    let engine = TraceabilityEngine::default();
    let created = engine.create_lot(&sea_bass(25.5)).unwrap();

    let csv = engine.export(&created.record.lot_id, ExportTarget::Csv).unwrap();
    assert_eq!(csv.lines().count(), 2);

    let text = engine
        .export(&created.record.lot_id, ExportTarget::HumanReadable)
        .unwrap();
    assert!(text.starts_with("LOT HRVLOG1234567890123-BSS-20260106"));

    engine.create_lot(&octopus(12)).unwrap();
    assert_eq!(engine.export_batch_csv().lines().count(), 3);
}

#[test]
fn test_engine_from_config() {
    let config = EngineConfig::from_yaml(
        r#"
counter_scope: simple
default_pattern:
  pattern: CUSTOM
  template: "{LOGBOOK}-{SPECIES}-{COUNTER}"
profile: basic
"#,
    )
    .unwrap();
    let store = Arc::new(MemoryCounterStore::new());
    let engine = TraceabilityEngine::from_config(&config, store).unwrap();

    let mut input = sea_bass(20.0);
    input.lot_pattern = None;
    input.product_form = Some("FRESH".to_string());

    let created = engine.create_lot(&input).unwrap();
    assert_eq!(created.record.lot_id, "HRVLOG1234567890123-BSS-001");
    assert_eq!(created.report.profile, "basic@1.0");
    assert_eq!(config.counter_scope, CounterScope::Simple);
}

#[test]
fn test_counter_lots_on_consecutive_days() {
    let engine = TraceabilityEngine::default();
    let day6 = engine.create_lot(&octopus(10)).unwrap();

    let mut next_day = octopus(14);
    next_day.catch_date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
    let day7 = engine.create_lot(&next_day).unwrap();

    assert_eq!(day6.record.lot_id, "HRVLOG1234567890123-OCC-001");
    assert_eq!(day7.record.lot_id, "HRVLOG1234567890123-OCC-002");
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.daily_stats(next_day.catch_date).count, 1);
}

#[test]
fn test_export_templates_from_config() {
    let file = format!("lot-export-templates-{}.yaml", std::process::id());
    let path = std::env::temp_dir().join(file);
    std::fs::write(
        &path,
        r#"
version: "1.0"
templates:
  human_readable:
    description: Shelf label
    template: "{{lot_id}} | {{local_name}} | {{net_weight_kg}} kg"
"#,
    )
    .unwrap();

    let config = EngineConfig {
        export_templates: Some(path.to_string_lossy().into_owned()),
        ..EngineConfig::default()
    };
    let engine = TraceabilityEngine::in_memory(&config).unwrap();
    let created = engine.create_lot(&sea_bass(25.5)).unwrap();

    let label = engine
        .export(&created.record.lot_id, ExportTarget::HumanReadable)
        .unwrap();
    assert_eq!(label, "HRVLOG1234567890123-BSS-20260106 | Lubin | 25.5 kg");

    let err = engine.export(&created.record.lot_id, ExportTarget::Xml).unwrap_err();
    assert_eq!(err.code(), "CONFIG");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_templates_file_is_config_error() {
    let config = EngineConfig {
        export_templates: Some("/nonexistent/lot-templates.yaml".to_string()),
        ..EngineConfig::default()
    };
    let err = TraceabilityEngine::in_memory(&config).unwrap_err();
    assert_eq!(err.code(), "CONFIG");
}

#[test]
fn test_unknown_profile_in_config() {
    let config = EngineConfig::from_yaml("profile: lenient").unwrap();
    let err = TraceabilityEngine::in_memory(&config).unwrap_err();
    assert_eq!(err.code(), "CONFIG");
}

proptest! {
    #[test]
    fn prop_valid_weight_inputs_build(kg in 0.01f64..5_000.0, zone in 0usize..7) {
        let zone = lot_core::reference::CROATIAN_FAO_ZONES[zone].code;
        let species = SpeciesCatalog::adriatic().get("HKE").unwrap().clone();
        let input = CatchInput::by_weight(species, vessel(), zone, jan6(), kg);

        let record = build("HRVLOG1234567890123-HKE", &input).unwrap();
        prop_assert!(lot_quality::validate(&record).valid);
        prop_assert_eq!(record.quantity.measure.unit_count(), None);
        prop_assert_eq!(record.quantity.measure.net_weight_kg(), Some(kg));
    }
}
