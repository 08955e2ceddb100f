//! Integration tests for every export target using the embedded templates.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use lot_core::{
    FishingInfo, ProductionArea, ProductionAreaType, Quantity, QuantityRecord, RecordMetadata,
    SpeciesRef, TraceabilityInfo, TraceabilityRecord, VesselRef,
};
use lot_out::csv::split_line;
use lot_out::{format, format_batch_csv, format_named, ExportTarget, CSV_HEADER};

fn sea_bass() -> TraceabilityRecord {
    TraceabilityRecord {
        lot_id: "HRVLOG1234567890123-BSS-20260106".to_string(),
        species: SpeciesRef {
            fao_code: "BSS".to_string(),
            scientific_name: "Dicentrarchus labrax".to_string(),
            local_name: "Lubin".to_string(),
        },
        production_area: ProductionArea {
            area_type: ProductionAreaType::FaoZone,
            fao_zone: "37.2.1".to_string(),
            description: "Jadransko more - srednji dio".to_string(),
        },
        fishing: FishingInfo {
            catch_date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            catch_time: NaiveTime::from_hms_opt(5, 45, 0),
            fishing_gear_category: "GNS".to_string(),
        },
        vessel: VesselRef {
            cfr_number: "HRV000123456".to_string(),
            registration_mark: "ZD-123".to_string(),
            logbook_number: "HRVLOG1234567890123".to_string(),
            vessel_name: Some("Sv. Nikola".to_string()),
        },
        quantity: QuantityRecord {
            measure: Quantity::Weight {
                net_weight_kg: 25.5,
                undersized_weight_kg: Some(1.5),
            },
            undersized_catch_present: true,
        },
        traceability: TraceabilityInfo {
            product_form: Some("FRESH".to_string()),
            purpose_phase: Some("HUMAN_CONSUMPTION".to_string()),
            destination: Some("Ribarnica \"Zadar\" & Co".to_string()),
        },
        metadata: RecordMetadata {
            created_timestamp: Utc.with_ymd_and_hms(2026, 1, 6, 9, 0, 0).unwrap(),
            record_version: "1.0".to_string(),
            compliance_standard: "EU_2023_2842".to_string(),
        },
    }
}

fn octopus_by_units() -> TraceabilityRecord {
    let mut record = sea_bass();
    record.lot_id = "HRVLOG1234567890123-OCC".to_string();
    record.species = SpeciesRef {
        fao_code: "OCC".to_string(),
        scientific_name: "Octopus vulgaris".to_string(),
        local_name: "Hobotnica".to_string(),
    };
    record.fishing.catch_time = None;
    record.vessel.vessel_name = None;
    record.quantity = QuantityRecord {
        measure: Quantity::Units {
            unit_count: 50,
            undersized_unit_count: None,
        },
        undersized_catch_present: false,
    };
    record.traceability = TraceabilityInfo::default();
    record
}

// =============================================================================
// CSV
// =============================================================================

#[test]
fn test_csv_row_has_nineteen_fields_in_header_order() {
    let csv = format(&sea_bass(), ExportTarget::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);

    assert_eq!(split_line(lines[0]), CSV_HEADER.to_vec());

    let row = split_line(lines[1]);
    assert_eq!(row.len(), 19);
    assert_eq!(row[0], "HRVLOG1234567890123-BSS-20260106");
    assert_eq!(row[1], "06/01/2026");
    assert_eq!(row[3], "Lubin");
    assert_eq!(row[4], "FAO_ZONE");
    assert_eq!(row[8], "25.5");
    assert_eq!(row[9], "");
    assert_eq!(row[13], "true");
    assert_eq!(row[14], "1.5");
    assert_eq!(row[18], "Ribarnica \"Zadar\" & Co");
}

#[test]
fn test_csv_quotes_are_doubled() {
    let csv = format(&sea_bass(), ExportTarget::Csv).unwrap();
    assert!(csv.contains(r#""Ribarnica ""Zadar"" & Co""#));
}

#[test]
fn test_batch_csv() {
    let csv = format_batch_csv(&[sea_bass(), octopus_by_units()]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);

    let units = split_line(lines[2]);
    assert_eq!(units[7], "UNITS");
    assert_eq!(units[8], "");
    assert_eq!(units[9], "50");
    assert_eq!(units[13], "false");
}

// =============================================================================
// XML
// =============================================================================

#[test]
fn test_generic_xml() {
    let xml = format(&sea_bass(), ExportTarget::Xml).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<traceability_record>"));
    assert!(xml.contains("<fao_zone>37.2.1</fao_zone>"));
    assert!(xml.contains("<catch_date>06/01/2026</catch_date>"));
    assert!(xml.contains("<catch_time>05:45</catch_time>"));
    assert!(xml.contains("<net_weight_kg>25.5</net_weight_kg>"));
    assert!(!xml.contains("<unit_count>"));
    assert!(xml.contains("<destination>Ribarnica &quot;Zadar&quot; &amp; Co</destination>"));
    assert!(xml.contains("<vessel_name>Sv. Nikola</vessel_name>"));
    assert!(xml.ends_with("</traceability_record>"));
}

#[test]
fn test_generic_xml_units_without_optionals() {
    let xml = format(&octopus_by_units(), ExportTarget::Xml).unwrap();
    assert!(xml.contains("<unit_count>50</unit_count>"));
    assert!(!xml.contains("<net_weight_kg>"));
    assert!(!xml.contains("<catch_time>"));
    assert!(!xml.contains("<vessel_name>"));
    assert!(!xml.contains("<product_form>"));
    assert!(xml.contains("<undersized_catch_present>false</undersized_catch_present>"));
    assert!(!xml.lines().any(|l| l.trim().is_empty()));
}

#[test]
fn test_authorities_xml_is_croatian() {
    let xml = format_named(&sea_bass(), "xml_authorities").unwrap();
    assert!(xml.contains("<zapis_sljedivosti uredba=\"EU 2023/2842\">"));
    assert!(xml.contains("<oznaka_lota>HRVLOG1234567890123-BSS-20260106</oznaka_lota>"));
    assert!(xml.contains("<hrvatski_naziv>Lubin</hrvatski_naziv>"));
    assert!(xml.contains("<opis>Jadransko more - srednji dio</opis>"));
    assert!(xml.contains("<ispod_minimalne_velicine>DA</ispod_minimalne_velicine>"));
    assert!(xml.contains("<masa_ispod_minimalne_kg>1.5</masa_ispod_minimalne_kg>"));
    assert!(xml.contains("<odrediste>Ribarnica &quot;Zadar&quot; &amp; Co</odrediste>"));
}

// =============================================================================
// Human readable and JSON
// =============================================================================

#[test]
fn test_human_readable() {
    let text = format(&sea_bass(), ExportTarget::HumanReadable).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "LOT HRVLOG1234567890123-BSS-20260106");
    assert_eq!(lines[1], "📅 Datum: 06/01/2026 05:45");
    assert_eq!(lines[2], "🐟 Vrsta: Lubin (BSS)");
    assert_eq!(lines[4], "⚖️ Težina: 25.5 kg");
    assert_eq!(lines[8], "⚠️ Ispod min.: Da (1.5 kg)");
    assert!(text.contains("🏪 Odredište: Ribarnica \"Zadar\" & Co"));
}

#[test]
fn test_human_readable_units() {
    let text = format(&octopus_by_units(), ExportTarget::HumanReadable).unwrap();
    assert!(text.contains("🔢 Količina: 50 kom"));
    assert!(text.contains("📅 Datum: 06/01/2026\n"));
    assert!(text.ends_with("⚠️ Ispod min.: Ne"));
}

#[test]
fn test_qr_content() {
    let text = format(&sea_bass(), ExportTarget::QrContent).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Naziv proizvoda: Lubin (Dicentrarchus labrax)",
            "LOT broj/serija: HRVLOG1234567890123-BSS-20260106",
            "Područje ulova: 37.2.1, Jadransko more - srednji dio",
            "Datum ulova: 06.01.2026.",
            "Kategorija ribolovnog alata: GNS",
            "Količina: 25.5 kg",
            "Plovilo: Sv. Nikola (HRV000123456)",
            "Odredište: Ribarnica \"Zadar\" & Co",
            "Datum izdavanja: 06.01.2026.",
        ]
    );
}

#[test]
fn test_qr_content_units_without_optional_lines() {
    let text = format(&octopus_by_units(), ExportTarget::QrContent).unwrap();
    assert!(text.contains("\nKoličina: 50 kom\n"));
    assert!(text.contains("\nPlovilo: (HRV000123456)\nDatum izdavanja: 06.01.2026."));
    assert!(!text.contains("Odredište"));
}

#[test]
fn test_json_is_pretty_record() {
    let json = format(&sea_bass(), ExportTarget::Json).unwrap();
    assert!(json.contains("\n  \"lot_id\": \"HRVLOG1234567890123-BSS-20260106\""));

    let back: TraceabilityRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sea_bass());
}

#[test]
fn test_output_is_deterministic() {
    for target in ExportTarget::ALL {
        assert_eq!(
            format(&sea_bass(), target).unwrap(),
            format(&sea_bass(), target).unwrap()
        );
    }
}
