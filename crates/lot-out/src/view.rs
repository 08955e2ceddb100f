//! Flat, pre-formatted view of a record for templates and CSV
//!
//! Every value is already a display string (DD/MM/YYYY dates, plain decimal
//! numbers), so the output formats never format anything themselves.

use serde::Serialize;

use lot_core::{Quantity, TraceabilityRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub lot_id: String,
    pub fao_code: String,
    pub scientific_name: String,
    pub local_name: String,
    pub area_type: String,
    pub fao_zone: String,
    pub zone_description: String,
    pub catch_date: String,
    /// DD.MM.YYYY. as printed on Croatian labels
    pub catch_date_label: String,
    pub catch_time: Option<String>,
    pub gear: String,
    pub cfr_number: String,
    pub registration_mark: String,
    pub logbook_number: String,
    pub vessel_name: Option<String>,
    pub quantity_type: String,
    pub is_weight: bool,
    pub net_weight_kg: Option<String>,
    pub unit_count: Option<String>,
    pub unit_label: String,
    pub undersized_catch_present: bool,
    /// "true" / "false"
    pub undersized_present: String,
    pub undersized_weight_kg: Option<String>,
    pub undersized_unit_count: Option<String>,
    /// Undersized amount in the record's own unit
    pub undersized_amount: Option<String>,
    pub product_form: Option<String>,
    pub purpose_phase: Option<String>,
    pub destination: Option<String>,
    pub created_timestamp: String,
    /// Record creation day, DD.MM.YYYY.
    pub issue_date_label: String,
    pub record_version: String,
    pub compliance_standard: String,
}

const LABEL_DATE_FORMAT: &str = "%d.%m.%Y.";

/// Shortest decimal form (25.0 → "25", 25.5 → "25.5")
pub fn number(value: f64) -> String {
    format!("{}", value)
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

impl From<&TraceabilityRecord> for RecordView {
    fn from(record: &TraceabilityRecord) -> Self {
        let measure = record.quantity.measure;
        let undersized_amount = match measure {
            Quantity::Weight { undersized_weight_kg, .. } => undersized_weight_kg.map(number),
            Quantity::Units { undersized_unit_count, .. } => {
                undersized_unit_count.map(|c| c.to_string())
            }
        };

        Self {
            lot_id: record.lot_id.clone(),
            fao_code: record.species.fao_code.clone(),
            scientific_name: record.species.scientific_name.clone(),
            local_name: record.species.local_name.clone(),
            area_type: record.production_area.area_type.as_str().to_string(),
            fao_zone: record.production_area.fao_zone.clone(),
            zone_description: record.production_area.description.clone(),
            catch_date: record.fishing.catch_date_display(),
            catch_date_label: record.fishing.catch_date.format(LABEL_DATE_FORMAT).to_string(),
            catch_time: record.fishing.catch_time_display(),
            gear: record.fishing.fishing_gear_category.clone(),
            cfr_number: record.vessel.cfr_number.clone(),
            registration_mark: record.vessel.registration_mark.clone(),
            logbook_number: record.vessel.logbook_number.clone(),
            vessel_name: present(&record.vessel.vessel_name),
            quantity_type: measure.quantity_type().as_str().to_string(),
            is_weight: matches!(measure, Quantity::Weight { .. }),
            net_weight_kg: measure.net_weight_kg().map(number),
            unit_count: measure.unit_count().map(|c| c.to_string()),
            unit_label: measure.unit_label().to_string(),
            undersized_catch_present: record.quantity.undersized_catch_present,
            undersized_present: record.quantity.undersized_catch_present.to_string(),
            undersized_weight_kg: measure.undersized_weight_kg().map(number),
            undersized_unit_count: measure.undersized_unit_count().map(|c| c.to_string()),
            undersized_amount,
            product_form: present(&record.traceability.product_form),
            purpose_phase: present(&record.traceability.purpose_phase),
            destination: present(&record.traceability.destination),
            created_timestamp: record.metadata.created_timestamp.to_rfc3339(),
            issue_date_label: record
                .metadata
                .created_timestamp
                .format(LABEL_DATE_FORMAT)
                .to_string(),
            record_version: record.metadata.record_version.clone(),
            compliance_standard: record.metadata.compliance_standard.clone(),
        }
    }
}
