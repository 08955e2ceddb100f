//! Traceability record builder
//!
//! Composes a [`TraceabilityRecord`] from a LOT identifier and the caller's
//! catch facts, then runs the validator. A record that fails validation is
//! never returned.

use chrono::Utc;

use lot_core::reference;
use lot_core::{
    CatchInput, EngineConfig, FishingInfo, LotResult, ProductionArea, ProductionAreaType, Quantity,
    QuantityRecord, QuantityType, RecordMetadata, SpeciesRef, TraceabilityInfo,
    TraceabilityRecord, VesselRef, COMPLIANCE_STANDARD, RECORD_VERSION,
};
use lot_quality::{RecordValidator, ValidationProfile, ValidationReport};

/// Builds and validates records
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    validator: RecordValidator,
    record_version: String,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(RecordValidator::default())
    }
}

impl RecordBuilder {
    pub fn new(validator: RecordValidator) -> Self {
        Self {
            validator,
            record_version: RECORD_VERSION.to_string(),
        }
    }

    pub fn with_record_version(mut self, version: impl Into<String>) -> Self {
        self.record_version = version.into();
        self
    }

    /// Builder for a config: its profile and record version
    pub fn from_config(config: &EngineConfig) -> LotResult<Self> {
        let profile = ValidationProfile::named(&config.profile)?;
        Ok(Self::new(RecordValidator::new(profile))
            .with_record_version(config.record_version.clone()))
    }

    pub fn validator(&self) -> &RecordValidator {
        &self.validator
    }

    /// Build a validated record
    pub fn build(&self, lot_id: &str, input: &CatchInput) -> LotResult<TraceabilityRecord> {
        self.build_reported(lot_id, input).map(|(record, _)| record)
    }

    /// Build a validated record and keep the validator's report (warnings,
    /// exemption flag)
    pub fn build_reported(
        &self,
        lot_id: &str,
        input: &CatchInput,
    ) -> LotResult<(TraceabilityRecord, ValidationReport)> {
        let record = self.compose(lot_id, input);
        let report = self.validator.check(&record)?;

        tracing::info!(
            lot_id = %record.lot_id,
            quantity_type = %record.quantity.quantity_type(),
            warnings = report.warnings.len(),
            "traceability record built"
        );
        Ok((record, report))
    }

    /// Assemble the record without validating it
    pub fn compose(&self, lot_id: &str, input: &CatchInput) -> TraceabilityRecord {
        TraceabilityRecord {
            lot_id: lot_id.to_string(),
            species: SpeciesRef::from(&input.species),
            production_area: ProductionArea {
                area_type: ProductionAreaType::FaoZone,
                fao_zone: input.fao_zone.clone(),
                description: reference::describe_zone(&input.fao_zone),
            },
            fishing: FishingInfo {
                catch_date: input.catch_date,
                catch_time: input.catch_time,
                fishing_gear_category: input.vessel.fishing_gear_category.clone(),
            },
            vessel: VesselRef::from(&input.vessel),
            quantity: quantity_record(input),
            traceability: TraceabilityInfo {
                product_form: input.product_form.clone(),
                purpose_phase: input.purpose_phase.clone(),
                destination: input.destination.clone(),
            },
            metadata: RecordMetadata {
                created_timestamp: Utc::now(),
                record_version: self.record_version.clone(),
                compliance_standard: COMPLIANCE_STANDARD.to_string(),
            },
        }
    }
}

/// Map the flat input onto the tagged quantity.
///
/// A missing total becomes 0 so the validator reports it. Undersized values
/// are kept when the flag is set, and also when the flag is clear but a
/// positive value was supplied, so the contradiction is rejected rather than
/// dropped.
fn quantity_record(input: &CatchInput) -> QuantityRecord {
    let keep_f64 = |value: Option<f64>| {
        value.filter(|v| input.undersized_present || *v > 0.0)
    };
    let keep_u32 = |value: Option<u32>| {
        value.filter(|v| input.undersized_present || *v > 0)
    };

    let measure = match input.quantity_type {
        QuantityType::Weight => Quantity::Weight {
            net_weight_kg: input.net_weight_kg.unwrap_or(0.0),
            undersized_weight_kg: keep_f64(input.undersized_weight_kg),
        },
        QuantityType::Units => Quantity::Units {
            unit_count: input.unit_count.unwrap_or(0),
            undersized_unit_count: keep_u32(input.undersized_unit_count),
        },
    };

    QuantityRecord {
        measure,
        undersized_catch_present: input.undersized_present,
    }
}
