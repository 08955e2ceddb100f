//! Traceability record validator
//!
//! Evaluates a record against a [`ValidationProfile`] and produces a report
//! (valid flag, errors, warnings). Data problems never fail the call; they
//! are collected in the report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lot_core::error::dedup_violations;
use lot_core::{ErrorKind, TraceabilityRecord, ValidationError, Violation};

use crate::checks;
use crate::profile::ValidationProfile;

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,

    /// Blocking violations, de-duplicated, in rule order
    pub errors: Vec<Violation>,

    /// Advisories that never block
    pub warnings: Vec<String>,

    /// WEIGHT catch at or below the Article 58.8 threshold
    pub exempt_eligible: bool,

    /// Profile used for evaluation
    pub profile: String,
}

impl ValidationReport {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|v| v.message.clone()).collect()
    }

    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|v| v.kind == kind)
    }

    /// Convert a failing report into a [`ValidationError`].
    pub fn into_result(self) -> Result<Self, ValidationError> {
        if self.valid {
            Ok(self)
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Record validator bound to a profile
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    profile: ValidationProfile,
}

impl RecordValidator {
    pub fn new(profile: ValidationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    /// Validate a record, collecting every violation
    pub fn validate(&self, record: &TraceabilityRecord) -> ValidationReport {
        let mut errors = Vec::new();

        checks::check_identity(record, &mut errors);
        checks::check_vessel(record, &mut errors);
        checks::check_production_area(record, &mut errors);
        checks::check_fishing(record, &mut errors);
        checks::check_quantity(&record.quantity, &mut errors);
        checks::check_chain(&record.traceability, self.profile.chain, &mut errors);

        let errors = dedup_violations(errors);
        let (warnings, exempt_eligible) = checks::advisories(record, &self.profile);

        if errors.is_empty() {
            tracing::debug!(lot_id = %record.lot_id, warnings = warnings.len(), "record valid");
        } else {
            tracing::warn!(
                lot_id = %record.lot_id,
                errors = errors.len(),
                profile = %self.profile.name,
                "record validation failed"
            );
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            exempt_eligible,
            profile: self.profile.name.clone(),
        }
    }

    /// Validate a record still in JSON form. A body that cannot be read as a
    /// record at all yields one `record.shape` violation instead of an error.
    pub fn validate_value(&self, value: Value) -> ValidationReport {
        match serde_json::from_value::<TraceabilityRecord>(value) {
            Ok(record) => self.validate(&record),
            Err(e) => {
                tracing::warn!(error = %e, "record body could not be read");
                ValidationReport {
                    valid: false,
                    errors: vec![Violation::new(
                        ErrorKind::InvalidFormat,
                        "record.shape",
                        format!("Record could not be read: {}", e),
                    )],
                    warnings: Vec::new(),
                    exempt_eligible: false,
                    profile: self.profile.name.clone(),
                }
            }
        }
    }

    /// Validate and turn failures into a [`ValidationError`]
    pub fn check(&self, record: &TraceabilityRecord) -> Result<ValidationReport, ValidationError> {
        self.validate(record).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;
    use lot_core::{
        FishingInfo, ProductionArea, ProductionAreaType, Quantity, QuantityRecord, RecordMetadata,
        SpeciesRef, TraceabilityInfo, VesselRef,
    };

    fn record() -> TraceabilityRecord {
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
                catch_time: None,
                fishing_gear_category: "GNS".to_string(),
            },
            vessel: VesselRef {
                cfr_number: "HRV000123456".to_string(),
                registration_mark: "ZD-123".to_string(),
                logbook_number: "HRVLOG1234567890123".to_string(),
                vessel_name: None,
            },
            quantity: QuantityRecord {
                measure: Quantity::Weight {
                    net_weight_kg: 25.5,
                    undersized_weight_kg: None,
                },
                undersized_catch_present: false,
            },
            traceability: TraceabilityInfo::default(),
            metadata: RecordMetadata {
                created_timestamp: Utc.with_ymd_and_hms(2026, 1, 6, 8, 0, 0).unwrap(),
                record_version: "1.0".to_string(),
                compliance_standard: "EU_2023_2842".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_record() {
        let report = RecordValidator::default().validate(&record());
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert!(!report.exempt_eligible);
        assert_eq!(report.profile, "ministry@1.0");
    }

    #[test]
    fn test_collects_all_violations() {
        let mut broken = record();
        broken.lot_id.clear();
        broken.vessel.cfr_number.clear();
        broken.production_area.fao_zone = "99.9.9".to_string();
        broken.quantity.measure = Quantity::Weight {
            net_weight_kg: 0.0,
            undersized_weight_kg: None,
        };

        let report = RecordValidator::default().validate(&broken);
        assert!(!report.valid);
        assert_eq!(
            report.messages(),
            vec![
                "LOT ID is required",
                "CFR number is required",
                "Invalid FAO zone: 99.9.9",
                "Net weight must be greater than 0 kg",
            ]
        );
        assert!(report.has_kind(ErrorKind::UnknownZone));
    }

    #[test]
    fn test_small_catch_is_exempt_eligible() {
        let mut small = record();
        small.quantity.measure = Quantity::Weight {
            net_weight_kg: 8.0,
            undersized_weight_kg: None,
        };

        let report = RecordValidator::default().validate(&small);
        assert!(report.valid);
        assert!(report.exempt_eligible);
        assert!(report.warnings[0].starts_with("Article 58.8"));
    }

    #[test]
    fn test_advisories_do_not_block() {
        let mut odd = record();
        odd.lot_id = "HRVLOG1234567890123/20260106".to_string();
        odd.vessel.cfr_number = "HR-1".to_string();
        odd.fishing.fishing_gear_category = "DRB".to_string();

        let report = RecordValidator::default().validate(&odd);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_strict_profile_requires_chain() {
        let validator = RecordValidator::new(ValidationProfile::strict());
        let err = validator.check(&record()).unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.has_kind(ErrorKind::TraceabilityChain));

        let mut complete = record();
        complete.traceability = TraceabilityInfo {
            product_form: Some("FRESH".to_string()),
            purpose_phase: Some("HUMAN_CONSUMPTION".to_string()),
            destination: Some("MARKET".to_string()),
        };
        assert!(validator.check(&complete).is_ok());
    }

    #[test]
    fn test_json_record_without_total_reports_everything() {
        let mut value = serde_json::to_value(record()).unwrap();
        value["lot_id"] = json!("");
        value["production_area"]["fao_zone"] = json!("99.9.9");
        value["quantity"]["net_weight_kg"] = Value::Null;

        let report = RecordValidator::default().validate_value(value);
        assert!(!report.valid);
        assert_eq!(
            report.messages(),
            vec![
                "LOT ID is required",
                "Invalid FAO zone: 99.9.9",
                "Net weight must be greater than 0 kg",
            ]
        );
    }

    #[test]
    fn test_unreadable_json_is_a_shape_violation() {
        let report = RecordValidator::default().validate_value(json!({ "lot_id": 42 }));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].rule, "record.shape");
        assert!(report.errors[0].message.starts_with("Record could not be read"));
        assert_eq!(report.profile, "ministry@1.0");
    }
}
