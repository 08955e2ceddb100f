//! Record field checks
//!
//! Each check looks at one section of a [`TraceabilityRecord`] and appends
//! every violation it finds. Checks never stop early, so a caller sees the
//! whole list in one pass.

use lot_core::reference;
use lot_core::{
    ErrorKind, Quantity, QuantityRecord, TraceabilityInfo, TraceabilityRecord, Violation,
};

use crate::profile::{ChainPolicy, ValidationProfile};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, blank)
}

fn missing(rule: &str, message: &str) -> Violation {
    Violation::new(ErrorKind::MissingField, rule, message)
}

/// LOT ID and species
pub fn check_identity(record: &TraceabilityRecord, out: &mut Vec<Violation>) {
    if blank(&record.lot_id) {
        out.push(missing("lot_id", "LOT ID is required"));
    }
    if blank(&record.species.fao_code) {
        out.push(missing("species.fao_code", "Species FAO code is required"));
    }
}

pub fn check_vessel(record: &TraceabilityRecord, out: &mut Vec<Violation>) {
    let vessel = &record.vessel;

    if blank(&vessel.cfr_number) {
        out.push(missing("vessel.cfr_number", "CFR number is required"));
    }

    if blank(&vessel.logbook_number) {
        out.push(missing("vessel.logbook_number", "Logbook number is required"));
    } else if !reference::is_valid_logbook(&vessel.logbook_number) {
        out.push(Violation::new(
            ErrorKind::InvalidFormat,
            "vessel.logbook_number",
            "Invalid logbook number format (must be HRVLOG + 13 digits)",
        ));
    }
}

pub fn check_production_area(record: &TraceabilityRecord, out: &mut Vec<Violation>) {
    let area = &record.production_area;

    if blank(&area.fao_zone) {
        out.push(missing("production_area.fao_zone", "FAO fishing zone is required"));
    } else if !reference::is_croatian_zone(&area.fao_zone) {
        out.push(Violation::new(
            ErrorKind::UnknownZone,
            "production_area.fao_zone",
            format!("Invalid FAO zone: {}", area.fao_zone),
        ));
    }

    if blank(&area.description) {
        out.push(missing(
            "production_area.description",
            "Production area description is required",
        ));
    }
}

/// Catch date is structural; only the gear category can be missing.
pub fn check_fishing(record: &TraceabilityRecord, out: &mut Vec<Violation>) {
    if blank(&record.fishing.fishing_gear_category) {
        out.push(missing(
            "fishing.fishing_gear_category",
            "Fishing gear category is required",
        ));
    }
}

/// Totals and the undersized sub-record
pub fn check_quantity(quantity: &QuantityRecord, out: &mut Vec<Violation>) {
    match quantity.measure {
        Quantity::Weight {
            net_weight_kg,
            undersized_weight_kg,
        } => {
            if !(net_weight_kg.is_finite() && net_weight_kg > 0.0) {
                out.push(Violation::new(
                    ErrorKind::Quantity,
                    "quantity.net_weight_kg",
                    "Net weight must be greater than 0 kg",
                ));
            }

            if quantity.undersized_catch_present {
                match undersized_weight_kg {
                    Some(kg) if kg > 0.0 => {
                        if kg > net_weight_kg {
                            out.push(Violation::new(
                                ErrorKind::Undersized,
                                "quantity.undersized_weight_kg",
                                "Undersized weight cannot exceed total net weight",
                            ));
                        }
                    }
                    _ => out.push(Violation::new(
                        ErrorKind::Undersized,
                        "quantity.undersized_weight_kg",
                        "Undersized weight required when undersized catch is present",
                    )),
                }
            } else if undersized_weight_kg.map_or(false, |kg| kg > 0.0) {
                out.push(undersized_not_allowed());
            }
        }
        Quantity::Units {
            unit_count,
            undersized_unit_count,
        } => {
            if unit_count == 0 {
                out.push(Violation::new(
                    ErrorKind::Quantity,
                    "quantity.unit_count",
                    "Unit count must be greater than 0",
                ));
            }

            if quantity.undersized_catch_present {
                match undersized_unit_count {
                    Some(count) if count > 0 => {
                        if count > unit_count {
                            out.push(Violation::new(
                                ErrorKind::Undersized,
                                "quantity.undersized_unit_count",
                                "Undersized unit count cannot exceed total unit count",
                            ));
                        }
                    }
                    _ => out.push(Violation::new(
                        ErrorKind::Undersized,
                        "quantity.undersized_unit_count",
                        "Undersized unit count required when undersized catch is present",
                    )),
                }
            } else if undersized_unit_count.map_or(false, |count| count > 0) {
                out.push(undersized_not_allowed());
            }
        }
    }
}

fn undersized_not_allowed() -> Violation {
    Violation::new(
        ErrorKind::Undersized,
        "quantity.undersized_catch_present",
        "Undersized quantity not allowed when undersized catch is false",
    )
}

/// Ministry chain: product_form → purpose_phase → destination
pub fn check_chain(info: &TraceabilityInfo, policy: ChainPolicy, out: &mut Vec<Violation>) {
    let chain = |rule: &str, message: &str| {
        Violation::new(ErrorKind::TraceabilityChain, rule, message)
    };

    match policy {
        ChainPolicy::Off => {}
        ChainPolicy::Forward => {
            if !unset(&info.product_form) && unset(&info.purpose_phase) {
                out.push(chain(
                    "traceability.purpose_phase",
                    "Purpose phase is required when product form is set",
                ));
            }
            if !unset(&info.purpose_phase) && unset(&info.destination) {
                out.push(chain(
                    "traceability.destination",
                    "Destination is required when purpose phase is set",
                ));
            }
        }
        ChainPolicy::Mandatory => {
            if unset(&info.product_form) {
                out.push(chain("traceability.product_form", "Product form is required"));
            }
            if unset(&info.purpose_phase) {
                out.push(chain("traceability.purpose_phase", "Purpose phase is required"));
            }
            if unset(&info.destination) {
                out.push(chain("traceability.destination", "Destination is required"));
            }
        }
    }
}

/// Non-blocking advisories. Returns the warnings and whether the Article
/// 58.8 exemption applies.
pub fn advisories(record: &TraceabilityRecord, profile: &ValidationProfile) -> (Vec<String>, bool) {
    let mut warnings = Vec::new();

    let exempt_eligible = match record.quantity.measure {
        Quantity::Weight { net_weight_kg, .. } => {
            net_weight_kg > 0.0 && net_weight_kg <= profile.exemption_threshold_kg
        }
        Quantity::Units { .. } => false,
    };
    if exempt_eligible {
        warnings.push(format!(
            "Article 58.8: catch of {} kg is within the {} kg exemption \
             for direct sale to consumers",
            record.quantity.measure.total(),
            profile.exemption_threshold_kg
        ));
    }

    let fao_code = record.species.fao_code.as_str();
    if profile.warn_missing_species_code
        && !blank(fao_code)
        && !blank(&record.lot_id)
        && !record.lot_id.contains(fao_code)
    {
        warnings.push(format!(
            "LOT ID {} does not contain species code {} (allowed per EU regulations)",
            record.lot_id, fao_code
        ));
    }

    let cfr = record.vessel.cfr_number.as_str();
    if profile.warn_cfr_format && !blank(cfr) && !reference::is_valid_cfr(cfr) {
        warnings.push(format!(
            "CFR number {} does not match the expected format (3 letters + 9-12 digits)",
            cfr
        ));
    }

    let gear = record.fishing.fishing_gear_category.as_str();
    if profile.warn_unknown_gear && !blank(gear) && !reference::is_known_gear(gear) {
        warnings.push(format!("Unknown fishing gear category: {}", gear));
    }

    (warnings, exempt_eligible)
}
