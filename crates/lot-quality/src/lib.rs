//! LOT Quality: traceability record validation
//!
//! Checks an assembled record against the EU 2023/2842 mandatory-field and
//! cross-field rules under a configurable profile (basic, ministry, strict).
//!
//! # Example
//!
//! ```ignore
//! use lot_quality::{RecordValidator, ValidationProfile};
//!
//! let validator = RecordValidator::new(ValidationProfile::ministry());
//! let report = validator.validate(&record);
//! if !report.valid {
//!     for message in report.messages() {
//!         println!("{}", message);
//!     }
//! }
//! ```

pub mod checks;
pub mod profile;
pub mod validator;

pub use profile::{ChainPolicy, ValidationProfile, DEFAULT_EXEMPTION_THRESHOLD_KG};
pub use validator::{RecordValidator, ValidationReport};

use lot_core::TraceabilityRecord;

/// Quick validation with the default (ministry) profile
pub fn validate(record: &TraceabilityRecord) -> ValidationReport {
    RecordValidator::default().validate(record)
}

/// Check if a record would pass under a named profile
pub fn would_pass(record: &TraceabilityRecord, profile: &str) -> bool {
    ValidationProfile::named(profile)
        .map(|p| RecordValidator::new(p).validate(record).valid)
        .unwrap_or(false)
}
