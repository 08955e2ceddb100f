//! Unified Error Model
//!
//! Every fallible engine operation returns [`LotError`]. Record-level rule
//! failures travel as [`Violation`]s so a caller can show the whole list at
//! once instead of fixing problems one by one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Category of a record-level rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A mandatory field is empty or absent
    MissingField,
    /// A field is present but does not match its required format
    InvalidFormat,
    /// The production area is not one of the recognised FAO zones
    UnknownZone,
    /// Total quantity is missing or not positive
    Quantity,
    /// Undersized catch sub-record is inconsistent
    Undersized,
    /// product_form / purpose_phase / destination dependency broken
    TraceabilityChain,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::InvalidFormat => "INVALID_FORMAT",
            ErrorKind::UnknownZone => "UNKNOWN_ZONE",
            ErrorKind::Quantity => "QUANTITY",
            ErrorKind::Undersized => "UNDERSIZED",
            ErrorKind::TraceabilityChain => "TRACEABILITY_CHAIN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ErrorKind,
    /// Stable rule identifier (e.g. "quantity.net_weight")
    pub rule: String,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn new(kind: ErrorKind, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Drop repeated messages, keeping the first occurrence of each.
pub fn dedup_violations(violations: Vec<Violation>) -> Vec<Violation> {
    let mut seen = HashSet::new();
    violations
        .into_iter()
        .filter(|v| seen.insert(v.message.clone()))
        .collect()
}

/// Missing species/vessel inputs detected before identifier generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", .violations.join("; "))]
pub struct PrerequisiteError {
    pub violations: Vec<String>,
}

impl PrerequisiteError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

/// One or more record-level rule violations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            violations: dedup_violations(violations),
        }
    }

    /// Ordered, de-duplicated messages
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Error, Debug)]
pub enum LotError {
    #[error("PREREQ/{0}")]
    Prerequisite(#[from] PrerequisiteError),

    #[error("VALIDATION/{0}")]
    Validation(#[from] ValidationError),

    #[error("FORMAT/unsupported export target: {0}")]
    Format(String),

    #[error("COUNTER/{0}")]
    Counter(String),

    #[error("LOT/duplicate identifier: {0}")]
    DuplicateLot(String),

    #[error("LOT/unknown identifier: {0}")]
    UnknownLot(String),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),
}

impl LotError {
    /// Short category code, used by the HTTP surface
    pub fn code(&self) -> &'static str {
        match self {
            LotError::Prerequisite(_) => "PREREQ",
            LotError::Validation(_) => "VALIDATION",
            LotError::Format(_) => "FORMAT",
            LotError::Counter(_) => "COUNTER",
            LotError::DuplicateLot(_) => "DUPLICATE_LOT",
            LotError::UnknownLot(_) => "UNKNOWN_LOT",
            LotError::Config(_) => "CONFIG",
            LotError::Serialize(_) => "SERIALIZE",
        }
    }

    /// Flat list of human-readable problems carried by this error
    pub fn messages(&self) -> Vec<String> {
        match self {
            LotError::Prerequisite(e) => e.violations.clone(),
            LotError::Validation(e) => e.messages(),
            other => vec![other.to_string()],
        }
    }
}

pub type LotResult<T> = Result<T, LotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_dedups_in_order() {
        let err = ValidationError::new(vec![
            Violation::new(ErrorKind::MissingField, "lot_id", "LOT ID is required"),
            Violation::new(
                ErrorKind::Quantity,
                "quantity.net_weight",
                "Net weight must be greater than 0 kg",
            ),
            Violation::new(ErrorKind::MissingField, "lot_id", "LOT ID is required"),
        ]);

        assert_eq!(
            err.messages(),
            vec!["LOT ID is required", "Net weight must be greater than 0 kg"]
        );
        assert!(err.has_kind(ErrorKind::Quantity));
        assert!(!err.has_kind(ErrorKind::UnknownZone));
    }

    #[test]
    fn test_prerequisite_display_lists_everything() {
        let err: LotError = PrerequisiteError::new(vec![
            "Species with FAO code is required".to_string(),
            "Vessel CFR number is required".to_string(),
        ])
        .into();

        assert_eq!(err.code(), "PREREQ");
        assert_eq!(
            err.to_string(),
            "PREREQ/Species with FAO code is required; Vessel CFR number is required"
        );
        assert_eq!(err.messages().len(), 2);
    }
}
