//! LOT identifier generator
//!
//! Turns species + vessel + pattern + catch date into a LOT identifier.
//! SIMPLE and WITH_DATE are pure; WITH_COUNTER (and CUSTOM templates that
//! use `{COUNTER}`) advance the injected counter exactly once per call.
//!
//! A counter only restarts per day when the identifier itself carries the
//! catch date. WITH_COUNTER ids and dateless CUSTOM templates always count
//! on the vessel-lifetime sequence, otherwise day two would hand out the
//! same ids as day one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use lot_core::reference;
use lot_core::{
    CounterKey, CounterScope, CounterStore, EngineConfig, LotPattern, LotResult,
    MemoryCounterStore, PrerequisiteError, Species, VesselConfig,
};

use crate::template::{self, PlaceholderValues};

/// Date format used inside identifiers
pub const LOT_DATE_FORMAT: &str = "%Y%m%d";

/// Per-call generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Date of catch; identifiers always use this, never the wall clock
    pub catch_date: NaiveDate,
}

impl GenerateOptions {
    pub fn on(catch_date: NaiveDate) -> Self {
        Self { catch_date }
    }
}

/// YYYYMMDD form of a catch date
pub fn lot_date(date: &NaiveDate) -> String {
    date.format(LOT_DATE_FORMAT).to_string()
}

/// Check everything generation depends on, reporting every problem at once.
pub fn check_prerequisites(
    species: &Species,
    vessel: &VesselConfig,
    pattern: &LotPattern,
) -> Result<(), PrerequisiteError> {
    let mut violations = Vec::new();

    if species.fao_code.trim().is_empty() {
        violations.push("Species with FAO code is required".to_string());
    }

    if vessel.logbook_number.is_empty() {
        violations.push("Vessel logbook number is required".to_string());
    }

    if vessel.cfr_number.is_empty() {
        violations.push("Vessel CFR number is required".to_string());
    }

    if !vessel.logbook_number.is_empty() && !reference::is_valid_logbook(&vessel.logbook_number) {
        violations.push("Invalid logbook number format (must be HRVLOG + 13 digits)".to_string());
    }

    if let LotPattern::Custom { template } = pattern {
        if template.trim().is_empty() {
            violations.push("Custom pattern specified but not provided".to_string());
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(PrerequisiteError::new(violations))
    }
}

/// LOT identifier generator
#[derive(Clone)]
pub struct LotIdGenerator {
    counters: Arc<dyn CounterStore>,
    scope: CounterScope,
}

impl Default for LotIdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(MemoryCounterStore::new()))
    }
}

impl std::fmt::Debug for LotIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LotIdGenerator")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl LotIdGenerator {
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self {
            counters,
            scope: CounterScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: CounterScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn from_config(counters: Arc<dyn CounterStore>, config: &EngineConfig) -> Self {
        Self::new(counters).with_scope(config.counter_scope)
    }

    pub fn scope(&self) -> CounterScope {
        self.scope
    }

    /// Generate a LOT identifier.
    pub fn generate(
        &self,
        species: &Species,
        vessel: &VesselConfig,
        pattern: &LotPattern,
        options: GenerateOptions,
    ) -> LotResult<String> {
        check_prerequisites(species, vessel, pattern)?;

        let logbook = vessel.logbook_number.as_str();
        let fao_code = species.fao_code.as_str();
        let date = lot_date(&options.catch_date);

        let lot_id = match pattern {
            LotPattern::Simple => format!("{}-{}", logbook, fao_code),
            LotPattern::WithDate => format!("{}-{}-{}", logbook, fao_code, date),
            LotPattern::WithCounter => {
                let counter = self.next_counter(logbook, fao_code, options.catch_date, false)?;
                format!("{}-{}-{:03}", logbook, fao_code, counter)
            }
            LotPattern::Custom { template } => {
                let mut values = PlaceholderValues::new()
                    .set(template::LOGBOOK, logbook)
                    .set(template::SPECIES, fao_code)
                    .set(template::FAO_SPECIES, fao_code)
                    .set(template::DATE, date.as_str());
                if pattern.allocates_counter() {
                    let dated = template::placeholders(template)
                        .iter()
                        .any(|p| p == template::DATE);
                    let counter =
                        self.next_counter(logbook, fao_code, options.catch_date, dated)?;
                    values = values.set(template::COUNTER, format!("{:03}", counter));
                }

                let unresolved = template::unresolved(template, &values);
                if !unresolved.is_empty() {
                    tracing::info!(
                        template = %template,
                        unresolved = ?unresolved,
                        "CUSTOM pattern has placeholders with no value; kept verbatim"
                    );
                }
                template::apply(template, &values)
            }
        };

        if !lot_id.contains(fao_code) {
            tracing::info!(
                lot_id = %lot_id,
                fao_code = %fao_code,
                "LOT ID does not contain species code (allowed per EU regulations)"
            );
        }

        if !pattern.allocates_counter() {
            tracing::debug!(
                lot_id = %lot_id,
                pattern = pattern.name(),
                "pattern is reproducible; same-day catches of this species share the identifier"
            );
        }

        tracing::info!(lot_id = %lot_id, pattern = pattern.name(), "LOT identifier generated");
        Ok(lot_id)
    }

    /// Counter key for one allocation. `dated` says whether the id embeds the catch date.
    fn counter_key(
        &self,
        logbook: &str,
        fao_code: &str,
        date: NaiveDate,
        dated: bool,
    ) -> CounterKey {
        let scope = if dated { self.scope } else { CounterScope::Simple };
        CounterKey::new(scope, logbook, fao_code, date)
    }

    fn next_counter(
        &self,
        logbook: &str,
        fao_code: &str,
        date: NaiveDate,
        dated: bool,
    ) -> LotResult<u64> {
        let key = self.counter_key(logbook, fao_code, date, dated);
        self.counters.increment_and_get(&key)
    }
}
