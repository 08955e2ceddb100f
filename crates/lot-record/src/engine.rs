//! End-to-end LOT flow
//!
//! ```text
//! CatchInput → generate id → build + validate → register → export
//! ```
//!
//! Built records are kept in an in-memory registry keyed by LOT ID. A LOT ID
//! that is already registered is rejected instead of overwritten.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lot_core::{
    CatchInput, CounterStore, EngineConfig, LotError, LotPattern, LotResult, MemoryCounterStore,
    Species, TraceabilityRecord, VesselConfig,
};
use lot_ident::{GenerateOptions, LotIdGenerator};
use lot_out::{ExportTarget, TemplateRenderer, TemplatesFile};
use lot_quality::ValidationReport;

use crate::builder::RecordBuilder;

/// LOT count and landed weight for one catch date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub count: usize,
    /// Sum of net weights; unit-counted LOTs add nothing
    pub total_weight_kg: f64,
}

/// Record plus the advisories raised while building it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedLot {
    pub record: TraceabilityRecord,
    pub report: ValidationReport,
}

#[derive(Debug)]
pub struct TraceabilityEngine {
    generator: LotIdGenerator,
    builder: RecordBuilder,
    default_pattern: LotPattern,
    /// Export templates from config; `None` uses the embedded set
    renderer: Option<Arc<TemplateRenderer>>,
    records: Mutex<BTreeMap<String, TraceabilityRecord>>,
}

impl Default for TraceabilityEngine {
    fn default() -> Self {
        Self::new(LotIdGenerator::default(), RecordBuilder::default())
    }
}

impl TraceabilityEngine {
    pub fn new(generator: LotIdGenerator, builder: RecordBuilder) -> Self {
        Self {
            generator,
            builder,
            default_pattern: EngineConfig::default().default_pattern,
            renderer: None,
            records: Mutex::new(BTreeMap::new()),
        }
    }

    /// Engine for a config, counting with the given store
    pub fn from_config(config: &EngineConfig, counters: Arc<dyn CounterStore>) -> LotResult<Self> {
        let generator = LotIdGenerator::from_config(counters, config);
        let builder = RecordBuilder::from_config(config)?;
        let mut engine =
            Self::new(generator, builder).with_default_pattern(config.default_pattern.clone());

        if let Some(path) = &config.export_templates {
            let renderer = TemplateRenderer::new(TemplatesFile::load(path)?)?;
            tracing::info!(
                path = %path,
                templates = ?renderer.list_templates(),
                "export templates loaded"
            );
            engine.renderer = Some(Arc::new(renderer));
        }
        Ok(engine)
    }

    /// Engine for a config with an in-memory counter store
    pub fn in_memory(config: &EngineConfig) -> LotResult<Self> {
        Self::from_config(config, Arc::new(MemoryCounterStore::new()))
    }

    pub fn with_default_pattern(mut self, pattern: LotPattern) -> Self {
        self.default_pattern = pattern;
        self
    }

    pub fn default_pattern(&self) -> &LotPattern {
        &self.default_pattern
    }

    pub fn builder(&self) -> &RecordBuilder {
        &self.builder
    }

    fn registry(&self) -> MutexGuard<'_, BTreeMap<String, TraceabilityRecord>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate a LOT identifier without building a record
    pub fn generate_lot_id(
        &self,
        species: &Species,
        vessel: &VesselConfig,
        pattern: Option<&LotPattern>,
        catch_date: NaiveDate,
    ) -> LotResult<String> {
        let pattern = pattern.unwrap_or(&self.default_pattern);
        self.generator
            .generate(species, vessel, pattern, GenerateOptions::on(catch_date))
    }

    /// Generate an identifier, build and validate the record, and register it.
    pub fn create_lot(&self, input: &CatchInput) -> LotResult<CreatedLot> {
        let lot_id = self.generate_lot_id(
            &input.species,
            &input.vessel,
            input.lot_pattern.as_ref(),
            input.catch_date,
        )?;
        let (record, report) = self.builder.build_reported(&lot_id, input)?;

        let mut records = self.registry();
        if records.contains_key(&record.lot_id) {
            tracing::warn!(lot_id = %record.lot_id, "LOT identifier already registered");
            return Err(LotError::DuplicateLot(record.lot_id));
        }
        records.insert(record.lot_id.clone(), record.clone());
        drop(records);

        tracing::info!(
            lot_id = %record.lot_id,
            exempt_eligible = report.exempt_eligible,
            "LOT created"
        );
        Ok(CreatedLot { record, report })
    }

    /// Validate a record under this engine's profile
    pub fn validate(&self, record: &TraceabilityRecord) -> ValidationReport {
        self.builder.validator().validate(record)
    }

    /// Validate a record body that may not even deserialize
    pub fn validate_value(&self, value: serde_json::Value) -> ValidationReport {
        self.builder.validator().validate_value(value)
    }

    pub fn get(&self, lot_id: &str) -> LotResult<TraceabilityRecord> {
        self.registry()
            .get(lot_id)
            .cloned()
            .ok_or_else(|| LotError::UnknownLot(lot_id.to_string()))
    }

    /// All registered records, ordered by LOT ID
    pub fn records(&self) -> Vec<TraceabilityRecord> {
        self.registry().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    /// Registered records caught on `date`, ordered by LOT ID
    pub fn records_on(&self, date: NaiveDate) -> Vec<TraceabilityRecord> {
        self.registry()
            .values()
            .filter(|r| r.fishing.catch_date == date)
            .cloned()
            .collect()
    }

    pub fn daily_stats(&self, date: NaiveDate) -> DailyStats {
        let records = self.records_on(date);
        let total_weight_kg: f64 = records
            .iter()
            .filter_map(|r| r.quantity.measure.net_weight_kg())
            .sum();

        DailyStats {
            date,
            count: records.len(),
            total_weight_kg,
        }
    }

    /// Format any record with this engine's export templates
    pub fn format(&self, record: &TraceabilityRecord, target: ExportTarget) -> LotResult<String> {
        match &self.renderer {
            Some(renderer) => lot_out::format_with(renderer, record, target),
            None => lot_out::format(record, target),
        }
    }

    /// Export a registered LOT
    pub fn export(&self, lot_id: &str, target: ExportTarget) -> LotResult<String> {
        let record = self.get(lot_id)?;
        self.format(&record, target)
    }

    /// All registered LOTs as one CSV document
    pub fn export_batch_csv(&self) -> String {
        lot_out::format_batch_csv(&self.records())
    }
}
