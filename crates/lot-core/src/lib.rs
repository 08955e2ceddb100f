//! LOT Core: data model, error taxonomy and reference data
//!
//! Shared types for the EU 2023/2842 catch traceability engine.

pub mod catalog;
pub mod context;
pub mod counter;
pub mod data_model;
pub mod error;
pub mod reference;

pub use catalog::SpeciesCatalog;
pub use context::{EngineConfig, COMPLIANCE_STANDARD, RECORD_VERSION};
pub use counter::{CounterKey, CounterScope, CounterStore, MemoryCounterStore};
pub use data_model::{
    CatchInput, FishingInfo, LotPattern, ProductionArea, ProductionAreaType, Quantity,
    QuantityRecord, QuantityType, RecordMetadata, Species, SpeciesCategory, SpeciesRef,
    TraceabilityInfo, TraceabilityRecord, VesselConfig, VesselRef,
};
pub use error::{ErrorKind, LotError, LotResult, PrerequisiteError, ValidationError, Violation};

/// Engine version
pub const ENGINE_VERSION: &str = "1.0.0";
