//! LOT Record: traceability record assembly
//!
//! [`RecordBuilder`] turns a LOT ID plus catch facts into a validated
//! [`TraceabilityRecord`](lot_core::TraceabilityRecord).
//! [`TraceabilityEngine`] runs the whole flow and keeps the built records.
//!
//! # Pipeline Flow
//!
//! ```text
//! Species + Vessel + Catch → LOT-IDENT → Builder → LOT-QUALITY → Registry → LOT-OUT
//!                               ↓           ↓            ↓                      ↓
//!                            lot_id      record      verdict               csv/xml/json
//! ```

pub mod builder;
pub mod engine;

pub use builder::RecordBuilder;
pub use engine::{CreatedLot, DailyStats, TraceabilityEngine};

use lot_core::{CatchInput, LotResult, TraceabilityRecord};

/// Build a record with the default (ministry) profile
pub fn build(lot_id: &str, input: &CatchInput) -> LotResult<TraceabilityRecord> {
    RecordBuilder::default().build(lot_id, input)
}
