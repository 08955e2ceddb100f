//! LOT-IDENT: LOT identifier generation
//!
//! Derives the textual LOT identifier from the vessel logbook, the species
//! FAO code and the catch date according to a selectable [`LotPattern`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use lot_core::{LotPattern, Species, VesselConfig};
//! use lot_ident::{GenerateOptions, LotIdGenerator};
//!
//! let species = Species::new("BSS", "Dicentrarchus labrax", "Lubin");
//! let vessel = VesselConfig::new("HRV000123456", "ZD-123", "HRVLOG1234567890123");
//! let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
//!
//! let lot_id = LotIdGenerator::default()
//!     .generate(&species, &vessel, &LotPattern::WithDate, GenerateOptions::on(date))
//!     .unwrap();
//! assert_eq!(lot_id, "HRVLOG1234567890123-BSS-20260106");
//! ```

pub mod generator;
pub mod template;

pub use generator::{
    check_prerequisites, lot_date, GenerateOptions, LotIdGenerator, LOT_DATE_FORMAT,
};
pub use template::PlaceholderValues;

pub use lot_core::LotPattern;
