//! Data Model: Species, VesselConfig, CatchInput, TraceabilityRecord
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::reference::{self, DEFAULT_GEAR};

// ============================================================================
// Reference data
// ============================================================================

/// Fixed species taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesCategory {
    Fish,
    Cephalopod,
    Cartilaginous,
    Crustacean,
    Mollusk,
    Echinoderm,
    Sponge,
    Cnidarian,
    Worm,
    Gastropod,
    Tunicate,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// FAO 3-alpha code (ex: "BSS")
    pub fao_code: String,
    pub scientific_name: String,
    pub local_name: String,
    #[serde(default)]
    pub category: SpeciesCategory,
    /// Minimum legal landing size; 0 means no minimum
    #[serde(default)]
    pub min_size_cm: f64,
}

impl Species {
    pub fn new(
        fao_code: impl Into<String>,
        scientific_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            fao_code: fao_code.into(),
            scientific_name: scientific_name.into(),
            local_name: local_name.into(),
            category: SpeciesCategory::Fish,
            min_size_cm: 0.0,
        }
    }

    pub fn with_category(mut self, category: SpeciesCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_min_size(mut self, min_size_cm: f64) -> Self {
        self.min_size_cm = min_size_cm.max(0.0);
        self
    }

    pub fn has_min_size(&self) -> bool {
        self.min_size_cm > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselConfig {
    pub cfr_number: String,
    pub registration_mark: String,
    pub logbook_number: String,
    #[serde(default = "default_gear")]
    pub fishing_gear_category: String,
    #[serde(default)]
    pub vessel_name: Option<String>,
    #[serde(default)]
    pub fisherman_name: Option<String>,
}

fn default_gear() -> String {
    DEFAULT_GEAR.to_string()
}

impl VesselConfig {
    pub fn new(
        cfr_number: impl Into<String>,
        registration_mark: impl Into<String>,
        logbook_number: impl Into<String>,
    ) -> Self {
        Self {
            cfr_number: cfr_number.into(),
            registration_mark: registration_mark.into(),
            logbook_number: logbook_number.into(),
            fishing_gear_category: default_gear(),
            vessel_name: None,
            fisherman_name: None,
        }
    }

    pub fn with_gear(mut self, gear: impl Into<String>) -> Self {
        self.fishing_gear_category = gear.into();
        self
    }

    pub fn with_vessel_name(mut self, name: impl Into<String>) -> Self {
        self.vessel_name = Some(name.into());
        self
    }

    pub fn with_fisherman_name(mut self, name: impl Into<String>) -> Self {
        self.fisherman_name = Some(name.into());
        self
    }

    /// Trimmed, upper-cased copy as stored by the setup flow.
    pub fn normalized(&self) -> Self {
        let gear = self.fishing_gear_category.trim().to_uppercase();
        Self {
            cfr_number: self.cfr_number.trim().to_uppercase(),
            registration_mark: self.registration_mark.trim().to_uppercase(),
            logbook_number: self.logbook_number.trim().to_uppercase(),
            fishing_gear_category: if gear.is_empty() { default_gear() } else { gear },
            vessel_name: trimmed(&self.vessel_name),
            fisherman_name: trimmed(&self.fisherman_name),
        }
    }

    /// All configuration problems, empty when the vessel is usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.cfr_number.is_empty() {
            problems.push("CFR number is mandatory".to_string());
        } else if !reference::is_valid_cfr(&self.cfr_number) {
            problems.push(
                "CFR number must be 3 letters + 9-12 digits (e.g., HRV000000000)".to_string(),
            );
        }

        if self.registration_mark.is_empty() {
            problems.push("Vessel registration mark is mandatory".to_string());
        } else if self.registration_mark.chars().count() < 2 {
            problems.push("Registration mark too short".to_string());
        }

        if self.logbook_number.is_empty() {
            problems.push("Logbook number is mandatory".to_string());
        } else if !reference::is_valid_logbook(&self.logbook_number) {
            problems.push("Logbook number must be HRVLOG + 13 digits".to_string());
        }

        if !reference::is_known_gear(&self.fishing_gear_category) {
            problems.push(format!(
                "Unknown fishing gear category: {}",
                self.fishing_gear_category
            ));
        }

        problems
    }

    pub fn is_valid(&self) -> bool {
        self.problems().is_empty()
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

// ============================================================================
// Catch input
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityType {
    Weight,
    Units,
}

impl QuantityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityType::Weight => "WEIGHT",
            QuantityType::Units => "UNITS",
        }
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LOT identifier pattern
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotPattern {
    /// `{logbook}-{fao_code}`
    #[default]
    Simple,
    /// `{logbook}-{fao_code}-{YYYYMMDD}`
    WithDate,
    /// `{logbook}-{fao_code}-{counter:03}`
    WithCounter,
    /// Caller-supplied placeholder template
    Custom { template: String },
}

impl LotPattern {
    pub fn custom(template: impl Into<String>) -> Self {
        LotPattern::Custom {
            template: template.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LotPattern::Simple => "SIMPLE",
            LotPattern::WithDate => "WITH_DATE",
            LotPattern::WithCounter => "WITH_COUNTER",
            LotPattern::Custom { .. } => "CUSTOM",
        }
    }

    /// Whether each generation call draws a fresh counter value.
    ///
    /// Patterns that don't are reproducible, and two catches of the same
    /// species on the same day will share an identifier.
    pub fn allocates_counter(&self) -> bool {
        match self {
            LotPattern::WithCounter => true,
            LotPattern::Custom { template } => template.contains("{COUNTER}"),
            LotPattern::Simple | LotPattern::WithDate => false,
        }
    }
}

/// Caller-supplied facts for one LOT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchInput {
    pub species: Species,
    pub vessel: VesselConfig,
    pub fao_zone: String,
    pub catch_date: NaiveDate,
    #[serde(default)]
    pub catch_time: Option<NaiveTime>,
    pub quantity_type: QuantityType,
    #[serde(default)]
    pub net_weight_kg: Option<f64>,
    #[serde(default)]
    pub unit_count: Option<u32>,
    #[serde(default)]
    pub undersized_present: bool,
    #[serde(default)]
    pub undersized_weight_kg: Option<f64>,
    #[serde(default)]
    pub undersized_unit_count: Option<u32>,
    #[serde(default)]
    pub product_form: Option<String>,
    #[serde(default)]
    pub purpose_phase: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    /// Pattern for this LOT; `None` uses the engine default
    #[serde(default)]
    pub lot_pattern: Option<LotPattern>,
}

impl CatchInput {
    fn base(
        species: Species,
        vessel: VesselConfig,
        fao_zone: impl Into<String>,
        catch_date: NaiveDate,
        quantity_type: QuantityType,
    ) -> Self {
        Self {
            species,
            vessel,
            fao_zone: fao_zone.into(),
            catch_date,
            catch_time: None,
            quantity_type,
            net_weight_kg: None,
            unit_count: None,
            undersized_present: false,
            undersized_weight_kg: None,
            undersized_unit_count: None,
            product_form: None,
            purpose_phase: None,
            destination: None,
            lot_pattern: None,
        }
    }

    /// Catch recorded by net weight
    pub fn by_weight(
        species: Species,
        vessel: VesselConfig,
        fao_zone: impl Into<String>,
        catch_date: NaiveDate,
        net_weight_kg: f64,
    ) -> Self {
        let mut input = Self::base(species, vessel, fao_zone, catch_date, QuantityType::Weight);
        input.net_weight_kg = Some(net_weight_kg);
        input
    }

    /// Catch recorded by unit count
    pub fn by_units(
        species: Species,
        vessel: VesselConfig,
        fao_zone: impl Into<String>,
        catch_date: NaiveDate,
        unit_count: u32,
    ) -> Self {
        let mut input = Self::base(species, vessel, fao_zone, catch_date, QuantityType::Units);
        input.unit_count = Some(unit_count);
        input
    }

    pub fn with_undersized_weight(mut self, kg: f64) -> Self {
        self.undersized_present = true;
        self.undersized_weight_kg = Some(kg);
        self
    }

    pub fn with_undersized_units(mut self, count: u32) -> Self {
        self.undersized_present = true;
        self.undersized_unit_count = Some(count);
        self
    }

    pub fn with_catch_time(mut self, time: NaiveTime) -> Self {
        self.catch_time = Some(time);
        self
    }

    pub fn with_traceability(
        mut self,
        product_form: impl Into<String>,
        purpose_phase: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.product_form = Some(product_form.into());
        self.purpose_phase = Some(purpose_phase.into());
        self.destination = Some(destination.into());
        self
    }

    pub fn with_pattern(mut self, pattern: LotPattern) -> Self {
        self.lot_pattern = Some(pattern);
        self
    }
}

// ============================================================================
// Traceability record
// ============================================================================

/// DD/MM/YYYY (de)serialization for record-facing dates
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn format(date: &NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceabilityRecord {
    pub lot_id: String,
    pub species: SpeciesRef,
    pub production_area: ProductionArea,
    pub fishing: FishingInfo,
    pub vessel: VesselRef,
    pub quantity: QuantityRecord,
    pub traceability: TraceabilityInfo,
    pub metadata: RecordMetadata,
}

/// Display subset of [`Species`]; min size is runtime-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub fao_code: String,
    pub scientific_name: String,
    pub local_name: String,
}

impl From<&Species> for SpeciesRef {
    fn from(species: &Species) -> Self {
        Self {
            fao_code: species.fao_code.clone(),
            scientific_name: species.scientific_name.clone(),
            local_name: species.local_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductionAreaType {
    #[default]
    FaoZone,
    AquacultureLocation,
}

impl ProductionAreaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionAreaType::FaoZone => "FAO_ZONE",
            ProductionAreaType::AquacultureLocation => "AQUACULTURE_LOCATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionArea {
    #[serde(rename = "type")]
    pub area_type: ProductionAreaType,
    pub fao_zone: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishingInfo {
    #[serde(with = "display_date")]
    pub catch_date: NaiveDate,
    pub catch_time: Option<NaiveTime>,
    pub fishing_gear_category: String,
}

impl FishingInfo {
    /// DD/MM/YYYY
    pub fn catch_date_display(&self) -> String {
        display_date::format(&self.catch_date)
    }

    /// HH:MM, if a catch time was recorded
    pub fn catch_time_display(&self) -> Option<String> {
        self.catch_time.map(|t| t.format("%H:%M").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselRef {
    pub cfr_number: String,
    pub registration_mark: String,
    pub logbook_number: String,
    pub vessel_name: Option<String>,
}

impl From<&VesselConfig> for VesselRef {
    fn from(vessel: &VesselConfig) -> Self {
        Self {
            cfr_number: vessel.cfr_number.clone(),
            registration_mark: vessel.registration_mark.clone(),
            logbook_number: vessel.logbook_number.clone(),
            vessel_name: vessel.vessel_name.clone(),
        }
    }
}

/// Dual quantity model: a catch is either weighed or counted, never both
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Weight {
        net_weight_kg: f64,
        undersized_weight_kg: Option<f64>,
    },
    Units {
        unit_count: u32,
        undersized_unit_count: Option<u32>,
    },
}

impl Quantity {
    pub fn quantity_type(&self) -> QuantityType {
        match self {
            Quantity::Weight { .. } => QuantityType::Weight,
            Quantity::Units { .. } => QuantityType::Units,
        }
    }

    /// Total in the quantity's own unit (kg or pieces)
    pub fn total(&self) -> f64 {
        match self {
            Quantity::Weight { net_weight_kg, .. } => *net_weight_kg,
            Quantity::Units { unit_count, .. } => f64::from(*unit_count),
        }
    }

    /// Undersized portion in the quantity's own unit
    pub fn undersized(&self) -> Option<f64> {
        match self {
            Quantity::Weight { undersized_weight_kg, .. } => *undersized_weight_kg,
            Quantity::Units { undersized_unit_count, .. } => undersized_unit_count.map(f64::from),
        }
    }

    pub fn net_weight_kg(&self) -> Option<f64> {
        match self {
            Quantity::Weight { net_weight_kg, .. } => Some(*net_weight_kg),
            Quantity::Units { .. } => None,
        }
    }

    pub fn unit_count(&self) -> Option<u32> {
        match self {
            Quantity::Units { unit_count, .. } => Some(*unit_count),
            Quantity::Weight { .. } => None,
        }
    }

    pub fn undersized_weight_kg(&self) -> Option<f64> {
        match self {
            Quantity::Weight { undersized_weight_kg, .. } => *undersized_weight_kg,
            Quantity::Units { .. } => None,
        }
    }

    pub fn undersized_unit_count(&self) -> Option<u32> {
        match self {
            Quantity::Units { undersized_unit_count, .. } => *undersized_unit_count,
            Quantity::Weight { .. } => None,
        }
    }

    /// Short unit label used in Croatian-facing output
    pub fn unit_label(&self) -> &'static str {
        match self {
            Quantity::Weight { .. } => "kg",
            Quantity::Units { .. } => "kom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuantityWire", try_from = "QuantityWire")]
pub struct QuantityRecord {
    pub measure: Quantity,
    pub undersized_catch_present: bool,
}

impl QuantityRecord {
    pub fn quantity_type(&self) -> QuantityType {
        self.measure.quantity_type()
    }
}

/// Flat wire shape; fields that don't apply are written as explicit nulls
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuantityWire {
    quantity_type: String,
    net_weight_kg: Option<f64>,
    unit_count: Option<u32>,
    #[serde(default)]
    undersized_catch_present: bool,
    undersized_weight_kg: Option<f64>,
    undersized_unit_count: Option<u32>,
}

impl From<QuantityRecord> for QuantityWire {
    fn from(record: QuantityRecord) -> Self {
        let m = record.measure;
        Self {
            quantity_type: m.quantity_type().as_str().to_string(),
            net_weight_kg: m.net_weight_kg(),
            unit_count: m.unit_count(),
            undersized_catch_present: record.undersized_catch_present,
            undersized_weight_kg: m.undersized_weight_kg(),
            undersized_unit_count: m.undersized_unit_count(),
        }
    }
}

/// A missing total reads as 0 so the validator reports it with the record's
/// other problems. Fields of the other quantity type are a shape error.
impl TryFrom<QuantityWire> for QuantityRecord {
    type Error = String;

    fn try_from(wire: QuantityWire) -> Result<Self, Self::Error> {
        let measure = match wire.quantity_type.as_str() {
            "WEIGHT" => {
                if wire.unit_count.is_some() || wire.undersized_unit_count.is_some() {
                    return Err(
                        "unit_count fields must be null when quantity_type is WEIGHT".to_string(),
                    );
                }
                Quantity::Weight {
                    net_weight_kg: wire.net_weight_kg.unwrap_or(0.0),
                    undersized_weight_kg: wire.undersized_weight_kg,
                }
            }
            "UNITS" => {
                if wire.net_weight_kg.is_some() || wire.undersized_weight_kg.is_some() {
                    return Err(
                        "weight fields must be null when quantity_type is UNITS".to_string(),
                    );
                }
                Quantity::Units {
                    unit_count: wire.unit_count.unwrap_or(0),
                    undersized_unit_count: wire.undersized_unit_count,
                }
            }
            other => {
                return Err(format!("quantity_type must be WEIGHT or UNITS, got '{}'", other));
            }
        };

        Ok(Self {
            measure,
            undersized_catch_present: wire.undersized_catch_present,
        })
    }
}

/// Ministry traceability chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceabilityInfo {
    pub product_form: Option<String>,
    pub purpose_phase: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub created_timestamp: DateTime<Utc>,
    pub record_version: String,
    pub compliance_standard: String,
}
