//! Validation profiles
//!
//! A profile decides how strictly the ministry traceability chain
//! (product form → purpose phase → destination) is enforced, and which
//! advisories are raised.

use serde::{Deserialize, Serialize};

use lot_core::{LotError, LotResult};

/// Net weight at or below which a WEIGHT catch may use the Article 58.8 exemption
pub const DEFAULT_EXEMPTION_THRESHOLD_KG: f64 = 10.0;

/// How the product_form / purpose_phase / destination chain is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainPolicy {
    /// Not checked
    Off,
    /// A set field requires the next one in the chain
    Forward,
    /// All three fields are mandatory
    Mandatory,
}

/// Validation profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationProfile {
    /// Profile name (e.g., "ministry@1.0")
    pub name: String,

    pub chain: ChainPolicy,

    /// Article 58.8 threshold in kg
    #[serde(default = "default_threshold")]
    pub exemption_threshold_kg: f64,

    // === Advisories ===

    /// Warn when the LOT ID does not contain the species code
    #[serde(default = "yes")]
    pub warn_missing_species_code: bool,

    /// Warn when the CFR number does not look like a CFR
    #[serde(default = "yes")]
    pub warn_cfr_format: bool,

    /// Warn on gear codes outside the known enumeration
    #[serde(default = "yes")]
    pub warn_unknown_gear: bool,
}

fn default_threshold() -> f64 {
    DEFAULT_EXEMPTION_THRESHOLD_KG
}

fn yes() -> bool {
    true
}

impl ValidationProfile {
    fn preset(name: &str, chain: ChainPolicy) -> Self {
        Self {
            name: name.to_string(),
            chain,
            exemption_threshold_kg: DEFAULT_EXEMPTION_THRESHOLD_KG,
            warn_missing_species_code: true,
            warn_cfr_format: true,
            warn_unknown_gear: true,
        }
    }

    /// No traceability chain checks
    pub fn basic() -> Self {
        Self::preset("basic@1.0", ChainPolicy::Off)
    }

    /// Forward chain, as required for Ministry submissions
    pub fn ministry() -> Self {
        Self::preset("ministry@1.0", ChainPolicy::Forward)
    }

    /// Every chain field mandatory
    pub fn strict() -> Self {
        Self::preset("strict@1.0", ChainPolicy::Mandatory)
    }

    /// Look up a preset by name, with or without the version suffix.
    pub fn named(name: &str) -> LotResult<Self> {
        let base = name.split('@').next().unwrap_or(name);
        match base {
            "basic" => Ok(Self::basic()),
            "ministry" => Ok(Self::ministry()),
            "strict" => Ok(Self::strict()),
            _ => Err(LotError::Config(format!("unknown validation profile: {}", name))),
        }
    }

    /// Load profile from YAML
    pub fn from_yaml(yaml: &str) -> LotResult<Self> {
        let profile: Self =
            serde_yaml::from_str(yaml).map_err(|e| LotError::Config(e.to_string()))?;
        if !(profile.exemption_threshold_kg >= 0.0) {
            return Err(LotError::Config(format!(
                "exemption_threshold_kg must be non-negative, got {}",
                profile.exemption_threshold_kg
            )));
        }
        Ok(profile)
    }
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self::ministry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ValidationProfile::basic().chain, ChainPolicy::Off);
        assert_eq!(ValidationProfile::ministry().chain, ChainPolicy::Forward);
        assert_eq!(ValidationProfile::strict().chain, ChainPolicy::Mandatory);
        assert_eq!(ValidationProfile::default().name, "ministry@1.0");
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(ValidationProfile::named("strict").unwrap().name, "strict@1.0");
        assert_eq!(ValidationProfile::named("basic@1.0").unwrap().chain, ChainPolicy::Off);
        assert_eq!(ValidationProfile::named("lenient").unwrap_err().code(), "CONFIG");
    }

    #[test]
    fn test_yaml_profile() {
        let profile = ValidationProfile::from_yaml(
            r#"
name: cooperative@1.0
chain: mandatory
exemption_threshold_kg: 5
warn_unknown_gear: false
"#,
        )
        .unwrap();

        assert_eq!(profile.chain, ChainPolicy::Mandatory);
        assert_eq!(profile.exemption_threshold_kg, 5.0);
        assert!(!profile.warn_unknown_gear);
        assert!(profile.warn_cfr_format);
    }

    #[test]
    fn test_yaml_rejects_negative_threshold() {
        let err = ValidationProfile::from_yaml("name: x\nchain: off\nexemption_threshold_kg: -1")
            .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
