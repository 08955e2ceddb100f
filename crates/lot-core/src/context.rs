//! Engine configuration shared by generator, builder and validator
use serde::{Deserialize, Serialize};

use crate::counter::CounterScope;
use crate::data_model::LotPattern;
use crate::error::{LotError, LotResult};

/// Record schema version stamped into metadata
pub const RECORD_VERSION: &str = "1.0";

/// Compliance literal stamped into metadata
pub const COMPLIANCE_STANDARD: &str = "EU_2023_2842";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How counter-based patterns key their counter
    pub counter_scope: CounterScope,
    /// Pattern used when the caller does not pick one
    pub default_pattern: LotPattern,
    pub record_version: String,
    /// Validation profile name (see lot-quality)
    pub profile: String,
    /// YAML file of export templates replacing the embedded set
    pub export_templates: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            counter_scope: CounterScope::Daily,
            default_pattern: LotPattern::WithDate,
            record_version: RECORD_VERSION.to_string(),
            profile: "ministry".to_string(),
            export_templates: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from YAML
    pub fn from_yaml(yaml: &str) -> LotResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| LotError::Config(e.to_string()))
    }

    /// Load configuration from a YAML file
    pub fn load(path: &str) -> LotResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LotError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }
}
