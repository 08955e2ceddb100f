//! Template loading for LOT-OUT.
//!
//! Export templates live in a YAML file of named Handlebars templates. The
//! stock set is embedded in the crate; a deployment may load its own file
//! with the same shape.

use serde::Deserialize;
use std::collections::HashMap;

use lot_core::{LotError, LotResult};

const EMBEDDED_TEMPLATES: &str = include_str!("../templates/export-templates.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Stock templates shipped with the crate
    pub fn embedded() -> LotResult<Self> {
        Self::from_yaml(EMBEDDED_TEMPLATES)
    }

    /// Load templates from a YAML file
    pub fn load(path: &str) -> LotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LotError::Config(format!("Failed to read templates file {}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> LotResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| LotError::Config(format!("Failed to parse templates YAML: {}", e)))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// All template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
