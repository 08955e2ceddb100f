//! Placeholder substitution for CUSTOM LOT patterns.
//!
//! A template is plain text with `{NAME}` placeholders. Known names are
//! replaced everywhere they occur; anything else is left verbatim.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([A-Z_]+)\}").unwrap();
}

pub const LOGBOOK: &str = "LOGBOOK";
pub const SPECIES: &str = "SPECIES";
pub const FAO_SPECIES: &str = "FAO_SPECIES";
pub const DATE: &str = "DATE";
pub const COUNTER: &str = "COUNTER";

/// Placeholder name → value mapping
#[derive(Debug, Clone, Default)]
pub struct PlaceholderValues {
    values: HashMap<String, String>,
}

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Substitute every known placeholder in `template`.
pub fn apply(template: &str, values: &PlaceholderValues) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder names used by `template`, in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Placeholder names in `template` that `values` cannot resolve
pub fn unresolved(template: &str, values: &PlaceholderValues) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|name| values.get(name).is_none())
        .collect()
}
