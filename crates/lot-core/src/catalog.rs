//! In-memory species reference provider
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::data_model::{Species, SpeciesCategory};
use crate::error::{LotError, LotResult};

/// Species lookup by FAO code
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: BTreeMap<String, Species>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    species: Vec<Species>,
}

// (fao_code, scientific_name, local_name, category, min_size_cm)
const ADRIATIC_SEED: &[(&str, &str, &str, SpeciesCategory, f64)] = &[
    ("BSS", "Dicentrarchus labrax", "Lubin", SpeciesCategory::Fish, 42.0),
    ("SBG", "Sparus aurata", "Komarča", SpeciesCategory::Fish, 20.0),
    ("HKE", "Merluccius merluccius", "Oslić", SpeciesCategory::Fish, 20.0),
    ("MUT", "Mullus barbatus", "Trlja blatarica", SpeciesCategory::Fish, 11.0),
    ("MUR", "Mullus surmuletus", "Trlja kamenjarka", SpeciesCategory::Fish, 11.0),
    ("DNT", "Dentex dentex", "Zubatac", SpeciesCategory::Fish, 15.0),
    ("SOL", "Solea solea", "List", SpeciesCategory::Fish, 20.0),
    ("RSE", "Scorpaena scrofa", "Škrpina", SpeciesCategory::Fish, 15.0),
    ("BOG", "Boops boops", "Bukva", SpeciesCategory::Fish, 11.0),
    ("DOL", "Coryphaena hippurus", "Lampuga", SpeciesCategory::Fish, 0.0),
    ("OCC", "Octopus vulgaris", "Hobotnica", SpeciesCategory::Cephalopod, 0.0),
    ("SQR", "Loligo vulgaris", "Lignja", SpeciesCategory::Cephalopod, 0.0),
    ("CTC", "Sepia officinalis", "Sipa", SpeciesCategory::Cephalopod, 0.0),
];

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list; a later entry with the same code replaces an earlier one.
    pub fn from_species(species: impl IntoIterator<Item = Species>) -> Self {
        let species = species
            .into_iter()
            .map(|s| (s.fao_code.clone(), s))
            .collect();
        Self { species }
    }

    /// Built-in Adriatic seed
    pub fn adriatic() -> Self {
        Self::from_species(ADRIATIC_SEED.iter().map(|(code, sci, local, category, min)| {
            Species::new(*code, *sci, *local)
                .with_category(*category)
                .with_min_size(*min)
        }))
    }

    /// Parse a `species:` list from YAML. Duplicate codes are rejected.
    pub fn from_yaml(yaml: &str) -> LotResult<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| LotError::Config(e.to_string()))?;

        let mut species = BTreeMap::new();
        for entry in file.species {
            if entry.fao_code.trim().is_empty() {
                return Err(LotError::Config("species entry without FAO code".to_string()));
            }
            let code = entry.fao_code.clone();
            if species.insert(code.clone(), entry).is_some() {
                return Err(LotError::Config(format!("duplicate species code: {}", code)));
            }
        }
        Ok(Self { species })
    }

    pub fn get(&self, fao_code: &str) -> Option<&Species> {
        self.species.get(fao_code)
    }

    pub fn contains(&self, fao_code: &str) -> bool {
        self.species.contains_key(fao_code)
    }

    pub fn by_category(&self, category: SpeciesCategory) -> Vec<&Species> {
        self.species.values().filter(|s| s.category == category).collect()
    }

    /// Case-insensitive substring match on local name, scientific name or FAO code.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Species> {
        let term = term.trim().to_lowercase();
        self.species
            .values()
            .filter(|s| {
                s.local_name.to_lowercase().contains(&term)
                    || s.scientific_name.to_lowercase().contains(&term)
                    || s.fao_code.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adriatic_seed() {
        let catalog = SpeciesCatalog::adriatic();
        let bss = catalog.get("BSS").unwrap();
        assert_eq!(bss.local_name, "Lubin");
        assert_eq!(bss.min_size_cm, 42.0);
        assert_eq!(catalog.by_category(SpeciesCategory::Cephalopod).len(), 3);
    }

    #[test]
    fn test_search_matches_any_name() {
        let catalog = SpeciesCatalog::adriatic();

        let codes = |term: &str| -> Vec<String> {
            catalog.search(term).iter().map(|s| s.fao_code.clone()).collect()
        };
        assert_eq!(codes("trlja"), vec!["MUR", "MUT"]);
        assert_eq!(codes("OCTOPUS"), vec!["OCC"]);
        assert_eq!(codes("bss"), vec!["BSS"]);
        assert_eq!(codes("škrp"), vec!["RSE"]);
        assert!(codes("tuna").is_empty());
        assert_eq!(catalog.search("").len(), catalog.len());
    }

    #[test]
    fn test_yaml_catalog() {
        let catalog = SpeciesCatalog::from_yaml(
            r#"
species:
  - fao_code: BSS
    scientific_name: Dicentrarchus labrax
    local_name: Lubin
    category: fish
    min_size_cm: 42
  - fao_code: OCC
    scientific_name: Octopus vulgaris
    local_name: Hobotnica
    category: cephalopod
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("OCC").unwrap().min_size_cm, 0.0);
    }

    #[test]
    fn test_yaml_rejects_duplicates() {
        let err = SpeciesCatalog::from_yaml(
            r#"
species:
  - { fao_code: BSS, scientific_name: a, local_name: b }
  - { fao_code: BSS, scientific_name: c, local_name: d }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate species code: BSS"));
    }
}
