//! Static reference definitions for the lookup operation.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detectors::{family_of, is_registered};
use crate::error::YogaError;
use crate::pipeline::normalize::{self, lookup_key};
use crate::pipeline::taxonomy::taxonomy_for;

const DEFINITIONS_TOML: &str = include_str!("../data/definitions.toml");

lazy_static! {
    static ref EMBEDDED: Result<DefinitionTable, YogaError> =
        DefinitionTable::from_toml_str(DEFINITIONS_TOML);
}

/// Chart-independent reference metadata for one canonical yoga.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaDefinition {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub description: String,
    pub reference: String,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub cancellation: Vec<String>,
    /// Known spelling variants, in lookup form
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    version: Option<u32>,
    #[serde(default)]
    yoga: Vec<YogaDefinition>,
}

#[derive(Debug, Clone)]
pub struct DefinitionTable {
    pub version: u32,
    entries: BTreeMap<String, YogaDefinition>,
}

impl DefinitionTable {
    pub fn from_toml_str(text: &str) -> Result<Self, YogaError> {
        let file: DefinitionFile = toml::from_str(text).map_err(|e| YogaError::Data {
            table: "definitions",
            message: e.to_string(),
        })?;
        let version = file.version.ok_or_else(|| YogaError::Data {
            table: "definitions",
            message: "missing version".to_string(),
        })?;

        let mut entries = BTreeMap::new();
        for definition in file.yoga {
            if !is_registered(&definition.name) {
                return Err(YogaError::Data {
                    table: "definitions",
                    message: format!("{:?} is not a registered yoga name", definition.name),
                });
            }
            if definition.description.trim().is_empty() {
                return Err(YogaError::Data {
                    table: "definitions",
                    message: format!("{:?} has no description", definition.name),
                });
            }
            let name = definition.name.clone();
            if entries.insert(name.clone(), definition).is_some() {
                return Err(YogaError::Data {
                    table: "definitions",
                    message: format!("{:?} is defined twice", name),
                });
            }
        }
        Ok(Self { version, entries })
    }

    pub fn get(&self, canonical_name: &str) -> Option<&YogaDefinition> {
        self.entries.get(canonical_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn definitions() -> Result<&'static DefinitionTable, YogaError> {
    EMBEDDED.as_ref().map_err(|e| e.clone())
}

fn aliases_of(canonical_name: &str) -> Vec<String> {
    let canonical_key = lookup_key(canonical_name);
    normalize::aliases()
        .map(|table| {
            table
                .iter()
                .filter(|(key, target)| *target == canonical_name && *key != canonical_key)
                .map(|(key, _)| key.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Reference definition for any spelling of a yoga name.
///
/// Registered names without a curated entry get a definition built from
/// their family. Names matching neither an alias nor a registered name are
/// `UnknownYogaName`.
pub fn lookup(name: &str) -> Result<YogaDefinition, YogaError> {
    let canonical =
        normalize::resolve(name).ok_or_else(|| YogaError::UnknownYogaName(name.to_string()))?;
    let family = family_of(&canonical).ok_or_else(|| YogaError::UnknownYogaName(name.to_string()))?;
    let taxonomy = taxonomy_for(&canonical, family)?;

    let mut definition = match definitions()?.get(&canonical) {
        Some(found) => found.clone(),
        None => YogaDefinition {
            name: canonical.clone(),
            category: String::new(),
            description: format!("{} from the {} family.", canonical, family),
            reference: taxonomy.bphs_reference.clone(),
            effects: Vec::new(),
            cancellation: Vec::new(),
            aliases: Vec::new(),
        },
    };
    definition.category = family.to_string();
    definition.aliases = aliases_of(&canonical);
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_definitions_are_valid() {
        let table = definitions().unwrap();
        assert!(table.version >= 1);
        assert!(table.len() >= 25);
    }

    #[test]
    fn test_lookup_through_alias() {
        let def = lookup("gajakesari").unwrap();
        assert_eq!(def.name, "Gaja Kesari Yoga");
        assert_eq!(def.category, "Chandra Yoga");
        assert!(!def.cancellation.is_empty());
        assert!(def.aliases.contains(&"gajakesari yoga".to_string()));
    }

    #[test]
    fn test_lookup_without_curated_entry() {
        let def = lookup("7th Lord in 10th House").unwrap();
        assert_eq!(def.category, "Bhava Yoga");
        assert_eq!(def.reference, "BPHS Ch. 24");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            lookup("Imaginary Yoga"),
            Err(YogaError::UnknownYogaName("Imaginary Yoga".to_string()))
        );
    }

    #[test]
    fn test_rejects_unregistered_definition() {
        let text = "version = 1\n[[yoga]]\nname = \"Imaginary Yoga\"\ndescription = \"x\"\nreference = \"y\"\n";
        assert!(DefinitionTable::from_toml_str(text).is_err());
    }
}
