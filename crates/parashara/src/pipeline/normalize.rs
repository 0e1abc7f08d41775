//! Raw yoga name to canonical name.
//!
//! Lookup keys are lowercased with whitespace, hyphens and underscores
//! collapsed to single spaces. A key resolves first through the alias table,
//! then against the registered detector names, and finally with a trailing
//! " yoga" added. Anything still unresolved is its own canonical name.

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::detectors::registered_names;
use crate::error::YogaError;

const ALIASES_TOML: &str = include_str!("../../data/aliases.toml");

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s_\-]+").expect("separator pattern is valid");
    static ref EMBEDDED: Result<AliasTable, YogaError> =
        AliasTable::from_toml_str(ALIASES_TOML).and_then(|table| {
            table.validate_targets(registered_names())?;
            Ok(table)
        });
    static ref INDEX: BTreeMap<String, String> = build_index();
}

#[derive(Debug, Deserialize)]
struct AliasFile {
    version: Option<u32>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Versioned alias table with keys already in lookup form.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    pub version: u32,
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn from_toml_str(text: &str) -> Result<Self, YogaError> {
        let file: AliasFile = toml::from_str(text).map_err(|e| YogaError::Data {
            table: "aliases",
            message: e.to_string(),
        })?;
        let version = file.version.ok_or_else(|| YogaError::Data {
            table: "aliases",
            message: "missing version".to_string(),
        })?;

        let mut aliases = BTreeMap::new();
        for (raw, target) in file.aliases {
            let key = lookup_key(&raw);
            if key.is_empty() || target.trim().is_empty() {
                return Err(YogaError::Data {
                    table: "aliases",
                    message: format!("empty alias entry {:?} = {:?}", raw, target),
                });
            }
            if let Some(previous) = aliases.insert(key, target.clone()) {
                if previous != target {
                    return Err(YogaError::Data {
                        table: "aliases",
                        message: format!(
                            "{:?} collides with another alias ({} vs {})",
                            raw, previous, target
                        ),
                    });
                }
            }
        }
        Ok(Self { version, aliases })
    }

    /// Every target must be a registered name, and no alias may shadow a
    /// different registered name.
    pub fn validate_targets(&self, registered: &BTreeSet<String>) -> Result<(), YogaError> {
        let registered_keys: BTreeMap<String, &String> =
            registered.iter().map(|n| (lookup_key(n), n)).collect();
        for (key, target) in &self.aliases {
            if !registered.contains(target) {
                return Err(YogaError::Data {
                    table: "aliases",
                    message: format!("alias {:?} points at unregistered name {:?}", key, target),
                });
            }
            if let Some(shadowed) = registered_keys.get(key) {
                if *shadowed != target {
                    return Err(YogaError::Data {
                        table: "aliases",
                        message: format!("alias {:?} shadows registered name {:?}", key, shadowed),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.aliases.get(&lookup_key(raw)).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The embedded alias table, validated against the detector registry.
pub fn aliases() -> Result<&'static AliasTable, YogaError> {
    EMBEDDED.as_ref().map_err(|e| e.clone())
}

/// Lowercase and collapse separators.
pub fn lookup_key(raw: &str) -> String {
    SEPARATORS
        .replace_all(raw.trim(), " ")
        .trim()
        .to_lowercase()
}

fn build_index() -> BTreeMap<String, String> {
    let mut index: BTreeMap<String, String> = registered_names()
        .iter()
        .map(|name| (lookup_key(name), name.clone()))
        .collect();
    match aliases() {
        Ok(table) => {
            for (key, target) in table.iter() {
                index.insert(key.to_string(), target.to_string());
            }
        }
        Err(e) => warn!("Alias table unavailable, using registered names only: {}", e),
    }
    index
}

/// Canonical name for a raw name. Unknown names pass through unchanged.
pub fn normalize(raw: &str) -> String {
    resolve(raw).unwrap_or_else(|| raw.to_string())
}

/// Canonical name, or `None` when neither an alias nor a registered name matches.
pub fn resolve(raw: &str) -> Option<String> {
    let key = lookup_key(raw);
    if let Some(name) = INDEX.get(&key) {
        return Some(name.clone());
    }
    if !key.ends_with(" yoga") && !key.ends_with(" dosha") {
        if let Some(name) = INDEX.get(&format!("{} yoga", key)) {
            return Some(name.clone());
        }
    }
    None
}
