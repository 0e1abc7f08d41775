//! Engine configuration, read from TOML.
//!
//! ```toml
//! include_all = true
//! raj_yoga_mode = "classical"      # or "placement"
//! cancellation_mode = "classical"  # or "potential"
//! conjunction_orb = 12.0
//!
//! [timing]
//! enabled = true
//! reference_date = "2024-01-01"
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::YogaError;

/// How Raj yogas are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RajYogaMode {
    /// Lords of kendra and trikona houses associate (true house lordship)
    #[default]
    Classical,
    /// Benefics placed in kendra and trikona houses; a labelled fallback
    Placement,
}

/// How debilitation cancellation is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancellationMode {
    /// At least one full classical cancellation rule must hold
    #[default]
    Classical,
    /// Any single weakening condition flags a potential cancellation
    Potential,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Date used for "current status"; callers supply today's date when absent
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_include_all")]
    pub include_all: bool,
    #[serde(default)]
    pub raj_yoga_mode: RajYogaMode,
    #[serde(default)]
    pub cancellation_mode: CancellationMode,
    /// Orb (degrees) under which a same-house conjunction counts as tight
    #[serde(default = "default_conjunction_orb")]
    pub conjunction_orb: f64,
    #[serde(default)]
    pub timing: TimingConfig,
}

fn default_include_all() -> bool {
    true
}

fn default_conjunction_orb() -> f64 {
    12.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            include_all: default_include_all(),
            raj_yoga_mode: RajYogaMode::default(),
            cancellation_mode: CancellationMode::default(),
            conjunction_orb: default_conjunction_orb(),
            timing: TimingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, YogaError> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| YogaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read engine config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse engine config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), YogaError> {
        if !self.conjunction_orb.is_finite() || !(0.0..=30.0).contains(&self.conjunction_orb) {
            return Err(YogaError::Config(format!(
                "conjunction_orb must be within 0-30 degrees, got {}",
                self.conjunction_orb
            )));
        }
        Ok(())
    }
}
