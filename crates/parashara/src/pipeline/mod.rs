//! Raw detector output to classified canonical yogas.
//!
//! normalize -> deduplicate -> classify -> (optional) timing. Every stage is
//! a pure function of its input; a record that fails classification is kept
//! as uncategorized.

pub mod classify;
pub mod dedup;
pub mod normalize;
pub mod report;
pub mod taxonomy;
pub mod timing;

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chart::Planet;
use crate::detectors::{RawYogaRecord, Strength, YogaKind};
pub use classify::{Classification, Impact, Importance, LifeArea};
pub use report::{ChartQuality, Grade, YogaReport};
pub use timing::{TimingOracle, TimingStatus, VimshottariOracle, YogaTiming};

/// One yoga in the final output; unique by `canonical_name` within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalYoga {
    pub canonical_name: String,
    pub description: String,
    pub strength: Strength,
    pub category: String,
    pub kind: YogaKind,
    pub importance: Importance,
    pub impact: Impact,
    pub life_areas: Vec<LifeArea>,
    pub bphs_category: String,
    pub bphs_section: String,
    pub bphs_reference: String,
    pub formation: String,
    pub yoga_forming_planets: Vec<Planet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub houses: Vec<u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<YogaTiming>,
}

impl CanonicalYoga {
    pub fn from_record(record: RawYogaRecord, classification: Classification) -> Self {
        let cancelled = record.is_cancelled();
        Self {
            canonical_name: record.name,
            description: record.description,
            strength: record.strength,
            category: record.category,
            kind: record.kind,
            importance: classification.importance,
            impact: classification.impact,
            life_areas: classification.life_areas,
            bphs_category: classification.taxonomy.bphs_category,
            bphs_section: classification.taxonomy.bphs_section,
            bphs_reference: classification.taxonomy.bphs_reference,
            formation: record.formation,
            yoga_forming_planets: record.yoga_forming_planets,
            houses: record.houses,
            attributes: record.attributes,
            cancelled,
            timing: None,
        }
    }
}

/// Classified yogas plus the problems met on the way.
#[derive(Debug, Default)]
pub struct Processed {
    pub yogas: Vec<CanonicalYoga>,
    pub warnings: Vec<String>,
}

/// Canonicalize, deduplicate and classify detector output.
pub fn process(records: Vec<RawYogaRecord>) -> Processed {
    let mut processed = Processed::default();
    let records = dedup::deduplicate(dedup::canonicalize_names(records));
    for record in records {
        let classification = match classify::classify(&record) {
            Ok(c) => c,
            Err(e) => {
                warn!("Classifying {} failed, marking uncategorized: {}", record.name, e);
                processed.warnings.push(format!("{}: {}", record.name, e));
                classify::uncategorized()
            }
        };
        processed.yogas.push(CanonicalYoga::from_record(record, classification));
    }
    processed
}

/// Attach activation timing. Failures leave `timing` empty.
pub fn attach_timing(yogas: &mut [CanonicalYoga], oracle: &dyn TimingOracle) -> Vec<String> {
    let mut warnings = Vec::new();
    for yoga in yogas.iter_mut() {
        match oracle.activation(&yoga.yoga_forming_planets) {
            Ok(timing) => yoga.timing = Some(timing),
            Err(e) => {
                warn!("No timing for {}: {}", yoga.canonical_name, e);
                warnings.push(format!("timing for {}: {}", yoga.canonical_name, e));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YogaError;

    struct FailingOracle;

    impl TimingOracle for FailingOracle {
        fn activation(&self, _planets: &[Planet]) -> Result<YogaTiming, YogaError> {
            Err(YogaError::Timing("offline".to_string()))
        }
    }

    #[test]
    fn test_unknown_category_becomes_uncategorized() {
        let record = RawYogaRecord::builder("Local Yoga", YogaKind::SunRelative, "Folk Tradition")
            .strength(Strength::VeryStrong)
            .build();
        let processed = process(vec![record]);
        assert_eq!(processed.yogas.len(), 1);
        assert_eq!(processed.yogas[0].bphs_category, taxonomy::UNCATEGORIZED);
        assert_eq!(processed.yogas[0].importance, Importance::Minor);
        assert_eq!(processed.warnings.len(), 1);
    }

    #[test]
    fn test_process_renames_and_merges() {
        let records = vec![
            RawYogaRecord::builder("Gajakesari Yoga", YogaKind::MoonRelative, "Chandra Yoga")
                .strength(Strength::Medium)
                .build(),
            RawYogaRecord::builder("Gaja Kesari Yoga", YogaKind::MoonRelative, "Chandra Yoga")
                .strength(Strength::Strong)
                .build(),
        ];
        let processed = process(records);
        assert_eq!(processed.yogas.len(), 1);
        assert_eq!(processed.yogas[0].canonical_name, "Gaja Kesari Yoga");
        assert_eq!(processed.yogas[0].strength, Strength::Strong);
    }

    #[test]
    fn test_failing_oracle_leaves_timing_empty() {
        let record = RawYogaRecord::builder("Vesi Yoga", YogaKind::SunRelative, "Surya Yoga")
            .planets(&[Planet::Jupiter])
            .build();
        let mut processed = process(vec![record]);
        let warnings = attach_timing(&mut processed.yogas, &FailingOracle);
        assert_eq!(warnings.len(), 1);
        assert!(processed.yogas[0].timing.is_none());
    }
}
