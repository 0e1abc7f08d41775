//! Yoga detectors.
//!
//! Each detector is a pure function over a [`ChartContext`] and is registered
//! together with the canonical names it can emit. Detectors never read each
//! other's output; a detector that lacks the planets it needs returns an
//! empty list.

pub mod bhava;
pub mod dosha;
pub mod lords;
pub mod lunar;
pub mod mahapurusha;
pub mod mutual;
pub mod nabhasa;
pub mod nitya;
pub mod record;
pub mod sanyas;
pub mod solar;
pub mod strength;

use lazy_static::lazy_static;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

use crate::chart::ChartContext;
use crate::error::YogaError;
pub use record::{RawYogaRecord, Strength, YogaBuilder, YogaKind};

pub type DetectorFn = fn(&ChartContext) -> Result<Vec<RawYogaRecord>, YogaError>;

/// Names a detector may emit.
pub enum Emits {
    Names(&'static [&'static str]),
    Generated(fn() -> Vec<String>),
}

impl Emits {
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Names(names) => names.iter().map(|n| n.to_string()).collect(),
            Self::Generated(f) => f(),
        }
    }
}

pub struct Detector {
    pub id: &'static str,
    pub family: &'static str,
    pub emits: Emits,
    pub run: DetectorFn,
}

lazy_static! {
    static ref REGISTRY: Vec<&'static Detector> = mahapurusha::DETECTORS
        .iter()
        .chain(solar::DETECTORS)
        .chain(lunar::DETECTORS)
        .chain(mutual::DETECTORS)
        .chain(lords::DETECTORS)
        .chain(bhava::DETECTORS)
        .chain(nabhasa::DETECTORS)
        .chain(nitya::DETECTORS)
        .chain(sanyas::DETECTORS)
        .chain(dosha::DETECTORS)
        .collect();
    static ref NAME_FAMILIES: BTreeMap<String, &'static str> = REGISTRY
        .iter()
        .flat_map(|d| d.emits.names().into_iter().map(move |n| (n, d.family)))
        .collect();
    static ref REGISTERED_NAMES: BTreeSet<String> = NAME_FAMILIES.keys().cloned().collect();
}

pub fn registry() -> &'static [&'static Detector] {
    &REGISTRY
}

/// Every canonical name any detector can emit.
pub fn registered_names() -> &'static BTreeSet<String> {
    &REGISTERED_NAMES
}

pub fn is_registered(name: &str) -> bool {
    REGISTERED_NAMES.contains(name)
}

/// Family (category) of the detector that registers `name`.
pub fn family_of(name: &str) -> Option<&'static str> {
    NAME_FAMILIES.get(name).copied()
}

/// Records from all detectors plus the failures that were isolated.
#[derive(Debug, Default)]
pub struct DetectionRun {
    pub records: Vec<RawYogaRecord>,
    pub failures: Vec<String>,
}

/// Run every registered detector. A failing detector is logged and skipped.
pub fn run_all(ctx: &ChartContext) -> DetectionRun {
    let mut run = DetectionRun::default();
    for detector in registry() {
        match (detector.run)(ctx) {
            Ok(records) => {
                if !records.is_empty() {
                    debug!("{} emitted {} record(s)", detector.id, records.len());
                }
                run.records.extend(records);
            }
            Err(e) => {
                warn!("Detector {} failed: {}", detector.id, e);
                run.failures.push(format!("{}: {}", detector.id, e));
            }
        }
    }
    run
}

/// Ordinal suffix for house numbers: 1st, 2nd, 3rd, 4th ...
pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_ids_unique() {
        let mut seen = BTreeSet::new();
        for d in registry() {
            assert!(seen.insert(d.id), "duplicate detector id {}", d.id);
        }
        assert!(registry().len() >= 80);
    }

    #[test]
    fn test_every_detector_registers_names() {
        for d in registry() {
            assert!(!d.emits.names().is_empty(), "{} registers no names", d.id);
        }
    }

    #[test]
    fn test_no_two_detectors_share_a_name() {
        let emitted: usize = registry().iter().map(|d| d.emits.names().len()).sum();
        assert_eq!(emitted, registered_names().len());
    }

    #[test]
    fn test_family_of() {
        assert_eq!(family_of("Gaja Kesari Yoga"), Some(lunar::CATEGORY));
        assert_eq!(family_of("1st Lord in 7th House"), Some(bhava::CATEGORY));
        assert_eq!(family_of("Gajakesari Yoga"), None);
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
    }
}
