//! Raw detector output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::chart::Planet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl Strength {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    /// Position on the Weak..VeryStrong scale, starting at 0.
    pub const fn rank(self) -> u32 {
        match self {
            Self::Weak => 0,
            Self::Medium => 1,
            Self::Strong => 2,
            Self::VeryStrong => 3,
        }
    }

    /// Inverse of [`Strength::rank`]; ranks past the top saturate at VeryStrong.
    pub const fn from_rank(rank: u32) -> Self {
        match rank {
            0 => Self::Weak,
            1 => Self::Medium,
            2 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn raised(self) -> Self {
        match self {
            Self::Weak => Self::Medium,
            Self::Medium => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn lowered(self) -> Self {
        match self {
            Self::VeryStrong => Self::Strong,
            Self::Strong => Self::Medium,
            _ => Self::Weak,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural kind of a yoga, fixed at detection time. Classification
/// dispatches on this before looking at names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YogaKind {
    PlanetaryStrength,
    SunRelative,
    MoonRelative,
    MultiPlanetMutual,
    LordCombination,
    HouseLordPlacement,
    PatternDistribution,
    FixedAngle,
    ConjunctionCount,
    Affliction,
}

impl YogaKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlanetaryStrength => "Planetary Strength",
            Self::SunRelative => "Sun Relative",
            Self::MoonRelative => "Moon Relative",
            Self::MultiPlanetMutual => "Multi-Planet Mutual",
            Self::LordCombination => "Lord Combination",
            Self::HouseLordPlacement => "House-Lord Placement",
            Self::PatternDistribution => "Pattern Distribution",
            Self::FixedAngle => "Fixed Angle",
            Self::ConjunctionCount => "Conjunction Count",
            Self::Affliction => "Affliction",
        }
    }
}

/// Marker that flags a cancelled or weakened yoga in its description.
pub const CANCELLATION_MARKER: &str = "[Cancelled:";
pub const WEAKENING_MARKER: &str = "[Weakened:";

/// One yoga as emitted by one detector invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawYogaRecord {
    pub name: String,
    pub description: String,
    pub strength: Strength,
    pub category: String,
    pub kind: YogaKind,
    pub yoga_forming_planets: Vec<Planet>,
    pub formation: String,
    /// Houses (from the ascendant) involved in the formation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub houses: Vec<u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl RawYogaRecord {
    pub fn builder(name: &str, kind: YogaKind, category: &str) -> YogaBuilder {
        YogaBuilder::new(name, kind, category)
    }

    /// Description carries a cancellation or weakening annotation.
    pub fn has_cancellation_note(&self) -> bool {
        self.description.contains(CANCELLATION_MARKER) || self.description.contains(WEAKENING_MARKER)
    }

    pub fn is_cancelled(&self) -> bool {
        self.description.contains(CANCELLATION_MARKER)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }
}

pub struct YogaBuilder {
    record: RawYogaRecord,
}

impl YogaBuilder {
    pub fn new(name: &str, kind: YogaKind, category: &str) -> Self {
        Self {
            record: RawYogaRecord {
                name: name.to_string(),
                description: String::new(),
                strength: Strength::Medium,
                category: category.to_string(),
                kind,
                yoga_forming_planets: Vec::new(),
                formation: String::new(),
                houses: Vec::new(),
                attributes: BTreeMap::new(),
            },
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.record.description = text.into();
        self
    }

    pub fn formation(mut self, text: impl Into<String>) -> Self {
        self.record.formation = text.into();
        self
    }

    pub fn strength(mut self, strength: Strength) -> Self {
        self.record.strength = strength;
        self
    }

    pub fn planets(mut self, planets: &[Planet]) -> Self {
        for p in planets {
            if !self.record.yoga_forming_planets.contains(p) {
                self.record.yoga_forming_planets.push(*p);
            }
        }
        self
    }

    pub fn houses(mut self, houses: &[u8]) -> Self {
        for h in houses {
            if !self.record.houses.contains(h) {
                self.record.houses.push(*h);
            }
        }
        self
    }

    pub fn attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.record.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Append a cancellation annotation to the description.
    pub fn cancelled(mut self, reason: &str) -> Self {
        self.record
            .description
            .push_str(&format!(" {} {}]", CANCELLATION_MARKER, reason));
        self
    }

    /// Append a weakening annotation to the description.
    pub fn weakened(mut self, reason: &str) -> Self {
        self.record
            .description
            .push_str(&format!(" {} {}]", WEAKENING_MARKER, reason));
        self
    }

    pub fn build(self) -> RawYogaRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_ordering() {
        assert!(Strength::VeryStrong > Strength::Strong);
        assert!(Strength::Weak < Strength::Medium);
        assert_eq!(Strength::Strong.raised(), Strength::VeryStrong);
        assert_eq!(Strength::Weak.lowered(), Strength::Weak);
    }

    #[test]
    fn test_strength_rank() {
        for strength in [Strength::Weak, Strength::Medium, Strength::Strong, Strength::VeryStrong] {
            assert_eq!(Strength::from_rank(strength.rank()), strength);
        }
        assert_eq!(Strength::from_rank(7), Strength::VeryStrong);
    }

    #[test]
    fn test_builder_annotations() {
        let record = RawYogaRecord::builder("Kemadruma Yoga", YogaKind::MoonRelative, "Chandra Yoga")
            .description("No planets beside the Moon.")
            .cancelled("Jupiter in kendra from Lagna")
            .planets(&[Planet::Moon, Planet::Moon])
            .build();
        assert!(record.has_cancellation_note());
        assert!(record.is_cancelled());
        assert_eq!(record.yoga_forming_planets, vec![Planet::Moon]);
    }
}
