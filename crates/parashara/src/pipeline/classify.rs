//! Importance, impact and life areas for a detected yoga.
//!
//! Classification runs in two phases. The structural kind is checked first;
//! kinds with a structural rule (house-lord placement, afflictions, fixed
//! angles, patterns, conjunction counts) never consult the name. Only the
//! remaining kinds are matched against the curated list of major yogas.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::detectors::bhava::ExchangeType;
use crate::detectors::lords::POTENTIAL_CANCELLATION;
use crate::detectors::{RawYogaRecord, Strength, YogaKind};
use crate::error::YogaError;
use crate::pipeline::taxonomy::{self, TaxonomyRef};
use crate::rules::lordship::check_house;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Major,
    Moderate,
    Minor,
}

impl Importance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Mixed,
    Neutral,
    Negative,
}

impl Impact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Mixed => "mixed",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    fn from_nature(nature: &str) -> Option<Self> {
        match nature {
            "benefic" => Some(Self::Positive),
            "malefic" => Some(Self::Negative),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeArea {
    Personality,
    Wealth,
    Communication,
    Home,
    Children,
    Education,
    Health,
    Marriage,
    Longevity,
    Fortune,
    Career,
    Gains,
    Spirituality,
}

/// Life area signified by each house, 1st to 12th.
const HOUSE_AREAS: [LifeArea; 12] = [
    LifeArea::Personality,
    LifeArea::Wealth,
    LifeArea::Communication,
    LifeArea::Home,
    LifeArea::Children,
    LifeArea::Health,
    LifeArea::Marriage,
    LifeArea::Longevity,
    LifeArea::Fortune,
    LifeArea::Career,
    LifeArea::Gains,
    LifeArea::Spirituality,
];

lazy_static! {
    static ref AREA_KEYWORDS: Vec<(Regex, LifeArea)> = [
        (r"(?i)\b(wealth|money|riches|prosper|income|financ)", LifeArea::Wealth),
        (r"(?i)\b(marriage|spouse|partner|wife|husband)", LifeArea::Marriage),
        (r"(?i)\b(learn|wisdom|education|scholar|intelligen|knowledge)", LifeArea::Education),
        (r"(?i)\b(career|authority|power|leader|status|honou?r|fame)", LifeArea::Career),
        (r"(?i)\b(health|vitality|disease|illness|constitution)", LifeArea::Health),
        (r"(?i)\b(spiritual|renunciation|detachment|ascetic|liberation|devotion)", LifeArea::Spirituality),
        (r"(?i)\b(speech|eloquen|communicat|writing)", LifeArea::Communication),
        (r"(?i)\b(children|progeny)", LifeArea::Children),
        (r"(?i)\b(property|vehicles|mother|home)", LifeArea::Home),
    ]
    .into_iter()
    .map(|(pattern, area)| (Regex::new(pattern).expect("valid keyword regex"), area))
    .collect();
}

/// Classical yogas that are major on their own merit.
const MAJOR_NAMES: &[&str] = &[
    "Hamsa Yoga",
    "Malavya Yoga",
    "Ruchaka Yoga",
    "Bhadra Yoga",
    "Sasa Yoga",
    "Gaja Kesari Yoga",
    "Saraswati Yoga",
    "Dharma-Karmadhipati Yoga",
    "Neecha Bhanga Raja Yoga",
    "Harsha Yoga",
    "Sarala Yoga",
    "Vimala Yoga",
    "Lakshmi Yoga",
    "Adhi Yoga",
    "Akhanda Samrajya Yoga",
];

/// Families of lord-pair yogas named "<prefix> (<a> & <b> Lords)".
const MAJOR_PREFIXES: &[&str] = &["Raja Yoga ("];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub importance: Importance,
    pub impact: Impact,
    pub life_areas: Vec<LifeArea>,
    pub taxonomy: TaxonomyRef,
}

pub fn is_curated_major(name: &str) -> bool {
    MAJOR_NAMES.contains(&name) || MAJOR_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn importance_from_strength(strength: Strength) -> Importance {
    match strength {
        Strength::VeryStrong | Strength::Strong => Importance::Moderate,
        Strength::Medium | Strength::Weak => Importance::Minor,
    }
}

fn importance_from_intensity(record: &RawYogaRecord) -> Importance {
    if record.is_cancelled() {
        return Importance::Minor;
    }
    match record.attribute("intensity") {
        Some("high") => Importance::Major,
        Some("medium") => Importance::Moderate,
        _ => Importance::Minor,
    }
}

/// Importance from the structural rule, or `None` when the kind has none.
fn structural_importance(record: &RawYogaRecord) -> Option<Importance> {
    match record.kind {
        YogaKind::HouseLordPlacement => Some(importance_from_strength(record.strength)),
        YogaKind::Affliction => Some(importance_from_intensity(record)),
        YogaKind::FixedAngle => Some(Importance::Minor),
        YogaKind::PatternDistribution => Some(Importance::Moderate),
        YogaKind::ConjunctionCount => Some(if record.is_cancelled() {
            Importance::Minor
        } else {
            Importance::Moderate
        }),
        YogaKind::PlanetaryStrength
        | YogaKind::SunRelative
        | YogaKind::MoonRelative
        | YogaKind::MultiPlanetMutual
        | YogaKind::LordCombination => None,
    }
}

fn keyword_importance(record: &RawYogaRecord) -> Importance {
    // Unverified cancellations are never lifted by their name.
    if record.attribute("mode") == Some(POTENTIAL_CANCELLATION) {
        return Importance::Minor;
    }
    if is_curated_major(&record.name) {
        if record.is_cancelled() || record.strength == Strength::Weak {
            Importance::Moderate
        } else {
            Importance::Major
        }
    } else if record.is_cancelled() {
        Importance::Minor
    } else {
        importance_from_strength(record.strength)
    }
}

fn impact(record: &RawYogaRecord) -> Impact {
    match record.kind {
        YogaKind::Affliction => {
            if record.is_cancelled() {
                Impact::Neutral
            } else {
                Impact::Negative
            }
        }
        YogaKind::FixedAngle => match record.attribute("auspicious") {
            Some("true") => Impact::Positive,
            Some("false") => Impact::Negative,
            _ => Impact::Neutral,
        },
        YogaKind::HouseLordPlacement => match record.attribute("type").and_then(ExchangeType::from_label) {
            Some(ExchangeType::Maha) => Impact::Positive,
            Some(ExchangeType::Khala) => Impact::Mixed,
            Some(ExchangeType::Dainya) => Impact::Negative,
            None => match record.strength {
                Strength::VeryStrong | Strength::Strong => Impact::Positive,
                Strength::Medium => Impact::Mixed,
                Strength::Weak => Impact::Negative,
            },
        },
        YogaKind::ConjunctionCount => Impact::Mixed,
        _ => {
            let by_nature = record.attribute("nature").and_then(Impact::from_nature);
            match by_nature {
                Some(Impact::Negative) if record.is_cancelled() => Impact::Neutral,
                Some(found) => found,
                None if record.is_cancelled() => Impact::Neutral,
                None => Impact::Positive,
            }
        }
    }
}

fn life_areas(record: &RawYogaRecord) -> Result<Vec<LifeArea>, YogaError> {
    let mut areas = BTreeSet::new();
    for house in &record.houses {
        let house = check_house(*house)?;
        areas.insert(HOUSE_AREAS[(house - 1) as usize]);
    }
    for (re, area) in AREA_KEYWORDS.iter() {
        if re.is_match(&record.description) {
            areas.insert(*area);
        }
    }
    if record.kind == YogaKind::ConjunctionCount {
        areas.insert(LifeArea::Spirituality);
    }
    Ok(areas.into_iter().collect())
}

/// Classify a record: structure first, then the curated name list.
pub fn classify(record: &RawYogaRecord) -> Result<Classification, YogaError> {
    let importance = structural_importance(record).unwrap_or_else(|| keyword_importance(record));
    Ok(Classification {
        importance,
        impact: impact(record),
        life_areas: life_areas(record)?,
        taxonomy: taxonomy::taxonomy_for(&record.name, &record.category)?,
    })
}

/// The classification used when [`classify`] fails.
pub fn uncategorized() -> Classification {
    Classification {
        importance: Importance::Minor,
        impact: Impact::Neutral,
        life_areas: Vec::new(),
        taxonomy: taxonomy::uncategorized(),
    }
}
