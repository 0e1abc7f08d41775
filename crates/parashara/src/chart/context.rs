//! Read-only view of a chart shared by all detectors.
//!
//! Every relative-position query names its reference frame explicitly
//! through [`Reference`]; there is no default frame.

use serde::{Deserialize, Serialize};

use crate::chart::planet::{Planet, ALL_PLANETS};
use crate::chart::types::{Chart, PlanetState};
use crate::config::EngineConfig;
use crate::rules::dignity::{Dignity, DignityEvaluator};
use crate::rules::geometry;
use crate::rules::lordship::HouseLordMap;

/// Point from which houses are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reference {
    Lagna,
    Sun,
    Moon,
    Planet(Planet),
}

impl Reference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lagna => "Lagna",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Planet(p) => p.name(),
        }
    }
}

pub struct ChartContext<'a> {
    chart: &'a Chart,
    config: &'a EngineConfig,
    lords: Option<HouseLordMap>,
    dignities: DignityEvaluator,
}

impl<'a> ChartContext<'a> {
    pub fn new(chart: &'a Chart, config: &'a EngineConfig) -> Self {
        let lords = chart
            .ascendant_sign()
            .and_then(|sign| HouseLordMap::for_ascendant(sign).ok());
        Self {
            chart,
            config,
            lords,
            dignities: DignityEvaluator::new(),
        }
    }

    pub fn chart(&self) -> &Chart {
        self.chart
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    pub fn evaluator(&self) -> &DignityEvaluator {
        &self.dignities
    }

    pub fn ascendant_sign(&self) -> Option<u8> {
        self.lords.map(|l| l.ascendant_sign())
    }

    pub fn lords(&self) -> Option<&HouseLordMap> {
        self.lords.as_ref()
    }

    pub fn state(&self, planet: Planet) -> Option<&PlanetState> {
        self.chart
            .get(planet)
            .filter(|s| (1..=12).contains(&s.house) && (1..=12).contains(&s.sign_num))
    }

    pub fn house(&self, planet: Planet) -> Option<u8> {
        self.state(planet).map(|s| s.house)
    }

    pub fn sign(&self, planet: Planet) -> Option<u8> {
        self.state(planet).map(|s| s.sign_num)
    }

    pub fn longitude(&self, planet: Planet) -> Option<f64> {
        self.state(planet).and_then(|s| s.longitude)
    }

    pub fn is_retrograde(&self, planet: Planet) -> bool {
        self.state(planet).map(|s| s.retrograde()).unwrap_or(false)
    }

    /// Houses of several planets; `None` if any is missing.
    pub fn houses_of(&self, planets: &[Planet]) -> Option<Vec<u8>> {
        planets.iter().map(|p| self.house(*p)).collect()
    }

    /// Every planet in `planets` has a valid placement.
    ///
    /// Conditions that require a house to be empty of some group cannot be
    /// judged unless every member of that group is placed.
    pub fn all_placed(&self, planets: &[Planet]) -> bool {
        planets.iter().all(|p| self.house(*p).is_some())
    }

    /// Lord of a house (needs the ascendant).
    pub fn lord_of(&self, house: u8) -> Option<Planet> {
        self.lords.and_then(|l| l.lord(house).ok())
    }

    /// House occupied by the lord of `house`.
    pub fn lord_placement(&self, house: u8) -> Option<u8> {
        self.lord_of(house).and_then(|lord| self.house(lord))
    }

    /// House of the reference point, counted from the ascendant.
    pub fn reference_house(&self, reference: Reference) -> Option<u8> {
        match reference {
            Reference::Lagna => Some(1),
            Reference::Sun => self.house(Planet::Sun),
            Reference::Moon => self.house(Planet::Moon),
            Reference::Planet(p) => self.house(p),
        }
    }

    /// 1-based house of `planet` counted from `reference`.
    pub fn position_from(&self, reference: Reference, planet: Planet) -> Option<u8> {
        let base = self.reference_house(reference)?;
        let house = self.house(planet)?;
        Some(geometry::relative_house(base, house))
    }

    /// Absolute house that is the `count`-th from `reference`.
    pub fn house_from(&self, reference: Reference, count: u8) -> Option<u8> {
        let base = self.reference_house(reference)?;
        Some(geometry::nth_house_from(base, count))
    }

    /// Planets (among `candidates`) placed in an absolute house.
    pub fn occupants(&self, house: u8, candidates: &[Planet]) -> Vec<Planet> {
        candidates
            .iter()
            .copied()
            .filter(|p| self.house(*p) == Some(house))
            .collect()
    }

    /// Planets (among `candidates`) in the `count`-th house from `reference`.
    pub fn occupants_from(&self, reference: Reference, count: u8, candidates: &[Planet]) -> Vec<Planet> {
        match self.house_from(reference, count) {
            Some(house) => self.occupants(house, candidates),
            None => Vec::new(),
        }
    }

    /// All nine grahas placed in a house.
    pub fn planets_in(&self, house: u8) -> Vec<Planet> {
        self.occupants(house, &ALL_PLANETS)
    }

    pub fn dignity(&self, planet: Planet) -> Option<Dignity> {
        let sign = self.sign(planet)?;
        self.dignities.dignity(planet, sign).ok()
    }

    pub fn is_strong(&self, planet: Planet) -> bool {
        self.sign(planet)
            .and_then(|sign| self.dignities.is_strong(planet, sign).ok())
            .unwrap_or(false)
    }

    pub fn is_dignified(&self, planet: Planet) -> bool {
        self.sign(planet)
            .and_then(|sign| self.dignities.is_dignified(planet, sign).ok())
            .unwrap_or(false)
    }

    pub fn is_combust(&self, planet: Planet) -> bool {
        self.dignities.is_combust(
            planet,
            self.longitude(planet),
            self.longitude(Planet::Sun),
            self.is_retrograde(planet),
        )
    }

    pub fn conjunct(&self, a: Planet, b: Planet) -> bool {
        match (self.house(a), self.house(b)) {
            (Some(ha), Some(hb)) => ha == hb,
            _ => false,
        }
    }

    /// `from` casts its aspect on `to`'s house.
    pub fn aspects(&self, from: Planet, to: Planet) -> bool {
        match (self.house(from), self.house(to)) {
            (Some(hf), Some(ht)) => geometry::aspects(from, hf, ht),
            _ => false,
        }
    }

    /// `planet` aspects an absolute house.
    pub fn aspects_house(&self, planet: Planet, house: u8) -> bool {
        self.house(planet)
            .map(|h| geometry::aspects(planet, h, house))
            .unwrap_or(false)
    }

    pub fn mutual_aspect(&self, a: Planet, b: Planet) -> bool {
        match (self.house(a), self.house(b)) {
            (Some(ha), Some(hb)) => geometry::is_mutual_aspect((a, ha), (b, hb)),
            _ => false,
        }
    }

    /// Each occupies a sign ruled by the other.
    pub fn exchange(&self, a: Planet, b: Planet) -> bool {
        if a == b {
            return false;
        }
        match (self.sign(a), self.sign(b)) {
            (Some(sa), Some(sb)) => {
                crate::rules::lordship::sign_ruler(sa).ok() == Some(b)
                    && crate::rules::lordship::sign_ruler(sb).ok() == Some(a)
            }
            _ => false,
        }
    }

    /// Conjunction, aspect either way, or sign exchange.
    pub fn associated(&self, a: Planet, b: Planet) -> bool {
        a == b || self.conjunct(a, b) || self.mutual_aspect(a, b) || self.exchange(a, b)
    }

    /// Longitude separation when both are known.
    pub fn separation(&self, a: Planet, b: Planet) -> Option<f64> {
        let (la, lb) = (self.longitude(a)?, self.longitude(b)?);
        Some(crate::rules::dignity::angular_separation(la, lb))
    }

    /// Conjunct within the configured orb; falls back to same house when
    /// longitudes are unknown.
    pub fn tight_conjunction(&self, a: Planet, b: Planet) -> bool {
        if !self.conjunct(a, b) {
            return false;
        }
        match self.separation(a, b) {
            Some(sep) => sep <= self.config.conjunction_orb,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chart() -> Chart {
        Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 10)
            .place(Planet::Moon, 4)
            .place(Planet::Jupiter, 7)
            .place(Planet::Mars, 1)
            .build()
    }

    #[test]
    fn test_position_from_reference() {
        let chart = sample_chart();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert_eq!(ctx.position_from(Reference::Lagna, Planet::Jupiter), Some(7));
        assert_eq!(ctx.position_from(Reference::Moon, Planet::Jupiter), Some(4));
        assert_eq!(ctx.position_from(Reference::Sun, Planet::Moon), Some(7));
        assert_eq!(ctx.position_from(Reference::Moon, Planet::Venus), None);
    }

    #[test]
    fn test_lordship_queries() {
        let chart = sample_chart();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        // Aries rising: Mars rules the 1st and sits there
        assert_eq!(ctx.lord_of(1), Some(Planet::Mars));
        assert_eq!(ctx.lord_placement(1), Some(1));
        assert_eq!(ctx.lord_placement(5), Some(10));
    }

    #[test]
    fn test_association() {
        let chart = sample_chart();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        // Mars in 1 and Jupiter in 7 oppose each other
        assert!(ctx.mutual_aspect(Planet::Mars, Planet::Jupiter));
        // Mars aspects the 4th and 8th from itself
        assert!(ctx.aspects(Planet::Mars, Planet::Moon));
        assert!(!ctx.conjunct(Planet::Sun, Planet::Moon));
    }
}
