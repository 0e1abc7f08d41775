//! Birth chart input types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chart::planet::{Planet, ALL_PLANETS};

/// Placement of one planet (or the ascendant) in a computed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetState {
    /// House counted from the ascendant (1-12)
    pub house: u8,
    /// Zodiac sign (1 = Aries .. 12 = Pisces)
    pub sign_num: u8,
    /// Sidereal longitude in degrees (0-360). Zero is a valid value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exalted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_retrograde: Option<bool>,
}

impl PlanetState {
    pub fn new(house: u8, sign_num: u8) -> Self {
        Self {
            house,
            sign_num,
            longitude: None,
            exalted: None,
            is_retrograde: None,
        }
    }

    pub fn retrograde(&self) -> bool {
        self.is_retrograde == Some(true)
    }
}

/// A problem found while reading a chart. Detection still runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartIssue {
    pub subject: String,
    pub message: String,
}

/// Immutable chart snapshot consumed by the detectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub ascendant: Option<PlanetState>,
    #[serde(default)]
    pub planets: BTreeMap<Planet, PlanetState>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ChartIssue>,
}

impl Chart {
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    pub fn ascendant_sign(&self) -> Option<u8> {
        self.ascendant.as_ref().map(|asc| asc.sign_num)
    }

    pub fn get(&self, planet: Planet) -> Option<&PlanetState> {
        self.planets.get(&planet)
    }

    /// Main planets absent from the chart.
    pub fn missing_planets(&self) -> Vec<Planet> {
        ALL_PLANETS
            .iter()
            .copied()
            .filter(|p| !self.planets.contains_key(p))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.ascendant.is_some() && self.missing_planets().is_empty()
    }
}

/// Builds charts in code. `place` assumes whole-sign houses from the ascendant.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    ascendant: Option<PlanetState>,
    planets: BTreeMap<Planet, PlanetState>,
}

impl ChartBuilder {
    pub fn ascendant(mut self, sign_num: u8) -> Self {
        self.ascendant = Some(PlanetState::new(1, sign_num));
        self
    }

    pub fn ascendant_longitude(mut self, longitude: f64) -> Self {
        if let Some(asc) = self.ascendant.as_mut() {
            asc.longitude = Some(longitude);
        }
        self
    }

    /// Place a planet in a house; its sign follows from the ascendant.
    pub fn place(self, planet: Planet, house: u8) -> Self {
        let sign = match &self.ascendant {
            Some(asc) if (1..=12).contains(&asc.sign_num) && (1..=12).contains(&house) => {
                ((asc.sign_num - 1 + house - 1) % 12) + 1
            }
            _ => house,
        };
        self.place_in_sign(planet, house, sign)
    }

    pub fn place_in_sign(mut self, planet: Planet, house: u8, sign_num: u8) -> Self {
        self.planets.insert(planet, PlanetState::new(house, sign_num));
        self
    }

    pub fn longitude(mut self, planet: Planet, longitude: f64) -> Self {
        if let Some(state) = self.planets.get_mut(&planet) {
            state.longitude = Some(longitude);
        }
        self
    }

    pub fn retrograde(mut self, planet: Planet) -> Self {
        if let Some(state) = self.planets.get_mut(&planet) {
            state.is_retrograde = Some(true);
        }
        self
    }

    pub fn build(self) -> Chart {
        Chart {
            ascendant: self.ascendant,
            planets: self.planets,
            issues: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_derives_whole_sign() {
        let chart = Chart::builder()
            .ascendant(10)
            .place(Planet::Jupiter, 4)
            .build();
        // Capricorn rising: 4th house is Aries
        assert_eq!(chart.get(Planet::Jupiter).unwrap().sign_num, 1);
        assert_eq!(chart.ascendant_sign(), Some(10));
    }

    #[test]
    fn test_missing_planets() {
        let chart = Chart::builder().ascendant(1).place(Planet::Sun, 1).build();
        assert_eq!(chart.missing_planets().len(), 8);
        assert!(!chart.is_complete());
    }
}
