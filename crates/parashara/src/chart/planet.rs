//! The nine Vedic grahas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::YogaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// All nine grahas in traditional order.
pub const ALL_PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

/// The seven classical planets, excluding the lunar nodes.
pub const SEVEN_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

/// Planets other than Sun, Moon and the nodes ("tara grahas").
pub const TARA_PLANETS: [Planet; 5] = [
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

pub const NATURAL_BENEFICS: [Planet; 4] = [Planet::Jupiter, Planet::Venus, Planet::Mercury, Planet::Moon];
pub const NATURAL_MALEFICS: [Planet; 5] = [Planet::Saturn, Planet::Mars, Planet::Rahu, Planet::Ketu, Planet::Sun];

impl Planet {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Sanskrit name, used in classical yoga names.
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Sun => "Surya",
            Self::Moon => "Chandra",
            Self::Mars => "Mangala",
            Self::Mercury => "Budha",
            Self::Jupiter => "Guru",
            Self::Venus => "Shukra",
            Self::Saturn => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into `ALL_PLANETS`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn is_natural_benefic(self) -> bool {
        NATURAL_BENEFICS.contains(&self)
    }

    pub fn is_natural_malefic(self) -> bool {
        NATURAL_MALEFICS.contains(&self)
    }

    pub fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }

    /// Parse English or Sanskrit planet names, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let planet = match lower.as_str() {
            "sun" | "surya" => Self::Sun,
            "moon" | "chandra" => Self::Moon,
            "mars" | "mangal" | "mangala" | "kuja" => Self::Mars,
            "mercury" | "budha" | "buddh" => Self::Mercury,
            "jupiter" | "guru" | "brihaspati" => Self::Jupiter,
            "venus" | "shukra" => Self::Venus,
            "saturn" | "shani" => Self::Saturn,
            "rahu" | "north_node" | "north node" => Self::Rahu,
            "ketu" | "south_node" | "south node" => Self::Ketu,
            _ => return None,
        };
        Some(planet)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = YogaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| YogaError::InvalidChartInput(format!("unknown planet '{}'", s)))
    }
}

/// Join planet names for descriptions: "Sun, Moon and Mars".
pub fn join_planets(planets: &[Planet]) -> String {
    match planets {
        [] => String::new(),
        [one] => one.name().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|p| p.name()).collect();
            format!("{} and {}", head.join(", "), last.name())
        }
    }
}
