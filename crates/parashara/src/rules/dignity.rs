//! Sign dignity for Vedic grahas.
//!
//! Single source of truth for exaltation, own sign, friendship and
//! debilitation. Detectors ask the evaluator rather than checking signs inline.

use serde::{Deserialize, Serialize};

use crate::chart::Planet;
use crate::error::YogaError;
use crate::rules::lordship::{check_sign, sign_ruler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dignity {
    Debilitated,
    Enemy,
    Neutral,
    Friendly,
    OwnSign,
    Exalted,
}

impl Dignity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::OwnSign => "Own Sign",
            Self::Friendly => "Friendly Sign",
            Self::Neutral => "Neutral Sign",
            Self::Enemy => "Enemy Sign",
            Self::Debilitated => "Debilitated",
        }
    }
}

/// Natural (naisargika) relationship between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relationship {
    Friend,
    Neutral,
    Enemy,
}

/// Exaltation sign (1 = Aries).
pub const fn exaltation_sign(planet: Planet) -> u8 {
    match planet {
        Planet::Sun => 1,      // Aries
        Planet::Moon => 2,     // Taurus
        Planet::Mars => 10,    // Capricorn
        Planet::Mercury => 6,  // Virgo
        Planet::Jupiter => 4,  // Cancer
        Planet::Venus => 12,   // Pisces
        Planet::Saturn => 7,   // Libra
        Planet::Rahu => 2,     // Taurus
        Planet::Ketu => 8,     // Scorpio
    }
}

/// Debilitation sign: the sign opposite exaltation.
pub const fn debilitation_sign(planet: Planet) -> u8 {
    (exaltation_sign(planet) + 5) % 12 + 1
}

/// Own signs. The nodes own none.
pub fn own_signs(planet: Planet) -> &'static [u8] {
    match planet {
        Planet::Sun => &[5],
        Planet::Moon => &[4],
        Planet::Mars => &[1, 8],
        Planet::Mercury => &[3, 6],
        Planet::Jupiter => &[9, 12],
        Planet::Venus => &[2, 7],
        Planet::Saturn => &[10, 11],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

/// Natural friendship table (BPHS). Pairings with the nodes are neutral.
pub fn natural_relationship(planet: Planet, other: Planet) -> Relationship {
    use Planet::*;
    use Relationship::*;

    if planet.is_node() || other.is_node() || planet == other {
        return Neutral;
    }

    match (planet, other) {
        (Sun, Moon | Mars | Jupiter) => Friend,
        (Sun, Venus | Saturn) => Enemy,
        (Moon, Sun | Mercury) => Friend,
        (Mars, Sun | Moon | Jupiter) => Friend,
        (Mars, Mercury) => Enemy,
        (Mercury, Sun | Venus) => Friend,
        (Mercury, Moon) => Enemy,
        (Jupiter, Sun | Moon | Mars) => Friend,
        (Jupiter, Mercury | Venus) => Enemy,
        (Venus, Mercury | Saturn) => Friend,
        (Venus, Sun | Moon) => Enemy,
        (Saturn, Mercury | Venus) => Friend,
        (Saturn, Sun | Moon | Mars) => Enemy,
        _ => Neutral,
    }
}

/// Maximum Sun distance (degrees) at which a planet is combust.
/// Second value applies when the planet is retrograde.
pub const fn combustion_orb(planet: Planet) -> Option<(f64, f64)> {
    match planet {
        Planet::Moon => Some((12.0, 12.0)),
        Planet::Mars => Some((17.0, 17.0)),
        Planet::Mercury => Some((14.0, 12.0)),
        Planet::Jupiter => Some((11.0, 11.0)),
        Planet::Venus => Some((10.0, 8.0)),
        Planet::Saturn => Some((15.0, 15.0)),
        Planet::Sun | Planet::Rahu | Planet::Ketu => None,
    }
}

/// Shortest arc between two longitudes.
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1.rem_euclid(360.0) - lon2.rem_euclid(360.0)).abs();
    diff.min(360.0 - diff)
}

pub struct DignityEvaluator;

impl DignityEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Dignity of a planet placed in `sign_num`.
    pub fn dignity(&self, planet: Planet, sign_num: u8) -> Result<Dignity, YogaError> {
        let sign = check_sign(sign_num)?;

        if exaltation_sign(planet) == sign {
            return Ok(Dignity::Exalted);
        }
        if debilitation_sign(planet) == sign {
            return Ok(Dignity::Debilitated);
        }
        if own_signs(planet).contains(&sign) {
            return Ok(Dignity::OwnSign);
        }

        let lord = sign_ruler(sign)?;
        Ok(match natural_relationship(planet, lord) {
            Relationship::Friend => Dignity::Friendly,
            Relationship::Neutral => Dignity::Neutral,
            Relationship::Enemy => Dignity::Enemy,
        })
    }

    /// Exalted or own sign; natural benefics Jupiter, Venus and Mercury also
    /// count as strong in a friendly sign.
    pub fn is_strong(&self, planet: Planet, sign_num: u8) -> Result<bool, YogaError> {
        let dignity = self.dignity(planet, sign_num)?;
        Ok(match dignity {
            Dignity::Exalted | Dignity::OwnSign => true,
            Dignity::Friendly => matches!(planet, Planet::Jupiter | Planet::Venus | Planet::Mercury),
            _ => false,
        })
    }

    /// Exalted or own sign, with no benefic allowance.
    pub fn is_dignified(&self, planet: Planet, sign_num: u8) -> Result<bool, YogaError> {
        Ok(matches!(
            self.dignity(planet, sign_num)?,
            Dignity::Exalted | Dignity::OwnSign
        ))
    }

    /// Whether a planet is combust (too close to the Sun). Needs both longitudes.
    pub fn is_combust(
        &self,
        planet: Planet,
        longitude: Option<f64>,
        sun_longitude: Option<f64>,
        retrograde: bool,
    ) -> bool {
        let (Some(lon), Some(sun)) = (longitude, sun_longitude) else {
            return false;
        };
        match combustion_orb(planet) {
            Some((direct, retro)) => {
                let orb = if retrograde { retro } else { direct };
                angular_separation(lon, sun) <= orb
            }
            None => false,
        }
    }
}

impl Default for DignityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exaltation_and_debilitation() {
        let eval = DignityEvaluator::new();
        assert_eq!(eval.dignity(Planet::Sun, 1).unwrap(), Dignity::Exalted);
        assert_eq!(eval.dignity(Planet::Sun, 7).unwrap(), Dignity::Debilitated);
        assert_eq!(eval.dignity(Planet::Jupiter, 10).unwrap(), Dignity::Debilitated);
        assert_eq!(debilitation_sign(Planet::Venus), 6);
        assert_eq!(debilitation_sign(Planet::Mars), 4);
    }

    #[test]
    fn test_exaltation_wins_over_own_sign() {
        let eval = DignityEvaluator::new();
        // Mercury in Virgo is both exalted and own sign
        assert_eq!(eval.dignity(Planet::Mercury, 6).unwrap(), Dignity::Exalted);
        assert_eq!(eval.dignity(Planet::Mercury, 3).unwrap(), Dignity::OwnSign);
    }

    #[test]
    fn test_friendly_and_enemy_signs() {
        let eval = DignityEvaluator::new();
        // Jupiter in Aries (Mars) and Leo (Sun): friends
        assert_eq!(eval.dignity(Planet::Jupiter, 1).unwrap(), Dignity::Friendly);
        assert_eq!(eval.dignity(Planet::Jupiter, 5).unwrap(), Dignity::Friendly);
        // Jupiter in Taurus (Venus): enemy
        assert_eq!(eval.dignity(Planet::Jupiter, 2).unwrap(), Dignity::Enemy);
        assert_eq!(eval.dignity(Planet::Jupiter, 2).unwrap().label(), "Enemy Sign");
    }

    #[test]
    fn test_is_strong_benefic_allowance() {
        let eval = DignityEvaluator::new();
        assert!(eval.is_strong(Planet::Jupiter, 1).unwrap());
        // Mars in a friendly sign (Leo) is not strong
        assert!(!eval.is_strong(Planet::Mars, 5).unwrap());
        assert!(eval.is_strong(Planet::Mars, 8).unwrap());
    }

    #[test]
    fn test_invalid_sign() {
        let eval = DignityEvaluator::new();
        assert!(matches!(eval.dignity(Planet::Sun, 0), Err(YogaError::InvalidSign(0))));
    }

    #[test]
    fn test_combustion() {
        let eval = DignityEvaluator::new();
        assert!(eval.is_combust(Planet::Mercury, Some(105.0), Some(100.0), false));
        assert!(!eval.is_combust(Planet::Venus, Some(109.0), Some(100.0), true));
        assert!(eval.is_combust(Planet::Mars, Some(0.0), Some(355.0), false));
        assert!(!eval.is_combust(Planet::Mars, None, Some(355.0), false));
    }
}
