//! House lordship for Vedic charts.
//!
//! Maps zodiac signs to their planetary rulers and derives which planet
//! rules each house from the ascendant sign.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::chart::Planet;
use crate::error::YogaError;

/// Sign rulers, indexed by `sign_num - 1` (Aries first).
pub const SIGN_RULERS: [Planet; 12] = [
    Planet::Mars,    // Aries
    Planet::Venus,   // Taurus
    Planet::Mercury, // Gemini
    Planet::Moon,    // Cancer
    Planet::Sun,     // Leo
    Planet::Mercury, // Virgo
    Planet::Venus,   // Libra
    Planet::Mars,    // Scorpio
    Planet::Jupiter, // Sagittarius
    Planet::Saturn,  // Capricorn
    Planet::Saturn,  // Aquarius
    Planet::Jupiter, // Pisces
];

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

lazy_static! {
    static ref LORD_MAPS: Vec<HouseLordMap> = (1..=12u8).map(HouseLordMap::compute).collect();
}

/// Check that a sign number is in 1..=12.
pub fn check_sign(sign_num: u8) -> Result<u8, YogaError> {
    if (1..=12).contains(&sign_num) {
        Ok(sign_num)
    } else {
        Err(YogaError::InvalidSign(sign_num))
    }
}

/// Check that a house number is in 1..=12.
pub fn check_house(house: u8) -> Result<u8, YogaError> {
    if (1..=12).contains(&house) {
        Ok(house)
    } else {
        Err(YogaError::InvalidHouseNumber(house))
    }
}

/// Ruler of a sign (1 = Aries).
pub fn sign_ruler(sign_num: u8) -> Result<Planet, YogaError> {
    let sign = check_sign(sign_num)?;
    Ok(SIGN_RULERS[(sign - 1) as usize])
}

pub fn sign_name(sign_num: u8) -> Result<&'static str, YogaError> {
    let sign = check_sign(sign_num)?;
    Ok(SIGN_NAMES[(sign - 1) as usize])
}

/// Sign occupying `house` for the given ascendant sign (whole-sign houses).
pub fn house_sign(house: u8, ascendant_sign: u8) -> Result<u8, YogaError> {
    let house = check_house(house)?;
    let asc = check_sign(ascendant_sign)?;
    Ok(((asc - 1 + house - 1) % 12) + 1)
}

/// Planet ruling `house` for the given ascendant sign.
pub fn house_lord(house: u8, ascendant_sign: u8) -> Result<Planet, YogaError> {
    let sign = house_sign(house, ascendant_sign)?;
    sign_ruler(sign)
}

/// Signs ruled by a planet. Rahu and Ketu rule none.
pub fn signs_ruled_by(planet: Planet) -> Vec<u8> {
    (1..=12u8)
        .filter(|sign| SIGN_RULERS[(*sign - 1) as usize] == planet)
        .collect()
}

/// Lord of every house for one ascendant sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseLordMap {
    ascendant_sign: u8,
    lords: [Planet; 12],
}

impl HouseLordMap {
    fn compute(ascendant_sign: u8) -> Self {
        let mut lords = [Planet::Sun; 12];
        for (idx, lord) in lords.iter_mut().enumerate() {
            let sign = ((ascendant_sign as usize - 1 + idx) % 12) + 1;
            *lord = SIGN_RULERS[sign - 1];
        }
        Self {
            ascendant_sign,
            lords,
        }
    }

    /// Lord map for an ascendant sign. Served from a table built once per process.
    pub fn for_ascendant(ascendant_sign: u8) -> Result<Self, YogaError> {
        let asc = check_sign(ascendant_sign)?;
        Ok(LORD_MAPS[(asc - 1) as usize])
    }

    pub fn ascendant_sign(&self) -> u8 {
        self.ascendant_sign
    }

    /// Lord of a house (1..=12).
    pub fn lord(&self, house: u8) -> Result<Planet, YogaError> {
        let house = check_house(house)?;
        Ok(self.lords[(house - 1) as usize])
    }

    /// Houses ruled by a planet, ascending.
    pub fn houses_ruled_by(&self, planet: Planet) -> Vec<u8> {
        self.lords
            .iter()
            .enumerate()
            .filter(|(_, lord)| **lord == planet)
            .map(|(idx, _)| idx as u8 + 1)
            .collect()
    }

    /// `(house, lord)` pairs in house order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Planet)> + '_ {
        self.lords
            .iter()
            .enumerate()
            .map(|(idx, lord)| (idx as u8 + 1, *lord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_ruler() {
        assert_eq!(sign_ruler(1).unwrap(), Planet::Mars); // Aries
        assert_eq!(sign_ruler(4).unwrap(), Planet::Moon); // Cancer
        assert_eq!(sign_ruler(5).unwrap(), Planet::Sun); // Leo
        assert_eq!(sign_ruler(11).unwrap(), Planet::Saturn); // Aquarius
    }

    #[test]
    fn test_house_lord_aries_rising() {
        assert_eq!(house_lord(1, 1).unwrap(), Planet::Mars);
        assert_eq!(house_lord(5, 1).unwrap(), Planet::Sun);
        assert_eq!(house_lord(9, 1).unwrap(), Planet::Jupiter);
        assert_eq!(house_lord(10, 1).unwrap(), Planet::Saturn);
    }

    #[test]
    fn test_house_lord_wraps_around_zodiac() {
        // Pisces rising: 2nd house is Aries
        assert_eq!(house_lord(2, 12).unwrap(), Planet::Mars);
        assert_eq!(house_sign(12, 12).unwrap(), 11);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(house_lord(0, 1), Err(YogaError::InvalidHouseNumber(0))));
        assert!(matches!(house_lord(13, 1), Err(YogaError::InvalidHouseNumber(13))));
        assert!(matches!(house_lord(1, 0), Err(YogaError::InvalidSign(0))));
        assert!(matches!(HouseLordMap::for_ascendant(14), Err(YogaError::InvalidSign(14))));
    }

    #[test]
    fn test_lord_map_matches_house_lord() {
        let map = HouseLordMap::for_ascendant(7).unwrap();
        for (house, lord) in map.iter() {
            assert_eq!(lord, house_lord(house, 7).unwrap());
        }
        assert_eq!(map.houses_ruled_by(Planet::Venus), vec![1, 8]);
    }
}
