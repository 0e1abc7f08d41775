//! Relative-position geometry between houses.
//!
//! Distances are 0-based: a distance of 0 is the same house, 6 is the 7th
//! house. Every function is total over houses 1-12. Out-of-range values trip
//! a debug assertion and are wrapped into 1-12 otherwise.

use crate::chart::Planet;

/// Wrap a house value into 1-12.
pub fn clamp_house(house: u8) -> u8 {
    debug_assert!((1..=12).contains(&house), "house out of range: {}", house);
    ((house as u16 + 11) % 12) as u8 + 1
}

/// Forward distance from `from` to `to`, in 0..=11.
pub fn house_distance(from: u8, to: u8) -> u8 {
    let from = clamp_house(from) as i16;
    let to = clamp_house(to) as i16;
    (to - from).rem_euclid(12) as u8
}

/// 1-based house number of `to` counted from `from` ("Jupiter is 4th from Moon").
pub fn relative_house(from: u8, to: u8) -> u8 {
    house_distance(from, to) + 1
}

/// House reached by counting `count` houses from `from` (count 1 = same house).
pub fn nth_house_from(from: u8, count: u8) -> u8 {
    let from = clamp_house(from) as u16;
    ((from - 1 + (count as u16 + 11) % 12) % 12) as u8 + 1
}

/// Kendra distance: 1st, 4th, 7th or 10th relationship.
pub fn is_kendra(distance: u8) -> bool {
    matches!(distance % 12, 0 | 3 | 6 | 9)
}

/// Trikona distance: 1st, 5th or 9th relationship.
pub fn is_trikona(distance: u8) -> bool {
    matches!(distance % 12, 0 | 4 | 8)
}

/// Dusthana distance: 6th, 8th or 12th relationship.
pub fn is_dusthana(distance: u8) -> bool {
    matches!(distance % 12, 5 | 7 | 11)
}

/// Upachaya distance: 3rd, 6th, 10th or 11th relationship.
pub fn is_upachaya(distance: u8) -> bool {
    matches!(distance % 12, 2 | 5 | 9 | 10)
}

/// Adjacent houses (2nd or 12th from each other).
pub fn is_second_apart(distance: u8) -> bool {
    matches!(distance % 12, 1 | 11)
}

pub fn is_kendra_house(house: u8) -> bool {
    is_kendra(house_distance(1, house))
}

pub fn is_trikona_house(house: u8) -> bool {
    is_trikona(house_distance(1, house))
}

pub fn is_dusthana_house(house: u8) -> bool {
    is_dusthana(house_distance(1, house))
}

/// Aspect distances cast by a planet, in addition to none for same house.
///
/// Every graha casts the 7th-house aspect; Mars adds the 4th and 8th,
/// Jupiter the 5th and 9th, Saturn the 3rd and 10th.
pub fn aspect_distances(planet: Planet) -> &'static [u8] {
    match planet {
        Planet::Mars => &[6, 3, 7],
        Planet::Jupiter => &[6, 4, 8],
        Planet::Saturn => &[6, 2, 9],
        _ => &[6],
    }
}

/// Whether `planet` in house `from` casts an aspect on house `to`.
pub fn aspects(planet: Planet, from: u8, to: u8) -> bool {
    aspect_distances(planet).contains(&house_distance(from, to))
}

/// Whether either planet aspects the other's house.
pub fn is_mutual_aspect(a: (Planet, u8), b: (Planet, u8)) -> bool {
    aspects(a.0, a.1, b.1) || aspects(b.0, b.1, a.1)
}

/// Houses occupied between two houses, exclusive, moving forward.
pub fn houses_between(from: u8, to: u8) -> Vec<u8> {
    let span = house_distance(from, to);
    (1..span).map(|step| nth_house_from(from, step + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_distance() {
        assert_eq!(house_distance(1, 1), 0);
        assert_eq!(house_distance(1, 7), 6);
        assert_eq!(house_distance(10, 1), 3);
        assert_eq!(house_distance(5, 2), 9);
        assert_eq!(relative_house(5, 2), 10);
    }

    #[test]
    fn test_nth_house_from() {
        assert_eq!(nth_house_from(1, 1), 1);
        assert_eq!(nth_house_from(10, 4), 1);
        assert_eq!(nth_house_from(12, 2), 1);
        assert_eq!(nth_house_from(3, 12), 2);
    }

    #[test]
    fn test_kendra_trikona_sets() {
        let kendras: Vec<u8> = (0..12).filter(|d| is_kendra(*d)).collect();
        let trikonas: Vec<u8> = (0..12).filter(|d| is_trikona(*d)).collect();
        let dusthanas: Vec<u8> = (1..=12).filter(|h| is_dusthana_house(*h)).collect();
        assert_eq!(kendras, vec![0, 3, 6, 9]);
        assert_eq!(trikonas, vec![0, 4, 8]);
        assert_eq!(dusthanas, vec![6, 8, 12]);
    }

    #[test]
    fn test_special_aspects() {
        // Mars in 1 aspects 4, 7, 8
        assert!(aspects(Planet::Mars, 1, 4));
        assert!(aspects(Planet::Mars, 1, 8));
        assert!(!aspects(Planet::Mars, 1, 5));
        // Jupiter in 5 aspects 9 and 1
        assert!(aspects(Planet::Jupiter, 5, 9));
        assert!(aspects(Planet::Jupiter, 5, 1));
        // Saturn in 10 aspects 12 and 7
        assert!(aspects(Planet::Saturn, 10, 12));
        assert!(aspects(Planet::Saturn, 10, 7));
        // Venus only the 7th
        assert!(aspects(Planet::Venus, 3, 9));
        assert!(!aspects(Planet::Venus, 3, 7));
    }

    #[test]
    fn test_mutual_aspect_either_direction() {
        // Jupiter in 5 aspects Venus in 1 (9th from 5), Venus does not return it
        assert!(is_mutual_aspect((Planet::Jupiter, 5), (Planet::Venus, 1)));
        assert!(!is_mutual_aspect((Planet::Mercury, 1), (Planet::Venus, 5)));
    }

    #[test]
    fn test_houses_between() {
        assert_eq!(houses_between(11, 3), vec![12, 1, 2]);
        assert!(houses_between(4, 5).is_empty());
    }
}
