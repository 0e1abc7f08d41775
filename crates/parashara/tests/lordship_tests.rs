use parashara::rules::lordship::{house_lord, signs_ruled_by, HouseLordMap};
use parashara::Planet;

#[test]
fn test_each_sign_has_one_ruler() {
    for planet in [Planet::Sun, Planet::Moon] {
        assert_eq!(signs_ruled_by(planet).len(), 1, "{:?}", planet);
    }
    for planet in [
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
    ] {
        assert_eq!(signs_ruled_by(planet).len(), 2, "{:?}", planet);
    }
    assert!(signs_ruled_by(Planet::Rahu).is_empty());
    assert!(signs_ruled_by(Planet::Ketu).is_empty());
}

#[test]
fn test_lord_map_agrees_with_house_lord() {
    for asc in 1..=12u8 {
        let map = HouseLordMap::for_ascendant(asc).unwrap();
        assert_eq!(map.ascendant_sign(), asc);
        let mut covered = 0;
        for (house, lord) in map.iter() {
            assert_eq!(house_lord(house, asc).unwrap(), lord);
            assert!(map.houses_ruled_by(lord).contains(&house));
            covered += 1;
        }
        assert_eq!(covered, 12);
    }
}

#[test]
fn test_out_of_range_input() {
    assert!(HouseLordMap::for_ascendant(0).is_err());
    assert!(HouseLordMap::for_ascendant(13).is_err());
    assert!(house_lord(13, 1).is_err());
    // Leo rising: Saturn rules the 6th and 7th
    let map = HouseLordMap::for_ascendant(5).unwrap();
    assert_eq!(map.houses_ruled_by(Planet::Saturn), vec![6, 7]);
}
