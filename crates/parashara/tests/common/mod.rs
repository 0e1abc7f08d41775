#![allow(dead_code)]

use parashara::{Chart, Planet};

/// Whole-sign chart from sidereal longitudes.
pub fn chart_from_longitudes(ascendant_longitude: f64, planets: &[(Planet, f64)]) -> Chart {
    let asc_sign = sign_of(ascendant_longitude);
    let mut builder = Chart::builder()
        .ascendant(asc_sign)
        .ascendant_longitude(ascendant_longitude);
    for (planet, lon) in planets {
        let sign = sign_of(*lon);
        let house = ((sign as i16 - asc_sign as i16).rem_euclid(12) + 1) as u8;
        builder = builder.place_in_sign(*planet, house, sign).longitude(*planet, *lon);
    }
    builder.build()
}

pub fn sign_of(longitude: f64) -> u8 {
    ((longitude.rem_euclid(360.0) / 30.0) as u8).min(11) + 1
}

/// Leo rising, all nine grahas.
pub fn leo_chart() -> Chart {
    chart_from_longitudes(
        130.0,
        &[
            (Planet::Sun, 280.0),
            (Planet::Moon, 45.0),
            (Planet::Mars, 200.0),
            (Planet::Mercury, 265.0),
            (Planet::Jupiter, 95.0),
            (Planet::Venus, 300.0),
            (Planet::Saturn, 290.0),
            (Planet::Rahu, 15.0),
            (Planet::Ketu, 195.0),
        ],
    )
}

/// Scorpio rising, all nine grahas.
pub fn scorpio_chart() -> Chart {
    chart_from_longitudes(
        215.0,
        &[
            (Planet::Sun, 10.0),
            (Planet::Moon, 100.0),
            (Planet::Mars, 305.0),
            (Planet::Mercury, 25.0),
            (Planet::Jupiter, 250.0),
            (Planet::Venus, 340.0),
            (Planet::Saturn, 195.0),
            (Planet::Rahu, 60.0),
            (Planet::Ketu, 240.0),
        ],
    )
}

pub const FIXTURE_JSON: &str = include_str!("../fixtures/leo_chart.json");
