//! Nitya yoga: one of 27 fixed bands of the Moon-Sun angle.
//!
//! The angle `(Moon - Sun) mod 360` is split into 27 bands of 13°20'. Every
//! chart with both longitudes has exactly one Nitya yoga, including a 0°
//! angle when the two longitudes coincide.

use crate::chart::{ChartContext, Planet};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::{Detector, Emits};
use crate::error::YogaError;

pub const CATEGORY: &str = "Nitya Yoga";

/// Width of one band in degrees (13°20').
pub const BAND_WIDTH: f64 = 360.0 / 27.0;

pub static DETECTORS: &[Detector] = &[Detector {
    id: "nitya.band",
    family: CATEGORY,
    emits: Emits::Generated(nitya_names),
    run: nitya,
}];

#[derive(Debug, Clone, Copy)]
pub struct NityaYoga {
    pub name: &'static str,
    pub auspicious: bool,
    pub effect: &'static str,
}

const fn n(name: &'static str, auspicious: bool, effect: &'static str) -> NityaYoga {
    NityaYoga {
        name,
        auspicious,
        effect,
    }
}

pub static NITYA_YOGAS: [NityaYoga; 27] = [
    n("Vishkambha", false, "Victory over opponents, wealth and property"),
    n("Priti", true, "Affectionate, liked by others and content"),
    n("Ayushman", true, "Long life, good health and vitality"),
    n("Saubhagya", true, "Good fortune, comforts and a happy marriage"),
    n("Shobhana", true, "Attractive, cheerful and fond of pleasures"),
    n("Atiganda", false, "Obstacles early in life and a quick temper"),
    n("Sukarma", true, "Virtuous deeds, generosity and success in work"),
    n("Dhriti", true, "Patience, steadiness and wealth gained over time"),
    n("Shoola", false, "Sharp pains, quarrels and a combative nature"),
    n("Ganda", false, "Troubles and dangers that call for caution"),
    n("Vriddhi", true, "Growth, learning and steady increase of assets"),
    n("Dhruva", true, "Stability, endurance and a firm mind"),
    n("Vyaghata", false, "Harshness, conflict and sudden setbacks"),
    n("Harshana", true, "Joy, intelligence and a cheerful temperament"),
    n("Vajra", false, "Forceful and strong-willed, with unexpected turns"),
    n("Siddhi", true, "Accomplishment, skill and success in undertakings"),
    n("Vyatipata", false, "Reversals and unreliability; care needed in dealings"),
    n("Variyan", true, "Comforts, luxury and artistic taste"),
    n("Parigha", false, "Obstruction, delays and friction with others"),
    n("Shiva", true, "Auspicious, learned and respected by authority"),
    n("Siddha", true, "Spiritual merit, skill and a pleasant nature"),
    n("Sadhya", true, "Good conduct, accomplishment through discipline"),
    n("Shubha", true, "Auspicious, prosperous and well-formed"),
    n("Shukla", true, "Clear mind, eloquence and righteousness"),
    n("Brahma", true, "Learning, wisdom and trustworthiness"),
    n("Indra", true, "Leadership, authority and prosperity"),
    n("Vaidhriti", false, "Restlessness, scheming and instability"),
];

/// Canonical name of a Nitya yoga. The suffix keeps it apart from Nabhasa
/// and other yogas of the same name.
pub fn nitya_name(yoga: &NityaYoga) -> String {
    format!("{} Nitya Yoga", yoga.name)
}

fn nitya_names() -> Vec<String> {
    NITYA_YOGAS.iter().map(nitya_name).collect()
}

/// Band index (0-26) for a Moon and Sun longitude.
pub fn band_index(moon_longitude: f64, sun_longitude: f64) -> usize {
    let angle = (moon_longitude - sun_longitude).rem_euclid(360.0);
    ((angle / BAND_WIDTH).floor() as usize).min(NITYA_YOGAS.len() - 1)
}

fn nitya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    // A longitude of exactly 0.0 is valid; only a missing value skips
    let (Some(moon), Some(sun)) = (ctx.longitude(Planet::Moon), ctx.longitude(Planet::Sun)) else {
        return Ok(Vec::new());
    };

    let index = band_index(moon, sun);
    let yoga = &NITYA_YOGAS[index];
    let angle = (moon - sun).rem_euclid(360.0);
    let start = index as f64 * BAND_WIDTH;

    let mut builder = RawYogaRecord::builder(&nitya_name(yoga), YogaKind::FixedAngle, CATEGORY)
        .description(format!("{}.", yoga.effect))
        .formation(format!(
            "Moon-Sun angle {:.2} degrees, band {} of 27 ({:.2} to {:.2})",
            angle,
            index + 1,
            start,
            start + BAND_WIDTH
        ))
        .strength(Strength::Medium)
        .planets(&[Planet::Moon, Planet::Sun])
        .attribute("band", (index + 1).to_string())
        .attribute("auspicious", yoga.auspicious.to_string());
    if let Some(houses) = ctx.houses_of(&[Planet::Moon, Planet::Sun]) {
        builder = builder.houses(&houses);
    }
    Ok(vec![builder.build()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::config::EngineConfig;

    fn run(moon: f64, sun: f64) -> Vec<RawYogaRecord> {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Moon, 1)
            .place(Planet::Sun, 1)
            .longitude(Planet::Moon, moon)
            .longitude(Planet::Sun, sun)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        nitya(&ctx).unwrap()
    }

    #[test]
    fn test_zero_angle_is_first_band() {
        let records = run(0.0, 0.0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Vishkambha Nitya Yoga");

        let records = run(123.4, 123.4);
        assert_eq!(records[0].name, "Vishkambha Nitya Yoga");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(band_index(13.3, 0.0), 0);
        assert_eq!(band_index(13.34, 0.0), 1);
        assert_eq!(band_index(359.99, 0.0), 26);
        // Wraps when the Moon is behind the Sun
        assert_eq!(band_index(10.0, 20.0), 26);
    }

    #[test]
    fn test_exactly_one_per_chart() {
        let mut moon = 0.0;
        while moon < 360.0 {
            assert_eq!(run(moon, 17.5).len(), 1);
            moon += 7.3;
        }
    }

    #[test]
    fn test_missing_longitude_skips() {
        let chart = Chart::builder().ascendant(1).place(Planet::Moon, 1).build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert!(nitya(&ctx).unwrap().is_empty());
    }
}
