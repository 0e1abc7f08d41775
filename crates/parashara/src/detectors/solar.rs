//! Sun-relative yogas. Positions are counted from the Sun, not the Lagna.

use crate::chart::{join_planets, ChartContext, Planet, Reference, TARA_PLANETS};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::strength::{combined_strength, planet_strength};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::geometry;

pub const CATEGORY: &str = "Surya Yoga";

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "solar.vesi_vosi",
        family: CATEGORY,
        emits: Emits::Names(&["Vesi Yoga", "Vosi Yoga", "Ubhayachari Yoga"]),
        run: vesi_vosi,
    },
    Detector {
        id: "solar.budha_aditya",
        family: CATEGORY,
        emits: Emits::Names(&["Budha-Aditya Yoga"]),
        run: budha_aditya,
    },
    Detector {
        id: "solar.bhaskara",
        family: CATEGORY,
        emits: Emits::Names(&["Bhaskara Yoga"]),
        run: bhaskara,
    },
    Detector {
        id: "solar.ravi",
        family: CATEGORY,
        emits: Emits::Names(&["Ravi Yoga"]),
        run: ravi,
    },
];

/// "benefic", "malefic" or "mixed" for a group of planets.
pub fn nature_of(planets: &[Planet]) -> &'static str {
    let benefics = planets.iter().filter(|p| p.is_natural_benefic()).count();
    if benefics == planets.len() {
        "benefic"
    } else if benefics == 0 {
        "malefic"
    } else {
        "mixed"
    }
}

fn vesi_vosi(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.house(Planet::Sun).is_none() || !ctx.all_placed(&TARA_PLANETS) {
        return Ok(Vec::new());
    }
    let second = ctx.occupants_from(Reference::Sun, 2, &TARA_PLANETS);
    let twelfth = ctx.occupants_from(Reference::Sun, 12, &TARA_PLANETS);

    let (name, planets, formation, effect) = match (second.is_empty(), twelfth.is_empty()) {
        (true, true) => return Ok(Vec::new()),
        (false, true) => (
            "Vesi Yoga",
            second.clone(),
            format!("{} in the 2nd house from the Sun", join_planets(&second)),
            "Balanced outlook, truthfulness and steady prosperity",
        ),
        (true, false) => (
            "Vosi Yoga",
            twelfth.clone(),
            format!("{} in the 12th house from the Sun", join_planets(&twelfth)),
            "Skill, learning and generosity",
        ),
        (false, false) => {
            let both: Vec<Planet> = second.iter().chain(twelfth.iter()).copied().collect();
            (
                "Ubhayachari Yoga",
                both,
                format!(
                    "{} in the 2nd and {} in the 12th house from the Sun",
                    join_planets(&second),
                    join_planets(&twelfth)
                ),
                "Eloquence, fame and a life comparable to a king's",
            )
        }
    };

    let nature = nature_of(&planets);
    let description = match nature {
        "malefic" => format!("{}, coloured by harshness as the flanking planets are malefic.", effect),
        _ => format!("{}.", effect),
    };
    let mut all = planets.clone();
    all.push(Planet::Sun);

    Ok(vec![RawYogaRecord::builder(name, YogaKind::SunRelative, CATEGORY)
        .description(description)
        .formation(formation)
        .strength(combined_strength(ctx, &planets))
        .planets(&all)
        .houses(&ctx.houses_of(&all).unwrap_or_default())
        .attribute("nature", nature)
        .attribute("reference", Reference::Sun.label())
        .build()])
}

fn budha_aditya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(sun), Some(_)) = (ctx.house(Planet::Sun), ctx.house(Planet::Mercury)) else {
        return Ok(Vec::new());
    };
    if !ctx.conjunct(Planet::Sun, Planet::Mercury) {
        return Ok(Vec::new());
    }

    let mut strength = combined_strength(ctx, &[Planet::Sun, Planet::Mercury]);
    if geometry::is_kendra_house(sun) || geometry::is_trikona_house(sun) {
        strength = strength.raised();
    }

    let mut builder = RawYogaRecord::builder("Budha-Aditya Yoga", YogaKind::SunRelative, CATEGORY)
        .description("Intelligence, analytical skill and good reputation through learning and communication.")
        .formation(format!("Sun and Mercury together in the {} house", ordinal(sun)))
        .planets(&[Planet::Sun, Planet::Mercury])
        .houses(&[sun]);

    // Mercury closer than 3 degrees to the Sun loses the yoga's benefit
    match ctx.separation(Planet::Sun, Planet::Mercury) {
        Some(sep) if sep < 3.0 => {
            builder = builder
                .strength(Strength::Weak)
                .weakened(&format!("Mercury deeply combust ({:.1} degrees from the Sun)", sep));
        }
        _ => builder = builder.strength(strength),
    }
    Ok(vec![builder.build()])
}

fn bhaskara(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(mercury_from_sun), Some(moon_from_mercury), Some(jupiter_from_moon)) = (
        ctx.position_from(Reference::Sun, Planet::Mercury),
        ctx.position_from(Reference::Planet(Planet::Mercury), Planet::Moon),
        ctx.position_from(Reference::Moon, Planet::Jupiter),
    ) else {
        return Ok(Vec::new());
    };
    if mercury_from_sun != 2 || moon_from_mercury != 11 || !matches!(jupiter_from_moon, 5 | 9) {
        return Ok(Vec::new());
    }
    let planets = [Planet::Sun, Planet::Mercury, Planet::Moon, Planet::Jupiter];
    Ok(vec![RawYogaRecord::builder("Bhaskara Yoga", YogaKind::SunRelative, CATEGORY)
        .description("Courage, learning in scriptures and sciences, wealth and a commanding presence.")
        .formation(format!(
            "Mercury 2nd from the Sun, Moon 11th from Mercury, Jupiter {} from the Moon",
            ordinal(jupiter_from_moon)
        ))
        .strength(combined_strength(ctx, &planets))
        .planets(&planets)
        .houses(&ctx.houses_of(&planets).unwrap_or_default())
        .build()])
}

fn ravi(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(sun), Some(tenth_lord), Some(saturn)) = (
        ctx.position_from(Reference::Lagna, Planet::Sun),
        ctx.lord_of(10),
        ctx.house(Planet::Saturn),
    ) else {
        return Ok(Vec::new());
    };
    let Some(lord_house) = ctx.house(tenth_lord) else {
        return Ok(Vec::new());
    };
    if sun != 10 || lord_house != 3 || saturn != 3 {
        return Ok(Vec::new());
    }
    let planets = [Planet::Sun, tenth_lord, Planet::Saturn];
    Ok(vec![RawYogaRecord::builder("Ravi Yoga", YogaKind::SunRelative, CATEGORY)
        .description("High position through technical or scientific work and recognition from authority.")
        .formation(format!(
            "Sun in the 10th house; 10th lord {} in the 3rd with Saturn",
            tenth_lord.name()
        ))
        .strength(planet_strength(ctx, Planet::Sun).max(Strength::Medium))
        .planets(&planets)
        .houses(&[10, 3])
        .build()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::config::EngineConfig;

    #[test]
    fn test_vesi_counts_from_sun_not_lagna() {
        // Sun in 5, Venus in 6: Venus is 2nd from the Sun but 6th from Lagna
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 5)
            .place(Planet::Venus, 6)
            .place(Planet::Moon, 4)
            .place(Planet::Mercury, 5)
            .place(Planet::Mars, 9)
            .place(Planet::Jupiter, 1)
            .place(Planet::Saturn, 10)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = vesi_vosi(&ctx).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Vesi Yoga");
        assert_eq!(records[0].attribute("nature"), Some("benefic"));
    }

    #[test]
    fn test_ubhayachari_and_moon_excluded() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 5)
            .place(Planet::Mars, 6)
            .place(Planet::Saturn, 4)
            .place(Planet::Moon, 6)
            .place(Planet::Mercury, 5)
            .place(Planet::Jupiter, 9)
            .place(Planet::Venus, 7)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = vesi_vosi(&ctx).unwrap();
        assert_eq!(records[0].name, "Ubhayachari Yoga");
        assert_eq!(records[0].attribute("nature"), Some("malefic"));
        assert!(!records[0].yoga_forming_planets.contains(&Planet::Moon));
    }

    #[test]
    fn test_vesi_waits_for_every_planet() {
        // Mars is 2nd from the Sun, but Mercury could be in the 12th
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 1)
            .place(Planet::Mars, 2)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert!(vesi_vosi(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_budha_aditya_deep_combustion() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 10)
            .place(Planet::Mercury, 10)
            .longitude(Planet::Sun, 280.0)
            .longitude(Planet::Mercury, 281.5)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = budha_aditya(&ctx).unwrap();
        assert_eq!(records[0].strength, Strength::Weak);
        assert!(records[0].has_cancellation_note());
    }
}
