//! Renunciation (Sanyasa) yogas.

use crate::chart::{join_planets, ChartContext, Planet, SEVEN_PLANETS};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::strength::{planet_strength, strength_from_support};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::geometry;
use crate::rules::lordship::sign_ruler;

pub const CATEGORY: &str = "Sanyasa Yoga";

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "sanyas.pravrajya",
        family: CATEGORY,
        emits: Emits::Generated(pravrajya_names),
        run: pravrajya,
    },
    Detector {
        id: "sanyas.kendra_pattern",
        family: CATEGORY,
        emits: Emits::Names(&["Sanyasa Yoga"]),
        run: kendra_pattern,
    },
    Detector {
        id: "sanyas.moon_sign_lord",
        family: CATEGORY,
        emits: Emits::Names(&["Diksha Yoga"]),
        run: moon_sign_lord,
    },
];

/// Order of ascetic path named by the strongest planet of the conjunction.
const ORDERS: [(Planet, &str); 7] = [
    (Planet::Sun, "Vanya"),
    (Planet::Moon, "Vriddha"),
    (Planet::Mars, "Shakya"),
    (Planet::Mercury, "Ajivika"),
    (Planet::Jupiter, "Bhikshu"),
    (Planet::Venus, "Charaka"),
    (Planet::Saturn, "Nirgrantha"),
];

fn order_of(planet: Planet) -> &'static str {
    ORDERS
        .iter()
        .find(|(p, _)| *p == planet)
        .map(|(_, order)| *order)
        .unwrap_or("Vanya")
}

fn pravrajya_name(order: &str) -> String {
    format!("Pravrajya Yoga ({})", order)
}

fn pravrajya_names() -> Vec<String> {
    ORDERS.iter().map(|(_, order)| pravrajya_name(order)).collect()
}

/// Four or more planets in one house.
fn pravrajya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mut records = Vec::new();
    for house in 1..=12u8 {
        let group = ctx.occupants(house, &SEVEN_PLANETS);
        if group.len() < 4 {
            continue;
        }
        // Strongest by tier; ties go to the planet listed first
        let Some(leader) = group
            .iter()
            .copied()
            .rev()
            .max_by_key(|p| planet_strength(ctx, *p))
        else {
            continue;
        };

        let mut builder = RawYogaRecord::builder(
            &pravrajya_name(order_of(leader)),
            YogaKind::ConjunctionCount,
            CATEGORY,
        )
        .description(format!(
            "Renunciation of worldly life led by {}; the path follows its nature.",
            leader.name()
        ))
        .formation(format!(
            "{} planets together in the {} house: {}",
            group.len(),
            ordinal(house),
            join_planets(&group)
        ))
        .planets(&group)
        .houses(&[house])
        .attribute("leader", leader.name())
        .attribute("count", group.len().to_string());

        let strength = planet_strength(ctx, leader);
        if ctx.is_combust(leader) {
            builder = builder
                .strength(Strength::Weak)
                .cancelled(&format!("{} is combust; inclination without formal renunciation", leader.name()));
        } else {
            builder = builder.strength(strength);
        }
        records.push(builder.build());
    }
    Ok(records)
}

/// Jupiter, Saturn and the Moon in kendras with Saturn aspecting the Moon or Jupiter.
fn kendra_pattern(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let planets = [Planet::Jupiter, Planet::Saturn, Planet::Moon];
    let Some(houses) = ctx.houses_of(&planets) else {
        return Ok(Vec::new());
    };
    if !houses.iter().all(|h| geometry::is_kendra_house(*h)) {
        return Ok(Vec::new());
    }
    let aspected: Vec<Planet> = [Planet::Moon, Planet::Jupiter]
        .iter()
        .copied()
        .filter(|p| ctx.aspects(Planet::Saturn, *p))
        .collect();
    if aspected.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![RawYogaRecord::builder("Sanyasa Yoga", YogaKind::ConjunctionCount, CATEGORY)
        .description("Detachment, discipline and a turn towards spiritual life.")
        .formation(format!(
            "Jupiter, Saturn and Moon in kendras; Saturn aspects {}",
            join_planets(&aspected)
        ))
        .strength(strength_from_support(aspected.len() + 1, 3))
        .planets(&planets)
        .houses(&houses)
        .build()])
}

/// The lord of the Moon's sign aspected by Saturn and by no other planet.
fn moon_sign_lord(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(moon_sign) = ctx.sign(Planet::Moon) else {
        return Ok(Vec::new());
    };
    let lord = sign_ruler(moon_sign)?;
    if lord == Planet::Saturn {
        return Ok(Vec::new());
    }
    let Some(lord_house) = ctx.house(lord) else {
        return Ok(Vec::new());
    };
    if !ctx.aspects(Planet::Saturn, lord) {
        return Ok(Vec::new());
    }
    let others: Vec<Planet> = SEVEN_PLANETS
        .iter()
        .copied()
        .filter(|p| *p != Planet::Saturn && *p != lord && ctx.aspects(*p, lord))
        .collect();
    if !others.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![RawYogaRecord::builder("Diksha Yoga", YogaKind::ConjunctionCount, CATEGORY)
        .description("Initiation into a spiritual order; austerity and withdrawal.")
        .formation(format!(
            "Moon-sign lord {} in the {} house aspected only by Saturn",
            lord.name(),
            ordinal(lord_house)
        ))
        .strength(Strength::Medium)
        .planets(&[Planet::Moon, lord, Planet::Saturn])
        .houses(&[lord_house])
        .build()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::config::EngineConfig;

    #[test]
    fn test_pravrajya_named_by_strongest() {
        // Aries rising, 10th = Capricorn: Mars exalted there leads
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Mars, 10)
            .place(Planet::Mercury, 10)
            .place(Planet::Venus, 10)
            .place(Planet::Saturn, 10)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = pravrajya(&ctx).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Pravrajya Yoga (Shakya)");
        assert!(pravrajya_names().contains(&records[0].name));
    }

    #[test]
    fn test_three_planets_are_not_enough() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Mars, 10)
            .place(Planet::Mercury, 10)
            .place(Planet::Venus, 10)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert!(pravrajya(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_kendra_pattern() {
        // Saturn in 1 aspects the 10th (Moon) by its 10th aspect
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Saturn, 1)
            .place(Planet::Moon, 10)
            .place(Planet::Jupiter, 4)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        assert_eq!(kendra_pattern(&ctx).unwrap().len(), 1);
    }
}
