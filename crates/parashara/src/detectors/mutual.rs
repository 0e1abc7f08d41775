//! Yogas formed by several planets or lords standing in a relationship to
//! each other.
//!
//! Pairwise relationships are always measured between the participants
//! themselves. Lordship needs the ascendant; without it these detectors
//! return nothing.

use crate::chart::{join_planets, ChartContext, Planet, Reference};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::strength::{combined_strength, planet_strength, strength_from_support};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

pub const CATEGORY: &str = "Mutual Combination";

const BENEFICS: [Planet; 3] = [Planet::Mercury, Planet::Jupiter, Planet::Venus];
const MALEFICS: [Planet; 5] = [Planet::Sun, Planet::Mars, Planet::Saturn, Planet::Rahu, Planet::Ketu];

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "mutual.saraswati",
        family: CATEGORY,
        emits: Emits::Names(&["Saraswati Yoga"]),
        run: saraswati,
    },
    Detector {
        id: "mutual.guru_mangala",
        family: CATEGORY,
        emits: Emits::Names(&["Guru-Mangala Yoga"]),
        run: guru_mangala,
    },
    Detector {
        id: "mutual.lakshmi",
        family: CATEGORY,
        emits: Emits::Names(&["Lakshmi Yoga"]),
        run: lakshmi,
    },
    Detector {
        id: "mutual.parvata",
        family: CATEGORY,
        emits: Emits::Names(&["Parvata Yoga"]),
        run: parvata,
    },
    Detector {
        id: "mutual.kahala",
        family: CATEGORY,
        emits: Emits::Names(&["Kahala Yoga"]),
        run: kahala,
    },
    Detector {
        id: "mutual.chamara",
        family: CATEGORY,
        emits: Emits::Names(&["Chamara Yoga"]),
        run: chamara,
    },
    Detector {
        id: "mutual.shankha",
        family: CATEGORY,
        emits: Emits::Names(&["Shankha Yoga"]),
        run: shankha,
    },
    Detector {
        id: "mutual.bheri",
        family: CATEGORY,
        emits: Emits::Names(&["Bheri Yoga"]),
        run: bheri,
    },
    Detector {
        id: "mutual.mridanga",
        family: CATEGORY,
        emits: Emits::Names(&["Mridanga Yoga"]),
        run: mridanga,
    },
    Detector {
        id: "mutual.kusuma",
        family: CATEGORY,
        emits: Emits::Names(&["Kusuma Yoga"]),
        run: kusuma,
    },
    Detector {
        id: "mutual.gauri",
        family: CATEGORY,
        emits: Emits::Names(&["Gauri Yoga"]),
        run: gauri,
    },
    Detector {
        id: "mutual.srinatha",
        family: CATEGORY,
        emits: Emits::Names(&["Srinatha Yoga"]),
        run: srinatha,
    },
    Detector {
        id: "mutual.khadga",
        family: CATEGORY,
        emits: Emits::Names(&["Khadga Yoga"]),
        run: khadga,
    },
    Detector {
        id: "mutual.matsya",
        family: CATEGORY,
        emits: Emits::Names(&["Matsya Yoga"]),
        run: matsya,
    },
    Detector {
        id: "mutual.kurma",
        family: CATEGORY,
        emits: Emits::Names(&["Kurma Yoga"]),
        run: kurma,
    },
    Detector {
        id: "mutual.shubha",
        family: CATEGORY,
        emits: Emits::Names(&["Shubha Yoga"]),
        run: shubha,
    },
];

/// Kendra, trikona, or 2nd/12th from each other.
fn favourably_placed(a: u8, b: u8) -> bool {
    let distance = geometry::house_distance(a, b);
    geometry::is_kendra(distance) || geometry::is_trikona(distance) || geometry::is_second_apart(distance)
}

fn lagna_lord_strong(ctx: &ChartContext) -> Option<Planet> {
    let lord = ctx.lord_of(1)?;
    let dignity = ctx.dignity(lord)?;
    (dignity >= Dignity::Friendly && !ctx.is_combust(lord)).then_some(lord)
}

/// Two lords stand in kendras from each other (same house included).
fn lords_in_mutual_kendra(ctx: &ChartContext, first: u8, second: u8) -> Option<(Planet, Planet, u8, u8)> {
    let (a, b) = (ctx.lord_of(first)?, ctx.lord_of(second)?);
    let (ha, hb) = (ctx.house(a)?, ctx.house(b)?);
    geometry::is_kendra(geometry::house_distance(ha, hb)).then_some((a, b, ha, hb))
}

fn record(name: &str) -> crate::detectors::YogaBuilder {
    RawYogaRecord::builder(name, YogaKind::MultiPlanetMutual, CATEGORY)
}

fn saraswati(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let planets = [Planet::Mercury, Planet::Jupiter, Planet::Venus];
    let Some(houses) = ctx.houses_of(&planets) else {
        return Ok(Vec::new());
    };

    let pairs = [(0, 1), (0, 2), (1, 2)];
    if !pairs
        .iter()
        .all(|(i, j)| favourably_placed(houses[*i], houses[*j]))
    {
        return Ok(Vec::new());
    }

    // Favourable geometry alone is not enough: one pair must actually meet
    let connected = pairs.iter().any(|(i, j)| {
        ctx.conjunct(planets[*i], planets[*j]) || ctx.mutual_aspect(planets[*i], planets[*j])
    });
    if !connected {
        return Ok(Vec::new());
    }

    let strong = planets.iter().filter(|p| ctx.is_strong(**p)).count();
    if strong == 0 {
        return Ok(Vec::new());
    }
    let strength = match strong {
        3 => Strength::VeryStrong,
        2 => Strength::Strong,
        _ => Strength::Medium,
    };
    let jupiter_dignity = ctx
        .dignity(Planet::Jupiter)
        .map(|d| d.label())
        .unwrap_or("Unknown");

    Ok(vec![record("Saraswati Yoga")
        .description("Learning, eloquence and mastery of arts and sciences; blessings of the goddess of wisdom.")
        .formation(format!(
            "Mercury ({}), Jupiter ({}) and Venus ({}) in kendra, trikona or 2nd from each other",
            ordinal(houses[0]),
            ordinal(houses[1]),
            ordinal(houses[2])
        ))
        .strength(strength)
        .planets(&planets)
        .houses(&houses)
        .attribute("jupiter_strength", jupiter_dignity)
        .attribute("strong_planets", strong.to_string())
        .build()])
}

fn guru_mangala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(jupiter), Some(mars)) = (ctx.house(Planet::Jupiter), ctx.house(Planet::Mars)) else {
        return Ok(Vec::new());
    };
    let formation = if jupiter == mars {
        format!("Jupiter and Mars together in the {} house", ordinal(jupiter))
    } else if geometry::house_distance(jupiter, mars) == 6 {
        format!(
            "Jupiter in the {} and Mars in the {} house opposing each other",
            ordinal(jupiter),
            ordinal(mars)
        )
    } else {
        return Ok(Vec::new());
    };
    Ok(vec![record("Guru-Mangala Yoga")
        .description("Energy guided by wisdom: success in technical, legal or administrative work.")
        .formation(formation)
        .strength(combined_strength(ctx, &[Planet::Jupiter, Planet::Mars]))
        .planets(&[Planet::Jupiter, Planet::Mars])
        .houses(&[jupiter, mars])
        .build()])
}

fn lakshmi(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(ninth_lord), Some(lagna_lord)) = (ctx.lord_of(9), lagna_lord_strong(ctx)) else {
        return Ok(Vec::new());
    };
    let (Some(house), Some(dignity)) = (ctx.house(ninth_lord), ctx.dignity(ninth_lord)) else {
        return Ok(Vec::new());
    };
    if !(geometry::is_kendra_house(house) || geometry::is_trikona_house(house)) {
        return Ok(Vec::new());
    }
    let strength = match dignity {
        Dignity::Exalted => Strength::VeryStrong,
        Dignity::OwnSign => Strength::Strong,
        _ => return Ok(Vec::new()),
    };
    Ok(vec![record("Lakshmi Yoga")
        .description("Wealth, nobility and good fortune; a generous and respected person.")
        .formation(format!(
            "9th lord {} {} in the {} house; Lagna lord {} well placed",
            ninth_lord.name(),
            dignity.label().to_lowercase(),
            ordinal(house),
            lagna_lord.name()
        ))
        .strength(strength)
        .planets(&[ninth_lord, lagna_lord])
        .houses(&[house])
        .attribute("ninth_lord_dignity", dignity.label())
        .build()])
}

fn parvata(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.lords().is_none() || !ctx.all_placed(&MALEFICS) {
        return Ok(Vec::new());
    }
    let in_kendra: Vec<Planet> = BENEFICS
        .iter()
        .copied()
        .filter(|p| ctx.house(*p).map(geometry::is_kendra_house).unwrap_or(false))
        .collect();
    if in_kendra.len() < 2 {
        return Ok(Vec::new());
    }
    let afflicted = [6u8, 8]
        .iter()
        .any(|h| !ctx.occupants(*h, &MALEFICS).is_empty());
    if afflicted {
        return Ok(Vec::new());
    }
    Ok(vec![record("Parvata Yoga")
        .description("Prosperity, eloquence, charity and leadership in one's community.")
        .formation(format!(
            "{} in kendras with the 6th and 8th houses free of malefics",
            join_planets(&in_kendra)
        ))
        .strength(combined_strength(ctx, &in_kendra))
        .planets(&in_kendra)
        .houses(&ctx.houses_of(&in_kendra).unwrap_or_default())
        .build()])
}

fn kahala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some((fourth, ninth, h4, h9)), Some(lagna_lord)) =
        (lords_in_mutual_kendra(ctx, 4, 9), lagna_lord_strong(ctx))
    else {
        return Ok(Vec::new());
    };
    Ok(vec![record("Kahala Yoga")
        .description("Boldness, stubborn courage and command over a small domain or group.")
        .formation(format!(
            "4th lord {} ({}) and 9th lord {} ({}) in kendras from each other; Lagna lord {} strong",
            fourth.name(),
            ordinal(h4),
            ninth.name(),
            ordinal(h9),
            lagna_lord.name()
        ))
        .strength(combined_strength(ctx, &[fourth, ninth]))
        .planets(&[fourth, ninth, lagna_lord])
        .houses(&[h4, h9])
        .build()])
}

fn chamara(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lagna_lord) = ctx.lord_of(1) else {
        return Ok(Vec::new());
    };
    if let (Some(house), Some(Dignity::Exalted)) = (ctx.house(lagna_lord), ctx.dignity(lagna_lord)) {
        if geometry::is_kendra_house(house) && ctx.aspects_house(Planet::Jupiter, house) {
            return Ok(vec![record("Chamara Yoga")
                .description("Royal honours, learning and eloquence; a long and respected life.")
                .formation(format!(
                    "Lagna lord {} exalted in the {} house and aspected by Jupiter",
                    lagna_lord.name(),
                    ordinal(house)
                ))
                .strength(Strength::VeryStrong)
                .planets(&[lagna_lord, Planet::Jupiter])
                .houses(&[house])
                .attribute("variant", "exalted lagna lord")
                .build()]);
        }
    }

    for house in [1u8, 7, 9, 10] {
        let benefics = ctx.occupants(house, &BENEFICS);
        if benefics.len() >= 2 {
            return Ok(vec![record("Chamara Yoga")
                .description("Royal honours, learning and eloquence; a long and respected life.")
                .formation(format!(
                    "{} together in the {} house",
                    join_planets(&benefics),
                    ordinal(house)
                ))
                .strength(combined_strength(ctx, &benefics))
                .planets(&benefics)
                .houses(&[house])
                .attribute("variant", "benefics together")
                .build()]);
        }
    }
    Ok(Vec::new())
}

fn shankha(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some((fifth, sixth, h5, h6)), Some(lagna_lord)) =
        (lords_in_mutual_kendra(ctx, 5, 6), lagna_lord_strong(ctx))
    else {
        return Ok(Vec::new());
    };
    Ok(vec![record("Shankha Yoga")
        .description("Humane disposition, a good spouse and children, long life and righteous wealth.")
        .formation(format!(
            "5th lord {} ({}) and 6th lord {} ({}) in kendras from each other; Lagna lord {} strong",
            fifth.name(),
            ordinal(h5),
            sixth.name(),
            ordinal(h6),
            lagna_lord.name()
        ))
        .strength(combined_strength(ctx, &[fifth, sixth, lagna_lord]))
        .planets(&[fifth, sixth, lagna_lord])
        .houses(&[h5, h6])
        .build()])
}

fn bheri(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(lagna_lord), Some(ninth_lord)) = (ctx.lord_of(1), ctx.lord_of(9)) else {
        return Ok(Vec::new());
    };
    let participants = [Planet::Venus, Planet::Jupiter, lagna_lord];
    let Some(houses) = ctx.houses_of(&participants) else {
        return Ok(Vec::new());
    };
    if !houses.iter().all(|h| geometry::is_kendra_house(*h)) {
        return Ok(Vec::new());
    }
    if ctx.dignity(ninth_lord).map(|d| d < Dignity::Friendly).unwrap_or(true) {
        return Ok(Vec::new());
    }
    let mut planets = participants.to_vec();
    planets.push(ninth_lord);
    Ok(vec![record("Bheri Yoga")
        .description("Long life, wealth, a fine family and fame that spreads like the sound of a drum.")
        .formation(format!(
            "Venus, Jupiter and Lagna lord {} in kendras; 9th lord {} strong",
            lagna_lord.name(),
            ninth_lord.name()
        ))
        .strength(combined_strength(ctx, &planets))
        .planets(&planets)
        .houses(&houses)
        .build()])
}

fn mridanga(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lagna_lord) = ctx.lord_of(1) else {
        return Ok(Vec::new());
    };
    if !ctx.is_dignified(lagna_lord) {
        return Ok(Vec::new());
    }
    let supporters: Vec<Planet> = crate::chart::SEVEN_PLANETS
        .iter()
        .copied()
        .filter(|p| *p != lagna_lord && ctx.is_dignified(*p))
        .filter(|p| {
            ctx.house(*p)
                .map(|h| geometry::is_kendra_house(h) || geometry::is_trikona_house(h))
                .unwrap_or(false)
        })
        .collect();
    if supporters.is_empty() {
        return Ok(Vec::new());
    }
    let mut planets = vec![lagna_lord];
    planets.extend(supporters.iter().copied());
    Ok(vec![record("Mridanga Yoga")
        .description("Authority, comfort and renown; a leader among kinsmen.")
        .formation(format!(
            "Lagna lord {} dignified; {} dignified in kendra or trikona",
            lagna_lord.name(),
            join_planets(&supporters)
        ))
        .strength(strength_from_support(supporters.len(), 3))
        .planets(&planets)
        .houses(&ctx.houses_of(&planets).unwrap_or_default())
        .build()])
}

fn kusuma(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(jupiter), Some(moon), Some(sun_from_moon)) = (
        ctx.position_from(Reference::Lagna, Planet::Jupiter),
        ctx.position_from(Reference::Lagna, Planet::Moon),
        ctx.position_from(Reference::Moon, Planet::Sun),
    ) else {
        return Ok(Vec::new());
    };
    if jupiter != 1 || moon != 7 || sun_from_moon != 8 {
        return Ok(Vec::new());
    }
    let planets = [Planet::Jupiter, Planet::Moon, Planet::Sun];
    Ok(vec![record("Kusuma Yoga")
        .description("Comfort, learning and a prominent position; respected like a flower among leaves.")
        .formation("Jupiter in the Lagna, Moon in the 7th, Sun in the 8th from the Moon")
        .strength(combined_strength(ctx, &planets))
        .planets(&planets)
        .houses(&ctx.houses_of(&planets).unwrap_or_default())
        .build()])
}

fn gauri(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(moon), Some(Dignity::Exalted)) = (ctx.house(Planet::Moon), ctx.dignity(Planet::Moon)) else {
        return Ok(Vec::new());
    };
    if !(geometry::is_kendra_house(moon) || geometry::is_trikona_house(moon)) {
        return Ok(Vec::new());
    }
    if !ctx.aspects(Planet::Jupiter, Planet::Moon) {
        return Ok(Vec::new());
    }
    Ok(vec![record("Gauri Yoga")
        .description("Praise from rulers, a virtuous family and a life of comfort and devotion.")
        .formation(format!(
            "Exalted Moon in the {} house aspected by Jupiter",
            ordinal(moon)
        ))
        .strength(Strength::Strong)
        .planets(&[Planet::Moon, Planet::Jupiter])
        .houses(&[moon])
        .build()])
}

fn srinatha(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(seventh), Some(tenth), Some(ninth)) = (ctx.lord_of(7), ctx.lord_of(10), ctx.lord_of(9)) else {
        return Ok(Vec::new());
    };
    if ctx.house(seventh) != Some(10) || ctx.dignity(seventh) != Some(Dignity::Exalted) {
        return Ok(Vec::new());
    }
    if tenth != ninth && !ctx.conjunct(tenth, ninth) {
        return Ok(Vec::new());
    }
    let planets = [seventh, tenth, ninth];
    Ok(vec![record("Srinatha Yoga")
        .description("Wealth, eloquence and devotion; favoured like the consort of Lakshmi.")
        .formation(format!(
            "7th lord {} exalted in the 10th house; 10th lord {} with 9th lord {}",
            seventh.name(),
            tenth.name(),
            ninth.name()
        ))
        .strength(Strength::VeryStrong)
        .planets(&planets)
        .houses(&ctx.houses_of(&planets).unwrap_or_default())
        .build()])
}

fn khadga(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(second), Some(ninth), Some(lagna_lord)) = (ctx.lord_of(2), ctx.lord_of(9), ctx.lord_of(1)) else {
        return Ok(Vec::new());
    };
    if ctx.house(second) != Some(9) || ctx.house(ninth) != Some(2) {
        return Ok(Vec::new());
    }
    let Some(lagna_house) = ctx.house(lagna_lord) else {
        return Ok(Vec::new());
    };
    if !(geometry::is_kendra_house(lagna_house) || geometry::is_trikona_house(lagna_house)) {
        return Ok(Vec::new());
    }
    let planets = [second, ninth, lagna_lord];
    Ok(vec![record("Khadga Yoga")
        .description("Wealth through fortune and learning, skill and gratitude.")
        .formation(format!(
            "2nd lord {} in the 9th, 9th lord {} in the 2nd; Lagna lord in the {} house",
            second.name(),
            ninth.name(),
            ordinal(lagna_house)
        ))
        .strength(combined_strength(ctx, &planets))
        .planets(&planets)
        .houses(&[2, 9, lagna_house])
        .build()])
}

fn matsya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.lords().is_none() || !ctx.all_placed(&BENEFICS) || !ctx.all_placed(&MALEFICS) {
        return Ok(Vec::new());
    }
    let first = ctx.occupants(1, &MALEFICS);
    let ninth = ctx.occupants(9, &MALEFICS);
    let fifth = ctx.occupants(5, &BENEFICS);
    if first.is_empty() || ninth.is_empty() || fifth.is_empty() {
        return Ok(Vec::new());
    }
    if ctx.planets_in(4).is_empty() || ctx.planets_in(8).is_empty() {
        return Ok(Vec::new());
    }
    let planets: Vec<Planet> = first.iter().chain(&ninth).chain(&fifth).copied().collect();
    Ok(vec![record("Matsya Yoga")
        .description("Intuition, compassion and learning; fame in religious or charitable work.")
        .formation(format!(
            "Malefics in the 1st ({}) and 9th ({}), benefics in the 5th ({}), 4th and 8th occupied",
            join_planets(&first),
            join_planets(&ninth),
            join_planets(&fifth)
        ))
        .strength(Strength::Medium)
        .planets(&planets)
        .houses(&[1, 4, 5, 8, 9])
        .build()])
}

fn kurma(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.lords().is_none() || !ctx.all_placed(&MALEFICS) {
        return Ok(Vec::new());
    }
    let houses = [5u8, 6, 7];
    if houses.iter().any(|h| !ctx.occupants(*h, &MALEFICS).is_empty()) {
        return Ok(Vec::new());
    }
    let mut placed = Vec::new();
    let mut filled = 0;
    for house in houses {
        let good: Vec<Planet> = ctx
            .occupants(house, &BENEFICS)
            .into_iter()
            .filter(|p| ctx.dignity(*p).map(|d| d >= Dignity::Friendly).unwrap_or(false))
            .collect();
        if !good.is_empty() {
            filled += 1;
            placed.extend(good);
        }
    }
    if filled < 2 {
        return Ok(Vec::new());
    }
    Ok(vec![record("Kurma Yoga")
        .description("Steady happiness, fame and a virtuous, protective nature.")
        .formation(format!(
            "{} well placed in the 5th, 6th and 7th houses without malefics",
            join_planets(&placed)
        ))
        .strength(strength_from_support(filled, houses.len()))
        .planets(&placed)
        .houses(&ctx.houses_of(&placed).unwrap_or_default())
        .build()])
}

fn shubha(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.lords().is_none() || !ctx.all_placed(&MALEFICS) {
        return Ok(Vec::new());
    }
    let benefics = ctx.occupants(1, &BENEFICS);
    if benefics.is_empty() || !ctx.occupants(1, &MALEFICS).is_empty() {
        return Ok(Vec::new());
    }
    let strength = benefics
        .iter()
        .map(|p| planet_strength(ctx, *p))
        .max()
        .unwrap_or(Strength::Medium);
    Ok(vec![record("Shubha Yoga")
        .description("Good health, pleasant appearance and an auspicious start to ventures.")
        .formation(format!("{} in the Lagna with no malefic", join_planets(&benefics)))
        .strength(strength)
        .planets(&benefics)
        .houses(&[1])
        .build()])
}
