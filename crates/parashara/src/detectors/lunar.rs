//! Moon-relative yogas (Chandra yogas).
//!
//! Positions are counted from the Moon unless a detector names another
//! reference explicitly.

use crate::chart::{join_planets, ChartContext, Planet, Reference, SEVEN_PLANETS, TARA_PLANETS};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::solar::nature_of;
use crate::detectors::strength::{combined_strength, planet_strength, strength_from_support};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

pub const CATEGORY: &str = "Chandra Yoga";

const BENEFICS: [Planet; 3] = [Planet::Mercury, Planet::Jupiter, Planet::Venus];
const MALEFICS: [Planet; 4] = [Planet::Mars, Planet::Saturn, Planet::Rahu, Planet::Ketu];

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "lunar.sunapha_anapha",
        family: CATEGORY,
        emits: Emits::Names(&["Sunapha Yoga", "Anapha Yoga", "Durudhara Yoga"]),
        run: sunapha_anapha,
    },
    Detector {
        id: "lunar.kemadruma",
        family: CATEGORY,
        emits: Emits::Names(&["Kemadruma Yoga"]),
        run: kemadruma,
    },
    Detector {
        id: "lunar.gaja_kesari",
        family: CATEGORY,
        emits: Emits::Names(&["Gaja Kesari Yoga"]),
        run: gaja_kesari,
    },
    Detector {
        id: "lunar.chandra_mangala",
        family: CATEGORY,
        emits: Emits::Names(&["Chandra-Mangala Yoga"]),
        run: chandra_mangala,
    },
    Detector {
        id: "lunar.adhi",
        family: CATEGORY,
        emits: Emits::Names(&["Adhi Yoga"]),
        run: adhi,
    },
    Detector {
        id: "lunar.shakata",
        family: CATEGORY,
        emits: Emits::Names(&["Shakata Yoga"]),
        run: shakata,
    },
    Detector {
        id: "lunar.vasumati",
        family: CATEGORY,
        emits: Emits::Names(&["Vasumati Yoga"]),
        run: vasumati,
    },
    Detector {
        id: "lunar.amala",
        family: CATEGORY,
        emits: Emits::Names(&["Amala Yoga"]),
        run: amala,
    },
    Detector {
        id: "lunar.kartari",
        family: CATEGORY,
        emits: Emits::Names(&["Shubha Kartari Yoga", "Papa Kartari Yoga"]),
        run: kartari,
    },
    Detector {
        id: "lunar.chandra_guru",
        family: CATEGORY,
        emits: Emits::Names(&["Chandra-Guru Yoga"]),
        run: chandra_guru,
    },
];

fn sunapha_anapha(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.house(Planet::Moon).is_none() || !ctx.all_placed(&TARA_PLANETS) {
        return Ok(Vec::new());
    }
    let second = ctx.occupants_from(Reference::Moon, 2, &TARA_PLANETS);
    let twelfth = ctx.occupants_from(Reference::Moon, 12, &TARA_PLANETS);

    let (name, planets, formation, effect) = match (second.is_empty(), twelfth.is_empty()) {
        (true, true) => return Ok(Vec::new()),
        (false, true) => (
            "Sunapha Yoga",
            second.clone(),
            format!("{} in the 2nd house from the Moon", join_planets(&second)),
            "Self-earned wealth, intelligence and good reputation",
        ),
        (true, false) => (
            "Anapha Yoga",
            twelfth.clone(),
            format!("{} in the 12th house from the Moon", join_planets(&twelfth)),
            "Good health, pleasing manners and comforts",
        ),
        (false, false) => {
            let both: Vec<Planet> = second.iter().chain(twelfth.iter()).copied().collect();
            (
                "Durudhara Yoga",
                both,
                format!(
                    "{} in the 2nd and {} in the 12th house from the Moon",
                    join_planets(&second),
                    join_planets(&twelfth)
                ),
                "Wealth, vehicles, generosity and lasting comforts",
            )
        }
    };

    let mut all = planets.clone();
    all.push(Planet::Moon);
    Ok(vec![RawYogaRecord::builder(name, YogaKind::MoonRelative, CATEGORY)
        .description(format!("{}.", effect))
        .formation(formation)
        .strength(combined_strength(ctx, &planets))
        .planets(&all)
        .houses(&ctx.houses_of(&all).unwrap_or_default())
        .attribute("nature", nature_of(&planets))
        .attribute("reference", Reference::Moon.label())
        .build()])
}

fn kemadruma(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(moon) = ctx.house(Planet::Moon) else {
        return Ok(Vec::new());
    };
    // An unplaced planet might occupy the 2nd or 12th.
    if !ctx.all_placed(&TARA_PLANETS) {
        return Ok(Vec::new());
    }
    let second = ctx.occupants_from(Reference::Moon, 2, &TARA_PLANETS);
    let twelfth = ctx.occupants_from(Reference::Moon, 12, &TARA_PLANETS);
    if !second.is_empty() || !twelfth.is_empty() {
        return Ok(Vec::new());
    }

    let mut cancellations = Vec::new();
    let with_moon = ctx.occupants(moon, &TARA_PLANETS);
    if !with_moon.is_empty() {
        cancellations.push(format!("{} conjunct the Moon", join_planets(&with_moon)));
    }
    let kendra_from_moon: Vec<Planet> = TARA_PLANETS
        .iter()
        .copied()
        .filter(|p| {
            ctx.position_from(Reference::Moon, *p)
                .map(|h| geometry::is_kendra_house(h) && h != 1)
                .unwrap_or(false)
        })
        .collect();
    if !kendra_from_moon.is_empty() {
        cancellations.push(format!("{} in kendra from the Moon", join_planets(&kendra_from_moon)));
    }
    if geometry::is_kendra_house(moon) {
        cancellations.push("Moon in kendra from Lagna".to_string());
    }
    if ctx.aspects(Planet::Jupiter, Planet::Moon) {
        cancellations.push("Jupiter aspects the Moon".to_string());
    }

    let mut builder = RawYogaRecord::builder("Kemadruma Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Isolation of the Moon: periods of poverty, loneliness and emotional struggle.")
        .formation(format!(
            "No planet in the 2nd or 12th house from the Moon (Moon in the {} house)",
            ordinal(moon)
        ))
        .planets(&[Planet::Moon])
        .houses(&[moon])
        .attribute("nature", "malefic");

    if cancellations.is_empty() {
        let strength = match ctx.dignity(Planet::Moon) {
            Some(Dignity::Debilitated) | Some(Dignity::Enemy) => Strength::VeryStrong,
            Some(Dignity::Exalted) | Some(Dignity::OwnSign) => Strength::Medium,
            _ => Strength::Strong,
        };
        builder = builder.strength(strength);
    } else {
        builder = builder
            .strength(Strength::Weak)
            .cancelled(&cancellations.join("; "));
    }
    Ok(vec![builder.build()])
}

fn gaja_kesari(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(jupiter_from_moon) = ctx.position_from(Reference::Moon, Planet::Jupiter) else {
        return Ok(Vec::new());
    };
    if !geometry::is_kendra_house(jupiter_from_moon) {
        return Ok(Vec::new());
    }

    let mut builder = RawYogaRecord::builder("Gaja Kesari Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Wisdom, lasting fame, prosperity and the ability to overcome opponents.")
        .formation(format!(
            "Jupiter in the {} house from the Moon",
            ordinal(jupiter_from_moon)
        ))
        .planets(&[Planet::Moon, Planet::Jupiter])
        .houses(&ctx.houses_of(&[Planet::Moon, Planet::Jupiter]).unwrap_or_default())
        .attribute("reference", Reference::Moon.label());

    let strength = combined_strength(ctx, &[Planet::Moon, Planet::Jupiter]);
    match ctx.dignity(Planet::Jupiter) {
        Some(Dignity::Debilitated) => {
            builder = builder
                .strength(Strength::Weak)
                .weakened("Jupiter is debilitated");
        }
        _ if ctx.is_combust(Planet::Jupiter) => {
            builder = builder
                .strength(strength.lowered())
                .weakened("Jupiter is combust");
        }
        _ => builder = builder.strength(strength),
    }
    Ok(vec![builder.build()])
}

fn chandra_mangala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(moon), Some(mars)) = (ctx.house(Planet::Moon), ctx.house(Planet::Mars)) else {
        return Ok(Vec::new());
    };
    let formation = if moon == mars {
        format!("Moon and Mars together in the {} house", ordinal(moon))
    } else if geometry::house_distance(moon, mars) == 6 {
        format!(
            "Moon in the {} and Mars in the {} house aspecting each other",
            ordinal(moon),
            ordinal(mars)
        )
    } else {
        return Ok(Vec::new());
    };

    Ok(vec![RawYogaRecord::builder("Chandra-Mangala Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Earning capacity through enterprise and trade; a restless, assertive temperament.")
        .formation(formation)
        .strength(combined_strength(ctx, &[Planet::Moon, Planet::Mars]))
        .planets(&[Planet::Moon, Planet::Mars])
        .houses(&[moon, mars])
        .attribute("nature", "mixed")
        .build()])
}

fn adhi(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.house(Planet::Moon).is_none() {
        return Ok(Vec::new());
    }
    let mut placed = Vec::new();
    let mut houses_filled = 0;
    for count in [6u8, 7, 8] {
        let occupants = ctx.occupants_from(Reference::Moon, count, &BENEFICS);
        if !occupants.is_empty() {
            houses_filled += 1;
            placed.extend(occupants);
        }
    }
    if placed.len() < 2 {
        return Ok(Vec::new());
    }

    let strength = match houses_filled {
        3 => Strength::VeryStrong,
        2 => Strength::Strong,
        _ => Strength::Medium,
    };
    let mut all = placed.clone();
    all.push(Planet::Moon);
    Ok(vec![RawYogaRecord::builder("Adhi Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Leadership, a position of command, comfort and victory over enemies.")
        .formation(format!(
            "{} in the 6th, 7th or 8th houses from the Moon",
            join_planets(&placed)
        ))
        .strength(strength)
        .planets(&all)
        .houses(&ctx.houses_of(&all).unwrap_or_default())
        .attribute("houses_filled", houses_filled.to_string())
        .build()])
}

fn shakata(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(jupiter_from_moon), Some(jupiter)) = (
        ctx.position_from(Reference::Moon, Planet::Jupiter),
        ctx.house(Planet::Jupiter),
    ) else {
        return Ok(Vec::new());
    };
    if !matches!(jupiter_from_moon, 6 | 8 | 12) {
        return Ok(Vec::new());
    }

    let mut builder = RawYogaRecord::builder("Shakata Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Fluctuating fortune: gains and losses alternate like the turning of a cart wheel.")
        .formation(format!(
            "Jupiter in the {} house from the Moon",
            ordinal(jupiter_from_moon)
        ))
        .planets(&[Planet::Moon, Planet::Jupiter])
        .houses(&ctx.houses_of(&[Planet::Moon, Planet::Jupiter]).unwrap_or_default())
        .attribute("nature", "malefic");

    if geometry::is_kendra_house(jupiter) {
        builder = builder
            .strength(Strength::Weak)
            .cancelled("Jupiter in kendra from Lagna");
    } else {
        builder = builder.strength(Strength::Medium);
    }
    Ok(vec![builder.build()])
}

fn vasumati(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mut placed = Vec::new();
    for benefic in BENEFICS {
        let Some(pos) = ctx.position_from(Reference::Moon, benefic) else {
            return Ok(Vec::new());
        };
        if geometry::is_upachaya(pos - 1) {
            placed.push(benefic);
        }
    }
    if placed.len() < BENEFICS.len() {
        return Ok(Vec::new());
    }
    let mut all = placed.clone();
    all.push(Planet::Moon);
    Ok(vec![RawYogaRecord::builder("Vasumati Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Abundant wealth that keeps growing; the native is seldom dependent on others.")
        .formation("Mercury, Jupiter and Venus in upachaya houses (3, 6, 10, 11) from the Moon")
        .strength(combined_strength(ctx, &placed).max(Strength::Medium))
        .planets(&all)
        .houses(&ctx.houses_of(&all).unwrap_or_default())
        .build()])
}

fn amala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let others: Vec<Planet> = SEVEN_PLANETS.iter().copied().filter(|p| *p != Planet::Moon).collect();
    if !ctx.all_placed(&others) {
        return Ok(Vec::new());
    }
    let mut records = Vec::new();
    for reference in [Reference::Lagna, Reference::Moon] {
        let Some(tenth) = ctx.house_from(reference, 10) else {
            continue;
        };
        let occupants = ctx.occupants(tenth, &SEVEN_PLANETS);
        let occupants: Vec<Planet> = occupants.into_iter().filter(|p| *p != Planet::Moon).collect();
        if occupants.is_empty() || !occupants.iter().all(|p| BENEFICS.contains(p)) {
            continue;
        }
        records.push(
            RawYogaRecord::builder("Amala Yoga", YogaKind::MoonRelative, CATEGORY)
                .description("Spotless reputation, ethical conduct and lasting fame through good deeds.")
                .formation(format!(
                    "Only benefics ({}) in the 10th house from {}",
                    join_planets(&occupants),
                    reference.label()
                ))
                .strength(combined_strength(ctx, &occupants))
                .planets(&occupants)
                .houses(&[tenth])
                .attribute("reference", reference.label())
                .build(),
        );
    }
    Ok(records)
}

fn kartari(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let flankers = [BENEFICS.as_slice(), MALEFICS.as_slice()].concat();
    if ctx.house(Planet::Moon).is_none() || !ctx.all_placed(&flankers) {
        return Ok(Vec::new());
    }
    let second = ctx.occupants_from(Reference::Moon, 2, &flankers);
    let twelfth = ctx.occupants_from(Reference::Moon, 12, &flankers);
    if second.is_empty() || twelfth.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let flank = |planets: &[Planet], group: &[Planet]| planets.iter().all(|p| group.contains(p));
    let all: Vec<Planet> = second.iter().chain(twelfth.iter()).copied().collect();

    if flank(&second, &BENEFICS) && flank(&twelfth, &BENEFICS) {
        records.push(
            RawYogaRecord::builder("Shubha Kartari Yoga", YogaKind::MoonRelative, CATEGORY)
                .description("The mind is protected by benefics on both sides: contentment, prosperity and good counsel.")
                .formation(format!(
                    "Benefics {} hem in the Moon from the 2nd and 12th houses",
                    join_planets(&all)
                ))
                .strength(combined_strength(ctx, &all))
                .planets(&[all.as_slice(), &[Planet::Moon]].concat())
                .houses(&ctx.houses_of(&all).unwrap_or_default())
                .attribute("nature", "benefic")
                .build(),
        );
    } else if flank(&second, &MALEFICS) && flank(&twelfth, &MALEFICS) {
        let strength = match ctx.dignity(Planet::Moon) {
            Some(Dignity::Exalted) | Some(Dignity::OwnSign) => Strength::Medium,
            _ => Strength::Strong,
        };
        records.push(
            RawYogaRecord::builder("Papa Kartari Yoga", YogaKind::MoonRelative, CATEGORY)
                .description("The Moon is hemmed in by malefics: anxiety, obstacles and pressure from circumstances.")
                .formation(format!(
                    "Malefics {} hem in the Moon from the 2nd and 12th houses",
                    join_planets(&all)
                ))
                .strength(strength)
                .planets(&[all.as_slice(), &[Planet::Moon]].concat())
                .houses(&ctx.houses_of(&all).unwrap_or_default())
                .attribute("nature", "malefic")
                .build(),
        );
    }
    Ok(records)
}

fn chandra_guru(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(moon), Some(_)) = (ctx.house(Planet::Moon), ctx.house(Planet::Jupiter)) else {
        return Ok(Vec::new());
    };
    if !ctx.conjunct(Planet::Moon, Planet::Jupiter) {
        return Ok(Vec::new());
    }
    let support = [Planet::Moon, Planet::Jupiter]
        .iter()
        .filter(|p| planet_strength(ctx, **p) >= Strength::Medium)
        .count();
    Ok(vec![RawYogaRecord::builder("Chandra-Guru Yoga", YogaKind::MoonRelative, CATEGORY)
        .description("Devotion, kindness and a cultured mind; support from teachers and elders.")
        .formation(format!("Moon and Jupiter together in the {} house", ordinal(moon)))
        .strength(strength_from_support(support, 2))
        .planets(&[Planet::Moon, Planet::Jupiter])
        .houses(&[moon])
        .build()])
}
