//! Yogas formed by house lords associating with each other.
//!
//! Association means conjunction, mutual aspect or sign exchange. When a
//! single planet rules both houses of a pair it forms the yoga on its own.

use crate::chart::{join_planets, ChartContext, Planet, Reference, SEVEN_PLANETS};
use crate::config::{CancellationMode, RajYogaMode};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::strength::{combined_strength, planet_strength};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::dignity::{exaltation_sign, Dignity};
use crate::rules::geometry;
use crate::rules::lordship::sign_ruler;

pub const RAJA_CATEGORY: &str = "Raja Yoga";
pub const DHANA_CATEGORY: &str = "Dhana Yoga";
pub const VIPARITA_CATEGORY: &str = "Viparita Raja Yoga";

/// Mode label carried by records built from the placement heuristic.
pub const PLACEMENT_FALLBACK: &str = "placement fallback";
/// Mode label carried by unverified debilitation cancellations.
pub const POTENTIAL_CANCELLATION: &str = "potential cancellation (unverified)";

/// Kendra and trikona house pairs. The 9th and 10th pair is its own yoga.
const RAJA_PAIRS: [(u8, u8); 10] = [
    (1, 4),
    (1, 5),
    (1, 7),
    (1, 9),
    (1, 10),
    (4, 5),
    (4, 9),
    (5, 7),
    (5, 10),
    (7, 9),
];

const DHANA_PAIRS: [(u8, u8); 6] = [(2, 5), (2, 9), (2, 11), (5, 9), (5, 11), (9, 11)];

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "lords.raja",
        family: RAJA_CATEGORY,
        emits: Emits::Generated(raja_names),
        run: raja,
    },
    Detector {
        id: "lords.dharma_karmadhipati",
        family: RAJA_CATEGORY,
        emits: Emits::Names(&["Dharma-Karmadhipati Yoga"]),
        run: dharma_karmadhipati,
    },
    Detector {
        id: "lords.dhana",
        family: DHANA_CATEGORY,
        emits: Emits::Generated(dhana_names),
        run: dhana,
    },
    Detector {
        id: "lords.harsha",
        family: VIPARITA_CATEGORY,
        emits: Emits::Names(&["Harsha Yoga"]),
        run: harsha,
    },
    Detector {
        id: "lords.sarala",
        family: VIPARITA_CATEGORY,
        emits: Emits::Names(&["Sarala Yoga"]),
        run: sarala,
    },
    Detector {
        id: "lords.vimala",
        family: VIPARITA_CATEGORY,
        emits: Emits::Names(&["Vimala Yoga"]),
        run: vimala,
    },
    Detector {
        id: "lords.neecha_bhanga",
        family: RAJA_CATEGORY,
        emits: Emits::Names(&["Neecha Bhanga Raja Yoga"]),
        run: neecha_bhanga,
    },
    Detector {
        id: "lords.akhanda_samrajya",
        family: RAJA_CATEGORY,
        emits: Emits::Names(&["Akhanda Samrajya Yoga"]),
        run: akhanda_samrajya,
    },
    Detector {
        id: "lords.daridra",
        family: DHANA_CATEGORY,
        emits: Emits::Names(&["Daridra Yoga"]),
        run: daridra,
    },
];

fn pair_name(prefix: &str, (a, b): (u8, u8)) -> String {
    format!("{} ({} & {} Lords)", prefix, ordinal(a), ordinal(b))
}

fn raja_names() -> Vec<String> {
    RAJA_PAIRS.iter().map(|p| pair_name("Raja Yoga", *p)).collect()
}

fn dhana_names() -> Vec<String> {
    DHANA_PAIRS.iter().map(|p| pair_name("Dhana Yoga", *p)).collect()
}

/// How two lords are connected, if at all.
fn association(ctx: &ChartContext, a: Planet, b: Planet) -> Option<&'static str> {
    if a == b {
        Some("rules both houses")
    } else if ctx.conjunct(a, b) {
        Some("conjunction")
    } else if ctx.exchange(a, b) {
        Some("sign exchange")
    } else if ctx.mutual_aspect(a, b) {
        Some("mutual aspect")
    } else {
        None
    }
}

fn describe_link(a: Planet, b: Planet, link: &str) -> String {
    if a == b {
        format!("{} {}", a.name(), link)
    } else {
        format!("{} and {} in {}", a.name(), b.name(), link)
    }
}

/// Lords of a house pair associated with each other.
fn lord_pair_record(
    ctx: &ChartContext,
    name: String,
    category: &str,
    pair: (u8, u8),
    effect: &str,
) -> Option<RawYogaRecord> {
    let (first, second) = (ctx.lord_of(pair.0)?, ctx.lord_of(pair.1)?);
    let houses = ctx.houses_of(&[first, second])?;
    let link = association(ctx, first, second)?;

    let mut strength = if first == second {
        planet_strength(ctx, first).raised()
    } else {
        combined_strength(ctx, &[first, second])
    };
    if link == "conjunction" && ctx.tight_conjunction(first, second) {
        strength = strength.raised();
    }

    let mut builder = RawYogaRecord::builder(&name, YogaKind::LordCombination, category)
        .description(format!("{}.", effect))
        .formation(format!(
            "{} lord and {} lord: {}",
            ordinal(pair.0),
            ordinal(pair.1),
            describe_link(first, second, link)
        ))
        .planets(&[first, second])
        .houses(&houses)
        .attribute("association", link);

    let in_dusthana: Vec<Planet> = [first, second]
        .iter()
        .copied()
        .filter(|p| ctx.house(*p).map(geometry::is_dusthana_house).unwrap_or(false))
        .collect();
    if !in_dusthana.is_empty() {
        builder = builder
            .strength(strength.lowered())
            .weakened(&format!("{} in a dusthana", join_planets(&in_dusthana)));
    } else {
        builder = builder.strength(strength);
    }
    Some(builder.build())
}

fn raja(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    match ctx.config().raj_yoga_mode {
        RajYogaMode::Classical => Ok(RAJA_PAIRS
            .iter()
            .filter_map(|pair| {
                lord_pair_record(
                    ctx,
                    pair_name("Raja Yoga", *pair),
                    RAJA_CATEGORY,
                    *pair,
                    "Power, status and success through the union of an angular and a trinal lord",
                )
            })
            .collect()),
        RajYogaMode::Placement => Ok(raja_by_placement(ctx)),
    }
}

/// Planets occupying a kendra and a trikona house, without regard to lordship.
fn raja_by_placement(ctx: &ChartContext) -> Vec<RawYogaRecord> {
    if ctx.lords().is_none() {
        return Vec::new();
    }
    let mut records = Vec::new();
    for pair in RAJA_PAIRS {
        let first = ctx.occupants(pair.0, &SEVEN_PLANETS);
        let second = ctx.occupants(pair.1, &SEVEN_PLANETS);
        if first.is_empty() || second.is_empty() {
            continue;
        }
        let planets: Vec<Planet> = first.iter().chain(&second).copied().collect();
        if !planets.iter().any(|p| p.is_natural_benefic()) {
            continue;
        }
        records.push(
            RawYogaRecord::builder(&pair_name("Raja Yoga", pair), YogaKind::LordCombination, RAJA_CATEGORY)
                .description("Power and status suggested by occupied angular and trinal houses.")
                .formation(format!(
                    "{} in the {} house and {} in the {} house",
                    join_planets(&first),
                    ordinal(pair.0),
                    join_planets(&second),
                    ordinal(pair.1)
                ))
                .strength(combined_strength(ctx, &planets).min(Strength::Medium))
                .planets(&planets)
                .houses(&[pair.0, pair.1])
                .attribute("mode", PLACEMENT_FALLBACK)
                .build(),
        );
    }
    records
}

fn dharma_karmadhipati(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    Ok(lord_pair_record(
        ctx,
        "Dharma-Karmadhipati Yoga".to_string(),
        RAJA_CATEGORY,
        (9, 10),
        "Righteous action rewarded: high office, purpose and recognition in one's career",
    )
    .into_iter()
    .collect())
}

fn dhana(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    Ok(DHANA_PAIRS
        .iter()
        .filter_map(|pair| {
            lord_pair_record(
                ctx,
                pair_name("Dhana Yoga", *pair),
                DHANA_CATEGORY,
                *pair,
                "Accumulation of wealth through the union of lords of the wealth houses",
            )
        })
        .collect())
}

fn viparita(ctx: &ChartContext, house: u8, name: &str, effect: &str) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lord) = ctx.lord_of(house) else {
        return Ok(Vec::new());
    };
    let Some(placed) = ctx.house(lord) else {
        return Ok(Vec::new());
    };
    if !geometry::is_dusthana_house(placed) {
        return Ok(Vec::new());
    }

    let mut strength = if placed == house {
        Strength::Strong
    } else {
        Strength::Medium
    };
    if ctx.dignity(lord) == Some(Dignity::Debilitated) {
        strength = strength.lowered();
    }

    let mut builder = RawYogaRecord::builder(name, YogaKind::LordCombination, VIPARITA_CATEGORY)
        .description(format!("{}.", effect))
        .formation(format!(
            "{} lord {} in the {} house",
            ordinal(house),
            lord.name(),
            ordinal(placed)
        ))
        .planets(&[lord])
        .houses(&[placed]);

    // A dusthana lord sitting with the Lagna lord drags it down
    if let Some(lagna_lord) = ctx.lord_of(1) {
        if lagna_lord != lord && ctx.conjunct(lagna_lord, lord) {
            builder = builder
                .strength(strength.lowered())
                .weakened(&format!("Lagna lord {} joins the {} lord", lagna_lord.name(), ordinal(house)));
            return Ok(vec![builder.build()]);
        }
    }
    Ok(vec![builder.strength(strength).build()])
}

fn harsha(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    viparita(
        ctx,
        6,
        "Harsha Yoga",
        "Victory over enemies, good health and happiness arising out of adversity",
    )
}

fn sarala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    viparita(
        ctx,
        8,
        "Sarala Yoga",
        "Fearlessness, longevity and prosperity after obstacles are overcome",
    )
}

fn vimala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    viparita(
        ctx,
        12,
        "Vimala Yoga",
        "Frugality, independence and good conduct; expenses turn to gain",
    )
}

fn in_kendra_from_lagna_or_moon(ctx: &ChartContext, planet: Planet) -> Option<&'static str> {
    if ctx
        .position_from(Reference::Lagna, planet)
        .map(geometry::is_kendra_house)
        .unwrap_or(false)
    {
        Some("Lagna")
    } else if ctx
        .position_from(Reference::Moon, planet)
        .map(geometry::is_kendra_house)
        .unwrap_or(false)
    {
        Some("Moon")
    } else {
        None
    }
}

/// Classical cancellation rules that hold for a debilitated planet.
fn classical_cancellations(ctx: &ChartContext, planet: Planet, sign: u8) -> Result<Vec<String>, YogaError> {
    let mut rules = Vec::new();
    let dispositor = sign_ruler(sign)?;
    let exaltation_lord = sign_ruler(exaltation_sign(planet))?;

    if dispositor != planet {
        if let Some(frame) = in_kendra_from_lagna_or_moon(ctx, dispositor) {
            rules.push(format!(
                "dispositor {} in kendra from the {}",
                dispositor.name(),
                frame
            ));
        }
    }
    if exaltation_lord != planet {
        if let Some(frame) = in_kendra_from_lagna_or_moon(ctx, exaltation_lord) {
            rules.push(format!(
                "exaltation lord {} in kendra from the {}",
                exaltation_lord.name(),
                frame
            ));
        }
    }
    if dispositor != planet && (ctx.conjunct(planet, dispositor) || ctx.aspects(dispositor, planet)) {
        rules.push(format!("joined or aspected by dispositor {}", dispositor.name()));
    }
    if ctx.exchange(planet, dispositor) {
        rules.push(format!("sign exchange with {}", dispositor.name()));
    }
    Ok(rules)
}

/// Single conditions that only hint at cancellation.
fn weakening_conditions(ctx: &ChartContext, planet: Planet) -> Vec<String> {
    let mut conditions = Vec::new();
    if ctx
        .position_from(Reference::Lagna, planet)
        .map(geometry::is_kendra_house)
        .unwrap_or(false)
    {
        conditions.push("placed in a kendra".to_string());
    }
    if ctx.is_retrograde(planet) {
        conditions.push("retrograde".to_string());
    }
    let aspecting: Vec<Planet> = [Planet::Jupiter, Planet::Venus]
        .iter()
        .copied()
        .filter(|b| *b != planet && (ctx.aspects(*b, planet) || ctx.conjunct(*b, planet)))
        .collect();
    if !aspecting.is_empty() {
        conditions.push(format!("supported by {}", join_planets(&aspecting)));
    }
    conditions
}

fn neecha_bhanga(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mode = ctx.config().cancellation_mode;
    let mut records = Vec::new();

    for planet in SEVEN_PLANETS {
        let (Some(sign), Some(house), Some(Dignity::Debilitated)) =
            (ctx.sign(planet), ctx.house(planet), ctx.dignity(planet))
        else {
            continue;
        };

        let rules = classical_cancellations(ctx, planet, sign)?;
        let builder = RawYogaRecord::builder("Neecha Bhanga Raja Yoga", YogaKind::LordCombination, RAJA_CATEGORY)
            .planets(&[planet])
            .houses(&[house]);

        let record = match mode {
            CancellationMode::Classical if !rules.is_empty() => builder
                .description("Debilitation cancelled: early struggle turns into rise and distinction.")
                .formation(format!(
                    "{} debilitated in the {} house; {}",
                    planet.name(),
                    ordinal(house),
                    rules.join("; ")
                ))
                .strength(if rules.len() >= 2 {
                    Strength::Strong
                } else {
                    Strength::Medium
                })
                .attribute("rule", rules.join("; "))
                .attribute("mode", "classical"),
            CancellationMode::Classical => continue,
            CancellationMode::Potential => {
                let mut conditions = weakening_conditions(ctx, planet);
                conditions.extend(rules);
                if conditions.is_empty() {
                    continue;
                }
                builder
                    .description("Debilitation may be cancelled; the classical conditions have not been verified.")
                    .formation(format!(
                        "{} debilitated in the {} house; {}",
                        planet.name(),
                        ordinal(house),
                        conditions.join("; ")
                    ))
                    .strength(Strength::Weak)
                    .attribute("mode", POTENTIAL_CANCELLATION)
            }
        };
        records.push(record.build());
    }
    Ok(records)
}

fn akhanda_samrajya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lords) = ctx.lords() else {
        return Ok(Vec::new());
    };
    let jupiter_houses: Vec<u8> = lords
        .houses_ruled_by(Planet::Jupiter)
        .into_iter()
        .filter(|h| matches!(h, 2 | 5 | 11))
        .collect();
    if jupiter_houses.is_empty() || ctx.house(Planet::Jupiter).is_none() {
        return Ok(Vec::new());
    }

    let mut supporting = Vec::new();
    for house in [2u8, 9, 11] {
        let Some(lord) = ctx.lord_of(house) else {
            continue;
        };
        let in_kendra = ctx
            .position_from(Reference::Moon, lord)
            .map(geometry::is_kendra_house)
            .unwrap_or(false);
        if in_kendra && !supporting.contains(&lord) {
            supporting.push(lord);
        }
    }
    if supporting.is_empty() {
        return Ok(Vec::new());
    }

    let mut planets = vec![Planet::Jupiter];
    planets.extend(supporting.iter().copied());
    Ok(vec![RawYogaRecord::builder("Akhanda Samrajya Yoga", YogaKind::LordCombination, RAJA_CATEGORY)
        .description("Undivided authority: lasting power, wealth and command over a wide domain.")
        .formation(format!(
            "Jupiter rules the {} house; {} in kendra from the Moon",
            jupiter_houses
                .iter()
                .map(|h| ordinal(*h))
                .collect::<Vec<_>>()
                .join(" and "),
            join_planets(&supporting)
        ))
        .strength(combined_strength(ctx, &planets).max(Strength::Medium))
        .planets(&planets)
        .houses(&ctx.houses_of(&planets).unwrap_or_default())
        .build()])
}

/// The 11th lord in a dusthana: gains drain away.
fn daridra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lord) = ctx.lord_of(11) else {
        return Ok(Vec::new());
    };
    let Some(placed) = ctx.house(lord) else {
        return Ok(Vec::new());
    };
    if !geometry::is_dusthana_house(placed) {
        return Ok(Vec::new());
    }
    let strength = match ctx.dignity(lord) {
        Some(Dignity::Debilitated) | Some(Dignity::Enemy) => Strength::Strong,
        Some(Dignity::Exalted) | Some(Dignity::OwnSign) => Strength::Weak,
        _ => Strength::Medium,
    };
    Ok(vec![RawYogaRecord::builder("Daridra Yoga", YogaKind::LordCombination, DHANA_CATEGORY)
        .description("Income is hard to hold: debts, losses and effort without matching reward.")
        .formation(format!("11th lord {} in the {} house", lord.name(), ordinal(placed)))
        .strength(strength)
        .planets(&[lord])
        .houses(&[placed])
        .attribute("nature", "malefic")
        .build()])
}
