//! Doshas: afflictions with their own intensity scale and remedies.
//!
//! Every record carries `intensity` (low, medium, high) and `remedies`
//! attributes. Strength mirrors intensity so that ordering stays consistent.

use crate::chart::{join_planets, ChartContext, Planet, Reference, SEVEN_PLANETS};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::{ordinal, Detector, Emits, YogaBuilder};
use crate::error::YogaError;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

pub const CATEGORY: &str = "Dosha";

/// Houses from which Mars causes Mangal Dosha.
const MANGAL_HOUSES: [u8; 6] = [1, 2, 4, 7, 8, 12];

/// Kala Sarpa variants named by the house Rahu occupies.
pub const KALA_SARPA_VARIANTS: [&str; 12] = [
    "Anant", "Kulik", "Vasuki", "Shankhpal", "Padma", "Mahapadma", "Takshak", "Karkotak",
    "Shankhachud", "Ghatak", "Vishdhar", "Sheshnag",
];

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "dosha.mangal",
        family: CATEGORY,
        emits: Emits::Names(&["Mangal Dosha"]),
        run: mangal,
    },
    Detector {
        id: "dosha.kala_sarpa",
        family: CATEGORY,
        emits: Emits::Generated(kala_sarpa_names),
        run: kala_sarpa,
    },
    Detector {
        id: "dosha.pitra",
        family: CATEGORY,
        emits: Emits::Names(&["Pitra Dosha"]),
        run: pitra,
    },
    Detector {
        id: "dosha.grahan",
        family: CATEGORY,
        emits: Emits::Names(&["Surya Grahan Dosha", "Chandra Grahan Dosha"]),
        run: grahan,
    },
    Detector {
        id: "dosha.guru_chandal",
        family: CATEGORY,
        emits: Emits::Names(&["Guru Chandal Dosha"]),
        run: guru_chandal,
    },
    Detector {
        id: "dosha.shrapit",
        family: CATEGORY,
        emits: Emits::Names(&["Shrapit Dosha"]),
        run: shrapit,
    },
    Detector {
        id: "dosha.angarak",
        family: CATEGORY,
        emits: Emits::Names(&["Angarak Dosha"]),
        run: angarak,
    },
    Detector {
        id: "dosha.vish",
        family: CATEGORY,
        emits: Emits::Names(&["Vish Dosha"]),
        run: vish,
    },
    Detector {
        id: "dosha.gandanta",
        family: CATEGORY,
        emits: Emits::Names(&["Gandanta Dosha"]),
        run: gandanta,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn strength(self) -> Strength {
        match self {
            Self::Low => Strength::Weak,
            Self::Medium => Strength::Medium,
            Self::High => Strength::Strong,
        }
    }

    fn from_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

fn dosha(name: &str, intensity: Intensity, remedies: &[&str]) -> YogaBuilder {
    RawYogaRecord::builder(name, YogaKind::Affliction, CATEGORY)
        .strength(intensity.strength())
        .attribute("intensity", intensity.label())
        .attribute("remedies", remedies.join("; "))
        .attribute("nature", "malefic")
}

/// Node sharing a house with `planet`, if any.
fn node_with(ctx: &ChartContext, planet: Planet) -> Option<Planet> {
    [Planet::Rahu, Planet::Ketu]
        .into_iter()
        .find(|node| ctx.conjunct(planet, *node))
}

/// Intensity of a two-planet conjunction, tighter is worse.
fn conjunction_intensity(ctx: &ChartContext, a: Planet, b: Planet) -> Intensity {
    match ctx.separation(a, b) {
        Some(sep) if sep <= 5.0 => Intensity::High,
        Some(sep) if sep <= ctx.config().conjunction_orb => Intensity::Medium,
        Some(_) => Intensity::Low,
        None => Intensity::Medium,
    }
}

fn mangal(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.house(Planet::Mars).is_none() {
        return Ok(Vec::new());
    }
    let mut frames = Vec::new();
    for reference in [Reference::Lagna, Reference::Moon, Reference::Planet(Planet::Venus)] {
        if let Some(pos) = ctx.position_from(reference, Planet::Mars) {
            if MANGAL_HOUSES.contains(&pos) {
                frames.push((reference, pos));
            }
        }
    }
    if frames.is_empty() {
        return Ok(Vec::new());
    }

    let mut intensity = Intensity::from_count(frames.len());
    if frames
        .iter()
        .any(|(r, pos)| *r == Reference::Lagna && matches!(pos, 7 | 8))
    {
        intensity = intensity.max(Intensity::Medium);
    }

    let formation = frames
        .iter()
        .map(|(r, pos)| format!("{} from {}", ordinal(*pos), r.label()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = dosha(
        "Mangal Dosha",
        intensity,
        &[
            "Marriage with a partner who also has Mangal Dosha",
            "Recitation of Hanuman Chalisa on Tuesdays",
            "Kumbh Vivah before marriage",
        ],
    )
    .description("Friction and delay in marriage; strain on the partner's wellbeing.")
    .formation(format!("Mars in the {}", formation))
    .planets(&[Planet::Mars])
    .houses(&ctx.houses_of(&[Planet::Mars]).unwrap_or_default());

    let mut cancellations = Vec::new();
    match ctx.dignity(Planet::Mars) {
        Some(Dignity::OwnSign) => cancellations.push("Mars in its own sign".to_string()),
        Some(Dignity::Exalted) => cancellations.push("Mars exalted".to_string()),
        _ => {}
    }
    if ctx.conjunct(Planet::Jupiter, Planet::Mars) || ctx.aspects(Planet::Jupiter, Planet::Mars) {
        cancellations.push("Jupiter joins or aspects Mars".to_string());
    }
    if !cancellations.is_empty() {
        builder = builder
            .strength(Strength::Weak)
            .attribute("intensity", Intensity::Low.label())
            .cancelled(&cancellations.join("; "));
    }
    Ok(vec![builder.build()])
}

fn kala_sarpa_name(rahu_house: u8) -> String {
    format!(
        "{} Kala Sarpa Dosha",
        KALA_SARPA_VARIANTS[(geometry::clamp_house(rahu_house) - 1) as usize]
    )
}

fn kala_sarpa_names() -> Vec<String> {
    let mut names: Vec<String> = (1..=12u8).map(kala_sarpa_name).collect();
    names.push("Partial Kala Sarpa Dosha".to_string());
    names
}

/// All seven planets on one side of the Rahu-Ketu axis.
fn kala_sarpa(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(rahu), Some(ketu)) = (ctx.house(Planet::Rahu), ctx.house(Planet::Ketu)) else {
        return Ok(Vec::new());
    };
    if geometry::house_distance(rahu, ketu) != 6 {
        return Ok(Vec::new());
    }
    let Some(houses) = ctx.houses_of(&SEVEN_PLANETS) else {
        return Ok(Vec::new());
    };

    // Houses from Rahu forward to Ketu, ends included
    let rahu_side: Vec<u8> = (0..=6).map(|step| geometry::nth_house_from(rahu, step + 1)).collect();
    let ketu_side: Vec<u8> = (0..=6).map(|step| geometry::nth_house_from(ketu, step + 1)).collect();
    let inside_rahu = houses.iter().filter(|h| rahu_side.contains(h)).count();
    let inside_ketu = houses.iter().filter(|h| ketu_side.contains(h)).count();

    let (inside, direction) = if inside_rahu >= inside_ketu {
        (inside_rahu, "ascending")
    } else {
        (inside_ketu, "descending")
    };
    let total = SEVEN_PLANETS.len();
    let remedies = [
        "Rahu-Ketu shanti puja",
        "Worship of Lord Shiva on Mondays",
        "Recitation of the Maha Mrityunjaya mantra",
    ];

    let builder = if inside == total {
        let on_axis = houses.iter().filter(|h| **h == rahu || **h == ketu).count();
        let intensity = if on_axis == 0 {
            Intensity::High
        } else {
            Intensity::Medium
        };
        dosha(&kala_sarpa_name(rahu), intensity, &remedies)
            .description("Karmic obstruction: sudden reversals and delays until the node periods mature.")
            .formation(format!(
                "All planets between Rahu ({}) and Ketu ({})",
                ordinal(rahu),
                ordinal(ketu)
            ))
            .attribute("variant", KALA_SARPA_VARIANTS[(rahu - 1) as usize])
    } else if inside == total - 1 {
        let outside: Vec<Planet> = SEVEN_PLANETS
            .iter()
            .zip(&houses)
            .filter(|(_, h)| {
                let side = if direction == "ascending" { &rahu_side } else { &ketu_side };
                !side.contains(h)
            })
            .map(|(p, _)| *p)
            .collect();
        dosha("Partial Kala Sarpa Dosha", Intensity::Low, &remedies)
            .description("A milder form of the serpent affliction; obstacles ease with effort.")
            .formation(format!(
                "All planets except {} between Rahu ({}) and Ketu ({})",
                join_planets(&outside),
                ordinal(rahu),
                ordinal(ketu)
            ))
    } else {
        return Ok(Vec::new());
    };

    let mut planets = SEVEN_PLANETS.to_vec();
    planets.extend([Planet::Rahu, Planet::Ketu]);
    Ok(vec![builder
        .planets(&planets)
        .houses(&[rahu, ketu])
        .attribute("direction", direction)
        .build()])
}

fn pitra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mut conditions = Vec::new();
    let mut planets = Vec::new();
    if let Some(node) = node_with(ctx, Planet::Sun) {
        conditions.push(format!("Sun with {}", node.name()));
        planets.extend([Planet::Sun, node]);
    }
    let ninth_nodes = ctx.occupants(9, &[Planet::Rahu, Planet::Ketu]);
    if !ninth_nodes.is_empty() {
        conditions.push(format!("{} in the 9th house", join_planets(&ninth_nodes)));
        planets.extend(ninth_nodes.iter().copied());
    }
    if let Some(ninth_lord) = ctx.lord_of(9) {
        if let Some(node) = node_with(ctx, ninth_lord) {
            conditions.push(format!("9th lord {} with {}", ninth_lord.name(), node.name()));
            planets.extend([ninth_lord, node]);
        }
    }
    if conditions.is_empty() {
        return Ok(Vec::new());
    }
    let intensity = Intensity::from_count(conditions.len());
    Ok(vec![dosha(
        "Pitra Dosha",
        intensity,
        &[
            "Shraddha and tarpan for ancestors",
            "Feeding Brahmins and the needy on Amavasya",
            "Offering water to the Sun at sunrise",
        ],
    )
    .description("Ancestral karma: obstacles in progeny, career or family harmony.")
    .formation(conditions.join("; "))
    .planets(&planets)
    .houses(&ctx.houses_of(&planets).unwrap_or_default())
    .build()])
}

fn grahan(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mut records = Vec::new();
    let eclipses = [
        (
            Planet::Sun,
            "Surya Grahan Dosha",
            "Eclipsed vitality: issues with confidence, the father or authority.",
            ["Aditya Hridaya stotra", "Offering water to the Sun", "Charity on Sundays"],
        ),
        (
            Planet::Moon,
            "Chandra Grahan Dosha",
            "Eclipsed mind: anxiety, mood swings and strain in relations with the mother.",
            ["Chandra mantra on Mondays", "Wearing a pearl after consultation", "Charity of rice and milk"],
        ),
    ];
    for (luminary, name, effect, remedies) in eclipses {
        let Some(node) = node_with(ctx, luminary) else {
            continue;
        };
        let intensity = conjunction_intensity(ctx, luminary, node);
        let house = ctx.house(luminary).unwrap_or_default();
        records.push(
            dosha(name, intensity, &remedies)
                .description(effect)
                .formation(format!(
                    "{} with {} in the {} house",
                    luminary.name(),
                    node.name(),
                    ordinal(house)
                ))
                .planets(&[luminary, node])
                .houses(&[house])
                .build(),
        );
    }
    Ok(records)
}

/// Shared shape of the two-planet conjunction doshas.
struct ConjunctionDosha {
    name: &'static str,
    planet: Planet,
    nodes: &'static [Planet],
    effect: &'static str,
    remedies: [&'static str; 3],
}

const GURU_CHANDAL: ConjunctionDosha = ConjunctionDosha {
    name: "Guru Chandal Dosha",
    planet: Planet::Jupiter,
    nodes: &[Planet::Rahu, Planet::Ketu],
    effect: "Judgement clouded: unorthodox beliefs and friction with teachers.",
    remedies: [
        "Guru mantra on Thursdays",
        "Respect and service to teachers",
        "Charity of yellow items",
    ],
};

const SHRAPIT: ConjunctionDosha = ConjunctionDosha {
    name: "Shrapit Dosha",
    planet: Planet::Saturn,
    nodes: &[Planet::Rahu],
    effect: "Karmic burden: delays, chronic obstacles and hard-won results.",
    remedies: [
        "Shani mantra on Saturdays",
        "Service to the elderly and labourers",
        "Rahu shanti puja",
    ],
};

const ANGARAK: ConjunctionDosha = ConjunctionDosha {
    name: "Angarak Dosha",
    planet: Planet::Mars,
    nodes: &[Planet::Rahu, Planet::Ketu],
    effect: "Anger, accidents and impulsive conflict.",
    remedies: [
        "Hanuman worship on Tuesdays",
        "Donating red lentils",
        "Avoiding rash decisions during Mars periods",
    ],
};

fn conjunction_dosha(ctx: &ChartContext, dosha_def: &ConjunctionDosha) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(node) = dosha_def
        .nodes
        .iter()
        .copied()
        .find(|n| ctx.conjunct(dosha_def.planet, *n))
    else {
        return Ok(Vec::new());
    };
    let mut intensity = conjunction_intensity(ctx, dosha_def.planet, node);
    if matches!(
        ctx.dignity(dosha_def.planet),
        Some(Dignity::Debilitated) | Some(Dignity::Enemy)
    ) {
        intensity = Intensity::High;
    }
    let house = ctx.house(dosha_def.planet).unwrap_or_default();
    Ok(vec![dosha(dosha_def.name, intensity, &dosha_def.remedies)
        .description(dosha_def.effect)
        .formation(format!(
            "{} with {} in the {} house",
            dosha_def.planet.name(),
            node.name(),
            ordinal(house)
        ))
        .planets(&[dosha_def.planet, node])
        .houses(&[house])
        .build()])
}

fn guru_chandal(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    conjunction_dosha(ctx, &GURU_CHANDAL)
}

fn shrapit(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    conjunction_dosha(ctx, &SHRAPIT)
}

fn angarak(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    conjunction_dosha(ctx, &ANGARAK)
}

/// Saturn with the Moon, or Saturn's aspect on the Moon.
fn vish(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let (Some(moon), Some(saturn)) = (ctx.house(Planet::Moon), ctx.house(Planet::Saturn)) else {
        return Ok(Vec::new());
    };
    let (intensity, formation) = if moon == saturn {
        (
            conjunction_intensity(ctx, Planet::Moon, Planet::Saturn).max(Intensity::Medium),
            format!("Saturn with the Moon in the {} house", ordinal(moon)),
        )
    } else if ctx.aspects(Planet::Saturn, Planet::Moon) {
        (
            Intensity::Low,
            format!(
                "Saturn in the {} aspects the Moon in the {}",
                ordinal(saturn),
                ordinal(moon)
            ),
        )
    } else {
        return Ok(Vec::new());
    };
    Ok(vec![dosha(
        "Vish Dosha",
        intensity,
        &[
            "Shiva abhishek with milk on Mondays",
            "Shani mantra on Saturdays",
            "Serving the mother and elders",
        ],
    )
    .description("A heavy mind: melancholy, pessimism and emotional restraint.")
    .formation(formation)
    .planets(&[Planet::Moon, Planet::Saturn])
    .houses(&[moon, saturn])
    .build()])
}

/// Degrees either side of a water-fire sign junction that count as gandanta.
const GANDANTA_ORB: f64 = 3.0 + 20.0 / 60.0;

/// Moon or Lagna within the junction of a water sign and the next fire sign.
fn gandanta(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let mut affected = Vec::new();
    let mut planets = Vec::new();
    if let Some(lon) = ctx.longitude(Planet::Moon) {
        if in_gandanta(lon) {
            affected.push(format!("Moon at {:.2} degrees", lon));
            planets.push(Planet::Moon);
        }
    }
    let ascendant = ctx.chart().ascendant.as_ref().and_then(|a| a.longitude);
    if let Some(lon) = ascendant {
        if in_gandanta(lon) {
            affected.push(format!("Lagna at {:.2} degrees", lon));
        }
    }
    if affected.is_empty() {
        return Ok(Vec::new());
    }
    let intensity = Intensity::from_count(affected.len() + 1);
    Ok(vec![dosha(
        "Gandanta Dosha",
        intensity,
        &["Gandanta shanti puja", "Ganesha worship", "Charity on the birth nakshatra"],
    )
    .description("Birth at a karmic knot between water and fire signs: early instability that later turns to depth.")
    .formation(affected.join("; "))
    .planets(&planets)
    .build()])
}

/// Within the orb of 120, 240 or 360/0 degrees.
pub fn in_gandanta(longitude: f64) -> bool {
    let lon = longitude.rem_euclid(360.0);
    [0.0, 120.0, 240.0, 360.0]
        .iter()
        .any(|junction| (lon - junction).abs() <= GANDANTA_ORB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::config::EngineConfig;

    #[test]
    fn test_mangal_from_three_frames() {
        // Aries rising: Mars in the 7th; Moon and Venus in the 1st
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Mars, 7)
            .place(Planet::Moon, 1)
            .place(Planet::Venus, 1)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = mangal(&ctx).unwrap();
        assert_eq!(records[0].attribute("intensity"), Some("high"));
        assert!(records[0].attribute("remedies").is_some());
        assert!(!records[0].is_cancelled());
    }

    #[test]
    fn test_mangal_cancelled_in_own_sign() {
        // Aries rising: Mars in Aries in the 1st
        let chart = Chart::builder().ascendant(1).place(Planet::Mars, 1).build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = mangal(&ctx).unwrap();
        assert!(records[0].is_cancelled());
        assert_eq!(records[0].strength, Strength::Weak);
    }

    #[test]
    fn test_kala_sarpa_full_and_partial() {
        let base = Chart::builder()
            .ascendant(1)
            .place(Planet::Rahu, 1)
            .place(Planet::Ketu, 7)
            .place(Planet::Sun, 2)
            .place(Planet::Moon, 3)
            .place(Planet::Mars, 4)
            .place(Planet::Mercury, 5)
            .place(Planet::Jupiter, 6)
            .place(Planet::Venus, 2);
        let chart = base.clone().place(Planet::Saturn, 3).build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = kala_sarpa(&ctx).unwrap();
        assert_eq!(records[0].name, "Anant Kala Sarpa Dosha");
        assert_eq!(records[0].attribute("intensity"), Some("high"));

        let chart = base.place(Planet::Saturn, 10).build();
        let ctx = ChartContext::new(&chart, &config);
        let records = kala_sarpa(&ctx).unwrap();
        assert_eq!(records[0].name, "Partial Kala Sarpa Dosha");
        assert!(records[0].formation.contains("Saturn"));
    }

    #[test]
    fn test_grahan_both_luminaries() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 4)
            .place(Planet::Rahu, 4)
            .place(Planet::Moon, 10)
            .place(Planet::Ketu, 10)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let names: Vec<String> = grahan(&ctx).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Surya Grahan Dosha", "Chandra Grahan Dosha"]);
    }

    #[test]
    fn test_gandanta_junctions() {
        assert!(in_gandanta(359.0));
        assert!(in_gandanta(1.5));
        assert!(in_gandanta(121.0));
        assert!(!in_gandanta(60.0));
    }
}
