//! Nabhasa yogas: patterns in how the seven classical planets are spread
//! over the houses.
//!
//! Each pattern is a set-membership test over the distinct occupied houses.
//! All seven planets must be placed; the nodes never count.

use std::collections::BTreeSet;

use crate::chart::{ChartContext, Planet, SEVEN_PLANETS};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::geometry;

pub const CATEGORY: &str = "Nabhasa Yoga";

const SPLIT_BENEFICS: [Planet; 4] = [Planet::Moon, Planet::Mercury, Planet::Jupiter, Planet::Venus];
const SPLIT_MALEFICS: [Planet; 3] = [Planet::Sun, Planet::Mars, Planet::Saturn];

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "nabhasa.ashraya",
        family: CATEGORY,
        emits: Emits::Names(&["Rajju Yoga", "Musala Yoga", "Nala Yoga"]),
        run: ashraya,
    },
    Detector {
        id: "nabhasa.dala",
        family: CATEGORY,
        emits: Emits::Names(&["Mala Yoga", "Sarpa Yoga"]),
        run: dala,
    },
    Detector {
        id: "nabhasa.gada",
        family: CATEGORY,
        emits: Emits::Names(&["Gada Yoga"]),
        run: gada,
    },
    Detector {
        id: "nabhasa.shakata",
        family: CATEGORY,
        emits: Emits::Names(&["Shakata-Nabhasa Yoga"]),
        run: shakata,
    },
    Detector {
        id: "nabhasa.vihaga",
        family: CATEGORY,
        emits: Emits::Names(&["Vihaga Yoga"]),
        run: vihaga,
    },
    Detector {
        id: "nabhasa.shringataka",
        family: CATEGORY,
        emits: Emits::Names(&["Shringataka Yoga"]),
        run: shringataka,
    },
    Detector {
        id: "nabhasa.hala",
        family: CATEGORY,
        emits: Emits::Names(&["Hala Yoga"]),
        run: hala,
    },
    Detector {
        id: "nabhasa.vajra",
        family: CATEGORY,
        emits: Emits::Names(&["Vajra Yoga"]),
        run: vajra,
    },
    Detector {
        id: "nabhasa.yava",
        family: CATEGORY,
        emits: Emits::Names(&["Yava Yoga"]),
        run: yava,
    },
    Detector {
        id: "nabhasa.kamala",
        family: CATEGORY,
        emits: Emits::Names(&["Kamala Yoga"]),
        run: kamala,
    },
    Detector {
        id: "nabhasa.vapi",
        family: CATEGORY,
        emits: Emits::Names(&["Vapi Yoga"]),
        run: vapi,
    },
    Detector {
        id: "nabhasa.yupa",
        family: CATEGORY,
        emits: Emits::Names(&["Yupa Yoga"]),
        run: yupa,
    },
    Detector {
        id: "nabhasa.ishu",
        family: CATEGORY,
        emits: Emits::Names(&["Ishu Yoga"]),
        run: ishu,
    },
    Detector {
        id: "nabhasa.shakti",
        family: CATEGORY,
        emits: Emits::Names(&["Shakti Yoga"]),
        run: shakti,
    },
    Detector {
        id: "nabhasa.danda",
        family: CATEGORY,
        emits: Emits::Names(&["Danda Yoga"]),
        run: danda,
    },
    Detector {
        id: "nabhasa.nauka",
        family: CATEGORY,
        emits: Emits::Names(&["Nauka Yoga"]),
        run: nauka,
    },
    Detector {
        id: "nabhasa.kuta",
        family: CATEGORY,
        emits: Emits::Names(&["Kuta Yoga"]),
        run: kuta,
    },
    Detector {
        id: "nabhasa.chhatra",
        family: CATEGORY,
        emits: Emits::Names(&["Chhatra Yoga"]),
        run: chhatra,
    },
    Detector {
        id: "nabhasa.chapa",
        family: CATEGORY,
        emits: Emits::Names(&["Chapa Yoga"]),
        run: chapa,
    },
    Detector {
        id: "nabhasa.ardha_chandra",
        family: CATEGORY,
        emits: Emits::Names(&["Ardha Chandra Yoga"]),
        run: ardha_chandra,
    },
    Detector {
        id: "nabhasa.chakra",
        family: CATEGORY,
        emits: Emits::Names(&["Chakra Yoga"]),
        run: chakra,
    },
    Detector {
        id: "nabhasa.samudra",
        family: CATEGORY,
        emits: Emits::Names(&["Samudra Yoga"]),
        run: samudra,
    },
    Detector {
        id: "nabhasa.sankhya",
        family: CATEGORY,
        emits: Emits::Names(&[
            "Vallaki Yoga",
            "Damini Yoga",
            "Pasha Yoga",
            "Kedara Yoga",
            "Shoola Yoga",
            "Yuga Yoga",
            "Gola Yoga",
        ]),
        run: sankhya,
    },
];

/// Placements of the seven planets, or `None` if any is missing.
fn seven_placements(ctx: &ChartContext) -> Option<Vec<(Planet, u8)>> {
    SEVEN_PLANETS
        .iter()
        .map(|p| ctx.house(*p).map(|h| (*p, h)))
        .collect()
}

fn occupied(placements: &[(Planet, u8)]) -> BTreeSet<u8> {
    placements.iter().map(|(_, h)| *h).collect()
}

fn house_list(houses: &BTreeSet<u8>) -> String {
    houses
        .iter()
        .map(|h| ordinal(*h))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shape of an Akriti pattern.
enum Shape {
    /// Occupied houses are exactly one of these sets
    Exactly(&'static [&'static [u8]]),
    /// Occupied houses all fall inside one of these sets
    Within(&'static [&'static [u8]]),
    /// Exactly `len` consecutive houses starting at one of `starts`
    Consecutive { len: u8, starts: &'static [u8] },
    /// Benefics fill exactly `benefic` houses, malefics exactly `malefic`
    Split { benefic: [u8; 2], malefic: [u8; 2] },
}

impl Shape {
    fn matches(&self, placements: &[(Planet, u8)]) -> bool {
        let houses = occupied(placements);
        match self {
            Self::Exactly(sets) => sets
                .iter()
                .any(|set| set.iter().copied().collect::<BTreeSet<u8>>() == houses),
            Self::Within(sets) => sets
                .iter()
                .any(|set| houses.iter().all(|h| set.contains(h))),
            Self::Consecutive { len, starts } => starts.iter().any(|start| {
                let span: BTreeSet<u8> = (1..=*len)
                    .map(|count| geometry::nth_house_from(*start, count))
                    .collect();
                span == houses
            }),
            Self::Split { benefic, malefic } => {
                let group = |members: &[Planet]| -> BTreeSet<u8> {
                    placements
                        .iter()
                        .filter(|(p, _)| members.contains(p))
                        .map(|(_, h)| *h)
                        .collect()
                };
                group(&SPLIT_BENEFICS[..]) == benefic.iter().copied().collect::<BTreeSet<u8>>()
                    && group(&SPLIT_MALEFICS[..]) == malefic.iter().copied().collect::<BTreeSet<u8>>()
            }
        }
    }
}

struct Akriti {
    name: &'static str,
    effect: &'static str,
    nature: &'static str,
    shape: Shape,
}

const GADA: Akriti = Akriti {
    name: "Gada Yoga",
    effect: "Wealth through effort, ritual learning and steady accumulation",
    nature: "benefic",
    shape: Shape::Exactly(&[&[1, 4], &[4, 7], &[7, 10], &[10, 1]]),
};

const SHAKATA: Akriti = Akriti {
    name: "Shakata-Nabhasa Yoga",
    effect: "Livelihood by hard labour; fortunes rise and fall like a cart",
    nature: "malefic",
    shape: Shape::Exactly(&[&[1, 7]]),
};

const VIHAGA: Akriti = Akriti {
    name: "Vihaga Yoga",
    effect: "A wandering life as messenger or traveller; restless but resourceful",
    nature: "mixed",
    shape: Shape::Exactly(&[&[4, 10]]),
};

const SHRINGATAKA: Akriti = Akriti {
    name: "Shringataka Yoga",
    effect: "Happiness in later life, a fortunate marriage and favour from authority",
    nature: "benefic",
    shape: Shape::Exactly(&[&[1, 5, 9]]),
};

const HALA: Akriti = Akriti {
    name: "Hala Yoga",
    effect: "Livelihood from land and agriculture; a hard-working, frugal life",
    nature: "mixed",
    shape: Shape::Exactly(&[&[2, 6, 10], &[3, 7, 11], &[4, 8, 12]]),
};

const VAJRA: Akriti = Akriti {
    name: "Vajra Yoga",
    effect: "Happiness at the beginning and end of life; brave and handsome",
    nature: "benefic",
    shape: Shape::Split {
        benefic: [1, 7],
        malefic: [4, 10],
    },
};

const YAVA: Akriti = Akriti {
    name: "Yava Yoga",
    effect: "Prosperity in middle life; charitable, steady and observant of vows",
    nature: "benefic",
    shape: Shape::Split {
        benefic: [4, 10],
        malefic: [1, 7],
    },
};

const KAMALA: Akriti = Akriti {
    name: "Kamala Yoga",
    effect: "Lasting fame, virtue and a life of distinction, like a lotus in bloom",
    nature: "benefic",
    shape: Shape::Exactly(&[&[1, 4, 7, 10]]),
};

const VAPI: Akriti = Akriti {
    name: "Vapi Yoga",
    effect: "Saves and guards wealth; comfort and a pleasing life",
    nature: "benefic",
    shape: Shape::Within(&[&[2, 5, 8, 11], &[3, 6, 9, 12]]),
};

const YUPA: Akriti = Akriti {
    name: "Yupa Yoga",
    effect: "Devoted to ritual and duty; generous and self-controlled",
    nature: "benefic",
    shape: Shape::Consecutive { len: 4, starts: &[1] },
};

const ISHU: Akriti = Akriti {
    name: "Ishu Yoga",
    effect: "A hunter's temperament: sharp, harsh and inclined to confinement of others",
    nature: "malefic",
    shape: Shape::Consecutive { len: 4, starts: &[4] },
};

const SHAKTI: Akriti = Akriti {
    name: "Shakti Yoga",
    effect: "Struggle and delay, softened by patience and skill in argument",
    nature: "malefic",
    shape: Shape::Consecutive { len: 4, starts: &[7] },
};

const DANDA: Akriti = Akriti {
    name: "Danda Yoga",
    effect: "Separation from kin, dependence on others and hardship",
    nature: "malefic",
    shape: Shape::Consecutive { len: 4, starts: &[10] },
};

const NAUKA: Akriti = Akriti {
    name: "Nauka Yoga",
    effect: "Livelihood connected with water and trade; fame mixed with unsteadiness",
    nature: "mixed",
    shape: Shape::Consecutive { len: 7, starts: &[1] },
};

const KUTA: Akriti = Akriti {
    name: "Kuta Yoga",
    effect: "Untruthful dealings and hardship; life in remote or rough places",
    nature: "malefic",
    shape: Shape::Consecutive { len: 7, starts: &[4] },
};

const CHHATRA: Akriti = Akriti {
    name: "Chhatra Yoga",
    effect: "Protector of others; happiness in the first and last parts of life",
    nature: "benefic",
    shape: Shape::Consecutive { len: 7, starts: &[7] },
};

const CHAPA: Akriti = Akriti {
    name: "Chapa Yoga",
    effect: "A guardian of stores and forests; comfort in the middle of life",
    nature: "mixed",
    shape: Shape::Consecutive { len: 7, starts: &[10] },
};

const ARDHA_CHANDRA: Akriti = Akriti {
    name: "Ardha Chandra Yoga",
    effect: "Leadership of an army or group; handsome and wealthy",
    nature: "benefic",
    shape: Shape::Consecutive {
        len: 7,
        starts: &[2, 3, 5, 6, 8, 9, 11, 12],
    },
};

const CHAKRA: Akriti = Akriti {
    name: "Chakra Yoga",
    effect: "A ruler to whom others bow; great prosperity",
    nature: "benefic",
    shape: Shape::Exactly(&[&[1, 3, 5, 7, 9, 11]]),
};

const SAMUDRA: Akriti = Akriti {
    name: "Samudra Yoga",
    effect: "Wealth like the ocean, enjoyment and a good reputation",
    nature: "benefic",
    shape: Shape::Exactly(&[&[2, 4, 6, 8, 10, 12]]),
};

fn akriti(ctx: &ChartContext, yoga: &Akriti) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(placements) = seven_placements(ctx) else {
        return Ok(Vec::new());
    };
    if !yoga.shape.matches(&placements) {
        return Ok(Vec::new());
    }
    let houses = occupied(&placements);
    let house_vec: Vec<u8> = houses.iter().copied().collect();
    Ok(vec![RawYogaRecord::builder(yoga.name, YogaKind::PatternDistribution, CATEGORY)
        .description(format!("{}.", yoga.effect))
        .formation(format!("All seven planets in the {} houses", house_list(&houses)))
        .strength(Strength::Medium)
        .planets(&SEVEN_PLANETS)
        .houses(&house_vec)
        .attribute("group", "Akriti")
        .attribute("nature", yoga.nature)
        .build()])
}

fn gada(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &GADA)
}

fn shakata(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &SHAKATA)
}

fn vihaga(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &VIHAGA)
}

fn shringataka(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &SHRINGATAKA)
}

fn hala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &HALA)
}

fn vajra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &VAJRA)
}

fn yava(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &YAVA)
}

fn kamala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &KAMALA)
}

fn vapi(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &VAPI)
}

fn yupa(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &YUPA)
}

fn ishu(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &ISHU)
}

fn shakti(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &SHAKTI)
}

fn danda(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &DANDA)
}

fn nauka(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &NAUKA)
}

fn kuta(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &KUTA)
}

fn chhatra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &CHHATRA)
}

fn chapa(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &CHAPA)
}

fn ardha_chandra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &ARDHA_CHANDRA)
}

fn chakra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &CHAKRA)
}

fn samudra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    akriti(ctx, &SAMUDRA)
}

/// Rajju, Musala or Nala: all planets in movable, fixed or dual signs.
fn ashraya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let signs: Option<Vec<u8>> = SEVEN_PLANETS.iter().map(|p| ctx.sign(*p)).collect();
    let Some(signs) = signs else {
        return Ok(Vec::new());
    };
    // sign_num % 3: 1 movable, 2 fixed, 0 dual
    let modality = signs[0] % 3;
    if !signs.iter().all(|s| s % 3 == modality) {
        return Ok(Vec::new());
    }
    let (name, quality, effect, nature) = match modality {
        1 => (
            "Rajju Yoga",
            "movable",
            "Fond of travel and change; success away from the birthplace",
            "mixed",
        ),
        2 => (
            "Musala Yoga",
            "fixed",
            "Steady, proud and wealthy; firm in purpose and respected",
            "benefic",
        ),
        _ => (
            "Nala Yoga",
            "dual",
            "Skilful and adaptable, though prone to uneven fortune",
            "mixed",
        ),
    };
    Ok(vec![RawYogaRecord::builder(name, YogaKind::PatternDistribution, CATEGORY)
        .description(format!("{}.", effect))
        .formation(format!("All seven planets in {} signs", quality))
        .strength(Strength::Medium)
        .planets(&SEVEN_PLANETS)
        .attribute("group", "Ashraya")
        .attribute("nature", nature)
        .build()])
}

/// Mala or Sarpa: benefics or malefics in three different kendras.
fn dala(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let groups: [(&str, [Planet; 3], &str, &str, Strength); 2] = [
        (
            "Mala Yoga",
            [Planet::Mercury, Planet::Jupiter, Planet::Venus],
            "Comfort, vehicles, fine clothes and a happy life",
            "benefic",
            Strength::Strong,
        ),
        (
            "Sarpa Yoga",
            [Planet::Sun, Planet::Mars, Planet::Saturn],
            "Hardship, crookedness and dependence on others",
            "malefic",
            Strength::Medium,
        ),
    ];
    let mut records = Vec::new();
    for (name, planets, effect, nature, strength) in groups {
        let Some(houses) = ctx.houses_of(&planets) else {
            continue;
        };
        let kendras: BTreeSet<u8> = houses
            .iter()
            .copied()
            .filter(|h| geometry::is_kendra_house(*h))
            .collect();
        if kendras.len() < 3 {
            continue;
        }
        records.push(
            RawYogaRecord::builder(name, YogaKind::PatternDistribution, CATEGORY)
                .description(format!("{}.", effect))
                .formation(format!("Planets in the {} houses", house_list(&kendras)))
                .strength(strength)
                .planets(&planets)
                .houses(&houses)
                .attribute("group", "Dala")
                .attribute("nature", nature)
                .build(),
        );
    }
    Ok(records)
}

/// Named by how many houses the seven planets occupy.
fn sankhya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(placements) = seven_placements(ctx) else {
        return Ok(Vec::new());
    };
    let houses = occupied(&placements);
    let (name, effect, nature) = match houses.len() {
        7 => ("Vallaki Yoga", "Fond of music and the arts; many friends and comforts", "benefic"),
        6 => ("Damini Yoga", "Generous, helpful and blessed with cattle and wealth", "benefic"),
        5 => ("Pasha Yoga", "Capable earner surrounded by dependants; prone to entanglement", "mixed"),
        4 => ("Kedara Yoga", "Livelihood from land; truthful and helpful to others", "benefic"),
        3 => ("Shoola Yoga", "Sharp temper, courage and conflict; wounds and disputes", "malefic"),
        2 => ("Yuga Yoga", "Unconventional beliefs and uneven fortune", "malefic"),
        _ => ("Gola Yoga", "Struggle for livelihood and lack of learning", "malefic"),
    };
    let house_vec: Vec<u8> = houses.iter().copied().collect();
    Ok(vec![RawYogaRecord::builder(name, YogaKind::PatternDistribution, CATEGORY)
        .description(format!("{}.", effect))
        .formation(format!("Seven planets spread over {} houses", houses.len()))
        .strength(Strength::Medium)
        .planets(&SEVEN_PLANETS)
        .houses(&house_vec)
        .attribute("group", "Sankhya")
        .attribute("nature", nature)
        .build()])
}
