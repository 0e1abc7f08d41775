//! Pancha Mahapurusha yogas.
//!
//! Mars, Mercury, Jupiter, Venus or Saturn in a kendra from the Lagna while
//! exalted or in its own sign. The kendra is always counted from the Lagna.

use crate::chart::{ChartContext, Planet, Reference};
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

pub const CATEGORY: &str = "Pancha Mahapurusha";

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "mahapurusha.ruchaka",
        family: CATEGORY,
        emits: Emits::Names(&["Ruchaka Yoga"]),
        run: ruchaka,
    },
    Detector {
        id: "mahapurusha.bhadra",
        family: CATEGORY,
        emits: Emits::Names(&["Bhadra Yoga"]),
        run: bhadra,
    },
    Detector {
        id: "mahapurusha.hamsa",
        family: CATEGORY,
        emits: Emits::Names(&["Hamsa Yoga"]),
        run: hamsa,
    },
    Detector {
        id: "mahapurusha.malavya",
        family: CATEGORY,
        emits: Emits::Names(&["Malavya Yoga"]),
        run: malavya,
    },
    Detector {
        id: "mahapurusha.sasa",
        family: CATEGORY,
        emits: Emits::Names(&["Sasa Yoga"]),
        run: sasa,
    },
];

struct Mahapurusha {
    name: &'static str,
    planet: Planet,
    effect: &'static str,
}

const RUCHAKA: Mahapurusha = Mahapurusha {
    name: "Ruchaka Yoga",
    planet: Planet::Mars,
    effect: "Courage, physical vigour and command; success in military, police, sport or engineering",
};

const BHADRA: Mahapurusha = Mahapurusha {
    name: "Bhadra Yoga",
    planet: Planet::Mercury,
    effect: "Sharp intellect, eloquence and skill in trade, writing or scholarship",
};

const HAMSA: Mahapurusha = Mahapurusha {
    name: "Hamsa Yoga",
    planet: Planet::Jupiter,
    effect: "Wisdom, righteousness and respect; a teacher, counsellor or spiritual guide",
};

const MALAVYA: Mahapurusha = Mahapurusha {
    name: "Malavya Yoga",
    planet: Planet::Venus,
    effect: "Comfort, refinement and artistic talent; vehicles, luxuries and a happy marriage",
};

const SASA: Mahapurusha = Mahapurusha {
    name: "Sasa Yoga",
    planet: Planet::Saturn,
    effect: "Authority over people, discipline and endurance; leadership of organisations",
};

fn ruchaka(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    detect(ctx, &RUCHAKA)
}

fn bhadra(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    detect(ctx, &BHADRA)
}

fn hamsa(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    detect(ctx, &HAMSA)
}

fn malavya(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    detect(ctx, &MALAVYA)
}

fn sasa(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    detect(ctx, &SASA)
}

fn detect(ctx: &ChartContext, yoga: &Mahapurusha) -> Result<Vec<RawYogaRecord>, YogaError> {
    let planet = yoga.planet;
    let (Some(house), Some(dignity)) = (
        ctx.position_from(Reference::Lagna, planet),
        ctx.dignity(planet),
    ) else {
        return Ok(Vec::new());
    };

    if !geometry::is_kendra_house(house) {
        return Ok(Vec::new());
    }
    let strength = match dignity {
        Dignity::Exalted => Strength::VeryStrong,
        Dignity::OwnSign => Strength::Strong,
        _ => return Ok(Vec::new()),
    };

    let mut builder = RawYogaRecord::builder(yoga.name, YogaKind::PlanetaryStrength, CATEGORY)
        .description(format!("{}.", yoga.effect))
        .formation(format!(
            "{} {} in the {} house from Lagna",
            planet.name(),
            dignity.label().to_lowercase(),
            ordinal(house)
        ))
        .planets(&[planet])
        .houses(&[house])
        .attribute("dignity", dignity.label());

    if ctx.is_combust(planet) {
        builder = builder
            .strength(strength.lowered())
            .weakened(&format!("{} is combust", planet.name()));
    } else {
        builder = builder.strength(strength);
    }
    if ctx.is_retrograde(planet) {
        builder = builder.attribute("retrograde", "true");
    }

    Ok(vec![builder.build()])
}
