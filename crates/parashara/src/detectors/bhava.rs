//! House-lord placement yogas.
//!
//! The lord of every house is looked up in a fixed 12x12 table indexed by
//! (house ruled, house occupied). Lord exchanges between two houses form
//! Parivartana yogas.

use crate::chart::ChartContext;
use crate::detectors::record::{RawYogaRecord, Strength, YogaKind};
use crate::detectors::{ordinal, Detector, Emits};
use crate::error::YogaError;
use crate::rules::dignity::Dignity;
use crate::rules::geometry;

pub const CATEGORY: &str = "Bhava Yoga";
pub const PARIVARTANA_CATEGORY: &str = "Parivartana Yoga";

pub static DETECTORS: &[Detector] = &[
    Detector {
        id: "bhava.lord_placement",
        family: CATEGORY,
        emits: Emits::Generated(placement_names),
        run: lord_placement,
    },
    Detector {
        id: "bhava.parivartana",
        family: PARIVARTANA_CATEGORY,
        emits: Emits::Generated(parivartana_names),
        run: parivartana,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct BhavaEffect {
    pub effect: &'static str,
    pub strength: Strength,
}

const fn e(effect: &'static str, strength: Strength) -> BhavaEffect {
    BhavaEffect { effect, strength }
}

const W: Strength = Strength::Weak;
const M: Strength = Strength::Medium;
const S: Strength = Strength::Strong;
const V: Strength = Strength::VeryStrong;

/// Row = house ruled, column = house occupied (both 1-based, stored 0-based).
pub static BHAVA_TABLE: [[BhavaEffect; 12]; 12] = [
    // 1st lord
    [
        e("Strong constitution, self-reliance and a prominent personality", V),
        e("Gains through own effort, family wealth and good speech", M),
        e("Courage, enterprise and helpful siblings", M),
        e("Happiness from parents, property and inner contentment", S),
        e("Intelligence, fame and good children", S),
        e("Health struggles, debts or enemies overcome by effort", W),
        e("Life shaped by partnership; the spouse influences fortune", S),
        e("Interest in hidden matters; obstacles and health concerns", W),
        e("Fortune, devotion and blessings from elders", S),
        e("Career success, honour and self-made status", S),
        e("Steady gains, influential friends and fulfilled wishes", M),
        e("Expenditure, residence abroad and a spiritual leaning", W),
    ],
    // 2nd lord
    [
        e("Wealth tied to one's own effort, family pride and forceful speech", S),
        e("Sound finances and family stability", S),
        e("Earnings through communication, skill or siblings", M),
        e("Wealth through property, the mother or education", S),
        e("Income from speculation, children or creative work", S),
        e("Money spent on disputes; income from service or lending", W),
        e("Wealth through the spouse or business partnerships", S),
        e("Fluctuating finances, inheritance and family friction", W),
        e("Fortunate wealth, support from the father and generosity", S),
        e("Earnings from career and public standing", S),
        e("Many sources of income and lasting accumulation", S),
        e("Expenses exceed savings; wealth spent abroad or on charity", W),
    ],
    // 3rd lord
    [
        e("Self-made through courage; an energetic personality", M),
        e("Income through skills, writing or siblings; speech can be harsh", M),
        e("Courage, supportive siblings and strong initiative", S),
        e("Comfort earned by own effort; frequent short journeys", M),
        e("Creative talent and enterprising children", M),
        e("Friction with siblings or neighbours; victory through persistence", W),
        e("Partnerships formed through enterprise; an active spouse", M),
        e("Risky ventures and worries concerning siblings", W),
        e("Fortune through travel; differences with the father", M),
        e("Career in media, sales or the performing arts", S),
        e("Gains through enterprise and the help of siblings", S),
        e("Losses through rash initiatives; travel abroad", W),
    ],
    // 4th lord
    [
        e("Comforts, property and the affection of the mother", S),
        e("Wealth through family property and vehicles", S),
        e("Home life unsettled by relocations; skilled hands", M),
        e("Property, vehicles and peace at home", V),
        e("Happiness through children, learning and devotion", S),
        e("Domestic disputes, property litigation or the mother's health", W),
        e("Comfortable marriage; property through the spouse", S),
        e("Loss of domestic peace; complications with inherited property", W),
        e("Fortune through the mother and property; higher learning", S),
        e("Status through property, public life or politics", S),
        e("Gains from land, vehicles and friends", M),
        e("Residence abroad, loss of property or withdrawal from the world", W),
    ],
    // 5th lord
    [
        e("Intelligent, respected and blessed with children", S),
        e("Wealth through intellect, teaching or speculation", S),
        e("Creative communication; artistic or adventurous children", M),
        e("Happiness from children, education and devotion", S),
        e("Strong intellect, good progeny and accumulated merit", V),
        e("Challenges concerning children; success in competition", W),
        e("Marriage by choice; an intelligent spouse", S),
        e("Delays regarding children; interest in mysticism", W),
        e("Great fortune, spiritual merit and wise counsel", V),
        e("Career through intellect; an advisor or minister", V),
        e("Gains through speculation, children and students", S),
        e("Spiritual inclination; expenses on children", W),
    ],
    // 6th lord
    [
        e("Competitive and health-conscious; often involved in disputes", W),
        e("Expenses on debts or health; sharp speech", W),
        e("Conflict with siblings; courage against opponents", M),
        e("Unrest at home; trouble over property or the mother", W),
        e("Worries about children or studies; a sharp, critical mind", W),
        e("Victory over enemies and strong resistance to disease", S),
        e("Disputes in marriage or partnerships", W),
        e("Chronic health matters; hidden enemies neutralised", M),
        e("Conflicts with the father or teachers; service in law or religion", W),
        e("Career in service, medicine, law or defence", M),
        e("Gains from competition, loans or litigation", M),
        e("Expenses on health; enemies lose their strength", M),
    ],
    // 7th lord
    [
        e("An influential spouse; a life driven by partnership", S),
        e("Wealth through marriage or business", S),
        e("A courageous spouse; partnerships in communication", M),
        e("A happy home through marriage; property via the spouse", S),
        e("Marriage by affection; creative partnerships", S),
        e("Marital discord or legal disputes in partnerships", W),
        e("A devoted spouse and successful partnerships", V),
        e("Delays or strain in marriage; inheritance through in-laws", W),
        e("A fortunate marriage; a spouse from a good family; travel", S),
        e("Business success; the spouse supports the career", S),
        e("Gains through partnerships and the spouse", M),
        e("Marriage linked to foreign lands; expenses on the partner", W),
    ],
    // 8th lord
    [
        e("Interest in research and the occult; fluctuating health", W),
        e("Family friction; sudden gains or losses of wealth", W),
        e("Risky ventures; long life sustained by courage", M),
        e("Disturbed domestic peace; property disputes", W),
        e("Concerns about children; deep intuition", W),
        e("Victory over hidden enemies; recovery from illness", M),
        e("Strain in marriage; the partner's health needs care", W),
        e("Long life, research ability and hidden resources", S),
        e("Obstacles to fortune; strained ties with the father", W),
        e("Career obstacles; work in research, insurance or investigation", W),
        e("Sudden gains, inheritance and insurance income", M),
        e("Spiritual pursuits; losses softened by detachment", M),
    ],
    // 9th lord
    [
        e("Fortunate, righteous and blessed by elders", V),
        e("Wealth through fortune, the father and good conduct", S),
        e("Fortune through courage, writing and travel", M),
        e("Property, vehicles and a blessed home", S),
        e("Merit, devotion and fortunate children", V),
        e("Fortune tested by disputes; service to a cause", W),
        e("A fortunate marriage; travel after marriage", S),
        e("Obstacles to fortune; hidden spiritual wealth", W),
        e("Great fortune, a strong father and a philosophical mind", V),
        e("High status, a righteous career and authority", V),
        e("Steady gains and support from the influential", S),
        e("Pilgrimage, fortune abroad and charity", M),
    ],
    // 10th lord
    [
        e("Self-made career, fame and authority", V),
        e("Wealth through profession; a family business", S),
        e("Career in communication or media; frequent travel", M),
        e("Status through property, education or public office", S),
        e("Career in teaching, advice or creative fields", S),
        e("Service professions; competition at work", W),
        e("Career in partnership or trade; travel for work", S),
        e("Career obstacles and sudden changes", W),
        e("Duty and career aligned; a respected position", V),
        e("A powerful career and lasting reputation", V),
        e("Large gains through career; an influential network", S),
        e("Career abroad or in institutions; expenses through work", W),
    ],
    // 11th lord
    [
        e("Gains come easily; influential friends", S),
        e("Wealth accumulation and family prosperity", S),
        e("Gains through siblings, skills and effort", M),
        e("Gains from property and vehicles", M),
        e("Gains through speculation and children", S),
        e("Gains through service or lending; disputes with friends", W),
        e("Gains via the spouse and partnerships", M),
        e("Gains lost to obstacles; trouble with friends", W),
        e("Fortunate gains; support from elders", S),
        e("Gains through career and authority", S),
        e("Abundant income and fulfilled ambitions", V),
        e("Gains spent on charity or abroad", W),
    ],
    // 12th lord
    [
        e("Expenditure on oneself; foreign connections; idealism", W),
        e("Family wealth drained; speech needs care", W),
        e("Expenses through siblings or travel", M),
        e("Residence away from the homeland; domestic expenses", W),
        e("Expenses on education; spiritually minded children", W),
        e("Expenses kept in check; enemies defeated", M),
        e("Expenses through the spouse; a partner from abroad", W),
        e("Spiritual depth; expenses turn into gain", M),
        e("Pilgrimage and spending on righteous causes", M),
        e("Career abroad or in hospitals and retreats", M),
        e("Gains through foreign sources; spending on friends", M),
        e("Liberation, restful sleep and expenses on good causes", S),
    ],
];

/// Sanskrit house names used for Parivartana names.
pub const BHAVA_NAMES: [&str; 12] = [
    "Tanu", "Dhana", "Sahaja", "Sukha", "Putra", "Ari", "Yuvati", "Randhra", "Dharma", "Karma",
    "Labha", "Vyaya",
];

pub fn bhava_effect(ruled: u8, occupied: u8) -> Result<&'static BhavaEffect, YogaError> {
    let ruled = crate::rules::lordship::check_house(ruled)?;
    let occupied = crate::rules::lordship::check_house(occupied)?;
    Ok(&BHAVA_TABLE[(ruled - 1) as usize][(occupied - 1) as usize])
}

pub fn placement_name(ruled: u8, occupied: u8) -> String {
    format!("{} Lord in {} House", ordinal(ruled), ordinal(occupied))
}

fn placement_names() -> Vec<String> {
    (1..=12u8)
        .flat_map(|ruled| (1..=12u8).map(move |occupied| placement_name(ruled, occupied)))
        .collect()
}

fn lord_placement(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    let Some(lords) = ctx.lords() else {
        return Ok(Vec::new());
    };
    let mut records = Vec::new();
    for (ruled, lord) in lords.iter() {
        let Some(occupied) = ctx.house(lord) else {
            continue;
        };
        let entry = bhava_effect(ruled, occupied)?;
        let dignity = ctx.dignity(lord);
        let strength = match dignity {
            Some(Dignity::Exalted) | Some(Dignity::OwnSign) => entry.strength.raised(),
            Some(Dignity::Debilitated) => entry.strength.lowered(),
            _ => entry.strength,
        };

        let mut builder = RawYogaRecord::builder(
            &placement_name(ruled, occupied),
            YogaKind::HouseLordPlacement,
            CATEGORY,
        )
        .description(format!("{}.", entry.effect))
        .formation(format!(
            "Lord of the {} house ({}) placed in the {} house",
            ordinal(ruled),
            lord.name(),
            ordinal(occupied)
        ))
        .strength(strength)
        .planets(&[lord])
        .houses(&[ruled, occupied])
        .attribute("lord", lord.name());
        if let Some(d) = dignity {
            builder = builder.attribute("dignity", d.label());
        }
        records.push(builder.build());
    }
    Ok(records)
}

pub fn parivartana_name(a: u8, b: u8) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!(
        "{}-{} Parivartana",
        BHAVA_NAMES[(low - 1) as usize],
        BHAVA_NAMES[(high - 1) as usize]
    )
}

fn parivartana_names() -> Vec<String> {
    let mut names = Vec::new();
    for a in 1..=12u8 {
        for b in (a + 1)..=12u8 {
            names.push(parivartana_name(a, b));
        }
    }
    names
}

/// Kind of lord exchange, fixed by the two houses involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeType {
    Maha,
    Khala,
    Dainya,
}

impl ExchangeType {
    /// Maha when neither house is 3, 6, 8 or 12; Dainya when a dusthana is
    /// involved; Khala when the 3rd is involved without a dusthana.
    pub fn of_houses(a: u8, b: u8) -> Self {
        if geometry::is_dusthana_house(a) || geometry::is_dusthana_house(b) {
            Self::Dainya
        } else if a == 3 || b == 3 {
            Self::Khala
        } else {
            Self::Maha
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Maha => "Maha",
            Self::Khala => "Khala",
            Self::Dainya => "Dainya",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [Self::Maha, Self::Khala, Self::Dainya]
            .into_iter()
            .find(|t| t.label() == label)
    }

    fn strength(self) -> Strength {
        match self {
            Self::Maha => Strength::Strong,
            Self::Khala => Strength::Medium,
            Self::Dainya => Strength::Weak,
        }
    }

    fn effect(self) -> &'static str {
        match self {
            Self::Maha => "The two houses reinforce each other: prosperity and achievement in both areas",
            Self::Khala => "Fluctuating results; gains alternate with setbacks in the houses involved",
            Self::Dainya => "Difficulties from the dusthana spill into the other house; troubles before relief",
        }
    }
}

fn parivartana(ctx: &ChartContext) -> Result<Vec<RawYogaRecord>, YogaError> {
    if ctx.lords().is_none() {
        return Ok(Vec::new());
    }
    let mut records = Vec::new();
    for a in 1..=12u8 {
        for b in (a + 1)..=12u8 {
            let (Some(lord_a), Some(lord_b)) = (ctx.lord_of(a), ctx.lord_of(b)) else {
                continue;
            };
            if lord_a == lord_b || ctx.house(lord_a) != Some(b) || ctx.house(lord_b) != Some(a) {
                continue;
            }
            let kind = ExchangeType::of_houses(a, b);
            records.push(
                RawYogaRecord::builder(&parivartana_name(a, b), YogaKind::HouseLordPlacement, PARIVARTANA_CATEGORY)
                    .description(format!("{} Parivartana: {}.", kind.label(), kind.effect()))
                    .formation(format!(
                        "{} lord {} in the {} house and {} lord {} in the {} house",
                        ordinal(a),
                        lord_a.name(),
                        ordinal(b),
                        ordinal(b),
                        lord_b.name(),
                        ordinal(a)
                    ))
                    .strength(kind.strength())
                    .planets(&[lord_a, lord_b])
                    .houses(&[a, b])
                    .attribute("type", kind.label())
                    .build(),
            );
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Planet};
    use crate::config::EngineConfig;

    #[test]
    fn test_table_is_complete() {
        for ruled in 1..=12u8 {
            for occupied in 1..=12u8 {
                let entry = bhava_effect(ruled, occupied).unwrap();
                assert!(!entry.effect.is_empty(), "{} in {}", ruled, occupied);
            }
        }
        assert_eq!(placement_names().len(), 144);
        assert!(bhava_effect(0, 3).is_err());
    }

    #[test]
    fn test_every_lord_placed_once() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 1)
            .place(Planet::Moon, 2)
            .place(Planet::Mars, 3)
            .place(Planet::Mercury, 4)
            .place(Planet::Jupiter, 5)
            .place(Planet::Venus, 6)
            .place(Planet::Saturn, 7)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = lord_placement(&ctx).unwrap();
        assert_eq!(records.len(), 12);
        // Aries rising: 5th lord Sun in the 1st, exalted in Aries
        let sun = records.iter().find(|r| r.name == "5th Lord in 1st House").unwrap();
        assert_eq!(sun.strength, Strength::VeryStrong);
    }

    #[test]
    fn test_dhana_labha_exchange() {
        // Aries rising: 2nd lord Venus in Aquarius (11th), 11th lord Saturn in Taurus (2nd)
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Venus, 11)
            .place(Planet::Saturn, 2)
            .build();
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = parivartana(&ctx).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Dhana-Labha Parivartana");
        assert_eq!(records[0].attribute("type"), Some("Maha"));
        assert_eq!(records[0].kind, YogaKind::HouseLordPlacement);
    }

    #[test]
    fn test_parivartana_types() {
        assert_eq!(ExchangeType::of_houses(2, 11), ExchangeType::Maha);
        assert_eq!(ExchangeType::of_houses(3, 10), ExchangeType::Khala);
        assert_eq!(ExchangeType::of_houses(3, 8), ExchangeType::Dainya);
        assert_eq!(ExchangeType::from_label("Khala"), Some(ExchangeType::Khala));
        assert_eq!(ExchangeType::from_label("Raja"), None);
        assert_eq!(parivartana_names().len(), 66);
    }
}
