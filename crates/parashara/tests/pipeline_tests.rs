mod common;

use common::{chart_from_longitudes, leo_chart, scorpio_chart, FIXTURE_JSON};
use parashara::detectors::{self, registered_names};
use parashara::pipeline::dedup::{canonicalize_names, deduplicate};
use parashara::{
    load_chart_from_json, CancellationMode, Chart, ChartContext, EngineConfig, Importance, Planet, Strength,
    YogaEngine, YogaKind,
};
use std::collections::BTreeSet;

#[test]
fn test_repeated_runs_are_identical() {
    let engine = YogaEngine::default();
    let chart = leo_chart();
    let first = serde_json::to_string(&engine.detect(&chart)).unwrap();
    for _ in 0..3 {
        assert_eq!(serde_json::to_string(&engine.detect(&chart)).unwrap(), first);
    }
}

#[test]
fn test_detector_order_does_not_change_output() {
    let chart = scorpio_chart();
    let config = EngineConfig::default();
    let ctx = ChartContext::new(&chart, &config);
    let records = detectors::run_all(&ctx).records;
    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(
        deduplicate(canonicalize_names(records)),
        deduplicate(canonicalize_names(reversed))
    );
}

#[test]
fn test_deduplicate_is_idempotent_on_real_output() {
    for chart in [leo_chart(), scorpio_chart()] {
        let config = EngineConfig::default();
        let ctx = ChartContext::new(&chart, &config);
        let records = detectors::run_all(&ctx).records;
        let input_names: BTreeSet<String> = records.iter().map(|r| r.name.clone()).collect();

        let once = deduplicate(records);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);

        let mut seen = BTreeSet::new();
        for record in &once {
            assert!(seen.insert(record.name.clone()), "{} appears twice", record.name);
            assert!(input_names.contains(&record.name));
        }
    }
}

#[test]
fn test_canonical_names_unique_and_registered() {
    let report = YogaEngine::default().detect(&leo_chart());
    let mut seen = BTreeSet::new();
    for yoga in &report.yogas {
        assert!(seen.insert(yoga.canonical_name.clone()));
        assert!(registered_names().contains(&yoga.canonical_name));
    }
    assert_eq!(report.total_count, report.yogas.len());
    assert_eq!(report.categories.values().sum::<usize>(), report.total_count);
}

#[test]
fn test_weak_house_lord_placement_is_minor() {
    // Aries rising: Venus (2nd lord) in Scorpio, Mars (8th lord) in Taurus
    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Venus, 8)
        .place(Planet::Mars, 2)
        .build();
    let report = YogaEngine::default().detect(&chart);
    let exchange = report.get("Dhana-Randhra Parivartana").unwrap();
    assert_eq!(exchange.strength, Strength::Weak);
    assert_eq!(exchange.importance, Importance::Minor);

    for chart in [leo_chart(), scorpio_chart()] {
        let report = YogaEngine::default().detect(&chart);
        for yoga in &report.yogas {
            if yoga.kind == YogaKind::HouseLordPlacement && yoga.strength == Strength::Weak {
                assert_eq!(yoga.importance, Importance::Minor, "{}", yoga.canonical_name);
            }
        }
    }
}

#[test]
fn test_exactly_one_fixed_angle_yoga() {
    let engine = YogaEngine::default();
    let mut moon = 0.0;
    while moon < 360.0 {
        for sun in [0.0, 17.25, 133.4, 359.9] {
            let chart = chart_from_longitudes(10.0, &[(Planet::Sun, sun), (Planet::Moon, moon)]);
            let report = engine.detect(&chart);
            let fixed: Vec<_> = report
                .yogas
                .iter()
                .filter(|y| y.kind == YogaKind::FixedAngle)
                .collect();
            assert_eq!(fixed.len(), 1, "moon {} sun {}", moon, sun);
        }
        moon += 11.7;
    }

    // Coinciding longitudes are a valid 0 degree angle
    let chart = chart_from_longitudes(10.0, &[(Planet::Sun, 0.0), (Planet::Moon, 0.0)]);
    let report = engine.detect(&chart);
    assert!(report.get("Vishkambha Nitya Yoga").is_some());
}

#[test]
fn test_significant_only_drops_minor() {
    let config = EngineConfig {
        include_all: false,
        ..EngineConfig::default()
    };
    let report = YogaEngine::new(config).unwrap().detect(&leo_chart());
    assert!(report.yogas.iter().all(|y| y.importance != Importance::Minor));
    assert!(report.detected_count >= report.total_count);
}

#[test]
fn test_partial_chart_reports_warnings() {
    let chart = load_chart_from_json(FIXTURE_JSON).unwrap();
    let report = YogaEngine::default().detect(&chart);
    assert!(!report.partial);
    // The outer planet is reported, not fatal
    assert!(report.warnings.iter().any(|w| w.starts_with("Uranus")));

    let json = r#"{"Ascendant": {"house": 1, "sign_num": 1}, "Moon": {"house": 3, "sign_num": 3}}"#;
    let report = YogaEngine::default().detect(&load_chart_from_json(json).unwrap());
    assert!(report.partial);
    assert_eq!(report.planets_resolved, 1);
    assert!(!report.warnings.is_empty());
    for name in [
        "Kemadruma Yoga",
        "Sunapha Yoga",
        "Anapha Yoga",
        "Durudhara Yoga",
        "Shubha Kartari Yoga",
        "Papa Kartari Yoga",
    ] {
        assert!(report.get(name).is_none(), "{} formed around a lone Moon", name);
    }

    let json = r#"{"Ascendant": {"house": 1, "sign_num": 1},
        "Sun": {"house": 1, "sign_num": 1}, "Mars": {"house": 2, "sign_num": 2}}"#;
    let report = YogaEngine::default().detect(&load_chart_from_json(json).unwrap());
    assert!(report.partial);
    for name in ["Vesi Yoga", "Vosi Yoga", "Ubhayachari Yoga"] {
        assert!(report.get(name).is_none(), "{} formed with Mercury unplaced", name);
    }
}

#[test]
fn test_fixture_matches_builder_chart() {
    let loaded = load_chart_from_json(FIXTURE_JSON).unwrap();
    let built = leo_chart();
    assert_eq!(loaded.ascendant, built.ascendant);
    assert_eq!(loaded.planets, built.planets);
    assert_eq!(loaded.issues.len(), 1);
}

#[test]
fn test_potential_neecha_bhanga_is_minor() {
    // Saturn debilitated in Aries with no classical cancellation
    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Saturn, 1)
        .place(Planet::Mars, 3)
        .place(Planet::Sun, 6)
        .place(Planet::Moon, 2)
        .build();
    let config = EngineConfig {
        cancellation_mode: CancellationMode::Potential,
        ..EngineConfig::default()
    };
    let report = YogaEngine::new(config).unwrap().detect(&chart);
    let yoga = report.get("Neecha Bhanga Raja Yoga").unwrap();
    assert_eq!(yoga.importance, Importance::Minor);
}
