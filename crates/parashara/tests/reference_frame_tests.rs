mod common;

use parashara::{Chart, Importance, Planet, Strength, YogaEngine};

#[test]
fn test_saraswati_is_major_with_benefics_connected() {
    // Aries rising: Mercury and Venus in Taurus, Jupiter in a friendly Aries
    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Mercury, 2)
        .place(Planet::Venus, 2)
        .place_in_sign(Planet::Jupiter, 5, 1)
        .build();
    let report = YogaEngine::default().detect(&chart);
    let saraswati = report.get("Saraswati Yoga").unwrap();
    assert_eq!(saraswati.strength, Strength::VeryStrong);
    assert_eq!(saraswati.importance, Importance::Major);
    assert_eq!(
        saraswati.attributes.get("jupiter_strength").map(String::as_str),
        Some("Friendly Sign")
    );
}

#[test]
fn test_saraswati_needs_every_pair_placed() {
    // Jupiter in the 5th and Venus in the 10th are sixth from each other
    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Mercury, 1)
        .place(Planet::Jupiter, 5)
        .place(Planet::Venus, 10)
        .build();
    let report = YogaEngine::default().detect(&chart);
    assert!(report.get("Saraswati Yoga").is_none());
}

#[test]
fn test_gaja_kesari_counts_from_the_moon() {
    // Jupiter 4th from the Moon, but 6th from the Lagna
    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Moon, 3)
        .place(Planet::Jupiter, 6)
        .build();
    let report = YogaEngine::default().detect(&chart);
    assert!(report.get("Gaja Kesari Yoga").is_some());

    let chart = Chart::builder()
        .ascendant(1)
        .place(Planet::Moon, 3)
        .place(Planet::Jupiter, 5)
        .build();
    let report = YogaEngine::default().detect(&chart);
    assert!(report.get("Gaja Kesari Yoga").is_none());
}
