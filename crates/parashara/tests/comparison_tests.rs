mod common;

use common::{leo_chart, scorpio_chart};
use parashara::YogaEngine;
use std::collections::BTreeSet;

#[test]
fn test_comparison_is_symmetric() {
    let engine = YogaEngine::default();
    let forward = engine.compare(&[leo_chart(), scorpio_chart()]);
    let backward = engine.compare(&[scorpio_chart(), leo_chart()]);

    assert_eq!(forward.common_yogas, backward.common_yogas);
    assert_eq!(
        forward.unique_yogas_per_profile[0],
        backward.unique_yogas_per_profile[1]
    );
    assert_eq!(
        forward.unique_yogas_per_profile[1],
        backward.unique_yogas_per_profile[0]
    );
}

#[test]
fn test_common_and_unique_partition_each_profile() {
    let engine = YogaEngine::default();
    let cmp = engine.compare(&[leo_chart(), scorpio_chart()]);
    let common: BTreeSet<&String> = cmp.common_yogas.iter().collect();

    for (summary, unique) in cmp.per_profile.iter().zip(&cmp.unique_yogas_per_profile) {
        let all: BTreeSet<&String> = summary.yogas.iter().collect();
        let unique: BTreeSet<&String> = unique.iter().collect();
        assert!(unique.is_disjoint(&common));
        // With two profiles every name is either shared or unique
        assert_eq!(all, common.union(&unique).copied().collect());
    }
}

#[test]
fn test_same_chart_has_nothing_unique() {
    let engine = YogaEngine::default();
    let cmp = engine.compare(&[leo_chart(), leo_chart()]);
    assert!(cmp.unique_yogas_per_profile.iter().all(|u| u.is_empty()));
    assert_eq!(cmp.common_yogas, cmp.per_profile[0].yogas);
}
