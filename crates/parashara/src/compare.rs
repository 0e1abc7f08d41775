//! Multi-profile comparison over canonical yoga names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::pipeline::{ChartQuality, YogaReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub index: usize,
    pub total_count: usize,
    pub chart_quality: ChartQuality,
    pub yogas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub per_profile: Vec<ProfileSummary>,
    /// Names present in every profile
    pub common_yogas: Vec<String>,
    /// Per profile, names present in no other profile
    pub unique_yogas_per_profile: Vec<Vec<String>>,
}

fn name_set(report: &YogaReport) -> BTreeSet<String> {
    report.yogas.iter().map(|y| y.canonical_name.clone()).collect()
}

/// Compare reports already produced by the single-chart pipeline.
pub fn compare_reports(reports: &[YogaReport]) -> ComparisonReport {
    let sets: Vec<BTreeSet<String>> = reports.iter().map(name_set).collect();

    let common: BTreeSet<String> = match sets.split_first() {
        Some((first, rest)) => first
            .iter()
            .filter(|name| rest.iter().all(|s| s.contains(*name)))
            .cloned()
            .collect(),
        None => BTreeSet::new(),
    };

    let unique: Vec<Vec<String>> = sets
        .iter()
        .enumerate()
        .map(|(i, set)| {
            set.iter()
                .filter(|name| {
                    sets.iter()
                        .enumerate()
                        .all(|(j, other)| i == j || !other.contains(*name))
                })
                .cloned()
                .collect::<Vec<String>>()
        })
        .collect();

    let per_profile: Vec<ProfileSummary> = reports
        .iter()
        .zip(&sets)
        .enumerate()
        .map(|(index, (report, set))| ProfileSummary {
            index,
            total_count: report.total_count,
            chart_quality: report.chart_quality,
            yogas: set.iter().cloned().collect(),
        })
        .collect();

    ComparisonReport {
        per_profile,
        common_yogas: common.into_iter().collect(),
        unique_yogas_per_profile: unique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{RawYogaRecord, YogaKind};
    use crate::pipeline::classify::uncategorized;
    use crate::pipeline::report::ReportInput;
    use crate::pipeline::CanonicalYoga;

    fn report(names: &[&str]) -> YogaReport {
        let yogas = names
            .iter()
            .map(|n| {
                let record = RawYogaRecord::builder(n, YogaKind::SunRelative, "Surya Yoga").build();
                CanonicalYoga::from_record(record, uncategorized())
            })
            .collect();
        YogaReport::build(ReportInput {
            yogas,
            include_all: true,
            warnings: Vec::new(),
            planets_expected: 9,
            planets_resolved: 9,
        })
    }

    #[test]
    fn test_common_and_unique() {
        let a = report(&["Vesi Yoga", "Amala Yoga", "Hamsa Yoga"]);
        let b = report(&["Amala Yoga", "Sasa Yoga", "Vesi Yoga"]);
        let c = report(&["Amala Yoga"]);
        let cmp = compare_reports(&[a, b, c]);
        assert_eq!(cmp.common_yogas, vec!["Amala Yoga"]);
        assert_eq!(cmp.unique_yogas_per_profile[0], vec!["Hamsa Yoga"]);
        assert_eq!(cmp.unique_yogas_per_profile[1], vec!["Sasa Yoga"]);
        assert!(cmp.unique_yogas_per_profile[2].is_empty());
        assert_eq!(cmp.per_profile.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let cmp = compare_reports(&[]);
        assert!(cmp.common_yogas.is_empty());
        assert!(cmp.per_profile.is_empty());
    }
}
