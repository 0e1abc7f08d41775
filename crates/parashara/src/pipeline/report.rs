//! Final report assembly: ordering, category counts and chart quality.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::pipeline::{CanonicalYoga, Impact, Importance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Average,
    Challenging,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Self::Excellent,
            55..=74 => Self::Good,
            35..=54 => Self::Average,
            _ => Self::Challenging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartQuality {
    pub score: u8,
    pub grade: Grade,
}

const BASE_SCORE: i32 = 50;

fn weight(importance: Importance) -> i32 {
    match importance {
        Importance::Major => 8,
        Importance::Moderate => 3,
        Importance::Minor => 1,
    }
}

impl ChartQuality {
    /// Positive yogas add, negative ones subtract; cancelled yogas count for nothing.
    pub fn assess(yogas: &[CanonicalYoga]) -> Self {
        let mut score = BASE_SCORE;
        for yoga in yogas.iter().filter(|y| !y.cancelled) {
            match yoga.impact {
                Impact::Positive => score += weight(yoga.importance),
                Impact::Negative => score -= weight(yoga.importance),
                Impact::Mixed | Impact::Neutral => {}
            }
        }
        let score = score.clamp(0, 100) as u8;
        Self {
            score,
            grade: Grade::from_score(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaReport {
    pub yogas: Vec<CanonicalYoga>,
    /// Yogas in `yogas`
    pub total_count: usize,
    /// Yogas detected before the `include_all` filter
    pub detected_count: usize,
    pub categories: BTreeMap<String, usize>,
    pub chart_quality: ChartQuality,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Some planets were missing or malformed
    pub partial: bool,
    pub planets_expected: usize,
    pub planets_resolved: usize,
}

/// Major first, then by impact, then strongest, then by name.
pub fn sort_yogas(yogas: &mut [CanonicalYoga]) {
    yogas.sort_by(|a, b| {
        (a.importance, a.impact, Reverse(a.strength), &a.canonical_name).cmp(&(
            b.importance,
            b.impact,
            Reverse(b.strength),
            &b.canonical_name,
        ))
    });
}

pub struct ReportInput {
    pub yogas: Vec<CanonicalYoga>,
    pub include_all: bool,
    pub warnings: Vec<String>,
    pub planets_expected: usize,
    pub planets_resolved: usize,
}

impl YogaReport {
    pub fn build(input: ReportInput) -> Self {
        let ReportInput {
            mut yogas,
            include_all,
            warnings,
            planets_expected,
            planets_resolved,
        } = input;

        let chart_quality = ChartQuality::assess(&yogas);
        let detected_count = yogas.len();
        if !include_all {
            yogas.retain(|y| y.importance != Importance::Minor);
        }
        sort_yogas(&mut yogas);

        let mut categories = BTreeMap::new();
        for yoga in &yogas {
            *categories.entry(yoga.category.clone()).or_insert(0) += 1;
        }

        Self {
            total_count: yogas.len(),
            detected_count,
            categories,
            chart_quality,
            partial: planets_resolved < planets_expected,
            warnings,
            planets_expected,
            planets_resolved,
            yogas,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.yogas.iter().map(|y| y.canonical_name.as_str()).collect()
    }

    pub fn get(&self, canonical_name: &str) -> Option<&CanonicalYoga> {
        self.yogas.iter().find(|y| y.canonical_name == canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{RawYogaRecord, Strength, YogaKind};
    use crate::pipeline::classify::uncategorized;

    fn yoga(name: &str, importance: Importance, impact: Impact, strength: Strength) -> CanonicalYoga {
        let mut c = uncategorized();
        c.importance = importance;
        c.impact = impact;
        let record = RawYogaRecord::builder(name, YogaKind::SunRelative, "Surya Yoga")
            .strength(strength)
            .build();
        CanonicalYoga::from_record(record, c)
    }

    fn input(yogas: Vec<CanonicalYoga>, include_all: bool) -> ReportInput {
        ReportInput {
            yogas,
            include_all,
            warnings: Vec::new(),
            planets_expected: 9,
            planets_resolved: 9,
        }
    }

    #[test]
    fn test_sort_order() {
        let report = YogaReport::build(input(
            vec![
                yoga("B", Importance::Minor, Impact::Positive, Strength::Strong),
                yoga("C", Importance::Major, Impact::Negative, Strength::Strong),
                yoga("A", Importance::Major, Impact::Positive, Strength::Weak),
                yoga("D", Importance::Major, Impact::Positive, Strength::VeryStrong),
            ],
            true,
        ));
        assert_eq!(report.names(), vec!["D", "A", "C", "B"]);
        assert_eq!(report.categories.get("Surya Yoga"), Some(&4));
        assert!(!report.partial);
    }

    #[test]
    fn test_significant_only_keeps_detected_count() {
        let report = YogaReport::build(input(
            vec![
                yoga("A", Importance::Major, Impact::Positive, Strength::Strong),
                yoga("B", Importance::Minor, Impact::Positive, Strength::Strong),
            ],
            false,
        ));
        assert_eq!(report.total_count, 1);
        assert_eq!(report.detected_count, 2);
    }

    #[test]
    fn test_quality_grades() {
        assert_eq!(ChartQuality::assess(&[]).score, 50);
        assert_eq!(Grade::from_score(80), Grade::Excellent);
        assert_eq!(Grade::from_score(10), Grade::Challenging);

        let many: Vec<CanonicalYoga> = (0..10)
            .map(|i| yoga(&i.to_string(), Importance::Major, Impact::Negative, Strength::Strong))
            .collect();
        let quality = ChartQuality::assess(&many);
        assert_eq!(quality.score, 0);
        assert_eq!(quality.grade, Grade::Challenging);
    }
}
