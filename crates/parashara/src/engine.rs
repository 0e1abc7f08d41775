//! The produced interface: detect, lookup and compare.

use log::{info, warn};

use crate::chart::{Chart, ChartContext, ALL_PLANETS};
use crate::compare::{compare_reports, ComparisonReport};
use crate::config::EngineConfig;
use crate::definitions::{self, YogaDefinition};
use crate::detectors;
use crate::error::YogaError;
use crate::pipeline::report::ReportInput;
use crate::pipeline::{self, TimingOracle, YogaReport};

/// Runs the full pipeline for one chart at a time. Holds no per-chart state.
#[derive(Debug, Clone, Default)]
pub struct YogaEngine {
    config: EngineConfig,
}

impl YogaEngine {
    pub fn new(config: EngineConfig) -> Result<Self, YogaError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn detect(&self, chart: &Chart) -> YogaReport {
        self.run(chart, None)
    }

    /// Detect, then attach activation timing from `oracle`.
    pub fn detect_with_timing(&self, chart: &Chart, oracle: &dyn TimingOracle) -> YogaReport {
        self.run(chart, Some(oracle))
    }

    fn run(&self, chart: &Chart, oracle: Option<&dyn TimingOracle>) -> YogaReport {
        let mut warnings: Vec<String> = chart
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.subject, i.message))
            .collect();

        let ctx = ChartContext::new(chart, &self.config);
        let detection = detectors::run_all(&ctx);
        let raw_count = detection.records.len();
        warnings.extend(detection.failures);

        let mut processed = pipeline::process(detection.records);
        warnings.append(&mut processed.warnings);

        if let Some(oracle) = oracle {
            warnings.extend(pipeline::attach_timing(&mut processed.yogas, oracle));
        }

        let planets_resolved = ALL_PLANETS.iter().filter(|p| chart.get(**p).is_some()).count();
        if planets_resolved < ALL_PLANETS.len() {
            warn!(
                "Partial chart: {} of {} planets resolved",
                planets_resolved,
                ALL_PLANETS.len()
            );
        }

        let report = YogaReport::build(ReportInput {
            yogas: processed.yogas,
            include_all: self.config.include_all,
            warnings,
            planets_expected: ALL_PLANETS.len(),
            planets_resolved,
        });
        info!(
            "Detected {} raw records, {} canonical yogas, reporting {} (quality {})",
            raw_count, report.detected_count, report.total_count, report.chart_quality.score
        );
        report
    }

    pub fn lookup(&self, name: &str) -> Result<YogaDefinition, YogaError> {
        definitions::lookup(name)
    }

    /// Run the single-chart pipeline per chart and compare canonical names.
    pub fn compare(&self, charts: &[Chart]) -> ComparisonReport {
        let reports: Vec<YogaReport> = charts.iter().map(|c| self.detect(c)).collect();
        compare_reports(&reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Planet;

    #[test]
    fn test_detect_on_partial_chart() {
        let chart = Chart::builder()
            .ascendant(1)
            .place(Planet::Jupiter, 4)
            .place(Planet::Moon, 1)
            .build();
        let engine = YogaEngine::default();
        let report = engine.detect(&chart);
        assert!(report.partial);
        assert_eq!(report.planets_resolved, 2);
        assert!(report.get("Gaja Kesari Yoga").is_some());
        // Jupiter in Cancer, a kendra from Lagna
        assert!(report.get("Hamsa Yoga").is_some());
        assert!(report.get("Kemadruma Yoga").is_none());
        assert!(report.get("Amala Yoga").is_none());
    }

    const FLANK_YOGAS: [&str; 11] = [
        "Kemadruma Yoga",
        "Sunapha Yoga",
        "Anapha Yoga",
        "Durudhara Yoga",
        "Vesi Yoga",
        "Vosi Yoga",
        "Ubhayachari Yoga",
        "Shubha Kartari Yoga",
        "Papa Kartari Yoga",
        "Parvata Yoga",
        "Shubha Yoga",
    ];

    #[test]
    fn test_sparse_charts_form_no_flank_yogas() {
        let engine = YogaEngine::default();
        let moon_only = Chart::builder().ascendant(1).place(Planet::Moon, 3).build();
        let sun_and_mars = Chart::builder()
            .ascendant(1)
            .place(Planet::Sun, 1)
            .place(Planet::Mars, 2)
            .build();
        for chart in [moon_only, sun_and_mars] {
            let report = engine.detect(&chart);
            assert!(report.partial);
            for name in FLANK_YOGAS {
                assert!(report.get(name).is_none(), "{} formed on a partial chart", name);
            }
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            conjunction_orb: -1.0,
            ..EngineConfig::default()
        };
        assert!(YogaEngine::new(config).is_err());
    }
}
