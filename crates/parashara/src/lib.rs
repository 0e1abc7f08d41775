pub mod chart;
pub mod compare;
pub mod config;
pub mod definitions;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod rules;

pub use chart::{load_chart_from_json, Chart, ChartContext, Planet, Reference};
pub use compare::{compare_reports, ComparisonReport, ProfileSummary};
pub use config::{CancellationMode, EngineConfig, RajYogaMode};
pub use definitions::{lookup, YogaDefinition};
pub use detectors::{RawYogaRecord, Strength, YogaKind};
pub use engine::YogaEngine;
pub use error::YogaError;
pub use pipeline::normalize::normalize;
pub use pipeline::dedup::deduplicate;
pub use pipeline::classify::classify;
pub use pipeline::{
    CanonicalYoga, ChartQuality, Grade, Impact, Importance, LifeArea, TimingOracle, VimshottariOracle,
    YogaReport, YogaTiming,
};
pub use rules::lordship::house_lord;
