pub mod context;
pub mod loader;
pub mod planet;
pub mod types;

pub use context::{ChartContext, Reference};
pub use loader::{load_chart_from_json, load_chart_from_value};
pub use planet::{join_planets, Planet, ALL_PLANETS, SEVEN_PLANETS, TARA_PLANETS};
pub use types::{Chart, ChartBuilder, ChartIssue, PlanetState};
