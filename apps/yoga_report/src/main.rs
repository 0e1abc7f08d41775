use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use parashara::chart::load_chart_from_value;
use parashara::pipeline::timing::start_of_day;
use parashara::{Chart, EngineConfig, VimshottariOracle, YogaEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Yoga report for Vedic birth charts")]
struct Args {
    /// Engine config (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect and classify every yoga in a chart.
    Detect {
        /// Chart JSON file
        chart: PathBuf,

        /// Drop minor yogas from the report.
        #[arg(long)]
        significant_only: bool,

        /// Birth time (RFC 3339) for dasha timing; falls back to the chart's `birth_datetime`.
        #[arg(long)]
        birth: Option<String>,
    },
    /// Print the reference definition of a yoga.
    Lookup {
        /// Any spelling of the yoga name
        name: String,
    },
    /// Compare the yogas of two or more charts.
    Compare {
        #[arg(required = true, num_args = 2..)]
        charts: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Detect {
            chart,
            significant_only,
            birth,
        } => {
            if significant_only {
                config.include_all = false;
            }
            detect(config, &chart, birth.as_deref())
        }
        Command::Lookup { name } => {
            let engine = YogaEngine::new(config)?;
            let definition = engine
                .lookup(&name)
                .with_context(|| format!("No yoga named {:?}", name))?;
            print_json(&definition)
        }
        Command::Compare { charts } => {
            let engine = YogaEngine::new(config)?;
            let loaded = charts
                .iter()
                .map(|path| read_chart(path).map(|(chart, _)| chart))
                .collect::<anyhow::Result<Vec<Chart>>>()?;
            print_json(&engine.compare(&loaded))
        }
    }
}

fn detect(config: EngineConfig, path: &Path, birth: Option<&str>) -> anyhow::Result<()> {
    let (chart, chart_birth) = read_chart(path)?;
    let timing = config.timing.clone();
    let engine = YogaEngine::new(config)?;

    if !timing.enabled {
        return print_json(&engine.detect(&chart));
    }

    let birth = match birth.map(str::to_string).or(chart_birth) {
        Some(text) => parse_datetime(&text)?,
        None => bail!("Timing is enabled but no birth time was given (--birth or birth_datetime)"),
    };
    let reference = timing.reference_date.map(start_of_day).unwrap_or_else(Utc::now);
    info!("Dasha timing from {} relative to {}", birth, reference);

    match VimshottariOracle::from_chart(&chart, birth, reference) {
        Ok(oracle) => print_json(&engine.detect_with_timing(&chart, &oracle)),
        Err(e) => {
            warn!("Timing unavailable: {}", e);
            print_json(&engine.detect(&chart))
        }
    }
}

/// Chart plus the optional `birth_datetime` field of the same document.
fn read_chart(path: &Path) -> anyhow::Result<(Chart, Option<String>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read chart {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Chart {} is not valid JSON", path.display()))?;
    let chart = load_chart_from_value(&value)
        .with_context(|| format!("Failed to load chart {}", path.display()))?;
    let birth = value
        .get("birth_datetime")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    Ok((chart, birth))
}

fn parse_datetime(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Birth time {:?} is not RFC 3339", text))?;
    Ok(parsed.with_timezone(&Utc))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
