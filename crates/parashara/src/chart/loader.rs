//! Chart loading from the chart provider's JSON.
//!
//! Accepts either a bare object keyed by planet name or an object with a
//! `planets` field. Per-planet problems are recorded as `ChartIssue`s and the
//! planet is left out; only a structurally unusable document is an error.

use log::warn;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::chart::planet::Planet;
use crate::chart::types::{Chart, ChartIssue, PlanetState};
use crate::error::YogaError;

const ASCENDANT_KEYS: &[&str] = &["ascendant", "asc", "lagna"];

impl Chart {
    pub fn from_json(json: &str) -> Result<Chart, YogaError> {
        load_chart_from_json(json)
    }
}

/// Load a chart from a JSON string.
pub fn load_chart_from_json(json: &str) -> Result<Chart, YogaError> {
    let parsed: Value = serde_json::from_str(json)
        .map_err(|e| YogaError::InvalidChartInput(format!("invalid JSON: {}", e)))?;
    load_chart_from_value(&parsed)
}

/// Load a chart from an already parsed JSON value.
pub fn load_chart_from_value(value: &Value) -> Result<Chart, YogaError> {
    let obj = value.as_object().ok_or_else(|| {
        YogaError::InvalidChartInput("chart must be a JSON object".to_string())
    })?;

    let entries = match obj.get("planets") {
        Some(Value::Object(inner)) => inner,
        Some(_) => {
            return Err(YogaError::InvalidChartInput(
                "planets must be an object keyed by planet name".to_string(),
            ))
        }
        None => obj,
    };

    let mut issues = Vec::new();
    let mut planets = BTreeMap::new();
    let mut ascendant = None;

    for (key, entry) in entries {
        let is_ascendant = ASCENDANT_KEYS.contains(&key.trim().to_lowercase().as_str());
        let planet = Planet::from_name(key);
        if !is_ascendant && planet.is_none() {
            // Outer planets and special points are not used by any detector
            issues.push(issue(key, "not a recognised graha; ignored"));
            continue;
        }

        let state = match parse_state(key, entry) {
            Ok(state) => state,
            Err(message) => {
                warn!("Skipping chart entry {}: {}", key, message);
                issues.push(issue(key, &message));
                continue;
            }
        };

        if is_ascendant {
            ascendant = Some(state);
        } else if let Some(planet) = planet {
            planets.insert(planet, state);
        }
    }

    let mut chart = Chart {
        ascendant,
        planets,
        issues,
    };

    if chart.ascendant.is_none() {
        chart
            .issues
            .push(issue("Ascendant", "missing; house-lord yogas cannot be evaluated"));
    }
    for planet in chart.missing_planets() {
        if !chart.issues.iter().any(|i| Planet::from_name(&i.subject) == Some(planet)) {
            chart.issues.push(issue(planet.name(), "missing from chart"));
        }
    }

    Ok(chart)
}

fn issue(subject: &str, message: &str) -> ChartIssue {
    ChartIssue {
        subject: subject.to_string(),
        message: message.to_string(),
    }
}

fn parse_state(key: &str, entry: &Value) -> Result<PlanetState, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| format!("{} must be an object", key))?;

    let house = read_range(obj, "house")?;
    let sign_field = ["sign_num", "sign"]
        .into_iter()
        .find(|field| obj.contains_key(*field));
    let sign_num = match sign_field {
        Some(field) => read_range(obj, field)?,
        None => match read_longitude(obj)? {
            Some(lon) => ((lon / 30.0) as u8).min(11) + 1,
            None => return Err("sign_num is required when longitude is absent".to_string()),
        },
    };

    Ok(PlanetState {
        house,
        sign_num,
        longitude: read_longitude(obj)?,
        exalted: read_bool(obj, "exalted")?,
        is_retrograde: read_bool(obj, "is_retrograde")?,
    })
}

fn read_range(obj: &Map<String, Value>, field: &str) -> Result<u8, String> {
    let value = obj
        .get(field)
        .ok_or_else(|| format!("missing required field: {}", field))?;
    let n = value
        .as_u64()
        .ok_or_else(|| format!("{} must be an integer", field))?;
    if !(1..=12).contains(&n) {
        return Err(format!("{} must be in 1-12, got {}", field, n));
    }
    Ok(n as u8)
}

fn read_longitude(obj: &Map<String, Value>) -> Result<Option<f64>, String> {
    match obj.get("longitude") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let lon = value
                .as_f64()
                .ok_or_else(|| "longitude must be a number".to_string())?;
            if !lon.is_finite() {
                return Err("longitude must be finite".to_string());
            }
            Ok(Some(lon.rem_euclid(360.0)))
        }
    }
}

fn read_bool(obj: &Map<String, Value>, field: &str) -> Result<Option<bool>, String> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(format!("{} must be a boolean", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_chart() {
        let json = r#"{
            "Ascendant": {"house": 1, "sign_num": 1, "longitude": 12.5},
            "Sun": {"house": 5, "sign_num": 5, "longitude": 130.0},
            "Moon": {"house": 4, "sign_num": 4, "longitude": 0.0}
        }"#;
        let chart = load_chart_from_json(json).unwrap();
        assert_eq!(chart.ascendant_sign(), Some(1));
        assert_eq!(chart.get(Planet::Moon).unwrap().longitude, Some(0.0));
        assert_eq!(chart.planets.len(), 2);
        // Seven grahas reported missing
        assert_eq!(chart.issues.len(), 7);
    }

    #[test]
    fn test_malformed_planet_is_skipped_not_fatal() {
        let json = r#"{
            "planets": {
                "Ascendant": {"house": 1, "sign_num": 3},
                "Mars": {"house": 14, "sign_num": 3},
                "Venus": {"house": 2, "sign_num": 4, "is_retrograde": true}
            }
        }"#;
        let chart = load_chart_from_json(json).unwrap();
        assert!(chart.get(Planet::Mars).is_none());
        assert!(chart.get(Planet::Venus).unwrap().retrograde());
        assert!(chart.issues.iter().any(|i| i.subject == "Mars" && i.message.contains("1-12")));
    }

    #[test]
    fn test_malformed_alias_reported_once() {
        let json = r#"{
            "Ascendant": {"house": 1, "sign_num": 1},
            "moon": {"house": "third", "sign_num": 3}
        }"#;
        let chart = load_chart_from_json(json).unwrap();
        assert!(chart.get(Planet::Moon).is_none());
        let moon_issues = chart
            .issues
            .iter()
            .filter(|i| Planet::from_name(&i.subject) == Some(Planet::Moon))
            .count();
        assert_eq!(moon_issues, 1);
    }

    #[test]
    fn test_non_object_is_error() {
        assert!(matches!(
            load_chart_from_json("[1, 2, 3]"),
            Err(YogaError::InvalidChartInput(_))
        ));
    }

    #[test]
    fn test_sign_from_longitude() {
        let json = r#"{"Jupiter": {"house": 3, "longitude": 95.0}}"#;
        let chart = load_chart_from_json(json).unwrap();
        assert_eq!(chart.get(Planet::Jupiter).unwrap().sign_num, 4);
    }
}
