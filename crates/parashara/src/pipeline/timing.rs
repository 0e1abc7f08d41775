//! Activation timing from the Vimshottari dasha sequence.
//!
//! Timing is best-effort enrichment: it runs after classification and a
//! failing oracle only leaves the timing field empty.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{Chart, Planet};
use crate::error::YogaError;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const YEAR_DAYS: f64 = 365.25;
/// Width of one nakshatra in degrees (13°20').
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

const VIMSHOTTARI_SEQUENCE: [(Planet, f64); 9] = [
    (Planet::Ketu, 7.0),
    (Planet::Venus, 20.0),
    (Planet::Sun, 6.0),
    (Planet::Moon, 10.0),
    (Planet::Mars, 7.0),
    (Planet::Rahu, 18.0),
    (Planet::Jupiter, 16.0),
    (Planet::Saturn, 19.0),
    (Planet::Mercury, 17.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingStatus {
    Past,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaTiming {
    pub dasha_lord: Planet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "startAge")]
    pub start_age: f64,
    #[serde(rename = "endAge")]
    pub end_age: f64,
    pub status: TimingStatus,
}

/// Source of activation timing for a set of forming planets.
pub trait TimingOracle {
    fn activation(&self, planets: &[Planet]) -> Result<YogaTiming, YogaError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mahadasha {
    pub lord: Planet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Mahadasha sequence from birth, starting with the Moon's nakshatra lord.
#[derive(Debug, Clone)]
pub struct VimshottariOracle {
    birth: DateTime<Utc>,
    reference: DateTime<Utc>,
    periods: Vec<Mahadasha>,
}

impl VimshottariOracle {
    pub fn new(
        birth: DateTime<Utc>,
        moon_longitude: f64,
        reference: DateTime<Utc>,
    ) -> Result<Self, YogaError> {
        if !moon_longitude.is_finite() {
            return Err(YogaError::Timing(format!(
                "Moon longitude is not a number: {}",
                moon_longitude
            )));
        }
        let lon = moon_longitude.rem_euclid(360.0);
        let nakshatra = ((lon / NAKSHATRA_SPAN).floor() as usize).min(26);
        let progress = (lon - nakshatra as f64 * NAKSHATRA_SPAN) / NAKSHATRA_SPAN;
        let start_index = nakshatra % VIMSHOTTARI_SEQUENCE.len();

        let mut periods = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
        let mut current = birth;
        for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
            let (lord, years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % VIMSHOTTARI_SEQUENCE.len()];
            // The first period is the balance left at birth
            let effective = if offset == 0 {
                years * (1.0 - progress)
            } else {
                years
            };
            let end = current + years_to_duration(effective);
            periods.push(Mahadasha {
                lord,
                start: current,
                end,
            });
            current = end;
        }
        Ok(Self {
            birth,
            reference,
            periods,
        })
    }

    /// Build from a chart's Moon longitude.
    pub fn from_chart(
        chart: &Chart,
        birth: DateTime<Utc>,
        reference: DateTime<Utc>,
    ) -> Result<Self, YogaError> {
        let moon = chart
            .get(Planet::Moon)
            .and_then(|s| s.longitude)
            .ok_or_else(|| YogaError::Timing("Moon longitude required for Vimshottari dasha".to_string()))?;
        Self::new(birth, moon, reference)
    }

    pub fn periods(&self) -> &[Mahadasha] {
        &self.periods
    }

    fn age_at(&self, instant: DateTime<Utc>) -> f64 {
        (instant - self.birth).num_seconds() as f64 / (YEAR_DAYS * 86_400.0)
    }
}

impl TimingOracle for VimshottariOracle {
    fn activation(&self, planets: &[Planet]) -> Result<YogaTiming, YogaError> {
        let period = self
            .periods
            .iter()
            .find(|p| planets.contains(&p.lord))
            .ok_or_else(|| YogaError::Timing("no forming planet rules a mahadasha".to_string()))?;
        let status = if period.end <= self.reference {
            TimingStatus::Past
        } else if period.start <= self.reference {
            TimingStatus::Active
        } else {
            TimingStatus::Upcoming
        };
        Ok(YogaTiming {
            dasha_lord: period.lord,
            start: period.start,
            end: period.end,
            start_age: round_age(self.age_at(period.start)),
            end_age: round_age(self.age_at(period.end)),
            status,
        })
    }
}

fn years_to_duration(years: f64) -> Duration {
    Duration::seconds((years * YEAR_DAYS * 86_400.0).round() as i64)
}

fn round_age(age: f64) -> f64 {
    (age * 10.0).round() / 10.0
}

/// Midnight UTC on a date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sequence_starts_from_nakshatra_lord() {
        // 0 degrees: start of Ashwini, ruled by Ketu, full 7 years remain
        let oracle = VimshottariOracle::new(birth(), 0.0, birth()).unwrap();
        let first = &oracle.periods()[0];
        assert_eq!(first.lord, Planet::Ketu);
        assert!((oracle.age_at(first.end) - 7.0).abs() < 0.01);

        // Middle of Bharani (Venus): half of 20 years remain
        let oracle = VimshottariOracle::new(birth(), NAKSHATRA_SPAN * 1.5, birth()).unwrap();
        let first = &oracle.periods()[0];
        assert_eq!(first.lord, Planet::Venus);
        assert!((oracle.age_at(first.end) - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_activation_status() {
        let reference = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let oracle = VimshottariOracle::new(birth(), 0.0, reference).unwrap();
        // Ketu 0-7, Venus 7-27
        let ketu = oracle.activation(&[Planet::Ketu]).unwrap();
        assert_eq!(ketu.status, TimingStatus::Past);
        let venus = oracle.activation(&[Planet::Venus]).unwrap();
        assert_eq!(venus.status, TimingStatus::Active);
        assert_eq!(venus.start_age, 7.0);
        let sun = oracle.activation(&[Planet::Sun]).unwrap();
        assert_eq!(sun.status, TimingStatus::Upcoming);
        assert!(oracle.activation(&[]).is_err());
    }

    #[test]
    fn test_missing_moon_is_a_timing_error() {
        let chart = Chart::builder().ascendant(1).build();
        assert!(matches!(
            VimshottariOracle::from_chart(&chart, birth(), birth()),
            Err(YogaError::Timing(_))
        ));
    }
}
