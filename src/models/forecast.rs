//! Temperature forecast model and aggregation

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of hourly points in the short-range forecast
pub const HOURLY_FORECAST_POINTS: usize = 24;

/// Number of days in the daily extremes forecast
pub const DAILY_FORECAST_DAYS: usize = 10;

/// Air temperature at one point in time, in the location's local time
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemperaturePoint {
    pub time: DateTime<FixedOffset>,
    /// Celsius
    pub temperature: f64,
}

/// Highest and lowest forecast temperature of one local calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyExtremes {
    pub date: NaiveDate,
    pub max: f64,
    pub min: f64,
}

/// Temperature forecast for a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemperatureForecast {
    /// Time zone the forecast is expressed in
    pub timezone: String,
    /// The next [`HOURLY_FORECAST_POINTS`] points
    pub hourly: Vec<TemperaturePoint>,
    /// Up to [`DAILY_FORECAST_DAYS`] days, oldest first
    pub daily: Vec<DailyExtremes>,
}

impl TemperatureForecast {
    /// Build a forecast from UTC samples, converting them to `timezone`.
    ///
    /// Unknown time zone names fall back to UTC. Samples need not be evenly
    /// spaced; the daily aggregate uses whatever falls on each local day.
    #[must_use]
    pub fn from_samples(samples: &[(DateTime<Utc>, f64)], timezone: &str) -> Self {
        let tz: Tz = timezone.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown time zone '{}', using UTC", timezone);
            Tz::UTC
        });

        let mut local: Vec<(DateTime<Tz>, f64)> = samples
            .iter()
            .map(|(time, temperature)| (time.with_timezone(&tz), *temperature))
            .collect();
        local.sort_by_key(|(time, _)| *time);

        let hourly = local
            .iter()
            .take(HOURLY_FORECAST_POINTS)
            .map(|(time, temperature)| TemperaturePoint {
                time: time.fixed_offset(),
                temperature: *temperature,
            })
            .collect();

        let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for (time, temperature) in &local {
            days.entry(time.date_naive())
                .and_modify(|(max, min)| {
                    *max = max.max(*temperature);
                    *min = min.min(*temperature);
                })
                .or_insert((*temperature, *temperature));
        }

        let daily = days
            .into_iter()
            .take(DAILY_FORECAST_DAYS)
            .map(|(date, (max, min))| DailyExtremes { date, max, min })
            .collect();

        Self {
            timezone: tz.name().to_string(),
            hourly,
            daily,
        }
    }
}
