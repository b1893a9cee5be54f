//! Weather forecast sample data module
//!
//! Generates the randomized five-day forecast served by the API. The data
//! is ephemeral: a fresh batch is produced for every uncached request.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Canonical forecast summaries, coldest to hottest
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Number of days covered by one forecast batch
pub const FORECAST_DAYS: usize = 5;

/// Inclusive Celsius temperature range
pub const TEMP_MIN_C: i32 = -20;
pub const TEMP_MAX_C: i32 = 55;

/// A single forecast record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: DateTime<Utc>,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: String,
}

impl WeatherForecast {
    /// Build a record for the given date and Celsius temperature
    pub fn new(date: DateTime<Utc>, temperature_c: i32, summary: &str) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: fahrenheit(temperature_c),
            summary: summary.to_string(),
        }
    }
}

/// Celsius to Fahrenheit with truncating integer division
///
/// Truncation toward zero is deliberate: the derived value must match
/// `temperatureC * 9/5 + 32` exactly as clients recompute it.
pub const fn fahrenheit(celsius: i32) -> i32 {
    celsius * 9 / 5 + 32
}

/// Generate one batch of forecasts, one record per day starting tomorrow
#[allow(clippy::cast_possible_wrap)]
pub fn generate() -> Vec<WeatherForecast> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    (1..=FORECAST_DAYS as i64)
        .map(|day| {
            let temperature_c = rng.gen_range(TEMP_MIN_C..=TEMP_MAX_C);
            let summary = SUMMARIES
                .choose(&mut rng)
                .copied()
                .unwrap_or(SUMMARIES[0]);
            WeatherForecast::new(now + Duration::days(day), temperature_c, summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_count() {
        assert_eq!(generate().len(), FORECAST_DAYS);
    }

    #[test]
    fn test_generate_temperature_range() {
        // Random data, so sample a few batches
        for _ in 0..20 {
            for record in generate() {
                assert!(record.temperature_c >= TEMP_MIN_C);
                assert!(record.temperature_c <= TEMP_MAX_C);
            }
        }
    }

    #[test]
    fn test_generate_derived_fahrenheit() {
        for record in generate() {
            assert_eq!(record.temperature_f, record.temperature_c * 9 / 5 + 32);
        }
    }

    #[test]
    fn test_generate_known_summaries() {
        for record in generate() {
            assert!(SUMMARIES.contains(&record.summary.as_str()));
        }
    }

    #[test]
    fn test_generate_dates_ascending() {
        let batch = generate();
        for pair in batch.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_fahrenheit_truncates_toward_zero() {
        assert_eq!(fahrenheit(-20), -4);
        assert_eq!(fahrenheit(-19), -2); // -34.2 truncates to -34
        assert_eq!(fahrenheit(0), 32);
        assert_eq!(fahrenheit(1), 33); // 1.8 truncates to 1
        assert_eq!(fahrenheit(55), 131);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = WeatherForecast::new(Utc::now(), 21, "Mild");
        let json = serde_json::to_value(&record).expect("serializable");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("date"));
        assert!(object.contains_key("temperatureC"));
        assert!(object.contains_key("temperatureF"));
        assert!(object.contains_key("summary"));
        assert_eq!(object["temperatureC"], 21);
        assert_eq!(object["temperatureF"], 69);
    }

    #[test]
    fn test_round_trips_through_cache_payload() {
        let batch = generate();
        let payload = serde_json::to_string(&batch).expect("serializable");
        let restored: Vec<WeatherForecast> =
            serde_json::from_str(&payload).expect("deserializable");
        assert_eq!(batch, restored);
    }
}
