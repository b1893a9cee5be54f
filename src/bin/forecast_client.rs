//! Console client sample
//!
//! Fetches the weather forecast from a running API service and prints it
//! as a table. The service base URL comes from the `API_URL` environment
//! variable. Declares its own forecast record rather than sharing types
//! with the service; the JSON contract is the interface.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:8111";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Forecast record as served by `/api/weatherforecast`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherForecast {
    date: DateTime<Utc>,
    temperature_c: i32,
    temperature_f: i32,
    summary: String,
}

/// Render forecasts as an aligned table
fn render_table(forecasts: &[WeatherForecast]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>7} {:>7}  {}\n",
        "Date", "Temp C", "Temp F", "Summary"
    ));
    for forecast in forecasts {
        // Render the date first; chrono's lazy formatter ignores width specs
        let date = forecast.date.format("%Y-%m-%d").to_string();
        out.push_str(&format!(
            "{:<12} {:>7} {:>7}  {}\n",
            date, forecast.temperature_c, forecast.temperature_f, forecast.summary
        ));
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let health = client
        .get(format!("{api_url}/health"))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    println!("Service health: {health}");

    let forecasts: Vec<WeatherForecast> = client
        .get(format!("{api_url}/api/weatherforecast"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    print!("{}", render_table(&forecasts));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_table() {
        let forecasts = vec![WeatherForecast {
            date: Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap(),
            temperature_c: 21,
            temperature_f: 69,
            summary: "Mild".to_string(),
        }];
        let table = render_table(&forecasts);
        assert!(table.contains("2026-08-08"));
        assert!(table.contains("21"));
        assert!(table.contains("69"));
        assert!(table.contains("Mild"));
    }

    #[test]
    fn test_render_table_header_only_when_empty() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 1);
        assert!(table.contains("Summary"));
    }
}
