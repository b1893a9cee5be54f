//! Forecast endpoint handlers
//!
//! The greeting page and the cache-aside forecast endpoint: read through
//! the external cache when one is configured, fall back to generating
//! fresh data, and write the result back with a short expiry.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::forecast::{self, WeatherForecast};
use crate::http;
use crate::logger;

/// Greeting page served at `/`
const GREETING: &str = "API service is running. \
    Navigate to <a href='/api/weatherforecast'>/api/weatherforecast</a> to see sample data.";

/// `GET /` - static greeting
pub fn greeting(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(GREETING, is_head)
}

/// `GET /api/weatherforecast` - five-day forecast with cache-aside
pub async fn weather_forecast(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let cache_config = &state.config.cache;

    // Try the cache first. A payload that no longer deserializes is
    // treated as a miss rather than served verbatim.
    if let Some(cached) = state.cache.get(&cache_config.key).await {
        match serde_json::from_str::<Vec<WeatherForecast>>(&cached) {
            Ok(_) => {
                logger::log_info("Returning cached weather forecast data");
                return http::build_json_body_response(cached, is_head);
            }
            Err(e) => {
                logger::log_warning(&format!("Discarding malformed cached forecast: {e}"));
            }
        }
    }

    // Miss or cache unavailable: generate fresh data and write it back.
    let batch = forecast::generate();
    match serde_json::to_string(&batch) {
        Ok(json) => {
            state
                .cache
                .put(&cache_config.key, &json, cache_config.ttl_seconds)
                .await;
            http::build_json_body_response(json, is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to serialize forecast: {e}"));
            http::build_500_response()
        }
    }
}
