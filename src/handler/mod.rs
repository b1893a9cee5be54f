//! Request handler module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, dispatch to endpoint handlers, and access logging.

mod forecast;
mod health;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Service routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` - static greeting page
    Greeting,
    /// `/api/weatherforecast` - forecast data with cache-aside
    Forecast,
    /// `/health` - health check including cache connectivity
    Health,
    /// `/alive` - liveness probe without dependency checks
    Alive,
}

/// Match a request path to a route (exact match only)
pub fn match_route(path: &str) -> Option<Route> {
    match path {
        "/" => Some(Route::Greeting),
        "/api/weatherforecast" => Some(Route::Forecast),
        "/health" => Some(Route::Health),
        "/alive" => Some(Route::Alive),
        _ => None,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();
    let is_head = method == Method::HEAD;

    // 1. Check HTTP method
    let mut response = match check_http_method(&method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => dispatch(&path, is_head, &state).await,
    };

    // 2. Attach the configured Server header
    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server_name);
    }

    // 3. Access logging
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path,
        );
        entry.http_version = http_version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return a response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Dispatch a GET/HEAD request to its endpoint handler
async fn dispatch(path: &str, is_head: bool, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match match_route(path) {
        Some(Route::Greeting) => forecast::greeting(is_head),
        Some(Route::Forecast) => forecast::weather_forecast(state, is_head).await,
        Some(Route::Health) => health::health(state, is_head).await,
        Some(Route::Alive) => health::alive(is_head),
        None => http::build_404_response(),
    }
}

/// Response body size as declared by the Content-Length header
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Human-readable HTTP version for access logs
fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_route_known_paths() {
        assert_eq!(match_route("/"), Some(Route::Greeting));
        assert_eq!(match_route("/api/weatherforecast"), Some(Route::Forecast));
        assert_eq!(match_route("/health"), Some(Route::Health));
        assert_eq!(match_route("/alive"), Some(Route::Alive));
    }

    #[test]
    fn test_match_route_unknown_paths() {
        assert_eq!(match_route("/api"), None);
        assert_eq!(match_route("/api/weatherforecast/today"), None);
        assert_eq!(match_route("/healthz"), None);
        assert_eq!(match_route(""), None);
    }

    #[test]
    fn test_method_check_allows_get_and_head() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());
    }

    #[test]
    fn test_method_check_rejects_post() {
        let resp = check_http_method(&Method::POST, false).expect("must be rejected");
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_method_check_answers_preflight() {
        let resp = check_http_method(&Method::OPTIONS, true).expect("must be answered");
        assert_eq!(resp.status(), 204);
    }

    #[test]
    fn test_http_version_label() {
        assert_eq!(http_version_label(Version::HTTP_11), "1.1");
        assert_eq!(http_version_label(Version::HTTP_10), "1.0");
        assert_eq!(http_version_label(Version::HTTP_2), "2");
    }
}
