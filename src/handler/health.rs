//! Health endpoint handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// `GET /health` - health check
///
/// Pings the cache when one is configured. A failed ping is logged as a
/// warning but does not fail the check: the cache is optional and the
/// service keeps serving uncached data without it.
pub async fn health(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    if state.cache.is_configured() && !state.cache.ping().await {
        logger::log_warning("Health check: cache unreachable, serving uncached");
    }
    http::build_text_response("Healthy", is_head)
}

/// `GET /alive` - liveness probe, no dependency checks
pub fn alive(is_head: bool) -> Response<Full<Bytes>> {
    http::build_text_response("Healthy", is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let mut config = Config::load_from("no-such-config").expect("defaults should load");
        config.cache.uri = None;
        AppState::new(config)
    }

    #[tokio::test]
    async fn test_health_without_cache() {
        let state = test_state();
        let response = health(&state, false).await;
        assert_eq!(response.status(), 200);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        assert_eq!(&bytes[..], b"Healthy");
    }

    #[tokio::test]
    async fn test_alive_is_healthy() {
        let response = alive(false);
        assert_eq!(response.status(), 200);
    }
}
