//! External cache module
//!
//! Optional Redis-backed cache handle used by the forecast endpoint and
//! the health check. The connection is established lazily on first use
//! and reused afterwards. Every cache failure degrades to uncached
//! operation: errors are logged as warnings and never fail a request.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;

use crate::config::CacheConfig;
use crate::logger;

/// Shared cache handle
///
/// `client` is `None` when no cache URI is configured or the URI failed
/// to parse; all operations are then cheap no-ops.
pub struct ForecastCache {
    client: Option<Client>,
    connection: Mutex<Option<ConnectionManager>>,
    connect_timeout: Duration,
}

impl ForecastCache {
    /// Build a cache handle from configuration without connecting
    pub fn from_config(config: &CacheConfig) -> Self {
        let client = match &config.uri {
            Some(uri) => match Client::open(uri.as_str()) {
                Ok(client) => {
                    logger::log_info(&format!("Cache configured: {uri}"));
                    Some(client)
                }
                Err(e) => {
                    logger::log_warning(&format!("Invalid cache URI, caching disabled: {e}"));
                    None
                }
            },
            None => {
                logger::log_info("No CACHE_URI configured, caching disabled");
                None
            }
        };

        Self {
            client,
            connection: Mutex::new(None),
            connect_timeout: Duration::from_secs(config.connect_timeout),
        }
    }

    /// A handle with caching permanently disabled
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self {
            client: None,
            connection: Mutex::new(None),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Whether a cache backend is configured
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Get the shared connection, establishing it on first use
    ///
    /// Returns `None` when no cache is configured or the connection
    /// cannot be established within the configured timeout.
    async fn connection(&self) -> Option<ConnectionManager> {
        let client = self.client.as_ref()?;

        let mut guard = self.connection.lock().await;
        if let Some(connection) = guard.as_ref() {
            return Some(connection.clone());
        }

        let connect = ConnectionManager::new(client.clone());
        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(connection)) => {
                logger::log_info("Connected to cache");
                *guard = Some(connection.clone());
                Some(connection)
            }
            Ok(Err(e)) => {
                logger::log_warning(&format!("Cache connection failed: {e}"));
                None
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Cache connection timed out after {}s",
                    self.connect_timeout.as_secs()
                ));
                None
            }
        }
    }

    /// Read a cached payload, `None` on miss or any cache error
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut connection = self.connection().await?;
        let result: redis::RedisResult<Option<String>> = connection.get(key).await;
        match result {
            Ok(value) => value,
            Err(e) => {
                logger::log_warning(&format!("Cache read error: {e}"));
                None
            }
        }
    }

    /// Store a payload with an expiry; failures are logged and swallowed
    pub async fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let Some(mut connection) = self.connection().await else {
            return;
        };
        let result: redis::RedisResult<()> = connection.set_ex(key, value, ttl_seconds).await;
        if let Err(e) = result {
            logger::log_warning(&format!("Cache write error: {e}"));
        }
    }

    /// Ping the cache backend, returning whether it responded
    ///
    /// Returns `true` when no cache is configured: an absent cache is not
    /// a degraded state.
    pub async fn ping(&self) -> bool {
        if !self.is_configured() {
            return true;
        }
        let Some(mut connection) = self.connection().await else {
            return false;
        };
        let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut connection).await;
        match result {
            Ok(_) => true,
            Err(e) => {
                logger::log_warning(&format!("Cache ping failed: {e}"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_config(uri: Option<&str>) -> CacheConfig {
        CacheConfig {
            uri: uri.map(ToString::to_string),
            key: "weatherforecast".to_string(),
            ttl_seconds: 5,
            connect_timeout: 5,
        }
    }

    #[test]
    fn test_unconfigured_cache_is_disabled() {
        let cache = ForecastCache::from_config(&cache_config(None));
        assert!(!cache.is_configured());
    }

    #[test]
    fn test_invalid_uri_disables_caching() {
        let cache = ForecastCache::from_config(&cache_config(Some("not a uri")));
        assert!(!cache.is_configured());
    }

    #[test]
    fn test_valid_uri_is_configured_without_connecting() {
        // Client::open only parses the URI; no server needs to be running
        let cache = ForecastCache::from_config(&cache_config(Some("redis://localhost:6379")));
        assert!(cache.is_configured());
    }

    #[tokio::test]
    async fn test_disabled_cache_get_misses() {
        let cache = ForecastCache::disabled();
        assert_eq!(cache.get("weatherforecast").await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_put_is_noop() {
        let cache = ForecastCache::disabled();
        cache.put("weatherforecast", "[]", 5).await;
        assert_eq!(cache.get("weatherforecast").await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_reports_healthy() {
        let cache = ForecastCache::disabled();
        assert!(cache.ping().await);
    }
}
