// Configuration module entry point
// Layered configuration: optional config file, environment overrides,
// and the orchestrator-injected PORT / CACHE_URI variables

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{CacheConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. `WEATHER_*` environment variables override
    /// file values, and the plain `PORT` / `CACHE_URI` variables injected
    /// by the orchestrator take precedence over everything else.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("WEATHER").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8111)?
            .set_default("cache.key", "weatherforecast")?
            .set_default("cache.ttl_seconds", 5)?
            .set_default("cache.connect_timeout", 5)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "WeatherApi/0.1")?
            .set_default("http.enable_cors", false)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("cache.uri", std::env::var("CACHE_URI").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("no-such-config").expect("defaults should load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.cache.key, "weatherforecast");
        assert_eq!(cfg.cache.ttl_seconds, 5);
        assert_eq!(cfg.cache.connect_timeout, 5);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert!(!cfg.http.enable_cors);
    }

    #[test]
    fn test_socket_addr_resolves() {
        let mut cfg = Config::load_from("no-such-config").expect("defaults should load");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 9000);
        assert!(addr.is_ipv4());
    }

    #[test]
    fn test_socket_addr_rejects_bad_host() {
        let mut cfg = Config::load_from("no-such-config").expect("defaults should load");
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
