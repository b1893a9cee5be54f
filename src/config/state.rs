// Application state module
// Bundles configuration with the shared cache handle

use crate::cache::ForecastCache;

use super::types::Config;

/// Application state shared by all request handlers
pub struct AppState {
    pub config: Config,
    pub cache: ForecastCache,
}

impl AppState {
    /// Create `AppState` from loaded configuration
    ///
    /// The cache handle is constructed here but does not connect yet;
    /// the connection is established lazily on first use.
    pub fn new(config: Config) -> Self {
        let cache = ForecastCache::from_config(&config.cache);
        Self { config, cache }
    }
}
