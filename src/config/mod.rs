use std::collections::HashMap;
use std::time::Duration;

pub mod loader;
pub mod validator;

pub use loader::{load_config, resolve_config_path};
pub use validator::validate_config;

/// Public CoinGecko v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Upper bound the listing endpoint accepts for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Connection settings for the market-data API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
    pub timeout: Duration,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    /// Keep a search-narrowed view when a background refresh lands.
    pub preserve_search: bool,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub debounce: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub refresh: RefreshConfig,
    pub search: SearchConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub vs_currency: Option<String>,
    pub base_url: Option<String>,
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                vs_currency: "idr".to_string(),
                per_page: MAX_PER_PAGE,
                page: 1,
                timeout: Duration::from_secs(10),
                headers: HashMap::new(),
            },
            refresh: RefreshConfig {
                interval: Duration::from_secs(10),
                preserve_search: false,
            },
            search: SearchConfig {
                debounce: Duration::from_millis(500),
            },
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(currency) = overrides.vs_currency {
            self.api.vs_currency = currency.trim().to_lowercase();
        }
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(secs) = overrides.refresh_interval_secs {
            self.refresh.interval = Duration::from_secs(secs);
        }
    }
}
