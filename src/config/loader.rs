use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::Deserialize;

use crate::error::{AppError, Context, Result};

use super::Config;

/// Relative location probed when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "assets/config.json";

/// Locate the configuration file.
///
/// An explicit path must exist. Without one, the default file is looked up in the
/// working directory and then next to the executable; `None` means "use built-ins".
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(AppError::message(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    let search_paths = [
        std::env::current_dir()
            .map(|cwd| cwd.join(default))
            .unwrap_or_else(|_| default.to_path_buf()),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(default)))
            .unwrap_or_else(|| default.to_path_buf()),
    ];

    Ok(search_paths.into_iter().find(|candidate| candidate.exists()))
}

/// Load configuration from `path`, or fall back to [`Config::builtin`].
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        debug!("No config file found, using built-in defaults");
        return Ok(Config::builtin());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config JSON at {}", path.display()))?;
    let config = parse_config(&json)
        .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse a JSON document, filling any omitted field from the built-in defaults.
pub fn parse_config(json: &str) -> Result<Config> {
    let raw: RawConfig = serde_json::from_str(json)?;
    Ok(raw.into_config())
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    api: RawApiConfig,
    #[serde(default)]
    refresh: RawRefreshConfig,
    #[serde(default)]
    search: RawSearchConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawApiConfig {
    base_url: Option<String>,
    vs_currency: Option<String>,
    per_page: Option<u32>,
    page: Option<u32>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    headers: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawRefreshConfig {
    interval_secs: Option<u64>,
    preserve_search: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawSearchConfig {
    debounce_ms: Option<u64>,
}

impl RawConfig {
    fn into_config(self) -> Config {
        let mut config = Config::builtin();

        let api = self.api;
        if let Some(base_url) = api.base_url {
            config.api.base_url = base_url;
        }
        if let Some(currency) = api.vs_currency {
            config.api.vs_currency = currency.trim().to_lowercase();
        }
        if let Some(per_page) = api.per_page {
            config.api.per_page = per_page;
        }
        if let Some(page) = api.page {
            config.api.page = page;
        }
        if let Some(secs) = api.timeout_secs {
            config.api.timeout = Duration::from_secs(secs);
        }
        config.api.headers = api.headers;

        if let Some(secs) = self.refresh.interval_secs {
            config.refresh.interval = Duration::from_secs(secs);
        }
        if let Some(preserve) = self.refresh.preserve_search {
            config.refresh.preserve_search = preserve;
        }

        if let Some(ms) = self.search.debounce_ms {
            config.search.debounce = Duration::from_millis(ms);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_builtin() {
        let config = parse_config("{}").expect("parse");
        let builtin = Config::builtin();
        assert_eq!(config.api.base_url, builtin.api.base_url);
        assert_eq!(config.refresh.interval, builtin.refresh.interval);
        assert_eq!(config.search.debounce, builtin.search.debounce);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let json = r#"{
            "api": { "vs_currency": "USD", "headers": { "x-cg-demo-api-key": "${CG_KEY}" } },
            "refresh": { "preserve_search": true },
            "search": { "debounce_ms": 250 }
        }"#;
        let config = parse_config(json).expect("parse");

        assert_eq!(config.api.vs_currency, "usd");
        assert_eq!(config.api.per_page, 100);
        assert_eq!(
            config.api.headers.get("x-cg-demo-api-key").map(String::as_str),
            Some("${CG_KEY}")
        );
        assert!(config.refresh.preserve_search);
        assert_eq!(config.refresh.interval, Duration::from_secs(10));
        assert_eq!(config.search.debounce, Duration::from_millis(250));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_config(r#"{ "api": { "per_pgae": 50 } }"#).expect_err("typo rejected");
        assert!(err.to_string().contains("per_pgae"), "unexpected error: {err}");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = resolve_config_path(Some(Path::new("does/not/exist.json")))
            .expect_err("missing file");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn loads_bundled_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE);
        let config = load_config(Some(&path)).expect("bundled config loads");
        assert_eq!(config.api.vs_currency, "idr");
        crate::config::validate_config(&config).expect("bundled config is valid");
    }
}
