use crate::error::{AppError, Result};

use super::{ApiConfig, Config, MAX_PER_PAGE};

/// Validate the resolved configuration and surface every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_api(&config.api, &mut issues);

    if config.refresh.interval.is_zero() {
        issues.push("refresh.interval_secs must be greater than zero".to_string());
    }
    if config.search.debounce.is_zero() {
        issues.push("search.debounce_ms must be greater than zero".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "configuration invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_api(api: &ApiConfig, issues: &mut Vec<String>) {
    let base_url = api.base_url.trim();
    if base_url.is_empty() {
        issues.push("api.base_url must not be empty".to_string());
    } else if reqwest::Url::parse(base_url).is_err() {
        issues.push(format!("api.base_url `{base_url}` is not a valid URL"));
    }

    if api.vs_currency.trim().is_empty() {
        issues.push("api.vs_currency must not be empty".to_string());
    }

    if api.per_page == 0 || api.per_page > MAX_PER_PAGE {
        issues.push(format!(
            "api.per_page must be between 1 and {MAX_PER_PAGE}, found {}",
            api.per_page
        ));
    }

    if api.page == 0 {
        issues.push("api.page is 1-based and must be at least 1".to_string());
    }

    if api.timeout.is_zero() {
        issues.push("api.timeout_secs must be greater than zero".to_string());
    }

    for name in api.headers.keys() {
        if name.trim().is_empty() {
            issues.push("api.headers contains an empty header name".to_string());
        }
    }
}
