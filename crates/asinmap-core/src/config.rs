use crate::app_config::{AppConfig, DEFAULT_SEARCH_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function. Decoupled from the real environment so tests can drive it with
/// a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("ASINMAP_LOG_LEVEL", "info");
    let search_base_url = or_default("ASINMAP_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL);
    let user_agent = or_default(
        "ASINMAP_USER_AGENT",
        "asinmap/0.1 (catalog-reconciliation)",
    );
    let inter_request_delay_ms = parse_u64("ASINMAP_INTER_REQUEST_DELAY_MS", "0")?;

    Ok(AppConfig {
        log_level,
        search_base_url,
        user_agent,
        inter_request_delay_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("expected defaults to load");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.search_base_url, DEFAULT_SEARCH_BASE_URL);
        assert_eq!(cfg.user_agent, "asinmap/0.1 (catalog-reconciliation)");
        assert_eq!(cfg.inter_request_delay_ms, 0);
    }

    #[test]
    fn build_app_config_honours_overrides() {
        let mut map = HashMap::new();
        map.insert("ASINMAP_LOG_LEVEL", "debug");
        map.insert("ASINMAP_SEARCH_BASE_URL", "http://127.0.0.1:9999/s?q=");
        map.insert("ASINMAP_USER_AGENT", "custom-agent/2.0");
        map.insert("ASINMAP_INTER_REQUEST_DELAY_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).expect("expected overrides to load");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.search_base_url, "http://127.0.0.1:9999/s?q=");
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
        assert_eq!(cfg.inter_request_delay_ms, 250);
    }

    #[test]
    fn build_app_config_rejects_unparseable_delay() {
        let mut map = HashMap::new();
        map.insert("ASINMAP_INTER_REQUEST_DELAY_MS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ASINMAP_INTER_REQUEST_DELAY_MS"),
            "expected InvalidEnvVar(ASINMAP_INTER_REQUEST_DELAY_MS), got: {result:?}"
        );
    }
}
