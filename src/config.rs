use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:3001";
pub const DEFAULT_PAGE_LENGTH: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and authority of the search service.
    pub origin: String,
    /// Path prefix in front of `/search` and `/preview`. Empty means same origin.
    pub base_path: String,
    pub timeout: Duration,
    pub controller: ControllerConfig,
}

/// Settings injected into a `QueryController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Page length a fresh session starts with.
    pub page_length: u32,
    /// When set, every search request carries this length instead of the session's.
    pub fixed_page_length: Option<u32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            fixed_page_length: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            controller: ControllerConfig::default(),
        }
    }
}

impl Config {
    /// Build a config from the process environment without touching the global.
    pub fn from_env() -> Config {
        let page_length = get_env_parsed("SHAKESEARCH_PAGE_LENGTH", DEFAULT_PAGE_LENGTH).max(1);
        let fixed_page_length = get_env_opt::<u32>("SHAKESEARCH_FIXED_PAGE_LENGTH").map(|l| l.max(1));

        Config {
            origin: get_env_or_default("SHAKESEARCH_ORIGIN", DEFAULT_ORIGIN),
            base_path: get_env_or_default("SHAKESEARCH_BASE_PATH", ""),
            timeout: Duration::from_secs(get_env_parsed(
                "SHAKESEARCH_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            controller: ControllerConfig {
                page_length,
                fixed_page_length,
            },
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_opt<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring invalid value for {key}: {raw:?}");
            None
        }
    }
}

fn get_env_parsed<T: FromStr>(key: &str, default: T) -> T {
    get_env_opt(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_defaults_match_original_session() {
        let config = ControllerConfig::default();
        assert_eq!(config.page_length, 10);
        assert_eq!(config.fixed_page_length, None);
    }

    #[test]
    fn default_config_is_same_origin() {
        let config = Config::default();
        assert_eq!(config.origin, "http://localhost:3001");
        assert!(config.base_path.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
