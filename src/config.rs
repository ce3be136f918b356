//! App Configuration
//!
//! Built-in defaults, overridable at build time through
//! `PENCIL_API_BASE_URL` and at runtime through `<meta>` tags in index.html.

use log::LevelFilter;

const DEFAULT_API_BASE_URL: &str = "/api";
const API_BASE_META: &str = "pencil-api-base-url";
const LOG_LEVEL_META: &str = "pencil-log-level";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API root without trailing slash
    pub api_base_url: String,
    /// localStorage key of the bearer token
    pub token_storage_key: String,
    /// localStorage key of the tour "completed" flag
    pub tour_storage_key: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(option_env!("PENCIL_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)),
            token_storage_key: "auth_token".to_string(),
            tour_storage_key: "pencil_tour_completed".to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults plus whatever the host page overrides
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(url) = read_meta(API_BASE_META) {
            config.api_base_url = normalize_base_url(&url);
        }
        if let Some(level) = read_meta(LOG_LEVEL_META).and_then(|l| parse_log_level(&l)) {
            config.log_level = level;
        }
        config
    }

    /// Join a resource path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Strip trailing slashes; blank falls back to the default
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}

fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let el = document.query_selector(&format!("meta[name=\"{}\"]", name)).ok()??;
    el.get_attribute("content").filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://api.example.com/"), "https://api.example.com");
        assert_eq!(normalize_base_url("  /api//  "), "/api");
        assert_eq!(normalize_base_url(""), "/api");
        assert_eq!(normalize_base_url("/"), "/api");
    }

    #[test]
    fn test_url_join() {
        let config = AppConfig { api_base_url: "https://x.test/api".to_string(), ..AppConfig::default() };
        assert_eq!(config.url("/brands"), "https://x.test/api/brands");
        assert_eq!(config.url("brands"), "https://x.test/api/brands");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_log_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_log_level("loud"), None);
    }
}
