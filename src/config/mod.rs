use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::query::QueryOptions;

pub const DEFAULT_API_URL: &str = "http://localhost:8081";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// `None` lets the stored CLI profile (or the default URL) decide.
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub options: QueryOptions,
    pub default_page_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    /// Apply `KEY=value` overrides; unparsable values keep the default.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(v) = lookup("SOC_ADMIN_API_URL").or_else(|| lookup("API_URL")) {
            if !v.trim().is_empty() {
                self.api.base_url = Some(v.trim().trim_end_matches('/').to_string());
            }
        }
        if let Some(v) = lookup("SOC_ADMIN_ACCESS_TOKEN") {
            if !v.trim().is_empty() {
                self.api.access_token = Some(v.trim().to_string());
            }
        }
        if let Some(v) = lookup("SOC_ADMIN_TIMEOUT_SECS") {
            self.api.timeout_secs = parse_or_warn("SOC_ADMIN_TIMEOUT_SECS", &v, self.api.timeout_secs);
        }

        // Query builder overrides
        if let Some(v) = lookup("QUERY_ARRAY_FORMAT") {
            self.query.options.array_format = parse_or_warn("QUERY_ARRAY_FORMAT", &v, self.query.options.array_format);
        }
        if let Some(v) = lookup("QUERY_SKIP_NULL") {
            self.query.options.skip_null = parse_or_warn("QUERY_SKIP_NULL", &v, self.query.options.skip_null);
        }
        if let Some(v) = lookup("QUERY_SKIP_EMPTY_STRING") {
            self.query.options.skip_empty_string =
                parse_or_warn("QUERY_SKIP_EMPTY_STRING", &v, self.query.options.skip_empty_string);
        }
        if let Some(v) = lookup("QUERY_ENCODE_VALUES") {
            self.query.options.encode_values = parse_or_warn("QUERY_ENCODE_VALUES", &v, self.query.options.encode_values);
        }
        if let Some(v) = lookup("SOC_ADMIN_DEFAULT_PAGE_SIZE") {
            self.query.default_page_size =
                parse_or_warn("SOC_ADMIN_DEFAULT_PAGE_SIZE", &v, self.query.default_page_size);
        }

        self
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: None,
                access_token: None,
                timeout_secs: 30,
            },
            query: QueryConfig {
                options: QueryOptions::default(),
                default_page_size: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: None,
                access_token: None,
                timeout_secs: 15,
            },
            query: QueryConfig {
                options: QueryOptions::default(),
                default_page_size: 10,
            },
        }
    }

    fn test() -> Self {
        Self {
            environment: Environment::Test,
            api: ApiConfig {
                base_url: None,
                access_token: None,
                timeout_secs: 5,
            },
            query: QueryConfig {
                options: QueryOptions::default(),
                default_page_size: 10,
            },
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, value: &str, current: T) -> T {
    match value.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("Ignoring invalid value {:?} for {}", value, key);
            current
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ArrayFormat;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.query.options, QueryOptions::default());
        assert_eq!(config.query.default_page_size, 10);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api.timeout_secs, 15);
    }

    #[test]
    fn test_overrides_apply() {
        let config = AppConfig::development().with_overrides(lookup(&[
            ("SOC_ADMIN_API_URL", "https://api.example.com/"),
            ("SOC_ADMIN_ACCESS_TOKEN", " abc "),
            ("QUERY_ARRAY_FORMAT", "comma"),
            ("QUERY_SKIP_NULL", "false"),
            ("SOC_ADMIN_DEFAULT_PAGE_SIZE", "50"),
        ]));
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.api.access_token.as_deref(), Some("abc"));
        assert_eq!(config.query.options.array_format, ArrayFormat::Comma);
        assert!(!config.query.options.skip_null);
        assert!(config.query.options.skip_empty_string);
        assert_eq!(config.query.default_page_size, 50);
    }

    #[test]
    fn test_api_url_fallback_and_invalid_values() {
        let config = AppConfig::development().with_overrides(lookup(&[
            ("API_URL", "http://internal:9000"),
            ("QUERY_ARRAY_FORMAT", "csv"),
            ("SOC_ADMIN_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.base_url(), "http://internal:9000");
        assert_eq!(config.query.options.array_format, ArrayFormat::Repeat);
        assert_eq!(config.api.timeout_secs, 30);
    }
}
