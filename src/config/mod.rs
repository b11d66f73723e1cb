use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::env;
use std::time::Duration;

/// Process configuration for the skill host. Credentials and endpoint
/// overrides come from environment variables; only the service keys are
/// required.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub catalog_endpoint: String,
    pub catalog_locale: String,
    pub catalog_access_key: String,
    pub catalog_associate_tag: String,
    pub geocode_endpoint: String,
    pub library_endpoint: String,
    pub library_app_key: String,
    pub poll_interval_ms: u64,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalog_endpoint: env::var("CATALOG_ENDPOINT")
                .unwrap_or_else(|_| "https://webservices.amazon.co.jp/onca/json".to_string()),
            catalog_locale: env::var("CATALOG_LOCALE").unwrap_or_else(|_| "ja_JP".to_string()),
            catalog_access_key: env::var("CATALOG_ACCESS_KEY").map_err(|_| {
                SkillError::MissingConfigError {
                    field: "CATALOG_ACCESS_KEY".to_string(),
                }
            })?,
            catalog_associate_tag: env::var("CATALOG_ASSOCIATE_TAG").unwrap_or_default(),
            geocode_endpoint: env::var("GEOCODE_ENDPOINT")
                .unwrap_or_else(|_| "https://geoapi.heartrails.com/api/json".to_string()),
            library_endpoint: env::var("LIBRARY_ENDPOINT")
                .unwrap_or_else(|_| "https://api.calil.jp".to_string()),
            library_app_key: env::var("CALIL_APPKEY").map_err(|_| {
                SkillError::MissingConfigError {
                    field: "CALIL_APPKEY".to_string(),
                }
            })?,
            poll_interval_ms: env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(2000),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            catalog_endpoint: "https://catalog.test/onca/json".to_string(),
            catalog_locale: "ja_JP".to_string(),
            catalog_access_key: "test-access-key".to_string(),
            catalog_associate_tag: "test-tag".to_string(),
            geocode_endpoint: "https://geo.test/api/json".to_string(),
            library_endpoint: "https://library.test".to_string(),
            library_app_key: "test-app-key".to_string(),
            poll_interval_ms: 1,
        }
    }
}

impl ConfigProvider for EnvConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog_endpoint
    }

    fn catalog_locale(&self) -> &str {
        &self.catalog_locale
    }

    fn catalog_access_key(&self) -> &str {
        &self.catalog_access_key
    }

    fn catalog_associate_tag(&self) -> &str {
        &self.catalog_associate_tag
    }

    fn geocode_endpoint(&self) -> &str {
        &self.geocode_endpoint
    }

    fn library_endpoint(&self) -> &str {
        &self.library_endpoint
    }

    fn library_app_key(&self) -> &str {
        &self.library_app_key
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog_endpoint", &self.catalog_endpoint)?;
        validate_url("geocode_endpoint", &self.geocode_endpoint)?;
        validate_url("library_endpoint", &self.library_endpoint)?;
        validate_non_empty_string("catalog_access_key", &self.catalog_access_key)?;
        validate_non_empty_string("library_app_key", &self.library_app_key)?;
        validate_range("poll_interval_ms", self.poll_interval_ms, 1, 10_000)?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
