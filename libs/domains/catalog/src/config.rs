use core_config::{env_parse, ConfigError, FromEnv};
use std::time::Duration;

/// Catalog tuning loaded from `CATALOG_*` variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    /// Upper bound for one catalog operation, transaction included
    pub operation_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            operation_timeout: Duration::from_millis(5_000),
        }
    }
}

impl FromEnv for CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_page_size = env_parse("CATALOG_DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
        let max_page_size = env_parse("CATALOG_MAX_PAGE_SIZE", defaults.max_page_size)?;
        let timeout_ms = env_parse(
            "CATALOG_OPERATION_TIMEOUT_MS",
            defaults.operation_timeout.as_millis() as u64,
        )?;

        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::ParseError {
                key: "CATALOG_DEFAULT_PAGE_SIZE".to_string(),
                details: format!("{default_page_size} must be between 1 and {max_page_size}"),
            });
        }

        Ok(Self {
            default_page_size,
            max_page_size,
            operation_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 3] = [
        "CATALOG_DEFAULT_PAGE_SIZE",
        "CATALOG_MAX_PAGE_SIZE",
        "CATALOG_OPERATION_TIMEOUT_MS",
    ];

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(VARS, || {
            let config = CatalogConfig::from_env().unwrap();
            assert_eq!(config, CatalogConfig::default());
            assert_eq!(config.operation_timeout, Duration::from_secs(5));
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("CATALOG_DEFAULT_PAGE_SIZE", Some("10")),
                ("CATALOG_MAX_PAGE_SIZE", Some("50")),
                ("CATALOG_OPERATION_TIMEOUT_MS", Some("250")),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.default_page_size, 10);
                assert_eq!(config.max_page_size, 50);
                assert_eq!(config.operation_timeout, Duration::from_millis(250));
            },
        );
    }

    #[test]
    fn test_default_above_max_is_rejected() {
        temp_env::with_vars(
            [
                ("CATALOG_DEFAULT_PAGE_SIZE", Some("200")),
                ("CATALOG_MAX_PAGE_SIZE", None),
                ("CATALOG_OPERATION_TIMEOUT_MS", None),
            ],
            || {
                let err = CatalogConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "CATALOG_DEFAULT_PAGE_SIZE"));
            },
        );
    }

    #[test]
    fn test_garbage_timeout_is_rejected() {
        temp_env::with_vars(
            [
                ("CATALOG_DEFAULT_PAGE_SIZE", None),
                ("CATALOG_MAX_PAGE_SIZE", None),
                ("CATALOG_OPERATION_TIMEOUT_MS", Some("soon")),
            ],
            || {
                assert!(CatalogConfig::from_env().is_err());
            },
        );
    }
}
