//! Table configuration validation
//!
//! `get_table_config` is a non-failing boundary: provider errors, malformed
//! shapes and non-JSON values are logged as repair events and the caller
//! always receives a config whose `columns` is a JSON-serializable sequence.
//! Sibling keys are diagnosed but left as they are.

use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use contracts::shared::table_config::{ConfigValue, TableConfig, COLUMNS_KEY};

use super::providers::TableConfigProvider;
use super::sanitizer::{escape_pointer_token, DefaultJsonSanitizer, JsonSanitizer};

#[derive(Clone)]
pub struct TableConfigValidator {
    provider: Arc<dyn TableConfigProvider>,
    sanitizer: Arc<dyn JsonSanitizer>,
}

impl TableConfigValidator {
    pub fn new(provider: Arc<dyn TableConfigProvider>, sanitizer: Arc<dyn JsonSanitizer>) -> Self {
        Self {
            provider,
            sanitizer,
        }
    }

    pub fn with_default_sanitizer(provider: Arc<dyn TableConfigProvider>) -> Self {
        Self::new(provider, Arc::new(DefaultJsonSanitizer))
    }

    /// Display config for a list table. Never fails.
    pub async fn get_table_config(&self, table_name: &str) -> TableConfig {
        let raw = match self.provider.get_config(table_name).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    "Failed to load table config for '{}': {:?}\n{}",
                    table_name,
                    e,
                    Backtrace::force_capture()
                );
                return TableConfig::fallback();
            }
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.repair(table_name, raw))) {
            Ok(config) => config,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(
                    "Table config validation for '{}' panicked: {}\n{}",
                    table_name,
                    reason,
                    Backtrace::force_capture()
                );
                TableConfig::fallback()
            }
        }
    }

    fn repair(&self, table_name: &str, raw: ConfigValue) -> TableConfig {
        let mut entries = match raw {
            ConfigValue::Table(map) => map,
            other => {
                tracing::error!(
                    "Table config for '{}' is {} instead of a mapping, using an empty mapping",
                    table_name,
                    other.type_name()
                );
                BTreeMap::new()
            }
        };

        let columns = match entries.remove(COLUMNS_KEY) {
            Some(columns @ ConfigValue::Array(_)) => columns,
            Some(other) => {
                tracing::error!(
                    "Table config for '{}' has {} in '{}', expected a sequence; replacing with []",
                    table_name,
                    other.type_name(),
                    COLUMNS_KEY
                );
                ConfigValue::Array(Vec::new())
            }
            None => {
                tracing::error!(
                    "Table config for '{}' has no '{}' key, adding []",
                    table_name,
                    COLUMNS_KEY
                );
                ConfigValue::Array(Vec::new())
            }
        };

        let columns = match serde_json::to_value(&columns) {
            Ok(_) => columns,
            Err(e) => {
                tracing::error!(
                    "Columns of table '{}' are not JSON-serializable ({}), sanitizing",
                    table_name,
                    e
                );
                self.sanitizer.ensure_serializable(columns)
            }
        };
        entries.insert(COLUMNS_KEY.to_string(), columns);

        for (key, value) in &entries {
            for issue in self.sanitizer.validate(value) {
                tracing::warn!(
                    "Table config for '{}' is not fully serializable at /{}{}: {}",
                    table_name,
                    escape_pointer_token(key),
                    issue.path,
                    issue.message
                );
            }
        }

        TableConfig::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::shared::table_config::SerializationIssue;
    use sea_orm::DbErr;
    use serde_json::json;
    use std::collections::HashMap;

    use crate::shared::ui::providers::{ProviderError, StaticTableConfigProvider};

    struct Failing;

    #[async_trait]
    impl TableConfigProvider for Failing {
        async fn get_config(&self, _table_name: &str) -> Result<ConfigValue, ProviderError> {
            Err(ProviderError::Storage(DbErr::Custom("connection refused".into())))
        }
    }

    struct Panicking;

    impl JsonSanitizer for Panicking {
        fn validate(&self, _value: &ConfigValue) -> Vec<SerializationIssue> {
            panic!("sanitizer bug")
        }

        fn ensure_serializable(&self, _value: ConfigValue) -> ConfigValue {
            panic!("sanitizer bug")
        }
    }

    fn validator_for(table: &str, raw: ConfigValue) -> TableConfigValidator {
        let provider = StaticTableConfigProvider::new(HashMap::from([(table.to_string(), raw)]));
        TableConfigValidator::with_default_sanitizer(Arc::new(provider))
    }

    fn from_toml(src: &str) -> ConfigValue {
        ConfigValue::from(toml::from_str::<toml::Value>(src).unwrap())
    }

    #[tokio::test]
    async fn test_plain_config_is_returned_unchanged() {
        let raw: ConfigValue = json!({
            "columns": [{"field": "code", "width": 120}, {"field": "description"}],
            "page_size": 50
        })
        .into();
        let config = validator_for("companies", raw.clone())
            .get_table_config("companies")
            .await;
        assert_eq!(ConfigValue::Table(config.into_entries()), raw);
    }

    #[tokio::test]
    async fn test_non_mapping_becomes_fallback() {
        let raw: ConfigValue = json!(["code", "description"]).into();
        let config = validator_for("companies", raw).get_table_config("companies").await;
        assert_eq!(config, TableConfig::fallback());
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"columns": []}));
    }

    #[tokio::test]
    async fn test_missing_columns_is_added() {
        let raw: ConfigValue = json!({"other": 1}).into();
        let config = validator_for("companies", raw).get_table_config("companies").await;
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"other": 1, "columns": []})
        );
    }

    #[tokio::test]
    async fn test_unknown_table_becomes_fallback() {
        let config = validator_for("companies", ConfigValue::Null)
            .get_table_config("opportunities")
            .await;
        assert_eq!(config, TableConfig::fallback());
    }

    #[tokio::test]
    async fn test_provider_error_becomes_fallback() {
        let validator = TableConfigValidator::with_default_sanitizer(Arc::new(Failing));
        let config = validator.get_table_config("companies").await;
        assert_eq!(config, TableConfig::fallback());
    }

    #[tokio::test]
    async fn test_columns_that_are_not_a_sequence_are_replaced() {
        let raw: ConfigValue = json!({"columns": "code,description", "page_size": 20}).into();
        let config = validator_for("companies", raw).get_table_config("companies").await;
        assert!(config.columns().is_empty());
        assert_eq!(config.get("page_size"), Some(&ConfigValue::Integer(20)));
    }

    #[tokio::test]
    async fn test_non_serializable_columns_are_sanitized() {
        let raw = from_toml(
            r#"
            columns = [
                { field = "revenue", width = nan },
                { field = "signed", since = 2024-01-15T09:30:00Z },
            ]
            "#,
        );
        let config = validator_for("deals", raw).get_table_config("deals").await;

        let columns = ConfigValue::Array(config.columns().to_vec());
        assert!(serde_json::to_value(&columns).is_ok());
        assert!(DefaultJsonSanitizer.validate(&columns).is_empty());
        assert_eq!(config.columns().len(), 2);
    }

    #[tokio::test]
    async fn test_sibling_issues_are_left_in_place() {
        let raw = from_toml(
            r#"
            refreshed = 2024-01-15T09:30:00Z
            columns = [{ field = "code" }]
            "#,
        );
        let config = validator_for("companies", raw).get_table_config("companies").await;

        assert_eq!(config.get("refreshed").map(ConfigValue::type_name), Some("datetime"));
        assert!(serde_json::to_value(&ConfigValue::Array(config.columns().to_vec())).is_ok());
        assert!(serde_json::to_value(&config).is_err());
    }

    #[tokio::test]
    async fn test_panicking_sanitizer_becomes_fallback() {
        let raw: ConfigValue = json!({"columns": []}).into();
        let provider = StaticTableConfigProvider::new(HashMap::from([("companies".to_string(), raw)]));
        let validator = TableConfigValidator::new(Arc::new(provider), Arc::new(Panicking));
        assert_eq!(validator.get_table_config("companies").await, TableConfig::fallback());
    }
}
