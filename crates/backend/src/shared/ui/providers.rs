//! Sources of raw table configuration
//!
//! Providers return whatever is stored for a table, unvalidated. "Nothing
//! stored" is `ConfigValue::Null`, not an error; the validator turns it
//! into the fallback config.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use contracts::shared::table_config::ConfigValue;
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use super::repository;
use crate::shared::config::UiConfig;

/// Failures of a table configuration source
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("stored config for '{table}' is not valid JSON: {source}")]
    InvalidJson {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait TableConfigProvider: Send + Sync {
    async fn get_config(&self, table_name: &str) -> Result<ConfigValue, ProviderError>;
}

// ============================================================================
// Static defaults from config.toml
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct StaticTableConfigProvider {
    tables: HashMap<String, ConfigValue>,
}

impl StaticTableConfigProvider {
    pub fn new(tables: HashMap<String, ConfigValue>) -> Self {
        Self { tables }
    }

    pub fn from_config(ui: &UiConfig) -> Self {
        let tables = ui
            .tables
            .iter()
            .map(|(name, value)| (name.clone(), ConfigValue::from(value.clone())))
            .collect::<HashMap<_, _>>();
        tracing::info!("Loaded {} default table config(s)", tables.len());
        Self::new(tables)
    }
}

#[async_trait]
impl TableConfigProvider for StaticTableConfigProvider {
    async fn get_config(&self, table_name: &str) -> Result<ConfigValue, ProviderError> {
        Ok(self
            .tables
            .get(table_name)
            .cloned()
            .unwrap_or(ConfigValue::Null))
    }
}

// ============================================================================
// Stored overrides (sys_table_config)
// ============================================================================

#[derive(Debug, Clone)]
pub struct DbTableConfigProvider {
    conn: DatabaseConnection,
}

impl DbTableConfigProvider {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

pub fn parse_stored(table_name: &str, config_json: &str) -> Result<ConfigValue, ProviderError> {
    serde_json::from_str::<serde_json::Value>(config_json)
        .map(ConfigValue::from)
        .map_err(|source| ProviderError::InvalidJson {
            table: table_name.to_string(),
            source,
        })
}

#[async_trait]
impl TableConfigProvider for DbTableConfigProvider {
    async fn get_config(&self, table_name: &str) -> Result<ConfigValue, ProviderError> {
        match repository::get(&self.conn, table_name).await? {
            Some(stored) => parse_stored(table_name, &stored.config_json),
            None => Ok(ConfigValue::Null),
        }
    }
}

// ============================================================================
// Layering
// ============================================================================

/// Asks each layer in order; the first non-null answer wins. Errors are
/// not skipped over.
#[derive(Clone, Default)]
pub struct LayeredTableConfigProvider {
    layers: Vec<Arc<dyn TableConfigProvider>>,
}

impl LayeredTableConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: Arc<dyn TableConfigProvider>) -> Self {
        self.layers.push(layer);
        self
    }
}

#[async_trait]
impl TableConfigProvider for LayeredTableConfigProvider {
    async fn get_config(&self, table_name: &str) -> Result<ConfigValue, ProviderError> {
        for layer in &self.layers {
            let value = layer.get_config(table_name).await?;
            if value != ConfigValue::Null {
                return Ok(value);
            }
        }
        Ok(ConfigValue::Null)
    }
}
