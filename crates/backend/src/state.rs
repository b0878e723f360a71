use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::shared::config::Config;
use crate::shared::ui::{
    DbTableConfigProvider, LayeredTableConfigProvider, StaticTableConfigProvider,
    TabConfigRegistry, TabResolver, TableConfigValidator,
};

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub tabs: Arc<TabResolver>,
    pub table_configs: Arc<TableConfigValidator>,
}

impl AppState {
    pub fn new(tabs: TabResolver, table_configs: TableConfigValidator) -> Self {
        Self {
            tabs: Arc::new(tabs),
            table_configs: Arc::new(table_configs),
        }
    }

    /// Stored overrides take precedence over `[ui.tables]` defaults
    pub fn from_config(config: &Config, conn: DatabaseConnection) -> Self {
        let registry = TabConfigRegistry::builtin().with_overrides(&config.ui.tabs);
        tracing::info!("Tab registry ready: {} entries", registry.len());

        let provider = LayeredTableConfigProvider::new()
            .with_layer(Arc::new(DbTableConfigProvider::new(conn)))
            .with_layer(Arc::new(StaticTableConfigProvider::from_config(&config.ui)));

        Self::new(
            TabResolver::with_default_rules(registry),
            TableConfigValidator::with_default_sanitizer(Arc::new(provider)),
        )
    }
}
