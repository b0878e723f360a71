use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use contracts::shared::tabs::TabDescriptor;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {}:{}: {}", self.host, self.port, e))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// UI configuration: tab overrides and default table configurations
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiConfig {
    /// entity_type -> endpoint -> tabs
    #[serde(default)]
    pub tabs: HashMap<String, HashMap<String, Vec<TabDescriptor>>>,
    /// table_name -> raw table configuration
    #[serde(default)]
    pub tables: HashMap<String, toml::Value>,
}

/// Default configuration embedded in the binary: the workspace config.toml
const DEFAULT_CONFIG: &str = include_str!("../../../../config.toml");

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/crm.db");
        assert_eq!(config.server.port, 3000);
        assert!(config.ui.tabs.is_empty());
    }

    #[test]
    fn test_default_config_has_every_table() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        for table in ["companies", "capabilities", "opportunities"] {
            assert!(config.ui.tables.contains_key(table), "missing [ui.tables.{}]", table);
        }
    }

    #[test]
    fn test_server_section_is_optional() {
        let config = parse_config("[database]\npath = \"crm.db\"\n").unwrap();
        assert_eq!(config.server.addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_tab_overrides_parse() {
        let config = parse_config(
            r#"
            [database]
            path = "crm.db"

            [ui.tabs.Company]
            view = [
                { tab_name = "About", active = true },
                { tab_name = "Notes" },
            ]
            "#,
        )
        .unwrap();
        let view = &config.ui.tabs["Company"]["view"];
        assert_eq!(view.len(), 2);
        assert_eq!(view[1], TabDescriptor::inactive("Notes"));
    }

    #[test]
    fn test_absolute_database_path_is_kept() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let absolute = std::env::temp_dir().join("crm.db");
        config.database.path = absolute.to_string_lossy().into_owned();
        assert_eq!(get_database_path(&config).unwrap(), absolute);
    }
}
