use serde::{Deserialize, Serialize};

/// Сохранённая (переопределённая) конфигурация таблицы
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoredTableConfig {
    pub table_name: String,
    pub config_json: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveTableConfigRequest {
    pub table_name: String,
    pub config: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveTableConfigResponse {
    pub success: bool,
    pub message: String,
}
