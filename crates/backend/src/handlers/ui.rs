use axum::{
    extract::{Path, Query, State},
    Json,
};
use contracts::shared::table_config::{TableConfig, COLUMNS_KEY};
use contracts::shared::tabs::TabDescriptor;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::a001_company;
use crate::shared::data::db::get_connection;
use crate::shared::ui::EntityRef;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TabsQuery {
    pub entity_id: Option<String>,
}

/// GET /api/ui/tabs/:entity_type/:endpoint
pub async fn get_tabs(
    State(state): State<AppState>,
    Path((entity_type, endpoint)): Path<(String, String)>,
    Query(query): Query<TabsQuery>,
) -> Json<Vec<TabDescriptor>> {
    let entity = match query.entity_id.as_deref() {
        Some(id) if state.tabs.has_rules_for(&entity_type) => {
            load_entity(&entity_type, id).await
        }
        _ => None,
    };
    let entity = entity.as_deref().map(|e| e as &dyn EntityRef);

    Json(state.tabs.resolve_tabs(&entity_type, &endpoint, entity))
}

/// An entity that cannot be loaded resolves as "no entity".
async fn load_entity(entity_type: &str, id: &str) -> Option<Box<dyn EntityRef + Send + Sync>> {
    let uuid = match Uuid::parse_str(id) {
        Ok(uuid) => uuid,
        Err(_) => {
            tracing::warn!("Ignoring malformed {} id in tabs request: {}", entity_type, id);
            return None;
        }
    };

    match entity_type.to_lowercase().as_str() {
        "company" => match a001_company::service::get_by_id(get_connection(), uuid).await {
            Ok(company) => company.map(|c| Box::new(c) as Box<dyn EntityRef + Send + Sync>),
            Err(e) => {
                tracing::error!("Failed to load company {} for tabs: {}", uuid, e);
                None
            }
        },
        other => {
            tracing::warn!("Tab rules exist for '{}' but no loader is registered", other);
            None
        }
    }
}

/// GET /api/ui/table-config/:table_name
pub async fn get_table_config(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> Json<Value> {
    let config = state.table_configs.get_table_config(&table_name).await;
    Json(table_config_json(&table_name, &config))
}

/// Wire form of a validated config. Sibling keys that still cannot be
/// written as JSON are dropped so the page always gets its columns.
fn table_config_json(table_name: &str, config: &TableConfig) -> Value {
    if let Ok(json) = serde_json::to_value(config) {
        return json;
    }

    let mut object = serde_json::Map::new();
    for (key, value) in config.entries() {
        match serde_json::to_value(value) {
            Ok(json) => {
                object.insert(key.clone(), json);
            }
            Err(e) => {
                tracing::error!(
                    "Dropping key '{}' from table config '{}', not JSON-serializable: {}",
                    key,
                    table_name,
                    e
                );
            }
        }
    }
    object
        .entry(COLUMNS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    Value::Object(object)
}
