use axum::{extract::Path, http::StatusCode, Json};
use contracts::shared::table_settings::{
    SaveTableConfigRequest, SaveTableConfigResponse, StoredTableConfig,
};

use crate::shared::data::db::get_connection;
use crate::shared::ui::repository;

/// GET /api/ui/table-config/:table_name/stored
pub async fn get_stored(
    Path(table_name): Path<String>,
) -> Result<Json<Option<StoredTableConfig>>, StatusCode> {
    repository::get(get_connection(), &table_name)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to load stored table config: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// POST /api/ui/table-config
pub async fn save(
    Json(request): Json<SaveTableConfigRequest>,
) -> Result<Json<SaveTableConfigResponse>, StatusCode> {
    if request.table_name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let config_json = serde_json::to_string(&request.config).map_err(|e| {
        tracing::error!("Failed to serialize table config: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    match repository::upsert(get_connection(), &request.table_name, config_json).await {
        Ok(()) => {
            tracing::info!("Stored table config for '{}'", request.table_name);
            Ok(Json(SaveTableConfigResponse {
                success: true,
                message: "Table config saved successfully".to_string(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to save table config: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
