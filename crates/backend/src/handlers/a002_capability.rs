use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_capability::aggregate::{Capability, CapabilityDto};
use serde_json::json;

use super::{domain_status, parse_id};
use crate::shared::data::db::get_connection;
use crate::domain::a002_capability;

/// GET /api/capability
pub async fn list_all() -> Result<Json<Vec<Capability>>, StatusCode> {
    a002_capability::service::list_all(get_connection())
        .await
        .map(Json)
        .map_err(|e| domain_status(&e))
}

/// GET /api/capability/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Capability>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_capability::service::get_by_id(get_connection(), uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(domain_status(&e)),
    }
}

/// POST /api/capability
pub async fn create(
    Json(dto): Json<CapabilityDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match a002_capability::service::create(get_connection(), dto).await {
        Ok(id) => Ok(Json(json!({ "id": id.to_string() }))),
        Err(e) => Err(domain_status(&e)),
    }
}

/// DELETE /api/capability/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_capability::service::delete(get_connection(), uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(domain_status(&e)),
    }
}
