use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_company::aggregate::{Company, CompanyDto};
use serde_json::json;

use super::{domain_status, parse_id};
use crate::shared::data::db::get_connection;
use crate::domain::a001_company;

/// GET /api/company
pub async fn list_all() -> Result<Json<Vec<Company>>, StatusCode> {
    a001_company::service::list_all(get_connection())
        .await
        .map(Json)
        .map_err(|e| domain_status(&e))
}

/// GET /api/company/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Company>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_company::service::get_by_id(get_connection(), uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(domain_status(&e)),
    }
}

/// POST /api/company
pub async fn upsert(Json(dto): Json<CompanyDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let db = get_connection();
    let result = match dto.id.clone() {
        Some(id) => a001_company::service::update(db, dto).await.map(|_| id),
        None => a001_company::service::create(db, dto)
            .await
            .map(|id| id.to_string()),
    };
    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(domain_status(&e)),
    }
}

/// DELETE /api/company/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_company::service::delete(get_connection(), uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(domain_status(&e)),
    }
}

/// POST /api/company/:id/capabilities/:capability_id
pub async fn link_capability(
    Path((id, capability_id)): Path<(String, String)>,
) -> Result<(), StatusCode> {
    let company_id = parse_id(&id)?;
    let capability_id = parse_id(&capability_id)?;
    a001_company::service::link_capability(get_connection(), company_id, capability_id)
        .await
        .map_err(|e| domain_status(&e))
}

/// DELETE /api/company/:id/capabilities/:capability_id
pub async fn unlink_capability(
    Path((id, capability_id)): Path<(String, String)>,
) -> Result<(), StatusCode> {
    let company_id = parse_id(&id)?;
    let capability_id = parse_id(&capability_id)?;
    let removed =
        a001_company::service::unlink_capability(get_connection(), company_id, capability_id).await;
    match removed {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(domain_status(&e)),
    }
}
