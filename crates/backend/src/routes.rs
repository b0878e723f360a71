use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // UI CONFIGURATION
        // ========================================
        .route(
            "/api/ui/tabs/:entity_type/:endpoint",
            get(handlers::ui::get_tabs),
        )
        .route("/api/ui/table-config", post(handlers::table_settings::save))
        .route(
            "/api/ui/table-config/:table_name",
            get(handlers::ui::get_table_config),
        )
        .route(
            "/api/ui/table-config/:table_name/stored",
            get(handlers::table_settings::get_stored),
        )
        // ========================================
        // A001 COMPANY
        // ========================================
        .route(
            "/api/company",
            get(handlers::a001_company::list_all).post(handlers::a001_company::upsert),
        )
        .route(
            "/api/company/:id",
            get(handlers::a001_company::get_by_id).delete(handlers::a001_company::delete),
        )
        .route(
            "/api/company/:id/capabilities/:capability_id",
            post(handlers::a001_company::link_capability)
                .delete(handlers::a001_company::unlink_capability),
        )
        // ========================================
        // A002 CAPABILITY
        // ========================================
        .route(
            "/api/capability",
            get(handlers::a002_capability::list_all).post(handlers::a002_capability::create),
        )
        .route(
            "/api/capability/:id",
            get(handlers::a002_capability::get_by_id).delete(handlers::a002_capability::delete),
        )
        .with_state(state)
}
