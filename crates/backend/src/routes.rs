use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 PAGE
        // ========================================
        .route(
            "/api/page",
            get(handlers::a001_page::list_all).post(handlers::a001_page::create),
        )
        .route(
            "/api/page/testdata",
            post(handlers::a001_page::insert_test_data),
        )
        .route(
            "/api/page/:id",
            get(handlers::a001_page::get_by_id).put(handlers::a001_page::update),
        )
        .route(
            "/api/page/:id/identifier",
            put(handlers::a001_page::update_identifier),
        )
}
