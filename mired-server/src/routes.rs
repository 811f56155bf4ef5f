use axum::{http::{header, Method}, routing::{get, post}, Router, Extension};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{AppState, health_with_pool};
use crate::controllers;

pub fn router(state: Arc<AppState>) -> Router {
    // stessi header CORS permissivi dei client esistenti
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route("/api/mired", get(controllers::mired))
        .route("/api/mired/estado", get(controllers::estado))
        .route("/api/mired/invitar", post(controllers::invitar))
        .route("/api/mired/aceptar", post(controllers::aceptar))
        .layer(Extension(state))
        .layer(cors)
}
