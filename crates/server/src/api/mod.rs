pub mod media;
pub mod resources;

use axum::{response::IntoResponse, routing::get, Json, Router};

use crate::state::{AppState, HealthResponse};

/// Routes are served both at the root and under `/api`, so the player works
/// with or without a proxy that strips the prefix.
pub fn api_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/status", get(resources::get_status))
        .route("/resources/page/:page", get(resources::list_page))
        .route("/resource/:identifier", get(resources::get_resource))
        .route("/image/:identifier/:index", get(media::get_image))
        .route("/audio/:identifier/:index", get(media::get_audio))
        .route("/subtitle/:identifier/:index", get(media::get_subtitle))
        .with_state(state);

    Router::new().nest("/api", routes.clone()).merge(routes)
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
