use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use library::Library;
use serde::Serialize;

use crate::config::ServerConfig;

/// Shared by every handler. The library is built before the server starts
/// and is read-only afterwards, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub library: Library,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(library: Library, config: ServerConfig) -> Self {
        Self {
            library,
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub type JsonResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;
