use axum::{
    extract::{Path as AxumPath, State},
    Json,
};
use common::ClientResourceView;
use library::LibraryStats;

use crate::state::{AppState, JsonResult};
use crate::utils::lookup_error;

pub async fn get_status(State(state): State<AppState>) -> Json<LibraryStats> {
    Json(state.library.stats())
}

pub async fn list_page(
    State(state): State<AppState>,
    AxumPath(page): AxumPath<usize>,
) -> Json<Vec<String>> {
    let items = state.library.page(page, state.config.page_size);
    Json(items.to_vec())
}

pub async fn get_resource(
    State(state): State<AppState>,
    AxumPath(identifier): AxumPath<String>,
) -> JsonResult<ClientResourceView> {
    let group = state.library.group(&identifier).map_err(lookup_error)?;
    Ok(Json(group.client_view()))
}
