//! Item CRUD endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::debug;

use crate::{
    error::Result,
    models::{Item, ItemUpdate, ListParams, NewItem},
    server::state::ServerState,
};

/// Create item router. List and create answer on `/items` with or
/// without the trailing slash.
pub fn create_router() -> Router<ServerState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// List items in insertion order
async fn list_items(
    State(state): State<ServerState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Item>>> {
    let Query(params) = params?;
    debug!(skip = params.skip, limit = params.limit, "Listing items");
    Ok(Json(state.registry.list(params.skip, params.limit)))
}

/// Get a single item
async fn get_item(
    State(state): State<ServerState>,
    item_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>> {
    let Path(item_id) = item_id?;
    Ok(Json(state.registry.get(item_id)?))
}

/// Create an item, generating its id when the payload has none
async fn create_item(
    State(state): State<ServerState>,
    payload: std::result::Result<Json<NewItem>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(new_item) = payload?;
    let item = state.registry.create(new_item)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Apply a partial update to an item
async fn update_item(
    State(state): State<ServerState>,
    item_id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<ItemUpdate>, JsonRejection>,
) -> Result<Json<Item>> {
    let Path(item_id) = item_id?;
    let Json(update) = payload?;
    Ok(Json(state.registry.update(item_id, update)?))
}

/// Delete an item
async fn delete_item(
    State(state): State<ServerState>,
    item_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(item_id) = item_id?;
    state.registry.delete(item_id)?;
    Ok(StatusCode::NO_CONTENT)
}
