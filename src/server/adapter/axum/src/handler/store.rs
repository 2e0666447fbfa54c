/* src/server/adapter/axum/src/handler/store.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use miniapp_host::storefront::ItemId;
use miniapp_host::{CartUpdate, HostError, Loadable, PendingEdit, Storefront};
use serde::Deserialize;

use super::AppState;
use crate::error::{AxumError, ok_json};

#[derive(Deserialize)]
pub(super) struct AddRequest {
  id: ItemId,
}

#[derive(Deserialize)]
pub(super) struct OrdersQuery {
  user_id: Option<i64>,
}

fn catalog_item<'a>(
  store: &'a Storefront,
  id: ItemId,
) -> Result<&'a miniapp_host::CatalogItem, HostError> {
  store.item(id).ok_or_else(|| {
    HostError::not_found(format!("Item {id} is not in the '{}' catalog", store.name()))
  })
}

pub(super) async fn get_cart(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  Ok(ok_json(serde_json::json!({
    "lines": store.cart.get_all(),
    "total": store.cart.total(),
    "count": store.cart.count(),
  })))
}

pub(super) async fn add_to_cart(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
  Json(req): Json<AddRequest>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  let item = catalog_item(store, req.id)?;
  store.cart.add(&item.cart_item());
  Ok(ok_json(store.snapshot()))
}

/// Unknown line ids are a no-op; the response still carries the current snapshot.
pub(super) async fn update_line(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
  Json(update): Json<CartUpdate>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  store.cart.update(id, update);
  Ok(ok_json(store.snapshot()))
}

pub(super) async fn remove_line(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  store.cart.remove(id);
  Ok(ok_json(store.snapshot()))
}

pub(super) async fn clear_cart(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  store.cart.clear();
  Ok(ok_json(store.snapshot()))
}

pub(super) async fn get_favorites(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  Ok(ok_json(store.favorites.get_all()))
}

pub(super) async fn toggle_favorite(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  catalog_item(store, id)?;
  let favorite = store.favorites.toggle(id);
  Ok(ok_json(serde_json::json!({ "id": id, "favorite": favorite })))
}

pub(super) async fn set_edit(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
  Json(edit): Json<PendingEdit>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  catalog_item(store, id)?;
  store.edits.set(id, edit);
  Ok(ok_json(store.snapshot()))
}

pub(super) async fn discard_edit(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  store.edits.discard(id);
  Ok(ok_json(store.snapshot()))
}

pub(super) async fn commit_edit(
  State(state): State<Arc<AppState>>,
  Path((store, id)): Path<(String, ItemId)>,
) -> Result<Response, AxumError> {
  let store = state.storefront(&store)?;
  if !store.commit_edit(id) {
    catalog_item(store, id)?;
    return Err(HostError::internal(format!("Edit for item {id} could not be committed")).into());
  }
  Ok(ok_json(store.snapshot()))
}

/// Order history is best-effort: a missing client or a failed fetch is reported in-band.
pub(super) async fn past_orders(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
  Query(query): Query<OrdersQuery>,
) -> Result<Response, AxumError> {
  state.storefront(&store)?;
  let user_id =
    query.user_id.ok_or_else(|| HostError::validation("Query parameter 'user_id' is required"))?;
  let orders = match &state.remote {
    Some(remote) => remote.past_orders(user_id).await.map(|orders| {
      orders.into_iter().filter(|o| o.store.is_empty() || o.store == store).collect::<Vec<_>>()
    }),
    None => Loadable::Failed("order history is not configured".to_string()),
  };
  Ok(ok_json(orders))
}
