/* src/server/adapter/axum/src/handler/mod.rs */

mod local;
mod page;
mod store;
mod subscribe;
mod survey;
mod todo;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use miniapp_host::apps::TodoList;
use miniapp_host::{HostError, HostParts, LocalState, RemoteClient, Storefront};
use tower_http::trace::TraceLayer;

pub(crate) struct AppState {
  pub router: miniapp_host::Router,
  pub storefronts: BTreeMap<String, Arc<Storefront>>,
  pub remote: Option<Arc<RemoteClient>>,
  pub local: Option<Arc<LocalState>>,
  pub todos: Option<Arc<TodoList>>,
}

impl AppState {
  pub(crate) fn storefront(&self, name: &str) -> Result<&Arc<Storefront>, HostError> {
    self
      .storefronts
      .get(name)
      .ok_or_else(|| HostError::not_found(format!("Store '{name}' not found")))
  }
}

pub(crate) fn build_router(parts: HostParts) -> Router {
  let state = Arc::new(AppState {
    router: parts.router,
    storefronts: parts.storefronts,
    remote: parts.remote,
    local: parts.local,
    todos: parts.todos,
  });

  let stores = Router::new()
    .route("/cart", get(store::get_cart).post(store::add_to_cart).delete(store::clear_cart))
    .route("/cart/{id}", patch(store::update_line).delete(store::remove_line))
    .route("/favorites", get(store::get_favorites))
    .route("/favorites/{id}/toggle", post(store::toggle_favorite))
    .route("/edits/{id}", put(store::set_edit).delete(store::discard_edit))
    .route("/edits/{id}/commit", post(store::commit_edit))
    .route("/orders", get(store::past_orders))
    .route("/events", get(subscribe::handle_events));

  Router::new()
    .route("/", get(page::handle_home))
    .route("/miniapp/{name}", get(page::handle_miniapp_root))
    .route("/miniapp/{name}/{*rest}", get(page::handle_miniapp))
    .nest("/api/stores/{store}", stores)
    .route("/api/survey/submit", post(survey::handle_submit))
    .route(
      "/api/local/{key}",
      get(local::get_value).put(local::put_value).delete(local::delete_value),
    )
    .route("/api/todos", get(todo::list_todos).post(todo::add_todo))
    .route("/api/todos/{id}", delete(todo::remove_todo))
    .route("/api/todos/{id}/toggle", post(todo::toggle_todo))
    // anything unmatched goes through the outer router (home for unknown paths)
    .fallback(page::handle_fallback)
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}
