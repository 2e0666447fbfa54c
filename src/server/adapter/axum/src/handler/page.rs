/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use miniapp_host::router::split_rest;
use miniapp_host::{HostError, Resolution, ResolvedPage};

use super::AppState;
use crate::error::{AxumError, ok_json};

fn home(state: &AppState) -> Response {
  let miniapps: Vec<_> = state.router.registry().get_all().iter().map(|c| c.summary()).collect();
  ok_json(serde_json::json!({ "miniapps": miniapps }))
}

fn render_page(page: &ResolvedPage) -> Response {
  let current = page.page();
  ok_json(serde_json::json!({
    "miniapp": page.miniapp.name,
    "page": { "path": current.path(), "title": current.title },
    "params": page.params,
    "view": page.render(),
  }))
}

fn respond(resolution: Resolution, state: &AppState) -> Response {
  match resolution {
    Resolution::Home => home(state),
    Resolution::MiniappNotFound { name } => {
      AxumError(HostError::not_found(format!("Mini-app '{name}' not found"))).into_response()
    }
    Resolution::Page(page) if page.redirected => {
      Redirect::temporary(&page.canonical_path()).into_response()
    }
    Resolution::Page(page) => render_page(&page),
  }
}

pub(super) async fn handle_home(State(state): State<Arc<AppState>>) -> Response {
  home(&state)
}

pub(super) async fn handle_miniapp_root(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
) -> Response {
  let resolution = state.router.resolve_miniapp::<&str>(&name, &[]);
  respond(resolution, &state)
}

pub(super) async fn handle_miniapp(
  State(state): State<Arc<AppState>>,
  Path((name, rest)): Path<(String, String)>,
) -> Response {
  let rest = split_rest(&rest);
  let resolution = state.router.resolve_miniapp(&name, &rest);
  respond(resolution, &state)
}

/// Catch-all GETs go through the outer router, so `/miniapp/calc/` and every
/// unknown path still resolve. Other methods are 404.
pub(super) async fn handle_fallback(
  State(state): State<Arc<AppState>>,
  method: Method,
  uri: Uri,
) -> Response {
  if method == Method::GET || method == Method::HEAD {
    return respond(state.router.resolve(uri.path()), &state);
  }
  AxumError(HostError::not_found(format!("No route for {method} {}", uri.path()))).into_response()
}
