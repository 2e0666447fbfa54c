/* src/server/adapter/axum/src/handler/local.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use miniapp_host::{HostError, LocalState};

use super::AppState;
use crate::error::{AxumError, ok_json};

fn local_state(state: &AppState) -> Result<&Arc<LocalState>, HostError> {
  state.local.as_ref().ok_or_else(|| HostError::unavailable("local state is not configured"))
}

pub(super) async fn get_value(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
) -> Result<Response, AxumError> {
  let local = local_state(&state)?;
  match local.get::<serde_json::Value>(&key) {
    Some(value) => Ok(ok_json(value)),
    None => Err(HostError::not_found(format!("No stored value for '{key}'")).into()),
  }
}

/// Invalid keys are rejected by `LocalState` with a validation error.
pub(super) async fn put_value(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
  Json(value): Json<serde_json::Value>,
) -> Result<Response, AxumError> {
  let local = local_state(&state)?;
  local.set(&key, &value)?;
  tracing::debug!(%key, "stored local value");
  Ok(ok_json(value))
}

pub(super) async fn delete_value(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
) -> Result<Response, AxumError> {
  let removed = local_state(&state)?.remove(&key)?;
  Ok(ok_json(serde_json::json!({ "removed": removed })))
}
