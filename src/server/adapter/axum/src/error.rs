/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miniapp_host::HostError;

/// Newtype wrapper to implement `IntoResponse` for `HostError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for HostError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub HostError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
      tracing::error!(code = err.code(), message = err.message(), "request failed");
    }
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
        "transient": err.is_transient(),
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<HostError> for AxumError {
  fn from(err: HostError) -> Self {
    Self(err)
  }
}

/// `{"ok": true, "data": ...}` envelope shared by every JSON endpoint.
pub(crate) fn ok_json(data: impl serde::Serialize) -> Response {
  match serde_json::to_value(data) {
    Ok(data) => axum::Json(serde_json::json!({ "ok": true, "data": data })).into_response(),
    Err(e) => AxumError(HostError::internal(e.to_string())).into_response(),
  }
}
