/* src/server/core/rust/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "CONFLICT" => 409,
    "UNAVAILABLE" => 503,
    "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl HostError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn conflict(msg: impl Into<String>) -> Self {
    Self::with_code("CONFLICT", msg)
  }

  pub fn unavailable(msg: impl Into<String>) -> Self {
    Self::with_code("UNAVAILABLE", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  /// Upstream outages may clear on their own; everything else needs a different request.
  pub fn is_transient(&self) -> bool {
    self.code == "UNAVAILABLE"
  }
}

impl fmt::Display for HostError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for HostError {}

impl From<std::io::Error> for HostError {
  fn from(err: std::io::Error) -> Self {
    Self::internal(err.to_string())
  }
}

impl From<serde_json::Error> for HostError {
  fn from(err: serde_json::Error) -> Self {
    Self::validation(err.to_string())
  }
}
