/* src/server/core/rust/src/loadable.rs */

use std::fmt::Display;

use serde::Serialize;

/// Outcome of a best-effort load. Unlike a silently substituted default,
/// `Failed` stays distinguishable from data that loaded and happened to be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Loadable<T> {
  Pending,
  Loaded(T),
  Failed(String),
}

impl<T> Default for Loadable<T> {
  fn default() -> Self {
    Self::Pending
  }
}

impl<T> Loadable<T> {
  pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Self::Loaded(value),
      Err(e) => Self::Failed(e.to_string()),
    }
  }

  pub fn is_loaded(&self) -> bool {
    matches!(self, Self::Loaded(_))
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, Self::Failed(_))
  }

  pub fn as_loaded(&self) -> Option<&T> {
    match self {
      Self::Loaded(value) => Some(value),
      _ => None,
    }
  }

  pub fn failure(&self) -> Option<&str> {
    match self {
      Self::Failed(reason) => Some(reason),
      _ => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
    match self {
      Self::Pending => Loadable::Pending,
      Self::Loaded(value) => Loadable::Loaded(f(value)),
      Self::Failed(reason) => Loadable::Failed(reason),
    }
  }
}

impl<T: Clone + Default> Loadable<T> {
  /// The loaded value, or `T::default()` while pending or after a failure.
  pub fn value_or_default(&self) -> T {
    self.as_loaded().cloned().unwrap_or_default()
  }
}
