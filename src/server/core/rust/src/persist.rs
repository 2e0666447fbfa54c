/* src/server/core/rust/src/persist.rs */

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::HostError;

/// Version written into every envelope. Blobs carrying another version read as absent.
pub const SCHEMA_VERSION: u32 = 1;

pub mod keys {
  pub const NUTRITION_DATA: &str = "nutritionData";
  pub const COMPLETED_WORKOUTS: &str = "completedWorkouts";
  pub const USER_DATA: &str = "userData";
  pub const HEALTH_DATA: &str = "healthData";

  /// Free-text "other" answer for a survey question.
  pub fn other_answer(question: &str) -> String {
    format!("other_{question}")
  }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
  version: u32,
  data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
  version: u32,
  data: T,
}

/// Flat key -> JSON blob storage, one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct LocalState {
  dir: PathBuf,
}

impl LocalState {
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self, HostError> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir)
      .map_err(|e| HostError::internal(format!("failed to create {}: {e}", dir.display())))?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> Result<PathBuf, HostError> {
    let valid = !key.is_empty()
      && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
      return Err(HostError::validation(format!("invalid storage key {key:?}")));
    }
    Ok(self.dir.join(format!("{key}.json")))
  }

  /// Read a value. Missing, unreadable, malformed or wrong-version blobs are all `None`;
  /// everything except "missing" is logged.
  pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let path = self.path_for(key).ok()?;
    let content = match std::fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
      Err(e) => {
        tracing::warn!(key, error = %e, "failed to read persisted state");
        return None;
      }
    };
    match serde_json::from_str::<Envelope<T>>(&content) {
      Ok(env) if env.version == SCHEMA_VERSION => Some(env.data),
      Ok(env) => {
        tracing::warn!(key, version = env.version, "discarding persisted state of another version");
        None
      }
      Err(e) => {
        tracing::warn!(key, error = %e, "discarding malformed persisted state");
        None
      }
    }
  }

  pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), HostError> {
    let path = self.path_for(key)?;
    let body = serde_json::to_vec(&EnvelopeRef { version: SCHEMA_VERSION, data: value })
      .map_err(|e| HostError::internal(e.to_string()))?;
    // write-then-rename so readers never observe a half-written blob
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
  }

  pub fn remove(&self, key: &str) -> Result<bool, HostError> {
    let path = self.path_for(key)?;
    match std::fs::remove_file(path) {
      Ok(()) => Ok(true),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Nutrition {
    calories: u32,
    protein: u32,
  }

  fn state() -> (tempfile::TempDir, LocalState) {
    let dir = tempfile::tempdir().unwrap();
    let state = LocalState::open(dir.path().join("data")).unwrap();
    (dir, state)
  }

  #[test]
  fn missing_key_is_none() {
    let (_dir, state) = state();
    assert_eq!(state.get::<Nutrition>(keys::NUTRITION_DATA), None);
  }

  #[test]
  fn set_then_get() {
    let (_dir, state) = state();
    let value = Nutrition { calories: 1800, protein: 90 };
    state.set(keys::NUTRITION_DATA, &value).unwrap();
    assert_eq!(state.get::<Nutrition>(keys::NUTRITION_DATA), Some(value));
  }

  #[test]
  fn blobs_carry_schema_version() {
    let (_dir, state) = state();
    state.set(keys::USER_DATA, &serde_json::json!({"name": "ann"})).unwrap();
    let raw = std::fs::read_to_string(state.dir().join("userData.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["version"], SCHEMA_VERSION);
    assert_eq!(json["data"]["name"], "ann");
  }

  #[test]
  fn unknown_version_reads_as_absent() {
    let (_dir, state) = state();
    std::fs::write(state.dir().join("healthData.json"), r#"{"version": 99, "data": {}}"#).unwrap();
    assert_eq!(state.get::<serde_json::Value>(keys::HEALTH_DATA), None);
  }

  #[test]
  fn unversioned_blob_reads_as_absent() {
    let (_dir, state) = state();
    std::fs::write(state.dir().join("completedWorkouts.json"), "[1,2,3]").unwrap();
    assert_eq!(state.get::<Vec<u32>>(keys::COMPLETED_WORKOUTS), None);
  }

  #[test]
  fn rejects_path_like_keys() {
    let (_dir, state) = state();
    let err = state.set("../escape", &1).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(state.get::<u32>("a/b"), None);
  }

  #[test]
  fn remove_reports_presence() {
    let (_dir, state) = state();
    let key = keys::other_answer("role");
    assert_eq!(key, "other_role");
    state.set(&key, &"founder").unwrap();
    assert!(state.remove(&key).unwrap());
    assert!(!state.remove(&key).unwrap());
  }
}
