/* src/server/core/rust/src/theme.rs */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loadable::Loadable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
  pub primary_color: String,
  pub background_color: String,
  pub accent_color: String,
  pub banner: Option<String>,
}

impl Default for ThemeSettings {
  fn default() -> Self {
    Self {
      primary_color: "#2481cc".to_string(),
      background_color: "#ffffff".to_string(),
      accent_color: "#f5a623".to_string(),
      banner: None,
    }
  }
}

/// Read `<dir>/<store>.theme.json`. Without a theme directory the built-in theme is used;
/// a missing or malformed file is recorded as `Failed` so callers can tell it apart.
pub fn load_theme(dir: Option<&Path>, store: &str) -> Loadable<ThemeSettings> {
  let Some(dir) = dir else {
    return Loadable::Loaded(ThemeSettings::default());
  };
  let path = dir.join(format!("{store}.theme.json"));
  let result = std::fs::read_to_string(&path)
    .map_err(|e| format!("failed to read {}: {e}", path.display()))
    .and_then(|content| {
      serde_json::from_str::<ThemeSettings>(&content)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))
    });
  if let Err(ref reason) = result {
    tracing::warn!(store, %reason, "theme settings unavailable, using defaults");
  }
  Loadable::from_result(result)
}
