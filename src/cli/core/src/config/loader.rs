/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::MiniappToml;

pub const CONFIG_FILE: &str = "miniapp.toml";

/// Walk upward from `start` to find `miniapp.toml`, like Cargo.toml discovery
pub fn find_miniapp_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_miniapp_config(path: &Path) -> Result<MiniappToml> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: MiniappToml =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;

  // relative storage paths are relative to the config file, not the cwd
  if let Some(base) = path.parent() {
    if config.storage.data_dir.is_relative() {
      config.storage.data_dir = base.join(&config.storage.data_dir);
    }
    if let Some(theme_dir) = config.storage.theme_dir.as_mut().filter(|d| d.is_relative()) {
      *theme_dir = base.join(&*theme_dir);
    }
  }
  Ok(config)
}

/// Explicit path must load; auto-detection falls back to defaults when no file exists.
pub fn resolve_config(explicit: Option<PathBuf>) -> Result<(Option<PathBuf>, MiniappToml)> {
  if let Some(path) = explicit {
    let config = load_miniapp_config(&path)?;
    return Ok((Some(path), config));
  }
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  match find_miniapp_config(&cwd) {
    Ok(path) => {
      let config = load_miniapp_config(&path)?;
      Ok((Some(path), config))
    }
    Err(_) => Ok((None, MiniappToml::default())),
  }
}
