/* src/cli/core/src/config/types.rs */

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiniappToml {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub forms: Option<FormsSection>,
  #[serde(default)]
  pub storage: StorageSection,
  #[serde(default)]
  pub log: LogSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

/// Remote form backend. Without this section surveys complete with a warning.
#[derive(Debug, Clone, Deserialize)]
pub struct FormsSection {
  pub base_url: String,
  #[serde(default = "default_form_id")]
  pub form_id: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl FormsSection {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  pub fn validate(&self) -> Result<()> {
    if self.base_url.trim().is_empty() {
      bail!("forms.base_url must not be empty");
    }
    if self.form_id.trim().is_empty() {
      bail!("forms.form_id must not be empty");
    }
    if self.timeout_secs == 0 {
      bail!("forms.timeout_secs must be greater than zero");
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
  #[serde(default = "default_data_dir")]
  pub data_dir: PathBuf,
  pub theme_dir: Option<PathBuf>,
}

impl Default for StorageSection {
  fn default() -> Self {
    Self { data_dir: default_data_dir(), theme_dir: None }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
  #[serde(default = "default_filter")]
  pub filter: String,
}

impl Default for LogSection {
  fn default() -> Self {
    Self { filter: default_filter() }
  }
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_form_id() -> String {
  "customer-dev".to_string()
}

fn default_timeout_secs() -> u64 {
  10
}

fn default_data_dir() -> PathBuf {
  PathBuf::from(".miniapp/data")
}

fn default_filter() -> String {
  "info".to_string()
}

impl MiniappToml {
  pub fn validate(&self) -> Result<()> {
    if let Some(ref forms) = self.forms {
      forms.validate()?;
    }
    Ok(())
  }

  /// `--port` flag, then the `PORT` environment variable, then `[server].port`.
  pub fn effective_port(&self, flag: Option<u16>, env: Option<&str>) -> Result<u16> {
    if let Some(port) = flag {
      return Ok(port);
    }
    match env {
      Some(raw) => match raw.trim().parse() {
        Ok(port) => Ok(port),
        Err(_) => bail!("PORT is not a valid port: {raw:?}"),
      },
      None => Ok(self.server.port),
    }
  }
}
