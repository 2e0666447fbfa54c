/* src/cli/core/src/host.rs */

// Turns a parsed miniapp.toml into a fully wired host.

use std::sync::Arc;

use anyhow::{Context, Result};
use miniapp_host::{BuiltinOptions, LocalState, MiniappHost, RemoteClient, builtin_host};

use crate::config::MiniappToml;

pub(crate) fn build_host(config: &MiniappToml) -> Result<MiniappHost> {
  let local = LocalState::open(&config.storage.data_dir).with_context(|| {
    format!("failed to open local state at {}", config.storage.data_dir.display())
  })?;

  let remote = match config.forms {
    Some(ref forms) => {
      let client = RemoteClient::new(&forms.base_url, &forms.form_id, forms.timeout())
        .context("failed to configure form client")?;
      tracing::info!(base_url = %forms.base_url, form = %forms.form_id, "form submission enabled");
      Some(Arc::new(client))
    }
    None => {
      tracing::warn!("no [forms] section, survey answers will not be delivered");
      None
    }
  };

  Ok(builtin_host(BuiltinOptions {
    theme_dir: config.storage.theme_dir.clone(),
    local: Some(Arc::new(local)),
    remote,
  }))
}
