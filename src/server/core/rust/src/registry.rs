/* src/server/core/rust/src/registry.rs */

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::MiniappConfig;
use crate::errors::HostError;

#[derive(Default)]
struct Entries {
  order: Vec<String>,
  by_name: HashMap<String, Arc<MiniappConfig>>,
}

/// Name -> config map, filled once during startup and read by the router afterwards.
#[derive(Default)]
pub struct Registry {
  entries: RwLock<Entries>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  fn read(&self) -> RwLockReadGuard<'_, Entries> {
    self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, Entries> {
    self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner)
  }

  /// Insert or replace by name. A replaced entry keeps its listing position.
  pub fn register(&self, config: MiniappConfig) {
    let name = config.name.clone();
    let mut entries = self.write();
    if entries.by_name.insert(name.clone(), Arc::new(config)).is_some() {
      tracing::warn!(miniapp = %name, "mini-app registered twice, replacing previous config");
    } else {
      tracing::debug!(miniapp = %name, "mini-app registered");
      entries.order.push(name);
    }
  }

  /// Strict registration: validates the config and refuses to replace an existing name.
  pub fn try_register(&self, config: MiniappConfig) -> Result<(), HostError> {
    config.validate()?;
    let mut entries = self.write();
    if entries.by_name.contains_key(&config.name) {
      return Err(HostError::conflict(format!("mini-app '{}' is already registered", config.name)));
    }
    entries.order.push(config.name.clone());
    entries.by_name.insert(config.name.clone(), Arc::new(config));
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<Arc<MiniappConfig>> {
    self.read().by_name.get(name).cloned()
  }

  pub fn exists(&self, name: &str) -> bool {
    self.read().by_name.contains_key(name)
  }

  /// Snapshot of every config in registration order.
  pub fn get_all(&self) -> Vec<Arc<MiniappConfig>> {
    let entries = self.read();
    entries.order.iter().filter_map(|name| entries.by_name.get(name).cloned()).collect()
  }

  pub fn names(&self) -> Vec<String> {
    self.read().order.clone()
  }

  pub fn len(&self) -> usize {
    self.read().order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
