/* src/server/core/rust/src/server.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::MiniappConfig;
use crate::persist::LocalState;
use crate::apps::TodoList;
use crate::registry::Registry;
use crate::remote::RemoteClient;
use crate::router::Router;
use crate::storefront::Storefront;

/// Framework-agnostic parts extracted from `MiniappHost`.
/// Adapter crates consume this to build framework-specific routers.
pub struct HostParts {
  pub router: Router,
  pub storefronts: BTreeMap<String, Arc<Storefront>>,
  pub remote: Option<Arc<RemoteClient>>,
  pub local: Option<Arc<LocalState>>,
  pub todos: Option<Arc<TodoList>>,
}

impl HostParts {
  pub fn registry(&self) -> &Arc<Registry> {
    self.router.registry()
  }
}

#[derive(Default)]
pub struct MiniappHost {
  miniapps: Vec<MiniappConfig>,
  storefronts: BTreeMap<String, Arc<Storefront>>,
  remote: Option<Arc<RemoteClient>>,
  local: Option<Arc<LocalState>>,
  todos: Option<Arc<TodoList>>,
}

impl MiniappHost {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn miniapp(mut self, config: MiniappConfig) -> Self {
    self.miniapps.push(config);
    self
  }

  /// Expose a storefront's stores to the adapter under its own name.
  pub fn storefront(mut self, store: Arc<Storefront>) -> Self {
    self.storefronts.insert(store.name().to_string(), store);
    self
  }

  pub fn remote_client(mut self, client: Arc<RemoteClient>) -> Self {
    self.remote = Some(client);
    self
  }

  pub fn local_state(mut self, local: Arc<LocalState>) -> Self {
    self.local = Some(local);
    self
  }

  /// Expose a task list to the adapter's `/api/todos` endpoints.
  pub fn todo_list(mut self, list: Arc<TodoList>) -> Self {
    self.todos = Some(list);
    self
  }

  pub fn local(&self) -> Option<&Arc<LocalState>> {
    self.local.as_ref()
  }

  /// Consume the builder: register every mini-app (in declaration order, last name wins)
  /// and hand back the parts an adapter needs.
  pub fn into_parts(self) -> HostParts {
    let registry = Registry::new();
    for config in self.miniapps {
      registry.register(config);
    }
    tracing::info!(
      miniapps = registry.len(),
      storefronts = self.storefronts.len(),
      "mini-app host assembled"
    );
    HostParts {
      router: Router::new(Arc::new(registry)),
      storefronts: self.storefronts,
      remote: self.remote,
      local: self.local,
      todos: self.todos,
    }
  }
}
