/* src/server/core/rust/src/apps/todo.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;
use serde_json::json;

use crate::config::MiniappConfig;
use crate::store::KeyedStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
  pub id: u32,
  pub text: String,
  pub done: bool,
}

pub struct TodoList {
  items: KeyedStore<u32, Todo>,
  next_id: AtomicU32,
}

impl Default for TodoList {
  fn default() -> Self {
    Self::new()
  }
}

impl TodoList {
  pub fn new() -> Self {
    Self { items: KeyedStore::new(), next_id: AtomicU32::new(1) }
  }

  pub fn seeded() -> Self {
    let list = Self::new();
    list.add("Buy groceries");
    list.add("Call the dentist");
    let id = list.add("Read the mini-app docs");
    list.toggle(id);
    list
  }

  pub fn add(&self, text: impl Into<String>) -> u32 {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    self.items.insert(id, Todo { id, text: text.into(), done: false });
    id
  }

  pub fn toggle(&self, id: u32) -> bool {
    self.items.update(&id, |todo| todo.done = !todo.done)
  }

  pub fn remove(&self, id: u32) -> bool {
    self.items.remove(&id).is_some()
  }

  pub fn get(&self, id: u32) -> Option<Todo> {
    self.items.get(&id)
  }

  pub fn get_all(&self) -> Vec<Todo> {
    self.items.values()
  }
}

pub(super) fn config(list: Arc<TodoList>) -> MiniappConfig {
  MiniappConfig::new("todo", "Todo list")
    .description("Keep track of small tasks")
    .icon("✅")
    .color("#0ca678")
    .page("", "Tasks", move |_| {
      let todos = list.get_all();
      let done = todos.iter().filter(|t| t.done).count();
      json!({ "todos": todos, "done": done, "pending": todos.len() - done })
    })
    .page("add", "New task", |_| {
      json!({ "form": { "fields": ["text"], "method": "POST", "action": "/api/todos" } })
    })
}
