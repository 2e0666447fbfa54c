/* src/server/core/rust/src/apps/mod.rs */

//! Built-in demo mini-apps. Every screen returns a JSON view model and reads only the
//! stores handed to its config constructor.

mod calculator;
mod notes;
mod nutrition;
mod quiz;
mod storefronts;
mod survey;
mod todo;
mod weather;

use std::path::PathBuf;
use std::sync::Arc;

use crate::persist::LocalState;
use crate::remote::RemoteClient;
use crate::server::MiniappHost;
use crate::storefront::Storefront;

pub use nutrition::{NutritionData, percent_of};
pub use survey::SURVEY_QUESTIONS;
pub use todo::{Todo, TodoList};

#[derive(Default)]
pub struct BuiltinOptions {
  pub theme_dir: Option<PathBuf>,
  pub local: Option<Arc<LocalState>>,
  pub remote: Option<Arc<RemoteClient>>,
}

/// A host with every built-in mini-app registered and one storefront per shop.
pub fn builtin_host(options: BuiltinOptions) -> MiniappHost {
  let theme_dir = options.theme_dir.as_deref();
  let menu =
    Arc::new(Storefront::new("menu", storefronts::menu_catalog()).with_theme_dir(theme_dir));
  let clothing = Arc::new(
    Storefront::new("clothing_store", storefronts::clothing_catalog()).with_theme_dir(theme_dir),
  );
  let books = Arc::new(
    Storefront::new("books_store", storefronts::books_catalog()).with_theme_dir(theme_dir),
  );

  let todos = Arc::new(TodoList::seeded());

  let mut host = MiniappHost::new()
    .miniapp(todo::config(todos.clone()))
    .miniapp(calculator::config())
    .miniapp(weather::config())
    .miniapp(notes::config())
    .miniapp(quiz::config())
    .miniapp(storefronts::menu_config(menu.clone()))
    .miniapp(storefronts::clothing_config(clothing.clone()))
    .miniapp(storefronts::books_config(books.clone()))
    .miniapp(survey::config(options.local.clone()))
    .miniapp(nutrition::config(options.local.clone()))
    .storefront(menu)
    .storefront(clothing)
    .storefront(books)
    .todo_list(todos);
  if let Some(remote) = options.remote {
    host = host.remote_client(remote);
  }
  if let Some(local) = options.local {
    host = host.local_state(local);
  }
  host
}

/// View returned by screens whose route parameter names nothing.
pub(crate) fn not_found_view(kind: &str, id: Option<&str>) -> serde_json::Value {
  serde_json::json!({
    "notFound": true,
    "message": format!("{kind} '{}' not found", id.unwrap_or_default()),
  })
}
