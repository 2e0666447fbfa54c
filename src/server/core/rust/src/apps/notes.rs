/* src/server/core/rust/src/apps/notes.rs */

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use super::not_found_view;
use crate::config::MiniappConfig;
use crate::store::KeyedStore;

#[derive(Debug, Clone, Serialize)]
struct Note {
  id: u32,
  title: String,
  body: String,
}

fn seeded() -> KeyedStore<u32, Note> {
  let notes = KeyedStore::new();
  for (id, title, body) in [
    (1, "Shopping", "Milk, bread, buckwheat"),
    (2, "Ideas", "A mini-app that tracks houseplant watering"),
  ] {
    notes.insert(id, Note { id, title: title.to_string(), body: body.to_string() });
  }
  notes
}

pub(super) fn config() -> MiniappConfig {
  let notes = Arc::new(seeded());
  let list = notes.clone();
  MiniappConfig::new("notes", "Notes")
    .description("Short text notes")
    .icon("📝")
    .color("#f59f00")
    .page("", "All notes", move |_| {
      let titles: Vec<_> =
        list.values().into_iter().map(|n| json!({ "id": n.id, "title": n.title })).collect();
      json!({ "notes": titles })
    })
    .page("note/:noteId", "Note", move |ctx| {
      match ctx.params.parse::<u32>("noteId").and_then(|id| notes.get(&id)) {
        Some(note) => json!({ "note": note }),
        None => not_found_view("Note", ctx.params.get("noteId")),
      }
    })
}
