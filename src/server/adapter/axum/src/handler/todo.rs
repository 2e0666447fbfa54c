/* src/server/adapter/axum/src/handler/todo.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use miniapp_host::HostError;
use miniapp_host::apps::TodoList;
use serde::Deserialize;

use super::AppState;
use crate::error::{AxumError, ok_json};

#[derive(Deserialize)]
pub(super) struct NewTodo {
  text: String,
}

fn todo_list(state: &AppState) -> Result<&Arc<TodoList>, HostError> {
  state.todos.as_ref().ok_or_else(|| HostError::not_found("No task list is registered"))
}

fn task_not_found(id: u32) -> AxumError {
  HostError::not_found(format!("Task {id} not found")).into()
}

pub(super) async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Response, AxumError> {
  Ok(ok_json(todo_list(&state)?.get_all()))
}

pub(super) async fn add_todo(
  State(state): State<Arc<AppState>>,
  Json(req): Json<NewTodo>,
) -> Result<Response, AxumError> {
  let list = todo_list(&state)?;
  let text = req.text.trim();
  if text.is_empty() {
    return Err(HostError::validation("Task text must not be empty").into());
  }
  let id = list.add(text);
  list.get(id).map(ok_json).ok_or_else(|| task_not_found(id))
}

pub(super) async fn toggle_todo(
  State(state): State<Arc<AppState>>,
  Path(id): Path<u32>,
) -> Result<Response, AxumError> {
  let list = todo_list(&state)?;
  if !list.toggle(id) {
    return Err(task_not_found(id));
  }
  list.get(id).map(ok_json).ok_or_else(|| task_not_found(id))
}

pub(super) async fn remove_todo(
  State(state): State<Arc<AppState>>,
  Path(id): Path<u32>,
) -> Result<Response, AxumError> {
  let list = todo_list(&state)?;
  if !list.remove(id) {
    return Err(task_not_found(id));
  }
  Ok(ok_json(list.get_all()))
}
