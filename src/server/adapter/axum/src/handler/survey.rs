/* src/server/adapter/axum/src/handler/survey.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Response;
use miniapp_host::apps::SURVEY_QUESTIONS;
use miniapp_host::{SurveyFlow, SurveyState};
use serde::Deserialize;

use super::AppState;
use crate::error::ok_json;

#[derive(Deserialize)]
pub(super) struct SubmitRequest {
  #[serde(default)]
  answers: serde_json::Map<String, serde_json::Value>,
  user_id: Option<i64>,
  username: Option<String>,
}

/// Always answers `completed: true`; a failed delivery only adds a warning.
pub(super) async fn handle_submit(
  State(state): State<Arc<AppState>>,
  Json(req): Json<SubmitRequest>,
) -> Response {
  let mut flow = SurveyFlow::with_answers(req.answers);
  if let Some(local) = &state.local {
    let ids: Vec<&str> = SURVEY_QUESTIONS.iter().map(|(id, _, _)| *id).collect();
    flow.merge_other_answers(local, &ids);
  }
  let warning = match flow.submit(state.remote.as_deref(), req.user_id, req.username).await {
    SurveyState::Completed { warning } => warning.clone(),
    SurveyState::InProgress => None,
  };
  let mut data = serde_json::json!({ "completed": true, "answers": flow.answers() });
  if let Some(warning) = warning {
    data["warning"] = serde_json::Value::String(warning);
  }
  ok_json(data)
}
