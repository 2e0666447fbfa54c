/* src/server/core/rust/src/survey.rs */

use serde::Serialize;

use crate::persist::{LocalState, keys};
use crate::remote::{FormSubmission, RemoteClient};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurveyState {
  InProgress,
  /// The flow always completes; `warning` carries the delivery problem, if any.
  Completed {
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
  },
}

/// Survey answers collected client-side and submitted once at the end.
#[derive(Debug, Clone)]
pub struct SurveyFlow {
  answers: serde_json::Map<String, serde_json::Value>,
  state: SurveyState,
}

impl Default for SurveyFlow {
  fn default() -> Self {
    Self::new()
  }
}

impl SurveyFlow {
  pub fn new() -> Self {
    Self { answers: serde_json::Map::new(), state: SurveyState::InProgress }
  }

  pub fn with_answers(answers: serde_json::Map<String, serde_json::Value>) -> Self {
    Self { answers, state: SurveyState::InProgress }
  }

  pub fn answer(&mut self, question: impl Into<String>, value: impl Into<serde_json::Value>) {
    self.answers.insert(question.into(), value.into());
  }

  pub fn answers(&self) -> &serde_json::Map<String, serde_json::Value> {
    &self.answers
  }

  pub fn state(&self) -> &SurveyState {
    &self.state
  }

  /// Fold persisted free-text "other" entries into the answers. Explicit answers win.
  pub fn merge_other_answers(&mut self, local: &LocalState, questions: &[&str]) {
    for question in questions {
      let key = keys::other_answer(question);
      if self.answers.contains_key(&key) {
        continue;
      }
      if let Some(text) = local.get::<String>(&key) {
        self.answers.insert(key, serde_json::Value::String(text));
      }
    }
  }

  /// Submit and move to `Completed`. Delivery failures become a warning, never an error.
  pub async fn submit(
    &mut self,
    client: Option<&RemoteClient>,
    user_id: Option<i64>,
    username: Option<String>,
  ) -> &SurveyState {
    if matches!(self.state, SurveyState::Completed { .. }) {
      return &self.state;
    }
    let warning = match client {
      None => Some("form submission is not configured; answers were not sent".to_string()),
      Some(client) => {
        let submission = FormSubmission::new(self.answers.clone()).user(user_id, username);
        match client.submit(&submission).await {
          Ok(()) => None,
          Err(e) => {
            tracing::warn!(error = %e, "survey submission failed, completing anyway");
            Some(format!("Your answers could not be sent: {}", e.message()))
          }
        }
      }
    };
    self.state = SurveyState::Completed { warning };
    &self.state
  }
}
