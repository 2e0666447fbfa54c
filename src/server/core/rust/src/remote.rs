/* src/server/core/rust/src/remote.rs */

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::HostError;
use crate::loadable::Loadable;

/// Answers plus respondent identity, posted as one flat JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
  pub answers: serde_json::Map<String, serde_json::Value>,
  pub user_id: Option<i64>,
  pub username: Option<String>,
  pub submitted_at: DateTime<Utc>,
}

impl FormSubmission {
  pub fn new(answers: serde_json::Map<String, serde_json::Value>) -> Self {
    Self { answers, user_id: None, username: None, submitted_at: Utc::now() }
  }

  pub fn user(mut self, user_id: Option<i64>, username: Option<String>) -> Self {
    self.user_id = user_id;
    self.username = username;
    self
  }

  /// `{...answers, user_id, username, submitted_at}`; identity fields win over same-named answers.
  pub fn body(&self) -> serde_json::Value {
    let mut body = self.answers.clone();
    body.insert("user_id".into(), self.user_id.map_or(serde_json::Value::Null, Into::into));
    body.insert(
      "username".into(),
      self.username.clone().map_or(serde_json::Value::Null, serde_json::Value::String),
    );
    body.insert("submitted_at".into(), serde_json::Value::String(self.submitted_at.to_rfc3339()));
    serde_json::Value::Object(body)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastOrder {
  pub id: String,
  #[serde(default)]
  pub store: String,
  #[serde(default)]
  pub total: u64,
  #[serde(default)]
  pub created_at: Option<String>,
}

/// Client for the demo backend: one form-response endpoint and a past-orders listing.
#[derive(Debug, Clone)]
pub struct RemoteClient {
  http: reqwest::Client,
  base_url: String,
  form_id: String,
}

impl RemoteClient {
  pub fn new(
    base_url: impl Into<String>,
    form_id: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self, HostError> {
    let http = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| HostError::internal(format!("failed to build HTTP client: {e}")))?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { http, base_url, form_id: form_id.into() })
  }

  pub fn submission_url(&self) -> String {
    format!("{}/api/forms/{}/responses", self.base_url, urlencoding::encode(&self.form_id))
  }

  pub fn orders_url(&self, user_id: i64) -> String {
    format!("{}/api/orders?user_id={user_id}", self.base_url)
  }

  /// POST the submission once. Network errors and non-2xx statuses come back as `Err`;
  /// nothing is retried.
  pub async fn submit(&self, submission: &FormSubmission) -> Result<(), HostError> {
    let url = self.submission_url();
    let resp = self
      .http
      .post(&url)
      .json(&submission.body())
      .send()
      .await
      .map_err(|e| HostError::unavailable(format!("form submission failed: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
      return Err(HostError::unavailable(format!("form endpoint answered {status}")));
    }
    tracing::info!(form = %self.form_id, "form response delivered");
    Ok(())
  }

  /// Best-effort order history. Any failure is logged and recorded as `Failed`.
  pub async fn past_orders(&self, user_id: i64) -> Loadable<Vec<PastOrder>> {
    let result = async {
      let resp = self
        .http
        .get(self.orders_url(user_id))
        .send()
        .await
        .map_err(|e| HostError::unavailable(e.to_string()))?;
      if !resp.status().is_success() {
        return Err(HostError::unavailable(format!("orders endpoint answered {}", resp.status())));
      }
      resp.json::<Vec<PastOrder>>().await.map_err(|e| HostError::validation(e.to_string()))
    }
    .await;
    if let Err(ref e) = result {
      tracing::warn!(user_id, error = %e, "past orders unavailable");
    }
    Loadable::from_result(result)
  }
}
