/* src/server/core/rust/src/apps/survey.rs */

use std::sync::Arc;

use serde_json::json;

use super::not_found_view;
use crate::config::MiniappConfig;
use crate::persist::{LocalState, keys};

/// `(id, prompt, options)`; every question also accepts a free-text "other" answer.
pub static SURVEY_QUESTIONS: [(&str, &str, &[&str]); 4] = [
  ("role", "What best describes you?", &["Founder", "Product manager", "Developer"]),
  ("channel", "Where do you find new tools?", &["Telegram channels", "Friends", "Search"]),
  ("pain", "What slows your team down most?", &["Meetings", "Tooling", "Hiring"]),
  ("budget", "Monthly budget for tools?", &["Under $50", "$50-$500", "Over $500"]),
];

pub(super) fn config(local: Option<Arc<LocalState>>) -> MiniappConfig {
  MiniappConfig::new("customer_dev", "Customer interview")
    .description("A short customer-development survey")
    .icon("🗒")
    .color("#f03e3e")
    .page("", "Intro", |_| {
      json!({
        "questions": SURVEY_QUESTIONS.len(),
        "start": "question/1",
        "submit": "/api/survey/submit",
      })
    })
    .page("question/:index", "Question", move |ctx| {
      let found = ctx
        .params
        .parse::<usize>("index")
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| SURVEY_QUESTIONS.get(i));
      let Some((id, prompt, options)) = found else {
        return not_found_view("Question", ctx.params.get("index"));
      };
      let other = local.as_ref().and_then(|l| l.get::<String>(&keys::other_answer(id)));
      json!({ "id": id, "prompt": prompt, "options": options, "other": other })
    })
    .page("thanks", "Thank you", |_| json!({ "message": "Thanks for your answers!" }))
}
