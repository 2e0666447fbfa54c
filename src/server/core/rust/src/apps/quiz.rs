/* src/server/core/rust/src/apps/quiz.rs */

use serde_json::json;

use super::not_found_view;
use crate::config::MiniappConfig;

struct Question {
  text: &'static str,
  options: [&'static str; 3],
  answer: usize,
}

static QUESTIONS: [Question; 3] = [
  Question { text: "Which planet is largest?", options: ["Mars", "Jupiter", "Venus"], answer: 1 },
  Question { text: "H2O is commonly called?", options: ["Salt", "Water", "Ozone"], answer: 1 },
  Question { text: "How many sides has a hexagon?", options: ["6", "8", "5"], answer: 0 },
];

pub(super) fn config() -> MiniappConfig {
  MiniappConfig::new("quiz", "Quiz")
    .description("Three quick questions")
    .icon("❓")
    .color("#ae3ec9")
    .page("", "Start", |_| json!({ "questions": QUESTIONS.len(), "start": "question/1" }))
    .page("question/:index", "Question", |ctx| {
      // 1-based in the URL
      let index = ctx.params.parse::<usize>("index").filter(|i| (1..=QUESTIONS.len()).contains(i));
      let Some(index) = index else {
        return not_found_view("Question", ctx.params.get("index"));
      };
      let q = &QUESTIONS[index - 1];
      json!({
        "index": index,
        "total": QUESTIONS.len(),
        "question": q.text,
        "options": q.options,
        "answer": q.answer,
      })
    })
    .page("result", "Result", |_| json!({ "total": QUESTIONS.len() }))
}
