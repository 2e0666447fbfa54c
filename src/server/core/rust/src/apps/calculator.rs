/* src/server/core/rust/src/apps/calculator.rs */

use serde_json::json;

use crate::config::MiniappConfig;

const KEYPAD: [&str; 20] = [
  "C", "±", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "−", "1", "2", "3", "+", "0", ".", "⌫",
  "=",
];

pub(super) fn config() -> MiniappConfig {
  MiniappConfig::new("calculator", "Calculator")
    .description("Basic arithmetic")
    .icon("🧮")
    .color("#495057")
    .page("", "Calculator", |_| json!({ "display": "0", "keypad": KEYPAD }))
}
