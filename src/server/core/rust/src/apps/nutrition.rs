/* src/server/core/rust/src/apps/nutrition.rs */

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::MiniappConfig;
use crate::persist::{LocalState, keys};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionData {
  pub calories: u32,
  pub protein: u32,
  pub fat: u32,
  pub carbs: u32,
  pub calorie_goal: u32,
  pub protein_goal: u32,
  pub fat_goal: u32,
  pub carbs_goal: u32,
}

impl Default for NutritionData {
  fn default() -> Self {
    Self {
      calories: 0,
      protein: 0,
      fat: 0,
      carbs: 0,
      calorie_goal: 2500,
      protein_goal: 150,
      fat_goal: 80,
      carbs_goal: 300,
    }
  }
}

/// Whole-number percentage of `goal`, rounded half up. A zero goal reads as 0%.
pub fn percent_of(value: u32, goal: u32) -> u32 {
  if goal == 0 {
    return 0;
  }
  let scaled = u64::from(value) * 100 + u64::from(goal) / 2;
  u32::try_from(scaled / u64::from(goal)).unwrap_or(u32::MAX)
}

fn load<T: serde::de::DeserializeOwned + Default>(local: Option<&LocalState>, key: &str) -> T {
  local.and_then(|l| l.get(key)).unwrap_or_default()
}

fn nutrition_view(data: &NutritionData) -> serde_json::Value {
  json!({
    "totals": data,
    "percent": {
      "calories": percent_of(data.calories, data.calorie_goal),
      "protein": percent_of(data.protein, data.protein_goal),
      "fat": percent_of(data.fat, data.fat_goal),
      "carbs": percent_of(data.carbs, data.carbs_goal),
    },
  })
}

pub(super) fn config(local: Option<Arc<LocalState>>) -> MiniappConfig {
  let (overview, nutrition, workouts) = (local.clone(), local.clone(), local);
  MiniappConfig::new("sport_nutrition", "Sport nutrition")
    .description("Daily macros and completed workouts")
    .icon("💪")
    .color("#37b24d")
    .page("", "Today", move |_| {
      let data: NutritionData = load(overview.as_deref(), keys::NUTRITION_DATA);
      let done: Vec<String> = load(overview.as_deref(), keys::COMPLETED_WORKOUTS);
      let user: serde_json::Value = load(overview.as_deref(), keys::USER_DATA);
      json!({
        "user": user,
        "caloriesPercent": percent_of(data.calories, data.calorie_goal),
        "workoutsDone": done.len(),
      })
    })
    .page("nutrition", "Nutrition", move |_| {
      nutrition_view(&load(nutrition.as_deref(), keys::NUTRITION_DATA))
    })
    .page("workouts", "Workouts", move |_| {
      let done: Vec<String> = load(workouts.as_deref(), keys::COMPLETED_WORKOUTS);
      let health: serde_json::Value = load(workouts.as_deref(), keys::HEALTH_DATA);
      json!({ "completed": done, "health": health })
    })
}
