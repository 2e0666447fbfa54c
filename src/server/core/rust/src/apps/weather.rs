/* src/server/core/rust/src/apps/weather.rs */

use serde_json::json;

use super::not_found_view;
use crate::config::MiniappConfig;

struct Forecast {
  city: &'static str,
  temp_c: i32,
  condition: &'static str,
  humidity: u8,
}

static FORECASTS: [Forecast; 4] = [
  Forecast { city: "Moscow", temp_c: -4, condition: "snow", humidity: 81 },
  Forecast { city: "Lisbon", temp_c: 17, condition: "sunny", humidity: 60 },
  Forecast { city: "Tbilisi", temp_c: 9, condition: "cloudy", humidity: 66 },
  Forecast { city: "Almaty", temp_c: 2, condition: "fog", humidity: 74 },
];

fn find(city: &str) -> Option<&'static Forecast> {
  FORECASTS.iter().find(|f| f.city.eq_ignore_ascii_case(city))
}

pub(super) fn config() -> MiniappConfig {
  MiniappConfig::new("weather", "Weather")
    .description("Demo forecasts for a few cities")
    .icon("⛅")
    .color("#1c7ed6")
    .page("", "Cities", |_| {
      let cities: Vec<_> =
        FORECASTS.iter().map(|f| json!({ "city": f.city, "tempC": f.temp_c })).collect();
      json!({ "cities": cities })
    })
    .page("city/:city", "Forecast", |ctx| {
      let Some(f) = ctx.params.get("city").and_then(find) else {
        return not_found_view("City", ctx.params.get("city"));
      };
      json!({
        "city": f.city,
        "tempC": f.temp_c,
        "condition": f.condition,
        "humidity": f.humidity,
      })
    })
}
