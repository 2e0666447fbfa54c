/* src/server/adapter/axum/src/handler/tests.rs */

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use miniapp_host::{BuiltinOptions, LocalState, builtin_host};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;

fn app() -> Router {
  build_router(builtin_host(BuiltinOptions::default()).into_parts())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut req = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(json) => {
      req = req.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
  send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn home_lists_every_miniapp() {
  let (status, body) = get(&app(), "/").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ok"], true);
  let miniapps = body["data"]["miniapps"].as_array().unwrap();
  assert_eq!(miniapps.len(), 10);
  assert_eq!(miniapps[0]["name"], "todo");
}

#[tokio::test]
async fn unknown_top_level_path_renders_home() {
  let (status, body) = get(&app(), "/some/where/else").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["data"]["miniapps"].is_array());
}

#[tokio::test]
async fn non_get_fallback_is_not_found() {
  let (status, body) = send(&app(), Method::POST, "/nowhere", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn miniapp_page_renders_view() {
  let (status, body) = get(&app(), "/miniapp/weather/city/Lisbon").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["miniapp"], "weather");
  assert_eq!(body["data"]["page"]["path"], "city/:city");
  assert_eq!(body["data"]["params"]["city"], "Lisbon");
  assert_eq!(body["data"]["view"]["city"], "Lisbon");
}

#[tokio::test]
async fn unmatched_sub_path_redirects_to_root() {
  let resp = app()
    .oneshot(Request::builder().uri("/miniapp/calculator/unknown").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
  assert_eq!(resp.headers()[header::LOCATION], "/miniapp/calculator");

  let (status, body) = get(&app(), "/miniapp/calculator").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["page"]["path"], "");
}

#[tokio::test]
async fn unknown_miniapp_is_not_found() {
  let (status, body) = get(&app(), "/miniapp/ghost/anything").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["ok"], false);
  assert_eq!(body["error"]["message"], "Mini-app 'ghost' not found");
  assert_eq!(body["error"]["transient"], false);
}

#[tokio::test]
async fn cart_add_update_and_clear() {
  let app = app();
  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 1 }))).await;
  let (status, body) =
    send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 1 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 1);
  assert_eq!(body["data"]["cart"][0]["quantity"], 2);
  assert_eq!(body["data"]["total"], 900);

  let (_, body) =
    send(&app, Method::PATCH, "/api/stores/menu/cart/1", Some(json!({ "quantity": 0 }))).await;
  assert_eq!(body["data"]["count"], 0);

  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 3 }))).await;
  let (_, body) = send(&app, Method::DELETE, "/api/stores/menu/cart", None).await;
  assert!(body["data"]["cart"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn huge_quantity_keeps_totals_consistent() {
  let app = app();
  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 1 }))).await;
  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 2 }))).await;
  let update = json!({ "quantity": u32::MAX });
  let (status, body) = send(&app, Method::PATCH, "/api/stores/menu/cart/1", Some(update)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["count"], u64::from(u32::MAX) + 1);

  let (status, body) = get(&app, "/api/stores/menu/cart").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["count"], u64::from(u32::MAX) + 1);
}

#[tokio::test]
async fn storefront_carts_are_independent() {
  let app = app();
  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 2 }))).await;
  let (_, body) = get(&app, "/api/stores/books_store/cart").await;
  assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn unknown_store_or_item_is_not_found() {
  let app = app();
  let (status, _) = get(&app, "/api/stores/ghost/cart").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, body) =
    send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 999 }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn favorite_toggle_round_trip() {
  let app = app();
  let uri = "/api/stores/books_store/favorites/22/toggle";
  let (_, body) = send(&app, Method::POST, uri, None).await;
  assert_eq!(body["data"]["favorite"], true);
  let (_, body) = get(&app, "/api/stores/books_store/favorites").await;
  assert_eq!(body["data"], json!([22]));
  let (_, body) = send(&app, Method::POST, uri, None).await;
  assert_eq!(body["data"]["favorite"], false);
}

#[tokio::test]
async fn edit_commit_moves_into_cart() {
  let app = app();
  let edit = json!({ "comment": "extra hot", "addons": [101] });
  let (_, body) = send(&app, Method::PUT, "/api/stores/menu/edits/2", Some(edit)).await;
  assert_eq!(body["data"]["edits"][0]["comment"], "extra hot");

  let (status, body) = send(&app, Method::POST, "/api/stores/menu/edits/2/commit", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["cart"][0]["comment"], "extra hot");
  assert_eq!(body["data"]["cart"][0]["addons"], json!([101]));
  assert!(body["data"]["edits"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn orders_without_remote_report_failed() {
  let (status, body) = get(&app(), "/api/stores/menu/orders?user_id=7").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["state"], "failed");

  let (status, _) = get(&app(), "/api/stores/menu/orders").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn survey_submit_completes_without_remote() {
  let body = json!({ "answers": { "role": "founder" }, "user_id": 1 });
  let (status, body) = send(&app(), Method::POST, "/api/survey/submit", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["completed"], true);
  assert!(body["data"]["warning"].is_string());
}

#[tokio::test]
async fn local_value_is_merged_into_survey() {
  let dir = tempfile::tempdir().unwrap();
  let local = LocalState::open(dir.path()).unwrap();
  let options = BuiltinOptions { local: Some(local.into()), ..Default::default() };
  let app = build_router(builtin_host(options).into_parts());

  let (status, _) = send(&app, Method::PUT, "/api/local/other_role", Some(json!("hobbyist"))).await;
  assert_eq!(status, StatusCode::OK);
  let (_, body) = get(&app, "/api/local/other_role").await;
  assert_eq!(body["data"], "hobbyist");

  let answers = json!({ "answers": { "role": "other" } });
  let (status, body) = send(&app, Method::POST, "/api/survey/submit", Some(answers)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["answers"]["role"], "other");
  assert_eq!(body["data"]["answers"]["other_role"], "hobbyist");
}

#[tokio::test]
async fn local_values_validate_keys_and_need_storage() {
  let without_storage = app();
  let dir = tempfile::tempdir().unwrap();
  let local = LocalState::open(dir.path()).unwrap();
  let options = BuiltinOptions { local: Some(local.into()), ..Default::default() };
  let app = build_router(builtin_host(options).into_parts());

  let (status, _) = send(&app, Method::PUT, "/api/local/bad.key", Some(json!(1))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, _) = get(&app, "/api/local/userData").await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  send(&app, Method::PUT, "/api/local/userData", Some(json!({ "weight": 70 }))).await;
  let (_, body) = send(&app, Method::DELETE, "/api/local/userData", None).await;
  assert_eq!(body["data"]["removed"], true);

  let (status, body) = get(&without_storage, "/api/local/userData").await;
  assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  assert_eq!(body["error"]["transient"], true);
}

#[tokio::test]
async fn todo_endpoints_mutate_the_listed_tasks() {
  let app = app();
  let (status, body) =
    send(&app, Method::POST, "/api/todos", Some(json!({ "text": "Water plants" }))).await;
  assert_eq!(status, StatusCode::OK);
  let id = body["data"]["id"].as_u64().unwrap();
  assert_eq!(body["data"]["done"], false);

  let (_, body) = send(&app, Method::POST, &format!("/api/todos/{id}/toggle"), None).await;
  assert_eq!(body["data"]["done"], true);

  let (_, body) = get(&app, "/miniapp/todo").await;
  let todos = body["data"]["view"]["todos"].as_array().unwrap();
  assert!(todos.iter().any(|t| t["text"] == "Water plants" && t["done"] == true));

  let (status, _) = send(&app, Method::DELETE, &format!("/api/todos/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) = send(&app, Method::DELETE, &format!("/api/todos/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, Method::POST, "/api/todos", Some(json!({ "text": "  " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn events_stream_starts_with_snapshot() {
  let resp = app()
    .oneshot(Request::builder().uri("/api/stores/menu/events").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/event-stream");

  let mut body = resp.into_body();
  let frame = body.frame().await.unwrap().unwrap();
  let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
  assert!(text.starts_with("event: snapshot"));
  assert!(text.contains("\"store\":\"menu\""));
}

async fn next_event(body: &mut Body) -> String {
  let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
    .await
    .expect("no event within timeout")
    .unwrap()
    .unwrap();
  String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap()
}

#[tokio::test]
async fn events_stream_follows_mutations_and_unsubscribes_on_drop() {
  let parts = builtin_host(BuiltinOptions::default()).into_parts();
  let menu = parts.storefronts["menu"].clone();
  let app = build_router(parts);

  let resp = app
    .clone()
    .oneshot(Request::builder().uri("/api/stores/menu/events").body(Body::empty()).unwrap())
    .await
    .unwrap();
  let mut body = resp.into_body();
  let first = next_event(&mut body).await;
  assert!(first.contains("\"count\":0"));
  assert_eq!(menu.cart.subscriber_count(), 1);

  send(&app, Method::POST, "/api/stores/menu/cart", Some(json!({ "id": 1 }))).await;
  let second = next_event(&mut body).await;
  assert!(second.starts_with("event: snapshot"));
  assert!(second.contains("\"count\":1"));

  drop(body);
  assert_eq!(menu.cart.subscriber_count(), 0);
}

#[tokio::test]
async fn trailing_slash_still_reaches_miniapp() {
  let (status, body) = get(&app(), "/miniapp/calculator/").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["miniapp"], "calculator");
}

#[tokio::test]
async fn catalog_view_carries_storefront_theme() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("menu.theme.json"), r##"{"primaryColor":"#000000"}"##).unwrap();
  let options = BuiltinOptions { theme_dir: Some(dir.path().to_path_buf()), ..Default::default() };
  let app = build_router(builtin_host(options).into_parts());

  let (_, body) = get(&app, "/miniapp/menu").await;
  assert_eq!(body["data"]["view"]["theme"]["state"], "loaded");
  assert_eq!(body["data"]["view"]["theme"]["value"]["primaryColor"], "#000000");

  // no file for this store: the failure is surfaced, not replaced by defaults
  let (_, body) = get(&app, "/miniapp/books_store").await;
  assert_eq!(body["data"]["view"]["theme"]["state"], "failed");
}
