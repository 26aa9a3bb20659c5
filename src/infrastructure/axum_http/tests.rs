use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    application::usecases::UseCases,
    infrastructure::{Repositories, axum_http::http_serve::api_router},
};

async fn seeded_app() -> Router {
    let repositories = Repositories::in_memory_seeded().await.unwrap();
    api_router(&UseCases::new(&repositories))
}

fn get(uri: &str, account_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(account_id) = account_id {
        builder = builder.header("X-Account-Id", account_id);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, account_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("X-Account-Id", account_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str, account_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("X-Account-Id", account_id)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_is_ok() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/health-check", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/nope", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn plans_are_listed_without_an_account() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/subscriptions/plans", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|plan| plan["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["free", "professional", "VIP"]);
}

#[tokio::test]
async fn missing_account_header_is_unauthorized() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/entitlements/plan", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn demo_company_contacts_usage() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/entitlements/usage/contacts", Some("2")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["used"], 7);
    assert_eq!(body["limit"], 50);
    assert_eq!(body["unlimited"], false);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["percentage"], 14);
    assert_eq!(body["state"], "below_threshold");
}

#[tokio::test]
async fn demo_company_has_advanced_search() {
    let response = seeded_app()
        .await
        .oneshot(get(
            "/api/v1/entitlements/features/advanced_search",
            Some("2"),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["required_plan_id"], Value::Null);
}

#[tokio::test]
async fn normal_account_gets_no_upgrade_hint() {
    let response = seeded_app()
        .await
        .oneshot(get(
            "/api/v1/entitlements/features/view_full_curriculum",
            Some("1"),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["allowed"], false);
    assert_eq!(body["required_plan_id"], Value::Null);
}

#[tokio::test]
async fn unknown_feature_is_a_bad_request() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/entitlements/features/teleport", Some("2")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn usage_overview_is_forbidden_for_normal_accounts() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/entitlements/usage", Some("3")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn recording_usage_returns_updated_decision() {
    let response = seeded_app()
        .await
        .oneshot(post_empty("/api/v1/entitlements/usage/contacts", "2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["used"], 8);
    assert_eq!(body["percentage"], 16);
}

#[tokio::test]
async fn subscribe_then_read_current_subscription() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/subscriptions/subscribe",
            "3",
            json!({ "plan_id": "VIP" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get("/api/v1/subscriptions/current", Some("3")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["plan_id"], "VIP");
    assert_eq!(body["status"], "active");
    assert_eq!(body["plan"]["name"], "VIP");
}

#[tokio::test]
async fn subscribe_to_unknown_plan_is_not_found() {
    let response = seeded_app()
        .await
        .oneshot(post_json(
            "/api/v1/subscriptions/subscribe",
            "2",
            json!({ "plan_id": "enterprise" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_drops_company_back_to_free() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_empty("/api/v1/subscriptions/cancel", "2"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["cancelled"], true);

    let response = app
        .oneshot(get("/api/v1/entitlements/plan", Some("2")))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["id"], "free");
}

#[tokio::test]
async fn cancel_without_subscription_is_not_found() {
    let response = seeded_app()
        .await
        .oneshot(post_empty("/api/v1/subscriptions/cancel", "1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn current_subscription_is_not_found_without_one() {
    let response = seeded_app()
        .await
        .oneshot(get("/api/v1/subscriptions/current", Some("3")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], 404);
}

#[tokio::test]
async fn favorites_follow_the_save_entitlement() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/favorites/3",
            "2",
            json!({ "notes": "available from March", "tags": ["backend"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_empty("/api/v1/favorites/3", "1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get("/api/v1/favorites", Some("2")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_favorite_body_is_a_bad_request() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/favorites/5")
                .header("X-Account-Id", "2")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"notes": "follow up"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/v1/favorites", Some("2")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|favorite| favorite["curriculum_id"] != "5")
    );
}
