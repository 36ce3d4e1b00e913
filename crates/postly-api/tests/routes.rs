use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use postly_api::{AppStateInner, router};
use postly_store::{FeedStore, PasswordAlgorithm, StoreConfig};

fn app() -> Router {
    router(Arc::new(AppStateInner {
        store: FeedStore::new(StoreConfig {
            password_algorithm: PasswordAlgorithm::Sha256,
        }),
        jwt_secret: "test-secret".into(),
        token_ttl: chrono::Duration::hours(1),
    }))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, name: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "user_name": name, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_name"], name);
    body["token"].as_str().unwrap().to_string()
}

async fn post(app: &Router, token: &str, text: &str) -> u64 {
    let body = json!({ "text": text });
    let (status, body) = send(app, "POST", "/posts", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["timestamp"].as_u64().unwrap()
}

#[tokio::test]
async fn register_login_and_post() {
    let app = app();
    register(&app, "john", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "user_name": "john", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    assert_eq!(post(&app, &token, "just #chilling today").await, 1);
    assert_eq!(post(&app, &token, "eating #steak for dinner").await, 2);

    let (status, body) = send(&app, "GET", "/users/john/posts", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "eating #steak for dinner");
    assert_eq!(body[0]["author"], "john");
    assert_eq!(body[0]["topics"], json!(["steak"]));
    assert_eq!(body[1]["timestamp"], 1);
}

#[tokio::test]
async fn registration_errors() {
    let app = app();
    register(&app, "john", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "user_name": "john", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_exists");

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "user_name": "  ", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_field");
}

#[tokio::test]
async fn padded_name_logs_in_as_registered() {
    let app = app();
    let creds = json!({ "user_name": " bob ", "password": "pw" });

    let (status, body) = send(&app, "POST", "/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_name"], "bob");

    let (status, body) = send(&app, "POST", "/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_name"], "bob");
    let token = body["token"].as_str().unwrap().to_string();

    assert_eq!(post(&app, &token, "hello").await, 1);
    let (status, body) = send(&app, "GET", "/users/bob/posts", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["author"], "bob");
}

#[tokio::test]
async fn bad_login_is_unauthorized() {
    let app = app();
    register(&app, "john", "pw").await;

    for (name, password) in [("john", "nope"), ("ghost", "pw")] {
        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "user_name": name, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_credentials");
    }
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = app();
    let (status, _) = send(&app, "GET", "/posts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/posts", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn compose_validation() {
    let app = app();
    let token = register(&app, "john", "pw").await;

    let blank = json!({ "text": "   " });
    let (status, body) = send(&app, "POST", "/posts", Some(token.as_str()), Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty");

    let long = json!({ "text": "x".repeat(141) });
    let (status, body) = send(&app, "POST", "/posts", Some(token.as_str()), Some(long)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_long");

    assert_eq!(post(&app, &token, &"x".repeat(140)).await, 1);
}

#[tokio::test]
async fn feed_topics_and_trending() {
    let app = app();
    let john = register(&app, "john", "pw").await;
    let jane = register(&app, "jane", "pw").await;

    post(&app, &john, "#a first").await;
    post(&app, &jane, "#b #b second").await;
    post(&app, &john, "#a third").await;
    post(&app, &jane, "#c fourth").await;

    let (status, body) = send(&app, "GET", "/posts", Some(john.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let stamps: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["timestamp"].as_u64().unwrap())
        .collect();
    assert_eq!(stamps, vec![1, 2, 3, 4]);
    assert_eq!(body[1]["author"], "jane");

    let (_, body) = send(&app, "GET", "/topics", Some(john.as_str()), None).await;
    assert_eq!(body, json!(["a", "b", "c"]));

    let (_, body) = send(&app, "GET", "/topics/a/posts", Some(jane.as_str()), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/topics/missing/posts", Some(jane.as_str()), None).await;
    assert_eq!(body, json!([]));

    // a and b tie at 2; a was counted first.
    let (status, body) = send(&app, "GET", "/trending", Some(john.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["a", "b", "c"]));

    let (_, body) = send(&app, "GET", "/trending?from=2&to=4", Some(john.as_str()), None).await;
    assert_eq!(body, json!(["b", "a", "c"]));

    let uri = "/trending?from=3&to=1";
    let (status, body) = send(&app, "GET", uri, Some(john.as_str()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_range");
}

#[tokio::test]
async fn like_toggles() {
    let app = app();
    let john = register(&app, "john", "pw").await;
    let jane = register(&app, "jane", "pw").await;
    let ts = post(&app, &john, "like me").await;

    let uri = format!("/posts/{}/like", ts);
    let (status, body) = send(&app, "POST", &uri, Some(jane.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "liked": true, "likes": 1 }));

    let (_, body) = send(&app, "POST", &uri, Some(jane.as_str()), None).await;
    assert_eq!(body, json!({ "liked": false, "likes": 0 }));

    let (status, body) = send(&app, "POST", "/posts/42/like", Some(jane.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn delete_account() {
    let app = app();
    let john = register(&app, "john", "pw").await;
    let jane = register(&app, "jane", "pw").await;
    post(&app, &john, "#gone soon").await;

    let (status, _) = send(&app, "DELETE", "/users/me", Some(john.as_str()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/posts", Some(john.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/users/john/posts", Some(jane.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (_, body) = send(&app, "GET", "/topics/gone/posts", Some(jane.as_str()), None).await;
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", "/posts", Some(jane.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, "GET", "/users", Some(jane.as_str()), None).await;
    assert_eq!(body, json!(["jane"]));
}
