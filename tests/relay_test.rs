use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sporelay::management::TokenManager;
use sporelay::server::{AppState, build_router};
use sporelay::types::AuthConfig;

// Helper to point the token manager at the mock accounts service
fn auth_config(server: &MockServer) -> AuthConfig {
    AuthConfig {
        token_url: format!("{}/api/token", server.uri()),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
    }
}

// Mock for the client-credentials endpoint answering with a fixed token
fn token_endpoint(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
}

// Builds a router whose token manager already holds a token from the mock
async fn seeded_app(server: &MockServer) -> Router {
    let tokens = Arc::new(TokenManager::new(auth_config(server)));
    tokens
        .refresh()
        .await
        .expect("initial refresh against the mock should succeed");
    build_router(AppState::new(tokens, server.uri(), None))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn relays_success_response_verbatim() {
    let server = MockServer::start().await;
    token_endpoint("tok-1").expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "nils"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "artists": { "items": [] } }))
                .insert_header("x-spotify-trace", "abc123"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;
    let response = app
        .oneshot(get("/v1/search?q=nils&type=artist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Upstream metadata headers survive the relay
    assert_eq!(
        response.headers().get("x-spotify-trace").unwrap(),
        "abc123"
    );

    assert_eq!(body_json(response).await, json!({ "artists": { "items": [] } }));
}

#[tokio::test]
async fn relays_non_auth_errors_without_refresh() {
    let server = MockServer::start().await;
    // Only the seeding refresh may hit the token endpoint
    token_endpoint("tok-1").expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/artists/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "non existing id" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;
    let response = app.oneshot(get("/v1/artists/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": { "status": 404, "message": "non existing id" } })
    );
}

#[tokio::test]
async fn refreshes_and_retries_once_on_unauthorized() {
    let server = MockServer::start().await;
    // First exchange hands out the stale token, the retry refresh a fresh one
    token_endpoint("stale").up_to_n_times(1).mount(&server).await;
    token_endpoint("fresh").expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "The access token expired" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;
    let response = app.oneshot(get("/v1/me/top")).await.unwrap();

    // The retry carried the refreshed token and its answer is the final one
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "items": [] }));
}

#[tokio::test]
async fn bad_request_also_triggers_refresh_and_retry() {
    let server = MockServer::start().await;
    // Seeding refresh plus exactly one retry refresh
    token_endpoint("tok").expect(2).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/browse/new-releases"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "status": 400, "message": "Only valid bearer authentication supported" }
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/browse/new-releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "albums": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;
    let response = app.oneshot(get("/v1/browse/new-releases")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "albums": {} }));
}

#[tokio::test]
async fn second_auth_failure_is_relayed_as_final() {
    let server = MockServer::start().await;
    // Seeding refresh plus exactly one retry refresh, never a third
    token_endpoint("tok").expect(2).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "The access token expired" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;
    let response = app.oneshot(get("/v1/me/top")).await.unwrap();

    // The second 401 comes back untouched, no further retries happen
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": { "status": 401, "message": "The access token expired" } })
    );
}

#[tokio::test]
async fn bare_root_is_rejected_without_contacting_upstream() {
    let server = MockServer::start().await;
    token_endpoint("tok").expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = seeded_app(&server).await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No resource path provided");

    // A query string alone does not make the root path proxyable
    let response = app.oneshot(get("/?q=nils")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_upstream_yields_wrapper_envelope() {
    let server = MockServer::start().await;
    token_endpoint("tok").expect(1).mount(&server).await;

    // Port 9 is the discard service, nothing answers there
    let tokens = Arc::new(TokenManager::new(auth_config(&server)));
    tokens.refresh().await.unwrap();
    let app = build_router(AppState::new(tokens, "http://127.0.0.1:9".to_string(), None));

    let response = app.oneshot(get("/v1/me/top")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Spotify Authentication Issue");
    assert!(body["rawError"].is_string());
}
