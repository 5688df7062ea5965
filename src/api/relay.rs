use axum::{
    Extension,
    extract::OriginalUri,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use chrono::Local;
use serde_json::{Value, json};

use crate::{info, server::AppState, spotify, types::UpstreamOutcome, warning};

/// Relays one inbound request to the Spotify Web API.
///
/// Builds the target URL by appending the inbound path and query string to
/// the configured API base, issues a GET with the current bearer token, and
/// relays the upstream status, headers, and JSON body back to the caller.
///
/// # Retry Logic
///
/// When the first attempt answers 400 or 401 the token manager refreshes the
/// credential synchronously and the identical GET is issued exactly once
/// more. Whatever that second attempt returns is relayed as final; a second
/// consecutive authentication failure is the caller's answer, not a trigger
/// for further retries. A refresh failure during this path is logged and
/// never surfaced; the stale token simply produces the final error.
///
/// # Error Shapes
///
/// - Bare root path: 400 with a fixed body instructing the caller to supply
///   a resource path. The upstream is not contacted.
/// - Upstream unreachable on either attempt: 500 with the fixed wrapper
///   envelope embedding the transport error under `rawError`, marking the
///   failure as produced by the proxy rather than Spotify.
pub async fn relay(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    if uri.path() == "/" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "No resource path provided",
                "reason": "Request the proxy with a Spotify Web API path, for example /v1/search?q=...&type=track."
            })),
        )
            .into_response();
    }

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let token = state.tokens.current_token().await;
    let mut outcome =
        spotify::catalog::get_resource(&state.client, &state.api_url, path_and_query, &token).await;

    if is_auth_failure(&outcome) {
        if let Err(e) = state.tokens.refresh().await {
            warning!("Token refresh during retry failed: {}", e);
        }
        let token = state.tokens.current_token().await;
        outcome =
            spotify::catalog::get_resource(&state.client, &state.api_url, path_and_query, &token)
                .await;
    }

    match outcome {
        UpstreamOutcome::Response {
            status,
            headers,
            body,
        } => {
            info!(
                "Served request {} at {}",
                path_and_query,
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            relay_response(status, headers, body)
        }
        UpstreamOutcome::Unreachable(message) => auth_issue_response(Value::String(message)),
    }
}

fn is_auth_failure(outcome: &UpstreamOutcome) -> bool {
    matches!(
        outcome,
        UpstreamOutcome::Response { status, .. }
            if *status == StatusCode::BAD_REQUEST || *status == StatusCode::UNAUTHORIZED
    )
}

/// Rebuilds the upstream response for the caller.
///
/// The body was consumed and re-serialized, so headers describing the
/// original transfer must not survive the relay. The proxy's own CORS layer
/// replaces any access-control headers Spotify sent.
fn relay_response(status: StatusCode, upstream_headers: HeaderMap, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    for (name, value) in upstream_headers.iter() {
        if skip_header(name) {
            continue;
        }
        response.headers_mut().append(name.clone(), value.clone());
    }
    response
}

fn skip_header(name: &HeaderName) -> bool {
    name == header::CONTENT_LENGTH
        || name == header::TRANSFER_ENCODING
        || name == header::CONNECTION
        || name == header::CONTENT_ENCODING
        || name == header::CONTENT_TYPE
        || name.as_str().starts_with("access-control-")
}

fn auth_issue_response(raw_error: Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Spotify Authentication Issue",
            "reason": "This was caused by an authentication or connectivity issue with Spotify. This error was produced by sporelay and NOT by Spotify!",
            "rawError": raw_error,
        })),
    )
        .into_response()
}
