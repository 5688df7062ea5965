use reqwest::Client;
use serde_json::Value;

use crate::types::UpstreamOutcome;

/// Issues the forwarded catalog GET for one proxied request.
///
/// Builds the target URL by appending the inbound path and query string to the
/// configured API base, unmodified beyond whatever encoding the inbound path
/// already carries, and sends a single GET with the bearer token attached.
///
/// # Arguments
///
/// * `client` - Shared HTTP client used for upstream calls
/// * `api_url` - Base URL of the Spotify Web API
/// * `path_and_query` - Inbound path plus optional query string, starting with `/`
/// * `token` - Current bearer token; may be empty before the first refresh
///
/// # Returns
///
/// Returns an [`UpstreamOutcome`]:
/// - `Response` for every HTTP-level result, carrying the upstream status,
///   headers, and body parsed as JSON. A body that is not valid JSON is kept
///   as a JSON string so it can still be relayed.
/// - `Unreachable` when the request never produced a response (DNS failure,
///   refused connection, interrupted body).
///
/// # Retry Logic
///
/// None here. The single-retry policy on authentication failures lives in the
/// relay handler, which inspects the status in the returned outcome.
pub async fn get_resource(
    client: &Client,
    api_url: &str,
    path_and_query: &str,
    token: &str,
) -> UpstreamOutcome {
    let target_url = format!("{}{}", api_url, path_and_query);

    let response = match client.get(&target_url).bearer_auth(token).send().await {
        Ok(resp) => resp,
        Err(err) => return UpstreamOutcome::Unreachable(err.to_string()),
    };

    let status = response.status();
    let headers = response.headers().clone();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => return UpstreamOutcome::Unreachable(err.to_string()),
    };

    let body = serde_json::from_slice::<Value>(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    UpstreamOutcome::Response {
        status,
        headers,
        body,
    }
}
