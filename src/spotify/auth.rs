use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::types::AuthConfig;

/// Performs a client-credentials exchange against the Spotify accounts service.
///
/// Posts the fixed `grant_type=client_credentials` form body to the configured
/// token endpoint, authenticating with an HTTP Basic header built from the
/// client ID and secret. This is the only authentication flow the proxy uses;
/// no user interaction or refresh token is involved.
///
/// # Arguments
///
/// * `client` - Shared HTTP client used for the exchange
/// * `auth` - Token endpoint URL and client credentials
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The access token extracted from the JSON response
/// - `Err(String)` - Description of the failure (network error, non-200
///   status, or a response body without an `access_token` string)
///
/// # Failure Semantics
///
/// Any status other than 200 is treated as a refresh failure, as is a 200
/// response whose body carries no usable `access_token`. The caller decides
/// what a failure means for the service (degraded mode, scheduled retry);
/// this function only reports it.
///
/// # Example
///
/// ```
/// let token = request_token(&client, &auth).await?;
/// // Use the token in an Authorization: Bearer header
/// ```
///
/// # API Documentation
///
/// Uses Spotify's token endpoint with the "client_credentials" grant type as
/// specified in the OAuth 2.0 specification.
pub async fn request_token(client: &Client, auth: &AuthConfig) -> Result<String, String> {
    let res = client
        .post(&auth.token_url)
        .basic_auth(&auth.client_id, Some(&auth.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if res.status() != StatusCode::OK {
        return Err(format!("token endpoint answered {}", res.status()));
    }

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    match json["access_token"].as_str() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err("token response carried no access_token".to_string()),
    }
}
