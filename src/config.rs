//! Configuration management for the Spotify reverse proxy.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and a `.env` file. It provides a centralized way to manage application
//! configuration including Spotify API credentials, listener settings, TLS material
//! locations, and the optional MOTD administration secret.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::env;

/// Loads environment variables from a `.env` file in the working directory.
///
/// A deployment that sets all variables directly in the process environment
/// does not need a `.env` file, so a missing file is reported to the caller
/// instead of terminating the program.
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an error
/// string if no file could be read or parsed.
///
/// # Example
///
/// ```
/// use sporelay::config;
///
/// if let Err(e) = config::load_env() {
///     eprintln!("No .env file loaded: {}", e);
/// }
/// ```
pub fn load_env() -> Result<(), String> {
    dotenv::dotenv().map(|_| ()).map_err(|e| e.to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
///
/// # Example
///
/// ```
/// let client_id = spotify_client_id(); // e.g., "abc123..."
/// ```
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable which
/// contains the client secret obtained when registering the application with
/// Spotify's developer platform. This is used for the client-credentials
/// exchange.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Example
///
/// ```
/// let client_secret = spotify_client_secret(); // e.g., "def456..."
/// ```
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth token endpoint URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL used for the client-credentials exchange. Every token refresh
/// performed by the proxy posts to this endpoint.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. The proxy builds every upstream
/// target by appending the inbound path and query string to this base.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the port the proxy listener binds to.
///
/// Retrieves the `SERVER_PORT` environment variable. Values that are missing
/// or not parseable as a port number fall back to the default of 3000.
///
/// # Example
///
/// ```
/// let port = server_port(); // e.g., 3000
/// ```
pub fn server_port() -> u16 {
    env::var("SERVER_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000)
}

/// Returns whether the listener should serve HTTPS.
///
/// Retrieves the `TLS_ENABLED` environment variable. Only the values `true`
/// and `1` enable TLS; anything else, including an unset variable, selects
/// the plain HTTP listener.
///
/// # Example
///
/// ```
/// let tls = tls_enabled(); // e.g., false
/// ```
pub fn tls_enabled() -> bool {
    matches!(
        env::var("TLS_ENABLED").as_deref(),
        Ok("true") | Ok("1")
    )
}

/// Returns the path of the PEM certificate used for HTTPS.
///
/// Retrieves the `TLS_CERT_PATH` environment variable, defaulting to
/// `server.cert` in the working directory when unset.
pub fn tls_cert_path() -> String {
    env::var("TLS_CERT_PATH").unwrap_or_else(|_| "server.cert".to_string())
}

/// Returns the path of the PEM private key used for HTTPS.
///
/// Retrieves the `TLS_KEY_PATH` environment variable, defaulting to
/// `server.key` in the working directory when unset.
pub fn tls_key_path() -> String {
    env::var("TLS_KEY_PATH").unwrap_or_else(|_| "server.key".to_string())
}

/// Returns the secret key protecting the MOTD administration endpoint.
///
/// Retrieves the `MOTD_SECRET_KEY` environment variable. When unset the
/// `/update-motd` endpoint reports the feature as unconfigured and rejects
/// every request.
///
/// # Example
///
/// ```
/// let secret = motd_secret(); // e.g., Some("hunter2".to_string())
/// ```
pub fn motd_secret() -> Option<String> {
    env::var("MOTD_SECRET_KEY").ok()
}
