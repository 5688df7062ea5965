//! # Spotify Integration Module
//!
//! This module provides the HTTP interface to Spotify's services used by the
//! proxy. It covers the two upstream calls the system ever makes: the OAuth
//! client-credentials exchange against the accounts service, and the catalog
//! GET that every proxied request is translated into.
//!
//! ## Architecture
//!
//! ```text
//! Proxy Layer (api::relay, management::TokenManager)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client-credentials exchange)
//!     └── Catalog Access (single GET with bearer token)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 client-credentials grant:
//! - **Basic Authentication**: Client ID and secret sent as an HTTP Basic header
//! - **Fixed Grant Body**: Posts `grant_type=client_credentials` as form data
//! - **Token Extraction**: Pulls the `access_token` string out of the JSON reply
//!
//! ### Catalog Module
//!
//! [`catalog`] - Performs the forwarded catalog request:
//! - **Verbatim Targeting**: Appends the inbound path and query to the API base
//! - **Uniform Outcomes**: Collapses every result, HTTP error statuses included,
//!   into a single [`crate::types::UpstreamOutcome`] value
//! - **Network Failures**: Surfaced as a distinct unreachable variant instead of
//!   an error channel
//!
//! ## Error Handling Philosophy
//!
//! reqwest does not raise on HTTP-level error statuses, so a 401 from Spotify
//! arrives as an ordinary response here. The caller branches on the status it
//! finds in the outcome; only transport failures (DNS, refused connections,
//! interrupted bodies) produce the unreachable variant.
//!
//! ## Error Types
//!
//! - **`String`** - Token exchange failures, carried up to the token manager
//! - **[`crate::types::UpstreamOutcome`]** - Every catalog call result
//!
//! ## Dependencies
//!
//! - **reqwest** - HTTP client with JSON support and async capabilities
//! - **serde_json** - JSON parsing of token and catalog payloads

pub mod auth;
pub mod catalog;
