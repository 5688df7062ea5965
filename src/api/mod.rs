//! # API Module
//!
//! This module provides the HTTP endpoints exposed by the proxy: a small set
//! of local routes and the fallback relay that forwards everything else to
//! the Spotify Web API.
//!
//! ## Overview
//!
//! The API module is the inbound surface of the proxy. It handles:
//!
//! - **Request Relaying**: Translates one inbound request into one (or, after
//!   an authentication failure, two) upstream catalog calls and relays the
//!   result verbatim
//! - **Liveness Probing**: A fixed plain-text acknowledgment independent of
//!   token state
//! - **Uptime Reporting**: Elapsed time since process start in multiple units,
//!   plus the current message of the day if one is set
//! - **MOTD Administration**: An authenticated call for setting and clearing
//!   the message of the day
//!
//! ## Endpoints
//!
//! ### Proxying
//!
//! - [`relay`] - Fallback handler for every path not claimed by a local route.
//!   Attaches the current bearer token, forwards the GET upstream, and applies
//!   the single-retry policy when Spotify reports an authentication failure.
//!
//! ### Monitoring
//!
//! - [`ping`] - Liveness probe answering `pong` regardless of token or
//!   degraded-mode state.
//! - [`uptime`] - Uptime breakdown and the current MOTD as JSON.
//!
//! ### Administration
//!
//! - [`update_motd`] - Accepts a secret key plus either a new message with an
//!   expiry or a clear flag. Rejects with 403 on key mismatch, 400 on missing
//!   fields, and 500 when no secret is configured.
//!
//! ## Architecture
//!
//! The module is built using the [Axum](https://docs.rs/axum) web framework.
//! Each endpoint is an async function wired into the Router in
//! [`crate::server`], which also applies the CORS layer and the degraded-mode
//! gate in front of these handlers.
//!
//! ## Error Shape
//!
//! Synthesized errors use a fixed JSON envelope with `error` and `reason`
//! fields; the proxy's own 500 wrapper additionally embeds the raw upstream
//! payload under `rawError` so callers can tell proxy-originated failures
//! apart from genuine Spotify responses.
//!
//! ## Related Modules
//!
//! - [`crate::spotify`] - Upstream HTTP operations
//! - [`crate::management`] - Token and MOTD state
//! - [`crate::types`] - Request and response payload definitions

mod motd;
mod ping;
mod relay;
mod uptime;

pub use motd::update_motd;
pub use ping::ping;
pub use relay::relay;
pub use uptime::uptime;
