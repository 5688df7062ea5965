use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Extension, Router,
    extract::Request,
    http::{HeaderName, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use axum_server::tls_rustls::RustlsConfig;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use tokio::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    api, config, error, info,
    management::{MotdManager, TokenManager},
    warning,
};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub motd: Arc<MotdManager>,
    pub client: Client,
    pub api_url: String,
    pub motd_secret: Option<String>,
    pub started: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenManager>, api_url: String, motd_secret: Option<String>) -> Self {
        AppState {
            tokens,
            motd: Arc::new(MotdManager::new()),
            client: Client::new(),
            api_url,
            motd_secret,
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(api::ping))
        .route("/uptime", get(api::uptime))
        .route("/update-motd", post(api::update_motd))
        .fallback_service(get(api::relay))
        .layer(middleware::from_fn(degraded_gate))
        .layer(Extension(state))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

// While the last refresh failed every route except the liveness probe is
// short-circuited, local endpoints included.
async fn degraded_gate(
    Extension(state): Extension<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() != "/ping" && state.tokens.is_degraded().await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Spotify authentication unavailable",
                "reason": "The last token refresh failed. Requests are refused until a refresh succeeds."
            })),
        )
            .into_response();
    }
    next.run(request).await
}

pub async fn start_server(state: AppState, port: u16, tls: bool) {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    if tls {
        match RustlsConfig::from_pem_file(config::tls_cert_path(), config::tls_key_path()).await {
            Ok(tls_config) => {
                info!("Listening on https://{}", addr);
                if let Err(e) = axum_server::bind_rustls(addr, tls_config)
                    .serve(app.into_make_service())
                    .await
                {
                    error!("Server error: {}", e);
                }
                return;
            }
            Err(e) => {
                warning!(
                    "Failed to load TLS material ({}). Falling back to plain HTTP.",
                    e
                );
            }
        }
    }

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    info!("Listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
