use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tokio::time::Duration;

use crate::{server::AppState, types::UpdateMotdRequest};

pub async fn update_motd(
    Extension(state): Extension<AppState>,
    Json(request): Json<UpdateMotdRequest>,
) -> Response {
    let Some(secret) = &state.motd_secret else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "MOTD administration is not configured",
                "reason": "Set MOTD_SECRET_KEY to enable /update-motd."
            })),
        )
            .into_response();
    };

    if request.secret_key != *secret {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Invalid secret key" })),
        )
            .into_response();
    }

    if request.clear.unwrap_or(false) {
        state.motd.clear().await;
        return Json(json!({ "status": "cleared" })).into_response();
    }

    match (request.motd, request.expiry) {
        (Some(message), Some(expiry)) => {
            state.motd.push(message, Duration::from_secs(expiry)).await;
            Json(json!({ "status": "updated" })).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing fields",
                "reason": "Provide motd and expiry, or clear: true."
            })),
        )
            .into_response(),
    }
}
