use axum::{Extension, response::Json};

use crate::{
    server::AppState,
    types::{UptimeBreakdown, UptimeResponse},
};

pub async fn uptime(Extension(state): Extension<AppState>) -> Json<UptimeResponse> {
    let elapsed = state.started.elapsed();
    let seconds = elapsed.as_secs();

    Json(UptimeResponse {
        started_at: state.started_at.to_rfc3339(),
        uptime: UptimeBreakdown {
            milliseconds: elapsed.as_millis() as u64,
            seconds,
            minutes: seconds / 60,
            hours: seconds / 3600,
            days: seconds / 86400,
        },
        motd: state.motd.current().await,
    })
}
