use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

use crate::{spotify, success, types::AuthConfig, warning};

/// Delay between automatic refresh attempts while the last refresh failed.
pub const REFRESH_RETRY_DELAY: Duration = Duration::from_secs(300);

#[derive(Debug, Default)]
struct CredentialState {
    token: String,
    valid: bool,
    last_refresh_failed: bool,
    retry_scheduled: bool,
}

pub struct TokenManager {
    auth: AuthConfig,
    client: Client,
    state: Arc<Mutex<CredentialState>>,
}

impl TokenManager {
    pub fn new(auth: AuthConfig) -> Self {
        TokenManager {
            auth,
            client: Client::new(),
            state: Arc::new(Mutex::new(CredentialState::default())),
        }
    }

    /// Exchanges client credentials for a fresh bearer token.
    ///
    /// On success the new token replaces the current one immediately and
    /// degraded mode is cleared. On failure degraded mode is set and a retry
    /// task is armed, unless one is already waiting. Concurrent refreshes are
    /// not deduplicated; the last successful exchange wins.
    pub async fn refresh(&self) -> Result<(), String> {
        match Self::exchange(&self.client, &self.auth, &self.state).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let arm_retry = {
                    let mut state = self.state.lock().await;
                    state.valid = false;
                    state.last_refresh_failed = true;
                    let first = !state.retry_scheduled;
                    state.retry_scheduled = true;
                    first
                };
                if arm_retry {
                    self.schedule_retry();
                }
                Err(e)
            }
        }
    }

    pub async fn current_token(&self) -> String {
        self.state.lock().await.token.clone()
    }

    pub async fn has_valid_token(&self) -> bool {
        self.state.lock().await.valid
    }

    pub async fn is_degraded(&self) -> bool {
        self.state.lock().await.last_refresh_failed
    }

    async fn exchange(
        client: &Client,
        auth: &AuthConfig,
        state: &Mutex<CredentialState>,
    ) -> Result<(), String> {
        let token = spotify::auth::request_token(client, auth).await?;
        let mut state = state.lock().await;
        state.token = token;
        state.valid = true;
        state.last_refresh_failed = false;
        Ok(())
    }

    fn schedule_retry(&self) {
        let client = self.client.clone();
        let auth = self.auth.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            loop {
                sleep(REFRESH_RETRY_DELAY).await;
                match Self::exchange(&client, &auth, &state).await {
                    Ok(()) => {
                        state.lock().await.retry_scheduled = false;
                        success!("Token refresh recovered, leaving degraded mode");
                        break;
                    }
                    Err(e) => {
                        warning!(
                            "Scheduled token refresh failed, retrying in {}s: {}",
                            REFRESH_RETRY_DELAY.as_secs(),
                            e
                        );
                    }
                }
            }
        });
    }
}
