use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::types::MotdEntry;

#[derive(Default)]
pub struct MotdManager {
    entries: Mutex<Vec<MotdEntry>>,
}

impl MotdManager {
    pub fn new() -> Self {
        MotdManager {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub async fn push(&self, message: String, expiry: Duration) {
        let mut entries = self.entries.lock().await;
        entries.push(MotdEntry {
            message,
            expires_at: Instant::now() + expiry,
        });
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Returns the oldest message that has not expired yet.
    ///
    /// Expired entries are dropped here rather than by a background task, so
    /// the queue only shrinks when somebody reads it.
    pub async fn current(&self) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|entry| entry.expires_at > now);
        entries.first().map(|entry| entry.message.clone())
    }
}
