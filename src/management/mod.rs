mod auth;
mod motd;

pub use auth::REFRESH_RETRY_DELAY;
pub use auth::TokenManager;
pub use motd::MotdManager;
