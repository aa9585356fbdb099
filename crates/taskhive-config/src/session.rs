use std::env;

/// Configuration for the server-side session channel.
///
/// Session TTL is independent of the token TTL; both default to 24 hours.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Session lifetime in seconds, enforced server-side at lookup.
    pub session_ttl_secs: i64,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400), // 24 hours
        }
    }
}
