use std::env;

/// Names and attribute policy for the credential cookies.
///
/// Issuance and revocation must use the same attribute set; browsers only
/// match a deletion against an existing cookie when name, path, and the
/// security attributes all agree, and a mismatched deletion fails silently.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    /// Opaque server-side session token. Server-readable only.
    pub session_cookie: String,
    /// Signed stateless token. Server-readable only.
    pub token_cookie: String,
    /// Display metadata (id, email, role hint). Client-readable.
    pub account_cookie: String,
    pub path: String,
    pub secure: bool,
    /// True when the frontend is served from a different origin.
    pub cross_origin: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            session_cookie: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "taskhive_session".to_string()),
            token_cookie: env::var("TOKEN_COOKIE_NAME")
                .unwrap_or_else(|_| "taskhive_token".to_string()),
            account_cookie: env::var("ACCOUNT_COOKIE_NAME")
                .unwrap_or_else(|_| "taskhive_account".to_string()),
            path: env::var("COOKIE_PATH").unwrap_or_else(|_| "/".to_string()),
            secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            cross_origin: env::var("COOKIE_CROSS_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Cross-site exposure is only relaxed under secure transport; an
    /// insecure cross-origin deployment still gets strict cookies (and a
    /// broken cross-origin login, which is the safer failure).
    pub fn allow_cross_site(&self) -> bool {
        self.cross_origin && self.secure
    }
}
