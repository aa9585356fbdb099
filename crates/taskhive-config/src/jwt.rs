use std::env;

/// Configuration for the signed stateless credential.
///
/// Issuer and audience are fixed per deployment and baked into every token;
/// verification rejects tokens minted for another deployment.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in seconds. Fixed at issuance; not per-call.
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "taskhive".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "taskhive-clients".to_string()),
            token_ttl_secs: env::var("JWT_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400), // 24 hours
        }
    }
}
