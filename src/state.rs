use std::sync::Arc;

use taskhive_auth::store::{IdentityStore, SessionStore, WorkspaceStore};
use taskhive_config::{CookieConfig, CorsConfig, JwtConfig, SessionConfig};
use taskhive_db::{PgIdentityStore, PgSessionStore, PgWorkspaceStore, init_db_pool};

/// Everything a request handler needs, built once at startup and injected.
///
/// Stores are trait objects so tests (and DB-less local runs) swap in the
/// in-memory implementations; there is no ambient registry anywhere.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub identities: Arc<dyn IdentityStore>,
    pub workspaces: Arc<dyn WorkspaceStore>,
    pub jwt_config: JwtConfig,
    pub session_config: SessionConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Constructs state over any store implementations with the given config.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        identities: Arc<dyn IdentityStore>,
        workspaces: Arc<dyn WorkspaceStore>,
        jwt_config: JwtConfig,
        session_config: SessionConfig,
        cookie_config: CookieConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            sessions,
            identities,
            workspaces,
            jwt_config,
            session_config,
            cookie_config,
            cors_config,
        }
    }
}

/// Production state: PostgreSQL-backed stores, config from the environment.
pub async fn init_app_state() -> AppState {
    let pool = init_db_pool().await;

    AppState::new(
        Arc::new(PgSessionStore::new(pool.clone())),
        Arc::new(PgIdentityStore::new(pool.clone())),
        Arc::new(PgWorkspaceStore::new(pool)),
        JwtConfig::from_env(),
        SessionConfig::from_env(),
        CookieConfig::from_env(),
        CorsConfig::from_env(),
    )
}
