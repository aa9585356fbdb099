//! Session rows in PostgreSQL.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskhive_auth::store::{SessionStore, StoreError, generate_session_token};

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, identity_id: Uuid, ttl: Duration) -> Result<String, StoreError> {
        let token = generate_session_token();
        let expires_at = Utc::now() + ttl;

        sqlx::query("INSERT INTO sessions (token, identity_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&token)
            .bind(identity_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        // Expiry enforced in the query; reaping expired rows is a separate
        // maintenance concern.
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT identity_id FROM sessions WHERE token = $1 AND expires_at > now()")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::new)?;

        Ok(row.map(|(id,)| id))
    }

    async fn destroy(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(())
    }
}
