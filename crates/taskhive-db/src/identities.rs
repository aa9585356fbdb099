//! Identity and provider-link rows in PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskhive_auth::store::{IdentityStore, StoreError};
use taskhive_models::{Identity, ProviderKind, ProviderLink};

const IDENTITY_COLUMNS: &str = "id, email, name, password_hash, profile_picture, is_active, \
                                last_login, current_workspace, created_at, updated_at";

pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::new)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE email = $1"
        ))
        .bind(email.trim().to_ascii_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::new)
    }

    async fn find_by_provider(
        &self,
        provider: ProviderKind,
        subject: &str,
    ) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, Identity>(
            "SELECT i.id, i.email, i.name, i.password_hash, i.profile_picture, i.is_active, \
                    i.last_login, i.current_workspace, i.created_at, i.updated_at \
             FROM identities i \
             JOIN provider_links pl ON pl.identity_id = i.id \
             WHERE pl.provider = $1 AND pl.subject = $2",
        )
        .bind(provider.as_str())
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::new)
    }

    async fn insert(&self, identity: &Identity, link: &ProviderLink) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::new)?;

        sqlx::query(
            "INSERT INTO identities \
             (id, email, name, password_hash, profile_picture, is_active, \
              last_login, current_workspace, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(identity.id)
        .bind(&identity.email)
        .bind(&identity.name)
        .bind(&identity.password_hash)
        .bind(&identity.profile_picture)
        .bind(identity.is_active)
        .bind(identity.last_login)
        .bind(identity.current_workspace)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::new)?;

        sqlx::query(
            "INSERT INTO provider_links (id, provider, subject, identity_id, refresh_token, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(link.id)
        .bind(link.provider.as_str())
        .bind(&link.subject)
        .bind(link.identity_id)
        .bind(&link.refresh_token)
        .bind(link.created_at)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::new)?;

        tx.commit().await.map_err(StoreError::new)
    }

    async fn add_link(&self, link: &ProviderLink) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO provider_links (id, provider, subject, identity_id, refresh_token, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(link.id)
        .bind(link.provider.as_str())
        .bind(&link.subject)
        .bind(link.identity_id)
        .bind(&link.refresh_token)
        .bind(link.created_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(())
    }

    async fn set_current_workspace(
        &self,
        id: Uuid,
        workspace: Option<Uuid>,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE identities SET current_workspace = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(workspace)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE identities SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(())
    }
}
