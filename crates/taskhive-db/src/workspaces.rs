//! Workspace and membership rows in PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use taskhive_auth::store::{StoreError, WorkspaceStore};
use taskhive_core::rbac::Role;
use taskhive_models::{Workspace, WorkspaceMember};

pub struct PgWorkspaceStore {
    pool: PgPool,
}

impl PgWorkspaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Roles are stored as text; parsing happens at the store boundary so the
// rest of the code never sees a raw role string.
#[derive(FromRow)]
struct MemberRow {
    identity_id: Uuid,
    email: String,
    name: String,
    role: String,
    joined_at: DateTime<Utc>,
}

impl MemberRow {
    fn into_member(self) -> Result<WorkspaceMember, StoreError> {
        let role: Role = self.role.parse().map_err(|_| {
            StoreError::new(anyhow::anyhow!("Corrupt role in membership row: {}", self.role))
        })?;
        Ok(WorkspaceMember {
            identity_id: self.identity_id,
            email: self.email,
            name: self.name,
            role,
            joined_at: self.joined_at,
        })
    }
}

#[async_trait]
impl WorkspaceStore for PgWorkspaceStore {
    async fn create(&self, workspace: &Workspace) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO workspaces (id, name, description, owner_id, invite_code, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(workspace.id)
        .bind(&workspace.name)
        .bind(&workspace.description)
        .bind(workspace.owner_id)
        .bind(&workspace.invite_code)
        .bind(workspace.created_at)
        .bind(workspace.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM workspaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.is_some())
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Workspace>, StoreError> {
        sqlx::query_as::<_, Workspace>(
            "SELECT id, name, description, owner_id, invite_code, created_at, updated_at \
             FROM workspaces WHERE invite_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::new)
    }

    async fn role_of(
        &self,
        identity_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Role>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT role FROM memberships WHERE identity_id = $1 AND workspace_id = $2",
        )
        .bind(identity_id)
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::new)?;

        match row {
            Some((role,)) => role
                .parse()
                .map(Some)
                .map_err(|_| StoreError::new(anyhow::anyhow!("Corrupt role: {role}"))),
            None => Ok(None),
        }
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError> {
        // Composite uniqueness on (workspace_id, identity_id); a duplicate
        // insert is a no-op that leaves the existing role untouched.
        let result = sqlx::query(
            "INSERT INTO memberships (workspace_id, identity_id, role, joined_at) \
             VALUES ($1, $2, $3, now()) \
             ON CONFLICT (workspace_id, identity_id) DO NOTHING",
        )
        .bind(workspace_id)
        .bind(identity_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_role(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE memberships SET role = $3 WHERE workspace_id = $1 AND identity_id = $2",
        )
        .bind(workspace_id)
        .bind(identity_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(result.rows_affected() > 0)
    }

    async fn members(&self, workspace_id: Uuid) -> Result<Vec<WorkspaceMember>, StoreError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            "SELECT m.identity_id, i.email, i.name, m.role, m.joined_at \
             FROM memberships m \
             JOIN identities i ON i.id = m.identity_id \
             WHERE m.workspace_id = $1 \
             ORDER BY m.joined_at",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::new)?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::new)?;

        sqlx::query("DELETE FROM memberships WHERE workspace_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::new)?;

        sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::new)?;

        tx.commit().await.map_err(StoreError::new)
    }
}
