//! Workspaces and the membership relation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use taskhive_core::rbac::Role;

/// A tenant boundary. Every project, task, and membership is scoped to one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    /// Opaque code for join-by-invite; rotatable without touching memberships.
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(name: &str, description: Option<&str>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(str::to_string),
            owner_id,
            invite_code: Uuid::new_v4().simple().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One row of the (identity, workspace, role) relation, joined with the
/// member's display fields for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub identity_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workspace_has_invite_code() {
        let owner = Uuid::new_v4();
        let ws = Workspace::new("Acme", Some("the team"), owner);
        assert_eq!(ws.owner_id, owner);
        assert_eq!(ws.invite_code.len(), 32);
    }

    #[test]
    fn test_invite_codes_are_unique_per_workspace() {
        let owner = Uuid::new_v4();
        let a = Workspace::new("A", None, owner);
        let b = Workspace::new("B", None, owner);
        assert_ne!(a.invite_code, b.invite_code);
    }
}
