//! Roles, permissions, and the permission guard.
//!
//! The role set and each role's permission list are closed and seeded at
//! compile time; nothing mutates them at runtime. `OWNER` is a superset of
//! `ADMIN`, which is a superset of `MEMBER`, but each list is enumerated
//! explicitly rather than derived, so a change to one role never silently
//! widens another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// An atomic, workspace-scoped capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    CreateWorkspace,
    DeleteWorkspace,
    EditWorkspace,
    ManageWorkspaceSettings,
    AddMember,
    ChangeMemberRole,
    RemoveMember,
    CreateProject,
    EditProject,
    DeleteProject,
    CreateTask,
    EditTask,
    DeleteTask,
    ViewOnly,
}

/// A named, fixed bundle of permissions held by a workspace member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::CreateWorkspace,
    Permission::DeleteWorkspace,
    Permission::EditWorkspace,
    Permission::ManageWorkspaceSettings,
    Permission::AddMember,
    Permission::ChangeMemberRole,
    Permission::RemoveMember,
    Permission::CreateProject,
    Permission::EditProject,
    Permission::DeleteProject,
    Permission::CreateTask,
    Permission::EditTask,
    Permission::DeleteTask,
    Permission::ViewOnly,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AddMember,
    Permission::CreateProject,
    Permission::EditProject,
    Permission::DeleteProject,
    Permission::CreateTask,
    Permission::EditTask,
    Permission::DeleteTask,
    Permission::ManageWorkspaceSettings,
    Permission::ViewOnly,
];

const MEMBER_PERMISSIONS: &[Permission] = &[
    Permission::ViewOnly,
    Permission::CreateTask,
    Permission::EditTask,
];

impl Role {
    /// The fixed permission list granted by this role.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Owner => OWNER_PERMISSIONS,
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Member => MEMBER_PERMISSIONS,
        }
    }

    /// Whether this role grants a single permission.
    pub fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Role::Owner),
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            other => Err(AppError::internal(anyhow::anyhow!(
                "Unrecognized role: {other}"
            ))),
        }
    }
}

/// Checks that `role` grants every permission in `required`.
///
/// Conjunctive: a single missing permission fails the whole check. The error
/// body never names the missing permission.
pub fn require_permissions(role: Role, required: &[Permission]) -> Result<(), AppError> {
    let granted = role.permissions();

    if required.iter().all(|p| granted.contains(p)) {
        Ok(())
    } else {
        Err(AppError::unauthorized(
            "You do not have permission to perform this action",
        ))
    }
}
