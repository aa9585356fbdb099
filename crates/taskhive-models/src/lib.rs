//! # Taskhive Models
//!
//! Domain records for the Taskhive API:
//!
//! - [`identity`]: user accounts and their external-provider links
//! - [`workspace`]: workspaces and the (identity, workspace, role) membership
//!   relation

pub mod identity;
pub mod workspace;

// Re-export commonly used types at crate root
pub use identity::{Identity, ProviderKind, ProviderLink};
pub use workspace::{Workspace, WorkspaceMember};
