//! # Taskhive Core
//!
//! Core types for the Taskhive API.
//!
//! This crate provides the foundations shared by every other crate in the
//! workspace:
//!
//! - [`errors`]: the application error taxonomy with HTTP response conversion
//! - [`rbac`]: the closed role enumeration, the permission table, and the
//!   permission guard
//!
//! # Example
//!
//! ```ignore
//! use taskhive_core::errors::AppError;
//! use taskhive_core::rbac::{Permission, Role, require_permissions};
//!
//! let role = Role::Admin;
//! require_permissions(role, &[Permission::CreateProject])?;
//! ```

pub mod errors;
pub mod rbac;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use rbac::{Permission, Role, require_permissions};
