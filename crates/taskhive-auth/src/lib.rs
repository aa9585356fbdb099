//! # Taskhive Auth
//!
//! The authentication and authorization core of the Taskhive API.
//!
//! This crate is transport-agnostic: it knows nothing about HTTP. The axum
//! layer extracts the raw credential strings from the request and hands them
//! to [`resolver::resolve_identity`]; everything else here operates on plain
//! values and the collaborator traits in [`store`].
//!
//! # Modules
//!
//! - [`claims`]: JWT claim structure for the stateless credential
//! - [`jwt`]: token signing and verification bound to a fixed issuer/audience
//! - [`store`]: collaborator contracts (session store, identity store,
//!   workspace store)
//! - [`memory`]: in-memory store implementations for tests and local runs
//! - [`resolver`]: the hybrid (session-first, token-fallback) authentication
//!   state machine
//! - [`issuer`]: dual-channel credential issuance
//! - [`authorize`]: role resolution and the permission-guard composition
//!
//! # Authentication flow
//!
//! ```text
//! request credentials
//!     └─> resolve_identity          session cookie, then signed token
//!             └─> resolve_role      (identity, workspace) -> Role
//!                     └─> require_permissions   conjunctive guard
//! ```

pub mod authorize;
pub mod claims;
pub mod issuer;
pub mod jwt;
pub mod memory;
pub mod resolver;
pub mod store;

// Re-export commonly used types at crate root
pub use authorize::{AuthzError, authorize, resolve_role};
pub use claims::Claims;
pub use issuer::{IssuedCredentials, issue_credentials};
pub use jwt::{create_access_token, verify_token};
pub use resolver::{AuthChannel, AuthFailure, ResolvedIdentity, resolve_identity};
pub use store::{IdentityStore, SessionStore, StoreError, WorkspaceStore};
