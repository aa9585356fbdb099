//! # Taskhive API
//!
//! A multi-tenant project-management backend built with Rust, Axum, and
//! PostgreSQL. Workspaces contain members with roles; members create projects
//! and tasks. The heart of the service is the authorization and
//! hybrid-authentication subsystem:
//!
//! - **Hybrid authentication**: every protected request is resolved through
//!   a server-revocable session cookie first, falling back to a signed
//!   stateless token that is re-validated against the identity store.
//! - **Dual-channel issuance**: login mints both artifacts and writes them as
//!   cookies with distinct exposure (server-only session and token cookies,
//!   plus a client-readable display cookie).
//! - **Role-based authorization**: workspace-scoped operations resolve the
//!   caller's membership role and check it against a fixed permission table.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── taskhive-core     # error taxonomy, roles, permissions, guard
//! ├── taskhive-config   # env-driven configuration (JWT, session, cookies, CORS)
//! ├── taskhive-models   # Identity, ProviderLink, Workspace, Membership
//! ├── taskhive-auth     # claims, token codec, store traits, resolver, issuer
//! └── taskhive-db       # PostgreSQL store implementations
//! src/
//! ├── middleware/       # authentication gate + CurrentIdentity extractor
//! ├── modules/          # feature modules (auth, workspaces)
//! │   └── <module>/     # controller.rs, service.rs, model.rs, router.rs
//! ├── utils/            # password hashing, credential cookies
//! ├── router.rs         # route tree and layering
//! └── state.rs          # injected AppState (stores + config)
//! ```
//!
//! ## Authentication contract
//!
//! Three cookies are set on login and cleared together on logout with
//! identical attribute sets:
//!
//! | Cookie | Contents | Exposure |
//! |--------|----------|----------|
//! | session | opaque server-side token | HttpOnly |
//! | token | signed JWT (24h default) | HttpOnly |
//! | account | base64url {id, email, role hint} | client-readable |
//!
//! The role carried in the token is a display hint; authorization always
//! re-resolves the role from the membership store.

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use taskhive_auth;
pub use taskhive_config;
pub use taskhive_core;
pub use taskhive_models;
