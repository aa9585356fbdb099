//! Request-processing middleware.
//!
//! Authentication is a middleware layer rather than a per-handler extractor:
//! the resolver has to inspect two credential channels and, on an invalid
//! token, rewrite the response to clear both of them. Handlers behind the
//! layer receive the resolved identity through [`auth::CurrentIdentity`].

pub mod auth;
