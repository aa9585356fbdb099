//! # Taskhive Config
//!
//! Configuration types for the Taskhive API.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`jwt`]: stateless-credential (JWT) configuration
//! - [`session`]: server-side session configuration
//! - [`cookie`]: credential cookie names and attribute policy
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use taskhive_config::{CookieConfig, CorsConfig, JwtConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! let cookie_config = CookieConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use session::SessionConfig;
