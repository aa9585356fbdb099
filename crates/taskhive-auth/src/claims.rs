//! JWT claim structure for the stateless credential.

use serde::{Deserialize, Serialize};

use taskhive_core::rbac::Role;

/// Claims carried by the signed stateless token.
///
/// The role is a *hint* only: the role the identity held in its current
/// workspace at issuance time, carried for client display. Authorization
/// decisions always re-resolve the role from the membership store; a token
/// minted before a role change must not keep the old capabilities alive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id (subject claim).
    pub sub: String,
    /// Identity's email address.
    pub email: String,
    /// Role hint for UI state; never consulted by the permission guard.
    pub role: Option<Role>,
    /// Fixed issuer string, verified on decode.
    pub iss: String,
    /// Fixed audience string, verified on decode.
    pub aud: String,
    /// Expiration (Unix timestamp). Baked into the signature.
    pub exp: usize,
    /// Issued-at (Unix timestamp).
    pub iat: usize,
}
