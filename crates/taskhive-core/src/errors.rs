//! Application error taxonomy.
//!
//! Every fallible operation in the workspace returns [`AppError`]. The
//! variants map one-to-one onto HTTP statuses so handlers can bubble errors
//! with `?` and let axum render the response.
//!
//! Two deliberate collapses, made for enumeration resistance:
//!
//! - "not a member of this workspace" and "workspace does not exist" both
//!   surface as [`AppError::Unauthorized`] with identical bodies, so a caller
//!   probing workspace ids cannot tell the cases apart.
//! - every token verification failure (bad signature, expiry, wrong
//!   issuer/audience) is the same `Unauthorized`, never a reason code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Missing/invalid credential, non-membership, or insufficient permission.
    Unauthorized(String),
    /// Referenced entity genuinely absent; used only where no enumeration risk exists.
    NotFound(String),
    /// Duplicate unique key (e.g. re-registering an email).
    Conflict(String),
    /// Malformed request body or parameters.
    BadRequest(String),
    /// Failed field-level validation.
    Unprocessable(String),
    /// A backing store could not be reached; the transport layer may retry.
    Unavailable(String),
    /// Anything that should never happen in a correct deployment.
    Internal(anyhow::Error),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::BadRequest(msg)
            | Self::Unprocessable(msg)
            | Self::Unavailable(msg) => msg.clone(),
            // Internal details stay in the logs, not the response body.
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(err) => write!(f, "{err}"),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref err) = self {
            tracing::error!(error = %err, "Unhandled internal error");
        }

        let body = Json(json!({
            "error": self.message()
        }));

        (self.status(), body).into_response()
    }
}
