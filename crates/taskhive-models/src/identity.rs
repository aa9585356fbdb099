//! User account records, independent of how they authenticate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A durable user account.
///
/// Identities are never hard-deleted; deactivation flips [`is_active`] and
/// every authentication path re-checks the flag. `password_hash` is absent
/// for provider-only accounts and never serialized into responses.
///
/// [`is_active`]: Identity::is_active
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    pub id: Uuid,
    /// Unique, stored lowercase.
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    /// The workspace the UI lands on; None for an identity with no memberships.
    pub current_workspace: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(email: &str, name: &str, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.trim().to_ascii_lowercase(),
            name: name.to_string(),
            password_hash,
            profile_picture: None,
            is_active: true,
            last_login: None,
            current_workspace: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// External identity providers a local account can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Email + password held by us.
    Local,
    Google,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Local => "local",
            ProviderKind::Google => "google",
        }
    }
}

/// Binds an [`Identity`] to exactly one (provider, subject) pair.
///
/// The subject is globally unique across all links. A single identity may
/// hold several links (local password plus Google, say). Immutable after
/// creation except for provider refresh-token rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderLink {
    pub id: Uuid,
    pub provider: ProviderKind,
    /// The provider's stable id for this account; the email for local links.
    pub subject: String,
    pub identity_id: Uuid,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProviderLink {
    pub fn new(provider: ProviderKind, subject: &str, identity_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            subject: subject.to_string(),
            identity_id,
            refresh_token: None,
            created_at: Utc::now(),
        }
    }
}
