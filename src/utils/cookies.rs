//! Credential cookies: the transport half of issuance and revocation.
//!
//! Three cookies make up the credential surface:
//!
//! - the opaque session token and the signed JWT, both `HttpOnly`;
//! - a derived display cookie (base64url JSON of {id, email, role hint}),
//!   readable by client scripts so the UI can render account state without
//!   an extra round trip. It carries nothing a script couldn't already get
//!   from an authenticated request.
//!
//! Revocation rebuilds each cookie with the *same* attribute set and a zero
//! max-age. Browsers match deletions on name + path + security attributes;
//! a deletion with mismatched attributes is silently ignored, which is how
//! "logged out but still logged in" bugs are born.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use data_encoding::BASE64URL_NOPAD;
use serde_json::json;
use time::Duration;

use taskhive_auth::issuer::IssuedCredentials;
use taskhive_config::{CookieConfig, JwtConfig, SessionConfig};
use taskhive_core::rbac::Role;
use taskhive_models::Identity;

fn same_site(config: &CookieConfig) -> SameSite {
    if config.allow_cross_site() {
        SameSite::None
    } else {
        SameSite::Strict
    }
}

fn build(
    name: &str,
    value: String,
    http_only: bool,
    max_age: Duration,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path(config.path.clone())
        .http_only(http_only)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(max_age)
        .build()
}

/// Encodes the client-readable display artifact.
fn display_value(identity: &Identity, role_hint: Option<Role>) -> String {
    let payload = json!({
        "id": identity.id,
        "email": identity.email,
        "role": role_hint,
    });
    BASE64URL_NOPAD.encode(payload.to_string().as_bytes())
}

/// Writes all three credential cookies for a freshly issued pair.
pub fn apply_credentials(
    jar: CookieJar,
    credentials: &IssuedCredentials,
    identity: &Identity,
    role_hint: Option<Role>,
    cookie_config: &CookieConfig,
    jwt_config: &JwtConfig,
    session_config: &SessionConfig,
) -> CookieJar {
    let token_age = Duration::seconds(jwt_config.token_ttl_secs);
    let session_age = Duration::seconds(session_config.session_ttl_secs);

    jar.add(build(
        &cookie_config.session_cookie,
        credentials.session_token.clone(),
        true,
        session_age,
        cookie_config,
    ))
    .add(build(
        &cookie_config.token_cookie,
        credentials.access_token.clone(),
        true,
        token_age,
        cookie_config,
    ))
    .add(build(
        &cookie_config.account_cookie,
        display_value(identity, role_hint),
        false,
        token_age,
        cookie_config,
    ))
}

/// Clears every credential cookie using attribute sets matching issuance.
/// Idempotent: clearing an already-clear jar is a no-op for the browser.
pub fn clear_credentials(jar: CookieJar, cookie_config: &CookieConfig) -> CookieJar {
    let cookies = [
        (cookie_config.session_cookie.clone(), true),
        (cookie_config.token_cookie.clone(), true),
        (cookie_config.account_cookie.clone(), false),
    ];

    cookies.into_iter().fold(jar, |jar, (name, http_only)| {
        jar.add(build(
            &name,
            String::new(),
            http_only,
            Duration::ZERO,
            cookie_config,
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cookie_config() -> CookieConfig {
        CookieConfig {
            session_cookie: "taskhive_session".to_string(),
            token_cookie: "taskhive_token".to_string(),
            account_cookie: "taskhive_account".to_string(),
            path: "/".to_string(),
            secure: false,
            cross_origin: false,
        }
    }

    fn test_jar() -> CookieJar {
        let config = test_cookie_config();
        let credentials = IssuedCredentials {
            session_token: "opaque-session".to_string(),
            access_token: "signed.jwt.token".to_string(),
        };
        let identity = Identity::new("ada@example.com", "Ada", None);
        apply_credentials(
            CookieJar::new(),
            &credentials,
            &identity,
            Some(Role::Owner),
            &config,
            &JwtConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                token_ttl_secs: 86_400,
            },
            &SessionConfig {
                session_ttl_secs: 86_400,
            },
        )
    }

    #[test]
    fn test_issuance_sets_three_cookies_with_distinct_exposure() {
        let jar = test_jar();

        let session = jar.get("taskhive_session").unwrap();
        let token = jar.get("taskhive_token").unwrap();
        let account = jar.get("taskhive_account").unwrap();

        assert_eq!(session.http_only(), Some(true));
        assert_eq!(token.http_only(), Some(true));
        assert_ne!(account.http_only(), Some(true));

        for cookie in [session, token, account] {
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        }
    }

    #[test]
    fn test_display_cookie_decodes_to_safe_fields_only() {
        let jar = test_jar();
        let account = jar.get("taskhive_account").unwrap();

        let decoded = BASE64URL_NOPAD.decode(account.value().as_bytes()).unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(payload["email"], "ada@example.com");
        assert_eq!(payload["role"], "OWNER");
        assert!(payload.get("password_hash").is_none());
    }

    #[test]
    fn test_clearing_matches_issuance_attributes() {
        let config = test_cookie_config();
        let jar = clear_credentials(test_jar(), &config);

        for (name, http_only) in [
            ("taskhive_session", Some(true)),
            ("taskhive_token", Some(true)),
            ("taskhive_account", Some(false)),
        ] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
            // Exposure mirrors issuance, HttpOnly pair vs readable display.
            assert_eq!(cookie.http_only(), http_only);
        }
    }

    #[test]
    fn test_cross_origin_secure_relaxes_same_site() {
        let config = CookieConfig {
            secure: true,
            cross_origin: true,
            ..test_cookie_config()
        };
        assert_eq!(same_site(&config), SameSite::None);

        let insecure = CookieConfig {
            secure: false,
            cross_origin: true,
            ..test_cookie_config()
        };
        assert_eq!(same_site(&insecure), SameSite::Strict);
    }
}
