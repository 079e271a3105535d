use crate::core::config::CredentialConfig;
use crate::models::user::Role;
use crate::security::auth_gate::Caller;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, warn};

struct Credential {
    subject: String,
    token: String,
    roles: Vec<Role>,
}

/// Resolves bearer tokens to the role sets they assert
///
/// Tokens are issued elsewhere and provisioned through configuration; this
/// registry only checks what the caller presents against that list.
pub struct CredentialRegistry {
    credentials: Vec<Credential>,
}

impl CredentialRegistry {
    pub fn from_config(credentials: &[CredentialConfig]) -> Self {
        Self {
            credentials: credentials
                .iter()
                .map(|c| Credential {
                    subject: c.subject.clone(),
                    token: c.token.clone(),
                    roles: c.roles.clone(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Identify the caller from the `Authorization: Bearer <token>` header
    ///
    /// Missing, malformed and unknown credentials all resolve to `Anonymous`.
    pub fn identify(&self, headers: &HeaderMap) -> Caller {
        let Some(value) = headers.get(AUTHORIZATION) else {
            debug!("Request carries no credential");
            return Caller::Anonymous;
        };

        let Some(token) = value.to_str().ok().and_then(bearer_token) else {
            warn!("Malformed Authorization header");
            return Caller::Anonymous;
        };

        // Scan every entry so timing does not reveal which one matched
        let mut matched = None;
        for credential in &self.credentials {
            if tokens_match(token, &credential.token) {
                matched = Some(credential);
            }
        }

        match matched {
            Some(credential) => Caller::Authenticated {
                subject: credential.subject.clone(),
                roles: credential.roles.clone(),
            },
            None => {
                warn!("Unknown bearer token presented");
                Caller::Anonymous
            }
        }
    }
}

/// Token part of a `Bearer <token>` header value; the scheme is case-insensitive
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

/// Constant-time string comparison
fn tokens_match(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
