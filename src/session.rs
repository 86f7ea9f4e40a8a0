//! Explicit credential context for calls to the matching service.
//!
//! The workflow never reads an ambient login; whoever builds a
//! `JobPostingWorkflow` hands it a `SessionProvider`.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no authenticated session for company '{owner_id}'")]
    NotAuthenticated { owner_id: String },
}

/// Bearer token. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn bearer_token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// The company acting and the token it acts with.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub owner_id: String,
    pub credential: Credential,
}

pub trait SessionProvider: Send + Sync {
    /// Owner the workflow posts jobs for.
    fn owner_id(&self) -> &str;

    /// Current session, or an error when nobody is signed in.
    fn current(&self) -> Result<AuthenticatedSession, SessionError>;
}

/// Session backed by a configured token.
#[derive(Debug, Clone)]
pub struct StaticSession {
    owner_id: String,
    token: Option<Credential>,
}

impl StaticSession {
    pub fn new(owner_id: impl Into<String>, token: Option<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            token: token.filter(|t| !t.trim().is_empty()).map(Credential::new),
        }
    }
}

impl SessionProvider for StaticSession {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn current(&self) -> Result<AuthenticatedSession, SessionError> {
        match &self.token {
            Some(credential) => Ok(AuthenticatedSession {
                owner_id: self.owner_id.clone(),
                credential: credential.clone(),
            }),
            None => Err(SessionError::NotAuthenticated {
                owner_id: self.owner_id.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_session_with_token() {
        let session = StaticSession::new("acme", Some("secret".to_string()));
        let current = session.current().unwrap();
        assert_eq!(current.owner_id, "acme");
        assert_eq!(current.credential.bearer_token(), "secret");
    }

    #[test]
    fn test_blank_token_is_not_authenticated() {
        let session = StaticSession::new("acme", Some("  ".to_string()));
        assert!(matches!(
            session.current(),
            Err(SessionError::NotAuthenticated { .. })
        ));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
    }
}
