//! Session - API credential held for the lifetime of the process

use std::fmt;
use tokio::sync::RwLock;

/// Opaque bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First ten characters followed by `*****`
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(10).collect();
        format!("{}*****", prefix)
    }

    /// TransIP access tokens are JWTs, which always start with `eyJ`
    pub fn looks_like_jwt(&self) -> bool {
        self.0.starts_with("eyJ")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.masked()).finish()
    }
}

/// Holds the configured credential and the validated token
///
/// Created once at startup and shared with the gateway. The token is only
/// set after the registry accepted it, and is never cleared.
#[derive(Debug)]
pub struct Session {
    credential: Option<SessionToken>,
    token: RwLock<Option<SessionToken>>,
}

impl Session {
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: credential.map(SessionToken::new),
            token: RwLock::new(None),
        }
    }

    /// The credential as configured, validated or not
    pub fn credential(&self) -> Option<&SessionToken> {
        self.credential.as_ref()
    }

    /// The validated token, if authentication has succeeded
    pub async fn token(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub(crate) async fn store(&self, token: SessionToken) {
        *self.token.write().await = Some(token);
    }
}
