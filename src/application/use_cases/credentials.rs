use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::application::SecretsLookup;
use crate::domain::DomainError;

/// Environment variable and secrets key holding the completion API token.
pub const API_KEY_NAME: &str = "PERPLEXITY_API_KEY";

/// Where a session gets its bearer token from.
///
/// An explicitly configured credential wins; otherwise the secrets lookup is
/// consulted under [`API_KEY_NAME`]. Empty values count as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    explicit: Option<SecretString>,
    secrets: Option<Arc<dyn SecretsLookup>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_explicit(mut self, credential: impl Into<String>) -> Self {
        self.explicit = Some(SecretString::new(credential.into()));
        self
    }

    pub fn with_secrets(mut self, secrets: Arc<dyn SecretsLookup>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Reads [`API_KEY_NAME`] from the process environment.
    pub fn from_env() -> Self {
        match std::env::var(API_KEY_NAME) {
            Ok(key) => Self::new().with_explicit(key),
            Err(_) => Self::new(),
        }
    }

    pub fn resolve(&self) -> Result<SecretString, DomainError> {
        if let Some(key) = self.explicit.as_ref().filter(|k| !is_blank(k)) {
            return Ok(key.clone());
        }

        if let Some(key) = self
            .secrets
            .as_ref()
            .and_then(|s| s.get(API_KEY_NAME))
            .filter(|k| !is_blank(k))
        {
            return Ok(key);
        }

        Err(DomainError::configuration(format!(
            "no {API_KEY_NAME} found in environment or secrets"
        )))
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_ok()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("explicit", &self.explicit.is_some())
            .field("secrets", &self.secrets.is_some())
            .finish()
    }
}

fn is_blank(key: &SecretString) -> bool {
    key.expose_secret().trim().is_empty()
}
