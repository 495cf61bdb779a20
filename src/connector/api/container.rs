use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::{ChatClient, ChatSession, Credentials, Responder, SecretsLookup};
use crate::connector::adapter::{PerplexityClient, SecretsFile, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::{PersonaConfig, PersonaKind};

pub struct ContainerConfig {
    pub persona: PersonaKind,
    /// TOML file consulted when `PERPLEXITY_API_KEY` is not set.
    pub secrets_file: PathBuf,
    /// Completion API base URL. `None` means `PERPLEXITY_BASE_URL` or the
    /// public endpoint.
    pub base_url: Option<String>,
    /// Request timeout. `None` means `PERPLEXITY_TIMEOUT_SECS` or 30 s.
    pub timeout_secs: Option<u64>,
    /// Explicit credential. `None` means read `PERPLEXITY_API_KEY`.
    pub api_key: Option<String>,
}

/// Wires the persona, completion client, and credential sources together and
/// hands out fresh chat sessions.
pub struct Container {
    persona: PersonaConfig,
    responder: Arc<Responder>,
    credentials: Credentials,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let persona = config.persona.config();
        info!("Using persona {} (model {})", config.persona, persona.model());

        let client = build_client(&config);
        let responder = Arc::new(Responder::new(persona.clone(), client));

        let secrets: Arc<dyn SecretsLookup> =
            Arc::new(SecretsFile::load_or_empty(&config.secrets_file));
        let credentials = match config.api_key.as_deref() {
            Some(key) => Credentials::new().with_explicit(key),
            None => Credentials::from_env(),
        }
        .with_secrets(secrets);

        if !credentials.is_configured() {
            warn!(
                "No API key found in environment or {}; questions will not reach the completion API",
                config.secrets_file.display()
            );
        }

        Self {
            persona,
            responder,
            credentials,
        }
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    pub fn responder(&self) -> Arc<Responder> {
        Arc::clone(&self.responder)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn new_session(&self) -> ChatSession {
        let session = ChatSession::new(self.responder(), self.credentials.clone());
        debug!("Started session {}", session.id());
        session
    }
}

fn build_client(config: &ContainerConfig) -> Arc<dyn ChatClient> {
    let base = config
        .base_url
        .clone()
        .or_else(|| std::env::var("PERPLEXITY_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout = config
        .timeout_secs
        .or_else(|| {
            std::env::var("PERPLEXITY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    debug!("Completion endpoint {} (timeout {}s)", base, timeout);
    Arc::new(PerplexityClient::new(base, Duration::from_secs(timeout)))
}
