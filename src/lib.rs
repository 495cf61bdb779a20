pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, ChatSession, Credentials, NoopIndicator, Responder, SecretsLookup,
    WorkingIndicator, API_KEY_NAME,
};

pub use connector::{
    render_transcript, Container, ContainerConfig, PerplexityClient, SecretsFile,
    SpinnerIndicator, TerminalSurface,
};

pub use domain::{
    CompletionRequest, DomainError, PersonaConfig, PersonaKind, Reply, ReplyKind, Role,
    TranscriptEntry,
};
