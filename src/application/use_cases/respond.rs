use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::{ChatClient, Credentials};
use crate::domain::utterance::{self, SmallTalk};
use crate::domain::{CompletionRequest, PersonaConfig, Reply, ReplyKind};

/// Answers one utterance for a persona.
///
/// Small talk is served from the phrase table without touching the network.
/// Everything else is forwarded to the [`ChatClient`] with the site-search
/// instruction, and the answer is screened against the off-topic terms.
/// Failures never escape: they are logged and replaced with the persona's
/// apology text.
pub struct Responder {
    persona: PersonaConfig,
    client: Arc<dyn ChatClient>,
}

impl Responder {
    pub fn new(persona: PersonaConfig, client: Arc<dyn ChatClient>) -> Self {
        Self { persona, client }
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    /// Returns the text to show the user for `utterance`.
    pub async fn respond(&self, utterance: &str, credentials: &Credentials) -> String {
        self.reply(utterance, credentials).await.into_text()
    }

    pub async fn reply(&self, utterance: &str, credentials: &Credentials) -> Reply {
        match utterance::classify(utterance) {
            Some(SmallTalk::Greeting) => {
                return Reply::new(ReplyKind::Greeting, self.persona.greeting_reply());
            }
            Some(SmallTalk::HowAreYou) => {
                return Reply::new(ReplyKind::HowAreYou, self.persona.how_are_you_reply());
            }
            None => {}
        }

        let credential = match credentials.resolve() {
            Ok(c) => c,
            Err(e) => {
                warn!("Responder: {e}");
                return Reply::new(
                    ReplyKind::ConfigurationError,
                    self.persona.credential_error_reply(),
                );
            }
        };

        let request = CompletionRequest::new(
            self.persona.model(),
            self.persona.system_prompt(),
            utterance::search_prompt(utterance),
        );

        debug!("Responder: forwarding to model {}", request.model());

        match self.client.complete(&request, &credential).await {
            Ok(answer) => {
                if let Some(term) = utterance::off_topic_term(&answer) {
                    info!("Responder: answer mentioned '{term}', deflecting");
                    Reply::new(ReplyKind::Deflected, self.persona.deflection_reply())
                } else {
                    Reply::new(ReplyKind::Answer, answer)
                }
            }
            Err(e) => {
                error!("Responder: completion failed: {e}");
                Reply::new(ReplyKind::Failure, self.persona.generic_error_reply())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use secrecy::{ExposeSecret, SecretString};

    use super::*;
    use crate::domain::{DomainError, PersonaKind};

    /// Records every request and replays a canned outcome.
    struct ScriptedClient {
        outcome: fn() -> Result<String, DomainError>,
        calls: Mutex<Vec<(CompletionRequest, String)>>,
    }

    impl ScriptedClient {
        fn new(outcome: fn() -> Result<String, DomainError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(
            &self,
            request: &CompletionRequest,
            credential: &SecretString,
        ) -> Result<String, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((request.clone(), credential.expose_secret().clone()));
            (self.outcome)()
        }
    }

    fn keyed() -> Credentials {
        Credentials::new().with_explicit("test-key")
    }

    fn responder(client: Arc<ScriptedClient>) -> Responder {
        Responder::new(PersonaKind::Playful.config(), client)
    }

    #[tokio::test]
    async fn greeting_skips_the_network() {
        let client = ScriptedClient::new(|| Ok("unused".into()));
        let r = responder(client.clone());

        for input in ["Hey", "hello!", "  YO  ", "howdy?"] {
            let reply = r.reply(input, &keyed()).await;
            assert_eq!(reply.kind(), ReplyKind::Greeting);
            assert_eq!(reply.text(), r.persona().greeting_reply());
        }
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn how_are_you_skips_the_network() {
        let client = ScriptedClient::new(|| Ok("unused".into()));
        let r = responder(client.clone());

        assert_eq!(
            r.respond("what's up", &keyed()).await,
            r.persona().how_are_you_reply()
        );
        assert_eq!(
            r.respond("so, how are you doing today?", &keyed()).await,
            r.persona().how_are_you_reply()
        );
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn forwards_templated_prompt_with_persona_model() {
        let client = ScriptedClient::new(|| Ok("Clay pricing starts at...".into()));
        let r = responder(client.clone());

        let answer = r.respond("Tell me about pricing", &keyed()).await;
        assert_eq!(answer, "Clay pricing starts at...");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (request, key) = &calls[0];
        assert_eq!(request.model(), r.persona().model());
        assert_eq!(request.system(), r.persona().system_prompt());
        assert!(request.user().ends_with("answer: Tell me about pricing"));
        assert_eq!(request.max_tokens(), 1024);
        assert!((request.temperature() - 0.3).abs() < f32::EPSILON);
        assert_eq!(key, "test-key");
    }

    #[tokio::test]
    async fn off_topic_answer_is_deflected() {
        let client = ScriptedClient::new(|| Ok("Clay is great for Pottery classes".into()));
        let r = responder(client);

        let reply = r.reply("what is clay", &keyed()).await;
        assert_eq!(reply.kind(), ReplyKind::Deflected);
        assert_eq!(reply.text(), r.persona().deflection_reply());
    }

    #[tokio::test]
    async fn missing_credential_returns_configuration_apology() {
        let client = ScriptedClient::new(|| Ok("unused".into()));
        let r = responder(client.clone());

        let reply = r.reply("Tell me about pricing", &Credentials::new()).await;
        assert_eq!(reply.kind(), ReplyKind::ConfigurationError);
        assert_eq!(reply.text(), r.persona().credential_error_reply());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_returns_generic_apology() {
        let client = ScriptedClient::new(|| {
            Err(DomainError::upstream("API returned 500: internal stack trace"))
        });
        let r = responder(client);

        let reply = r.reply("Tell me about pricing", &keyed()).await;
        assert_eq!(reply.kind(), ReplyKind::Failure);
        assert_eq!(reply.text(), r.persona().generic_error_reply());
        assert!(!reply.text().contains("stack trace"));
    }

    #[tokio::test]
    async fn parse_failure_returns_generic_apology() {
        let client = ScriptedClient::new(|| Err(DomainError::parse("no choices")));
        let r = responder(client);

        assert_eq!(
            r.respond("integrations?", &keyed()).await,
            r.persona().generic_error_reply()
        );
    }
}
