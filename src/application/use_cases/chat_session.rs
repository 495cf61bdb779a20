use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::application::{Credentials, Responder, WorkingIndicator};
use crate::domain::TranscriptEntry;

const FALLBACK_LOADING: &str = "Working...";

/// One interactive conversation: an append-only transcript plus the
/// credentials it answers with.
///
/// Each submitted utterance yields exactly one user entry followed by exactly
/// one assistant entry. Entries are never edited or removed.
pub struct ChatSession {
    id: Uuid,
    responder: Arc<Responder>,
    credentials: Credentials,
    transcript: Vec<TranscriptEntry>,
}

impl ChatSession {
    pub fn new(responder: Arc<Responder>, credentials: Credentials) -> Self {
        Self {
            id: Uuid::new_v4(),
            responder,
            credentials,
            transcript: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.iter().filter(|e| e.is_user()).count()
    }

    /// Runs one turn. Blank input is ignored and returns `None`; otherwise both
    /// entries are appended and the new assistant entry is returned.
    pub async fn submit(
        &mut self,
        utterance: &str,
        indicator: &dyn WorkingIndicator,
    ) -> Option<&TranscriptEntry> {
        let utterance = utterance.trim_end_matches(['\r', '\n']);
        if utterance.trim().is_empty() {
            return None;
        }

        self.transcript.push(TranscriptEntry::user(utterance));

        indicator.start(self.loading_message());
        let span = info_span!("turn", session = %self.id, turn = self.turn_count());
        let reply = self
            .responder
            .reply(utterance, &self.credentials)
            .instrument(span)
            .await;
        indicator.finish();

        debug!("ChatSession {}: reply kind {}", self.id, reply.kind().as_str());
        self.transcript
            .push(TranscriptEntry::assistant(reply.into_text()));
        self.transcript.last()
    }

    fn loading_message(&self) -> &'static str {
        self.responder
            .persona()
            .loading_messages()
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_LOADING)
    }
}
