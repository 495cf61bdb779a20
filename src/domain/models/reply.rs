/// Why the responder produced a given reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    Greeting,
    HowAreYou,
    Answer,
    /// Upstream answer replaced because it drifted off topic.
    Deflected,
    ConfigurationError,
    Failure,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Greeting => "greeting",
            ReplyKind::HowAreYou => "how_are_you",
            ReplyKind::Answer => "answer",
            ReplyKind::Deflected => "deflected",
            ReplyKind::ConfigurationError => "configuration_error",
            ReplyKind::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    kind: ReplyKind,
    text: String,
}

impl Reply {
    pub fn new(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> ReplyKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
