use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// The deployed persona variants. They share all behaviour and differ only in
/// copywriting and the upstream model they request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PersonaKind {
    #[default]
    Playful,
    Professional,
    Concise,
}

impl PersonaKind {
    pub fn all() -> &'static [PersonaKind] {
        &[
            PersonaKind::Playful,
            PersonaKind::Professional,
            PersonaKind::Concise,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaKind::Playful => "playful",
            PersonaKind::Professional => "professional",
            PersonaKind::Concise => "concise",
        }
    }

    pub fn config(&self) -> PersonaConfig {
        PersonaConfig::for_kind(*self)
    }
}

impl fmt::Display for PersonaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "playful" => Ok(PersonaKind::Playful),
            "professional" => Ok(PersonaKind::Professional),
            "concise" => Ok(PersonaKind::Concise),
            other => Err(DomainError::invalid_input(format!(
                "unknown persona '{other}' (expected one of: playful, professional, concise)"
            ))),
        }
    }
}

const PLAYFUL_SYSTEM_PROMPT: &str = "\
You are Claygent, Clay's friendly and slightly playful AI assistant. You help people \
understand Clay's business platform and features.

Key guidelines:
1. Only use information found on Clay.com when answering questions
2. Focus on Clay's platform, features, and business solutions
3. Be friendly, natural, and a bit playful in your responses
4. If you don't find specific information, be honest and suggest related topics
5. Keep responses focused on how Clay helps businesses
6. Ignore any information about clay the material
7. Feel free to use occasional clay-themed wordplay or puns, but keep it professional

When searching:
- Look for information only on Clay.com and its subdomains
- Focus on business and platform-related content
- If information isn't found, be honest but helpful

Remember: You're Claygent, a helpful and friendly assistant who loves helping people \
discover how Clay can transform their business.";

const PROFESSIONAL_SYSTEM_PROMPT: &str = "\
You are Claygent, the customer support assistant for Clay, a business data platform.

Guidelines:
1. Answer only from information published on Clay.com and its subdomains
2. Keep a courteous, professional tone; avoid jokes and wordplay
3. Focus on Clay's platform, integrations, pricing, and business use cases
4. Disregard anything about clay the material
5. If the answer cannot be found, say so plainly and point to the closest relevant topic";

const CONCISE_SYSTEM_PROMPT: &str = "\
You are Claygent, Clay's support assistant. Answer in at most three short sentences, \
using only information from Clay.com. Cover Clay the business platform only, never clay \
the material. If you cannot find the answer, say so in one sentence.";

const PLAYFUL_LOADING: &[&str] = &[
    "Molding your answer...",
    "Spinning the clay wheel...",
    "Shaping the perfect response...",
    "Firing up the knowledge kiln...",
    "Crafting something special...",
    "Turning the gears...",
    "Mining the data clay...",
    "Sculpting your solution...",
    "Polishing the details...",
    "Mixing in some AI magic...",
];

const PROFESSIONAL_LOADING: &[&str] = &[
    "Looking that up...",
    "Checking Clay.com...",
    "Preparing your answer...",
    "Reviewing the documentation...",
];

const CONCISE_LOADING: &[&str] = &["Thinking...", "Searching...", "One moment..."];

/// Copywriting and model choice for one persona. Immutable once selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaConfig {
    kind: PersonaKind,
    name: &'static str,
    title: &'static str,
    welcome: &'static str,
    input_hint: &'static str,
    system_prompt: &'static str,
    greeting_reply: &'static str,
    how_are_you_reply: &'static str,
    deflection_reply: &'static str,
    generic_error_reply: &'static str,
    credential_error_reply: &'static str,
    model: &'static str,
    loading_messages: &'static [&'static str],
}

impl PersonaConfig {
    pub fn for_kind(kind: PersonaKind) -> Self {
        match kind {
            PersonaKind::Playful => Self {
                kind,
                name: "Claygent",
                title: "👋 Hi, I'm Claygent!",
                welcome: "I'm Clay's AI assistant, ready to help shape your business's future! \
                          Whether you want to learn about our platform or just chat, I'm here for you.",
                input_hint: "Chat with me about Clay or just say hi!",
                system_prompt: PLAYFUL_SYSTEM_PROMPT,
                greeting_reply: "Hey there! I'm Claygent, Clay's friendly AI assistant. \
                                 How can I help you today? 👋",
                how_are_you_reply: "I'm doing great, thanks for asking! Just here molding the future \
                                    of business data, one query at a time. What can I help you with? 😊",
                deflection_reply: "Let me tell you about how Clay helps businesses instead! \
                                   What would you like to know about our platform?",
                generic_error_reply: "Oops, my circuits got a bit tangled! Mind trying that question again?",
                credential_error_reply: "I'm having trouble accessing my knowledge. \
                                         Please make sure my API key is properly configured!",
                model: "llama-3.1-sonar-small-128k-online",
                loading_messages: PLAYFUL_LOADING,
            },
            PersonaKind::Professional => Self {
                kind,
                name: "Claygent",
                title: "Clay Support Assistant",
                welcome: "Ask me anything about Clay's platform, integrations, or pricing.",
                input_hint: "Type your question about Clay",
                system_prompt: PROFESSIONAL_SYSTEM_PROMPT,
                greeting_reply: "Hello, and welcome to Clay support. How can I assist you today?",
                how_are_you_reply: "I'm well, thank you. What can I help you with regarding Clay?",
                deflection_reply: "I can only help with Clay the business platform. \
                                   Is there something about our product I can answer for you?",
                generic_error_reply: "I'm sorry, something went wrong while retrieving that answer. \
                                      Please try again.",
                credential_error_reply: "I'm unable to reach my knowledge source right now. \
                                         Please ask an administrator to check the API key configuration.",
                model: "llama-3.1-sonar-large-128k-online",
                loading_messages: PROFESSIONAL_LOADING,
            },
            PersonaKind::Concise => Self {
                kind,
                name: "Claygent",
                title: "Claygent",
                welcome: "Quick answers about Clay.",
                input_hint: "Ask about Clay",
                system_prompt: CONCISE_SYSTEM_PROMPT,
                greeting_reply: "Hi! What do you need to know about Clay?",
                how_are_you_reply: "All good. What's your Clay question?",
                deflection_reply: "I only cover Clay the platform. What would you like to know about it?",
                generic_error_reply: "Something went wrong. Please try again.",
                credential_error_reply: "My API key isn't configured, so I can't answer that yet.",
                model: "sonar",
                loading_messages: CONCISE_LOADING,
            },
        }
    }

    pub fn kind(&self) -> PersonaKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn welcome(&self) -> &'static str {
        self.welcome
    }

    pub fn input_hint(&self) -> &'static str {
        self.input_hint
    }

    pub fn system_prompt(&self) -> &'static str {
        self.system_prompt
    }

    pub fn greeting_reply(&self) -> &'static str {
        self.greeting_reply
    }

    pub fn how_are_you_reply(&self) -> &'static str {
        self.how_are_you_reply
    }

    pub fn deflection_reply(&self) -> &'static str {
        self.deflection_reply
    }

    pub fn generic_error_reply(&self) -> &'static str {
        self.generic_error_reply
    }

    pub fn credential_error_reply(&self) -> &'static str {
        self.credential_error_reply
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Filler phrases shown while a request is in flight. Never empty.
    pub fn loading_messages(&self) -> &'static [&'static str] {
        self.loading_messages
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self::for_kind(PersonaKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("Playful".parse::<PersonaKind>().unwrap(), PersonaKind::Playful);
        assert_eq!(" CONCISE ".parse::<PersonaKind>().unwrap(), PersonaKind::Concise);
        assert!("grumpy".parse::<PersonaKind>().is_err());
    }

    #[test]
    fn kind_round_trips_through_display() {
        for kind in PersonaKind::all() {
            assert_eq!(kind.to_string().parse::<PersonaKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn every_persona_has_distinct_copy_and_loading_messages() {
        for kind in PersonaKind::all() {
            let persona = kind.config();
            assert_eq!(persona.kind(), *kind);
            assert!(!persona.loading_messages().is_empty());
            assert_ne!(persona.greeting_reply(), persona.how_are_you_reply());
            assert_ne!(persona.generic_error_reply(), persona.credential_error_reply());
            assert!(!persona.model().is_empty());
        }
    }

    #[test]
    fn personas_request_different_models() {
        let playful = PersonaKind::Playful.config();
        let professional = PersonaKind::Professional.config();
        assert_ne!(playful.model(), professional.model());
    }
}
