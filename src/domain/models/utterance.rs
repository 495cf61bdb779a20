/// Casual greetings answered from the phrase table. Matched exactly against the
/// normalized utterance.
pub const GREETINGS: &[&str] = &["hi", "hello", "hey", "sup", "yo", "hiya", "howdy"];

/// "How are you" style small talk. Matched exactly against the normalized
/// utterance, or as a substring of the lowercased raw text. The substring leg
/// over-matches (e.g. "tell me whats up with billing") and is kept as-is.
pub const HOW_ARE_YOU: &[&str] = &[
    "how are you",
    "how you doing",
    "how are things",
    "whats up",
    "what's up",
    "how's it going",
    "hows it going",
];

/// Terms tied to the non-business meaning of the brand name. A completion that
/// mentions any of them is replaced with the persona's deflection reply.
pub const OFF_TOPIC_TERMS: &[&str] = &["pottery", "ceramic", "soil", "mineral", "earth"];

/// Instruction wrapped around every forwarded utterance.
pub const SEARCH_INSTRUCTION: &str =
    "Search specifically on Clay.com (the business platform website) and answer: ";

const STRIP_CHARS: &[char] = &['?', '!', '.', ' '];

/// What the phrase table makes of an utterance before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    HowAreYou,
}

/// Lowercase, trim, and strip surrounding `?!. ` characters.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase().trim_matches(STRIP_CHARS).to_string()
}

pub fn is_greeting(text: &str) -> bool {
    GREETINGS.contains(&normalize(text).as_str())
}

pub fn is_how_are_you(text: &str) -> bool {
    let normalized = normalize(text);
    if HOW_ARE_YOU.contains(&normalized.as_str()) {
        return true;
    }
    let lowered = text.to_lowercase();
    HOW_ARE_YOU.iter().any(|phrase| lowered.contains(phrase))
}

/// Greetings win over how-are-you phrases.
pub fn classify(text: &str) -> Option<SmallTalk> {
    if is_greeting(text) {
        Some(SmallTalk::Greeting)
    } else if is_how_are_you(text) {
        Some(SmallTalk::HowAreYou)
    } else {
        None
    }
}

pub fn search_prompt(utterance: &str) -> String {
    format!("{SEARCH_INSTRUCTION}{utterance}")
}

/// Returns the first off-topic term found in `answer`, case-insensitively.
pub fn off_topic_term(answer: &str) -> Option<&'static str> {
    let lowered = answer.to_lowercase();
    OFF_TOPIC_TERMS
        .iter()
        .copied()
        .find(|term| lowered.contains(term))
}
