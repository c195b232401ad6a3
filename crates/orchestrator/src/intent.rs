//! Intent classification for inbound messages.
//!
//! Classification is ordered substring matching over the lowercased text:
//! the first matching rule wins, so more specific intents must be checked
//! before broader ones.

/// What the user is trying to do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "hola", "buenas", "hey".
    Greeting,
    /// "me llamo <nombre>".
    IntroduceName,
    /// "me gusta <tema>".
    StatePreference,
    /// "resolver ..." / "calcular ..." / "cuánto es ...".
    Arithmetic,
    /// A question about some topic.
    KnowledgeQuery,
    /// Anything we cannot place.
    Other,
}

/// Triggers that mark a message as a knowledge question.
const KNOWLEDGE_MARKERS: &[&str] = &[
    "háblame",
    "hablame",
    "cuéntame",
    "cuentame",
    "qué sabes",
    "que sabes",
    "qué es",
    "que es",
    "quién",
    "quien",
    "cuándo",
    "cuando",
    "dónde",
    "donde",
    "por qué",
    "por que",
    "historia",
    "imperio",
    "civilización",
    "civilizacion",
    "inca",
    "maya",
    "romano",
    "egipto",
    "grecia",
    "griego",
    "azteca",
    "revolución",
    "revolucion",
    "guerra",
    "consecuencia",
    "causa",
];

impl Intent {
    /// Classify a raw message.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();

        if lowered.contains("hola") || lowered.contains("buenas") || lowered.contains("hey") {
            return Self::Greeting;
        }
        if lowered.contains("me llamo") {
            return Self::IntroduceName;
        }
        if lowered.contains("me gusta") {
            return Self::StatePreference;
        }
        if lowered.contains("resolver")
            || lowered.contains("calcular")
            || lowered.contains("cuánto es")
            || lowered.contains("cuanto es")
        {
            return Self::Arithmetic;
        }
        if KNOWLEDGE_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Self::KnowledgeQuery;
        }

        Self::Other
    }
}
