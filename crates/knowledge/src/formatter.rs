//! Response presentation: headers, icons, truncation, not-found text.

use chat_core::{Answer, AnswerOrigin};

/// Marker appended when an answer is cut at the display limit.
const ELLIPSIS: &str = " […]";

/// Marker prepended when an answer was served from the local cache.
const MEMORY_TAG: &str = "🧠 (memoria)";

/// Marker prepended when an answer came from the web-search fallback.
const WEB_TAG: &str = "🔎 (búsqueda web)";

/// Coarse sub-classification of a knowledge question, used to pick the
/// header icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Date,
    Place,
    Person,
    Cause,
    Consequence,
    Description,
}

impl QuestionKind {
    /// Classify the raw (pre-normalization) question text.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();

        if lowered.contains("cuándo") || lowered.contains("cuando") || lowered.contains("fecha") {
            Self::Date
        } else if lowered.contains("dónde") || lowered.contains("donde") {
            Self::Place
        } else if lowered.contains("consecuencia") {
            Self::Consequence
        } else if lowered.contains("por qué") || lowered.contains("por que") || lowered.contains("causa") {
            Self::Cause
        } else if lowered.contains("quién") || lowered.contains("quien") {
            Self::Person
        } else {
            Self::Description
        }
    }

    /// Header icon for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Date => "📅",
            Self::Place => "📍",
            Self::Person => "👤",
            Self::Cause => "🧩",
            Self::Consequence => "🧭",
            Self::Description => "📖",
        }
    }
}

/// Pure presentation layer over fetched or cached answers.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    max_display_chars: usize,
}

impl ResponseFormatter {
    /// Create a formatter with the given display limit.
    pub fn new(max_display_chars: usize) -> Self {
        Self { max_display_chars }
    }

    /// Wrap an answer in its presentation template.
    ///
    /// The body is truncated at the configured limit with an ellipsis
    /// marker; origin and cache tags live in the header so the body stays a
    /// clean prefix of the original answer.
    pub fn format(&self, topic: &str, answer: &Answer, from_cache: bool, kind: QuestionKind) -> String {
        let mut out = String::new();

        if from_cache {
            out.push_str(MEMORY_TAG);
            out.push_str("\n\n");
        }
        if answer.origin == AnswerOrigin::WebSearch {
            out.push_str(WEB_TAG);
            out.push_str("\n\n");
        }

        out.push_str(kind.icon());
        out.push(' ');
        out.push_str(topic);
        out.push_str("\n\n");

        let (body, truncated) = truncate_chars(&answer.text, self.max_display_chars);
        out.push_str(&body);
        if truncated {
            out.push_str(ELLIPSIS);
        }

        out
    }

    /// Fixed not-found message with example topics.
    pub fn not_found(&self, topic: &str) -> String {
        format!(
            "No pude encontrar información clara sobre «{}».\n\n\
             Puedes intentar por ejemplo:\n\
             • imperio inca\n\
             • civilización maya\n\
             • imperio romano\n\
             • antiguo egipto",
            topic
        )
    }

    /// Message for questions that reduce to no topic at all.
    pub fn no_topic(&self) -> String {
        "¿Sobre qué tema te gustaría saber? Puedes preguntarme, por ejemplo, \
         por el imperio inca o el antiguo Egipto."
            .to_string()
    }
}

/// Cut `text` at `max_chars` characters, on a character boundary.
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (text[..idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Cut `input` at most `max_bytes` bytes, backing up to a char boundary.
pub(crate) fn truncate_utf8(input: &str, max_bytes: usize) -> String {
    if input.len() <= max_bytes {
        return input.to_string();
    }

    let mut idx = max_bytes;
    while idx > 0 && !input.is_char_boundary(idx) {
        idx -= 1;
    }

    input[..idx].to_string()
}
