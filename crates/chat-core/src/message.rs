//! Message types for a single conversational turn.

use serde::{Deserialize, Serialize};

/// An inbound message from a user session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Session identifier. Each chat client supplies its own; per-session
    /// state (like the last discussed topic) is keyed on this.
    pub session: String,
    /// The raw message text.
    pub text: String,
    /// Unix timestamp in milliseconds, if the transport provides one.
    #[serde(default)]
    pub timestamp: u64,
}

impl InboundMessage {
    /// Create an inbound message for a session.
    pub fn new(session: impl Into<String>, text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            session: session.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// An outbound response to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// The response text, ready for display.
    pub text: String,
}

impl OutboundMessage {
    /// Create a response with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create a response replying to an inbound message.
    pub fn reply_to(_message: &InboundMessage, text: impl Into<String>) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_new() {
        let msg = InboundMessage::new("web", "hola", 123);
        assert_eq!(msg.session, "web");
        assert_eq!(msg.text, "hola");
        assert_eq!(msg.timestamp, 123);
    }

    #[test]
    fn test_reply_to() {
        let inbound = InboundMessage::new("web", "hola", 0);
        let reply = OutboundMessage::reply_to(&inbound, "buenas");
        assert_eq!(reply.text, "buenas");
    }
}
