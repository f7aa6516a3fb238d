//! Conversion of A2A messages into the flat form agents consume

use crate::{agent::AgentMessage, protocol::message::Message};

/// Normalize one message into `{role, content}`
pub fn normalize_message(message: &Message) -> AgentMessage {
    AgentMessage {
        role: message.role.as_str().to_string(),
        content: message.content(),
    }
}

/// Normalize every message, preserving order
pub fn normalize(messages: &[Message]) -> Vec<AgentMessage> {
    messages.iter().map(normalize_message).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_mixed_parts() {
        let message: Message = serde_json::from_value(json!({
            "parts": [
                {"kind": "text", "text": "hi"},
                {"kind": "data", "data": {"a": 1}}
            ]
        }))
        .unwrap();

        let normalized = normalize_message(&message);
        assert_eq!(normalized, AgentMessage::new("user", "hi\n{\"a\":1}"));
    }

    #[test]
    fn test_normalize_preserves_order_and_roles() {
        let messages: Vec<Message> = serde_json::from_value(json!([
            {"role": "user", "parts": [{"kind": "text", "text": "one"}]},
            {"role": "agent", "parts": [{"kind": "text", "text": "two"}]},
            {"role": "user", "parts": "not-a-list"}
        ]))
        .unwrap();

        let normalized = normalize(&messages);
        assert_eq!(
            normalized,
            vec![
                AgentMessage::new("user", "one"),
                AgentMessage::new("agent", "two"),
                AgentMessage::new("user", ""),
            ]
        );
    }
}
