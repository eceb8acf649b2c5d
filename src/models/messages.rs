use serde::{Deserialize, Serialize};

/// A document update as received on the wire.
///
/// Only `type` and `document_id` are interpreted; everything else the sender
/// included (payload, content, cursors, ...) is captured so the message can
/// be relayed verbatim.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateMessage {
    pub document_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inbound WebSocket messages, discriminated by the `type` field.
///
/// `document_update` is the only type that triggers relay behavior; anything
/// else is discarded silently.
#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "document_update")]
    DocumentUpdate(UpdateMessage),
    #[serde(other)]
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_update_is_parsed_with_its_extra_fields() {
        let raw = r#"{"type":"document_update","document_id":"D1","payload":"x"}"#;
        match serde_json::from_str::<InboundMessage>(raw) {
            Ok(InboundMessage::DocumentUpdate(update)) => {
                assert_eq!(update.document_id, "D1");
                assert_eq!(update.extra.get("payload").and_then(|v| v.as_str()), Some("x"));
            }
            other => panic!("expected a document update, got {:?}", other),
        }
    }

    #[test]
    fn unknown_types_map_to_unrecognized() {
        let raw = r#"{"type":"cursor_move","document_id":"D1"}"#;
        assert!(matches!(
            serde_json::from_str::<InboundMessage>(raw),
            Ok(InboundMessage::Unrecognized)
        ));
    }

    #[test]
    fn messages_without_a_type_fail_to_parse() {
        let raw = r#"{"document_id":"D1"}"#;
        assert!(serde_json::from_str::<InboundMessage>(raw).is_err());
    }
}
