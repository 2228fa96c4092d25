use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Tone of a status message shown to the scout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Good,
    Bad,
}

/// Status envelope returned by the write path and by every failure.
///
/// Failures are reported in-body with `type: "bad"`; `err` carries a short
/// machine-readable label and never a raw storage error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiMessage {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub err: Option<Value>,
}

impl ApiMessage {
    pub fn good(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: MessageType::Good,
            err: None,
        }
    }

    pub fn bad(message: impl Into<String>, err: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            kind: MessageType::Bad,
            err: Some(err.into()),
        }
    }

    pub fn is_good(&self) -> bool {
        self.kind == MessageType::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_good_message_omits_err() {
        let value = serde_json::to_value(ApiMessage::good("Saved")).unwrap();
        assert_eq!(value, json!({ "message": "Saved", "type": "good" }));
    }

    #[test]
    fn test_bad_message_carries_err_label() {
        let value = serde_json::to_value(ApiMessage::bad("Nope", "unauthorized")).unwrap();
        assert_eq!(
            value,
            json!({ "message": "Nope", "type": "bad", "err": "unauthorized" })
        );
    }
}
