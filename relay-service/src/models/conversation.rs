//! Chat payloads exchanged with the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Speaker of a conversation turn.
///
/// Roles the relay never produces itself (`system`, `tool`, ...) are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    #[serde(untagged)]
    Other(String),
}

/// One message in a conversation.
///
/// Keys beyond `role` and `content` are carried in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }
}

/// Ordered conversation turns, oldest first.
///
/// Owned by a single invocation; the relay only ever appends to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory(Vec<ChatTurn>);

impl ConversationHistory {
    pub fn new(turns: Vec<ChatTurn>) -> Self {
        Self(turns)
    }

    /// Append the user's message followed by the assistant's reply.
    pub fn push_exchange(&mut self, message: impl Into<String>, reply: impl Into<String>) {
        self.0.push(ChatTurn::user(message));
        self.0.push(ChatTurn::assistant(reply));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decoded event body.
///
/// Missing fields default: `message` to `""`, `conversationHistory` to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: ConversationHistory,
}

impl ChatRequest {
    /// Decode the raw event body. An absent body reads as `{}`.
    ///
    /// The body must be a JSON object; arrays and scalars are rejected rather
    /// than read positionally.
    pub fn from_event_body(body: Option<&str>) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(body.unwrap_or("{}"))?;
        serde_json::from_value(Value::Object(fields))
    }
}

/// Body returned to the caller on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub conversation_history: ConversationHistory,
}

impl ChatResponse {
    pub fn new(response: String, conversation_history: ConversationHistory) -> Self {
        Self {
            success: true,
            response,
            conversation_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_body_defaults_everything() {
        let request = ChatRequest::from_event_body(None).unwrap();
        assert_eq!(request.message, "");
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn missing_history_defaults_to_empty() {
        let request = ChatRequest::from_event_body(Some(r#"{"message":"hi"}"#)).unwrap();
        assert_eq!(request.message, "hi");
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn history_order_is_preserved() {
        let body = r#"{
            "message": "and then?",
            "conversationHistory": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "second"}
            ]
        }"#;
        let request = ChatRequest::from_event_body(Some(body)).unwrap();

        assert_eq!(
            request.conversation_history.turns(),
            &[ChatTurn::user("first"), ChatTurn::assistant("second")]
        );
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(ChatRequest::from_event_body(Some("{not json")).is_err());
        assert!(ChatRequest::from_event_body(Some("")).is_err());
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(ChatRequest::from_event_body(Some(r#"{"message": 42}"#)).is_err());
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(ChatRequest::from_event_body(Some(r#"["sneaky"]"#)).is_err());
        assert!(ChatRequest::from_event_body(Some(r#""hi""#)).is_err());
        assert!(ChatRequest::from_event_body(Some("null")).is_err());
    }

    #[test]
    fn unknown_role_passes_through() {
        let body = r#"{"conversationHistory": [{"role": "system", "content": "be nice"}]}"#;
        let request = ChatRequest::from_event_body(Some(body)).unwrap();

        let turn = &request.conversation_history.turns()[0];
        assert_eq!(turn.role, Role::Other("system".to_string()));
        assert_eq!(
            serde_json::to_string(turn).unwrap(),
            r#"{"role":"system","content":"be nice"}"#
        );
    }

    #[test]
    fn extra_turn_keys_are_kept() {
        let body = r#"{"conversationHistory": [{"role": "user", "content": "old", "ts": 1}]}"#;
        let mut request = ChatRequest::from_event_body(Some(body)).unwrap();
        request.conversation_history.push_exchange("new", "reply");

        assert_eq!(request.conversation_history.turns()[0].extra["ts"], 1);
        assert_eq!(
            serde_json::to_string(&request.conversation_history).unwrap(),
            r#"[{"role":"user","content":"old","ts":1},{"role":"user","content":"new"},{"role":"assistant","content":"reply"}]"#
        );
    }

    #[test]
    fn push_exchange_appends_user_then_assistant() {
        let mut history = ConversationHistory::new(vec![ChatTurn::user("a")]);
        history.push_exchange("b", "c");

        assert_eq!(
            history.turns(),
            &[
                ChatTurn::user("a"),
                ChatTurn::user("b"),
                ChatTurn::assistant("c")
            ]
        );
    }

    #[test]
    fn response_uses_camel_case_keys_in_order() {
        let mut history = ConversationHistory::default();
        history.push_exchange("hi", "hello");
        let body = serde_json::to_string(&ChatResponse::new("hello".to_string(), history)).unwrap();

        assert_eq!(
            body,
            r#"{"success":true,"response":"hello","conversationHistory":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#
        );
    }
}
