use chrono::{ DateTime, Utc };
use serde::{ Serialize, Deserialize };

/// A named chat session grouping an ordered list of messages.
/// Immutable after creation; never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One turn in a conversation, authored either by the end user or by
/// the generated reply.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    pub conversation_id: String,
}

/// Category of a generated reply. `General` is a normal completion;
/// `Error` marks a degraded reply substituted after a Responder failure.
/// Serializes as the `aiType`/`aiData` pair the client renders from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "aiType", content = "aiData", rename_all = "lowercase")]
pub enum ResponseKind {
    General {},
    Error {},
}
