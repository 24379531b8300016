mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::{ Conversation, Message };

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A backing-store write or read failed. The in-memory store never
    /// produces this; a database-backed implementation would. Fatal to the
    /// one request that hit it, never to the process.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Repository for conversations and messages. Constructed explicitly and
/// handed to the server and orchestrator, so tests get a fresh instance.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Creates a conversation with a fresh unique id and current timestamp.
    async fn create_conversation(
        &self,
        title: Option<String>
    ) -> Result<Conversation, StoreError>;

    async fn conversation(&self, id: &str) -> Result<Option<Conversation>, StoreError>;

    /// All conversations, most recently created first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, StoreError>;

    /// Records a message with a fresh unique id and current timestamp.
    /// Does not check that `conversation_id` exists; that responsibility
    /// sits with the caller.
    async fn create_message(
        &self,
        content: &str,
        is_user: bool,
        conversation_id: &str
    ) -> Result<Message, StoreError>;

    /// Messages for one conversation, oldest first. Empty for unknown ids.
    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, StoreError>;
}
