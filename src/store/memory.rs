use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::chat::{ Conversation, Message };
use crate::store::{ ChatStore, StoreError };

/// Process-local store. State lives for the process lifetime only; losing
/// it on restart is the accepted storage policy.
pub struct MemoryStore {
    conversations: RwLock<HashMap<String, Conversation>>,
    // Append-only, so insertion order doubles as a stable tiebreak when
    // timestamps collide.
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            messages: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn create_conversation(
        &self,
        title: Option<String>
    ) -> Result<Conversation, StoreError> {
        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            title,
            created_at: Utc::now(),
        };
        let mut conversations = self.conversations.write().await;
        conversations.insert(conversation.id.clone(), conversation.clone());
        Ok(conversation)
    }

    async fn conversation(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.get(id).cloned())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, StoreError> {
        let conversations = self.conversations.read().await;
        let mut all: Vec<Conversation> = conversations.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn create_message(
        &self,
        content: &str,
        is_user: bool,
        conversation_id: &str
    ) -> Result<Message, StoreError> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            is_user,
            timestamp: Utc::now(),
            conversation_id: conversation_id.to_string(),
        };
        let mut messages = self.messages.write().await;
        messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.read().await;
        let mut matched: Vec<Message> = messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        matched.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(matched)
    }
}
