use log::{ error, info };
use std::sync::Arc;
use thiserror::Error;

use crate::models::chat::{ Message, ResponseKind };
use crate::responder::Responder;
use crate::store::{ ChatStore, StoreError };

/// Fixed user-visible reply substituted when the Responder fails. The
/// failure degrades into conversational content; the transport layer never
/// sees it as an error.
const TECHNICAL_DIFFICULTY_REPLY: &str =
    "I'm experiencing some technical difficulties. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("conversation '{0}' not found")]
    ConversationNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one user turn: both persisted messages plus the reply category.
#[derive(Clone, Debug)]
pub struct ChatExchange {
    pub user_message: Message,
    pub bot_message: Message,
    pub kind: ResponseKind,
}

/// Pairs an inbound user message with a generated (or degraded) reply and
/// persists both under the same conversation.
pub struct Orchestrator {
    store: Arc<dyn ChatStore>,
    responder: Arc<dyn Responder>,
}

impl Orchestrator {
    pub fn new(store: Arc<dyn ChatStore>, responder: Arc<dyn Responder>) -> Self {
        Self { store, responder }
    }

    /// Persists `content` as a user message, asks the Responder for a reply,
    /// persists that reply as a bot message, and returns both.
    ///
    /// The conversation must already exist; messages are never written under
    /// an unknown conversation id. A single failed Responder call produces
    /// exactly one apology reply, persisted as a normal bot message. No
    /// retries, and no timeout beyond what the Responder itself enforces.
    pub async fn handle_user_message(
        &self,
        conversation_id: &str,
        content: &str
    ) -> Result<ChatExchange, OrchestratorError> {
        if self.store.conversation(conversation_id).await?.is_none() {
            return Err(OrchestratorError::ConversationNotFound(conversation_id.to_string()));
        }

        let user_message = self.store.create_message(content, true, conversation_id).await?;

        // The only suspension point of the request; no lock is held here,
        // so concurrent posts to one conversation may interleave.
        let (reply, kind) = match self.responder.generate(content).await {
            Ok(text) => {
                info!("Responder produced {} chars", text.len());
                (text, ResponseKind::General {})
            }
            Err(e) => {
                error!("Responder failure: {}", e);
                (TECHNICAL_DIFFICULTY_REPLY.to_string(), ResponseKind::Error {})
            }
        };

        let bot_message = self.store.create_message(&reply, false, conversation_id).await?;

        Ok(ChatExchange { user_message, bot_message, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::error::Error as StdError;

    struct ScriptedResponder {
        reply: Result<String, String>,
    }

    impl ScriptedResponder {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()) })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(message.to_string()) })
        }
    }

    #[async_trait]
    impl Responder for ScriptedResponder {
        async fn generate(&self, _prompt: &str) -> Result<String, Box<dyn StdError + Send + Sync>> {
            self.reply.clone().map_err(Into::into)
        }
    }

    fn orchestrator_with(
        responder: Arc<dyn Responder>
    ) -> (Arc<MemoryStore>, Orchestrator) {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = Orchestrator::new(store.clone(), responder);
        (store, orchestrator)
    }

    #[tokio::test]
    async fn round_trip_persists_user_message_verbatim() {
        let (store, orchestrator) = orchestrator_with(ScriptedResponder::ok("4"));
        let conv = store.create_conversation(None).await.unwrap();

        let exchange = orchestrator.handle_user_message(&conv.id, "2+2").await.unwrap();

        assert_eq!(exchange.user_message.content, "2+2");
        assert!(exchange.user_message.is_user);
        assert!(!exchange.bot_message.content.is_empty());
        assert_eq!(exchange.kind, ResponseKind::General {});
    }

    #[tokio::test]
    async fn responder_failure_degrades_into_apology() {
        let (store, orchestrator) = orchestrator_with(ScriptedResponder::failing("quota exceeded"));
        let conv = store.create_conversation(None).await.unwrap();

        let exchange = orchestrator.handle_user_message(&conv.id, "Hello").await.unwrap();

        assert_eq!(exchange.bot_message.content, TECHNICAL_DIFFICULTY_REPLY);
        assert!(!exchange.bot_message.is_user);
        assert_eq!(exchange.kind, ResponseKind::Error {});

        // The user message is persisted even though the Responder failed.
        let messages = store.list_messages(&conv.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello");
        assert!(messages[0].is_user);
    }

    #[tokio::test]
    async fn hello_scenario_yields_ordered_transcript() {
        let (store, orchestrator) = orchestrator_with(ScriptedResponder::ok("Hi there!"));
        let conv = store.create_conversation(Some("greeting".into())).await.unwrap();

        orchestrator.handle_user_message(&conv.id, "Hello").await.unwrap();

        let messages = store.list_messages(&conv.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_user);
        assert_eq!(messages[0].content, "Hello");
        assert!(!messages[1].is_user);
        assert_eq!(messages[1].content, "Hi there!");
        assert!(messages[0].timestamp <= messages[1].timestamp);
    }

    #[tokio::test]
    async fn unknown_conversation_writes_nothing() {
        let (store, orchestrator) = orchestrator_with(ScriptedResponder::ok("hi"));

        let err = orchestrator.handle_user_message("missing", "Hello").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::ConversationNotFound(_)));
        assert!(store.list_messages("missing").await.unwrap().is_empty());
    }
}
