pub mod gemini;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::cli::Args;
use self::gemini::GeminiResponder;

/// Static instruction sent with every generation call. The Responder is
/// stateless across calls; no conversation history is forwarded.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful AI assistant in a chat application. Provide clear, concise, and helpful \
     responses to user questions. Be friendly and conversational while being informative. Keep \
     responses reasonably sized for a chat interface.";

/// External text-generation collaborator. Given a free-text prompt it
/// either produces non-empty generated text or fails.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn StdError + Send + Sync>>;
}

pub fn new_responder(args: &Args) -> Result<Arc<dyn Responder>, Box<dyn StdError + Send + Sync>> {
    let responder = GeminiResponder::new(
        args.gemini_api_key.clone(),
        args.chat_model.clone(),
        args.chat_base_url.clone(),
        args.responder_timeout_secs
    )?;
    Ok(Arc::new(responder))
}
