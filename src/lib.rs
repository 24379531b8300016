pub mod cli;
pub mod models;
pub mod orchestrator;
pub mod responder;
pub mod server;
pub mod store;

use cli::Args;
use log::info;
use orchestrator::Orchestrator;
use server::Server;
use std::error::Error;
use std::sync::Arc;
use store::{ ChatStore, MemoryStore };

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Responder Timeout: {}s", args.responder_timeout_secs);
    info!("Gemini API Key Configured: {}", args.gemini_api_key.as_deref().is_some_and(|k| !k.is_empty()));
    info!("-------------------------");

    let store: Arc<dyn ChatStore> = Arc::new(MemoryStore::new());
    let responder = responder::new_responder(&args)?;
    let orchestrator = Arc::new(Orchestrator::new(Arc::clone(&store), responder));

    let server = Server::new(args.server_addr.clone(), store, orchestrator);
    server.run().await
}
