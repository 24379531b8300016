pub mod api;

use log::info;
use std::error::Error;
use std::sync::Arc;

use crate::orchestrator::Orchestrator;
use crate::store::ChatStore;

pub struct Server {
    addr: String,
    store: Arc<dyn ChatStore>,
    orchestrator: Arc<Orchestrator>,
}

impl Server {
    pub fn new(
        addr: String,
        store: Arc<dyn ChatStore>,
        orchestrator: Arc<Orchestrator>
    ) -> Self {
        Self { addr, store, orchestrator }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = api::router(api::AppState {
            store: self.store.clone(),
            orchestrator: self.orchestrator.clone(),
        });

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("HTTP server listening on http://{}", self.addr);
        axum::serve(listener, app.into_make_service()).await?;

        Ok(())
    }
}
