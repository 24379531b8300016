use axum::{
    extract::{ Path, State },
    http::StatusCode,
    response::{ IntoResponse, Response },
    routing::get,
    Json,
    Router,
};
use log::info;
use serde::{ Deserialize, Serialize };
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{ Any, CorsLayer };

use crate::models::chat::{ Conversation, Message, ResponseKind };
use crate::orchestrator::{ Orchestrator, OrchestratorError };
use crate::store::ChatStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChatStore>,
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conversation not found")]
    ConversationNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::ConversationNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { message: self.to_string() })).into_response()
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(e: OrchestratorError) -> Self {
        match e {
            OrchestratorError::ConversationNotFound(_) => ApiError::ConversationNotFound,
            OrchestratorError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct CreateConversationRequest {
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostMessageRequest {
    content: String,
    // Schema-checked but not trusted: the inbound message is always
    // recorded as a user turn.
    #[allow(dead_code)]
    is_user: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageExchangeResponse {
    user_message: Message,
    bot_message: Message,
    #[serde(flatten)]
    kind: ResponseKind,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/conversations", get(list_conversations).post(create_conversation))
        .route("/conversations/{id}", get(get_conversation))
        .route("/conversations/{id}/messages", get(list_messages).post(post_message))
        .layer(cors)
        .with_state(state)
}

async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>
) -> Result<Json<Conversation>, ApiError> {
    let conversation = state.store
        .create_conversation(req.title).await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Created conversation {}", conversation.id);
    Ok(Json(conversation))
}

async fn list_conversations(
    State(state): State<AppState>
) -> Result<Json<Vec<Conversation>>, ApiError> {
    let conversations = state.store
        .list_conversations().await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(conversations))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<Conversation>, ApiError> {
    let conversation = state.store
        .conversation(&id).await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or(ApiError::ConversationNotFound)?;
    Ok(Json(conversation))
}

async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.store
        .list_messages(&id).await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(messages))
}

async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PostMessageRequest>
) -> Result<Json<MessageExchangeResponse>, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::Validation("Message content must not be empty".to_string()));
    }

    let exchange = state.orchestrator.handle_user_message(&id, &req.content).await?;

    Ok(Json(MessageExchangeResponse {
        user_message: exchange.user_message,
        bot_message: exchange.bot_message,
        kind: exchange.kind,
    }))
}
