use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::bridge::ChatTurnView;
use crate::errors::AppError;
use crate::models::resume::Suggestion;
use crate::state::AppState;
use crate::suggestions::session::EditorView;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSendRequest {
    pub message: String,
    #[serde(default)]
    pub referenced_content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub message_id: Uuid,
    pub reply: String,
    pub suggestion: Option<Suggestion>,
}

/// POST /api/chat
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<ChatSendResponse>, AppError> {
    let turn = state
        .chat
        .send_message(&req.message, req.referenced_content.as_deref())
        .await?;
    Ok(Json(ChatSendResponse {
        message_id: turn.id,
        reply: turn.content,
        suggestion: turn.suggestion,
    }))
}

/// GET /api/chat/history
pub async fn handle_history(State(state): State<AppState>) -> Json<Vec<ChatTurnView>> {
    Json(state.chat.history().await)
}

/// POST /api/chat/messages/:id/accept
pub async fn handle_accept_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorView>, AppError> {
    state.chat.accept_turn(id).await?;
    Ok(Json(state.session.read().await.view()?))
}

/// POST /api/chat/messages/:id/reject
pub async fn handle_reject_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorView>, AppError> {
    state.chat.reject_turn(id).await?;
    Ok(Json(state.session.read().await.view()?))
}
