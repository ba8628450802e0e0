pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume
        .route(
            "/api/resume",
            get(resume::handle_get_resume).post(resume::handle_save_resume),
        )
        .route("/api/parse_resume", post(resume::handle_parse_resume))
        // Suggestions
        .route(
            "/api/suggestions",
            get(suggestions::handle_visible_suggestions),
        )
        .route("/api/accept_suggestion", post(suggestions::handle_accept))
        .route("/api/reject_suggestion", post(suggestions::handle_reject))
        // Chat
        .route("/api/chat", post(chat::handle_send_message))
        .route("/api/chat/history", get(chat::handle_history))
        .route(
            "/api/chat/messages/:id/accept",
            post(chat::handle_accept_turn),
        )
        .route(
            "/api/chat/messages/:id/reject",
            post(chat::handle_reject_turn),
        )
        .with_state(state)
}
