use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::backend_client::ResumeBackend;
use crate::chat::bridge::{self, ChatTurnView};
use crate::chat::prompts::{compose_user_content, CHAT_FAILURE_MESSAGE, CHAT_FAILURE_REPLY};
use crate::errors::EditorError;
use crate::models::chat::{ChatContext, ChatMessage, ChatRequest, Role, WireMessage};
use crate::models::resume::{ResumeDocument, Suggestion, SuggestionState};
use crate::suggestions::reconciler::SuggestionReconciler;
use crate::suggestions::session::SharedSession;

/// Drives the assistant conversation of the editing session.
#[derive(Clone)]
pub struct ChatService {
    backend: Arc<dyn ResumeBackend>,
    session: SharedSession,
    reconciler: SuggestionReconciler,
}

impl ChatService {
    pub fn new(
        backend: Arc<dyn ResumeBackend>,
        session: SharedSession,
        reconciler: SuggestionReconciler,
    ) -> Self {
        Self {
            backend,
            session,
            reconciler,
        }
    }

    /// Appends the user turn, asks the backend, appends the assistant turn.
    ///
    /// Every backend failure is reported as the same generic transport error
    /// and leaves an apology turn in the history; the resume mirror and the
    /// suppression set are not touched.
    pub async fn send_message(
        &self,
        message: &str,
        referenced_content: Option<&str>,
    ) -> Result<ChatMessage, EditorError> {
        if message.trim().is_empty() {
            return Err(EditorError::Validation("消息内容不能为空".to_string()));
        }

        let content = compose_user_content(message, referenced_content);
        self.session
            .write()
            .await
            .chat_mut()
            .push(ChatMessage::user(content.clone()));

        let request = ChatRequest {
            messages: vec![WireMessage {
                role: Role::User,
                content,
            }],
            context: ChatContext {
                referenced_content: referenced_content.map(String::from),
            },
        };

        match self.backend.send_chat(&request).await {
            Ok(reply) => {
                let mut session = self.session.write().await;
                let suggestion = bridge::suggestion_from_reply(&reply, session.document());
                let turn = ChatMessage::assistant(reply.reply, suggestion);
                session.chat_mut().push(turn.clone());
                info!(
                    "Chat reply received (suggestion attached: {}, {} turns)",
                    turn.suggestion.is_some(),
                    session.chat().len()
                );
                Ok(turn)
            }
            Err(e) => {
                warn!("Chat request failed: {e}");
                self.session
                    .write()
                    .await
                    .chat_mut()
                    .push(ChatMessage::assistant(CHAT_FAILURE_REPLY, None));
                Err(EditorError::Transport(CHAT_FAILURE_MESSAGE.to_string()))
            }
        }
    }

    /// The turn's suggestion, provided its card is still `Active` under the
    /// same rules that govern embedded suggestions.
    async fn resolvable_suggestion(&self, id: Uuid) -> Result<Suggestion, EditorError> {
        let session = self.session.read().await;
        session.chat().ensure_resolvable(id)?;
        let turn = session
            .chat()
            .get(id)
            .ok_or_else(|| EditorError::NotFound(format!("Message {id} not found")))?;
        match bridge::effective_state(turn, session.chat(), session.store()) {
            Some(SuggestionState::Active) => {}
            Some(state) => {
                return Err(EditorError::AlreadyResolved(format!(
                    "Suggestion on message {id} is already {state:?}"
                )))
            }
            None => {
                return Err(EditorError::NotFound(format!(
                    "Message {id} carries no suggestion"
                )))
            }
        }
        bridge::extract_suggestion(turn)
            .ok_or_else(|| EditorError::NotFound(format!("Message {id} carries no suggestion")))
    }

    /// Accepts the suggestion carried by chat turn `id` through the reconciler.
    pub async fn accept_turn(&self, id: Uuid) -> Result<ResumeDocument, EditorError> {
        let suggestion = self.resolvable_suggestion(id).await?;
        let updated = self
            .reconciler
            .accept(&suggestion.field, &suggestion.suggested)
            .await?;
        if let Err(e) = self.session.write().await.chat_mut().mark_accepted(id) {
            // A concurrent accept of the same turn got there first.
            warn!("Chat suggestion {id} resolved concurrently: {e}");
        }
        Ok(updated)
    }

    /// Rejects the suggestion carried by chat turn `id`; local only and,
    /// like any rejection, undone by the next reload.
    pub async fn reject_turn(&self, id: Uuid) -> Result<(), EditorError> {
        let suggestion = self.resolvable_suggestion(id).await?;
        self.reconciler.reject(suggestion.field).await;
        Ok(())
    }

    pub async fn history(&self) -> Vec<ChatTurnView> {
        let session = self.session.read().await;
        bridge::turn_views(session.chat(), session.store())
    }
}
