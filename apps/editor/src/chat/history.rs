use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::EditorError;
use crate::models::chat::ChatMessage;
use crate::models::resume::SuggestionState;

/// Append-only conversation log.
///
/// Turns are never reordered, rewritten or deduplicated. Accepting a turn's
/// suggestion is recorded beside the log so the turn itself stays as sent.
/// Rejection is not recorded here: it lives in the session's suppression set
/// and is undone by a reload.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    accepted: HashSet<Uuid>,
}

impl ChatHistory {
    pub fn push(&mut self, message: ChatMessage) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// What this log alone knows about a turn's suggestion: `Accepted` once
    /// accepted through the turn, else `Active`. `None` for turns without one.
    pub fn resolution(&self, id: Uuid) -> Option<SuggestionState> {
        self.get(id)?.suggestion.as_ref()?;
        if self.accepted.contains(&id) {
            Some(SuggestionState::Accepted)
        } else {
            Some(SuggestionState::Active)
        }
    }

    /// Fails unless the turn exists, carries a suggestion, and was not accepted.
    pub fn ensure_resolvable(&self, id: Uuid) -> Result<(), EditorError> {
        match self.resolution(id) {
            Some(SuggestionState::Active) => Ok(()),
            Some(state) => Err(EditorError::AlreadyResolved(format!(
                "Suggestion on message {id} is already {state:?}"
            ))),
            None if self.get(id).is_some() => Err(EditorError::NotFound(format!(
                "Message {id} carries no suggestion"
            ))),
            None => Err(EditorError::NotFound(format!("Message {id} not found"))),
        }
    }

    pub fn mark_accepted(&mut self, id: Uuid) -> Result<(), EditorError> {
        self.ensure_resolvable(id)?;
        self.accepted.insert(id);
        Ok(())
    }
}
