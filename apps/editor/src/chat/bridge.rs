//! Maps suggestions carried by chat turns onto the same field-path scheme as
//! document-embedded ones.
//!
//! The bridge never special-cases paths. A chat-borne suggestion is accepted
//! or rejected through `SuggestionReconciler` exactly like an embedded one;
//! the bridge only decides what the turn's suggestion card shows.

use serde::Serialize;
use tracing::debug;

use crate::chat::history::ChatHistory;
use crate::models::chat::{ChatMessage, ChatReply};
use crate::models::resume::{ResumeDocument, Suggestion, SuggestionState};
use crate::suggestions::store::SuggestionStore;

const SUGGEST_UPDATE: &str = "suggest_update";

/// Where a suggestion card renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPlacement {
    /// Inside the resume section that owns the field.
    Inline,
    /// Attached to the chat turn that produced it.
    ChatBubble,
}

/// A chat turn as shown to the user: the turn plus the state of its card.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurnView {
    #[serde(flatten)]
    pub message: ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<CardPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_state: Option<SuggestionState>,
}

/// The suggestion attached to a turn, if any. A turn carries at most one.
pub fn extract_suggestion(turn: &ChatMessage) -> Option<Suggestion> {
    turn.suggestion.clone()
}

/// Card placement for a chat turn. Turns without a suggestion render no card.
pub fn placement(turn: &ChatMessage) -> Option<CardPlacement> {
    turn.suggestion.as_ref().map(|_| CardPlacement::ChatBubble)
}

/// Normalises a backend chat reply into at most one suggestion.
///
/// An explicit `suggestion` wins. Otherwise a `suggest_update` action is
/// lifted into a suggestion whose `current` is read from the mirror.
pub fn suggestion_from_reply(
    reply: &ChatReply,
    document: Option<&ResumeDocument>,
) -> Option<Suggestion> {
    if let Some(suggestion) = &reply.suggestion {
        return Some(suggestion.clone());
    }

    let action = reply.action.as_ref().filter(|a| a.kind == SUGGEST_UPDATE)?;
    let field = action.field.clone()?;
    let suggested = action.suggested.clone()?;
    let current = document
        .and_then(|doc| doc.get(&field).ok())
        .unwrap_or_default();
    debug!("Lifted suggest_update action for {field} into a suggestion");

    Some(Suggestion {
        field,
        current,
        suggested,
        reason: String::new(),
    })
}

/// Card state of a turn, read the same way as for an embedded suggestion:
/// `Accepted` if the turn itself or its field was accepted this session,
/// `Rejected` while the field is suppressed, else `Active`.
pub fn effective_state(
    turn: &ChatMessage,
    history: &ChatHistory,
    store: &SuggestionStore,
) -> Option<SuggestionState> {
    let suggestion = turn.suggestion.as_ref()?;
    match history.resolution(turn.id) {
        Some(state) if state.is_resolved() => Some(state),
        _ if store.is_accepted(&suggestion.field) => Some(SuggestionState::Accepted),
        _ if store.is_suppressed(&suggestion.field) => Some(SuggestionState::Rejected),
        _ => Some(SuggestionState::Active),
    }
}

pub fn turn_views(history: &ChatHistory, store: &SuggestionStore) -> Vec<ChatTurnView> {
    history
        .messages()
        .iter()
        .map(|turn| ChatTurnView {
            message: turn.clone(),
            placement: placement(turn),
            suggestion_state: effective_state(turn, history, store),
        })
        .collect()
}
