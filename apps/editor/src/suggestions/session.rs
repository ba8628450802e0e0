use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::chat::bridge::CardPlacement;
use crate::chat::history::ChatHistory;
use crate::errors::EditorError;
use crate::models::resume::{ResumeDocument, Suggestion};
use crate::suggestions::document::SectionRef;
use crate::suggestions::field_path::FieldPath;
use crate::suggestions::store::SuggestionStore;

/// Shared handle to the single editing session.
pub type SharedSession = Arc<RwLock<EditorSession>>;

/// Visible suggestions of one section instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSuggestions {
    pub section: SectionRef,
    pub placement: CardPlacement,
    pub suggestions: Vec<Suggestion>,
}

/// The mirrored resume together with what the user should currently see of it.
#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub resume: ResumeDocument,
    pub suggestions: Vec<SectionSuggestions>,
    /// Fields whose suggestions are hidden until the next reload.
    pub suppressed: Vec<FieldPath>,
}

/// Client-side state of one editing session: the mirrored document, the
/// rejection suppression set and the chat history.
///
/// The document is only ever swapped whole; no partial patches are applied.
#[derive(Debug, Default)]
pub struct EditorSession {
    document: Option<ResumeDocument>,
    store: SuggestionStore,
    chat: ChatHistory,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn document(&self) -> Option<&ResumeDocument> {
        self.document.as_ref()
    }

    pub fn require_document(&self) -> Result<&ResumeDocument, EditorError> {
        self.document
            .as_ref()
            .ok_or_else(|| EditorError::NotFound("No resume loaded".to_string()))
    }

    /// Installs a freshly fetched or parsed document. Rejections and accepted
    /// fields do not survive; the chat log does.
    pub fn reload(&mut self, document: ResumeDocument) {
        self.document = Some(document);
        self.store.reset_suppressions();
        self.store.clear_accepted();
        info!("Resume mirror reloaded; suppressions reset");
    }

    /// Drops the mirror after the backend reported that no resume exists.
    pub fn clear_document(&mut self) {
        if self.document.take().is_some() {
            info!("Resume mirror cleared; backend holds no resume");
        }
        self.store.reset_suppressions();
        self.store.clear_accepted();
    }

    /// Installs the document returned by accepting `field`. Rejections stay.
    pub fn commit_accepted(&mut self, field: &FieldPath, document: ResumeDocument) {
        self.document = Some(document);
        self.store.record_accepted(field.clone());
    }

    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SuggestionStore {
        &mut self.store
    }

    pub fn chat(&self) -> &ChatHistory {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatHistory {
        &mut self.chat
    }

    pub fn visible_suggestions(&self, section: SectionRef) -> Result<Vec<Suggestion>, EditorError> {
        let raw = self
            .require_document()?
            .suggestions(section)
            .ok_or_else(|| EditorError::NotFound(format!("Section {section} not found")))?;
        Ok(self
            .store
            .visible_suggestions(raw)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Every section instance that currently has something to show.
    pub fn suggestion_view(&self) -> Result<Vec<SectionSuggestions>, EditorError> {
        let document = self.require_document()?;
        let mut view = Vec::new();
        for section in document.sections() {
            let suggestions = self.visible_suggestions(section)?;
            if !suggestions.is_empty() {
                view.push(SectionSuggestions {
                    section,
                    placement: CardPlacement::Inline,
                    suggestions,
                });
            }
        }
        Ok(view)
    }

    pub fn view(&self) -> Result<EditorView, EditorError> {
        Ok(EditorView {
            resume: self.require_document()?.clone(),
            suggestions: self.suggestion_view()?,
            suppressed: self.store.suppressed().into_iter().cloned().collect(),
        })
    }
}
