use std::sync::Arc;

use tracing::{info, warn};

use crate::backend_client::ResumeBackend;
use crate::errors::EditorError;
use crate::models::resume::ResumeDocument;
use crate::resume::validation::{validate_document, validate_resume_text};
use crate::suggestions::session::SharedSession;

/// Whole-document flows: load, parse, save. Each success reloads the mirror.
#[derive(Clone)]
pub struct ResumeService {
    backend: Arc<dyn ResumeBackend>,
    session: SharedSession,
}

impl ResumeService {
    pub fn new(backend: Arc<dyn ResumeBackend>, session: SharedSession) -> Self {
        Self { backend, session }
    }

    /// Loads the authoritative document. `Ok(None)` means no resume exists,
    /// in which case the mirror is cleared so no stale suggestions are served.
    pub async fn fetch_resume(&self) -> Result<Option<ResumeDocument>, EditorError> {
        let fetched = self.backend.fetch_resume().await.map_err(|e| {
            warn!("Fetching resume failed: {e}");
            EditorError::Transport(e.to_string())
        })?;

        match fetched {
            Some(resume) => {
                self.session.write().await.reload(resume.clone());
                Ok(Some(resume))
            }
            None => {
                info!("Backend holds no resume yet");
                self.session.write().await.clear_document();
                Ok(None)
            }
        }
    }

    /// Submits free-form text for structuring. Blank input never leaves the process.
    pub async fn parse_resume(&self, raw_text: &str) -> Result<ResumeDocument, EditorError> {
        let text = validate_resume_text(raw_text)?;

        info!("Submitting resume text for parsing ({} chars)", text.chars().count());
        let parsed = self.backend.parse_resume(text).await.map_err(|e| {
            if e.is_timeout() {
                warn!("Resume parsing timed out");
                return EditorError::ParseFailure("解析超时，请稍后重试".to_string());
            }
            warn!("Resume parsing failed: {e}");
            EditorError::ParseFailure(e.to_string())
        })?;

        let resume = parsed.resume.with_attached_suggestions(parsed.suggestions);
        self.session.write().await.reload(resume.clone());
        Ok(resume)
    }

    /// Pushes a whole document to the backend and reloads the mirror with it.
    pub async fn save_resume(&self, resume: ResumeDocument) -> Result<(), EditorError> {
        validate_document(&resume)?;

        self.backend.save_resume(&resume).await.map_err(|e| {
            warn!("Saving resume failed: {e}");
            EditorError::Transport(e.to_string())
        })?;
        self.session.write().await.reload(resume);
        info!("Resume saved");
        Ok(())
    }
}
