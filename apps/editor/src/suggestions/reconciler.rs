use std::sync::Arc;

use tracing::{error, info, warn};

use crate::backend_client::ResumeBackend;
use crate::errors::EditorError;
use crate::models::resume::ResumeDocument;
use crate::suggestions::field_path::FieldPath;
use crate::suggestions::session::SharedSession;

/// Resolves suggestions: accept commits through the backend, reject only
/// hides locally.
///
/// The session lock is never held across a backend call. Two accepts racing
/// for the same field both reach the backend; the last response installed wins.
#[derive(Clone)]
pub struct SuggestionReconciler {
    backend: Arc<dyn ResumeBackend>,
    session: SharedSession,
}

impl SuggestionReconciler {
    pub fn new(backend: Arc<dyn ResumeBackend>, session: SharedSession) -> Self {
        Self { backend, session }
    }

    /// Sends `(field, suggested)` to the backend and installs the document it
    /// returns. Nothing is applied locally before the backend answers, and
    /// nothing changes if it fails.
    pub async fn accept(
        &self,
        field: &FieldPath,
        suggested: &str,
    ) -> Result<ResumeDocument, EditorError> {
        {
            let session = self.session.read().await;
            if let Err(e) = session.require_document()?.get(field) {
                error!("Accept targets a path absent from the mirrored resume: {e}");
                return Err(e);
            }
        }

        info!("Accepting suggestion for field: {field}");
        let updated = self
            .backend
            .accept_suggestion(field, suggested)
            .await
            .map_err(|e| {
                if e.is_client_error() {
                    EditorError::AcceptRejectedByServer {
                        field: field.clone(),
                        message: e.to_string(),
                    }
                } else {
                    warn!("Accept for {field} failed in transport: {e}");
                    EditorError::Transport(e.to_string())
                }
            })?;

        self.session
            .write()
            .await
            .commit_accepted(field, updated.clone());
        info!("Suggestion accepted for field: {field}");
        Ok(updated)
    }

    /// Hides the suggestion for `field` for the rest of this session.
    /// Never contacts the backend. Returns `false` if it was already hidden.
    pub async fn reject(&self, field: FieldPath) -> bool {
        let mut session = self.session.write().await;
        let changed = session.store_mut().reject(field.clone());
        if changed {
            info!("Suggestion rejected locally for field: {field}");
        }
        changed
    }
}
