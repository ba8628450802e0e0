use std::sync::Arc;

use crate::backend_client::ResumeBackend;
use crate::chat::service::ChatService;
use crate::config::Config;
use crate::resume::service::ResumeService;
use crate::suggestions::reconciler::SuggestionReconciler;
use crate::suggestions::session::{EditorSession, SharedSession};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Resume backend. `HttpBackend` in production, swapped for a fake in tests.
    pub backend: Arc<dyn ResumeBackend>,
    pub session: SharedSession,
    pub reconciler: SuggestionReconciler,
    pub chat: ChatService,
    pub resume: ResumeService,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn ResumeBackend>) -> Self {
        let session = EditorSession::new().shared();
        let reconciler = SuggestionReconciler::new(backend.clone(), session.clone());
        let chat = ChatService::new(backend.clone(), session.clone(), reconciler.clone());
        let resume = ResumeService::new(backend.clone(), session.clone());
        AppState {
            config,
            backend,
            session,
            reconciler,
            chat,
            resume,
        }
    }
}
