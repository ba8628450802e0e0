use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;
use crate::suggestions::session::EditorView;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub resume: ResumeDocument,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub view: EditorView,
}

/// GET /api/resume
///
/// Refreshes the mirror from the backend. 404 when no resume exists yet.
pub async fn handle_get_resume(State(state): State<AppState>) -> Result<Json<EditorView>, AppError> {
    match state.resume.fetch_resume().await? {
        Some(_) => Ok(Json(state.session.read().await.view()?)),
        None => Err(AppError::NotFound("No resume found".to_string())),
    }
}

/// POST /api/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    state.resume.save_resume(req.resume).await?;
    Ok(Json(SaveResponse {
        status: "success",
        view: state.session.read().await.view()?,
    }))
}

/// POST /api/parse_resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<EditorView>, AppError> {
    state.resume.parse_resume(&req.text).await?;
    Ok(Json(state.session.read().await.view()?))
}
