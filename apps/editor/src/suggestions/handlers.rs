use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::chat::bridge::CardPlacement;
use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestions::document::SectionRef;
use crate::suggestions::field_path::FieldPath;
use crate::suggestions::session::{EditorView, SectionSuggestions};

#[derive(Debug, Deserialize)]
pub struct SectionQuery {
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub field: String,
    pub suggested: String,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub field: String,
}

#[derive(Debug, Serialize)]
pub struct RejectResponse {
    pub field: FieldPath,
    /// `false` when the field was already hidden.
    pub newly_suppressed: bool,
    #[serde(flatten)]
    pub view: EditorView,
}

/// GET /api/suggestions?section=skills[0]
///
/// Without `section`, returns every section instance with visible suggestions.
pub async fn handle_visible_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<Vec<SectionSuggestions>>, AppError> {
    let session = state.session.read().await;
    match query.section {
        Some(raw) => {
            let section: SectionRef = raw.parse().map_err(AppError::Validation)?;
            let suggestions = session.visible_suggestions(section)?;
            Ok(Json(vec![SectionSuggestions {
                section,
                placement: CardPlacement::Inline,
                suggestions,
            }]))
        }
        None => Ok(Json(session.suggestion_view()?)),
    }
}

/// POST /api/accept_suggestion
pub async fn handle_accept(
    State(state): State<AppState>,
    Json(req): Json<AcceptRequest>,
) -> Result<Json<EditorView>, AppError> {
    // A whitespace-only replacement is a legitimate value.
    if req.field.trim().is_empty() || req.suggested.is_empty() {
        return Err(AppError::Validation(
            "Field and suggested are required".to_string(),
        ));
    }

    state
        .reconciler
        .accept(&FieldPath::new(req.field), &req.suggested)
        .await?;
    Ok(Json(state.session.read().await.view()?))
}

/// POST /api/reject_suggestion
pub async fn handle_reject(
    State(state): State<AppState>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<RejectResponse>, AppError> {
    if req.field.trim().is_empty() {
        return Err(AppError::Validation("Field is required".to_string()));
    }

    let field = FieldPath::new(req.field);
    let newly_suppressed = state.reconciler.reject(field.clone()).await;
    let view = state.session.read().await.view()?;
    Ok(Json(RejectResponse {
        field,
        newly_suppressed,
        view,
    }))
}
