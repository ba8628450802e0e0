// Suggestion lifecycle: field-path addressing, per-section visibility,
// accept/reject reconciliation against the backend's authoritative resume.

pub mod document;
pub mod field_path;
pub mod handlers;
pub mod reconciler;
pub mod session;
pub mod store;
