use crate::errors::EditorError;
use crate::models::resume::ResumeDocument;

/// Rejects empty or whitespace-only resume text before any request is made.
pub fn validate_resume_text(raw_text: &str) -> Result<&str, EditorError> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(EditorError::Validation("请输入简历内容".to_string()));
    }
    Ok(trimmed)
}

/// Checks a whole document before it is pushed to the backend.
///
/// The backend refuses resumes without at least one education and one work
/// entry; catching that here keeps the request from being sent at all.
pub fn validate_document(resume: &ResumeDocument) -> Result<(), EditorError> {
    let mut problems = Vec::new();

    if resume.basics.name.trim().is_empty() {
        problems.push("basics.name must not be empty");
    }
    if resume.basics.email.trim().is_empty() {
        problems.push("basics.email must not be empty");
    }
    if resume.education.is_empty() {
        problems.push("education must have at least one item");
    }
    if resume.work.is_empty() {
        problems.push("work must have at least one item");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(EditorError::Validation(problems.join("; ")))
    }
}
