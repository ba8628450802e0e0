//! Field-path addressed reads and writes over a [`ResumeDocument`].
//!
//! The document is treated as a value: `set` returns a new document and never
//! touches the receiver. Suggestions are scoped to the section instance that
//! owns their field.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::errors::EditorError;
use crate::models::resume::{
    BasicInfo, Certificate, Education, ResumeDocument, Skill, Suggestion, WorkExperience,
};
use crate::suggestions::field_path::{FieldPath, Segment};

/// One section instance: the `basics` singleton or one record of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionRef {
    Basics,
    Education(usize),
    Work(usize),
    Skill(usize),
    Certificate(usize),
}

impl SectionRef {
    fn from_parts(section: &str, index: Option<usize>) -> Option<Self> {
        match (section, index) {
            ("basics", None) => Some(SectionRef::Basics),
            ("education", Some(i)) => Some(SectionRef::Education(i)),
            ("work", Some(i)) => Some(SectionRef::Work(i)),
            ("skills", Some(i)) => Some(SectionRef::Skill(i)),
            ("certificates", Some(i)) => Some(SectionRef::Certificate(i)),
            _ => None,
        }
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionRef::Basics => write!(f, "basics"),
            SectionRef::Education(i) => write!(f, "education[{i}]"),
            SectionRef::Work(i) => write!(f, "work[{i}]"),
            SectionRef::Skill(i) => write!(f, "skills[{i}]"),
            SectionRef::Certificate(i) => write!(f, "certificates[{i}]"),
        }
    }
}

impl FromStr for SectionRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = FieldPath::from(s)
            .segments()
            .map_err(|e| format!("invalid section '{s}': {e}"))?;
        let parsed = match segments.as_slice() {
            [Segment::Key(name)] => SectionRef::from_parts(name, None),
            [Segment::Key(name), Segment::Index(i)] => SectionRef::from_parts(name, Some(*i)),
            _ => None,
        };
        parsed.ok_or_else(|| format!("invalid section '{s}'"))
    }
}

impl Serialize for SectionRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Leaf part of a resolved path: a scalar attribute or one item of a list attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf<'a> {
    Scalar(&'a str),
    Item(&'a str, usize),
}

trait Record {
    /// `None` when the leaf is not part of this record's shape.
    fn read(&self, leaf: Leaf<'_>) -> Option<String>;
    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool;
    fn suggestions(&self) -> &[Suggestion];
    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion>;
}

fn read_opt(value: &Option<String>) -> Option<String> {
    Some(value.clone().unwrap_or_default())
}

impl Record for BasicInfo {
    fn read(&self, leaf: Leaf<'_>) -> Option<String> {
        match leaf {
            Leaf::Scalar("name") => Some(self.name.clone()),
            Leaf::Scalar("email") => Some(self.email.clone()),
            Leaf::Scalar("phone") => read_opt(&self.phone),
            Leaf::Scalar("location") => read_opt(&self.location),
            Leaf::Scalar("summary") => read_opt(&self.summary),
            _ => None,
        }
    }

    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool {
        match leaf {
            Leaf::Scalar("name") => self.name = value,
            Leaf::Scalar("email") => self.email = value,
            Leaf::Scalar("phone") => self.phone = Some(value),
            Leaf::Scalar("location") => self.location = Some(value),
            Leaf::Scalar("summary") => self.summary = Some(value),
            _ => return false,
        }
        true
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion> {
        &mut self.suggestions
    }
}

impl Record for Education {
    fn read(&self, leaf: Leaf<'_>) -> Option<String> {
        match leaf {
            Leaf::Scalar("institution") => Some(self.institution.clone()),
            Leaf::Scalar("degree") => Some(self.degree.clone()),
            Leaf::Scalar("field_of_study") => Some(self.field_of_study.clone()),
            Leaf::Scalar("start_date") => Some(self.start_date.clone()),
            Leaf::Scalar("end_date") => read_opt(&self.end_date),
            Leaf::Scalar("gpa") => read_opt(&self.gpa),
            _ => None,
        }
    }

    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool {
        match leaf {
            Leaf::Scalar("institution") => self.institution = value,
            Leaf::Scalar("degree") => self.degree = value,
            Leaf::Scalar("field_of_study") => self.field_of_study = value,
            Leaf::Scalar("start_date") => self.start_date = value,
            Leaf::Scalar("end_date") => self.end_date = Some(value),
            Leaf::Scalar("gpa") => self.gpa = Some(value),
            _ => return false,
        }
        true
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion> {
        &mut self.suggestions
    }
}

impl Record for WorkExperience {
    fn read(&self, leaf: Leaf<'_>) -> Option<String> {
        match leaf {
            Leaf::Scalar("company") => Some(self.company.clone()),
            Leaf::Scalar("position") => Some(self.position.clone()),
            Leaf::Scalar("start_date") => Some(self.start_date.clone()),
            Leaf::Scalar("end_date") => read_opt(&self.end_date),
            Leaf::Scalar("description") => Some(self.description.clone()),
            Leaf::Item("achievements", i) => self.achievements.get(i).cloned(),
            _ => None,
        }
    }

    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool {
        match leaf {
            Leaf::Scalar("company") => self.company = value,
            Leaf::Scalar("position") => self.position = value,
            Leaf::Scalar("start_date") => self.start_date = value,
            Leaf::Scalar("end_date") => self.end_date = Some(value),
            Leaf::Scalar("description") => self.description = value,
            Leaf::Item("achievements", i) => match self.achievements.get_mut(i) {
                Some(slot) => *slot = value,
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion> {
        &mut self.suggestions
    }
}

impl Record for Skill {
    fn read(&self, leaf: Leaf<'_>) -> Option<String> {
        match leaf {
            Leaf::Scalar("name") => Some(self.name.clone()),
            Leaf::Scalar("level") => read_opt(&self.level),
            Leaf::Scalar("category") => read_opt(&self.category),
            _ => None,
        }
    }

    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool {
        match leaf {
            Leaf::Scalar("name") => self.name = value,
            Leaf::Scalar("level") => self.level = Some(value),
            Leaf::Scalar("category") => self.category = Some(value),
            _ => return false,
        }
        true
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion> {
        &mut self.suggestions
    }
}

impl Record for Certificate {
    fn read(&self, leaf: Leaf<'_>) -> Option<String> {
        match leaf {
            Leaf::Scalar("name") => Some(self.name.clone()),
            Leaf::Scalar("issuer") => Some(self.issuer.clone()),
            Leaf::Scalar("date") => Some(self.date.clone()),
            Leaf::Scalar("description") => read_opt(&self.description),
            _ => None,
        }
    }

    fn write(&mut self, leaf: Leaf<'_>, value: String) -> bool {
        match leaf {
            Leaf::Scalar("name") => self.name = value,
            Leaf::Scalar("issuer") => self.issuer = value,
            Leaf::Scalar("date") => self.date = value,
            Leaf::Scalar("description") => self.description = Some(value),
            _ => return false,
        }
        true
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut Vec<Suggestion> {
        &mut self.suggestions
    }
}

/// Splits a path into its owning section and the leaf within it.
fn split_path<'a>(
    path: &FieldPath,
    segments: &'a [Segment],
) -> Result<(SectionRef, Leaf<'a>), EditorError> {
    let (section, index, rest) = match segments {
        [Segment::Key(section), Segment::Index(i), rest @ ..] => (section, Some(*i), rest),
        [Segment::Key(section), rest @ ..] => (section, None, rest),
        _ => return Err(EditorError::field_not_found(path, "path must start with a section name")),
    };

    let section_ref = SectionRef::from_parts(section, index)
        .ok_or_else(|| EditorError::field_not_found(path, format!("unknown section '{section}'")))?;

    let leaf = match rest {
        [Segment::Key(name)] => Leaf::Scalar(name.as_str()),
        [Segment::Key(name), Segment::Index(i)] => Leaf::Item(name.as_str(), *i),
        [] => return Err(EditorError::field_not_found(path, "path names a section, not a leaf")),
        _ => return Err(EditorError::field_not_found(path, "path is nested too deeply")),
    };

    Ok((section_ref, leaf))
}

impl ResumeDocument {
    fn record(&self, section: SectionRef) -> Option<&dyn Record> {
        match section {
            SectionRef::Basics => Some(&self.basics as &dyn Record),
            SectionRef::Education(i) => self.education.get(i).map(|r| r as &dyn Record),
            SectionRef::Work(i) => self.work.get(i).map(|r| r as &dyn Record),
            SectionRef::Skill(i) => self.skills.get(i).map(|r| r as &dyn Record),
            SectionRef::Certificate(i) => self.certificates.get(i).map(|r| r as &dyn Record),
        }
    }

    fn record_mut(&mut self, section: SectionRef) -> Option<&mut dyn Record> {
        match section {
            SectionRef::Basics => Some(&mut self.basics as &mut dyn Record),
            SectionRef::Education(i) => self.education.get_mut(i).map(|r| r as &mut dyn Record),
            SectionRef::Work(i) => self.work.get_mut(i).map(|r| r as &mut dyn Record),
            SectionRef::Skill(i) => self.skills.get_mut(i).map(|r| r as &mut dyn Record),
            SectionRef::Certificate(i) => {
                self.certificates.get_mut(i).map(|r| r as &mut dyn Record)
            }
        }
    }

    /// Reads the leaf at `path`. Unset optional leaves read as `""`.
    pub fn get(&self, path: &FieldPath) -> Result<String, EditorError> {
        let segments = path
            .segments()
            .map_err(|e| EditorError::field_not_found(path, e.to_string()))?;
        let (section, leaf) = split_path(path, &segments)?;
        let record = self
            .record(section)
            .ok_or_else(|| EditorError::field_not_found(path, format!("{section} does not exist")))?;
        record
            .read(leaf)
            .ok_or_else(|| EditorError::field_not_found(path, format!("no such leaf in {section}")))
    }

    /// Returns a copy with the leaf at `path` replaced and every suggestion
    /// for `path` dropped from the owning section.
    pub fn set(&self, path: &FieldPath, value: impl Into<String>) -> Result<Self, EditorError> {
        let segments = path
            .segments()
            .map_err(|e| EditorError::field_not_found(path, e.to_string()))?;
        let (section, leaf) = split_path(path, &segments)?;

        let mut next = self.clone();
        let record = next
            .record_mut(section)
            .ok_or_else(|| EditorError::field_not_found(path, format!("{section} does not exist")))?;
        if !record.write(leaf, value.into()) {
            return Err(EditorError::field_not_found(
                path,
                format!("no such leaf in {section}"),
            ));
        }
        record.suggestions_mut().retain(|s| &s.field != path);
        Ok(next)
    }

    /// The section instance owning `path`, provided the path resolves to a leaf.
    pub fn section_of(&self, path: &FieldPath) -> Result<SectionRef, EditorError> {
        self.get(path)?;
        let segments = path
            .segments()
            .map_err(|e| EditorError::field_not_found(path, e.to_string()))?;
        split_path(path, &segments).map(|(section, _)| section)
    }

    /// Raw suggestion list of one section instance, in display order.
    pub fn suggestions(&self, section: SectionRef) -> Option<&[Suggestion]> {
        self.record(section).map(|r| r.suggestions())
    }

    /// Every section instance in display order.
    pub fn sections(&self) -> Vec<SectionRef> {
        let mut sections = vec![SectionRef::Basics];
        sections.extend((0..self.education.len()).map(SectionRef::Education));
        sections.extend((0..self.work.len()).map(SectionRef::Work));
        sections.extend((0..self.skills.len()).map(SectionRef::Skill));
        sections.extend((0..self.certificates.len()).map(SectionRef::Certificate));
        sections
    }

    /// Distributes a flat suggestion list into the owning section lists.
    /// Exact duplicates of an already-embedded suggestion are skipped;
    /// suggestions whose path does not resolve are dropped.
    pub fn with_attached_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        for suggestion in suggestions {
            let section = match self.section_of(&suggestion.field) {
                Ok(section) => section,
                Err(e) => {
                    warn!("Dropping suggestion that does not attach: {e}");
                    continue;
                }
            };
            if let Some(record) = self.record_mut(section) {
                let list = record.suggestions_mut();
                if !list.contains(&suggestion) {
                    list.push(suggestion);
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_resume;

    fn path(s: &str) -> FieldPath {
        FieldPath::from(s)
    }

    #[test]
    fn test_get_reads_singleton_and_sequence_leaves() {
        let doc = sample_resume();
        assert_eq!(
            doc.get(&path("basics.summary")).unwrap(),
            "经验丰富的软件工程师，专注于后端开发和系统架构"
        );
        assert_eq!(doc.get(&path("skills[0].level")).unwrap(), "高级");
        assert_eq!(
            doc.get(&path("work[0].achievements[1]")).unwrap(),
            "主导订单系统重构"
        );
    }

    #[test]
    fn test_get_unset_optional_reads_empty() {
        let doc = sample_resume();
        assert_eq!(doc.get(&path("certificates[0].description")).unwrap(), "");
    }

    #[test]
    fn test_get_fails_for_paths_outside_the_shape() {
        let doc = sample_resume();
        for bad in [
            "basics.nickname",
            "work[5].description",
            "work[0]",
            "projects[0].name",
            "basics",
            "work[0].achievements[9]",
            "skills.level",
        ] {
            assert!(
                matches!(doc.get(&path(bad)), Err(EditorError::FieldNotFound { .. })),
                "{bad} should not resolve"
            );
        }
    }

    #[test]
    fn test_set_replaces_leaf_and_drops_its_suggestion_only() {
        let doc = sample_resume();
        let next = doc.set(&path("basics.summary"), "新摘要").unwrap();

        assert_eq!(next.get(&path("basics.summary")).unwrap(), "新摘要");
        assert!(next
            .basics
            .suggestions
            .iter()
            .all(|s| s.field.as_str() != "basics.summary"));
        // Other suggestions in the same section survive.
        assert!(next
            .basics
            .suggestions
            .iter()
            .any(|s| s.field.as_str() == "basics.location"));
        // Other sections are untouched.
        assert_eq!(next.skills, doc.skills);
        assert_eq!(next.work, doc.work);
        // Receiver is unchanged.
        assert_ne!(doc.get(&path("basics.summary")).unwrap(), "新摘要");
    }

    #[test]
    fn test_set_list_item() {
        let doc = sample_resume();
        let next = doc
            .set(&path("work[0].achievements[0]"), "支持日活用户100万+")
            .unwrap();
        assert_eq!(next.work[0].achievements[0], "支持日活用户100万+");
        assert_eq!(next.work[0].achievements.len(), doc.work[0].achievements.len());
    }

    #[test]
    fn test_set_fails_for_missing_path() {
        let doc = sample_resume();
        assert!(matches!(
            doc.set(&path("education[3].degree"), "硕士"),
            Err(EditorError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_section_ref_round_trips_through_text() {
        for text in ["basics", "education[0]", "work[2]", "skills[1]", "certificates[0]"] {
            let section: SectionRef = text.parse().unwrap();
            assert_eq!(section.to_string(), text);
        }
        assert!("skills".parse::<SectionRef>().is_err());
        assert!("basics[0]".parse::<SectionRef>().is_err());
    }

    #[test]
    fn test_section_of_owning_instance() {
        let doc = sample_resume();
        assert_eq!(
            doc.section_of(&path("skills[0].level")).unwrap(),
            SectionRef::Skill(0)
        );
        assert_eq!(
            doc.section_of(&path("basics.summary")).unwrap(),
            SectionRef::Basics
        );
    }

    #[test]
    fn test_sections_in_display_order() {
        let doc = sample_resume();
        assert_eq!(
            doc.sections(),
            vec![
                SectionRef::Basics,
                SectionRef::Education(0),
                SectionRef::Work(0),
                SectionRef::Skill(0),
                SectionRef::Skill(1),
                SectionRef::Certificate(0),
            ]
        );
    }

    #[test]
    fn test_attach_routes_flat_suggestions_to_owners() {
        let mut doc = sample_resume();
        doc.work[0].suggestions.clear();
        let flat = vec![
            Suggestion {
                field: path("work[0].description"),
                current: doc.work[0].description.clone(),
                suggested: "通过微服务架构优化，提升系统响应速度30%".to_string(),
                reason: "量化成果".to_string(),
            },
            Suggestion {
                field: path("projects[0].name"),
                current: String::new(),
                suggested: "x".to_string(),
                reason: String::new(),
            },
        ];

        let attached = doc.with_attached_suggestions(flat.clone());
        assert_eq!(attached.work[0].suggestions, vec![flat[0].clone()]);

        // Attaching again does not duplicate.
        let again = attached.with_attached_suggestions(flat);
        assert_eq!(again.work[0].suggestions.len(), 1);
    }
}
