use std::collections::HashSet;

use crate::models::resume::Suggestion;
use crate::suggestions::field_path::FieldPath;

/// Session-local display filter over suggestion lists.
///
/// Holds the set of field paths the user rejected and the set of fields
/// accepted in this session. Never persisted; both are emptied whenever the
/// document is reloaded from the backend.
#[derive(Debug, Clone, Default)]
pub struct SuggestionStore {
    suppressed: HashSet<FieldPath>,
    accepted: HashSet<FieldPath>,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw list minus suppressed fields, order preserved, each field at most once.
    pub fn visible_suggestions<'a>(&self, raw: &'a [Suggestion]) -> Vec<&'a Suggestion> {
        let mut seen: HashSet<&FieldPath> = HashSet::new();
        raw.iter()
            .filter(|s| !self.suppressed.contains(&s.field))
            .filter(|s| seen.insert(&s.field))
            .collect()
    }

    /// Hides `field`. Returns `false` when it was already hidden.
    pub fn reject(&mut self, field: FieldPath) -> bool {
        self.suppressed.insert(field)
    }

    pub fn reset_suppressions(&mut self) {
        self.suppressed.clear();
    }

    pub fn is_suppressed(&self, field: &FieldPath) -> bool {
        self.suppressed.contains(field)
    }

    /// Marks `field` as committed through an accept.
    pub fn record_accepted(&mut self, field: FieldPath) {
        self.accepted.insert(field);
    }

    pub fn is_accepted(&self, field: &FieldPath) -> bool {
        self.accepted.contains(field)
    }

    pub fn clear_accepted(&mut self) {
        self.accepted.clear();
    }

    /// Suppressed paths, sorted for stable output.
    pub fn suppressed(&self) -> Vec<&FieldPath> {
        let mut fields: Vec<_> = self.suppressed.iter().collect();
        fields.sort();
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(field: &str, suggested: &str) -> Suggestion {
        Suggestion {
            field: FieldPath::from(field),
            current: "old".to_string(),
            suggested: suggested.to_string(),
            reason: "reason".to_string(),
        }
    }

    fn fields(visible: &[&Suggestion]) -> Vec<String> {
        visible.iter().map(|s| s.field.to_string()).collect()
    }

    #[test]
    fn test_visible_preserves_raw_order() {
        let raw = vec![
            suggestion("work[0].description", "a"),
            suggestion("work[0].position", "b"),
            suggestion("work[0].company", "c"),
        ];
        let store = SuggestionStore::new();
        assert_eq!(
            fields(&store.visible_suggestions(&raw)),
            vec!["work[0].description", "work[0].position", "work[0].company"]
        );
    }

    #[test]
    fn test_reject_hides_then_reset_restores() {
        let raw = vec![
            suggestion("basics.summary", "a"),
            suggestion("basics.location", "b"),
        ];
        let mut store = SuggestionStore::new();

        store.reject(FieldPath::from("basics.summary"));
        assert_eq!(fields(&store.visible_suggestions(&raw)), vec!["basics.location"]);

        store.reset_suppressions();
        assert_eq!(
            fields(&store.visible_suggestions(&raw)),
            vec!["basics.summary", "basics.location"]
        );
    }

    #[test]
    fn test_reject_is_idempotent() {
        let mut once = SuggestionStore::new();
        once.reject(FieldPath::from("skills[0].level"));

        let mut twice = SuggestionStore::new();
        assert!(twice.reject(FieldPath::from("skills[0].level")));
        assert!(!twice.reject(FieldPath::from("skills[0].level")));

        assert_eq!(once.suppressed(), twice.suppressed());
    }

    #[test]
    fn test_each_field_visible_exactly_once() {
        let raw = vec![
            suggestion("basics.summary", "first"),
            suggestion("basics.summary", "second"),
        ];
        let store = SuggestionStore::new();
        let visible = store.visible_suggestions(&raw);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].suggested, "first");
    }

    #[test]
    fn test_accepted_fields_are_tracked_until_cleared() {
        let mut store = SuggestionStore::new();
        let level = FieldPath::from("skills[0].level");
        store.record_accepted(level.clone());
        assert!(store.is_accepted(&level));
        assert!(!store.is_suppressed(&level));

        store.reset_suppressions();
        assert!(store.is_accepted(&level));
        store.clear_accepted();
        assert!(!store.is_accepted(&level));
    }

    #[test]
    fn test_rejecting_unknown_field_is_not_an_error() {
        let mut store = SuggestionStore::new();
        assert!(store.reject(FieldPath::from("certificates[9].name")));
        assert!(store.is_suppressed(&FieldPath::from("certificates[9].name")));
    }
}
