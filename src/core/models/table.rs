//! Ordered annotation table keyed by diagram node id

use super::Annotation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Annotations keyed by node id, kept in insertion order
///
/// Serializes as a JSON object `{ "<id>": { "de": .., "en": .., .. }, .. }`,
/// which is the shape the page script iterates over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationTable {
    entries: IndexMap<String, Annotation>,
}

impl AnnotationTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an annotation, replacing and returning any previous one for `id`
    pub fn insert(&mut self, id: &str, annotation: Annotation) -> Option<Annotation> {
        self.entries.insert(id.to_string(), annotation)
    }

    /// Look up an annotation by node id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.entries.get(id)
    }

    /// Whether an annotation exists for `id`
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(id, annotation)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.entries.iter().map(|(id, a)| (id.as_str(), a))
    }

    /// Number of annotations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON for embedding into a document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a table from its JSON form
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe an annotation table
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::MetamodelCategory;

    fn sample() -> AnnotationTable {
        let mut table = AnnotationTable::new();
        table.insert(
            "RV",
            Annotation::new("Risikovektor", "Risk Vector", "x", "y", MetamodelCategory::RiskKind),
        );
        table.insert(
            "CO",
            Annotation::new("Kontrollziel", "Control Objective", "x", "y", MetamodelCategory::GoalKind),
        );
        table
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let table = sample();
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["RV", "CO"]);

        let json = table.to_json().unwrap();
        let rv = json.find("\"RV\"").unwrap();
        let co = json.find("\"CO\"").unwrap();
        assert!(rv < co);
    }

    #[test]
    fn test_json_round_trip() {
        let table = sample();
        let parsed = AnnotationTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = sample();
        let previous = table.insert(
            "CO",
            Annotation::new("Ziel", "Goal", "x", "y", MetamodelCategory::GoalKind),
        );

        assert_eq!(previous.map(|a| a.label_native), Some("Kontrollziel".to_string()));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("CO").map(|a| a.label_alt.as_str()), Some("Goal"));
        assert!(!table.contains("SO"));
    }
}
