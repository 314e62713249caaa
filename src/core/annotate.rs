//! Tooltip annotation pass
//!
//! Mirrors the loop the generated page runs after Mermaid has rendered: every
//! annotation is looked up by node id and attached as a tooltip, and ids
//! without a node are logged and skipped.

use crate::core::diagram::DiagramSource;
use crate::core::models::AnnotationTable;
use indexmap::{IndexMap, IndexSet};
use logger::{debug, warn};

/// Something that can carry tooltips on nodes addressed by id
pub trait TooltipTarget {
    /// Attach `text` to the node `id`; returns false when no such node exists
    fn attach_tooltip(&mut self, id: &str, text: &str) -> bool;
}

/// What happened to each annotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationOutcome {
    /// Ids whose tooltip was attached
    pub attached: Vec<String>,
    /// Ids with no matching node
    pub missing: Vec<String>,
    /// One diagnostic line per missing id
    pub diagnostics: Vec<String>,
}

impl AnnotationOutcome {
    /// True when every annotation found its node
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Attach every annotation in `annotations` to `target`
///
/// Never fails: a missing node produces a warning and the pass continues.
pub fn annotate<T: TooltipTarget + ?Sized>(
    annotations: &AnnotationTable,
    target: &mut T,
) -> AnnotationOutcome {
    let mut outcome = AnnotationOutcome::default();

    for (id, annotation) in annotations.iter() {
        if target.attach_tooltip(id, &annotation.tooltip()) {
            debug!("Attached tooltip to node {id}");
            outcome.attached.push(id.to_string());
        } else {
            let diagnostic = format!("Could not find node with data-id: {id} to attach tooltip.");
            warn!("{diagnostic}");
            outcome.missing.push(id.to_string());
            outcome.diagnostics.push(diagnostic);
        }
    }

    outcome
}

/// Nodes of a flowchart, as the page would see them after rendering
#[derive(Debug, Clone, Default)]
pub struct DiagramNodes {
    nodes: IndexSet<String>,
    tooltips: IndexMap<String, String>,
}

impl DiagramNodes {
    /// Collect the nodes declared or referenced in `diagram`
    #[must_use]
    pub fn from_diagram(diagram: &DiagramSource) -> Self {
        Self {
            nodes: diagram.node_ids(),
            tooltips: IndexMap::new(),
        }
    }

    /// Tooltip attached to `id`, if any
    #[must_use]
    pub fn tooltip(&self, id: &str) -> Option<&str> {
        self.tooltips.get(id).map(String::as_str)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the diagram had no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl TooltipTarget for DiagramNodes {
    fn attach_tooltip(&mut self, id: &str, text: &str) -> bool {
        if !self.nodes.contains(id) {
            return false;
        }
        self.tooltips.insert(id.to_string(), text.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Annotation, MetamodelCategory};
    use crate::core::process_model;

    /// Target that knows every node except the listed ones
    struct Blind {
        hidden: Vec<&'static str>,
        seen: Vec<String>,
    }

    impl TooltipTarget for Blind {
        fn attach_tooltip(&mut self, id: &str, _text: &str) -> bool {
            self.seen.push(id.to_string());
            !self.hidden.iter().any(|hidden| *hidden == id)
        }
    }

    #[test]
    fn test_missing_node_is_skipped_with_one_diagnostic() {
        let mut target = Blind {
            hidden: vec!["EVD"],
            seen: Vec::new(),
        };

        let outcome = annotate(process_model::annotations(), &mut target);

        assert_eq!(target.seen.len(), 9, "every id is still visited");
        assert_eq!(outcome.attached.len(), 8);
        assert_eq!(outcome.missing, vec!["EVD"]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].contains("data-id: EVD"));
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_builtin_diagram_accepts_every_tooltip() {
        let mut nodes = DiagramNodes::from_diagram(&DiagramSource::new(process_model::DIAGRAM));

        let outcome = annotate(process_model::annotations(), &mut nodes);

        assert!(outcome.is_complete());
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(nodes.len(), 9);
        let so = nodes.tooltip("SO").unwrap();
        assert!(so.starts_with(" Sign-Off / Akzeptanz: "));
        assert!(so.ends_with("[Metamodel: OutcomeKind]"));
    }

    #[test]
    fn test_unknown_id_leaves_nodes_untouched() {
        let mut nodes = DiagramNodes::from_diagram(&DiagramSource::new("graph TD\n  A --> B\n"));
        let mut table = AnnotationTable::new();
        table.insert("Q", Annotation::new("q", "q", "-", "-", MetamodelCategory::Risk));
        table.insert("B", Annotation::new("b", "b", "-", "-", MetamodelCategory::Risk));

        let outcome = annotate(&table, &mut nodes);

        assert_eq!(outcome.attached, vec!["B"]);
        assert_eq!(outcome.missing, vec!["Q"]);
        assert!(nodes.tooltip("Q").is_none());
        assert!(nodes.tooltip("A").is_none());
    }
}
