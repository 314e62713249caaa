//! Mermaid flowchart inspection
//!
//! Extracts node ids and labelled edges from flowchart source so the diagram
//! can be cross-checked against the annotation table. This is a line scanner
//! for flowchart statements, not a full Mermaid parser: a statement it cannot
//! read is reported instead of being skipped.

use crate::core::models::AnnotationTable;
use indexmap::IndexSet;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

/// One link operator, with its label if it has one
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\s*(?:"#,
        r#"--\s*"(?P<quoted>[^"]*)"\s*-->"#,
        r#"|--\s+(?P<text>[^-|"\s][^>]*?)\s+-->"#,
        r#"|-\.\s+(?P<dotted_text>[^.]+?)\s+\.->"#,
        r#"|==\s+(?P<thick_text>[^=]+?)\s+==>"#,
        r#"|(?P<op>-\.->|-\.-|==>|===|-->|---)(?:\s*\|(?P<piped>[^|]*)\|)?"#,
        r#")\s*"#,
    ))
    .expect("link pattern is valid")
});

static NODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<id>\w+)\s*(?:[\[\(\{>].*|:::\w+)?$").expect("node pattern is valid")
});

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:style|click)\s+(?P<id>\w+)\b").expect("style pattern is valid")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+(?P<ids>\w+(?:\s*,\s*\w+)*)\s+\w+$").expect("class pattern is valid")
});

/// Statements that never name a node
const SKIPPED_KEYWORDS: [&str; 6] = ["graph", "flowchart", "subgraph", "direction", "classDef", "linkStyle"];

/// Label groups of [`LINK_RE`], at most one of which matches
const LABEL_GROUPS: [&str; 5] = ["quoted", "text", "dotted_text", "thick_text", "piped"];

/// A directed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source node id
    pub from: String,
    /// Target node id
    pub to: String,
    /// Relationship verb, if the edge is labelled
    pub label: Option<String>,
    /// Dotted informational feed (`-.->`) rather than a solid relationship
    pub dashed: bool,
}

/// A link operator found in a statement
#[derive(Debug)]
struct Link {
    span: Range<usize>,
    label: Option<String>,
    dashed: bool,
}

/// Everything read from the source in one pass
#[derive(Debug, Default)]
struct Scan<'a> {
    ids: IndexSet<String>,
    edges: Vec<Edge>,
    unparsed: Vec<&'a str>,
}

impl Scan<'_> {
    /// Record a statement; false when it matches none of the known forms
    fn statement(&mut self, line: &str) -> bool {
        if let Some(caps) = STYLE_RE.captures(line) {
            self.ids.insert(caps["id"].to_string());
            return true;
        }
        if let Some(caps) = CLASS_RE.captures(line) {
            for id in caps["ids"].split(',') {
                self.ids.insert(id.trim().to_string());
            }
            return true;
        }

        let links = links(line);
        if !links.is_empty() {
            return self.link_chain(line, &links);
        }

        node_ref(line).is_some_and(|id| {
            self.ids.insert(id.to_string());
            true
        })
    }

    /// `A --> B -- text --> C`: every hop becomes an edge
    fn link_chain(&mut self, line: &str, links: &[Link]) -> bool {
        let mut segments = Vec::with_capacity(links.len() + 1);
        let mut cursor = 0;
        for link in links {
            segments.push(&line[cursor..link.span.start]);
            cursor = link.span.end;
        }
        segments.push(&line[cursor..]);

        let Some(ids) = segments.into_iter().map(node_ref).collect::<Option<Vec<_>>>() else {
            return false;
        };

        for (pair, link) in ids.windows(2).zip(links) {
            self.edges.push(Edge {
                from: pair[0].to_string(),
                to: pair[1].to_string(),
                label: link.label.clone(),
                dashed: link.dashed,
            });
        }
        for id in ids {
            self.ids.insert(id.to_string());
        }
        true
    }
}

/// Id of a node reference such as `A`, `A[Label]` or `B(("<b>B</b>"))`
fn node_ref(segment: &str) -> Option<&str> {
    NODE_RE
        .captures(segment.trim())
        .and_then(|caps| caps.name("id"))
        .map(|m| m.as_str())
}

/// Byte ranges of node shapes and quoted text, where arrows are only label text
fn shielded_spans(line: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '"' if depth == 0 && !in_quotes => {
                in_quotes = true;
                start = i;
            }
            '"' if depth == 0 => {
                in_quotes = false;
                spans.push(start..i + 1);
            }
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '[' | '(' | '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ']' | ')' | '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(start..i + 1);
                }
            }
            _ => {}
        }
    }
    if depth > 0 || in_quotes {
        spans.push(start..line.len());
    }
    spans
}

/// Link operators of a statement, left to right
fn links(line: &str) -> Vec<Link> {
    let shielded = shielded_spans(line);
    let mut links = Vec::new();
    let mut pos = 0;

    while let Some(caps) = LINK_RE.captures_at(line, pos) {
        let Some(whole) = caps.get(0) else { break };

        // A quoted link label is a shielded span lying wholly inside the match
        if let Some(span) = shielded.iter().find(|span| {
            span.start < whole.end()
                && whole.start() < span.end
                && !(whole.start() <= span.start && span.end <= whole.end())
        }) {
            pos = span.end;
            continue;
        }

        let label = LABEL_GROUPS
            .iter()
            .find_map(|group| caps.name(group))
            .map(|m| m.as_str().trim().to_string());
        let dashed = caps.name("dotted_text").is_some()
            || caps.name("op").is_some_and(|op| op.as_str().contains('.'));

        links.push(Link {
            span: whole.range(),
            label,
            dashed,
        });
        pos = whole.end();
    }

    links
}

/// Flowchart source with node and edge extraction
#[derive(Debug, Clone)]
pub struct DiagramSource<'a> {
    text: &'a str,
}

impl<'a> DiagramSource<'a> {
    /// Wrap flowchart source text
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// The source text with surrounding whitespace removed
    #[must_use]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    /// Lines that may reference nodes: trimmed, non-empty, not comments or structural keywords
    fn statements(&self) -> impl Iterator<Item = &'a str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("%%"))
            .filter(|line| {
                let keyword = line.split_whitespace().next().unwrap_or_default();
                keyword != "end" && !SKIPPED_KEYWORDS.contains(&keyword)
            })
    }

    fn scan(&self) -> Scan<'a> {
        let mut scan = Scan::default();
        for line in self.statements() {
            let statement = line.trim_end_matches(';').trim_end();
            if !scan.statement(statement) {
                scan.unparsed.push(line);
            }
        }
        scan
    }

    /// Node ids in order of first appearance
    #[must_use]
    pub fn node_ids(&self) -> IndexSet<String> {
        self.scan().ids
    }

    /// Edges in source order; a chain `A --> B --> C` yields one edge per hop
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.scan().edges
    }

    /// Statements the scanner could not read; their node ids are unknown
    #[must_use]
    pub fn unparsed(&self) -> Vec<&'a str> {
        self.scan().unparsed
    }
}

/// Result of comparing diagram node ids with annotation ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Node ids in the diagram that have no annotation
    pub unannotated: Vec<String>,
    /// Annotation ids with no node in the diagram
    pub orphaned: Vec<String>,
    /// Diagram statements that could not be read, so may hide further nodes
    pub unparsed: Vec<String>,
}

impl ConsistencyReport {
    /// True when every node is annotated, every annotation has a node and
    /// every statement was understood
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.unannotated.is_empty() && self.orphaned.is_empty() && self.unparsed.is_empty()
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            return write!(f, "diagram nodes and annotations match");
        }

        let mut parts = Vec::new();
        if !self.unannotated.is_empty() {
            parts.push(format!("nodes without annotation: {}", self.unannotated.join(", ")));
        }
        if !self.orphaned.is_empty() {
            parts.push(format!("annotations without node: {}", self.orphaned.join(", ")));
        }
        if !self.unparsed.is_empty() {
            let quoted: Vec<_> = self.unparsed.iter().map(|s| format!("`{s}`")).collect();
            parts.push(format!("unrecognised statements: {}", quoted.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Compare the node ids of `diagram` with the keys of `annotations`
#[must_use]
pub fn check_consistency(diagram: &DiagramSource, annotations: &AnnotationTable) -> ConsistencyReport {
    let scan = diagram.scan();

    ConsistencyReport {
        unannotated: scan
            .ids
            .iter()
            .filter(|id| !annotations.contains(id))
            .cloned()
            .collect(),
        orphaned: annotations
            .ids()
            .filter(|id| !scan.ids.contains(*id))
            .map(str::to_string)
            .collect(),
        unparsed: scan.unparsed.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Annotation, MetamodelCategory};
    use crate::core::process_model;

    const SMALL: &str = r#"
graph TD
    %% A -- "commented" --> Z
    subgraph "Group"
        direction TB
        A
        B(("<b>B</b>"))
        style B fill:#fff
    end
    A -- "feeds" --> B
    B -.->|informs| C
    C --> A
    classDef goal fill:#eee;
    class A,C goal;
"#;

    const CHAINED: &str = r#"
graph LR
    A --> B --> C
    D -- mitigates --> A
    E ==> A
    F -. hints .-> B
    G["label with --> inside"] --- C
"#;

    fn table_of(ids: &[&str]) -> AnnotationTable {
        let mut table = AnnotationTable::new();
        for id in ids {
            table.insert(*id, Annotation::new(*id, *id, "-", "-", MetamodelCategory::GoalKind));
        }
        table
    }

    #[test]
    fn test_node_ids_in_first_seen_order() {
        let ids: Vec<_> = DiagramSource::new(SMALL).node_ids().into_iter().collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_edges() {
        let edges = DiagramSource::new(SMALL).edges();

        assert_eq!(edges.len(), 3);
        assert_eq!(
            edges[0],
            Edge {
                from: "A".to_string(),
                to: "B".to_string(),
                label: Some("feeds".to_string()),
                dashed: false,
            }
        );
        assert_eq!(edges[1].label.as_deref(), Some("informs"));
        assert!(edges[1].dashed);
        assert_eq!(edges[2].label, None);
        assert!(!edges[2].dashed);
    }

    #[test]
    fn test_chains_and_other_link_styles() {
        let diagram = DiagramSource::new(CHAINED);

        let ids: Vec<_> = diagram.node_ids().into_iter().collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E", "F", "G"]);
        assert!(diagram.unparsed().is_empty());

        let hops: Vec<_> = diagram
            .edges()
            .into_iter()
            .map(|e| (e.from, e.to, e.label, e.dashed))
            .collect();
        assert_eq!(
            hops,
            vec![
                ("A".into(), "B".into(), None, false),
                ("B".into(), "C".into(), None, false),
                ("D".into(), "A".into(), Some("mitigates".into()), false),
                ("E".into(), "A".into(), None, false),
                ("F".into(), "B".into(), Some("hints".into()), true),
                ("G".into(), "C".into(), None, false),
            ]
        );
    }

    #[test]
    fn test_unannotated_chain_nodes_are_reported() {
        let report = check_consistency(&DiagramSource::new(CHAINED), &table_of(&["A", "B"]));

        assert!(!report.is_consistent());
        assert_eq!(report.unannotated, vec!["C", "D", "E", "F", "G"]);
        assert!(report.orphaned.is_empty());
    }

    #[test]
    fn test_unreadable_statement_fails_the_check() {
        let source = "graph TD\n    A --> B\n    A & B ~~~ C\n";
        let report = check_consistency(&DiagramSource::new(source), &table_of(&["A", "B"]));

        assert!(report.unannotated.is_empty());
        assert_eq!(report.unparsed, vec!["A & B ~~~ C"]);
        assert!(!report.is_consistent());
        assert_eq!(report.to_string(), "unrecognised statements: `A & B ~~~ C`");
    }

    #[test]
    fn test_builtin_model_is_consistent() {
        let diagram = DiagramSource::new(process_model::DIAGRAM);
        let report = check_consistency(&diagram, process_model::annotations());

        assert!(report.is_consistent(), "{report}");
        assert_eq!(diagram.node_ids().len(), 9);
        assert_eq!(diagram.edges().len(), 10);
    }

    #[test]
    fn test_mismatch_is_reported() {
        let report = check_consistency(&DiagramSource::new(SMALL), &table_of(&["A", "B", "Z"]));

        assert!(!report.is_consistent());
        assert_eq!(report.unannotated, vec!["C"]);
        assert_eq!(report.orphaned, vec!["Z"]);
        assert_eq!(
            report.to_string(),
            "nodes without annotation: C; annotations without node: Z"
        );
    }
}
