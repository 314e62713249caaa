//! Markdown process view generator
//!
//! Renders the diagram as a fenced `mermaid` block, which GitHub, GitLab and
//! most Markdown viewers display natively, followed by relationship and
//! glossary tables. Markdown has no hover tooltips, so the annotations are
//! listed in the glossary instead.

use crate::core::report::{fill_placeholders, DocumentContext, DocumentGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/process_view.md");

/// Markdown generator for the process view
pub struct MarkdownDocument;

impl MarkdownDocument {
    /// Create a new Markdown generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate the relationship table rows
    fn generate_relationships(ctx: &DocumentContext) -> String {
        let mut md = String::new();

        for edge in ctx.diagram.edges() {
            let relation = match (&edge.label, edge.dashed) {
                (Some(label), true) => format!("*{}*", escape_cell(label)),
                (Some(label), false) => escape_cell(label),
                (None, true) => "*feeds*".to_string(),
                (None, false) => "→".to_string(),
            };
            let _ = writeln!(md, "| {} | {relation} | {} |", edge.from, edge.to);
        }

        md.truncate(md.trim_end().len());
        md
    }

    /// Generate the glossary table rows
    fn generate_glossary(ctx: &DocumentContext) -> String {
        let mut md = String::new();

        for (id, annotation) in ctx.annotations.iter() {
            let _ = writeln!(
                md,
                "| {id} | {} | {} | {} | {} |",
                escape_cell(&annotation.label_native),
                escape_cell(&annotation.label_alt),
                annotation.category,
                escape_cell(&annotation.definition_alt)
            );
        }

        md.truncate(md.trim_end().len());
        md
    }
}

/// Escape characters that would break a Markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Default for MarkdownDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator for MarkdownDocument {
    fn render(&self, ctx: &DocumentContext) -> Result<String, Box<dyn Error>> {
        let relationships = Self::generate_relationships(ctx);
        let glossary = Self::generate_glossary(ctx);

        Ok(fill_placeholders(
            MARKDOWN_TEMPLATE,
            &[
                ("heading", ctx.heading),
                ("subtitle", ctx.subtitle),
                ("diagram", ctx.diagram.trimmed()),
                ("relationships", &relationships),
                ("glossary", &glossary),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_sections() {
        let md = MarkdownDocument::new()
            .render(&DocumentContext::iso27001_nfrm())
            .unwrap();

        assert!(md.starts_with("# ISO 27001 / NFRM Process View"));
        assert!(md.contains("```mermaid\ngraph TD\n"));
        assert!(md.contains("| RV | affects | CO |"));
        assert!(md.contains("| EVD | *provides data to* | MON |"));
        assert!(md.contains("| MON | ICT Incident Monitoring | ICT Incident Monitoring | Consuming Process |"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a | b\nc"), "a \\| b c");
    }
}
