//! Document generation for the process view
//!
//! This module renders the process model into a self-contained HTML page (the
//! primary artifact) or a Markdown summary, by substituting `{{placeholder}}`
//! markers in embedded templates.

pub mod formats;

use crate::core::diagram::DiagramSource;
use crate::core::models::AnnotationTable;
use crate::core::process_model::{self, LegendEntry};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlDocument, MarkdownDocument, ReportFormat};

/// Data context for document generation
///
/// Aggregates everything a template needs, so every format renders from the
/// same source.
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    /// `<title>` of the page
    pub title: &'a str,
    /// Main heading
    pub heading: &'a str,
    /// Line under the heading
    pub subtitle: &'a str,
    /// Mermaid flowchart source
    pub diagram: DiagramSource<'a>,
    /// Tooltip annotations keyed by node id
    pub annotations: &'a AnnotationTable,
    /// Legend swatches
    pub legend: &'a [LegendEntry],
}

impl<'a> DocumentContext<'a> {
    /// Create a new document context
    #[must_use]
    pub const fn new(
        title: &'a str,
        heading: &'a str,
        subtitle: &'a str,
        diagram: &'a str,
        annotations: &'a AnnotationTable,
        legend: &'a [LegendEntry],
    ) -> Self {
        Self {
            title,
            heading,
            subtitle,
            diagram: DiagramSource::new(diagram),
            annotations,
            legend,
        }
    }
}

impl DocumentContext<'static> {
    /// Context for the built-in ISO 27001 / NFRM process view
    #[must_use]
    pub fn iso27001_nfrm() -> Self {
        Self::new(
            process_model::TITLE,
            process_model::HEADING,
            process_model::SUBTITLE,
            process_model::DIAGRAM,
            process_model::annotations(),
            &process_model::LEGEND,
        )
    }
}

/// Trait for document generators
pub trait DocumentGenerator {
    /// Generate a document to a file, overwriting it
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &DocumentContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate document content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &DocumentContext) -> Result<String, Box<dyn Error>>;
}

/// Replace `{{name}}` markers in a single left-to-right pass.
///
/// Substituted values are never rescanned, and unknown markers are left as they are.
#[must_use]
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
