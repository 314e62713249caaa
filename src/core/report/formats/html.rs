//! HTML process view generator
//!
//! Produces a single self-contained page. Mermaid, Tailwind and the Inter font
//! are loaded from CDNs at view time; the diagram and the annotation table are
//! embedded as script data and turned into tooltips by the page script.

use crate::core::report::{fill_placeholders, DocumentContext, DocumentGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded HTML page template
const HTML_TEMPLATE: &str = include_str!("../templates/process_view.html");

/// Shown in place of the diagram when Mermaid fails to render it
pub const RENDER_ERROR_NOTICE: &str = r#"<div class="p-4 bg-red-100 border border-red-400 text-red-700 rounded-lg">Error: Diagram could not be rendered. Check console for details.</div>"#;

/// HTML generator for the process view
pub struct HtmlDocument;

impl HtmlDocument {
    /// Create a new HTML generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate the legend swatches
    fn generate_legend_html(ctx: &DocumentContext) -> String {
        let mut html = String::new();

        for entry in ctx.legend {
            let _ = writeln!(
                html,
                "                <div class=\"legend-item\"><span class=\"legend-swatch\" style=\"background:{};border-color:{}\"></span><div><strong>{}</strong></div></div>",
                entry.fill, entry.border, entry.label
            );
        }

        // The template line after the placeholder supplies the newline
        html.truncate(html.trim_end().len());
        html
    }

    /// Encode `value` as JSON that is safe to place inside a `<script>` element
    fn script_json<T: serde::Serialize + ?Sized>(
        value: &T,
        pretty: bool,
    ) -> Result<String, serde_json::Error> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json.replace("</", "<\\/"))
    }
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator for HtmlDocument {
    fn render(&self, ctx: &DocumentContext) -> Result<String, Box<dyn Error>> {
        let annotation_json = Self::script_json(ctx.annotations, true)?;
        let diagram_json = Self::script_json(ctx.diagram.trimmed(), false)?;
        let legend = Self::generate_legend_html(ctx);

        Ok(fill_placeholders(
            HTML_TEMPLATE,
            &[
                ("title", ctx.title),
                ("heading", ctx.heading),
                ("subtitle", ctx.subtitle),
                ("legend", &legend),
                ("annotation_json", &annotation_json),
                ("diagram_json", &diagram_json),
                ("render_error_notice", RENDER_ERROR_NOTICE),
            ],
        ))
    }
}
