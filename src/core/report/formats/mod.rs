//! Document format implementations
//!
//! Provides renderers for the supported output formats: HTML and Markdown.

pub mod html;
pub mod markdown;

pub use html::HtmlDocument;
pub use markdown::MarkdownDocument;

use super::DocumentGenerator;
use std::fmt;
use std::str::FromStr;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Self-contained HTML page rendered by Mermaid in the browser
    #[default]
    Html,
    /// Markdown with a Mermaid code block and glossary tables
    Markdown,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }

    /// Generator for this format
    #[must_use]
    pub fn generator(&self) -> Box<dyn DocumentGenerator> {
        match self {
            Self::Html => Box::new(HtmlDocument::new()),
            Self::Markdown => Box::new(MarkdownDocument::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown document format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("HTML".parse(), Ok(ReportFormat::Html));
        assert_eq!("htm".parse(), Ok(ReportFormat::Html));
        assert_eq!("md".parse(), Ok(ReportFormat::Markdown));
        assert_eq!("Markdown".parse(), Ok(ReportFormat::Markdown));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_extension_and_display() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
        assert_eq!(ReportFormat::default(), ReportFormat::Html);
    }
}
