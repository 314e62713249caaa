//! Integration tests for the generated process view

use isms_view::core::diagram::{check_consistency, DiagramSource};
use isms_view::core::models::AnnotationTable;
use isms_view::core::process_model;
use isms_view::core::report::{
    DocumentContext, DocumentGenerator, HtmlDocument, MarkdownDocument, ReportFormat,
};
use std::fs;
use tempfile::TempDir;

const DATA_OPEN: &str = r#"<script type="application/json" id="annotation-data">"#;

fn render_html() -> String {
    HtmlDocument::new()
        .render(&DocumentContext::iso27001_nfrm())
        .expect("HTML rendering failed")
}

/// Text of the embedded annotation data block
fn annotation_block(html: &str) -> &str {
    let start = html.find(DATA_OPEN).expect("annotation data block missing") + DATA_OPEN.len();
    let len = html[start..].find("</script>").expect("unterminated data block");
    &html[start..start + len]
}

#[test]
fn embedded_annotations_round_trip() {
    let html = render_html();

    let parsed = AnnotationTable::from_json(annotation_block(&html)).expect("invalid JSON");

    assert_eq!(&parsed, process_model::annotations());
}

#[test]
fn document_has_single_html_root() {
    let html = render_html();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("<html").count(), 1);
    assert_eq!(html.matches("</html>").count(), 1);
    assert_eq!(html.matches("<body").count(), 1);
    assert_eq!(
        html.matches("<script").count(),
        html.matches("</script>").count()
    );
}

#[test]
fn diagram_ids_match_annotation_ids() {
    let diagram = DiagramSource::new(process_model::DIAGRAM);
    let report = check_consistency(&diagram, process_model::annotations());

    assert!(report.is_consistent(), "{report}");
    let ids: Vec<_> = diagram.node_ids().into_iter().collect();
    for id in ["CO", "RV", "CTRL", "EVD", "EVD_P", "ASSURE", "RR", "SO", "MON"] {
        assert!(ids.iter().any(|n| n == id), "{id} missing from diagram");
    }
}

#[test]
fn page_script_handles_missing_nodes_and_render_failures() {
    let html = render_html();

    assert!(html.contains("securityLevel: 'strict'"));
    assert!(html.contains(".node[data-id=\"${id}\"]"));
    assert!(html.contains("console.warn(`Could not find node with data-id: ${id} to attach tooltip.`)"));
    assert!(html.contains("[Metamodel: ${t.meta}]"));

    let catch = html.split("catch (error)").nth(1).expect("no catch block");
    assert!(catch.contains("console.error('Mermaid rendering failed:', error)"));
    assert!(catch.contains("target.innerHTML = `<div"));
    assert!(catch.contains("Error: Diagram could not be rendered."));
}

#[test]
fn generation_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.html");
    let second = temp.path().join("second.html");
    let ctx = DocumentContext::iso27001_nfrm();

    HtmlDocument::new().generate(&ctx, &first).unwrap();
    HtmlDocument::new().generate(&ctx, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn generate_writes_exactly_one_utf8_file_and_overwrites() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("compliant_iso27001_nfrm_process_view_fixed.html");
    fs::write(&path, "stale").unwrap();

    ReportFormat::Html
        .generator()
        .generate(&DocumentContext::iso27001_nfrm(), &path)
        .unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let text = String::from_utf8(fs::read(&path).unwrap()).expect("output is not UTF-8");
    assert!(text.contains("Assurance-Aktivität"));
    assert!(!text.contains("stale"));
}

#[test]
fn markdown_lists_every_annotation() {
    let md = MarkdownDocument::new()
        .render(&DocumentContext::iso27001_nfrm())
        .unwrap();

    for (id, annotation) in process_model::annotations().iter() {
        assert!(md.contains(&format!("| {id} | {} |", annotation.label_native)));
    }
}

#[test]
fn cli_without_arguments_writes_fixed_file() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_ismsview"))
        .current_dir(temp.path())
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .expect("failed to run ismsview");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "HTML file 'compliant_iso27001_nfrm_process_view_fixed.html' generated successfully."
    );
    assert!(temp
        .path()
        .join("compliant_iso27001_nfrm_process_view_fixed.html")
        .is_file());
    assert!(!home.exists(), "a plain run must not create a config file");
}

#[test]
fn cli_fails_when_output_is_not_writable() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_ismsview"))
        .current_dir(temp.path())
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .args(["generate", "-o", "missing/dir/view.html"])
        .output()
        .expect("failed to run ismsview");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to write").count(), 1, "{stderr}");
    assert!(stderr.starts_with("✗ Failed to write"));
}
