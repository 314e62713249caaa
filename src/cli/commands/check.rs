//! Check command handler
//!
//! Verifies that the diagram and the annotation table describe the same nodes
//! and dry-runs the page's tooltip pass against the diagram source.

use isms_view::core::annotate::{annotate, DiagramNodes};
use isms_view::core::diagram::check_consistency;
use isms_view::core::report::DocumentContext;
use logger::info;

/// Run the check; returns true when every id matches on both sides.
pub fn run() -> bool {
    let ctx = DocumentContext::iso27001_nfrm();

    let report = check_consistency(&ctx.diagram, ctx.annotations);
    let mut nodes = DiagramNodes::from_diagram(&ctx.diagram);
    let outcome = annotate(ctx.annotations, &mut nodes);

    info!(
        "Tooltip pass: {} attached, {} missing",
        outcome.attached.len(),
        outcome.missing.len()
    );

    if report.is_consistent() && outcome.is_complete() {
        println!(
            "✓ {} annotations match {} diagram nodes",
            ctx.annotations.len(),
            nodes.len()
        );
        true
    } else {
        eprintln!("✗ {report}");
        for diagnostic in &outcome.diagnostics {
            eprintln!("  {diagnostic}");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_builtin_model_passes() {
        assert!(super::run());
    }
}
