//! Built-in ISO 27001 / NFRM process model
//!
//! The diagram text and the annotation table are maintained side by side;
//! [`crate::core::diagram::check_consistency`] verifies that their node ids agree.

use crate::core::models::{Annotation, AnnotationTable, MetamodelCategory};
use std::sync::LazyLock;

/// Document title
pub const TITLE: &str = "ISO 27001 / NFRM Process View (Formally Compliant Model)";

/// Page heading
pub const HEADING: &str = "ISO 27001 / NFRM Process View (Compliant Model v9.0)";

/// Line under the heading
pub const SUBTITLE: &str =
    "\"Golden Thread\" visualization aligned with the ISO/IEC 24744 formal metamodel";

/// Base name of the generated file
pub const OUTPUT_STEM: &str = "compliant_iso27001_nfrm_process_view_fixed";

/// Mermaid source of the process view
pub const DIAGRAM: &str = r#"
graph TD
    %% ISO 27001 / NFRM Process View v9.0 - ISO/IEC 24744 Compliant

    %% === SUBGRAPH 1: GOVERNANCE & CONTEXT ESTABLISHMENT (ISO 27001: 4, 6.1.2) ===
    subgraph "1. Governance & Context"
        direction TB
        CO
        RV
        style RV fill:#fee2e2, stroke:#fca5a5,color:#991b1b
    end

    %% === SUBGRAPH 2: RISK TREATMENT & EXECUTION (ISO 27001: 6.1.3, 8.3) ===
    subgraph "2. Risk Treatment & Execution"
        direction TB
        CTRL
    end

    %% === SUBGRAPH 3: EVIDENCE & ASSURANCE (ISO 27001: 9.1, 9.2) ===
    subgraph "3. Evidence & Assurance"
        direction LR
        EVD
        EVD_P(("<br/><b>Evidence</b><br/>(Abstract Proof)<br/><<Metamodel: EvidenceKind>>"))
        style EVD_P fill:#fefce8, stroke:#fde047,color:#854d0e, stroke-dasharray: 5 5
        ASSURE
    end

    %% === SUBGRAPH 4: OUTCOME & DECISION (ISO 27001: 9.3, 10) ===
    subgraph "4. Outcome & Decision"
        direction TB
        RR
        style RR fill:#fee2e2, stroke:#fca5a5,color:#991b1b
        SO
    end

    %% === SUBGRAPH 5: CONTINUOUS MONITORING (Consuming Process) ===
    subgraph "Continuous Monitoring (e.g., DORA)"
        MON
    end

    %% === RELATIONSHIPS (ISO/IEC 24744 verbs) ===
    RV -- "affects" --> CO
    CTRL -- "mitigates" --> RV
    CTRL -- "produces" --> EVD
    EVD -- "embodies" --> EVD_P
    EVD_P -- "supports" --> CO
    ASSURE -- "verifies" --> EVD
    ASSURE -- "evaluates" --> RR
    RR -- "informs" --> SO

    %% Informational feeds to the parallel monitoring process
    EVD -.->|provides data to| MON
    SO -.->|may trigger| MON

    %% === STYLING DEFINITIONS ===
    classDef goal fill:#e0e7ff, stroke:#a5b4fc,color:#3730a3, stroke-width:2px;
    classDef risk fill:#fee2e2, stroke:#fca5a5,color:#991b1b,stroke-width:2px;
    classDef workunit fill:#d1fae5, stroke:#86efac,color:#14532d,stroke-width:2px;
    classDef evidence fill:#fefce8, stroke:#fde047,color:#854d0e,stroke-width:2px;
    classDef assurance fill:#f3e8ff, stroke:#d8b4fe,color:#6b21a8,stroke-width:2px;
    classDef outcome fill:#e9d5ff, stroke:#c084fc,color:#581c87,stroke-width:2px;
    classDef monitoring fill:#e2e8f0, stroke:#64748b,color:#1e293b,stroke-width:2px;

    class CO goal;
    class RV,RR risk;
    class CTRL,ASSURE workunit;
    class EVD,EVD_P evidence;
    class SO outcome;
    class MON monitoring;
    "#;

/// A swatch in the page legend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    /// Label next to the swatch
    pub label: &'static str,
    /// Swatch fill colour
    pub fill: &'static str,
    /// Swatch border colour
    pub border: &'static str,
}

/// Legend shown above the diagram; colours match the `classDef`s in [`DIAGRAM`]
pub const LEGEND: [LegendEntry; 6] = [
    LegendEntry { label: "GoalKind", fill: "#e0e7ff", border: "#a5b4fc" },
    LegendEntry { label: "Risk / RiskKind", fill: "#fee2e2", border: "#fca5a5" },
    LegendEntry { label: "WorkUnitKind", fill: "#d1fae5", border: "#86efac" },
    LegendEntry { label: "WorkProduct / Evidence", fill: "#fefce8", border: "#fde047" },
    LegendEntry { label: "OutcomeKind", fill: "#e9d5ff", border: "#c084fc" },
    LegendEntry { label: "Consuming Process", fill: "#e2e8f0", border: "#64748b" },
];

static ANNOTATIONS: LazyLock<AnnotationTable> = LazyLock::new(build_annotations);

/// Annotation table of the built-in model, built once per process
#[must_use]
pub fn annotations() -> &'static AnnotationTable {
    &ANNOTATIONS
}

fn build_annotations() -> AnnotationTable {
    use MetamodelCategory::{
        ConsumingProcess, EvidenceKind, GoalKind, OutcomeKind, Risk, RiskKind, WorkProductKind,
        WorkUnitKind,
    };

    let records = [
        (
            "CO",
            Annotation::new(
                "Kontrollziel",
                "Control Objective",
                "Ein spezifisches, übergeordnetes Ziel zur Risikominderung, das durch Kontrollen erreicht werden soll.",
                "A specific, high-level target for risk mitigation to be achieved by controls.",
                GoalKind,
            ),
        ),
        (
            "RV",
            Annotation::new(
                "NFRM-Risikovektor",
                "NFRM Risk Vector",
                "Eine definierte Kategorie von nicht-finanziellen Risiken, die die Erreichung von Zielen gefährdet.",
                "A defined category of non-financial risk that threatens the achievement of goals.",
                RiskKind,
            ),
        ),
        (
            "CTRL",
            Annotation::new(
                "ISO 27002 Kontrolle",
                "ISO 27002 Control",
                "Eine spezifische Aktivität oder Maßnahme zur Minderung eines Risikos.",
                "A specific activity or measure performed to mitigate a risk.",
                WorkUnitKind,
            ),
        ),
        (
            "EVD",
            Annotation::new(
                "Operativer Nachweis",
                "Operational Evidence",
                "Ein konkretes Artefakt (z.B. ein Bericht, Logfile), das als Beweis dient.",
                "A concrete artifact (e.g., a report, log file) that serves as proof.",
                WorkProductKind,
            ),
        ),
        (
            "EVD_P",
            Annotation::new(
                "Beweis (Abstrakt)",
                "Evidence (Abstract)",
                "Das abstrakte Konzept des Beweises, das durch ein operatives Artefakt verkörpert wird.",
                "The abstract concept of proof that is embodied by an operational artifact.",
                EvidenceKind,
            ),
        ),
        (
            "ASSURE",
            Annotation::new(
                "Assurance-Aktivität",
                "Assurance Activity",
                "Eine unabhängige Überprüfung (z.B. RCSA, Audit) zur Verifizierung der Kontrollwirksamkeit.",
                "An independent review (e.g., RCSA, Audit) to verify control effectiveness.",
                WorkUnitKind,
            ),
        ),
        (
            "RR",
            Annotation::new(
                "Restrisiko",
                "Residual Risk",
                "Das verbleibende Risiko nach Anwendung von Kontrollen, bewertet durch die Assurance-Aktivität.",
                "The risk remaining after controls are applied, evaluated by the assurance activity.",
                Risk,
            ),
        ),
        (
            "SO",
            Annotation::new(
                "Sign-Off / Akzeptanz",
                "Sign-Off / Acceptance",
                "Die formale Entscheidung über das Restrisiko durch den Risikoverantwortlichen.",
                "The formal decision on residual risk made by the risk owner.",
                OutcomeKind,
            ),
        ),
        (
            "MON",
            Annotation::new(
                "ICT Incident Monitoring",
                "ICT Incident Monitoring",
                "Ein konsumierender Prozess, der Daten aus dem Kernprozess zur kontinuierlichen Überwachung nutzt.",
                "A consuming process that uses data from the core process for continuous monitoring.",
                ConsumingProcess,
            ),
        ),
    ];

    let mut table = AnnotationTable::new();
    for (id, annotation) in records {
        table.insert(id, annotation);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_ids_in_order() {
        let ids: Vec<_> = annotations().ids().collect();
        assert_eq!(
            ids,
            vec!["CO", "RV", "CTRL", "EVD", "EVD_P", "ASSURE", "RR", "SO", "MON"]
        );
    }

    #[test]
    fn test_table_is_built_once() {
        assert!(std::ptr::eq(annotations(), annotations()));
    }

    #[test]
    fn test_legend_colours_appear_in_diagram() {
        for entry in LEGEND {
            assert!(DIAGRAM.contains(entry.fill), "{} fill missing", entry.label);
            assert!(DIAGRAM.contains(entry.border), "{} border missing", entry.label);
        }
    }
}
