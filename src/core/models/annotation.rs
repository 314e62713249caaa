//! Annotation record and metamodel category
//!
//! An annotation carries the bilingual label and definition shown as a tooltip
//! over one diagram node, plus the ISO/IEC 24744 metamodel class of that node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metamodel class assigned to a diagram node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetamodelCategory {
    /// An objective the process is meant to achieve
    GoalKind,
    /// A category of risk threatening a goal
    RiskKind,
    /// An activity performed within the process
    WorkUnitKind,
    /// A tangible artifact produced by a work unit
    WorkProductKind,
    /// Abstract proof embodied by work products
    EvidenceKind,
    /// A concrete, evaluated risk
    Risk,
    /// A decision or result of the process
    OutcomeKind,
    /// A downstream process consuming data from the core process
    #[serde(rename = "Consuming Process")]
    ConsumingProcess,
}

impl MetamodelCategory {
    /// Every category, in legend order
    pub const ALL: [Self; 8] = [
        Self::GoalKind,
        Self::RiskKind,
        Self::WorkUnitKind,
        Self::WorkProductKind,
        Self::EvidenceKind,
        Self::Risk,
        Self::OutcomeKind,
        Self::ConsumingProcess,
    ];

    /// Name as it appears in tooltips and serialized data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalKind => "GoalKind",
            Self::RiskKind => "RiskKind",
            Self::WorkUnitKind => "WorkUnitKind",
            Self::WorkProductKind => "WorkProductKind",
            Self::EvidenceKind => "EvidenceKind",
            Self::Risk => "Risk",
            Self::OutcomeKind => "OutcomeKind",
            Self::ConsumingProcess => "Consuming Process",
        }
    }
}

impl fmt::Display for MetamodelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetamodelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown metamodel category: {s}"))
    }
}

/// Bilingual tooltip content for a single diagram node
///
/// The node id is not part of the record; it is the key under which the
/// record is stored in an [`AnnotationTable`](super::AnnotationTable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// German label
    #[serde(rename = "de")]
    pub label_native: String,
    /// English label
    #[serde(rename = "en")]
    pub label_alt: String,
    /// German definition
    #[serde(rename = "de_def")]
    pub definition_native: String,
    /// English definition
    #[serde(rename = "en_def")]
    pub definition_alt: String,
    /// Metamodel class
    #[serde(rename = "meta")]
    pub category: MetamodelCategory,
}

impl Annotation {
    /// Create a new annotation
    #[must_use]
    pub fn new(
        label_native: &str,
        label_alt: &str,
        definition_native: &str,
        definition_alt: &str,
        category: MetamodelCategory,
    ) -> Self {
        Self {
            label_native: label_native.to_string(),
            label_alt: label_alt.to_string(),
            definition_native: definition_native.to_string(),
            definition_alt: definition_alt.to_string(),
            category,
        }
    }

    /// Tooltip text attached to the rendered node.
    ///
    /// Must stay identical to the string built by the page script.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!(
            " {}: {}\n[EN] {}: {}\n\n[Metamodel: {}]",
            self.label_native,
            self.definition_native,
            self.label_alt,
            self.definition_alt,
            self.category
        )
    }
}
