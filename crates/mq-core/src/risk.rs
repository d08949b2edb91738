//! Risk scoring: weighted findings summed into one severity band

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Well-known risk categories
pub mod category {
    pub const DROP_TABLE: &str = "drop_table";
    pub const MULTIPLE_HEADS: &str = "multiple_heads";
    pub const DROP_COLUMN: &str = "drop_column";
    pub const NON_NULL_WITHOUT_DEFAULT: &str = "non_null_without_default";
    pub const BRANCH_BEHIND_TARGET: &str = "branch_behind_target";
    pub const RISKY_TYPE_CHANGE: &str = "risky_type_change";
    pub const LARGE_TABLE_ALTER: &str = "large_table_alter";
}

/// Weight given to a category missing from the weight table
pub const DEFAULT_CATEGORY_WEIGHT: u32 = 5;

/// Overall severity band derived from a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    /// Map a total score onto its band: <=3 low, 4-6 medium, 7-9 high, >=10 critical
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=3 => RiskSeverity::Low,
            4..=6 => RiskSeverity::Medium,
            7..=9 => RiskSeverity::High,
            _ => RiskSeverity::Critical,
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskSeverity::Low => write!(f, "LOW"),
            RiskSeverity::Medium => write!(f, "MEDIUM"),
            RiskSeverity::High => write!(f, "HIGH"),
            RiskSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Immutable category -> weight table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskWeights {
    weights: BTreeMap<String, u32>,
}

impl Default for RiskWeights {
    fn default() -> Self {
        let weights = [
            (category::DROP_TABLE, 10),
            (category::MULTIPLE_HEADS, 9),
            (category::DROP_COLUMN, 8),
            (category::NON_NULL_WITHOUT_DEFAULT, 7),
            (category::BRANCH_BEHIND_TARGET, 5),
            (category::RISKY_TYPE_CHANGE, 6),
            (category::LARGE_TABLE_ALTER, 6),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();
        Self { weights }
    }
}

impl RiskWeights {
    /// Default weights with the given categories replaced or added
    pub fn with_overrides(mut self, overrides: &HashMap<String, u32>) -> Self {
        for (name, weight) in overrides {
            self.weights.insert(name.clone(), *weight);
        }
        self
    }

    /// Weight of a category, falling back to [`DEFAULT_CATEGORY_WEIGHT`]
    pub fn weight(&self, category: &str) -> u32 {
        self.weights
            .get(category)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_WEIGHT)
    }
}

/// A single scored finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub category: String,
    pub score: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Ordered findings and their derived total.
///
/// Serializes the derived total, severity and pass flag next to the findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RiskReport {
    findings: Vec<RiskFinding>,
}

impl RiskReport {
    /// Findings in the order they were added
    pub fn findings(&self) -> &[RiskFinding] {
        &self.findings
    }

    /// Sum of all finding scores, saturating at `u32::MAX`
    pub fn total_score(&self) -> u32 {
        self.findings
            .iter()
            .fold(0u32, |total, f| total.saturating_add(f.score))
    }

    /// Severity band of the total score
    pub fn severity(&self) -> RiskSeverity {
        RiskSeverity::from_score(self.total_score())
    }

    /// True when nothing risky was found
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

impl Serialize for RiskReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RiskReport", 4)?;
        state.serialize_field("total_score", &self.total_score())?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("findings", &self.findings)?;
        state.end()
    }
}

/// Accumulates findings for one analysis pass
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: RiskWeights,
    report: RiskReport,
}

impl RiskScorer {
    /// Create a scorer with the given weight table
    pub fn new(weights: RiskWeights) -> Self {
        Self {
            weights,
            report: RiskReport::default(),
        }
    }

    /// The weight table in use
    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    /// Record a finding scored from the weight table. Unknown categories weigh 5.
    pub fn add_finding(
        &mut self,
        category: &str,
        description: impl Into<String>,
        file_path: Option<&str>,
    ) {
        let score = self.weights.weight(category);
        self.report.findings.push(RiskFinding {
            category: category.to_string(),
            score,
            description: description.into(),
            file_path: file_path.filter(|p| !p.is_empty()).map(str::to_string),
        });
    }

    pub fn total_score(&self) -> u32 {
        self.report.total_score()
    }

    pub fn severity(&self) -> RiskSeverity {
        self.report.severity()
    }

    /// Strictly greater than `threshold`
    pub fn exceeds_threshold(&self, threshold: u32) -> bool {
        self.total_score() > threshold
    }

    /// Drop all findings, keeping the weights
    pub fn reset(&mut self) {
        self.report = RiskReport::default();
    }

    pub fn report(&self) -> &RiskReport {
        &self.report
    }

    pub fn into_report(self) -> RiskReport {
        self.report
    }
}

#[cfg(test)]
#[path = "risk_test.rs"]
mod tests;
