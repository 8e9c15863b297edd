use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionDetail {
    /// Classification tag of the rule that fired, e.g. `tautology_injection`.
    pub pattern: String,
    /// Character offset of the offending fragment in the analyzed SQL text.
    pub position: usize,
    /// Length of `fragment`, in characters.
    pub length: usize,
    /// Offending source text.
    pub fragment: String,
}

impl InjectionDetail {
    /// Build a detail whose `length` is derived from `fragment`.
    pub fn new(pattern: impl Into<String>, position: usize, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            pattern: pattern.into(),
            position,
            length: fragment.chars().count(),
            fragment,
        }
    }
}

/// Coarse grading of a detection result by number of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing detected.
    None,
    /// One finding.
    Low,
    /// Two findings.
    Medium,
    /// Three or four findings.
    High,
    /// Five findings or more.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::None => write!(f, "none"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Caller-owned accumulator of findings.
///
/// Fields are private so that `is_detected` holds exactly when `details` is
/// non-empty; [`DetectionResult::record`] is the only way to add a finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    is_detected: bool,
    details: Vec<InjectionDetail>,
}

impl DetectionResult {
    /// Empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding and mark the result as detected.
    pub fn record(&mut self, detail: InjectionDetail) {
        self.details.push(detail);
        self.is_detected = true;
    }

    /// Append every finding of `other`, in order.
    pub fn absorb(&mut self, other: &DetectionResult) {
        for detail in &other.details {
            self.record(detail.clone());
        }
    }

    /// Whether at least one finding was recorded.
    pub fn is_detected(&self) -> bool {
        self.is_detected
    }

    /// Findings in the order they were recorded.
    pub fn details(&self) -> &[InjectionDetail] {
        &self.details
    }

    /// Grade the result by its number of findings.
    pub fn severity(&self) -> Severity {
        if !self.is_detected {
            return Severity::None;
        }
        match self.details.len() {
            0 => Severity::None,
            1 => Severity::Low,
            2 => Severity::Medium,
            3 | 4 => Severity::High,
            _ => Severity::Critical,
        }
    }
}
