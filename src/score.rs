//! Scoring for documentation coverage.
//!
//! The overall score (0-100) is a weighted sum of function coverage, class
//! coverage, README quality and API-doc presence, truncated to an integer.

use serde::{Deserialize, Serialize};

use crate::stats::RepositoryDocStats;

/// Point weights for each score component.
pub mod weights {
    pub const FUNCTION_COVERAGE: f64 = 40.0;
    pub const CLASS_COVERAGE: f64 = 20.0;
    /// Applied to the 0-100 README score, i.e. 0.3 per point
    pub const README_NUMERATOR: f64 = 3.0;
    pub const README_DENOMINATOR: f64 = 10.0;
    pub const API_DOCS: f64 = 10.0;
}

/// Overall score below which an improvement is high priority.
pub const HIGH_PRIORITY_BELOW: u32 = 60;

/// Coverage percentage; a zero total counts as one so the result is never NaN.
pub fn coverage_percent(documented: usize, total: usize) -> f64 {
    documented as f64 * 100.0 / total.max(1) as f64
}

/// `weight` scaled by the documented share of `total`.
///
/// Documented counts above the total are clamped, so the result never
/// exceeds `weight`.
fn weighted_coverage(weight: f64, documented: usize, total: usize) -> f64 {
    weight * documented.min(total) as f64 / total.max(1) as f64
}

/// Overall documentation score for a repository.
pub fn overall_score(stats: &RepositoryDocStats) -> u32 {
    let function_score = weighted_coverage(
        weights::FUNCTION_COVERAGE,
        stats.documented_functions,
        stats.total_functions,
    );
    let class_score = weighted_coverage(
        weights::CLASS_COVERAGE,
        stats.documented_classes,
        stats.total_classes,
    );
    let readme_score = stats.readme_score.min(100) as f64 * weights::README_NUMERATOR
        / weights::README_DENOMINATOR;
    let api_score = if stats.api_docs_present {
        weights::API_DOCS
    } else {
        0.0
    };

    (function_score + class_score + readme_score + api_score) as u32
}

/// Priority attached to an improvement issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn for_score(overall: u32) -> Self {
        if overall < HIGH_PRIORITY_BELOW {
            Priority::High
        } else {
            Priority::Medium
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
        }
    }
}
