//! Per-repository documentation statistics.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::extract::DeclarationCounts;

/// Documentation statistics for one repository, captured once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDocStats {
    pub repo_name: String,
    pub total_functions: usize,
    pub documented_functions: usize,
    pub total_classes: usize,
    pub documented_classes: usize,
    /// README quality, 0-100
    pub readme_score: u32,
    pub api_docs_present: bool,
    pub last_updated: DateTime<Local>,
}

impl RepositoryDocStats {
    pub fn new(
        repo_name: impl Into<String>,
        counts: DeclarationCounts,
        readme_score: u32,
        api_docs_present: bool,
        last_updated: DateTime<Local>,
    ) -> Self {
        Self {
            repo_name: repo_name.into(),
            total_functions: counts.total_functions,
            documented_functions: counts.documented_functions,
            total_classes: counts.total_classes,
            documented_classes: counts.documented_classes,
            readme_score,
            api_docs_present,
            last_updated,
        }
    }

    pub fn undocumented_functions(&self) -> usize {
        self.total_functions.saturating_sub(self.documented_functions)
    }

    pub fn undocumented_classes(&self) -> usize {
        self.total_classes.saturating_sub(self.documented_classes)
    }
}
