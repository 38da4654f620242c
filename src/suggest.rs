//! Improvement suggestions and issue drafts.

use serde::{Deserialize, Serialize};

use crate::score::{self, Priority};
use crate::stats::RepositoryDocStats;

/// Function coverage (percent) below which undocumented functions are flagged.
pub const FUNCTION_COVERAGE_TARGET: f64 = 80.0;
/// Class coverage (percent) below which undocumented classes are flagged.
pub const CLASS_COVERAGE_TARGET: f64 = 90.0;
/// README score below which missing sections are flagged.
pub const README_TARGET: u32 = 70;
/// README score below which a full rewrite is suggested.
pub const README_OVERHAUL_BELOW: u32 = 50;
/// More suggestions than this make an issue high-priority labelled.
const HIGH_PRIORITY_LABEL_ABOVE: usize = 3;

/// Plain-text suggestions for one repository. Rules are independent and
/// several can fire together.
pub fn improvement_suggestions(stats: &RepositoryDocStats, backend_marker: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    let function_coverage =
        score::coverage_percent(stats.documented_functions, stats.total_functions);
    if function_coverage < FUNCTION_COVERAGE_TARGET {
        suggestions.push(format!(
            "Add docstrings to {} undocumented functions",
            stats.undocumented_functions()
        ));
    }

    if stats.total_classes > 0 {
        let class_coverage =
            score::coverage_percent(stats.documented_classes, stats.total_classes);
        if class_coverage < CLASS_COVERAGE_TARGET {
            suggestions.push(format!(
                "Add docstrings to {} undocumented classes",
                stats.undocumented_classes()
            ));
        }
    }

    if stats.readme_score < README_TARGET {
        let text = "Improve README with missing sections: installation, usage, examples";
        suggestions.push(text.to_string());
    }

    if !stats.api_docs_present && stats.repo_name.contains(backend_marker) {
        suggestions.push("Add comprehensive API documentation (Swagger/OpenAPI)".to_string());
    }

    if stats.readme_score < README_OVERHAUL_BELOW {
        suggestions
            .push("README needs major overhaul - consider using the standard template".to_string());
    }

    suggestions
}

/// An issue describing the documentation work a repository needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub repo_name: String,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub labels: Vec<String>,
}

impl IssueDraft {
    /// Build an issue for `stats`; `None` when there is nothing to suggest.
    pub fn for_repository(stats: &RepositoryDocStats, backend_marker: &str) -> Option<Self> {
        let suggestions = improvement_suggestions(stats, backend_marker);
        if suggestions.is_empty() {
            return None;
        }

        let priority = Priority::for_score(score::overall_score(stats));
        let size_label = if suggestions.len() > HIGH_PRIORITY_LABEL_ABOVE {
            "high-priority"
        } else {
            "medium-priority"
        };
        let labels = vec![
            "documentation".to_string(),
            "enhancement".to_string(),
            size_label.to_string(),
        ];

        let body = render_body(stats, &suggestions, priority, &labels);

        Some(Self {
            repo_name: stats.repo_name.clone(),
            title: format!("Documentation Enhancement - {}", stats.repo_name),
            body,
            priority,
            labels,
        })
    }
}

fn render_body(
    stats: &RepositoryDocStats,
    suggestions: &[String],
    priority: Priority,
    labels: &[String],
) -> String {
    let mut lines = vec![
        "# Documentation Enhancement Required".to_string(),
        String::new(),
        "## Current Status".to_string(),
        format!(
            "- **Function Documentation Coverage:** {:.1}%",
            score::coverage_percent(stats.documented_functions, stats.total_functions)
        ),
        format!(
            "- **Class Documentation Coverage:** {:.1}%",
            score::coverage_percent(stats.documented_classes, stats.total_classes)
        ),
        format!("- **README Score:** {}/100", stats.readme_score),
        format!(
            "- **API Documentation:** {}",
            if stats.api_docs_present { "✅" } else { "❌" }
        ),
        String::new(),
        "## Suggested Improvements".to_string(),
    ];
    lines.extend(suggestions.iter().map(|s| format!("- {}", s)));
    lines.extend([
        String::new(),
        "## Resources".to_string(),
        "- [Documentation Templates](../docs/standards/Documentation_Templates.md)".to_string(),
        "- [Enhancement Roadmap](../DOCUMENTATION_ENHANCEMENT_ROADMAP.md)".to_string(),
        String::new(),
        format!("**Priority:** {}", priority),
        "**Assignee:** Documentation Team".to_string(),
        format!("**Labels:** {}", labels.join(", ")),
        String::new(),
        "---".to_string(),
        "*Auto-generated by Documentation Enhancement System*".to_string(),
        format!("*Last Updated: {}*", stats.last_updated.to_rfc3339()),
    ]);
    lines.join("\n")
}
