//! Ecosystem documentation report.
//!
//! Supports two output forms:
//! - JSON: persisted under the reports directory for programmatic consumption
//! - Pretty: colored console summary for human readability

use chrono::{DateTime, Local};
use colored::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::score;
use crate::stats::RepositoryDocStats;

// =============================================================================
// JSON Format
// =============================================================================

/// Aggregate report over every analyzed repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemReport {
    pub generated_at: DateTime<Local>,
    pub total_repositories: usize,
    pub repositories: Vec<RepositoryReport>,
    pub ecosystem_metrics: EcosystemMetrics,
}

/// One repository's entry in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub name: String,
    pub documentation_coverage: DocumentationCoverage,
    pub readme_score: u32,
    pub api_documentation: bool,
    pub overall_score: u32,
    pub last_updated: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationCoverage {
    pub functions: Coverage,
    pub classes: Coverage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    pub total: usize,
    pub documented: usize,
    pub percentage: f64,
}

impl Coverage {
    fn new(total: usize, documented: usize) -> Self {
        Self {
            total,
            documented,
            percentage: score::coverage_percent(documented, total),
        }
    }
}

/// Ecosystem-wide aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemMetrics {
    /// Documented functions over all functions, in percent
    pub overall_documentation_coverage: f64,
    pub repositories_with_api_docs: usize,
    pub average_readme_score: f64,
}

impl RepositoryReport {
    pub fn from_stats(stats: &RepositoryDocStats) -> Self {
        Self {
            name: stats.repo_name.clone(),
            documentation_coverage: DocumentationCoverage {
                functions: Coverage::new(stats.total_functions, stats.documented_functions),
                classes: Coverage::new(stats.total_classes, stats.documented_classes),
            },
            readme_score: stats.readme_score,
            api_documentation: stats.api_docs_present,
            overall_score: score::overall_score(stats),
            last_updated: stats.last_updated,
        }
    }
}

/// Build the report for `stats`.
pub fn build_report(
    stats: &[RepositoryDocStats],
    generated_at: DateTime<Local>,
) -> EcosystemReport {
    let repositories: Vec<RepositoryReport> =
        stats.iter().map(RepositoryReport::from_stats).collect();

    let total_functions: usize = stats.iter().map(|s| s.total_functions).sum();
    let documented_functions: usize = stats.iter().map(|s| s.documented_functions).sum();
    let readme_total: u64 = stats.iter().map(|s| s.readme_score as u64).sum();

    let ecosystem_metrics = EcosystemMetrics {
        overall_documentation_coverage: score::coverage_percent(
            documented_functions,
            total_functions,
        ),
        repositories_with_api_docs: stats.iter().filter(|s| s.api_docs_present).count(),
        average_readme_score: readme_total as f64 / stats.len().max(1) as f64,
    };

    EcosystemReport {
        generated_at,
        total_repositories: repositories.len(),
        repositories,
        ecosystem_metrics,
    }
}

/// File name for a report generated at `at`.
pub fn report_file_name(at: &DateTime<Local>) -> String {
    format!("documentation_report_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Write `report` as pretty JSON under `reports_dir`, creating it if needed.
pub fn write_report(report: &EcosystemReport, reports_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)
        .map_err(|e| anyhow::anyhow!("creating {}: {}", reports_dir.display(), e))?;

    let path = reports_dir.join(report_file_name(&report.generated_at));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json).map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;
    Ok(path)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Print the console summary.
pub fn write_pretty(report: &EcosystemReport) {
    let metrics = &report.ecosystem_metrics;

    println!();
    println!("  {}", "📊 Documentation Analysis Summary".cyan().bold());
    println!("  {}", "=".repeat(50).dimmed());
    println!("  Total Repositories Analyzed: {}", report.total_repositories);
    print!("  Overall Documentation Coverage: ");
    write_colored_percent(metrics.overall_documentation_coverage);
    println!();
    println!("  Repositories with API Docs: {}", metrics.repositories_with_api_docs);
    println!("  Average README Score: {:.1}/100", metrics.average_readme_score);

    if report.repositories.is_empty() {
        println!();
        return;
    }

    println!();
    println!("  {}", "📋 Repository Details:".bold());
    for repo in &report.repositories {
        println!();
        println!("  {}:", repo.name.blue());
        print!("    Overall Score: ");
        write_colored_score(repo.overall_score);
        println!("/100");
        print!("    Function Coverage: ");
        write_colored_percent(repo.documentation_coverage.functions.percentage);
        println!();
        println!("    README Score: {}/100", repo.readme_score);
        println!("    API Docs: {}", if repo.api_documentation { "✅" } else { "❌" });
    }
    println!();
}

fn write_colored_score(s: u32) {
    match s {
        s if s >= 80 => print!("{}", s.to_string().green().bold()),
        s if s >= 60 => print!("{}", s.to_string().green()),
        s if s >= 40 => print!("{}", s.to_string().yellow()),
        _ => print!("{}", s.to_string().red()),
    }
}

fn write_colored_percent(p: f64) {
    let text = format!("{:.1}%", p);
    match p {
        p if p >= 80.0 => print!("{}", text.green()),
        p if p >= 50.0 => print!("{}", text.yellow()),
        _ => print!("{}", text.red()),
    }
}
