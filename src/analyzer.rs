//! Documentation coverage analyzer.
//!
//! Composes the declaration counter, README scorer and API-doc check into
//! per-repository statistics, then drives one full run: build the report,
//! persist it, print the summary and invoke the optional sink side effects.

use chrono::Local;
use globset::GlobSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::apidocs;
use crate::config::CoverageConfig;
use crate::extract::{self, DeclarationExtractor};
use crate::readme;
use crate::report::{self, EcosystemReport};
use crate::sink::ReportingSink;
use crate::stats::RepositoryDocStats;
use crate::suggest::IssueDraft;

/// Optional side effects of a run; both off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub send_metrics: bool,
    pub create_issues: bool,
    /// Print the console summary after writing the report
    pub print_summary: bool,
}

/// Result of [`CoverageAnalyzer::run`].
#[derive(Debug)]
pub struct RunOutcome {
    pub report: EcosystemReport,
    pub stats: Vec<RepositoryDocStats>,
    pub report_path: PathBuf,
}

pub struct CoverageAnalyzer {
    config: CoverageConfig,
    extractors: Vec<Box<dyn DeclarationExtractor>>,
    indicators: GlobSet,
}

impl CoverageAnalyzer {
    /// Create an analyzer with the built-in extractors.
    pub fn new(config: CoverageConfig) -> anyhow::Result<Self> {
        Self::with_extractors(config, extract::default_extractors())
    }

    pub fn with_extractors(
        config: CoverageConfig,
        extractors: Vec<Box<dyn DeclarationExtractor>>,
    ) -> anyhow::Result<Self> {
        let indicators = apidocs::indicator_set(&config.api_doc_indicators)?;
        Ok(Self {
            config,
            extractors,
            indicators,
        })
    }

    /// Analyze one repository under the base path.
    ///
    /// Returns `None` (after a warning) when the directory does not exist.
    pub fn analyze_repository(&self, repo_name: &str) -> Option<RepositoryDocStats> {
        let repo_path = self.config.base_path.join(repo_name);
        if !repo_path.exists() {
            warn!("Repository {} not found at {}", repo_name, repo_path.display());
            return None;
        }

        info!("Analyzing repository: {}", repo_name);

        let counts = extract::count_declarations(&repo_path, &self.extractors);
        let readme_score = readme::score_readme(&repo_path);
        let api_docs_present = apidocs::has_api_docs(&repo_path, &self.indicators);

        Some(RepositoryDocStats::new(
            repo_name,
            counts,
            readme_score,
            api_docs_present,
            Local::now(),
        ))
    }

    /// Analyze every configured repository, skipping missing ones.
    pub fn analyze_all(&self) -> Vec<RepositoryDocStats> {
        self.config
            .repositories
            .iter()
            .filter_map(|name| self.analyze_repository(name))
            .collect()
    }

    /// Run the full pipeline.
    ///
    /// Only a failure to write the report is fatal; sink errors are logged
    /// per repository and the run continues.
    pub fn run(&self, sink: &dyn ReportingSink, options: RunOptions) -> anyhow::Result<RunOutcome> {
        info!("Starting documentation analysis");

        let stats = self.analyze_all();
        let report = report::build_report(&stats, Local::now());

        let report_path = report::write_report(&report, &self.config.reports_path())?;
        info!("Documentation report saved to {}", report_path.display());

        if options.print_summary {
            report::write_pretty(&report);
        }

        if options.send_metrics {
            for repo in &report.repositories {
                if let Err(e) = sink.publish_metrics(repo) {
                    error!("Error sending metrics for {}: {}", repo.name, e);
                }
            }
        }

        if options.create_issues {
            for repo_stats in &stats {
                let marker = &self.config.backend_marker;
                let Some(issue) = IssueDraft::for_repository(repo_stats, marker) else {
                    continue;
                };
                if let Err(e) = sink.file_issue(&issue) {
                    error!("Error filing issue for {}: {}", issue.repo_name, e);
                }
            }
        }

        Ok(RunOutcome {
            report,
            stats,
            report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RepositoryReport;
    use crate::sink::SinkError;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSink {
        metrics: RefCell<Vec<String>>,
        issues: RefCell<Vec<String>>,
        fail_metrics: bool,
    }

    impl ReportingSink for RecordingSink {
        fn publish_metrics(&self, repo: &RepositoryReport) -> Result<(), SinkError> {
            self.metrics.borrow_mut().push(repo.name.clone());
            if self.fail_metrics {
                return Err(SinkError::Status(500));
            }
            Ok(())
        }

        fn file_issue(&self, issue: &IssueDraft) -> Result<(), SinkError> {
            self.issues.borrow_mut().push(issue.repo_name.clone());
            Ok(())
        }
    }

    fn config_for(base: &std::path::Path, repos: &[&str]) -> CoverageConfig {
        CoverageConfig {
            base_path: base.to_path_buf(),
            repositories: repos.iter().map(|s| s.to_string()).collect(),
            ..CoverageConfig::default()
        }
    }

    fn write_js_repo(base: &std::path::Path, name: &str) {
        let repo = base.join(name);
        std::fs::create_dir_all(repo.join("src")).unwrap();
        std::fs::write(
            repo.join("src/index.js"),
            concat!(
                "/** Adds. */\nfunction add(a, b) { return a + b; }\n",
                "function sub(a, b) { return a - b; }\n",
            ),
        )
        .unwrap();
        std::fs::write(repo.join("README.md"), "# Title\n\nUsage and license.\n").unwrap();
    }

    #[test]
    fn test_missing_repository_is_skipped() {
        let temp = TempDir::new().unwrap();
        let analyzer = CoverageAnalyzer::new(config_for(temp.path(), &["Nope"])).unwrap();
        assert!(analyzer.analyze_repository("Nope").is_none());
        assert!(analyzer.analyze_all().is_empty());
    }

    #[test]
    fn test_analyze_js_repository() {
        let temp = TempDir::new().unwrap();
        write_js_repo(temp.path(), "RiggerHub-web");
        let analyzer = CoverageAnalyzer::new(config_for(temp.path(), &["RiggerHub-web"])).unwrap();

        let stats = analyzer.analyze_repository("RiggerHub-web").unwrap();
        assert_eq!(stats.repo_name, "RiggerHub-web");
        assert_eq!(stats.total_functions, 2);
        assert_eq!(stats.documented_functions, 1);
        assert_eq!(stats.total_classes, 0);
        assert_eq!(stats.readme_score, 20);
        assert!(!stats.api_docs_present);
    }

    #[test]
    fn test_run_without_side_effects() {
        let temp = TempDir::new().unwrap();
        write_js_repo(temp.path(), "RiggerHub-web");
        let analyzer =
            CoverageAnalyzer::new(config_for(temp.path(), &["RiggerHub-web", "Gone"])).unwrap();
        let sink = RecordingSink::default();

        let outcome = analyzer.run(&sink, RunOptions::default()).unwrap();

        assert_eq!(outcome.report.total_repositories, 1);
        assert!(outcome.report_path.starts_with(temp.path().join("docs/reports")));
        assert!(outcome.report_path.exists());
        assert!(sink.metrics.borrow().is_empty());
        assert!(sink.issues.borrow().is_empty());
    }

    #[test]
    fn test_run_sink_failures_do_not_abort() {
        let temp = TempDir::new().unwrap();
        write_js_repo(temp.path(), "RiggerBackend");
        write_js_repo(temp.path(), "RiggerShared");
        let analyzer =
            CoverageAnalyzer::new(config_for(temp.path(), &["RiggerBackend", "RiggerShared"]))
                .unwrap();
        let sink = RecordingSink {
            fail_metrics: true,
            ..RecordingSink::default()
        };
        let options = RunOptions {
            send_metrics: true,
            create_issues: true,
            print_summary: false,
        };

        let outcome = analyzer.run(&sink, options).unwrap();

        assert_eq!(outcome.stats.len(), 2);
        assert_eq!(*sink.metrics.borrow(), vec!["RiggerBackend", "RiggerShared"]);
        assert_eq!(*sink.issues.borrow(), vec!["RiggerBackend", "RiggerShared"]);
    }
}
