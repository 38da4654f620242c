//! docaudit - documentation coverage and README footer auditing.
//!
//! Two independent batch pipelines:
//!
//! - Coverage: for each configured repository, count documented functions
//!   and classes, score the README against an essential-section checklist,
//!   detect API documentation, then aggregate into an ecosystem report with
//!   improvement suggestions.
//! - Footers: find every README under a root, check each for the footer
//!   convention, and write a Markdown summary plus per-file JSON data.
//!
//! # Architecture
//!
//! - `config`: YAML configuration with defaults for both pipelines
//! - `extract`: declaration extractors (tree-sitter for Python, regex
//!   heuristics for JavaScript/TypeScript)
//! - `readme`, `apidocs`: README scoring and API-doc presence
//! - `score`, `stats`, `suggest`: per-repository scoring and suggestions
//! - `analyzer`, `report`, `sink`: the coverage run and its outputs
//! - `footer`: README footer validation and its report
//!
//! # Adding a New Language
//!
//! Implement `DeclarationExtractor` in `src/extract/` and add it to
//! `default_extractors` at the right detection priority.

pub mod analyzer;
pub mod apidocs;
pub mod cli;
pub mod config;
pub mod extract;
pub mod footer;
pub mod logging;
pub mod readme;
pub mod report;
pub mod score;
pub mod sink;
pub mod stats;
pub mod suggest;

pub use analyzer::{CoverageAnalyzer, RunOptions, RunOutcome};
pub use config::Config;
pub use extract::{DeclarationCounts, DeclarationExtractor, ExtractionStrategy};
pub use footer::{FooterAnalysis, FooterResult, FooterResults};
pub use report::EcosystemReport;
pub use sink::{HttpSink, LoggingSink, ReportingSink, SinkError};
pub use stats::RepositoryDocStats;
