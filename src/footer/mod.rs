//! README footer validation.
//!
//! Discovers every `README.md` under a root and checks each for the footer
//! convention: brand link, NGO and enterprise wording, a horizontal-rule
//! footer delimiter and centered-footer markup. HTML markers are matched
//! case-sensitively; wording checks run on lower-cased content.

pub mod report;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FooterConfig;

pub use report::{is_priority, render_report, FooterSummary};

/// Number of trailing characters kept as the footer preview.
pub const PREVIEW_CHARS: usize = 500;

/// A horizontal rule closing a line.
static FOOTER_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)---\s*$").unwrap());

const CENTERED_MARKER: &str = "align=\"center\"";
const ENTERPRISE_WORD: &str = "enterprise";
const BUILT_WITH_PHRASES: &[&str] = &["built with", "powered by"];

/// Footer markers found in one README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterAnalysis {
    pub has_tiation_link: bool,
    pub has_enterprise_mention: bool,
    pub has_ngo_mention: bool,
    pub has_footer_section: bool,
    pub has_centered_footer: bool,
    pub has_built_with: bool,
    /// Length of the content in characters
    pub content_length: usize,
    pub ends_with_footer: bool,
    /// Last [`PREVIEW_CHARS`] characters with newlines escaped as `\n`
    pub footer_preview: String,
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FooterResult {
    Analyzed(FooterAnalysis),
    Unreadable { error: String },
}

impl FooterResult {
    pub fn analysis(&self) -> Option<&FooterAnalysis> {
        match self {
            FooterResult::Analyzed(a) => Some(a),
            FooterResult::Unreadable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FooterResult::Analyzed(_) => None,
            FooterResult::Unreadable { error } => Some(error),
        }
    }
}

/// Per-file results keyed by root-relative path with `/` separators.
pub type FooterResults = BTreeMap<String, FooterResult>;

/// Marker checks configured for one run.
#[derive(Debug, Clone)]
pub struct FooterRules {
    pub brand_link: String,
    ngo_phrases: Vec<String>,
}

impl FooterRules {
    pub fn new(brand_link: impl Into<String>, ngo_phrases: &[String]) -> Self {
        Self {
            brand_link: brand_link.into(),
            ngo_phrases: ngo_phrases.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &FooterConfig) -> Self {
        Self::new(config.brand_link.clone(), &config.ngo_phrases)
    }

    /// Inspect README `content`.
    pub fn analyze(&self, content: &str) -> FooterAnalysis {
        let lower = content.to_lowercase();
        let trimmed = content.trim();

        FooterAnalysis {
            has_tiation_link: content.contains(&self.brand_link),
            has_enterprise_mention: lower.contains(ENTERPRISE_WORD),
            has_ngo_mention: self.ngo_phrases.iter().any(|p| lower.contains(p.as_str())),
            has_footer_section: FOOTER_RULE.is_match(content),
            has_centered_footer: content.contains(CENTERED_MARKER),
            has_built_with: BUILT_WITH_PHRASES.iter().any(|p| lower.contains(p)),
            content_length: content.chars().count(),
            ends_with_footer: trimmed.ends_with("</div>") || trimmed.ends_with("---"),
            footer_preview: preview(content),
        }
    }

    /// Read and inspect one file; read failures become an error record.
    pub fn analyze_file(&self, path: &Path) -> FooterResult {
        match std::fs::read_to_string(path) {
            Ok(content) => FooterResult::Analyzed(self.analyze(&content)),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                FooterResult::Unreadable {
                    error: format!("Could not read file: {}", e),
                }
            }
        }
    }
}

fn preview(content: &str) -> String {
    let len = content.chars().count();
    let tail: String = content.chars().skip(len.saturating_sub(PREVIEW_CHARS)).collect();
    tail.replace('\n', "\\n")
}

/// Every `readme.md` (any case) under `root`, never entering `excluded` dirs.
pub fn find_readme_files(root: &Path, excluded: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() > 0 && e.file_type().is_dir() {
                let name = e.file_name().to_string_lossy();
                return !excluded.iter().any(|x| *x == name);
            }
            true
        })
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Error walking {}: {}", root.display(), err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().to_lowercase() == "readme.md")
        .map(|e| e.into_path())
        .collect()
}

/// Path of `path` relative to `root`, joined with `/`.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Validate every README under the configured root.
pub fn validate_all(config: &FooterConfig) -> FooterResults {
    let rules = FooterRules::from_config(config);
    let files = find_readme_files(&config.root, &config.excluded_dirs);
    debug!("found {} README files under {}", files.len(), config.root.display());

    files
        .iter()
        .map(|path| (relative_key(&config.root, path), rules.analyze_file(path)))
        .collect()
}
