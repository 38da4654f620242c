//! README quality scoring.
//!
//! A README earns 10 points per essential section keyword it mentions, plus
//! up to two 10-point bonuses for examples and visuals. A README that earns
//! every mark scores the full 100; otherwise the total is capped at 100.
//! Matching is by lower-cased substring, not by heading structure.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Section keywords every README is expected to cover.
pub const ESSENTIAL_SECTIONS: &[&str] = &[
    "overview",
    "installation",
    "usage",
    "api",
    "configuration",
    "contributing",
    "license",
];

/// Bonus marks: examples (keyword or fenced code) and visuals (image or badge).
pub const BONUS_MARKS: usize = 2;

pub const POINTS_PER_MARK: u32 = 10;
pub const MAX_SCORE: u32 = 100;

/// Find the first README-like file directly under `repo`.
///
/// Names are matched case-insensitively against `README*` and the
/// lexicographically first match wins.
pub fn find_readme(repo: &Path) -> Option<PathBuf> {
    let matcher = readme_matcher()?;
    let entries = std::fs::read_dir(repo).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| matcher.is_match(e.file_name()))
        .map(|e| e.path())
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

fn readme_matcher() -> Option<GlobMatcher> {
    GlobBuilder::new("README*")
        .case_insensitive(true)
        .build()
        .ok()
        .map(|g| g.compile_matcher())
}

/// Score a repository's README; 0 if missing or unreadable.
pub fn score_readme(repo: &Path) -> u32 {
    let path = match find_readme(repo) {
        Some(p) => p,
        None => return 0,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => score_content(&content),
        Err(e) => {
            warn!("Error analyzing README in {}: {}", repo.display(), e);
            0
        }
    }
}

/// Score README text.
pub fn score_content(content: &str) -> u32 {
    let content = content.to_lowercase();

    let mut marks = ESSENTIAL_SECTIONS
        .iter()
        .filter(|section| content.contains(*section))
        .count() as u32;

    if content.contains("example") || content.contains("```") {
        marks += 1;
    }
    if content.contains("![") || content.contains("https://img.shields.io") {
        marks += 1;
    }

    if marks as usize == ESSENTIAL_SECTIONS.len() + BONUS_MARKS {
        return MAX_SCORE;
    }
    (marks * POINTS_PER_MARK).min(MAX_SCORE)
}
