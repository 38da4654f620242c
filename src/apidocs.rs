//! API documentation presence check.
//!
//! A repository "has API docs" when any path under it contains one of the
//! configured indicator fragments (e.g. `swagger`, `openapi`, `docs/api`).
//! Content is not inspected.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

/// Build a matcher equivalent to a recursive `*<indicator>*` search.
///
/// Each `*` stays within one path component, so `docs/api` matches a
/// directory ending in `docs` that holds an entry starting with `api`.
pub fn indicator_set(indicators: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for indicator in indicators {
        let glob = GlobBuilder::new(&format!("**/*{}*", indicator))
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| anyhow::anyhow!("compiling indicator {:?}: {}", indicator, e))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Whether any file or directory under `repo` matches an indicator.
pub fn has_api_docs(repo: &Path, indicators: &GlobSet) -> bool {
    WalkDir::new(repo)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|entry| {
            entry
                .path()
                .strip_prefix(repo)
                .map(|rel| indicators.is_match(rel))
                .unwrap_or(false)
        })
}
