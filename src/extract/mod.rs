//! Declaration extraction for documentation coverage.
//!
//! A repository is classified by the first extractor whose detection
//! extensions appear anywhere in its tree. The chosen extractor then counts
//! function and class declarations, and how many of them carry documentation.
//!
//! # Adding a New Language
//!
//! Implement [`DeclarationExtractor`] and add it to [`default_extractors`]
//! at the position that reflects its detection priority.

mod javascript;
#[cfg(feature = "tree-sitter")]
mod python;

pub use javascript::JavaScriptExtractor;
#[cfg(feature = "tree-sitter")]
pub use python::PythonExtractor;

use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How an extractor recognises declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Parse into a syntax tree and enumerate declaration nodes.
    StructuredParse,
    /// Approximate declarations with textual patterns.
    PatternMatch,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::StructuredParse => write!(f, "structured-parse"),
            ExtractionStrategy::PatternMatch => write!(f, "pattern-match"),
        }
    }
}

/// Declaration totals for a file or a whole repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclarationCounts {
    pub total_functions: usize,
    pub documented_functions: usize,
    pub total_classes: usize,
    pub documented_classes: usize,
}

impl DeclarationCounts {
    /// Add another set of counts into this one.
    pub fn merge(&mut self, other: DeclarationCounts) {
        self.total_functions += other.total_functions;
        self.documented_functions += other.documented_functions;
        self.total_classes += other.total_classes;
        self.documented_classes += other.documented_classes;
    }
}

/// Language-specific declaration counting.
pub trait DeclarationExtractor {
    /// Returns the language identifier (e.g., "python").
    fn language_id(&self) -> &'static str;

    fn strategy(&self) -> ExtractionStrategy;

    /// Extensions (without dot) whose presence selects this extractor.
    fn detection_extensions(&self) -> &'static [&'static str];

    /// Extensions (without dot) of files that get scanned.
    fn source_extensions(&self) -> &'static [&'static str];

    /// Whether a directory (by name) is skipped during the scan.
    fn is_excluded_dir(&self, name: &str) -> bool;

    /// Count declarations in one source file.
    ///
    /// An error means the file is skipped; it does not abort the scan.
    fn extract(&self, path: &Path, source: &str) -> anyhow::Result<DeclarationCounts>;

    /// Adjust repository totals once every file has been scanned.
    fn finalize(&self, counts: DeclarationCounts) -> DeclarationCounts {
        counts
    }

    /// Check if this extractor scans the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.source_extensions().contains(&ext)
    }
}

/// All available extractors, in detection priority order.
pub fn default_extractors() -> Vec<Box<dyn DeclarationExtractor>> {
    let mut extractors: Vec<Box<dyn DeclarationExtractor>> = Vec::new();
    #[cfg(feature = "tree-sitter")]
    extractors.push(Box::new(PythonExtractor::new()));
    extractors.push(Box::new(JavaScriptExtractor::new()));
    extractors
}

/// Pick the first extractor whose detection extensions occur under `root`.
pub fn select_extractor<'a>(
    root: &Path,
    extractors: &'a [Box<dyn DeclarationExtractor>],
) -> Option<&'a dyn DeclarationExtractor> {
    extractors
        .iter()
        .find(|e| contains_extension(root, e.detection_extensions()))
        .map(|e| e.as_ref())
}

/// Count declarations in a repository.
///
/// Returns zero counts when no extractor matches; that is an undercount, not
/// an error.
pub fn count_declarations(
    root: &Path,
    extractors: &[Box<dyn DeclarationExtractor>],
) -> DeclarationCounts {
    match select_extractor(root, extractors) {
        Some(extractor) => {
            debug!(
                language = extractor.language_id(),
                strategy = %extractor.strategy(),
                "classified {}",
                root.display()
            );
            scan_with(root, extractor)
        }
        None => {
            debug!("no declaration extractor matches {}", root.display());
            DeclarationCounts::default()
        }
    }
}

/// Run one extractor over every matching file under `root`.
pub fn scan_with(root: &Path, extractor: &dyn DeclarationExtractor) -> DeclarationCounts {
    let mut counts = DeclarationCounts::default();

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() > 0 && e.file_type().is_dir() {
            let name = e.file_name().to_string_lossy();
            return !extractor.is_excluded_dir(&name);
        }
        true
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Error walking {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extractor.handles_extension(ext) {
            continue;
        }

        let file_counts = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|source| extractor.extract(path, &source));

        match file_counts {
            Ok(c) => counts.merge(c),
            Err(e) => warn!("Error analyzing {}: {}", path.display(), e),
        }
    }

    extractor.finalize(counts)
}

/// Whether any file under `root` has one of `extensions`.
fn contains_extension(root: &Path, extensions: &[&str]) -> bool {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .any(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| extensions.contains(&x))
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct LineExtractor;

    impl DeclarationExtractor for LineExtractor {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn strategy(&self) -> ExtractionStrategy {
            ExtractionStrategy::PatternMatch
        }

        fn detection_extensions(&self) -> &'static [&'static str] {
            &["txt"]
        }

        fn source_extensions(&self) -> &'static [&'static str] {
            &["txt"]
        }

        fn is_excluded_dir(&self, name: &str) -> bool {
            name == "skipped"
        }

        fn extract(&self, _path: &Path, source: &str) -> anyhow::Result<DeclarationCounts> {
            if source.contains("broken") {
                anyhow::bail!("unparseable");
            }
            Ok(DeclarationCounts {
                total_functions: source.lines().count(),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_merge() {
        let mut a = DeclarationCounts {
            total_functions: 2,
            documented_functions: 1,
            total_classes: 1,
            documented_classes: 0,
        };
        a.merge(DeclarationCounts {
            total_functions: 3,
            documented_functions: 3,
            total_classes: 2,
            documented_classes: 2,
        });
        assert_eq!(a.total_functions, 5);
        assert_eq!(a.documented_functions, 4);
        assert_eq!(a.total_classes, 3);
        assert_eq!(a.documented_classes, 2);
    }

    #[test]
    fn test_scan_skips_excluded_dirs_and_failed_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "one\ntwo\n").unwrap();
        std::fs::write(temp.path().join("bad.txt"), "broken\n").unwrap();
        std::fs::create_dir(temp.path().join("skipped")).unwrap();
        std::fs::write(temp.path().join("skipped/b.txt"), "x\ny\nz\n").unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("nested/c.txt"), "only\n").unwrap();

        let counts = scan_with(temp.path(), &LineExtractor);
        assert_eq!(counts.total_functions, 3);
    }

    #[test]
    fn test_no_matching_extractor_counts_zero() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Main.kt"), "fun main() {}").unwrap();

        let extractors: Vec<Box<dyn DeclarationExtractor>> = vec![Box::new(LineExtractor)];
        assert!(select_extractor(temp.path(), &extractors).is_none());
        assert_eq!(
            count_declarations(temp.path(), &extractors),
            DeclarationCounts::default()
        );
    }

    #[test]
    #[cfg(feature = "tree-sitter")]
    fn test_python_takes_priority_over_javascript() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.js"), "function a() {}\n").unwrap();
        std::fs::write(temp.path().join("tool.py"), "def b():\n    pass\n").unwrap();

        let extractors = default_extractors();
        let chosen = select_extractor(temp.path(), &extractors).unwrap();
        assert_eq!(chosen.language_id(), "python");
        assert_eq!(chosen.strategy(), ExtractionStrategy::StructuredParse);
    }

    #[test]
    fn test_javascript_detected_without_python() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.ts"), "export function a() {}\n").unwrap();

        let extractors = default_extractors();
        let chosen = select_extractor(temp.path(), &extractors).unwrap();
        assert_eq!(chosen.language_id(), "javascript");
    }
}
