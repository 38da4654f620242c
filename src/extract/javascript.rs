//! JavaScript/TypeScript declaration extractor using regex heuristics.
//!
//! This does not parse the language. Function declarations are approximated
//! by a fixed set of patterns and documentation by the number of `/** ... */`
//! blocks, so counts can drift in both directions: multi-line arrow
//! signatures and class-method shorthand are missed, and an exported function
//! matches two patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{DeclarationCounts, DeclarationExtractor, ExtractionStrategy};

/// Patterns approximating function declarations, each counted independently.
static FUNCTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // function name(
        r"function\s+\w+\s*\(",
        // const name = (
        r"const\s+\w+\s*=\s*\(",
        // export function name(
        r"export\s+function\s+\w+\s*\(",
        // name: function(
        r"\w+\s*:\s*function\s*\(",
        // name: (args) =>
        r"\w+\s*:\s*\([^)]*\)\s*=>",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// JSDoc block comments.
static DOC_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*[\s\S]*?\*/").unwrap());

pub struct JavaScriptExtractor;

impl JavaScriptExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationExtractor for JavaScriptExtractor {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::PatternMatch
    }

    fn detection_extensions(&self) -> &'static [&'static str] {
        &["js", "ts"]
    }

    fn source_extensions(&self) -> &'static [&'static str] {
        &["js", "ts", "jsx", "tsx"]
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        name == "node_modules" || name.contains("build")
    }

    fn extract(&self, _path: &Path, source: &str) -> anyhow::Result<DeclarationCounts> {
        let total_functions = FUNCTION_PATTERNS
            .iter()
            .map(|re| re.find_iter(source).count())
            .sum();
        let documented_functions = DOC_COMMENT.find_iter(source).count();

        Ok(DeclarationCounts {
            total_functions,
            documented_functions,
            ..Default::default()
        })
    }

    /// Documentation blocks can outnumber functions; cap at the total.
    fn finalize(&self, mut counts: DeclarationCounts) -> DeclarationCounts {
        counts.documented_functions = counts.documented_functions.min(counts.total_functions);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::scan_with;
    use tempfile::TempDir;

    fn extract(source: &str) -> DeclarationCounts {
        JavaScriptExtractor::new()
            .extract(Path::new("test.js"), source)
            .unwrap()
    }

    #[test]
    fn test_each_pattern() {
        assert_eq!(extract("function load(id) {}").total_functions, 1);
        assert_eq!(extract("const save = (item) => item;").total_functions, 1);
        assert_eq!(extract("const api = { get: function(url) {} };").total_functions, 1);
        assert_eq!(extract("const api = { post: (url, body) => body };").total_functions, 1);
    }

    #[test]
    fn test_exported_function_matches_twice() {
        let counts = extract("export function render(view) {}");
        assert_eq!(counts.total_functions, 2);
    }

    #[test]
    fn test_missed_shapes() {
        // Class method shorthand and multi-line arrow signatures are not seen.
        let source = "class A {\n  run() {}\n}\nconst handler = async\n  (req) => req;\n";
        assert_eq!(extract(source).total_functions, 0);
    }

    #[test]
    fn test_doc_comments_counted() {
        let source = r#"
/**
 * Loads a record.
 */
function load(id) {}

/* plain block comment */
function save(item) {}

/** Inline doc. */
const remove = (id) => id;
"#;
        let counts = extract(source);
        assert_eq!(counts.total_functions, 3);
        assert_eq!(counts.documented_functions, 2);
        assert_eq!(counts.total_classes, 0);
    }

    #[test]
    fn test_documented_capped_at_total() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("notes.js"),
            "/** a */\n/** b */\n/** c */\nfunction only() {}\n",
        )
        .unwrap();

        let counts = scan_with(temp.path(), &JavaScriptExtractor::new());
        assert_eq!(counts.total_functions, 1);
        assert_eq!(counts.documented_functions, 1);
    }

    #[test]
    fn test_scan_skips_dependency_and_build_dirs() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.tsx"), "function App() {}\n").unwrap();
        std::fs::create_dir_all(temp.path().join("node_modules/lib")).unwrap();
        std::fs::write(temp.path().join("node_modules/lib/index.js"), "function x() {}\n").unwrap();
        std::fs::create_dir(temp.path().join("build")).unwrap();
        std::fs::write(temp.path().join("build/bundle.js"), "function y() {}\n").unwrap();
        std::fs::write(temp.path().join("README.md"), "function z() {}\n").unwrap();

        let counts = scan_with(temp.path(), &JavaScriptExtractor::new());
        assert_eq!(counts.total_functions, 1);
    }
}
