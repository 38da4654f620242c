//! Python declaration extractor using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use super::{DeclarationCounts, DeclarationExtractor, ExtractionStrategy};

pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Visit every node, counting function and class definitions at any depth.
    ///
    /// `async def` is not counted, though definitions nested in its body are.
    fn visit(&self, node: Node, source: &[u8], counts: &mut DeclarationCounts) {
        match node.kind() {
            "function_definition" if !is_async(node) => {
                counts.total_functions += 1;
                if has_docstring(node, source) {
                    counts.documented_functions += 1;
                }
            }
            "class_definition" => {
                counts.total_classes += 1;
                if has_docstring(node, source) {
                    counts.documented_classes += 1;
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source, counts);
        }
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::StructuredParse
    }

    fn detection_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn source_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        name.contains("venv") || name == "__pycache__"
    }

    fn extract(&self, path: &Path, source: &str) -> anyhow::Result<DeclarationCounts> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", path.display()))?;

        let root = tree.root_node();
        if root.has_error() {
            anyhow::bail!("syntax error in {}", path.display());
        }
        if let Some(stmt) = find_legacy_statement(root) {
            anyhow::bail!(
                "Python 2 {} at line {} in {}",
                stmt.kind(),
                stmt.start_position().row + 1,
                path.display()
            );
        }

        let mut counts = DeclarationCounts::default();
        self.visit(root, source.as_bytes(), &mut counts);
        Ok(counts)
    }
}

/// Statements the grammar accepts but Python 3 rejects.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

fn is_async(def: Node) -> bool {
    let mut cursor = def.walk();
    let found = def.children(&mut cursor).any(|c| c.kind() == "async");
    found
}

fn find_legacy_statement(node: Node) -> Option<Node> {
    if LEGACY_STATEMENTS.contains(&node.kind()) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(find_legacy_statement)
}

/// Whether a definition's body opens with a non-empty string literal.
///
/// Comments before the literal are ignored. Byte strings and f-strings are
/// not docstrings.
fn has_docstring(def: Node, source: &[u8]) -> bool {
    let body = match def.child_by_field_name("body") {
        Some(b) => b,
        None => return false,
    };

    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");

    let stmt = match first {
        Some(s) if s.kind() == "expression_statement" => s,
        _ => return false,
    };

    let expr = match stmt.named_child(0) {
        Some(e) => e,
        None => return false,
    };

    match expr.kind() {
        "string" => string_is_docstring(expr, source),
        "concatenated_string" => {
            let mut parts = expr.walk();
            let strings: Vec<Node> = expr
                .named_children(&mut parts)
                .filter(|n| n.kind() == "string")
                .collect();
            !strings.is_empty()
                && strings.iter().all(|s| is_text_string(*s, source))
                && strings.iter().any(|s| {
                    let text = s.utf8_text(source).unwrap_or("");
                    !literal_body(text).trim().is_empty()
                })
        }
        _ => false,
    }
}

fn string_is_docstring(node: Node, source: &[u8]) -> bool {
    if !is_text_string(node, source) {
        return false;
    }
    let text = node.utf8_text(source).unwrap_or("");
    !literal_body(text).trim().is_empty()
}

/// Text (`str`) literals only: no byte prefix, no interpolation.
fn is_text_string(node: Node, source: &[u8]) -> bool {
    let text = node.utf8_text(source).unwrap_or("");
    let prefix: String = text
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return false;
    }
    let mut cursor = node.walk();
    let has_interpolation = node
        .children(&mut cursor)
        .any(|c| c.kind() == "interpolation");
    !has_interpolation
}

/// Strip the prefix and quotes from a string literal.
fn literal_body(text: &str) -> &str {
    let unprefixed = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if unprefixed.len() >= 2 * quote.len()
            && unprefixed.starts_with(quote)
            && unprefixed.ends_with(quote)
        {
            return &unprefixed[quote.len()..unprefixed.len() - quote.len()];
        }
    }
    unprefixed
}
