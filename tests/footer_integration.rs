//! Integration tests for the README footer validator.

use std::path::PathBuf;

use docaudit::config::FooterConfig;
use docaudit::footer::{self, report, FooterResult};
use tempfile::TempDir;

fn footers_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("footers")
}

fn fixture_config() -> FooterConfig {
    FooterConfig {
        root: footers_path(),
        ..FooterConfig::default()
    }
}

#[test]
fn test_validate_all_keys() {
    let results = footer::validate_all(&fixture_config());
    let keys: Vec<&str> = results.keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "README.md",
            "RiggerBackend/README.md",
            "RiggerBackend/docs/guide/README.md",
            "RiggerShared/docs/README.md",
        ]
    );
}

#[test]
fn test_centered_footer_counts_as_footer_end() {
    let results = footer::validate_all(&fixture_config());
    let root = results["README.md"].analysis().unwrap();

    assert!(root.ends_with_footer);
    assert!(root.has_centered_footer);
    assert!(root.has_footer_section);
    assert!(root.has_tiation_link);
    assert!(root.has_enterprise_mention);
    assert!(root.has_ngo_mention);
    assert!(root.has_built_with);
}

#[test]
fn test_per_file_markers() {
    let results = footer::validate_all(&fixture_config());

    let backend = results["RiggerBackend/README.md"].analysis().unwrap();
    assert!(backend.has_tiation_link);
    assert!(!backend.has_ngo_mention);
    assert!(backend.has_built_with);
    assert!(backend.ends_with_footer);
    assert!(!backend.has_centered_footer);

    let shared = results["RiggerShared/docs/README.md"].analysis().unwrap();
    assert!(shared.has_ngo_mention);
    assert!(!shared.has_tiation_link);
    assert!(!shared.ends_with_footer);
}

#[test]
fn test_priority_section_lists_top_level_readmes_only() {
    let results = footer::validate_all(&fixture_config());
    let rendered = footer::render_report(&results, "tiation.github.io");

    let priority = rendered
        .split("## Priority Files Analysis (Main Project READMEs)")
        .nth(1)
        .unwrap();
    assert!(priority.contains("### ✅ 🏢 🌟 📄 README.md"));
    assert!(priority.contains("### ✅ ⚪ ⚪ 📄 RiggerBackend/README.md"));
    assert!(!priority.contains("RiggerBackend/docs/guide/README.md"));
    assert!(!priority.contains("RiggerShared/docs/README.md"));

    assert!(rendered.contains("- **Total README files analyzed**: 4"));
    assert!(rendered.contains("- **Files with tiation.github.io link**: 2 (50.0%)"));
    assert!(rendered.contains("- **Files with enterprise mention**: 1 (25.0%)"));
}

#[test]
fn test_outputs_are_persisted() {
    let out = TempDir::new().unwrap();
    let config = FooterConfig {
        report_file: out.path().join("footer_validation_report.md"),
        data_file: out.path().join("footer_validation_data.json"),
        ..fixture_config()
    };

    let results = footer::validate_all(&config);
    let rendered = footer::render_report(&results, &config.brand_link);
    let (report_path, data_path) =
        report::write_outputs(&results, &rendered, &config.report_path(), &config.data_path())
            .unwrap();

    assert_eq!(report_path, out.path().join("footer_validation_report.md"));
    assert_eq!(std::fs::read_to_string(&report_path).unwrap(), rendered);

    let data: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data_path).unwrap()).unwrap();
    assert_eq!(data.as_object().unwrap().len(), 4);
    assert_eq!(data["README.md"]["ends_with_footer"], true);
    assert_eq!(data["RiggerShared/docs/README.md"]["has_ngo_mention"], true);

    let parsed: footer::FooterResults = serde_json::from_value(data).unwrap();
    assert_eq!(parsed, results);
}

#[test]
fn test_excluded_directories_in_temp_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::create_dir_all(root.join("app/node_modules/dep")).unwrap();
    std::fs::create_dir_all(root.join(".archive/old")).unwrap();
    std::fs::write(root.join("app/README.md"), "tiation.github.io\n---\n").unwrap();
    std::fs::write(root.join("app/node_modules/dep/README.md"), "x").unwrap();
    std::fs::write(root.join(".archive/old/README.md"), "x").unwrap();

    let config = FooterConfig {
        root: root.to_path_buf(),
        ..FooterConfig::default()
    };
    let results = footer::validate_all(&config);

    assert_eq!(results.len(), 1);
    assert!(matches!(results["app/README.md"], FooterResult::Analyzed(_)));
}
