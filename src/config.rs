//! Configuration schema for docaudit.
//!
//! Both pipelines take their inputs from a [`Config`] instead of global
//! constants. Every field has a default so an empty (or missing) YAML file
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["docaudit.yaml", ".docaudit.yaml"];

/// Root directory that holds the ecosystem's repositories.
pub const DEFAULT_BASE_PATH: &str = "/Users/tiaastor/Github/tiation-repos";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub footer: FooterConfig,
    /// Log file written alongside console output
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coverage: CoverageConfig::default(),
            dashboard: DashboardConfig::default(),
            footer: FooterConfig::default(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, else the first discovered config file, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::parse_file(p)
                .map_err(|e| anyhow::anyhow!("loading config {}: {}", p.display(), e)),
            None => match discover() {
                Some(p) => Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("loading config {}: {}", p.display(), e)),
                None => Ok(Self::default()),
            },
        }
    }
}

/// Find a config file in the current directory.
pub fn discover() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Settings for the documentation coverage pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverageConfig {
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Repository directory names under `base_path`, analyzed in order
    #[serde(default = "default_repositories")]
    pub repositories: Vec<String>,
    /// Report directory, relative to `base_path` unless absolute
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    /// Substring of a repository name that marks a backend service
    #[serde(default = "default_backend_marker")]
    pub backend_marker: String,
    /// Path fragments whose presence signals API documentation
    #[serde(default = "default_api_doc_indicators")]
    pub api_doc_indicators: Vec<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            repositories: default_repositories(),
            reports_dir: default_reports_dir(),
            backend_marker: default_backend_marker(),
            api_doc_indicators: default_api_doc_indicators(),
        }
    }
}

impl CoverageConfig {
    /// Resolved directory that receives report files.
    pub fn reports_path(&self) -> PathBuf {
        self.base_path.join(&self.reports_dir)
    }
}

/// Metrics dashboard annotation endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_url")]
    pub url: String,
    #[serde(default = "default_dashboard_timeout")]
    pub timeout_secs: u64,
    /// Tags attached to every annotation (the repository name is appended)
    #[serde(default = "default_dashboard_tags")]
    pub tags: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: default_dashboard_url(),
            timeout_secs: default_dashboard_timeout(),
            tags: default_dashboard_tags(),
        }
    }
}

/// Settings for the README footer validator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FooterConfig {
    #[serde(default = "default_base_path")]
    pub root: PathBuf,
    /// Markdown report, relative to `root` unless absolute
    #[serde(default = "default_footer_report")]
    pub report_file: PathBuf,
    /// Per-file JSON results, relative to `root` unless absolute
    #[serde(default = "default_footer_data")]
    pub data_file: PathBuf,
    /// Directory names never descended into
    #[serde(default = "default_footer_excluded")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_brand_link")]
    pub brand_link: String,
    /// Lower-case phrases accepted as an NGO mention
    #[serde(default = "default_ngo_phrases")]
    pub ngo_phrases: Vec<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            root: default_base_path(),
            report_file: default_footer_report(),
            data_file: default_footer_data(),
            excluded_dirs: default_footer_excluded(),
            brand_link: default_brand_link(),
            ngo_phrases: default_ngo_phrases(),
        }
    }
}

impl FooterConfig {
    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report_file)
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_file)
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("docaudit.log")
}

fn default_base_path() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_PATH)
}

fn default_repositories() -> Vec<String> {
    [
        "RiggerBackend",
        "RiggerShared",
        "RiggerConnect-web",
        "RiggerHub-web",
        "RiggerConnect-android",
        "RiggerConnect-ios",
        "RiggerHub-android",
        "RiggerHub-ios",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("docs/reports")
}

fn default_backend_marker() -> String {
    "Backend".to_string()
}

fn default_api_doc_indicators() -> Vec<String> {
    ["docs/api", "api.md", "swagger", "openapi", "postman", "api-reference"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_dashboard_url() -> String {
    "http://153.92.214.1:3000/api/annotations".to_string()
}

fn default_dashboard_timeout() -> u64 {
    10
}

fn default_dashboard_tags() -> Vec<String> {
    vec!["documentation".to_string(), "rigger".to_string()]
}

fn default_footer_report() -> PathBuf {
    PathBuf::from("footer_validation_report.md")
}

fn default_footer_data() -> PathBuf {
    PathBuf::from("footer_validation_data.json")
}

fn default_footer_excluded() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        ".archive".to_string(),
    ]
}

fn default_brand_link() -> String {
    "tiation.github.io".to_string()
}

fn default_ngo_phrases() -> Vec<String> {
    vec![
        "chasewhiterabbit".to_string(),
        "ngo".to_string(),
        "chase white rabbit".to_string(),
    ]
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.dashboard.timeout_secs == 0 {
        anyhow::bail!("dashboard.timeout_secs must be greater than zero");
    }

    for indicator in &config.coverage.api_doc_indicators {
        if indicator.trim().is_empty() {
            anyhow::bail!("coverage.api_doc_indicators must not contain empty entries");
        }
        globset::Glob::new(&format!("**/*{}*", indicator))
            .map_err(|e| anyhow::anyhow!("invalid api doc indicator {:?}: {}", indicator, e))?;
    }

    if config.footer.brand_link.is_empty() {
        anyhow::bail!("footer.brand_link must not be empty");
    }

    Ok(())
}
