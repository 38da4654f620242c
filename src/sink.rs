//! Reporting sinks for the coverage pipeline's optional side effects.
//!
//! Two operations leave the scoring core: publishing per-repository metrics
//! to the dashboard and filing improvement issues. Both go through
//! [`ReportingSink`] so the analyzer never touches the network itself.
//!
//! - [`LoggingSink`]: logs what would be sent; the default
//! - [`HttpSink`]: posts annotations to the dashboard endpoint

use chrono::Local;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DashboardConfig;
use crate::report::RepositoryReport;
use crate::suggest::IssueDraft;

/// Errors from a reporting sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Destination for metrics and issues produced by a coverage run.
pub trait ReportingSink {
    /// Publish one repository's metrics.
    fn publish_metrics(&self, repo: &RepositoryReport) -> Result<(), SinkError>;

    /// File an improvement issue.
    fn file_issue(&self, issue: &IssueDraft) -> Result<(), SinkError>;
}

/// Logs every call and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl ReportingSink for LoggingSink {
    fn publish_metrics(&self, repo: &RepositoryReport) -> Result<(), SinkError> {
        info!(
            "Would publish metrics for {}: overall {}, function coverage {:.1}%, README {}",
            repo.name,
            repo.overall_score,
            repo.documentation_coverage.functions.percentage,
            repo.readme_score
        );
        Ok(())
    }

    fn file_issue(&self, issue: &IssueDraft) -> Result<(), SinkError> {
        info!("Would create issue for {}: {}", issue.repo_name, issue.title);
        info!("Issue content:\n{}", issue.body);
        Ok(())
    }
}

/// Dashboard annotation body for one repository.
pub fn annotation_payload(
    repo: &RepositoryReport,
    tags: &[String],
    time_ms: i64,
) -> serde_json::Value {
    let mut all_tags: Vec<String> = tags.to_vec();
    all_tags.push(repo.name.clone());

    json!({
        "text": format!("Documentation Update: {}", repo.name),
        "tags": all_tags,
        "time": time_ms,
        "data": {
            "overall_score": repo.overall_score,
            "function_coverage": repo.documentation_coverage.functions.percentage,
            "readme_score": repo.readme_score,
        }
    })
}

/// Posts metrics as dashboard annotations. Issues are only logged; there
/// is no tracker integration.
pub struct HttpSink {
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    config: DashboardConfig,
}

impl HttpSink {
    pub fn new(config: DashboardConfig) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("docaudit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(config, http)
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(config: DashboardConfig, http: reqwest::Client) -> Result<Self, SinkError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SinkError::Runtime(e.to_string()))?;

        Ok(Self {
            http,
            runtime,
            config,
        })
    }

    async fn post(&self, payload: &serde_json::Value) -> Result<(), SinkError> {
        let response = self
            .http
            .post(&self.config.url)
            .json(payload)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout
                } else {
                    SinkError::Network(e)
                }
            })?;

        match response.status().as_u16() {
            200 => Ok(()),
            status => Err(SinkError::Status(status)),
        }
    }
}

impl ReportingSink for HttpSink {
    fn publish_metrics(&self, repo: &RepositoryReport) -> Result<(), SinkError> {
        let now_ms = Local::now().timestamp_millis();
        let payload = annotation_payload(repo, &self.config.tags, now_ms);
        self.runtime.block_on(self.post(&payload))?;
        info!("Sent metrics for {} to dashboard", repo.name);
        Ok(())
    }

    fn file_issue(&self, issue: &IssueDraft) -> Result<(), SinkError> {
        LoggingSink.file_issue(issue)
    }
}
