//! Command-line interface for docaudit.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyzer::{CoverageAnalyzer, RunOptions};
use crate::config::{self, Config};
use crate::footer;
use crate::logging;
use crate::sink::{HttpSink, LoggingSink, ReportingSink};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Documentation coverage and README footer auditing.
///
/// Scores docstring coverage, README quality and API-doc presence across a
/// set of repositories, and validates the footer convention of every README
/// under a directory tree.
#[derive(Parser)]
#[command(name = "docaudit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze documentation coverage across the configured repositories
    #[command(visible_alias = "analyze")]
    Coverage(CoverageArgs),
    /// Validate README footers under a directory tree
    #[command(visible_alias = "validate-footers")]
    Footers(FooterArgs),
}

/// Arguments for the coverage command.
#[derive(Parser)]
pub struct CoverageArgs {
    /// Directory holding the repositories (overrides config)
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Push per-repository metrics to the dashboard
    #[arg(long)]
    pub send_metrics: bool,

    /// Draft improvement issues (logged, not filed)
    #[arg(long)]
    pub create_issues: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the footers command.
#[derive(Parser)]
pub struct FooterArgs {
    /// Directory to scan for README files (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load configuration and install logging.
///
/// Logging is set up even when the config fails to load so the error
/// reaches the log.
fn prepare(config_path: Option<&Path>, verbose: bool) -> anyhow::Result<Config> {
    let loaded = Config::load(config_path);
    let log_file = match &loaded {
        Ok(c) => c.log_file.clone(),
        Err(_) => Config::default().log_file,
    };
    logging::init(&log_file, verbose);

    let config = loaded?;
    config::validate(&config)?;
    Ok(config)
}

/// Run the coverage command.
pub fn run_coverage(args: &CoverageArgs) -> anyhow::Result<i32> {
    let mut config = prepare(args.config.as_deref(), args.verbose)?;
    if let Some(base) = &args.base_path {
        config.coverage.base_path = base.clone();
    }

    let analyzer = CoverageAnalyzer::new(config.coverage)?;

    let http_sink;
    let sink: &dyn ReportingSink = if args.send_metrics {
        http_sink = HttpSink::new(config.dashboard)?;
        &http_sink
    } else {
        &LoggingSink
    };

    let options = RunOptions {
        send_metrics: args.send_metrics,
        create_issues: args.create_issues,
        print_summary: true,
    };
    analyzer.run(sink, options)?;

    info!("Documentation analysis completed successfully");
    Ok(EXIT_SUCCESS)
}

/// Run the footers command.
pub fn run_footers(args: &FooterArgs) -> anyhow::Result<i32> {
    let mut config = prepare(args.config.as_deref(), args.verbose)?;
    if let Some(root) = &args.root {
        config.footer.root = root.clone();
    }
    let footer_config = config.footer;

    if !footer_config.root.is_dir() {
        warn!("Footer root {} is not a directory", footer_config.root.display());
    }

    println!("🔍 Validating README footers under {}...", footer_config.root.display());
    let results = footer::validate_all(&footer_config);

    println!("📊 Generating validation report...");
    let report = footer::render_report(&results, &footer_config.brand_link);
    let (report_path, data_path) = footer::report::write_outputs(
        &results,
        &report,
        &footer_config.report_path(),
        &footer_config.data_path(),
    )?;
    info!(
        "Footer validation saved to {} and {}",
        report_path.display(),
        data_path.display()
    );

    let summary = footer::FooterSummary::from_results(&results);
    footer::report::write_pretty(&summary, &footer_config.brand_link, &report_path, &data_path);

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coverage_flags() {
        let cli = Cli::parse_from([
            "docaudit",
            "analyze",
            "--base-path",
            "/srv/repos",
            "--send-metrics",
            "-v",
        ]);
        match cli.command {
            Commands::Coverage(args) => {
                assert_eq!(args.base_path, Some(PathBuf::from("/srv/repos")));
                assert!(args.send_metrics);
                assert!(!args.create_issues);
                assert!(args.verbose);
            }
            Commands::Footers(_) => panic!("expected coverage command"),
        }
    }

    #[test]
    fn test_parse_footers_alias() {
        let cli = Cli::parse_from(["docaudit", "validate-footers", "--root", "/srv/repos"]);
        match cli.command {
            Commands::Footers(args) => {
                assert_eq!(args.root, Some(PathBuf::from("/srv/repos")));
                assert!(args.config.is_none());
            }
            Commands::Coverage(_) => panic!("expected footers command"),
        }
    }
}
