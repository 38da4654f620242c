//! docaudit CLI entry point.

use clap::Parser;
use docaudit::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let (name, result) = match &cli.command {
        Commands::Coverage(args) => ("Documentation analysis", cli::run_coverage(args)),
        Commands::Footers(args) => ("Footer validation", cli::run_footers(args)),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            error!("{} failed: {:#}", name, e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
