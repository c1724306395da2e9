//! MekForge - Development Tools

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mek_core::registry::HandlerRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mek-tools")]
#[command(about = "Development tools for MekForge unit data")]
struct Cli {
    /// Treat warnings as failures
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate unit files
    Validate {
        /// Unit file or directory of unit files
        #[arg(default_value = "data/units")]
        path: PathBuf,
    },
    /// Export a unit file as JSON
    Export {
        /// Unit file to export
        file: PathBuf,
        /// Output path (defaults to the input with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let registry = HandlerRegistry::standard();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating unit files in: {}", path.display());
            let summary = match mek_tools::validate::validate_path(&registry, &path) {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    return ExitCode::FAILURE;
                }
            };

            for failure in summary.failures(cli.strict) {
                println!("FAIL {}", failure.path.display());
                for problem in failure.problems(cli.strict) {
                    println!("    {problem}");
                }
            }
            let failed = summary.failures(cli.strict).count();
            println!("{} checked, {} passed, {failed} failed", summary.total(), summary.total() - failed);

            if summary.is_success(cli.strict) {
                tracing::info!("Validation passed");
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Export {
            file,
            output,
            pretty,
        } => {
            if cli.strict {
                let report = mek_tools::validate::validate_file(&registry, &file);
                if !report.passed(true) {
                    for problem in report.problems(true) {
                        tracing::error!("{problem}");
                    }
                    return ExitCode::FAILURE;
                }
            }
            match mek_tools::export::export_to_file(&registry, &file, output.as_deref(), pretty) {
                Ok(written) => {
                    println!("{}", written.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Export failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
