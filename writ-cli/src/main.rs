//! Writ CLI - Literate Source Compiler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

use writ::interface::Context;

#[derive(Parser)]
#[command(name = "writ")]
#[command(author, version, about = "Compile literate markdown into source", long_about = None)]
struct Cli {
    /// Markdown documents to compile (glob patterns)
    #[arg(value_name = "GLOB")]
    globs: Vec<String>,

    /// Output directory (must exist)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dry run - show what would be written without writing it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Read configuration from file or search for one
    let config = match cli.config {
        Some(ref path) => writ::config::read_config_file(path),
        None => writ::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match Context::new(config, base_dir, cli.dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = commands::CompileOptions {
        globs: cli.globs,
        dry_run: cli.dry_run,
    };

    match commands::compile(&ctx, options) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!("{} of {} documents failed", report.failed, report.failed + report.written);
            ExitCode::FAILURE
        }
        Err(e) if e.is_configuration_error() => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
