// Crowdtools - training and export CLI for the crowd person-detection model
// Main entry point

use anyhow::Result;
use clap::Parser;

use crowdtools::cli::{run_export, run_train, Cli, Command};
use crowdtools::config::RunLayout;
use crowdtools::detector::UltralyticsCli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let layout = RunLayout::default();
    let detector = UltralyticsCli::new(layout.clone());

    match cli.command {
        Command::Train(args) => run_train(&args, &detector, &layout).await,
        Command::Export(args) => run_export(&args, &detector).await,
    }
}

/// Initialize tracing to stderr
///
/// Default level is INFO; override with RUST_LOG. Progress output meant for
/// the operator goes to stdout via println, not through tracing.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
