//! Main entry point for the dgsgen CLI.

use clap::Parser;
use dgsgen_cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(error) = dgsgen_cli::run(&cli) {
        eprintln!("{:?}", error.into_report());
        std::process::exit(1);
    }
}
