use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::Args;
use error::CliError;

fn run(args: Args) -> Result<(), CliError> {
    let mut store = args.target()?.open()?;
    let output = commands::execute(&args.command, store.as_mut())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
