//! marksearch CLI - trademark registry search from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Execute registry calls via the shared client library.
//! - Print results as JSON and map failures to exit codes.
//!
//! Does NOT handle:
//! - Authentication or retry logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide
//!   clap env defaults.

mod args;
mod commands;
mod error;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::Cli;
use error::{ExitCode, exit_code_for};
use marksearch_client::{RegistryClient, RegistryClientBuilder};
use marksearch_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // .env first so clap env defaults can read its values.
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {e}");
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(ExitCode::ConfigError.as_i32());
        }
    };

    if let Err(e) = commands::run(&client, cli.command).await {
        let envelope = e.to_envelope();
        match serde_json::to_string_pretty(&envelope) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{e}"),
        }
        std::process::exit(exit_code_for(&e).as_i32());
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<RegistryClient> {
    let mut loader = ConfigLoader::new();
    if let Some(url) = &cli.base_url {
        loader = loader.base_url(url.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        loader = loader.timeout(Duration::from_secs(secs));
    }
    if let Some(cache) = &cli.token_cache {
        if !cache.eq_ignore_ascii_case("off") {
            loader = loader.token_cache(PathBuf::from(cache));
        }
    }
    let config = loader.load()?;
    Ok(RegistryClientBuilder::from_config(config).build()?)
}
