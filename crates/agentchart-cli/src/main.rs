// File: crates/agentchart-cli/src/main.rs
// Summary: `agentchart` entry point: logging setup, then hand off to the CLI.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod input;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    Cli::parse().run().await
}
