//! Serve command - Run the HTTP API

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    adapters::InMemoryGameRepository,
    api::{self, AppState},
    cli::config::{CommonConfig, ServerConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Serve the game over HTTP")]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', default_value_t = 8080)]
    pub port: u16,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: ServeArgs) -> Result<()> {
    let server = ServerConfig {
        host: args.host,
        port: args.port,
    };
    let common = CommonConfig {
        seed: args.seed,
        ..CommonConfig::default()
    };

    let repository = Arc::new(InMemoryGameRepository::new());
    let state = Arc::new(AppState::new(repository, common.rng()));
    info!(host = %server.host, port = server.port, "starting HTTP server");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(api::serve(&server, state))
        .with_context(|| format!("server on {}:{} failed", server.host, server.port))
}
