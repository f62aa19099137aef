//! ttt CLI - Tic-tac-toe against an exhaustive minimax opponent
//!
//! This CLI provides:
//! - An interactive terminal game
//! - An HTTP API server
//! - Self-play and position analysis with the move search

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ttt::cli::{commands, config::CommonConfig};

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Tic-tac-toe with a minimax move advisor", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play(commands::play::PlayArgs),

    /// Serve the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Let the search play both sides
    Selfplay(commands::selfplay::SelfPlayArgs),

    /// Score the open squares of a position
    BestMove(commands::best_move::BestMoveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CommonConfig {
        verbose: cli.verbose,
        ..CommonConfig::default()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => commands::play::execute(args),
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Selfplay(args) => commands::selfplay::execute(args),
        Commands::BestMove(args) => commands::best_move::execute(args),
    }
}
