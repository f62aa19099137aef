//! Selfplay command - Let the search play both sides

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    cli::{
        config::CommonConfig,
        output::{create_games_progress, format_share, print_kv, print_section},
    },
    search::play_best_move,
    tictactoe::{GameState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Let the move search play against itself")]
pub struct SelfPlayArgs {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 10)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write the tally as JSON to this file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Tally of finished self-play games
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub computer_wins: usize,
    pub human_wins: usize,
    pub draws: usize,
}

impl SelfPlaySummary {
    pub fn record(&mut self, game: &GameState) {
        self.games += 1;
        match game.winner() {
            Some(Player::Computer) => self.computer_wins += 1,
            Some(Player::Human) => self.human_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// Play one game from a fresh board with full search on every move.
///
/// # Errors
///
/// Propagates move selection errors, which a fresh game never produces.
pub fn play_out<R: Rng + ?Sized>(rng: &mut R) -> crate::Result<GameState> {
    let mut game = GameState::new(rng);
    while !game.is_over() {
        play_best_move(&mut game, false, rng)?;
    }
    Ok(game)
}

/// Play `games` games and tally the results.
///
/// # Errors
///
/// Same as [`play_out`].
#[instrument(skip(rng, progress))]
pub fn run<R: Rng + ?Sized>(
    games: usize,
    rng: &mut R,
    progress: Option<&ProgressBar>,
) -> crate::Result<SelfPlaySummary> {
    let mut summary = SelfPlaySummary::default();
    for _ in 0..games {
        let game = play_out(rng)?;
        summary.record(&game);
        if let Some(pb) = progress {
            pb.set_message(format!("{} draws", summary.draws));
            pb.inc(1);
        }
    }
    Ok(summary)
}

pub fn execute(args: SelfPlayArgs) -> Result<()> {
    let config = CommonConfig {
        seed: args.seed,
        progress: !args.no_progress,
        ..CommonConfig::default()
    };
    let mut rng = config.rng();

    let progress = config
        .progress
        .then(|| create_games_progress(args.games as u64));
    let summary = run(args.games, &mut rng, progress.as_ref())?;
    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }
    info!(games = summary.games, draws = summary.draws, "self-play finished");

    print_section("Self-Play Results");
    print_kv("Games", &summary.games.to_string());
    print_kv(
        "Computer wins",
        &format_share(summary.computer_wins, summary.games),
    );
    print_kv("Human wins", &format_share(summary.human_wins, summary.games));
    print_kv("Draws", &format_share(summary.draws, summary.games));

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("\nSummary exported to: {}", path.display());
    }

    Ok(())
}
