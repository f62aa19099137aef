//! Play command - Interactive game against the computer on the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Parser;
use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    Error,
    cli::config::CommonConfig,
    search::{opening_shortcut, play_best_move},
    tictactoe::{GameState, Player, Square},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the computer")]
pub struct PlayArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = CommonConfig {
        seed: args.seed,
        ..CommonConfig::default()
    };
    let mut rng = config.rng();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_game(stdin.lock(), stdout.lock(), &mut rng)?;
    Ok(())
}

/// Play one full game, reading the human's squares from `input`.
///
/// Rejected or unreadable moves are reported and asked for again.
///
/// # Errors
///
/// Fails if `input` runs dry before the game ends or on I/O errors.
#[instrument(skip_all)]
pub fn run_game<I, O, R>(mut input: I, mut output: O, rng: &mut R) -> Result<GameState>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let mut game = GameState::new(rng);
    writeln!(output, "You are playing as {}", game.token(Player::Human))?;
    writeln!(output, "{} goes first", game.current_player())?;

    while !game.is_over() {
        match game.current_player() {
            Player::Human => {
                writeln!(output, "{game}")?;
                writeln!(output, "Your turn")?;
                write!(output, "Move: ")?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    bail!("input closed before the game finished");
                }
                let entry = line.trim();
                let Ok(raw) = entry.parse::<i64>() else {
                    writeln!(output, "Not a square: {entry}")?;
                    continue;
                };
                let played = Square::try_from(raw)
                    .map_err(|_| Error::InvalidMove { square: raw })
                    .and_then(|square| game.play(square));
                match played {
                    Ok(()) => {}
                    Err(e) if e.is_move_rejection() => {
                        debug!(error = %e, "rejected move");
                        writeln!(output, "{e}")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Player::Computer => {
                let shortcut = opening_shortcut(&game);
                let square = play_best_move(&mut game, shortcut, rng)?;
                writeln!(output, "Computer move: {square}")?;
            }
        }
    }

    match game.winner() {
        Some(winner) => writeln!(output, "Game won by: {winner}")?,
        None => writeln!(output, "Game drawn")?,
    }
    writeln!(output, "{game}")?;
    Ok(game)
}
