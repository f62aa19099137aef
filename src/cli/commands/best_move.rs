//! Best-move command - Score every open square of a position

use anyhow::{Result, bail, ensure};
use clap::Parser;

use crate::{
    cli::{
        config::CommonConfig,
        output::{print_kv, print_section},
    },
    search::{find_best_move, score_moves},
    tictactoe::{ALL_SQUARES, GameState, Player, Seats, Square, Token},
};

#[derive(Parser, Debug)]
#[command(about = "Show minimax scores and the chosen move for a position")]
pub struct BestMoveArgs {
    /// Squares held by the computer, comma separated (e.g. 1,5)
    #[arg(long, value_delimiter = ',')]
    pub computer: Vec<Square>,

    /// Squares held by the human, comma separated
    #[arg(long, value_delimiter = ',')]
    pub human: Vec<Square>,

    /// The human is to move instead of the computer
    #[arg(long)]
    pub human_to_move: bool,

    /// Take the center without searching when it is open
    #[arg(long)]
    pub shortcut: bool,

    /// Random seed for tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Build a legal position from the squares each side holds.
///
/// The side that moved first holds `X`: the one with more squares, or the
/// side to move when both hold the same number.
///
/// # Errors
///
/// Fails for squares outside 1-9, squares listed twice, or counts that no
/// alternating game can produce.
pub fn build_position(computer: &[Square], human: &[Square], to_move: Player) -> Result<GameState> {
    let mut seen = Vec::new();
    for &square in computer.iter().chain(human) {
        ensure!(ALL_SQUARES.contains(&square), "square {square} is outside 1-9");
        ensure!(!seen.contains(&square), "square {square} is listed twice");
        seen.push(square);
    }

    let first = match computer.len() as i64 - human.len() as i64 {
        0 => to_move,
        1 if to_move == Player::Human => Player::Computer,
        -1 if to_move == Player::Computer => Player::Human,
        _ => bail!(
            "{} computer and {} human squares cannot have {} to move",
            computer.len(),
            human.len(),
            to_move
        ),
    };

    let mut tokens = Seats::new(Token::O, Token::O);
    tokens[first] = Token::X;
    let open = ALL_SQUARES
        .iter()
        .copied()
        .filter(|sq| !seen.contains(sq))
        .collect();
    Ok(GameState::from_parts(
        Seats::new(computer.to_vec(), human.to_vec()),
        open,
        to_move,
        tokens,
    ))
}

pub fn execute(args: BestMoveArgs) -> Result<()> {
    let to_move = if args.human_to_move {
        Player::Human
    } else {
        Player::Computer
    };
    let game = build_position(&args.computer, &args.human, to_move)?;
    let config = CommonConfig {
        seed: args.seed,
        ..CommonConfig::default()
    };
    let mut rng = config.rng();

    print_section("Position");
    println!("{game}");
    if game.is_over() {
        match game.winner() {
            Some(winner) => println!("\nGame already won by {winner}"),
            None => println!("\nGame drawn"),
        }
        return Ok(());
    }

    print_section(&format!("Scores ({to_move} to move, computer side)"));
    for (square, score) in score_moves(&game) {
        print_kv(&format!("Square {square}"), &format!("{score:+}"));
    }

    let choice = find_best_move(&game, args.shortcut, &mut rng)?;
    println!();
    print_kv("Chosen", &choice.to_string());
    Ok(())
}
