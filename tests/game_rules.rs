//! Rule checks over many random games: the square partition, move
//! rejection and the post-win lockout.

use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use ttt::{
    Error,
    tictactoe::{GameState, Player, Seats, Token, WINNING_LINES},
};

mod common;

fn assert_partition(game: &GameState) {
    let (open, computer, human) = common::partition(game);
    let mut all: Vec<_> = open.iter().chain(&computer).chain(&human).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (1..=9).collect::<Vec<_>>(), "partition broken: {game:?}");
}

#[test]
fn random_games_keep_the_partition() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut game = GameState::new(&mut rng);
        assert_partition(&game);

        while !game.is_over() {
            let mover = game.current_player();
            let square = *game.open_squares().choose(&mut rng).unwrap();
            game.play(square).unwrap();

            assert_partition(&game);
            assert_eq!(game.current_player(), mover.opponent());
            assert!(game.is_consistent());
        }
    }
}

#[test]
fn rejected_moves_leave_state_unchanged() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let mut game = GameState::new(&mut rng);
        let plies = rng.random_range(0..5);
        for _ in 0..plies {
            let square = *game.open_squares().choose(&mut rng).unwrap();
            game.play(square).unwrap();
        }
        if game.is_over() {
            continue;
        }

        let before = game.clone();
        let taken: Vec<_> = game
            .moves(Player::Computer)
            .iter()
            .chain(game.moves(Player::Human))
            .copied()
            .collect();
        for square in taken.into_iter().chain([0, 10, 42]) {
            assert_eq!(
                game.play(square),
                Err(Error::InvalidMove {
                    square: square.into()
                })
            );
            assert_eq!(game, before);
        }
    }
}

#[test]
fn no_moves_after_a_win() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut checked = 0;
    for _ in 0..300 {
        let mut game = GameState::new(&mut rng);
        while !game.is_over() {
            let square = *game.open_squares().choose(&mut rng).unwrap();
            game.play(square).unwrap();
        }
        let Some(winner) = game.winner() else {
            continue;
        };
        checked += 1;

        let before = game.clone();
        for square in 1..=9 {
            assert_eq!(game.play(square), Err(Error::AlreadyWon { winner }));
        }
        assert_eq!(game, before);
    }
    assert!(checked > 0);
}

#[test]
fn every_line_wins_for_either_player() {
    for line in WINNING_LINES {
        for player in Player::ALL {
            let mut moves = Seats::<Vec<u8>>::default();
            moves[player] = line.to_vec();
            let open = (1..=9).filter(|sq| !line.contains(sq)).collect();
            let game = GameState::from_parts(
                moves,
                open,
                player.opponent(),
                Seats::new(Token::X, Token::O),
            );
            assert_eq!(game.winner(), Some(player), "line {line:?}");
            assert!(game.is_over());
        }
    }
}

#[test]
fn center_move_renders_x() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut game = GameState::new(&mut rng);
    let mover = game.current_player();
    game.play(5).unwrap();

    assert_eq!(game.token(mover), Token::X);
    assert_eq!(game.render_board(), "1 2 3 \n4 X 6 \n7 8 9 ");
}

#[test]
fn full_diagonal_wins_for_first_player() {
    let game = common::position(&[1, 5, 9], &[2, 4], Player::Human);
    assert_eq!(game.winner(), Some(Player::Computer));
    assert!(game.is_over());
}
