//! HTTP API for playing against the computer.
//!
//! Endpoints:
//! - GET  /health              - Health check
//! - GET  /api/?game_id=N      - Current state of a stored game
//! - POST /api/                - Start a game and/or play a move
//!
//! A POST body looks like `{"new": true}` or `{"game_id": 3, "move": 5}`;
//! `game_id` may also be sent as a string. The computer answers every
//! accepted move straight away, so a response always shows the human to move
//! unless the game is over.
//!
//! The computer's search runs on the blocking pool with its own RNG drawn
//! from the shared one. It still runs inside [`GameRepository::update`], so
//! with [`crate::adapters::InMemoryGameRepository`] other requests wait on
//! the store lock until it finishes.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    Error,
    cli::config::ServerConfig,
    ports::{GameId, GameRepository},
    search::{opening_shortcut, play_best_move},
    tictactoe::{GameState, Player, Square, Token},
};

/// Shared application state
pub struct AppState {
    /// Where games live between requests
    pub repository: Arc<dyn GameRepository + Send + Sync>,
    /// Entropy for new games and tie-breaking
    rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>, rng: StdRng) -> Self {
        Self {
            repository,
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

/// Query string of `GET /api/`
#[derive(Debug, Default, Deserialize)]
pub struct GameQuery {
    pub game_id: Option<String>,
}

/// Body of `POST /api/`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub new: bool,
    pub game_id: Option<GameIdParam>,
    #[serde(rename = "move")]
    pub square: Option<i64>,
}

/// A game id as a client sends it: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameIdParam {
    Number(GameId),
    Text(String),
}

impl GameIdParam {
    /// # Errors
    ///
    /// Returns [`Error::InvalidGameId`] for a string that is not a number.
    pub fn parse(&self) -> crate::Result<GameId> {
        match self {
            GameIdParam::Number(id) => Ok(*id),
            GameIdParam::Text(raw) => parse_game_id(raw),
        }
    }
}

fn parse_game_id(raw: &str) -> crate::Result<GameId> {
    raw.trim().parse().map_err(|_| Error::InvalidGameId {
        raw: raw.to_string(),
    })
}

/// One entry of the `full_board` listing; `user` is the token or `-`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareView {
    pub square: Square,
    pub user: String,
}

/// Everything a client needs to draw a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: GameId,
    pub computer_board: Vec<Square>,
    pub player_board: Vec<Square>,
    pub computer_token: Token,
    pub player_token: Token,
    pub current_user: Player,
    pub full_board: Vec<SquareView>,
    pub open_moves: Vec<Square>,
    pub is_over: bool,
    pub won_by: Option<Player>,
    pub round: u32,
    pub error_list: Vec<String>,
}

impl GameView {
    pub fn new(game_id: GameId, game: &GameState, error_list: Vec<String>) -> Self {
        GameView {
            game_id,
            computer_board: game.moves(Player::Computer).to_vec(),
            player_board: game.moves(Player::Human).to_vec(),
            computer_token: game.token(Player::Computer),
            player_token: game.token(Player::Human),
            current_user: game.current_player(),
            full_board: game
                .full_board()
                .into_iter()
                .map(|sq| SquareView {
                    square: sq.square,
                    user: sq.token.map_or_else(|| "-".to_string(), |t| t.to_string()),
                })
                .collect(),
            open_moves: game.open_squares().to_vec(),
            is_over: game.is_over(),
            won_by: game.winner(),
            round: game.round(),
            error_list,
        }
    }
}

/// Response carrying only errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Game(GameView),
    Errors(ErrorResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

type Reply = (StatusCode, Json<ApiResponse>);

fn error_reply(status: StatusCode, error: &Error) -> Reply {
    let message = match error {
        Error::GameNotFound { .. } | Error::InvalidGameId { .. } => "Game not found".to_string(),
        Error::GameNotSpecified => "Game not specified".to_string(),
        other => other.to_string(),
    };
    (
        status,
        Json(ApiResponse::Errors(ErrorResponse {
            error_list: vec![message],
        })),
    )
}

fn game_reply(state: &AppState, id: GameId, errors: Vec<String>) -> Reply {
    match state.repository.get(id) {
        Ok(game) => (
            StatusCode::OK,
            Json(ApiResponse::Game(GameView::new(id, &game, errors))),
        ),
        Err(e) => error_reply(StatusCode::NOT_FOUND, &e),
    }
}

fn record(errors: &mut Vec<String>, error: Error) {
    if error.is_move_rejection() {
        debug!(error = %error, "rejected move");
    } else {
        warn!(error = %error, "move failed");
    }
    errors.push(error.to_string());
}

/// Let the computer move if it is its turn, then play the human's square
/// and answer it. Returns the messages of rejected moves.
///
/// A rejected human move leaves the game as it was after the computer's
/// opening move.
pub fn advance_game(game: &mut GameState, square: Option<i64>, rng: &mut StdRng) -> Vec<String> {
    let mut errors = Vec::new();

    if game.current_player() == Player::Computer && !game.is_over() {
        let shortcut = opening_shortcut(game);
        if let Err(e) = play_best_move(game, shortcut, rng) {
            record(&mut errors, e);
        }
    }

    let Some(raw) = square else {
        return errors;
    };
    let played = Square::try_from(raw)
        .map_err(|_| Error::InvalidMove { square: raw })
        .and_then(|sq| game.play(sq));
    match played {
        Ok(()) if !game.is_over() => {
            let shortcut = opening_shortcut(game);
            if let Err(e) = play_best_move(game, shortcut, rng) {
                record(&mut errors, e);
            }
        }
        Ok(()) => {}
        Err(e) => record(&mut errors, e),
    }
    errors
}

/// Create the application router with the given state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/", get(get_game).post(post_game))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[instrument(skip(state))]
async fn get_game(State(state): State<Arc<AppState>>, Query(query): Query<GameQuery>) -> Reply {
    let Some(raw) = query.game_id.filter(|id| !id.is_empty()) else {
        return error_reply(StatusCode::BAD_REQUEST, &Error::GameNotSpecified);
    };
    match parse_game_id(&raw) {
        Ok(id) => game_reply(&state, id, Vec::new()),
        Err(e) => error_reply(StatusCode::NOT_FOUND, &e),
    }
}

#[instrument(skip(state))]
async fn post_game(State(state): State<Arc<AppState>>, Json(request): Json<MoveRequest>) -> Reply {
    let id = if request.new {
        let game = state.with_rng(|rng| GameState::new(rng));
        let id = state.repository.insert(game);
        info!(game_id = id, "created game");
        id
    } else {
        match request.game_id.as_ref().map(GameIdParam::parse) {
            Some(Ok(id)) => id,
            Some(Err(e)) => return error_reply(StatusCode::NOT_FOUND, &e),
            None => return error_reply(StatusCode::BAD_REQUEST, &Error::GameNotSpecified),
        }
    };

    let mut rng = state.with_rng(|rng| StdRng::from_rng(rng));
    let square = request.square;
    let worker = Arc::clone(&state);
    let searched = tokio::task::spawn_blocking(move || {
        let mut errors = Vec::new();
        let updated = worker.repository.update(id, &mut |game| {
            errors = advance_game(game, square, &mut rng);
        });
        updated.map(|()| errors)
    })
    .await;

    match searched {
        Ok(Ok(errors)) => game_reply(&state, id, errors),
        Ok(Err(e)) => error_reply(StatusCode::NOT_FOUND, &e),
        Err(e) => {
            error!(game_id = id, error = %e, "move task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::Errors(ErrorResponse {
                    error_list: vec!["Internal error".to_string()],
                })),
            )
        }
    }
}

/// Bind to the configured address and serve until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_app(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}
