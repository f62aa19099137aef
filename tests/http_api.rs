//! HTTP API tests, run in-process against the router.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rand::{SeedableRng, rngs::StdRng};
use tower::ServiceExt;
use ttt::{
    adapters::InMemoryGameRepository,
    api::{AppState, ErrorResponse, GameView, HealthResponse, create_app},
    ports::GameRepository,
    tictactoe::{GameState, Player},
};

fn test_app() -> (Router, Arc<InMemoryGameRepository>) {
    let repository = Arc::new(InMemoryGameRepository::new());
    let state = Arc::new(AppState::new(
        repository.clone(),
        StdRng::seed_from_u64(42),
    ));
    (create_app(state), repository)
}

/// Helper to make a GET request and return response body as string
async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Helper to make a POST request with JSON body and return response
async fn post_json(app: Router, uri: &str, json: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn health_endpoint() {
    let (app, _) = test_app();
    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let response: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.status, "ok");
}

#[tokio::test]
async fn new_game_leaves_human_to_move() {
    let (app, repository) = test_app();
    let (status, body) = post_json(app, "/api/", r#"{"new": true}"#).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_eq!(view.game_id, 1);
    assert_eq!(view.current_user, Player::Human);
    assert!(!view.is_over);
    assert!(view.error_list.is_empty());
    assert_eq!(view.full_board.len(), 9);
    // A computer that started has taken the center.
    if !view.computer_board.is_empty() {
        assert_eq!(view.computer_board, vec![5]);
        assert_eq!(view.open_moves.len(), 8);
    }
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn move_is_answered_by_the_computer() {
    let (app, repository) = test_app();
    let id = repository.insert(GameState::with_first_player(Player::Human));

    let body = format!(r#"{{"game_id": {id}, "move": 1}}"#);
    let (status, body) = post_json(app, "/api/", &body).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_eq!(view.player_board, vec![1]);
    assert_eq!(view.computer_board, vec![5]);
    assert_eq!(view.full_board[0].user, "X");
    assert_eq!(view.full_board[4].user, "O");
    assert_eq!(view.round, 3);

    let stored = repository.get(id).unwrap();
    assert_eq!(stored.moves(Player::Human), &[1]);
}

#[tokio::test]
async fn taken_square_is_reported_and_not_applied() {
    let (app, repository) = test_app();
    let mut game = GameState::with_first_player(Player::Human);
    game.play(1).unwrap();
    game.play(5).unwrap();
    let id = repository.insert(game.clone());

    let body = format!(r#"{{"game_id": {id}, "move": 5}}"#);
    let (status, body) = post_json(app, "/api/", &body).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_eq!(
        view.error_list,
        vec!["invalid square or already taken: 5".to_string()]
    );
    assert_eq!(repository.get(id).unwrap(), game);
}

#[tokio::test]
async fn move_after_win_is_reported() {
    let (app, repository) = test_app();
    let mut game = GameState::with_first_player(Player::Computer);
    for square in [1, 4, 2, 5, 3] {
        game.play(square).unwrap();
    }
    let id = repository.insert(game);

    let body = format!(r#"{{"game_id": {id}, "move": 9}}"#);
    let (_, body) = post_json(app, "/api/", &body).await;

    let view: GameView = serde_json::from_str(&body).unwrap();
    assert!(view.is_over);
    assert_eq!(view.won_by, Some(Player::Computer));
    assert_eq!(view.error_list, vec!["already won by computer".to_string()]);
}

#[tokio::test]
async fn get_returns_stored_game() {
    let (app, repository) = test_app();
    let id = repository.insert(GameState::with_first_player(Player::Computer));

    let (status, body) = get(app, &format!("/api/?game_id={id}")).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_eq!(view.game_id, id);
    assert_eq!(view.computer_token.to_string(), "X");
    assert_eq!(view.open_moves, (1..=9).collect::<Vec<_>>());
}

#[tokio::test]
async fn get_without_id_is_rejected() {
    let (app, _) = test_app();
    let (status, body) = get(app, "/api/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.error_list, vec!["Game not specified".to_string()]);
}

#[tokio::test]
async fn unknown_game_is_not_found() {
    let (app, _) = test_app();
    let (status, body) = get(app.clone(), "/api/?game_id=77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.error_list, vec!["Game not found".to_string()]);

    let (status, _) = post_json(app, "/api/", r#"{"game_id": 77, "move": 1}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_without_id_is_rejected() {
    let (app, repository) = test_app();
    let (status, body) = post_json(app, "/api/", r#"{"move": 5}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.error_list, vec!["Game not specified".to_string()]);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let (app, _) = test_app();
    let (status, body) = get(app.clone(), "/api/?game_id=abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.error_list, vec!["Game not found".to_string()]);

    let (status, body) = post_json(app, "/api/", r#"{"game_id": "abc", "move": 1}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.error_list, vec!["Game not found".to_string()]);
}

#[tokio::test]
async fn new_game_ignores_given_id() {
    let (app, repository) = test_app();
    let existing = repository.insert(GameState::with_first_player(Player::Human));
    let before = repository.get(existing).unwrap();

    let body = format!(r#"{{"new": true, "game_id": {existing}}}"#);
    let (status, body) = post_json(app, "/api/", &body).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_ne!(view.game_id, existing);
    assert_eq!(repository.len(), 2);
    assert_eq!(repository.get(existing).unwrap(), before);
}

#[tokio::test]
async fn string_game_id_is_accepted() {
    let (app, repository) = test_app();
    let id = repository.insert(GameState::with_first_player(Player::Human));

    let body = format!(r#"{{"game_id": "{id}", "move": 1}}"#);
    let (status, body) = post_json(app, "/api/", &body).await;

    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_str(&body).unwrap();
    assert_eq!(view.game_id, id);
    assert_eq!(view.player_board, vec![1]);
    assert_eq!(view.computer_board, vec![5]);
}
