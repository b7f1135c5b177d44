use axum::{extract::Path, Json};
use serde_json::{json, Value as JsonValue};

use crate::clients::chess_com::ChessComClient;
use crate::error::AppError;

/// GET /api/games/{username}
pub async fn get_games(Path(username): Path<String>) -> Result<Json<JsonValue>, AppError> {
    let client = ChessComClient::new();
    let games = client
        .fetch_recent_games(&username)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to fetch games: {e}")))?;

    // 20 most recent games, indexed for the analyze endpoint
    let game_list: Vec<JsonValue> = games
        .iter()
        .take(20)
        .enumerate()
        .map(|(i, game)| {
            json!({
                "index": i,
                "white": game.white,
                "black": game.black,
                "result": game.result,
                "time_class": game.time_class,
                "url": game.url,
            })
        })
        .collect();

    Ok(Json(json!({ "games": game_list })))
}
