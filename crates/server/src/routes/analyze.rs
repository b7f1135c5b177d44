use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::info;

use review_core::{analyze_pgn, ReviewError};

use crate::clients::chess_com::ChessComClient;
use crate::config::EngineConfig;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub username: String,
    #[serde(default)]
    pub game_index: usize,
}

/// POST /api/analyze
pub async fn analyze_game(
    Extension(engine): Extension<EngineConfig>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let client = ChessComClient::new();
    let games = client
        .fetch_recent_games(&req.username)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to fetch games: {e}")))?;

    let game = games
        .get(req.game_index)
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

    let pgn = game
        .pgn
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Game has no PGN data".to_string()))?;

    let engine_path = engine.path.as_deref().ok_or_else(|| {
        ReviewError::EngineUnavailable(
            "Stockfish not found. Install Stockfish or set STOCKFISH_PATH".to_string(),
        )
    })?;

    info!(username = %req.username, game_index = req.game_index, "Analyzing game");
    let report = analyze_pgn(engine_path, pgn, &engine.limit).await?;

    let mut body = serde_json::to_value(&report)
        .map_err(|e| AppError::Internal(format!("Failed to serialize report: {e}")))?;
    body["username"] = json!(req.username);
    body["pgn"] = json!(pgn);

    Ok(Json(body))
}
