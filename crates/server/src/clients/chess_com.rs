use chrono::{Datelike, Utc};
use reqwest::Client;
use serde_json::Value;

/// One game as returned by the chess.com published-data API
#[derive(Debug, Clone)]
pub struct FetchedGame {
    pub pgn: Option<String>,
    pub white: String,
    pub black: String,
    pub result: String,
    pub time_class: String,
    pub url: String,
}

pub struct ChessComClient {
    client: Client,
}

impl ChessComClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("GameReview/1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self { client }
    }

    /// Fetch a user's recent games: the current month's archive, or the
    /// previous month's when the current one is empty.
    pub async fn fetch_recent_games(&self, username: &str) -> Result<Vec<FetchedGame>, String> {
        let now = Utc::now();
        let games = self.fetch_month(username, now.year(), now.month()).await?;
        if !games.is_empty() {
            return Ok(games);
        }

        let (prev_year, prev_month) = if now.month() > 1 {
            (now.year(), now.month() - 1)
        } else {
            (now.year() - 1, 12)
        };
        self.fetch_month(username, prev_year, prev_month).await
    }

    async fn fetch_month(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<FetchedGame>, String> {
        let url = format!(
            "https://api.chess.com/pub/player/{}/games/{}/{:02}",
            username, year, month
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("JSON parse error: {e}"))?;

        Ok(games_from_json(&data))
    }
}

impl Default for ChessComClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the game list from a monthly-archive response body
fn games_from_json(data: &Value) -> Vec<FetchedGame> {
    data["games"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|game| FetchedGame {
            pgn: game
                .get("pgn")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            white: game["white"]["username"]
                .as_str()
                .unwrap_or("Unknown")
                .to_string(),
            black: game["black"]["username"]
                .as_str()
                .unwrap_or("Unknown")
                .to_string(),
            result: game["white"]["result"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            time_class: game
                .get("time_class")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            url: game
                .get("url")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_games_from_json() {
        let data = json!({
            "games": [
                {
                    "url": "https://www.chess.com/game/live/123",
                    "pgn": "[White \"alice\"]\n1. e4 e5 *",
                    "time_class": "blitz",
                    "white": { "username": "alice", "result": "win" },
                    "black": { "username": "bob", "result": "checkmated" }
                },
                {
                    "white": { "username": "carol" },
                    "black": {}
                }
            ]
        });

        let games = games_from_json(&data);
        assert_eq!(games.len(), 2);

        assert_eq!(games[0].white, "alice");
        assert_eq!(games[0].black, "bob");
        assert_eq!(games[0].result, "win");
        assert_eq!(games[0].time_class, "blitz");
        assert!(games[0].pgn.is_some());

        assert_eq!(games[1].black, "Unknown");
        assert_eq!(games[1].result, "unknown");
        assert!(games[1].pgn.is_none());
    }

    #[test]
    fn test_games_from_json_empty_body() {
        assert!(games_from_json(&json!({})).is_empty());
    }
}
