//! Stockfish engine wrapper using UCI protocol (async I/O)

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::error::ReviewError;

/// Default locations probed when no explicit engine path is configured.
/// A bare name is resolved through PATH by the spawn itself.
pub const DEFAULT_ENGINE_CANDIDATES: &[&str] = &[
    "/usr/games/stockfish",
    "/usr/bin/stockfish",
    "/usr/local/bin/stockfish",
    "/opt/homebrew/bin/stockfish",
    "stockfish",
];

/// Search limit for a single evaluation. The engine stops at whichever
/// bound it reaches first.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimit {
    /// Wall-clock budget in milliseconds
    pub movetime_ms: u64,
    /// Maximum search depth in plies
    pub depth: u32,
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self {
            movetime_ms: 100,
            depth: 15,
        }
    }
}

/// Result of a single position evaluation
#[derive(Debug, Clone, Default)]
pub struct EvalResult {
    /// Centipawn score (from engine's perspective, i.e., side to move)
    pub cp: Option<i32>,
    /// Mate in N moves (positive = side to move wins)
    pub mate: Option<i32>,
    /// Best move in UCI notation; `None` when the engine has no move
    /// to suggest (terminal positions report `bestmove (none)`)
    pub best_move: Option<String>,
}

/// Position evaluator boundary. The review pipeline only depends on
/// this seam, so its properties can be exercised without a live engine.
pub trait Evaluator {
    fn evaluate(
        &mut self,
        fen: &str,
        limit: &SearchLimit,
    ) -> impl std::future::Future<Output = Result<EvalResult, ReviewError>> + Send;
}

/// Stockfish engine session, scoped to a single game analysis
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn a new Stockfish process and initialize UCI
    pub async fn spawn(path: &str) -> Result<Self, ReviewError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| {
                ReviewError::EngineUnavailable(format!("Failed to spawn {path}: {e}"))
            })?;

        let stdin = process.stdin.take().ok_or_else(|| {
            ReviewError::EngineUnavailable("Engine stdin unavailable".to_string())
        })?;
        let stdout = process.stdout.take().ok_or_else(|| {
            ReviewError::EngineUnavailable("Engine stdout unavailable".to_string())
        })?;
        let stdout = BufReader::new(stdout);

        let mut engine = Self {
            process,
            stdin,
            stdout,
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // Configure for analysis
        engine.send("setoption name Threads value 1").await?;
        engine.send("setoption name Hash value 128").await?;
        engine.send("setoption name UCI_AnalyseMode value true").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to the engine
    async fn send(&mut self, cmd: &str) -> Result<(), ReviewError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| ReviewError::Engine(format!("Failed to write to engine: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| ReviewError::Engine(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), ReviewError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| ReviewError::Engine(format!("Failed to read from engine: {e}")))?;
            if n == 0 {
                return Err(ReviewError::Engine(format!(
                    "Engine closed stdout waiting for '{expected}'"
                )));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Send quit and wait for the process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Evaluator for UciEngine {
    /// Evaluate a position, returning the score relative to the side
    /// to move plus the engine's suggested move
    async fn evaluate(&mut self, fen: &str, limit: &SearchLimit) -> Result<EvalResult, ReviewError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!(
            "go movetime {} depth {}",
            limit.movetime_ms, limit.depth
        ))
        .await?;

        let mut result = EvalResult::default();

        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| ReviewError::Engine(format!("Failed to read from engine: {e}")))?;
            if n == 0 {
                return Err(ReviewError::Engine(
                    "Engine closed stdout during search".to_string(),
                ));
            }
            let trimmed = line.trim();

            // Terminal positions emit score-only info lines with no pv,
            // so any score-bearing info line counts.
            if trimmed.starts_with("info") && trimmed.contains(" score ") {
                if let Some(cp) = parse_cp(trimmed) {
                    result.cp = Some(cp);
                    result.mate = None;
                }
                if let Some(mate) = parse_mate(trimmed) {
                    result.mate = Some(mate);
                    result.cp = None;
                }
            } else if trimmed.starts_with("bestmove") {
                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                result.best_move = match parts.get(1) {
                    Some(&"(none)") | None => None,
                    Some(mv) => Some(mv.to_string()),
                };
                break;
            }
        }

        Ok(result)
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Probe candidate engine paths by attempting a spawn, returning the
/// first that completes the UCI handshake. Intended to run once at
/// startup; the resolved path is carried in configuration afterwards.
pub async fn discover(candidates: &[&str]) -> Result<String, ReviewError> {
    for path in candidates {
        match UciEngine::spawn(path).await {
            Ok(mut engine) => {
                engine.quit().await;
                return Ok(path.to_string());
            }
            Err(e) => debug!(path = %path, error = %e, "Engine candidate rejected"),
        }
    }
    Err(ReviewError::EngineUnavailable(
        "No usable engine found; install Stockfish or set STOCKFISH_PATH".to_string(),
    ))
}

/// Parse centipawn score from info line
fn parse_cp(line: &str) -> Option<i32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "cp" && i + 1 < parts.len() {
            return parts[i + 1].parse().ok();
        }
    }
    None
}

/// Parse mate score from info line
fn parse_mate(line: &str) -> Option<i32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "mate" && i + 1 < parts.len() {
            return parts[i + 1].parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cp() {
        let line = "info depth 15 seldepth 21 multipv 1 score cp 35 nodes 100000 pv e2e4";
        assert_eq!(parse_cp(line), Some(35));
        assert_eq!(parse_mate(line), None);
    }

    #[test]
    fn test_parse_mate() {
        let line = "info depth 15 score mate 3 nodes 100000 pv d8h4";
        assert_eq!(parse_mate(line), Some(3));
        assert_eq!(parse_cp(line), None);
    }

    #[test]
    fn test_parse_mate_negative() {
        // Side to move is getting mated
        let line = "info depth 10 score mate -2 nodes 5000 pv g8f6";
        assert_eq!(parse_mate(line), Some(-2));
    }

    #[test]
    fn test_parse_checkmated_info_line() {
        // Final position of a decided game: no pv at all
        let line = "info depth 0 score mate 0";
        assert_eq!(parse_mate(line), Some(0));
        assert_eq!(parse_cp(line), None);
    }
}
