use std::env;

use review_core::engine::DEFAULT_ENGINE_CANDIDATES;
use review_core::SearchLimit;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Explicit engine path; when unset the default candidates are probed
    pub stockfish_path: Option<String>,
    pub engine_movetime_ms: u64,
    pub engine_depth: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            stockfish_path: env::var("STOCKFISH_PATH").ok(),
            engine_movetime_ms: env::var("ENGINE_MOVETIME_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            engine_depth: env::var("ENGINE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    /// Candidate engine paths, configured override first
    pub fn engine_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();
        if let Some(ref path) = self.stockfish_path {
            candidates.push(path.clone());
        }
        candidates.extend(DEFAULT_ENGINE_CANDIDATES.iter().map(|p| p.to_string()));
        candidates
    }

    pub fn search_limit(&self) -> SearchLimit {
        SearchLimit {
            movetime_ms: self.engine_movetime_ms,
            depth: self.engine_depth,
        }
    }
}

/// Engine settings resolved once at startup and injected into handlers
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Discovered engine path; `None` when no engine was found
    pub path: Option<String>,
    pub limit: SearchLimit,
}
