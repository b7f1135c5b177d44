//! Review error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid PGN: {0}")]
    InvalidPgn(String),

    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Engine error: {0}")]
    Engine(String),
}
