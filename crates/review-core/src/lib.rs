//! Engine-backed game review: evaluates a finished game ply by ply with
//! a UCI engine and produces per-move classifications and accuracy.

pub mod accuracy;
pub mod classify;
pub mod engine;
pub mod error;
pub mod eval;
pub mod pgn;
pub mod review;

pub use engine::{Evaluator, SearchLimit, UciEngine};
pub use error::ReviewError;
pub use eval::Evaluation;
pub use review::{analyze_pgn, review_game, GameReport, MoveReport};
