//! Move classification: pure functions only
//! (No Engine/Position dependencies)

use serde::{Deserialize, Serialize};

use crate::eval::Evaluation;

/// Classification thresholds (centipawn loss, left-closed/right-open)
const THRESHOLD_BEST: f64 = 20.0;
const THRESHOLD_EXCELLENT: f64 = 50.0;
const THRESHOLD_GOOD: f64 = 150.0;
const THRESHOLD_INACCURACY: f64 = 300.0;
const THRESHOLD_MISTAKE: f64 = 600.0;

/// Quality label for a single move, ordered best-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    Best,
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Best => "Best",
            Classification::Excellent => "Excellent",
            Classification::Good => "Good",
            Classification::Inaccuracy => "Inaccuracy",
            Classification::Mistake => "Mistake",
            Classification::Blunder => "Blunder",
            Classification::Unknown => "Unknown",
        }
    }
}

/// Classify a move from its surrounding evaluations. Both evaluations
/// are white-perspective; `white_mover` flips them to the mover's side.
///
/// Mate-band positions bypass the centipawn table: keeping or
/// delivering mate is Best, letting a forced mate slip is a Blunder.
pub fn classify_move(
    eval_before: Option<&Evaluation>,
    eval_after: Option<&Evaluation>,
    white_mover: bool,
) -> Classification {
    let (Some(before), Some(after)) = (eval_before, eval_after) else {
        return Classification::Unknown;
    };

    if before.in_mate_band() || after.in_mate_band() {
        return if after.in_mate_band() {
            Classification::Best
        } else if before.in_mate_band() {
            Classification::Blunder
        } else {
            Classification::Unknown
        };
    }

    let loss = -(after.pawns_for(white_mover) - before.pawns_for(white_mover)) * 100.0;

    if loss < THRESHOLD_BEST {
        Classification::Best
    } else if loss < THRESHOLD_EXCELLENT {
        Classification::Excellent
    } else if loss < THRESHOLD_GOOD {
        Classification::Good
    } else if loss < THRESHOLD_INACCURACY {
        Classification::Inaccuracy
    } else if loss < THRESHOLD_MISTAKE {
        Classification::Mistake
    } else {
        Classification::Blunder
    }
}
