//! Core game review pipeline: replays a parsed game move by move,
//! querying the engine once per position and threading white-perspective
//! evaluations into classification and accuracy.

use serde::{Deserialize, Serialize};
use shakmaty::{
    fen::Fen,
    san::{San, SanPlus},
    uci::UciMove,
    CastlingMode, Chess, Color, EnPassantMode, Position,
};
use tracing::info;

use crate::accuracy::{game_accuracy, move_accuracy};
use crate::classify::{classify_move, Classification};
use crate::engine::{Evaluator, SearchLimit, UciEngine};
use crate::error::ReviewError;
use crate::eval::Evaluation;
use crate::pgn::{self, ParsedGame};

/// Engine suggestion attached to moves that fell short of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMove {
    #[serde(rename = "move")]
    pub san: String,
    pub from_square: String,
    pub to_square: String,
}

/// One reviewed ply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveReport {
    pub move_number: u32,
    #[serde(rename = "move")]
    pub san: String,
    /// White-perspective evaluation in pawns before/after the move
    pub eval_before: Option<f64>,
    pub eval_after: Option<f64>,
    pub classification: Classification,
    /// Position after the move
    pub fen: String,
    pub best_move: Option<BestMove>,
    /// Win percentage from the mover's perspective
    pub win_percent_before: Option<f64>,
    pub win_percent_after: Option<f64>,
    pub accuracy: Option<f64>,
    pub mate_before: bool,
    pub mate_after: bool,
    /// Signed mate distance (positive = white mates)
    pub mate_in_before: Option<i32>,
    pub mate_in_after: Option<i32>,
}

/// Full review of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    pub white_player: String,
    pub black_player: String,
    pub result: String,
    pub moves: Vec<MoveReport>,
    pub white_accuracy: Option<f64>,
    pub black_accuracy: Option<f64>,
}

/// Parse a PGN and review it with a freshly spawned engine session.
/// The session is scoped to this one analysis and released on every
/// exit path.
pub async fn analyze_pgn(
    engine_path: &str,
    pgn_text: &str,
    limit: &SearchLimit,
) -> Result<GameReport, ReviewError> {
    let game = pgn::parse_pgn(pgn_text)?;

    let mut engine = UciEngine::spawn(engine_path).await?;
    let report = review_game(&mut engine, &game, limit).await;
    engine.quit().await;
    report
}

/// Review a parsed game ply by ply.
///
/// Each position is evaluated exactly once: the query at the position
/// after ply *i* yields both `eval_after` for ply *i* and, carried
/// forward, `eval_before` plus the best-move suggestion for ply *i+1*.
/// A seed query at the initial position covers the first ply.
pub async fn review_game<E: Evaluator>(
    engine: &mut E,
    game: &ParsedGame,
    limit: &SearchLimit,
) -> Result<GameReport, ReviewError> {
    info!(
        white = %game.white,
        black = %game.black,
        plies = game.moves.len(),
        "Reviewing game"
    );

    let mut pos = Chess::default();
    let mut records: Vec<MoveReport> = Vec::with_capacity(game.moves.len());
    let mut move_number = 1u32;

    // Seed evaluation for the first ply
    let seed = engine.evaluate(&position_fen(&pos), limit).await?;
    let mut eval_before = Evaluation::from_uci(seed.cp, seed.mate, pos.turn() == Color::White);
    let mut suggestion = seed.best_move;

    for san_str in &game.moves {
        let mover = pos.turn();
        let white_mover = mover == Color::White;

        let san: SanPlus = san_str
            .parse()
            .map_err(|e| ReviewError::InvalidPgn(format!("Invalid SAN '{san_str}': {e}")))?;
        let mv = san
            .san
            .to_move(&pos)
            .map_err(|e| ReviewError::InvalidPgn(format!("Illegal move '{san_str}': {e}")))?;
        let played_uci = mv.to_uci(CastlingMode::Standard).to_string();

        let pre_pos = pos.clone();
        pos.play_unchecked(mv);
        let fen_after = position_fen(&pos);

        let after = engine.evaluate(&fen_after, limit).await?;
        let eval_after = Evaluation::from_uci(after.cp, after.mate, pos.turn() == Color::White);

        let classification = classify_move(eval_before.as_ref(), eval_after.as_ref(), white_mover);

        let win_before = eval_before.map(|e| e.win_percent_for(white_mover));
        let win_after = eval_after.map(|e| e.win_percent_for(white_mover));
        let accuracy = match (win_before, win_after) {
            (Some(before), Some(after)) => Some(move_accuracy(before - after)),
            _ => None,
        };

        // Suggest only when the engine preferred a different move and
        // the played one wasn't already Best
        let best_move = if classification != Classification::Best {
            suggestion
                .as_deref()
                .filter(|s| *s != played_uci)
                .and_then(|s| describe_best_move(&pre_pos, s))
        } else {
            None
        };

        records.push(MoveReport {
            move_number,
            san: san_str.clone(),
            eval_before: eval_before.map(|e| e.pawns),
            eval_after: eval_after.map(|e| e.pawns),
            classification,
            fen: fen_after,
            best_move,
            win_percent_before: win_before,
            win_percent_after: win_after,
            accuracy,
            mate_before: eval_before.is_some_and(|e| e.in_mate_band()),
            mate_after: eval_after.is_some_and(|e| e.in_mate_band()),
            mate_in_before: eval_before.and_then(|e| e.mate),
            mate_in_after: eval_after.and_then(|e| e.mate),
        });

        // Carry-forward: this ply's after is the next ply's before
        eval_before = eval_after;
        suggestion = after.best_move;
        if !white_mover {
            move_number += 1;
        }
    }

    // Even plies were played by white, odd by black
    let white_accs: Vec<Option<f64>> = records.iter().step_by(2).map(|r| r.accuracy).collect();
    let black_accs: Vec<Option<f64>> = records
        .iter()
        .skip(1)
        .step_by(2)
        .map(|r| r.accuracy)
        .collect();

    let report = GameReport {
        white_player: game.white.clone(),
        black_player: game.black.clone(),
        result: game.result.clone(),
        moves: records,
        white_accuracy: game_accuracy(&white_accs),
        black_accuracy: game_accuracy(&black_accs),
    };

    info!(
        plies = report.moves.len(),
        white_accuracy = ?report.white_accuracy,
        black_accuracy = ?report.black_accuracy,
        "Review complete"
    );

    Ok(report)
}

fn position_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Render an engine UCI suggestion as SAN plus origin/destination
/// square names at the position it was produced for
fn describe_best_move(pos: &Chess, uci_str: &str) -> Option<BestMove> {
    let uci: UciMove = uci_str.parse().ok()?;
    let mv = uci.to_move(pos).ok()?;
    let san = San::from_move(pos, mv).to_string();
    let from_square = uci_str.get(0..2)?.to_string();
    let to_square = uci_str.get(2..4)?.to_string();
    Some(BestMove {
        san,
        from_square,
        to_square,
    })
}
