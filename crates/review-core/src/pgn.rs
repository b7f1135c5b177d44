//! PGN parsing utilities: lightweight regex-based parser.

use regex::Regex;

use crate::error::ReviewError;

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A parsed game: header metadata plus the SAN move sequence.
/// Legality of the moves is established later, during replay.
#[derive(Debug, Clone)]
pub struct ParsedGame {
    pub white: String,
    pub black: String,
    pub result: String,
    pub moves: Vec<String>,
}

/// Parse a PGN string into a ParsedGame. A game with headers but no
/// moves (e.g. an immediately agreed result) is valid and parses to an
/// empty move list.
pub fn parse_pgn(pgn: &str) -> Result<ParsedGame, ReviewError> {
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#)
        .map_err(|e| ReviewError::InvalidPgn(e.to_string()))?;

    let mut white = "Unknown".to_string();
    let mut black = "Unknown".to_string();
    let mut result = "*".to_string();
    let mut setup = None;
    let mut fen = None;
    let mut header_count = 0usize;

    for cap in header_re.captures_iter(pgn) {
        header_count += 1;
        let key = &cap[1];
        let value = cap[2].to_string();
        match key {
            "White" => white = value,
            "Black" => black = value,
            "Result" => result = value,
            "SetUp" => setup = Some(value),
            "FEN" => fen = Some(value),
            _ => {}
        }
    }

    // Only games from the standard starting position are reviewable
    if setup.as_deref() == Some("1") {
        if let Some(ref f) = fen {
            if f != STANDARD_START_FEN {
                return Err(ReviewError::InvalidPgn(
                    "Non-standard starting position".to_string(),
                ));
            }
        }
    }

    let moves = extract_moves(pgn);

    if header_count == 0 && moves.is_empty() {
        return Err(ReviewError::InvalidPgn("No game found in text".to_string()));
    }

    Ok(ParsedGame {
        white,
        black,
        result,
        moves,
    })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    // Remove headers
    let header_re = Regex::new(r"\[[^\]]*\]").unwrap();
    let no_headers = header_re.replace_all(pgn, "");

    // Remove comments
    let comment_re = Regex::new(r"\{[^}]*\}").unwrap();
    let no_comments = comment_re.replace_all(&no_headers, "");

    // Remove variations
    let variation_re = Regex::new(r"\([^)]*\)").unwrap();
    let no_variations = variation_re.replace_all(&no_comments, "");

    // Extract moves
    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pgn_basic() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[Date "2025.01.15"]
[TimeControl "600"]

1. e4 e5 2. Nf3 Nc6 1-0"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.white, "Player1");
        assert_eq!(game.black, "Player2");
        assert_eq!(game.result, "1-0");
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves[0], "e4");
    }

    #[test]
    fn test_parse_pgn_headers_only() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1/2-1/2"]

1/2-1/2"#;

        let game = parse_pgn(pgn).unwrap();
        assert!(game.moves.is_empty());
        assert_eq!(game.result, "1/2-1/2");
    }

    #[test]
    fn test_parse_pgn_strips_comments_and_variations() {
        let pgn = r#"[White "A"]
[Black "B"]
[Result "*"]

1. e4 {a strong first move} e5 (1... c5 2. Nf3) 2. Bc4 *"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.moves, vec!["e4", "e5", "Bc4"]);
    }

    #[test]
    fn test_parse_pgn_scholars_mate() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1-0"]

1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.moves.len(), 7);
        assert_eq!(game.moves[6], "Qxf7#");
    }

    #[test]
    fn test_parse_pgn_rejects_empty() {
        assert!(parse_pgn("").is_err());
        assert!(parse_pgn("not a chess game at all 123").is_err());
    }

    #[test]
    fn test_parse_pgn_rejects_nonstandard_position() {
        let pgn = r#"[White "A"]
[Black "B"]
[SetUp "1"]
[FEN "8/8/8/8/8/4k3/8/4K2R w K - 0 1"]

1. Rh3+ *"#;

        assert!(parse_pgn(pgn).is_err());
    }
}
