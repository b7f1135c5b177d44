//! White-perspective evaluation values and the mate sentinel band.

/// Sentinel magnitude, in pawns, marking forced-mate positions. Any
/// evaluation with `|pawns| >= MATE_BAND_PAWNS` is treated as "mate on
/// the board" by classification; the true distance travels alongside.
pub const MATE_BAND_PAWNS: f64 = 100.0;

/// A single engine evaluation, always expressed from white's point of
/// view regardless of which side was to move when it was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Score in pawns, white-perspective. Saturated at
    /// `±MATE_BAND_PAWNS` for forced mates.
    pub pawns: f64,
    /// Signed mate distance when known: positive = white mates,
    /// negative = black mates.
    pub mate: Option<i32>,
}

impl Evaluation {
    /// Normalize a raw UCI score (relative to the side to move) into a
    /// white-perspective evaluation. Returns `None` when the engine
    /// produced no usable score.
    pub fn from_uci(cp: Option<i32>, mate: Option<i32>, white_to_move: bool) -> Option<Self> {
        let (pawns, mate) = if let Some(m) = mate {
            // `mate 0` means the side to move is checkmated
            let pawns = if m > 0 {
                MATE_BAND_PAWNS
            } else {
                -MATE_BAND_PAWNS
            };
            (pawns, Some(m))
        } else if let Some(c) = cp {
            (f64::from(c) / 100.0, None)
        } else {
            return None;
        };

        if white_to_move {
            Some(Self { pawns, mate })
        } else {
            Some(Self {
                pawns: -pawns,
                mate: mate.map(|m| -m),
            })
        }
    }

    /// Whether this evaluation sits in the mate band
    pub fn in_mate_band(&self) -> bool {
        self.pawns.abs() >= MATE_BAND_PAWNS
    }

    /// Score in pawns from the given mover's perspective
    pub fn pawns_for(&self, white_mover: bool) -> f64 {
        if white_mover {
            self.pawns
        } else {
            -self.pawns
        }
    }

    /// Expected win percentage for white, on a logistic curve centered
    /// at 0 cp -> 50% and asymptotic to [0, 100].
    pub fn win_percent_white(&self) -> f64 {
        let cp = self.pawns * 100.0;
        50.0 + 50.0 * (2.0 / (1.0 + (-0.003_682_08 * cp).exp()) - 1.0)
    }

    /// Expected win percentage from the given mover's perspective
    pub fn win_percent_for(&self, white_mover: bool) -> f64 {
        let white = self.win_percent_white();
        if white_mover {
            white
        } else {
            100.0 - white
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_white_to_move() {
        let eval = Evaluation::from_uci(Some(35), None, true).unwrap();
        assert!((eval.pawns - 0.35).abs() < 1e-9);
        assert_eq!(eval.mate, None);
    }

    #[test]
    fn test_normalize_black_to_move_negates() {
        // +v for black to move is -v for white, and vice versa
        let eval = Evaluation::from_uci(Some(35), None, false).unwrap();
        assert!((eval.pawns + 0.35).abs() < 1e-9);

        let eval = Evaluation::from_uci(Some(-120), None, false).unwrap();
        assert!((eval.pawns - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_mate_scores() {
        // White to move, mate in 3 for white
        let eval = Evaluation::from_uci(None, Some(3), true).unwrap();
        assert_eq!(eval.pawns, MATE_BAND_PAWNS);
        assert_eq!(eval.mate, Some(3));
        assert!(eval.in_mate_band());

        // Black to move, mate in 2 for black
        let eval = Evaluation::from_uci(None, Some(2), false).unwrap();
        assert_eq!(eval.pawns, -MATE_BAND_PAWNS);
        assert_eq!(eval.mate, Some(-2));

        // Black to move and checkmated: white delivered mate
        let eval = Evaluation::from_uci(None, Some(0), false).unwrap();
        assert_eq!(eval.pawns, MATE_BAND_PAWNS);
        assert_eq!(eval.mate, Some(0));
    }

    #[test]
    fn test_missing_score() {
        assert!(Evaluation::from_uci(None, None, true).is_none());
    }

    #[test]
    fn test_win_percent_midpoint() {
        let even = Evaluation {
            pawns: 0.0,
            mate: None,
        };
        assert_eq!(even.win_percent_white(), 50.0);
        assert_eq!(even.win_percent_for(false), 50.0);
    }

    #[test]
    fn test_win_percent_monotonic() {
        let mut last = 0.0;
        for cp in (-2000..=2000).step_by(50) {
            let eval = Evaluation {
                pawns: f64::from(cp) / 100.0,
                mate: None,
            };
            let wp = eval.win_percent_white();
            assert!(wp > last || cp == -2000);
            assert!((0.0..=100.0).contains(&wp));
            last = wp;
        }
    }

    #[test]
    fn test_win_percent_flips_for_black() {
        let eval = Evaluation {
            pawns: 1.5,
            mate: None,
        };
        let white = eval.win_percent_for(true);
        let black = eval.win_percent_for(false);
        assert!((white + black - 100.0).abs() < 1e-9);
        assert!(white > 50.0);
    }
}
