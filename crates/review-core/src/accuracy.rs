//! Move and game accuracy: pure functions only

/// Per-move accuracy from the win-percentage drop the mover suffered.
/// Zero or negative loss clamps to 100; large losses decay toward 0.
pub fn move_accuracy(win_loss: f64) -> f64 {
    let raw = 103.1668 * (-0.04354 * win_loss).exp() - 3.1669;
    raw.clamp(0.0, 100.0)
}

/// Game accuracy for one player: the average of the arithmetic and
/// harmonic means of that player's valid (positive) move accuracies.
/// `None` when no valid accuracies exist.
pub fn game_accuracy(accuracies: &[Option<f64>]) -> Option<f64> {
    let valid: Vec<f64> = accuracies
        .iter()
        .filter_map(|a| *a)
        .filter(|a| *a > 0.0)
        .collect();

    if valid.is_empty() {
        return None;
    }

    let n = valid.len() as f64;
    let arithmetic = valid.iter().sum::<f64>() / n;
    let harmonic = n / valid.iter().map(|a| 1.0 / a).sum::<f64>();

    Some((arithmetic + harmonic) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_loss_clamps_to_100() {
        // The raw curve exceeds 100 at zero loss; clamping caps it
        assert_eq!(move_accuracy(0.0), 100.0);
        assert_eq!(move_accuracy(-5.0), 100.0);
    }

    #[test]
    fn test_accuracy_bounds_and_decay() {
        let mut last = 101.0;
        for loss in 0..100 {
            let acc = move_accuracy(f64::from(loss));
            assert!((0.0..=100.0).contains(&acc), "loss={loss} acc={acc}");
            assert!(acc <= last);
            last = acc;
        }
        // A total collapse is worth essentially nothing
        assert!(move_accuracy(100.0) < 2.0);
    }

    #[test]
    fn test_known_curve_points() {
        assert!((move_accuracy(10.0) - 63.5).abs() < 1.0);
        assert!((move_accuracy(20.0) - 40.1).abs() < 1.0);
    }

    #[test]
    fn test_game_accuracy_combines_means() {
        // arithmetic mean 75, harmonic mean 66.67 -> 70.83
        let accs = vec![Some(100.0), Some(50.0)];
        let game = game_accuracy(&accs).unwrap();
        assert!((game - 70.833).abs() < 0.01);
    }

    #[test]
    fn test_game_accuracy_skips_invalid() {
        let accs = vec![Some(90.0), None, Some(0.0), Some(-1.0), Some(90.0)];
        let game = game_accuracy(&accs).unwrap();
        assert!((game - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_game_accuracy_absent_when_empty() {
        assert_eq!(game_accuracy(&[]), None);
        assert_eq!(game_accuracy(&[None, Some(0.0)]), None);
    }
}
