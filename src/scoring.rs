use std::collections::HashMap;

use crate::models::{AttemptRecord, GameAverage, GameType};

/// Blend a session's accuracy and speed factors into one 0-100 score.
/// Total over all inputs: out-of-range factors are clamped, never rejected.
pub fn combine_score(accuracy_factor: f64, time_factor: f64, accuracy_weight: f64) -> f64 {
    let raw = accuracy_weight * accuracy_factor + (1.0 - accuracy_weight) * time_factor;
    raw.clamp(0.0, 1.0) * 100.0
}

/// Speed bonus for finishing under the game's par time, capped at 1.
pub fn time_factor(expected_seconds: f64, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds <= 0.0 {
        return 1.0;
    }
    (expected_seconds / elapsed_seconds).min(1.0)
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Partition a history snapshot by game; games never played are absent keys.
pub fn group_by_game(attempts: &[AttemptRecord]) -> HashMap<GameType, Vec<f64>> {
    let mut grouped: HashMap<GameType, Vec<f64>> = HashMap::new();
    for attempt in attempts {
        grouped
            .entry(attempt.game_type)
            .or_default()
            .push(attempt.score);
    }
    grouped
}

/// Weighted mean across only the games with at least one attempt. A game
/// never played contributes neither score nor weight to the aggregate.
pub fn overall_performance(attempts: &[AttemptRecord]) -> f64 {
    let grouped = group_by_game(attempts);
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for game in GameType::ALL {
        if let Some(scores) = grouped.get(&game) {
            weighted_sum += average(scores) * game.weight();
            weight_total += game.weight();
        }
    }

    if weight_total == 0.0 {
        return 0.0;
    }
    weighted_sum / weight_total
}

pub fn game_averages(attempts: &[AttemptRecord]) -> Vec<GameAverage> {
    let grouped = group_by_game(attempts);
    GameType::ALL
        .iter()
        .filter_map(|game| {
            grouped.get(game).map(|scores| GameAverage {
                game_type: *game,
                attempts: scores.len(),
                avg_score: average(scores),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn attempt(game_type: GameType, score: f64) -> AttemptRecord {
        AttemptRecord {
            id: Uuid::new_v4(),
            game_type,
            score,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn perfect_and_zero_factors_hit_the_bounds() {
        for weight in [0.0, 0.3, 0.5, 0.7, 1.0] {
            assert_eq!(combine_score(1.0, 1.0, weight), 100.0);
            assert_eq!(combine_score(0.0, 0.0, weight), 0.0);
        }
    }

    #[test]
    fn combine_respects_the_accuracy_weight() {
        assert!((combine_score(1.0, 0.0, 0.7) - 70.0).abs() < 0.001);
        assert!((combine_score(0.0, 1.0, 0.7) - 30.0).abs() < 0.001);
        assert!((combine_score(0.8, 0.5, 0.5) - 65.0).abs() < 0.001);
    }

    #[test]
    fn combine_clamps_out_of_range_inputs() {
        assert_eq!(combine_score(2.0, 2.0, 0.5), 100.0);
        assert_eq!(combine_score(-1.0, -1.0, 0.5), 0.0);
    }

    #[test]
    fn combine_is_monotone_in_each_factor() {
        let mut previous = -1.0;
        for step in 0..=10 {
            let accuracy = step as f64 / 10.0;
            let score = combine_score(accuracy, 0.5, 0.6);
            assert!(score >= previous);
            previous = score;
        }

        let mut previous = -1.0;
        for step in 0..=10 {
            let time = step as f64 / 10.0;
            let score = combine_score(0.5, time, 0.6);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn time_factor_caps_the_speed_bonus() {
        assert!((time_factor(30.0, 60.0) - 0.5).abs() < 0.001);
        assert_eq!(time_factor(30.0, 15.0), 1.0);
        assert_eq!(time_factor(30.0, 0.0), 1.0);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert!((average(&[80.0, 100.0]) - 90.0).abs() < 0.001);
    }

    #[test]
    fn grouping_skips_games_never_played() {
        let attempts = vec![attempt(GameType::Memory, 80.0), attempt(GameType::Memory, 90.0)];
        let grouped = group_by_game(&attempts);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&GameType::Memory], vec![80.0, 90.0]);
        assert!(!grouped.contains_key(&GameType::Reaction));
    }

    #[test]
    fn overall_performance_of_empty_history_is_zero() {
        assert_eq!(overall_performance(&[]), 0.0);
    }

    #[test]
    fn single_game_degenerates_to_its_mean() {
        let attempts = vec![attempt(GameType::Memory, 80.0)];
        assert!((overall_performance(&attempts) - 80.0).abs() < 0.001);
    }

    #[test]
    fn unplayed_games_carry_no_weight() {
        let mut attempts = vec![attempt(GameType::Memory, 80.0)];
        assert!((overall_performance(&attempts) - 80.0).abs() < 0.001);

        attempts.push(attempt(GameType::Reaction, 60.0));
        let expected = (80.0 * 1.5 + 60.0 * 1.0) / 2.5;
        assert!((overall_performance(&attempts) - expected).abs() < 0.001);
    }

    #[test]
    fn game_averages_follow_the_fixed_game_order() {
        let attempts = vec![
            attempt(GameType::Reaction, 60.0),
            attempt(GameType::Memory, 80.0),
            attempt(GameType::Memory, 90.0),
        ];
        let averages = game_averages(&attempts);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].game_type, GameType::Memory);
        assert_eq!(averages[0].attempts, 2);
        assert!((averages[0].avg_score - 85.0).abs() < 0.001);
        assert_eq!(averages[1].game_type, GameType::Reaction);
    }
}
