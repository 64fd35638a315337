use std::collections::HashMap;

use crate::models::{AttemptRecord, GameType, RiskAssessment, RiskLevel};
use crate::scoring;

/// One screening category: a weighted blend of per-game averages checked
/// against two inclusive cut points. Metrics at or above `low_min` read Low,
/// at or above `moderate_min` read Moderate, anything lower reads High.
pub struct RiskProfile {
    pub name: &'static str,
    pub inputs: &'static [(GameType, f64)],
    pub low_min: f64,
    pub moderate_min: f64,
}

pub const ALZHEIMERS: RiskProfile = RiskProfile {
    name: "Alzheimer's",
    inputs: &[
        (GameType::Memory, 0.4),
        (GameType::NumberRecall, 0.3),
        (GameType::VisualSearch, 0.3),
    ],
    low_min: 80.0,
    moderate_min: 60.0,
};

pub const PARKINSONS: RiskProfile = RiskProfile {
    name: "Parkinson's",
    inputs: &[
        (GameType::Reaction, 0.4),
        (GameType::Rotation, 0.4),
        (GameType::Pattern, 0.2),
    ],
    low_min: 80.0,
    moderate_min: 60.0,
};

pub const FTD: RiskProfile = RiskProfile {
    name: "Frontotemporal dementia",
    inputs: &[
        (GameType::Stroop, 0.4),
        (GameType::Scramble, 0.3),
        (GameType::Sequence, 0.3),
    ],
    low_min: 85.0,
    moderate_min: 65.0,
};

pub const MCI: RiskProfile = RiskProfile {
    name: "Mild cognitive impairment",
    inputs: &[(GameType::Math, 0.5), (GameType::Memory, 0.5)],
    low_min: 90.0,
    moderate_min: 70.0,
};

pub const PROFILES: [&RiskProfile; 4] = [&ALZHEIMERS, &PARKINSONS, &FTD, &MCI];

/// Average for one game, assuming healthy performance (100) when the game
/// has never been played.
fn average_or_healthy(grouped: &HashMap<GameType, Vec<f64>>, game: GameType) -> f64 {
    grouped
        .get(&game)
        .map(|scores| scoring::average(scores))
        .unwrap_or(100.0)
}

pub fn category_metric(grouped: &HashMap<GameType, Vec<f64>>, profile: &RiskProfile) -> f64 {
    profile
        .inputs
        .iter()
        .map(|(game, weight)| average_or_healthy(grouped, *game) * weight)
        .sum()
}

pub fn level_for(metric: f64, profile: &RiskProfile) -> RiskLevel {
    if metric >= profile.low_min {
        RiskLevel::Low
    } else if metric >= profile.moderate_min {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

pub fn assess(attempts: &[AttemptRecord]) -> RiskAssessment {
    let grouped = scoring::group_by_game(attempts);
    let level = |profile: &RiskProfile| level_for(category_metric(&grouped, profile), profile);

    RiskAssessment {
        alzheimers: level(&ALZHEIMERS),
        parkinsons: level(&PARKINSONS),
        ftd: level(&FTD),
        mci: level(&MCI),
    }
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
    fn profile_weights_sum_to_one() {
        for profile in PROFILES {
            let total: f64 = profile.inputs.iter().map(|(_, weight)| weight).sum();
            assert!((total - 1.0).abs() < 0.001, "{}", profile.name);
        }
    }

    #[test]
    fn empty_history_reads_low_everywhere() {
        let assessment = assess(&[]);
        assert_eq!(assessment.alzheimers, RiskLevel::Low);
        assert_eq!(assessment.parkinsons, RiskLevel::Low);
        assert_eq!(assessment.ftd, RiskLevel::Low);
        assert_eq!(assessment.mci, RiskLevel::Low);
    }

    #[test]
    fn untested_games_assume_healthy_performance() {
        // Memory averages 60; number recall and visual search default to 100,
        // so the metric lands at 60*0.4 + 100*0.3 + 100*0.3 = 84.
        let attempts = vec![attempt(GameType::Memory, 60.0)];
        let grouped = scoring::group_by_game(&attempts);
        let metric = category_metric(&grouped, &ALZHEIMERS);
        assert!((metric - 84.0).abs() < 0.001);
        assert_eq!(assess(&attempts).alzheimers, RiskLevel::Low);
    }

    #[test]
    fn cut_points_are_inclusive() {
        // Memory at 50 puts the Alzheimer's metric exactly on the Low line.
        let attempts = vec![attempt(GameType::Memory, 50.0)];
        assert_eq!(assess(&attempts).alzheimers, RiskLevel::Low);

        // Memory at 0 leaves only the two defaulted inputs: exactly 60.
        let attempts = vec![attempt(GameType::Memory, 0.0)];
        assert_eq!(assess(&attempts).alzheimers, RiskLevel::Moderate);

        // Math 80 and memory 100 average to exactly the MCI Low line of 90.
        let attempts = vec![
            attempt(GameType::Math, 80.0),
            attempt(GameType::Memory, 100.0),
        ];
        assert_eq!(assess(&attempts).mci, RiskLevel::Low);
    }

    #[test]
    fn weak_scores_across_the_board_raise_every_flag() {
        let attempts: Vec<AttemptRecord> = GameType::ALL
            .iter()
            .map(|game| attempt(*game, 20.0))
            .collect();
        let assessment = assess(&attempts);
        assert_eq!(assessment.alzheimers, RiskLevel::High);
        assert_eq!(assessment.parkinsons, RiskLevel::High);
        assert_eq!(assessment.ftd, RiskLevel::High);
        assert_eq!(assessment.mci, RiskLevel::High);
    }

    #[test]
    fn categories_move_independently() {
        // Strong memory and math, weak reaction and rotation: the motor-heavy
        // profile flags while the memory-heavy ones stay Low. The Parkinson's
        // metric is 50*0.4 + 50*0.4 + 100*0.2 = 60, right on the Moderate line.
        let attempts = vec![
            attempt(GameType::Memory, 95.0),
            attempt(GameType::Math, 95.0),
            attempt(GameType::Reaction, 50.0),
            attempt(GameType::Rotation, 50.0),
        ];
        let assessment = assess(&attempts);
        assert_eq!(assessment.alzheimers, RiskLevel::Low);
        assert_eq!(assessment.mci, RiskLevel::Low);
        assert_eq!(assessment.parkinsons, RiskLevel::Moderate);
    }
}
