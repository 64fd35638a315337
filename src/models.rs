use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ten mini-games. Closed set: the session constants below and the
/// risk profiles in `risk.rs` must cover every variant, so adding a game
/// is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum GameType {
    Memory,
    Reaction,
    Stroop,
    Sequence,
    Math,
    Scramble,
    Pattern,
    VisualSearch,
    Rotation,
    NumberRecall,
}

impl GameType {
    pub const ALL: [GameType; 10] = [
        GameType::Memory,
        GameType::Reaction,
        GameType::Stroop,
        GameType::Sequence,
        GameType::Math,
        GameType::Scramble,
        GameType::Pattern,
        GameType::VisualSearch,
        GameType::Rotation,
        GameType::NumberRecall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Memory => "memory",
            GameType::Reaction => "reaction",
            GameType::Stroop => "stroop",
            GameType::Sequence => "sequence",
            GameType::Math => "math",
            GameType::Scramble => "scramble",
            GameType::Pattern => "pattern",
            GameType::VisualSearch => "visual_search",
            GameType::Rotation => "rotation",
            GameType::NumberRecall => "number_recall",
        }
    }

    /// How much a session's accuracy counts against its speed when the two
    /// factors are blended into one score.
    pub fn accuracy_weight(&self) -> f64 {
        match self {
            GameType::Memory => 0.7,
            GameType::Reaction => 0.5,
            GameType::Stroop => 0.6,
            GameType::Sequence => 0.7,
            GameType::Math => 0.6,
            GameType::Scramble => 0.6,
            GameType::Pattern => 0.7,
            GameType::VisualSearch => 0.6,
            GameType::Rotation => 0.6,
            GameType::NumberRecall => 0.7,
        }
    }

    /// Par time for a full run; finishing faster earns a speed bonus capped
    /// at 1.
    pub fn expected_seconds(&self) -> f64 {
        match self {
            GameType::Memory => 30.0,
            GameType::Reaction => 5.0,
            GameType::Stroop => 45.0,
            GameType::Sequence => 40.0,
            GameType::Math => 60.0,
            GameType::Scramble => 75.0,
            GameType::Pattern => 35.0,
            GameType::VisualSearch => 40.0,
            GameType::Rotation => 45.0,
            GameType::NumberRecall => 25.0,
        }
    }

    /// Contribution weight in the overall performance aggregate.
    pub fn weight(&self) -> f64 {
        match self {
            GameType::Memory => 1.5,
            GameType::Reaction => 1.0,
            GameType::Stroop => 1.2,
            GameType::Sequence => 1.2,
            GameType::Math => 1.0,
            GameType::Scramble => 0.8,
            GameType::Pattern => 1.1,
            GameType::VisualSearch => 1.1,
            GameType::Rotation => 1.0,
            GameType::NumberRecall => 1.3,
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(GameType::Memory),
            "reaction" => Ok(GameType::Reaction),
            "stroop" => Ok(GameType::Stroop),
            "sequence" => Ok(GameType::Sequence),
            "math" => Ok(GameType::Math),
            "scramble" => Ok(GameType::Scramble),
            "pattern" => Ok(GameType::Pattern),
            "visual_search" => Ok(GameType::VisualSearch),
            "rotation" => Ok(GameType::Rotation),
            "number_recall" => Ok(GameType::NumberRecall),
            other => anyhow::bail!("unknown game type: {other}"),
        }
    }
}

/// One completed game attempt. Immutable once stored; removed only by the
/// bulk reset.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub game_type: GameType,
    pub score: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameAverage {
    pub game_type: GameType,
    pub attempts: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub overall: f64,
    pub games: Vec<GameAverage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic screening labels, one per tracked category. Not a clinical
/// instrument.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub alzheimers: RiskLevel,
    pub parkinsons: RiskLevel,
    pub ftd: RiskLevel,
    pub mci: RiskLevel,
}
