use std::fmt::Write;

use crate::models::AttemptRecord;
use crate::risk;
use crate::scoring;

pub fn build_report(attempts: &[AttemptRecord]) -> String {
    let overall = scoring::overall_performance(attempts);
    let averages = scoring::game_averages(attempts);
    let grouped = scoring::group_by_game(attempts);

    let mut output = String::new();

    let _ = writeln!(output, "# Cognitive Performance Report");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall Performance");

    if attempts.is_empty() {
        let _ = writeln!(output, "No attempts recorded yet.");
    } else {
        let _ = writeln!(
            output,
            "Weighted average across played games: {:.1} / 100 ({} attempts).",
            overall,
            attempts.len()
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Per-Game Averages");

    if averages.is_empty() {
        let _ = writeln!(output, "No attempts recorded yet.");
    } else {
        for average in averages.iter() {
            let _ = writeln!(
                output,
                "- {}: {:.1} avg over {} attempts",
                average.game_type, average.avg_score, average.attempts
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Screening");
    let _ = writeln!(
        output,
        "Heuristic screening from game scores only. Not a clinical instrument."
    );

    for profile in risk::PROFILES {
        let metric = risk::category_metric(&grouped, profile);
        let _ = writeln!(
            output,
            "- {}: {} (metric {:.1})",
            profile.name,
            risk::level_for(metric, profile),
            metric
        );
    }

    let mut recent: Vec<&AttemptRecord> = attempts.iter().collect();
    recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Attempts");

    if recent.is_empty() {
        let _ = writeln!(output, "No attempts recorded yet.");
    } else {
        for attempt in recent.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} scored {:.1} on {}",
                attempt.game_type,
                attempt.score,
                attempt.recorded_at.format("%Y-%m-%d")
            );
        }
    }

    output
}
