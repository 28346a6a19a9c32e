//! Break score: a 0..=100 heuristic for how likely the current trend is to
//! reverse.
//!
//! Additive triggers over the rolling window, clamped to [0, 100], each
//! trigger contributing a human-readable reason for display. Trigger
//! weights live in [`BreakConfig`] so the variant rule sets observed in the
//! field stay expressible.

use crate::config::BreakConfig;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use studio_types::{Outcome, ValueClass};

/// Score plus the triggers that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakReport {
    pub score: u8,
    pub reasons: Vec<String>,
}

impl BreakReport {
    /// Reasons joined for single-line display.
    pub fn summary(&self) -> String {
        self.reasons.join("; ")
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Score the rolling window of the complete history (oldest first).
/// Empty history scores 0 with no reasons.
pub fn break_score(
    outcomes: &[Outcome],
    classes: &[ValueClass],
    config: &BreakConfig,
) -> BreakReport {
    if outcomes.is_empty() {
        return BreakReport::default();
    }

    let mut score: i32 = 0;
    let mut reasons = Vec::new();

    // Cluster of low-class winners in the recent window.
    let recent = tail(classes, config.low_cluster_window);
    let low_count = recent.iter().filter(|c| **c == ValueClass::Low).count();
    if low_count >= config.low_cluster_min {
        score += config.low_cluster_points;
        let mut reason = String::new();
        let _ = write!(
            reason,
            "{}/{} recent winners low",
            low_count,
            config.low_cluster_window
        );
        reasons.push(reason);
    }

    // Most recent winner low.
    if classes.last() == Some(&ValueClass::Low) {
        score += config.last_low_points;
        reasons.push("last winner low".to_string());
    }

    // Rapid alternation across the recent outcomes.
    let recent_outcomes = tail(outcomes, config.alternation_window);
    if recent_outcomes.len() > 1 {
        let changes = recent_outcomes.windows(2).filter(|w| w[0] != w[1]).count();
        let rate = changes as f64 / (recent_outcomes.len() - 1) as f64;
        if rate >= config.alternation_rate_min {
            score += config.alternation_points;
            reasons.push("rapid alternation".to_string());
        }
    }

    // Ties in the recent window.
    let tie_count = tail(outcomes, config.tie_window)
        .iter()
        .filter(|o| **o == Outcome::Tie)
        .count();
    if tie_count > 0 {
        score += tie_count as i32 * config.tie_points;
        let mut reason = String::new();
        let _ = write!(reason, "{} tie(s) in the window", tie_count);
        reasons.push(reason);
    }

    // Mitigating signal: plenty of high-class winners lately.
    let high_count = tail(classes, config.high_relief_window)
        .iter()
        .filter(|c| **c == ValueClass::High)
        .count();
    if high_count >= config.high_relief_min {
        score -= config.high_relief_points;
        reasons.push("high cards holding".to_string());
    }

    BreakReport {
        score: score.clamp(0, 100) as u8,
        reasons,
    }
}
