//! Recency-weighted RED/BLUE/TIE probability estimate.
//!
//! Linearly decaying weights over the rolling window (newest round heaviest)
//! blended with per-round card strength, normalized to percentages that sum
//! to 100. Confidence measures how dominant the top bucket is. These are
//! display heuristics over user-entered events, not validated statistics.

use crate::config::ProbabilityConfig;
use serde::{Deserialize, Serialize};
use studio_types::Outcome;

/// Guard against a division by zero when every bucket is empty.
const BUCKET_EPSILON: f64 = 1e-9;

/// Uninformative prior for an empty history, skewed slightly away from TIE.
const EMPTY_DEFAULTS: Probabilities = Probabilities {
    red: 49.0,
    blue: 49.0,
    tie: 2.0,
    confidence: 0.0,
};

/// Percentage estimates (1 decimal) plus confidence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub red: f64,
    pub blue: f64,
    pub tie: f64,
    pub confidence: f64,
}

impl Probabilities {
    /// The stronger of the two colors; red on an exact tie so the pick is
    /// deterministic.
    pub fn top_color(&self) -> (Outcome, f64) {
        if self.blue > self.red {
            (Outcome::Blue, self.blue)
        } else {
            (Outcome::Red, self.red)
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Estimate over the last `config.window` entries of parallel outcome /
/// winning-strength sequences (oldest first). Strengths are the 1..=5
/// winning-card weights; tie rounds carry 0 and use the fixed tie factor.
pub fn weighted_probabilities(
    outcomes: &[Outcome],
    strengths: &[u8],
    config: &ProbabilityConfig,
) -> Probabilities {
    if outcomes.is_empty() {
        return EMPTY_DEFAULTS;
    }

    let start = outcomes.len().saturating_sub(config.window.max(1));
    let outcomes = &outcomes[start..];
    let strengths = &strengths[start..];
    let m = outcomes.len();

    // Linear decay: newest = newest_weight, oldest = oldest_weight.
    let mut weights = Vec::with_capacity(m);
    for i in 0..m {
        let w = if m == 1 {
            config.newest_weight
        } else {
            let t = i as f64 / (m - 1) as f64;
            config.oldest_weight + (config.newest_weight - config.oldest_weight) * t
        };
        weights.push(w);
    }
    let weight_sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= weight_sum;
    }

    let (mut red, mut blue, mut tie) = (0.0f64, 0.0f64, 0.0f64);
    for ((outcome, strength), w) in outcomes.iter().zip(strengths).zip(&weights) {
        match outcome {
            Outcome::Red | Outcome::Blue => {
                let factor = f64::from(*strength) / 5.0;
                let share = w * (config.win_base + config.win_strength_share * factor);
                if *outcome == Outcome::Red {
                    red += share;
                } else {
                    blue += share;
                }
            }
            Outcome::Tie => {
                let factor = config.tie_factor;
                tie += w * (config.tie_base + config.tie_strength_share * (1.0 - factor));
            }
        }
    }

    red += BUCKET_EPSILON;
    blue += BUCKET_EPSILON;
    tie += BUCKET_EPSILON;
    let total = red + blue + tie;

    let peak = (red.max(blue).max(tie) / total).clamp(0.05, 0.99);

    Probabilities {
        red: round1(red / total * 100.0),
        blue: round1(blue / total * 100.0),
        tie: round1(tie / total * 100.0),
        confidence: round1(peak * 100.0),
    }
}
