//! Analyzer configuration.
//!
//! Live tables run the same heuristics with slightly different thresholds.
//! Rather than hard-coding one rule set, every magic number in the pipeline
//! is a named field here, so each observed variant is a configuration of the
//! same engine. Defaults are the canonical rule set.

use serde::{Deserialize, Serialize};
use studio_types::TableRules;

/// Weights for the 1..=9 manipulation level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManipulationConfig {
    /// Added per maximal run of >=2 consecutive low-class winners.
    pub low_run_weight: f64,
    /// Multiplied by the adjacent-outcome change rate over the full history.
    pub alternation_weight: f64,
    /// Subtracted, multiplied by the high-class winner share.
    pub high_relief_weight: f64,
    /// Added, multiplied by the tie share.
    pub tie_weight: f64,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            low_run_weight: 1.5,
            alternation_weight: 3.0,
            high_relief_weight: 1.5,
            tie_weight: 2.0,
        }
    }
}

/// Trigger weights for the 0..=100 break score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakConfig {
    /// Rounds inspected for the low-cluster trigger.
    pub low_cluster_window: usize,
    /// Low-class winners within that window needed to fire.
    pub low_cluster_min: usize,
    /// Points for the low-cluster trigger.
    pub low_cluster_points: i32,
    /// Points when the single most recent winner is low-class.
    pub last_low_points: i32,
    /// Outcomes inspected for the alternation trigger.
    pub alternation_window: usize,
    /// Minimum adjacent-change rate to fire the alternation trigger.
    pub alternation_rate_min: f64,
    /// Points for the alternation trigger.
    pub alternation_points: i32,
    /// Rounds inspected for tie occurrences.
    pub tie_window: usize,
    /// Points per tie within that window.
    pub tie_points: i32,
    /// Rounds inspected for the mitigating high-card signal.
    pub high_relief_window: usize,
    /// High-class winners within that window needed to mitigate.
    pub high_relief_min: usize,
    /// Points subtracted when the mitigating signal fires.
    pub high_relief_points: i32,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            low_cluster_window: 5,
            low_cluster_min: 3,
            low_cluster_points: 20,
            last_low_points: 15,
            alternation_window: 6,
            alternation_rate_min: 0.75,
            alternation_points: 25,
            tie_window: 6,
            tie_points: 5,
            high_relief_window: 10,
            high_relief_min: 4,
            high_relief_points: 10,
        }
    }
}

/// Recency weighting for the probability estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityConfig {
    /// Rolling window size (last W complete rounds).
    pub window: usize,
    /// Weight of the newest round before normalization.
    pub newest_weight: f64,
    /// Weight of the oldest round in the window before normalization.
    pub oldest_weight: f64,
    /// Fixed strength factor assigned to tie rounds.
    pub tie_factor: f64,
    /// Base share of a winning round's weight.
    pub win_base: f64,
    /// Share of a winning round's weight scaled by card strength.
    pub win_strength_share: f64,
    /// Base share of a tie round's weight.
    pub tie_base: f64,
    /// Share of a tie round's weight scaled by (1 - strength factor).
    pub tie_strength_share: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            window: 10,
            newest_weight: 1.0,
            oldest_weight: 0.2,
            tie_factor: 0.6,
            win_base: 0.6,
            win_strength_share: 0.4,
            tie_base: 0.5,
            tie_strength_share: 0.5,
        }
    }
}

/// Thresholds for the final bet suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Break score at or above which no bet is suggested.
    pub break_threshold: u8,
    /// Tie probability (percent) at or above which TIE is suggested.
    pub tie_threshold: f64,
    /// Color probability (percent) needed for a color bet.
    pub color_prob_threshold: f64,
    /// Confidence (percent) that alone qualifies a color bet.
    pub confidence_threshold: f64,
    /// Raise the color thresholds when the manipulation level is high.
    pub manipulation_modifier: bool,
    /// Manipulation level at which the raise kicks in.
    pub manipulation_level_min: u8,
    /// Amount added to both color thresholds by the raise.
    pub manipulation_threshold_bump: f64,
    /// Still emit a color pick above the break threshold, visibly annotated
    /// as an override.
    pub aggressive_override: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            break_threshold: 50,
            tie_threshold: 12.0,
            color_prob_threshold: 60.0,
            confidence_threshold: 70.0,
            manipulation_modifier: false,
            manipulation_level_min: 7,
            manipulation_threshold_bump: 5.0,
            aggressive_override: false,
        }
    }
}

/// Full engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Side mapping for two-card rounds.
    pub rules: TableRules,
    pub manipulation: ManipulationConfig,
    pub breaks: BreakConfig,
    pub probability: ProbabilityConfig,
    pub suggestion: SuggestionConfig,
}

impl AnalyzerConfig {
    /// Variant that keeps betting through high break scores and treats a
    /// high manipulation level as a reason to demand stronger signals.
    pub fn aggressive() -> Self {
        Self {
            suggestion: SuggestionConfig {
                aggressive_override: true,
                manipulation_modifier: true,
                ..SuggestionConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonical_rule_set() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.breaks.low_cluster_points, 20);
        assert_eq!(config.breaks.last_low_points, 15);
        assert_eq!(config.breaks.alternation_points, 25);
        assert_eq!(config.suggestion.break_threshold, 50);
        assert_eq!(config.probability.window, 10);
        assert!(!config.suggestion.aggressive_override);
    }

    #[test]
    fn test_aggressive_variant() {
        let config = AnalyzerConfig::aggressive();
        assert!(config.suggestion.aggressive_override);
        assert!(config.suggestion.manipulation_modifier);
        // Everything else stays canonical.
        assert_eq!(config.breaks, BreakConfig::default());
        assert_eq!(config.probability, ProbabilityConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AnalyzerConfig::aggressive();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: AnalyzerConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}
