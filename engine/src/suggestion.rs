//! Final bet suggestion.
//!
//! A pure decision tree over the probability estimate, the break report,
//! the manipulation level, and the pattern flags. Exactly one action comes
//! out; every branch carries the break reasons forward so the display layer
//! can show why.

use crate::breaks::BreakReport;
use crate::config::SuggestionConfig;
use crate::patterns::PatternFlags;
use crate::probability::Probabilities;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use studio_types::Outcome;

/// The action suggested for the next round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetAction {
    /// Break risk too high; sit the round out.
    NoBet,
    /// Tie probability crossed its threshold.
    BetTie,
    /// Bet the named color.
    BetColor(Outcome),
    /// No safe entry; wait for a clearer signal.
    Wait,
}

/// Suggestion plus display payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: BetAction,
    /// One-line human-readable form of the action.
    pub text: String,
    /// Percent confidence to display alongside the action.
    pub confidence: f64,
    /// Break reasons (always) plus any detected-pattern note.
    pub reasons: Vec<String>,
}

fn color_text(color: Outcome) -> String {
    let mut text = String::new();
    let _ = write!(text, "bet {}", color.as_str().to_uppercase());
    text
}

/// Decide the next action. Pure: the same inputs always produce the same
/// suggestion.
pub fn suggest(
    probabilities: &Probabilities,
    break_report: &BreakReport,
    manipulation_level: u8,
    patterns: &PatternFlags,
    config: &SuggestionConfig,
) -> Suggestion {
    let mut reasons = break_report.reasons.clone();
    if patterns.any() {
        let mut note = String::from("patterns: ");
        note.push_str(&patterns.names().join(", "));
        reasons.push(note);
    }

    // Break risk dominates everything unless the aggressive override is on.
    if break_report.score >= config.break_threshold {
        if !config.aggressive_override {
            let mut text = String::new();
            let _ = write!(text, "no bet (break risk {}%)", break_report.score);
            return Suggestion {
                action: BetAction::NoBet,
                text,
                confidence: f64::from(break_report.score),
                reasons,
            };
        }
        // Override: still pick a color, but say so loudly.
        let (color, _) = probabilities.top_color();
        let mut text = color_text(color);
        let _ = write!(text, " (OVERRIDE despite break risk {}%)", break_report.score);
        return Suggestion {
            action: BetAction::BetColor(color),
            text,
            confidence: probabilities.confidence,
            reasons,
        };
    }

    if probabilities.tie >= config.tie_threshold {
        return Suggestion {
            action: BetAction::BetTie,
            text: "bet TIE".to_string(),
            confidence: probabilities.confidence,
            reasons,
        };
    }

    // High manipulation demands stronger signals in the variants that model
    // it as a modifier.
    let mut prob_threshold = config.color_prob_threshold;
    let mut conf_threshold = config.confidence_threshold;
    if config.manipulation_modifier && manipulation_level >= config.manipulation_level_min {
        prob_threshold += config.manipulation_threshold_bump;
        conf_threshold += config.manipulation_threshold_bump;
    }

    let (color, prob) = probabilities.top_color();
    if prob >= prob_threshold || probabilities.confidence >= conf_threshold {
        return Suggestion {
            action: BetAction::BetColor(color),
            text: color_text(color),
            confidence: probabilities.confidence,
            reasons,
        };
    }

    Suggestion {
        action: BetAction::Wait,
        text: "wait (no safe entry)".to_string(),
        confidence: probabilities.confidence,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs(red: f64, blue: f64, tie: f64, confidence: f64) -> Probabilities {
        Probabilities {
            red,
            blue,
            tie,
            confidence,
        }
    }

    fn quiet_break() -> BreakReport {
        BreakReport::default()
    }

    fn hot_break() -> BreakReport {
        BreakReport {
            score: 65,
            reasons: vec!["last winner low".to_string()],
        }
    }

    #[test]
    fn test_break_dominates() {
        let s = suggest(
            &probs(80.0, 15.0, 5.0, 95.0),
            &hot_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::NoBet);
        assert_eq!(s.confidence, 65.0);
        assert_eq!(s.reasons, vec!["last winner low".to_string()]);
    }

    #[test]
    fn test_aggressive_override_annotates() {
        let config = SuggestionConfig {
            aggressive_override: true,
            ..SuggestionConfig::default()
        };
        let s = suggest(
            &probs(80.0, 15.0, 5.0, 95.0),
            &hot_break(),
            1,
            &PatternFlags::default(),
            &config,
        );
        assert_eq!(s.action, BetAction::BetColor(Outcome::Red));
        assert!(s.text.contains("OVERRIDE"));
        assert!(s.text.contains("65%"));
        // Break reasons still travel with the override.
        assert_eq!(s.reasons, vec!["last winner low".to_string()]);
    }

    #[test]
    fn test_tie_threshold() {
        let s = suggest(
            &probs(45.0, 42.0, 13.0, 40.0),
            &quiet_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::BetTie);
    }

    #[test]
    fn test_color_on_probability_or_confidence() {
        // Probability alone qualifies.
        let s = suggest(
            &probs(62.0, 30.0, 8.0, 50.0),
            &quiet_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::BetColor(Outcome::Red));

        // Confidence alone qualifies.
        let s = suggest(
            &probs(55.0, 40.0, 5.0, 75.0),
            &quiet_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::BetColor(Outcome::Red));

        // Blue picked when stronger.
        let s = suggest(
            &probs(30.0, 62.0, 8.0, 50.0),
            &quiet_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::BetColor(Outcome::Blue));
    }

    #[test]
    fn test_wait_when_nothing_qualifies() {
        let s = suggest(
            &probs(52.0, 40.0, 8.0, 55.0),
            &quiet_break(),
            1,
            &PatternFlags::default(),
            &SuggestionConfig::default(),
        );
        assert_eq!(s.action, BetAction::Wait);
        assert_eq!(s.text, "wait (no safe entry)");
    }

    #[test]
    fn test_manipulation_raises_thresholds() {
        let config = SuggestionConfig {
            manipulation_modifier: true,
            ..SuggestionConfig::default()
        };
        // 62% would qualify at the base 60% threshold, but not at 65%.
        let p = probs(62.0, 30.0, 8.0, 50.0);
        let s = suggest(&p, &quiet_break(), 7, &PatternFlags::default(), &config);
        assert_eq!(s.action, BetAction::Wait);

        // Below the modifier level the base thresholds apply.
        let s = suggest(&p, &quiet_break(), 6, &PatternFlags::default(), &config);
        assert_eq!(s.action, BetAction::BetColor(Outcome::Red));
    }

    #[test]
    fn test_patterns_noted_in_reasons() {
        let patterns = PatternFlags {
            repetition: true,
            cycle: true,
            ..PatternFlags::default()
        };
        let s = suggest(
            &probs(52.0, 40.0, 8.0, 55.0),
            &quiet_break(),
            1,
            &patterns,
            &SuggestionConfig::default(),
        );
        assert_eq!(s.reasons, vec!["patterns: repetition, cycle".to_string()]);
    }

    #[test]
    fn test_idempotent() {
        let p = probs(52.0, 40.0, 8.0, 55.0);
        let b = hot_break();
        let flags = PatternFlags::default();
        let config = SuggestionConfig::default();
        let first = suggest(&p, &b, 4, &flags, &config);
        let second = suggest(&p, &b, 4, &flags, &config);
        assert_eq!(first, second);
    }
}
