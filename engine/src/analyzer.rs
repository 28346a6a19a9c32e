//! The full analysis pass.
//!
//! One user action triggers one recomputation from scratch: filter to
//! complete rounds, project the parallel outcome / class / strength
//! sequences, then run every statistic. Patterns and the manipulation level
//! read the whole history; the break score and the probabilities read their
//! configured windows. Everything here is pure, so re-running on the same
//! history is bit-identical.

use crate::breaks::{break_score, BreakReport};
use crate::config::AnalyzerConfig;
use crate::manipulation::manipulation_level;
use crate::patterns::{detect_patterns, PatternFlags};
use crate::probability::{weighted_probabilities, Probabilities};
use crate::suggestion::{suggest, Suggestion};
use serde::{Deserialize, Serialize};
use studio_types::{Outcome, Round, ValueClass};

/// Everything the display layer needs from one analysis cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub patterns: PatternFlags,
    pub manipulation_level: u8,
    pub break_report: BreakReport,
    pub probabilities: Probabilities,
    pub suggestion: Suggestion,
}

/// Analyze a round history. Half-filled pair rounds are skipped; they never
/// influence any statistic. Total over every input, including the empty
/// history.
pub fn analyze(rounds: &[Round], config: &AnalyzerConfig) -> Analysis {
    let mut outcomes: Vec<Outcome> = Vec::with_capacity(rounds.len());
    let mut classes: Vec<ValueClass> = Vec::with_capacity(rounds.len());
    let mut strengths: Vec<u8> = Vec::with_capacity(rounds.len());

    for round in rounds {
        let Some(outcome) = round.outcome(&config.rules) else {
            continue;
        };
        outcomes.push(outcome);
        classes.push(round.winning_class(&config.rules));
        strengths.push(round.winning_strength(&config.rules));
    }

    let patterns = detect_patterns(&outcomes, &classes);
    let level = manipulation_level(&outcomes, &classes, &config.manipulation);
    let break_report = break_score(&outcomes, &classes, &config.breaks);
    let probabilities = weighted_probabilities(&outcomes, &strengths, &config.probability);
    let suggestion = suggest(
        &probabilities,
        &break_report,
        level,
        &patterns,
        &config.suggestion,
    );

    Analysis {
        patterns,
        manipulation_level: level,
        break_report,
        probabilities,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::BetAction;
    use chrono::{TimeZone, Utc};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use studio_types::Rank;

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 21, 12, 0, 0).unwrap()
    }

    fn single(side: Outcome, card: Option<Rank>) -> Round {
        Round::single(ts(), side, card)
    }

    #[test]
    fn test_empty_history_baseline() {
        let analysis = analyze(&[], &AnalyzerConfig::default());
        assert_eq!(analysis.probabilities.red, 49.0);
        assert_eq!(analysis.probabilities.blue, 49.0);
        assert_eq!(analysis.probabilities.tie, 2.0);
        assert_eq!(analysis.probabilities.confidence, 0.0);
        assert_eq!(analysis.manipulation_level, 1);
        assert_eq!(analysis.break_report.score, 0);
        assert_eq!(analysis.suggestion.action, BetAction::Wait);
        assert!(!analysis.patterns.any());
    }

    #[test]
    fn test_repetition_scenario() {
        let rounds = vec![
            single(Outcome::Blue, Some(Rank::Nine)),
            single(Outcome::Blue, Some(Rank::Ten)),
            single(Outcome::Blue, Some(Rank::Eight)),
        ];
        let analysis = analyze(&rounds, &AnalyzerConfig::default());
        assert!(analysis.patterns.repetition);
    }

    #[test]
    fn test_controlled_break_scenario() {
        // Low, low, high winning classes regardless of colors.
        let rounds = vec![
            single(Outcome::Red, Some(Rank::Two)),
            single(Outcome::Blue, Some(Rank::Five)),
            single(Outcome::Red, Some(Rank::Ace)),
        ];
        let analysis = analyze(&rounds, &AnalyzerConfig::default());
        assert!(analysis.patterns.controlled_break);
    }

    #[test]
    fn test_incomplete_rounds_do_not_count() {
        let complete = vec![
            single(Outcome::Blue, Some(Rank::Nine)),
            single(Outcome::Blue, Some(Rank::Ten)),
            single(Outcome::Blue, Some(Rank::Eight)),
        ];
        let mut with_partials = complete.clone();
        with_partials.insert(1, Round::pair(ts(), Some(Rank::Ace), None));
        with_partials.push(Round::pair(ts(), None, None));

        let config = AnalyzerConfig::default();
        assert_eq!(analyze(&complete, &config), analyze(&with_partials, &config));
    }

    #[test]
    fn test_idempotent_over_same_history() {
        let rounds = vec![
            single(Outcome::Red, Some(Rank::Ace)),
            single(Outcome::Blue, Some(Rank::Two)),
            single(Outcome::Tie, None),
            Round::pair(ts(), Some(Rank::King), Some(Rank::Queen)),
        ];
        let config = AnalyzerConfig::default();
        assert_eq!(analyze(&rounds, &config), analyze(&rounds, &config));
    }

    #[test]
    fn test_pair_rounds_feed_the_pipeline() {
        let rounds = vec![
            Round::pair(ts(), Some(Rank::Ace), Some(Rank::Two)),
            Round::pair(ts(), Some(Rank::King), Some(Rank::Three)),
            Round::pair(ts(), Some(Rank::Queen), Some(Rank::Four)),
        ];
        let analysis = analyze(&rounds, &AnalyzerConfig::default());
        // Home (red) won all three with high cards.
        assert!(analysis.patterns.repetition);
        assert!(analysis.probabilities.red > analysis.probabilities.blue);
    }

    #[test]
    fn test_invariants_hold_for_random_histories() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0u64);
        let config = AnalyzerConfig::default();

        for _ in 0..500 {
            let len = rng.gen_range(0..40);
            let rounds: Vec<Round> = (0..len)
                .map(|_| match rng.gen_range(0..4) {
                    0 => single(Outcome::Tie, None),
                    1 => Round::pair(
                        ts(),
                        rng.gen::<bool>().then(|| random_rank(&mut rng)),
                        rng.gen::<bool>().then(|| random_rank(&mut rng)),
                    ),
                    2 => single(Outcome::Red, Some(random_rank(&mut rng))),
                    _ => single(Outcome::Blue, Some(random_rank(&mut rng))),
                })
                .collect();

            let analysis = analyze(&rounds, &config);
            assert!((1..=9).contains(&analysis.manipulation_level));
            assert!(analysis.break_report.score <= 100);
            let p = &analysis.probabilities;
            let sum = p.red + p.blue + p.tie;
            assert!((sum - 100.0).abs() < 0.5, "probabilities summed to {sum}");
            assert!((0.0..=100.0).contains(&p.confidence));
        }
    }

    fn random_rank(rng: &mut StdRng) -> Rank {
        studio_types::ALL_RANKS[rng.gen_range(0..studio_types::RANK_COUNT)]
    }
}
