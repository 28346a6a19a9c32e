//! Flat exports for the display layer.
//!
//! Pure formatting over already-computed data; no decision logic. The CSV
//! covers the whole history (including half-filled pair entries, with blank
//! outcome fields) so nothing the user typed is lost on export.

use crate::analyzer::Analysis;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use studio_types::{Rank, Round, RoundCards, TableRules};

/// Rounds included in the text report's tail section.
const REPORT_TAIL: usize = 30;

const CSV_HEADER: &str =
    "timestamp,outcome,home,away,winning_card,winning_value,winning_class,winning_strength";

fn label_or_empty(card: Option<Rank>) -> &'static str {
    card.map(|r| r.label()).unwrap_or("")
}

fn push_csv_row(out: &mut String, round: &Round, rules: &TableRules) {
    let timestamp = round.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    let outcome = round
        .outcome(rules)
        .map(|o| o.as_str())
        .unwrap_or("");
    let (home, away) = match round.cards {
        RoundCards::Pair { home, away } => (home, away),
        RoundCards::Single { .. } => (None, None),
    };
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{}",
        timestamp,
        outcome,
        label_or_empty(home),
        label_or_empty(away),
        label_or_empty(round.winning_card(rules)),
        round.winning_value(rules),
        round.winning_class(rules),
        round.winning_strength(rules),
    );
}

/// Serialize a round history to CSV, one row per round, insertion order.
pub fn history_csv(rounds: &[Round], rules: &TableRules) -> String {
    let mut out = String::with_capacity(64 + rounds.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for round in rounds {
        push_csv_row(&mut out, round, rules);
    }
    out
}

/// Render the text report: the latest analysis bundle plus the last rounds
/// as CSV. `generated_at` is caller-supplied like every other timestamp.
pub fn render_report(
    analysis: &Analysis,
    rounds: &[Round],
    rules: &TableRules,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("Football Studio analyzer report\n");
    let _ = writeln!(
        out,
        "generated at: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let names = analysis.patterns.names();
    let _ = writeln!(
        out,
        "patterns: {}",
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    );
    let _ = writeln!(out, "manipulation level: {}/9", analysis.manipulation_level);
    let _ = writeln!(out, "suggestion: {}", analysis.suggestion.text);
    let p = &analysis.probabilities;
    let _ = writeln!(
        out,
        "probabilities: RED {}% / BLUE {}% / TIE {}%",
        p.red, p.blue, p.tie
    );
    let _ = writeln!(out, "confidence: {}%", p.confidence);
    if analysis.break_report.score > 0 {
        let _ = writeln!(
            out,
            "break score: {}% ({})",
            analysis.break_report.score,
            analysis.break_report.summary()
        );
    }

    let tail_start = rounds.len().saturating_sub(REPORT_TAIL);
    let _ = writeln!(out, "\nlast {} rounds:", rounds.len() - tail_start);
    out.push_str(&history_csv(&rounds[tail_start..], rules));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::config::AnalyzerConfig;
    use chrono::TimeZone;
    use studio_types::{Outcome, Rank};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_csv_shape() {
        let rules = TableRules::default();
        let rounds = vec![
            Round::single(ts(), Outcome::Red, Some(Rank::Ace)),
            Round::pair(ts(), Some(Rank::King), Some(Rank::Two)),
            Round::tie(ts()),
        ];
        let csv = history_csv(&rounds, &rules);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("2025-11-21T12:00:00Z,red,,,A,14,high,5"));
        assert!(lines[2].contains(",red,K,2,K,13,high,5"));
        assert!(lines[3].contains(",tie,,,,0,tie,0"));
    }

    #[test]
    fn test_csv_keeps_half_filled_rows_with_blank_outcome() {
        let rules = TableRules::default();
        let rounds = vec![Round::pair(ts(), Some(Rank::Ace), None)];
        let csv = history_csv(&rounds, &rules);
        let row = csv.lines().nth(1).expect("row");
        assert!(row.contains(",,A,,"));
    }

    #[test]
    fn test_report_contains_bundle_and_tail() {
        let config = AnalyzerConfig::default();
        let rounds = vec![
            Round::single(ts(), Outcome::Blue, Some(Rank::Nine)),
            Round::single(ts(), Outcome::Blue, Some(Rank::Ten)),
            Round::single(ts(), Outcome::Blue, Some(Rank::Eight)),
        ];
        let analysis = analyze(&rounds, &config);
        let report = render_report(&analysis, &rounds, &config.rules, ts());

        assert!(report.contains("patterns: repetition"));
        assert!(report.contains("manipulation level:"));
        assert!(report.contains("suggestion:"));
        assert!(report.contains("probabilities: RED"));
        assert!(report.contains("last 3 rounds:"));
        assert!(report.contains(CSV_HEADER));
    }

    #[test]
    fn test_report_tail_is_capped() {
        let config = AnalyzerConfig::default();
        let rounds: Vec<Round> = (0..50)
            .map(|_| Round::single(ts(), Outcome::Red, Some(Rank::Nine)))
            .collect();
        let analysis = analyze(&rounds, &config);
        let report = render_report(&analysis, &rounds, &config.rules, ts());
        assert!(report.contains("last 30 rounds:"));
    }
}
