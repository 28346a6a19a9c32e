//! Round records.
//!
//! A round is one resolved comparison producing RED, BLUE, or TIE. Rounds
//! come in two shapes:
//! - single: the user reports the winning side plus the winning card
//!   (tie rounds carry no card)
//! - pair: the user reports both table cards and the outcome is derived
//!   from the ace-high values
//!
//! Rounds are immutable once created. Timestamps are supplied by the
//! caller; nothing in here reads the wall clock, so analysis over a fixed
//! history is reproducible.

use crate::card::{class_of, strength_of, value_of, Rank, ValueClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Winning side of a round, or TIE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Red,
    Blue,
    Tie,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Red => "red",
            Outcome::Blue => "blue",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for outcome labels outside {red, blue, tie}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown outcome label: {0:?}")]
pub struct ParseOutcomeError(pub String);

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Outcome::Red),
            "blue" | "b" => Ok(Outcome::Blue),
            "tie" | "t" => Ok(Outcome::Tie),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

/// Table conventions for pair rounds.
///
/// Tables disagree on whether the home card pays out as RED or BLUE, so the
/// mapping is configuration rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Color the home card pays out as. The away card pays the other color.
    pub home_side: Outcome,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            home_side: Outcome::Red,
        }
    }
}

impl TableRules {
    /// Color the away card pays out as.
    pub fn away_side(&self) -> Outcome {
        match self.home_side {
            Outcome::Blue => Outcome::Red,
            _ => Outcome::Blue,
        }
    }
}

/// Card payload of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundCards {
    /// One-card entry: winning side plus the card that won.
    Single {
        side: Outcome,
        card: Option<Rank>,
    },
    /// Two-card entry. `None` marks a side not chosen yet; such rounds are
    /// incomplete and excluded from analysis.
    Pair {
        home: Option<Rank>,
        away: Option<Rank>,
    },
}

/// One completed (or, for pairs, possibly half-filled) play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub timestamp: DateTime<Utc>,
    pub cards: RoundCards,
}

impl Round {
    /// One-card round with an explicit winning side.
    pub fn single(timestamp: DateTime<Utc>, side: Outcome, card: Option<Rank>) -> Self {
        Self {
            timestamp,
            cards: RoundCards::Single { side, card },
        }
    }

    /// One-card tie round (no card attached).
    pub fn tie(timestamp: DateTime<Utc>) -> Self {
        Self::single(timestamp, Outcome::Tie, None)
    }

    /// Two-card round; either side may still be unset.
    pub fn pair(timestamp: DateTime<Utc>, home: Option<Rank>, away: Option<Rank>) -> Self {
        Self {
            timestamp,
            cards: RoundCards::Pair { home, away },
        }
    }

    /// Whether this round may participate in analysis. Single rounds are
    /// always complete; pair rounds need both cards.
    pub fn is_complete(&self) -> bool {
        match self.cards {
            RoundCards::Single { .. } => true,
            RoundCards::Pair { home, away } => home.is_some() && away.is_some(),
        }
    }

    /// Resolved outcome, or `None` for a half-filled pair.
    pub fn outcome(&self, rules: &TableRules) -> Option<Outcome> {
        match self.cards {
            RoundCards::Single { side, .. } => Some(side),
            RoundCards::Pair { home, away } => {
                let (home, away) = (home?, away?);
                Some(match home.value().cmp(&away.value()) {
                    Ordering::Greater => rules.home_side,
                    Ordering::Less => rules.away_side(),
                    Ordering::Equal => Outcome::Tie,
                })
            }
        }
    }

    /// Card of whichever side won. Tie and incomplete rounds have none.
    pub fn winning_card(&self, rules: &TableRules) -> Option<Rank> {
        match self.cards {
            RoundCards::Single { side, card } => match side {
                Outcome::Tie => None,
                _ => card,
            },
            RoundCards::Pair { home, away } => match self.outcome(rules)? {
                o if o == rules.home_side => home,
                Outcome::Tie => None,
                _ => away,
            },
        }
    }

    /// Class of the winning side; tie rounds contribute [`ValueClass::Tie`].
    pub fn winning_class(&self, rules: &TableRules) -> ValueClass {
        class_of(self.winning_card(rules))
    }

    /// Ace-high value of the winning card (0 for ties and incompletes).
    pub fn winning_value(&self, rules: &TableRules) -> u8 {
        value_of(self.winning_card(rules))
    }

    /// Strength weight of the winning card (0 for ties and incompletes).
    pub fn winning_strength(&self, rules: &TableRules) -> u8 {
        strength_of(self.winning_card(rules))
    }
}
