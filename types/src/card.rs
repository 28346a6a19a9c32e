//! Card rank alphabet and its fixed analysis mappings.
//!
//! Ranks compare ace-high: A=14 down to 2=2. Two further mappings feed the
//! analysis pipeline:
//! - class: HIGH = {A,K,Q,J}, MEDIUM = {10,9,8}, LOW = {7..2}
//! - strength: 1..=5 weight, used only by the probability estimator
//!
//! A missing card (tie rounds, half-filled entries, labels outside the
//! alphabet) behaves as a degenerate tie-like card: value 0, strength 0,
//! class [`ValueClass::Tie`]. The `*_of` helpers encode that rule so every
//! mapping is total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of symbols in the rank alphabet.
pub const RANK_COUNT: usize = 13;

/// Card rank, strongest first.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 0,
    King = 1,
    Queen = 2,
    Jack = 3,
    Ten = 4,
    Nine = 5,
    Eight = 6,
    Seven = 7,
    Six = 8,
    Five = 9,
    Four = 10,
    Three = 11,
    Two = 12,
}

/// All ranks in display order (strongest first).
pub const ALL_RANKS: [Rank; RANK_COUNT] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Three,
    Rank::Two,
];

/// Qualitative bucket a winning card falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    High,
    Medium,
    Low,
    /// Tie rounds and missing cards.
    Tie,
}

impl ValueClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueClass::High => "high",
            ValueClass::Medium => "medium",
            ValueClass::Low => "low",
            ValueClass::Tie => "tie",
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Rank {
    /// Parse a rank label from the fixed alphabet. Returns `None` for
    /// anything outside it; callers that want a hard boundary error use
    /// [`FromStr`] instead.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "A" | "a" => Some(Rank::Ace),
            "K" | "k" => Some(Rank::King),
            "Q" | "q" => Some(Rank::Queen),
            "J" | "j" => Some(Rank::Jack),
            "10" | "T" | "t" => Some(Rank::Ten),
            "9" => Some(Rank::Nine),
            "8" => Some(Rank::Eight),
            "7" => Some(Rank::Seven),
            "6" => Some(Rank::Six),
            "5" => Some(Rank::Five),
            "4" => Some(Rank::Four),
            "3" => Some(Rank::Three),
            "2" => Some(Rank::Two),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::Ten => "10",
            Rank::Nine => "9",
            Rank::Eight => "8",
            Rank::Seven => "7",
            Rank::Six => "6",
            Rank::Five => "5",
            Rank::Four => "4",
            Rank::Three => "3",
            Rank::Two => "2",
        }
    }

    /// Comparison value, ace high (A=14 .. 2=2). This is the canonical rank
    /// order for deciding a round's winner.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 14,
            Rank::King => 13,
            Rank::Queen => 12,
            Rank::Jack => 11,
            Rank::Ten => 10,
            Rank::Nine => 9,
            Rank::Eight => 8,
            Rank::Seven => 7,
            Rank::Six => 6,
            Rank::Five => 5,
            Rank::Four => 4,
            Rank::Three => 3,
            Rank::Two => 2,
        }
    }

    /// Qualitative class of the rank.
    pub fn class(&self) -> ValueClass {
        match self {
            Rank::Ace | Rank::King | Rank::Queen | Rank::Jack => ValueClass::High,
            Rank::Ten | Rank::Nine | Rank::Eight => ValueClass::Medium,
            _ => ValueClass::Low,
        }
    }

    /// Probability weight (1..=5), independent from [`Rank::value`].
    pub fn strength(&self) -> u8 {
        match self {
            Rank::Ace | Rank::King | Rank::Queen => 5,
            Rank::Jack | Rank::Ten => 4,
            Rank::Nine | Rank::Eight => 3,
            Rank::Seven => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for rank labels outside the fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card label: {0:?}")]
pub struct ParseRankError(pub String);

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::parse(s).ok_or_else(|| ParseRankError(s.to_string()))
    }
}

/// Comparison value of an optional card; missing cards count as 0.
pub fn value_of(card: Option<Rank>) -> u8 {
    card.map(|r| r.value()).unwrap_or(0)
}

/// Class of an optional card; missing cards are tie-like.
pub fn class_of(card: Option<Rank>) -> ValueClass {
    card.map(|r| r.class()).unwrap_or(ValueClass::Tie)
}

/// Strength of an optional card; missing cards weigh 0.
pub fn strength_of(card: Option<Rank>) -> u8 {
    card.map(|r| r.strength()).unwrap_or(0)
}
