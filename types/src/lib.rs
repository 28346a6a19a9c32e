//! Common types for the studio analyzer: the card rank alphabet with its
//! value/class/strength mappings, and round records.

pub mod card;
pub mod round;

pub use card::{
    class_of, strength_of, value_of, ParseRankError, Rank, ValueClass, ALL_RANKS, RANK_COUNT,
};
pub use round::{Outcome, ParseOutcomeError, Round, RoundCards, TableRules};
