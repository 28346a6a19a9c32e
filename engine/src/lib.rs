//! Studio analyzer engine.
//!
//! This crate contains the round history store and the heuristic scoring
//! pipeline (pattern detection, manipulation level, break score, weighted
//! probabilities, bet suggestion) used by the display layer.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time inside the engine; timestamps are supplied
//!   by the caller.
//! - Every analysis function is pure and total over all histories,
//!   including the empty one; re-running on an unchanged history yields a
//!   bit-identical result.
//!
//! The primary entrypoint is [`analyze`].

pub mod analyzer;
pub mod breaks;
pub mod config;
pub mod manipulation;
pub mod patterns;
pub mod probability;
pub mod report;
pub mod store;
pub mod suggestion;


pub use analyzer::{analyze, Analysis};
pub use breaks::{break_score, BreakReport};
pub use config::{
    AnalyzerConfig, BreakConfig, ManipulationConfig, ProbabilityConfig, SuggestionConfig,
};
pub use manipulation::manipulation_level;
pub use patterns::{detect_patterns, PatternFlags};
pub use probability::{weighted_probabilities, Probabilities};
pub use report::{history_csv, render_report};
pub use store::RoundStore;
pub use suggestion::{suggest, BetAction, Suggestion};
