//! Append-only round history with snapshot undo.
//!
//! The store is owned by exactly one logical session and passed explicitly
//! into the analysis functions; nothing here is global. A full snapshot of
//! the round list is pushed before every `append`, and `undo` pops one, so
//! repeated undo walks back as far as the stack goes. Full copies are fine
//! at the expected scale (tens to low hundreds of rounds).

use studio_types::Round;
use tracing::warn;

/// Ordered, append-only sequence of rounds. Insertion order is
/// chronological order.
#[derive(Clone, Debug, Default)]
pub struct RoundStore {
    rounds: Vec<Round>,
    undo_stack: Vec<Vec<Round>>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round to the end of the history. Never fails.
    pub fn append(&mut self, round: Round) {
        self.undo_stack.push(self.rounds.clone());
        self.rounds.push(round);
    }

    /// Clear all rounds and the undo buffer.
    pub fn reset(&mut self) {
        self.rounds.clear();
        self.undo_stack.clear();
    }

    /// Restore the state immediately before the last `append`. Returns
    /// `false` (and leaves the store untouched) when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.rounds = snapshot;
                true
            }
            None => {
                warn!("undo requested with empty undo stack");
                false
            }
        }
    }

    /// All rounds in insertion order, including half-filled pair entries.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Last `min(n, len)` rounds, preserving order.
    pub fn tail(&self, n: usize) -> &[Round] {
        let start = self.rounds.len().saturating_sub(n);
        &self.rounds[start..]
    }

    /// Rounds eligible for analysis. Half-filled pair entries are the
    /// product of the user having picked one side but not the other yet;
    /// they must never count as evidence.
    pub fn complete_rounds(&self) -> Vec<Round> {
        self.rounds
            .iter()
            .filter(|r| r.is_complete())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
