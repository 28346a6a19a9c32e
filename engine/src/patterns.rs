//! Pattern detection over the outcome history.
//!
//! Five independent boolean flags, each looking at a fixed-length suffix of
//! the complete history. With fewer rounds than a check needs, that flag is
//! simply false. Flags are descriptive; none of them gates betting on its
//! own.

use serde::{Deserialize, Serialize};
use studio_types::{Outcome, ValueClass};

/// Named patterns detected in parallel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// Last 3 outcomes identical and not tie.
    pub repetition: bool,
    /// Last 4 outcomes form ABAB.
    pub alternation: bool,
    /// Last 6 outcomes form AABBAA.
    pub step: bool,
    /// Last 3 winning classes are exactly low, low, high.
    pub controlled_break: bool,
    /// Last 10 outcomes split into two identical halves of 5.
    pub cycle: bool,
}

impl PatternFlags {
    pub fn any(&self) -> bool {
        self.repetition || self.alternation || self.step || self.controlled_break || self.cycle
    }

    /// Names of the set flags, for display.
    pub fn names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.repetition {
            out.push("repetition");
        }
        if self.alternation {
            out.push("alternation");
        }
        if self.step {
            out.push("step");
        }
        if self.controlled_break {
            out.push("controlled break");
        }
        if self.cycle {
            out.push("cycle");
        }
        out
    }
}

/// Detect all patterns over parallel outcome / winning-class sequences of
/// the complete history (oldest first).
pub fn detect_patterns(outcomes: &[Outcome], classes: &[ValueClass]) -> PatternFlags {
    let mut flags = PatternFlags::default();
    let n = outcomes.len();

    if n >= 3 {
        let tail = &outcomes[n - 3..];
        flags.repetition = tail[0] == tail[1] && tail[1] == tail[2] && tail[2] != Outcome::Tie;
    }

    if n >= 4 {
        let tail = &outcomes[n - 4..];
        flags.alternation = tail[3] == tail[1] && tail[2] == tail[0] && tail[3] != tail[2];
    }

    if n >= 6 {
        let tail = &outcomes[n - 6..];
        flags.step =
            tail[0] == tail[1] && tail[2] == tail[3] && tail[4] == tail[5] && tail[0] == tail[4];
    }

    if classes.len() >= 3 {
        let tail = &classes[classes.len() - 3..];
        flags.controlled_break = matches!(
            tail,
            [ValueClass::Low, ValueClass::Low, ValueClass::High]
        );
    }

    if n >= 10 {
        let tail = &outcomes[n - 10..];
        flags.cycle = tail[..5] == tail[5..];
    }

    flags
}
