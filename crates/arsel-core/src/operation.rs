//! Results reported back to the UI after each mutation.

use arsel_model::ListMode;
use serde::Serialize;

use crate::naming::NameCorrection;

/// The concrete change a list operation made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    /// Positions moved from the pool into the sequence, starting at `at`.
    Added { positions: Vec<usize>, at: usize },
    /// Positions taken out of the sequence, highest sequence index first.
    /// `restored` lists the ones that went back into the pool.
    Removed {
        positions: Vec<usize>,
        restored: Vec<usize>,
    },
    /// `count` entries now form a contiguous run starting at `at`.
    Reordered { count: usize, at: usize },
    ModeSwitched { mode: ListMode },
    MaskReplaced { mode: ListMode, switchable: bool },
    SelectionReplaced { selected: usize, skipped: usize },
    Reset,
    NoAction,
}

impl Operation {
    pub fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction)
    }
}

/// Result of renaming a selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub index: usize,
    pub previous: String,
    pub requested: String,
    pub accepted: String,
    pub correction: Option<NameCorrection>,
}
