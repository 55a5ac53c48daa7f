//! "Play measures in a loop" range.
//!
//! The dialog works in 1-based measure numbers; playback wants 0-based
//! ones. Out-of-range and reversed input is repaired, not rejected.
//! Whether looping is on at all is the `Switch::Loop` toggle, not part
//! of the range.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::TimingSummary;

/// What the user entered in the loop dialog (1-based measure numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSelection {
    pub start_measure: i64,
    pub end_measure: i64,
}

impl LoopSelection {
    /// Dialog defaults: the whole file.
    pub fn for_file(timing: &TimingSummary) -> Self {
        Self {
            start_measure: 1,
            end_measure: i64::from(last_measure(timing)),
        }
    }
}

/// Normalized loop range in 0-based measures, `start_measure <= end_measure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopRange {
    pub enabled: bool,
    pub start_measure: u32,
    pub end_measure: u32,
}

/// Highest selectable measure number (1-based).
pub fn last_measure(timing: &TimingSummary) -> u32 {
    match timing.pulses_per_measure {
        0 => 1,
        measure => (timing.total_length_pulses / measure).saturating_add(1),
    }
}

/// Clamp both ends into `[1, last_measure]`, convert to 0-based, and pull
/// `end` up to `start` when the two are reversed.
pub fn normalize(selection: &LoopSelection, enabled: bool, timing: &TimingSummary) -> LoopRange {
    let last = i64::from(last_measure(timing));
    let start = (selection.start_measure.clamp(1, last) - 1) as u32;
    let mut end = (selection.end_measure.clamp(1, last) - 1) as u32;
    if start > end {
        debug!("loop range reversed ({start} > {end}), end moved to {start}");
        end = start;
    }
    LoopRange {
        enabled,
        start_measure: start,
        end_measure: end,
    }
}
