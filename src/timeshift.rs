//! Note start-time shifting.
//!
//! The shift menu mixes two kinds of entry: "left to start", which pulls
//! the earliest note back to pulse 0, and "right by N eighth notes". Both
//! used to travel as one signed tag (negative = left shift amount,
//! non-negative = eighth count), which cannot tell "left by 0" from
//! "right by 0". [`ShiftChoice`] keeps the kind explicit; the tag form is
//! still available for callers that need it.

use serde::{Deserialize, Serialize};

use crate::model::TimingSummary;

/// Largest right shift the menu offers, in eighth notes.
pub const MAX_RIGHT_EIGHTHS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftChoice {
    /// Shift every note left so the earliest one starts at pulse 0
    LeftToStart,
    /// Shift every note right by this many eighth notes
    RightEighths(u8),
}

impl ShiftChoice {
    /// Effective shift in pulses. Left-to-start is recomputed from the
    /// timing summary every time.
    pub fn pulses(&self, timing: &TimingSummary) -> i64 {
        match *self {
            ShiftChoice::LeftToStart => -i64::from(timing.first_note_start_pulse),
            ShiftChoice::RightEighths(n) => i64::from(n) * i64::from(timing.pulses_per_quarter / 2),
        }
    }

    /// The legacy signed tag: eighth count for right shifts, negated
    /// first-note start for left-to-start.
    pub fn tag(&self, timing: &TimingSummary) -> i64 {
        match *self {
            ShiftChoice::LeftToStart => -i64::from(timing.first_note_start_pulse),
            ShiftChoice::RightEighths(n) => i64::from(n),
        }
    }

    /// Read a legacy tag. Zero is read as "no shift".
    pub fn from_tag(tag: i64) -> Self {
        if tag < 0 {
            ShiftChoice::LeftToStart
        } else {
            ShiftChoice::RightEighths(u8::try_from(tag).unwrap_or(u8::MAX))
        }
    }

    pub fn label(&self) -> String {
        match *self {
            ShiftChoice::LeftToStart => "Left to start".to_string(),
            ShiftChoice::RightEighths(0) => "none (default)".to_string(),
            ShiftChoice::RightEighths(n) => {
                let (num, den) = reduce(n as u32, 8);
                format!("Right {num}/{den} note")
            }
        }
    }
}

/// Decode a legacy tag straight into pulses.
pub fn decode_tag(tag: i64, pulses_per_quarter: u32) -> i64 {
    if tag >= 0 {
        i64::from(pulses_per_quarter / 2).saturating_mul(tag)
    } else {
        tag
    }
}

/// Every shift the menu offers, left-to-start first.
pub fn selectable_shifts() -> Vec<ShiftChoice> {
    let mut shifts = vec![ShiftChoice::LeftToStart];
    shifts.extend((0..=MAX_RIGHT_EIGHTHS).map(ShiftChoice::RightEighths));
    shifts
}

fn reduce(num: u32, den: u32) -> (u32, u32) {
    let mut a = num;
    let mut b = den;
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 {
        (num, den)
    } else {
        (num / a, den / a)
    }
}
