//! Key signature choices and the signed tag they are encoded as.
//!
//! A tag of 0 means "keep the file's key"; a positive tag is a number of
//! sharps, a negative tag a number of flats. Only one of the two counts is
//! ever non-zero.

use serde::{Deserialize, Serialize};

/// Largest number of sharps the key menu offers.
pub const MAX_SHARPS: u8 = 5;
/// Largest number of flats the key menu offers.
pub const MAX_FLATS: u8 = 6;

/// Notescale values (pitch classes counted from A).
pub mod notescale {
    pub const A: u8 = 0;
    pub const A_SHARP: u8 = 1;
    pub const B: u8 = 2;
    pub const C: u8 = 3;
    pub const C_SHARP: u8 = 4;
    pub const D: u8 = 5;
    pub const D_SHARP: u8 = 6;
    pub const E: u8 = 7;
    pub const F: u8 = 8;
    pub const F_SHARP: u8 = 9;
    pub const G: u8 = 10;
    pub const G_SHARP: u8 = 11;

    pub const B_FLAT: u8 = A_SHARP;
    pub const D_FLAT: u8 = C_SHARP;
    pub const E_FLAT: u8 = D_SHARP;
    pub const G_FLAT: u8 = F_SHARP;
    pub const A_FLAT: u8 = G_SHARP;
}

/// Major keys around the circle of fifths, starting at C and moving one
/// sharp at a time. Flat keys walk the same circle backwards.
const CIRCLE_OF_FIFTHS: [u8; 12] = {
    use self::notescale::*;
    [C, G, D, A, E, B, F_SHARP, C_SHARP, G_SHARP, D_SHARP, A_SHARP, F]
};

const SHARP_MAJOR: [&str; 8] = ["C", "G", "D", "A", "E", "B", "F#", "C#"];
const SHARP_MINOR: [&str; 8] = ["A", "E", "B", "F#", "C#", "G#", "D#", "A#"];
const FLAT_MAJOR: [&str; 8] = ["C", "F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];
const FLAT_MINOR: [&str; 8] = ["A", "D", "G", "C", "F", "Bb", "Eb", "Ab"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub sharps: u8,
    pub flats: u8,
}

impl KeySignature {
    pub fn with_sharps(sharps: u8) -> Self {
        Self { sharps, flats: 0 }
    }

    pub fn with_flats(flats: u8) -> Self {
        Self { sharps: 0, flats }
    }

    /// Notescale of the key's major tonic.
    pub fn notescale(&self) -> u8 {
        if self.flats > 0 {
            CIRCLE_OF_FIFTHS[(12 - self.flats as usize % 12) % 12]
        } else {
            CIRCLE_OF_FIFTHS[self.sharps as usize % 12]
        }
    }

    /// Menu label, e.g. "D major, B minor".
    pub fn label(&self) -> String {
        let (major, minor, n) = if self.flats > 0 {
            (&FLAT_MAJOR, &FLAT_MINOR, self.flats as usize)
        } else {
            (&SHARP_MAJOR, &SHARP_MINOR, self.sharps as usize)
        };
        match (major.get(n), minor.get(n)) {
            (Some(maj), Some(min)) => format!("{maj} major, {min} minor"),
            _ => format!("{} sharps, {} flats", self.sharps, self.flats),
        }
    }
}

/// What the key signature menu selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyChoice {
    /// Keep whatever key the file declares
    FileDefault,
    Key(KeySignature),
}

impl KeyChoice {
    /// Notescale to force on the renderer, `None` to keep the file's key.
    pub fn notescale(&self) -> Option<u8> {
        match self {
            KeyChoice::FileDefault => None,
            KeyChoice::Key(key) => Some(key.notescale()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            KeyChoice::FileDefault => "Default".to_string(),
            KeyChoice::Key(key) => key.label(),
        }
    }
}

/// Decode a signed key tag.
pub fn decode(tag: i32) -> KeyChoice {
    let count = tag.unsigned_abs().min(u8::MAX as u32) as u8;
    match tag {
        0 => KeyChoice::FileDefault,
        t if t > 0 => KeyChoice::Key(KeySignature::with_sharps(count)),
        _ => KeyChoice::Key(KeySignature::with_flats(count)),
    }
}

/// Encode a key choice back into its signed tag.
pub fn encode(choice: KeyChoice) -> i32 {
    match choice {
        KeyChoice::FileDefault => 0,
        KeyChoice::Key(key) if key.flats > 0 => -(key.flats as i32),
        KeyChoice::Key(key) => key.sharps as i32,
    }
}

/// Every key the menu offers, file default first, then sharp keys
/// (starting at C major), then flat keys.
pub fn selectable_keys() -> Vec<KeyChoice> {
    let mut keys = vec![KeyChoice::FileDefault];
    keys.extend((0..=MAX_SHARPS).map(|s| KeyChoice::Key(KeySignature::with_sharps(s))));
    keys.extend((1..=MAX_FLATS).map(|f| KeyChoice::Key(KeySignature::with_flats(f))));
    keys
}
