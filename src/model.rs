//! Data model shared by the configuration engine and its collaborators.
//!
//! The file-loading side hands us a [`FileSummary`] (tracks plus a
//! read-only [`TimingSummary`]); everything else in here is a small value
//! type that ends up inside a [`ConfigurationSnapshot`](crate::snapshot::ConfigurationSnapshot).

use serde::{Deserialize, Serialize};

/// Instrument name the file loader reports for the percussion channel.
pub const PERCUSSION_INSTRUMENT: &str = "Percussion";

/// Default tempo in microseconds per quarter note (120 BPM).
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Read-only timing facts about the loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Pulses per quarter note (the file's resolution)
    pub pulses_per_quarter: u32,
    /// Pulses per measure under the native time signature
    pub pulses_per_measure: u32,
    /// Native time signature numerator
    pub numerator: u32,
    /// Native time signature denominator
    pub denominator: u32,
    /// Tempo in microseconds per quarter note
    pub tempo: u32,
    /// Earliest note start across all tracks
    pub first_note_start_pulse: u32,
    /// Start time of the last note in the file
    pub total_length_pulses: u32,
    /// Candidate measure lengths guessed from note onsets
    pub measure_length_guesses: Vec<u32>,
}

impl TimingSummary {
    /// The file's native time signature.
    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::new(
            self.numerator,
            self.denominator,
            self.pulses_per_quarter,
            self.tempo,
        )
    }

    /// Whether the native signature is one of the two the viewer offers
    /// explicitly (3/4 or 4/4).
    pub fn is_common_time(&self) -> bool {
        self.denominator == 4 && (self.numerator == 3 || self.numerator == 4)
    }

    /// Earliest first-note start over all tracks, capped at ten measures.
    /// Tracks without notes (`None`) are skipped.
    pub fn earliest_note_start(track_starts: &[Option<u32>], measure: u32) -> u32 {
        track_starts
            .iter()
            .flatten()
            .copied()
            .fold(measure.saturating_mul(10), u32::min)
    }
}

/// One track of the loaded file, as far as the engine cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track number (0-based)
    pub index: usize,
    /// Instrument name, empty if the track carries none
    pub instrument_name: String,
}

impl TrackInfo {
    pub fn new(index: usize, instrument_name: impl Into<String>) -> Self {
        Self {
            index,
            instrument_name: instrument_name.into(),
        }
    }

    pub fn is_percussion(&self) -> bool {
        self.instrument_name == PERCUSSION_INSTRUMENT
    }

    /// Menu label, e.g. "Track 2   (Acoustic Bass)".
    pub fn label(&self) -> String {
        if self.instrument_name.is_empty() {
            format!("Track {}", self.index + 1)
        } else {
            format!("Track {}   ({})", self.index + 1, self.instrument_name)
        }
    }
}

/// Everything the file-loading collaborator tells us about a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub tracks: Vec<TrackInfo>,
    pub timing: TimingSummary,
    /// Whether any track carries lyric events
    pub has_lyrics: bool,
}

impl FileSummary {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

/// A time signature together with the pulse resolution and tempo it
/// applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
    /// Pulses per quarter note
    pub quarter: u32,
    /// Microseconds per quarter note
    pub tempo: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32, quarter: u32, tempo: u32) -> Self {
        Self {
            numerator,
            denominator,
            quarter,
            tempo,
        }
    }

    /// Pulses per beat.
    pub fn beat(&self) -> u32 {
        match self.denominator {
            1 => self.quarter.saturating_mul(4),
            2 => self.quarter.saturating_mul(2),
            0 | 3 => self.quarter,
            d => self.quarter / (d / 4),
        }
    }

    /// Pulses per measure.
    pub fn measure(&self) -> u32 {
        self.numerator.saturating_mul(self.beat())
    }
}

/// How tracks are laid out on staves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffLayout {
    OneStaffPerTrack,
    TwoStaffCombined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteSize {
    Small,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollOrientation {
    Vertical,
    Horizontal,
}

/// Text drawn next to each note head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteNameMode {
    None,
    Letter,
    FixedDoReMi,
    MovableDoReMi,
    FixedNumber,
    MovableNumber,
}

impl NoteNameMode {
    pub const ALL: [NoteNameMode; 6] = [
        NoteNameMode::None,
        NoteNameMode::Letter,
        NoteNameMode::FixedDoReMi,
        NoteNameMode::MovableDoReMi,
        NoteNameMode::FixedNumber,
        NoteNameMode::MovableNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NoteNameMode::None => "None",
            NoteNameMode::Letter => "Letters",
            NoteNameMode::FixedDoReMi => "Fixed Do-Re-Mi",
            NoteNameMode::MovableDoReMi => "Movable Do-Re-Mi",
            NoteNameMode::FixedNumber => "Fixed Numbers",
            NoteNameMode::MovableNumber => "Movable Numbers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Note colors, one per pitch class (indexed by notescale), plus the two
/// shades used to highlight notes during playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub colors: [Rgb; 12],
    /// Highlight for the right hand / first staff
    pub shade: Rgb,
    /// Highlight for the left hand piano staff
    pub shade2: Rgb,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::new(180, 0, 0),
                Rgb::new(230, 0, 0),
                Rgb::new(220, 128, 0),
                Rgb::new(130, 130, 0),
                Rgb::new(187, 187, 0),
                Rgb::new(0, 100, 0),
                Rgb::new(0, 140, 0),
                Rgb::new(0, 180, 180),
                Rgb::new(0, 0, 120),
                Rgb::new(0, 0, 180),
                Rgb::new(88, 0, 147),
                Rgb::new(129, 0, 215),
            ],
            shade: Rgb::new(210, 205, 220),
            shade2: Rgb::new(80, 100, 250),
        }
    }
}

/// Per-track instrument assignment from the instrument dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentTable {
    /// General MIDI program per track
    pub instruments: Vec<u8>,
    /// True when the user kept the file's own instruments
    pub use_defaults: bool,
}

impl InstrumentTable {
    /// Table that keeps every track on program 0 and flags the file's own
    /// instruments as in use.
    pub fn defaults_for(track_count: usize) -> Self {
        Self {
            instruments: vec![0; track_count],
            use_defaults: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_length_follows_denominator() {
        assert_eq!(TimeSignature::new(4, 4, 96, DEFAULT_TEMPO).measure(), 384);
        assert_eq!(TimeSignature::new(3, 4, 96, DEFAULT_TEMPO).measure(), 288);
        assert_eq!(TimeSignature::new(6, 8, 96, DEFAULT_TEMPO).measure(), 288);
        assert_eq!(TimeSignature::new(2, 2, 96, DEFAULT_TEMPO).measure(), 384);
    }

    #[test]
    fn oversized_signature_saturates() {
        let whole = TimeSignature::new(u32::MAX, 1, u32::MAX / 2, DEFAULT_TEMPO);
        assert_eq!(whole.beat(), u32::MAX);
        assert_eq!(whole.measure(), u32::MAX);
        let half = TimeSignature::new(3, 2, u32::MAX, DEFAULT_TEMPO);
        assert_eq!(half.beat(), u32::MAX);
        assert_eq!(half.measure(), u32::MAX);
    }

    #[test]
    fn earliest_note_start_is_capped() {
        assert_eq!(TimingSummary::earliest_note_start(&[Some(960), Some(480), None], 384), 480);
        assert_eq!(TimingSummary::earliest_note_start(&[None, Some(9000)], 384), 3840);
        assert_eq!(TimingSummary::earliest_note_start(&[], 384), 3840);
    }

    #[test]
    fn track_labels() {
        assert_eq!(TrackInfo::new(0, "").label(), "Track 1");
        assert_eq!(TrackInfo::new(2, "Flute").label(), "Track 3   (Flute)");
        assert!(TrackInfo::new(1, "Percussion").is_percussion());
    }
}
