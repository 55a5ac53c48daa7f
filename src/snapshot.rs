//! The derived configuration handed to the renderer and the player.
//!
//! [`derive`] reads every selection group, the track flags and the
//! collaborators' inputs and folds them into one [`ConfigurationSnapshot`].
//! It owns nothing and caches nothing: each call builds a fresh value, so
//! consumers can diff consecutive snapshots or simply drop them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loop_range::{self, LoopRange, LoopSelection};
use crate::model::{
    ColorPalette, FileSummary, InstrumentTable, NoteNameMode, NoteSize, Rgb, ScrollOrientation,
    StaffLayout, TimeSignature, TimingSummary,
};
use crate::selections::{Selections, TimeSigChoice};
use crate::tracks::TrackSelectionSet;

/// Complete instruction for laying out and playing the loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Which tracks to display
    pub tracks_visible: Vec<bool>,
    /// Which tracks to silence
    pub tracks_muted: Vec<bool>,
    pub staff_layout: StaffLayout,
    pub note_size: NoteSize,
    pub scroll: ScrollOrientation,
    pub note_names: NoteNameMode,
    pub show_lyrics: bool,
    pub show_measure_numbers: bool,
    /// Effective time signature after the time-signature and
    /// measure-length choices
    pub time: TimeSignature,
    /// Pulses added to every note start (negative shifts left)
    pub shift_time: i64,
    /// Semitones to transpose by
    pub transpose: i32,
    /// Forced key as a notescale, `None` to keep the file's key
    pub key: Option<u8>,
    /// Notes starting within this many milliseconds form one chord
    pub combine_interval_ms: u32,
    pub instruments: InstrumentTable,
    /// Microseconds per quarter note
    pub tempo: u32,
    /// Pulse at which playback resumes
    pub pause_time: u32,
    pub loop_playback: LoopRange,
    /// Per-pitch note colors, `None` when color is off
    pub colors: Option<[Rgb; 12]>,
    pub shade: Rgb,
    pub shade2: Rgb,
}

impl ConfigurationSnapshot {
    /// Pulses per measure under the effective time signature.
    pub fn measure_pulses(&self) -> u32 {
        self.time.measure()
    }
}

/// Fold the current engine state into a snapshot.
///
/// Fails with [`ConfigError::InvariantViolation`] if any group does not
/// have exactly one active member, or if the track flags do not match the
/// file's track count.
pub fn derive(
    selections: &Selections,
    tracks: &TrackSelectionSet,
    file: &FileSummary,
    instruments: &InstrumentTable,
    loop_selection: &LoopSelection,
    palette: &ColorPalette,
    pause_time: u32,
) -> Result<ConfigurationSnapshot, ConfigError> {
    selections.check()?;
    if tracks.len() != file.track_count() {
        return Err(ConfigError::InvariantViolation {
            group: "Tracks".to_string(),
            active: tracks.len(),
        });
    }

    let timing = &file.timing;
    let time = effective_time(
        *selections.time_signature.active_payload(),
        *selections.measure_length.active_payload(),
        timing,
    );

    Ok(ConfigurationSnapshot {
        tracks_visible: tracks.visible().to_vec(),
        tracks_muted: tracks.muted().to_vec(),
        staff_layout: *selections.staff_layout.active_payload(),
        note_size: *selections.note_size.active_payload(),
        scroll: *selections.scroll.active_payload(),
        note_names: *selections.note_names.active_payload(),
        show_lyrics: selections.lyrics.as_ref().is_some_and(|t| t.is_on()),
        show_measure_numbers: selections.measure_numbers.is_on(),
        time,
        shift_time: selections.shift.active_payload().pulses(timing),
        transpose: *selections.transpose.active_payload(),
        key: selections.key.active_payload().notescale(),
        combine_interval_ms: *selections.combine_interval.active_payload(),
        instruments: instruments.clone(),
        tempo: timing.tempo,
        pause_time,
        loop_playback: loop_range::normalize(
            loop_selection,
            selections.loop_playback.is_on(),
            timing,
        ),
        colors: selections.color.is_on().then_some(palette.colors),
        shade: palette.shade,
        shade2: palette.shade2,
    })
}

/// Apply the time-signature choice, then rescale the quarter note so the
/// chosen measure length fits one measure.
pub fn effective_time(choice: TimeSigChoice, measure_length: u32, timing: &TimingSummary) -> TimeSignature {
    let native = timing.time_signature();
    let time = match choice.numerator() {
        Some(n) => TimeSignature::new(n, 4, native.quarter, native.tempo),
        None => native,
    };

    let measure = time.measure();
    if measure == 0 {
        return time;
    }
    let quarter = u64::from(measure_length) * u64::from(time.quarter) / u64::from(measure);
    let quarter = u32::try_from(quarter).unwrap_or(u32::MAX);
    TimeSignature::new(time.numerator, time.denominator, quarter, time.tempo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(numerator: u32, denominator: u32) -> TimingSummary {
        TimingSummary {
            pulses_per_quarter: 96,
            pulses_per_measure: 96 * 4 * numerator / denominator,
            numerator,
            denominator,
            tempo: 500_000,
            first_note_start_pulse: 0,
            total_length_pulses: 3840,
            measure_length_guesses: Vec::new(),
        }
    }

    #[test]
    fn native_signature_kept_for_default_entry() {
        let t = timing(4, 4);
        let time = effective_time(TimeSigChoice::FourFour, 384, &t);
        assert_eq!(time, TimeSignature::new(4, 4, 96, 500_000));
    }

    #[test]
    fn explicit_three_four_replaces_signature() {
        let t = timing(4, 4);
        let time = effective_time(TimeSigChoice::ThreeFour, 288, &t);
        assert_eq!(time, TimeSignature::new(3, 4, 96, 500_000));
        assert_eq!(time.measure(), 288);
    }

    #[test]
    fn measure_length_rescales_quarter() {
        let t = timing(4, 4);
        // Twice the native measure: the quarter note doubles.
        let time = effective_time(TimeSigChoice::FourFour, 768, &t);
        assert_eq!(time.quarter, 192);
        assert_eq!(time.measure(), 768);
    }

    #[test]
    fn file_actual_signature_passes_through() {
        let t = timing(6, 8);
        let time = effective_time(TimeSigChoice::FileActual, 288, &t);
        assert_eq!(time, TimeSignature::new(6, 8, 96, 500_000));
    }

    #[test]
    fn rescaled_quarter_saturates() {
        // 1/16 time: one measure is a quarter of a quarter note.
        let t = timing(1, 16);
        let time = effective_time(TimeSigChoice::FileActual, u32::MAX, &t);
        assert_eq!(time.quarter, u32::MAX);
    }
}
