//! The full set of selection groups for one loaded file.
//!
//! [`Selections::for_file`] seeds every group with the options and
//! defaults the viewer offers for that file. The set is thrown away and
//! rebuilt whenever a different file is opened.

use serde::Serialize;

use crate::error::ConfigError;
use crate::keysig::{self, KeyChoice};
use crate::model::{FileSummary, NoteNameMode, NoteSize, ScrollOrientation, StaffLayout};
use crate::selection::{SelectionGroup, SelectionOption, Toggle};
use crate::timeshift::{self, ShiftChoice};

/// Transpose amounts in semitones, in menu order.
pub const TRANSPOSE_AMOUNTS: [i32; 15] = [12, 6, 5, 4, 3, 2, 1, 0, -1, -2, -3, -4, -5, -6, -12];

/// Chord-combine intervals in milliseconds, in menu order.
pub const COMBINE_INTERVALS_MS: [u32; 5] = [20, 40, 60, 80, 100];
pub const DEFAULT_COMBINE_INTERVAL_MS: u32 = 40;

/// Identifies a selection group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Group {
    StaffLayout,
    NoteSize,
    Scroll,
    NoteNames,
    KeySignature,
    Transpose,
    Shift,
    TimeSignature,
    MeasureLength,
    CombineInterval,
}

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::StaffLayout => "Staff Layout",
            Group::NoteSize => "Note Size",
            Group::Scroll => "Scroll",
            Group::NoteNames => "Show Note Letters",
            Group::KeySignature => "Key Signature",
            Group::Transpose => "Transpose",
            Group::Shift => "Shift Notes",
            Group::TimeSignature => "Time Signature",
            Group::MeasureLength => "Measure Length",
            Group::CombineInterval => "Combine Notes Within Interval",
        }
    }
}

/// Identifies an on/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Switch {
    Lyrics,
    MeasureNumbers,
    Color,
    Loop,
}

impl Switch {
    pub fn name(self) -> &'static str {
        match self {
            Switch::Lyrics => "Show Lyrics",
            Switch::MeasureNumbers => "Show Measure Numbers",
            Switch::Color => "Use Color",
            Switch::Loop => "Play Measures in a Loop",
        }
    }
}

/// Payload of the time signature menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeSigChoice {
    ThreeFour,
    FourFour,
    /// The file's own signature when it is neither 3/4 nor 4/4
    FileActual,
}

impl TimeSigChoice {
    /// Numerator of the explicit choices.
    pub fn numerator(self) -> Option<u32> {
        match self {
            TimeSigChoice::ThreeFour => Some(3),
            TimeSigChoice::FourFour => Some(4),
            TimeSigChoice::FileActual => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selections {
    pub staff_layout: SelectionGroup<StaffLayout>,
    pub note_size: SelectionGroup<NoteSize>,
    pub scroll: SelectionGroup<ScrollOrientation>,
    pub note_names: SelectionGroup<NoteNameMode>,
    pub key: SelectionGroup<KeyChoice>,
    pub transpose: SelectionGroup<i32>,
    pub shift: SelectionGroup<ShiftChoice>,
    pub time_signature: SelectionGroup<TimeSigChoice>,
    pub measure_length: SelectionGroup<u32>,
    pub combine_interval: SelectionGroup<u32>,
    /// Only present when the file has lyrics
    pub lyrics: Option<Toggle>,
    pub measure_numbers: Toggle,
    pub color: Toggle,
    /// Whether playback loops over the dialog's measure range
    pub loop_playback: Toggle,
}

impl Selections {
    pub fn for_file(file: &FileSummary) -> Result<Self, ConfigError> {
        Ok(Self {
            staff_layout: staff_layout_group(file.track_count())?,
            note_size: SelectionGroup::from_options(
                Group::NoteSize.name(),
                vec![
                    SelectionOption::default_choice("Small Notes", NoteSize::Small),
                    SelectionOption::new("Large Notes", NoteSize::Large),
                ],
            )?,
            scroll: SelectionGroup::from_options(
                Group::Scroll.name(),
                vec![
                    SelectionOption::default_choice("Scroll Vertically", ScrollOrientation::Vertical),
                    SelectionOption::new("Scroll Horizontally", ScrollOrientation::Horizontal),
                ],
            )?,
            note_names: SelectionGroup::from_options(
                Group::NoteNames.name(),
                NoteNameMode::ALL
                    .iter()
                    .map(|&mode| SelectionOption {
                        label: mode.label().to_string(),
                        payload: mode,
                        is_default: mode == NoteNameMode::None,
                    })
                    .collect(),
            )?,
            key: SelectionGroup::from_options(
                Group::KeySignature.name(),
                keysig::selectable_keys()
                    .into_iter()
                    .map(|key| SelectionOption {
                        label: key.label(),
                        payload: key,
                        is_default: key == KeyChoice::FileDefault,
                    })
                    .collect(),
            )?,
            transpose: SelectionGroup::from_options(
                Group::Transpose.name(),
                TRANSPOSE_AMOUNTS
                    .iter()
                    .map(|&amount| SelectionOption {
                        label: transpose_label(amount),
                        payload: amount,
                        is_default: amount == 0,
                    })
                    .collect(),
            )?,
            shift: SelectionGroup::from_options(
                Group::Shift.name(),
                timeshift::selectable_shifts()
                    .into_iter()
                    .map(|shift| SelectionOption {
                        label: shift.label(),
                        payload: shift,
                        is_default: shift == ShiftChoice::RightEighths(0),
                    })
                    .collect(),
            )?,
            time_signature: time_signature_group(file)?,
            measure_length: measure_length_group(file)?,
            combine_interval: SelectionGroup::from_options(
                Group::CombineInterval.name(),
                COMBINE_INTERVALS_MS
                    .iter()
                    .map(|&ms| {
                        let is_default = ms == DEFAULT_COMBINE_INTERVAL_MS;
                        let label = if is_default {
                            format!("{ms} milliseconds (default)")
                        } else {
                            format!("{ms} milliseconds")
                        };
                        SelectionOption {
                            label,
                            payload: ms,
                            is_default,
                        }
                    })
                    .collect(),
            )?,
            lyrics: file
                .has_lyrics
                .then(|| Toggle::new(Switch::Lyrics.name(), true)),
            measure_numbers: Toggle::new(Switch::MeasureNumbers.name(), false),
            color: Toggle::new(Switch::Color.name(), false),
            loop_playback: Toggle::new(Switch::Loop.name(), false),
        })
    }

    /// Activate `label` in the given group.
    pub fn set_active(&mut self, group: Group, label: &str) -> Result<bool, ConfigError> {
        match group {
            Group::StaffLayout => self.staff_layout.set_active(label),
            Group::NoteSize => self.note_size.set_active(label),
            Group::Scroll => self.scroll.set_active(label),
            Group::NoteNames => self.note_names.set_active(label),
            Group::KeySignature => self.key.set_active(label),
            Group::Transpose => self.transpose.set_active(label),
            Group::Shift => self.shift.set_active(label),
            Group::TimeSignature => self.time_signature.set_active(label),
            Group::MeasureLength => self.measure_length.set_active(label),
            Group::CombineInterval => self.combine_interval.set_active(label),
        }
    }

    pub fn active_label(&self, group: Group) -> &str {
        match group {
            Group::StaffLayout => self.staff_layout.active_label(),
            Group::NoteSize => self.note_size.active_label(),
            Group::Scroll => self.scroll.active_label(),
            Group::NoteNames => self.note_names.active_label(),
            Group::KeySignature => self.key.active_label(),
            Group::Transpose => self.transpose.active_label(),
            Group::Shift => self.shift.active_label(),
            Group::TimeSignature => self.time_signature.active_label(),
            Group::MeasureLength => self.measure_length.active_label(),
            Group::CombineInterval => self.combine_interval.active_label(),
        }
    }

    pub fn switch_mut(&mut self, switch: Switch) -> Result<&mut Toggle, ConfigError> {
        match switch {
            Switch::Lyrics => self.lyrics.as_mut().ok_or_else(|| ConfigError::UnknownOption {
                group: Switch::Lyrics.name().to_string(),
                label: "lyrics".to_string(),
            }),
            Switch::MeasureNumbers => Ok(&mut self.measure_numbers),
            Switch::Color => Ok(&mut self.color),
            Switch::Loop => Ok(&mut self.loop_playback),
        }
    }

    /// Check the exactly-one-active invariant on every group.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.staff_layout.check()?;
        self.note_size.check()?;
        self.scroll.check()?;
        self.note_names.check()?;
        self.key.check()?;
        self.transpose.check()?;
        self.shift.check()?;
        self.time_signature.check()?;
        self.measure_length.check()?;
        self.combine_interval.check()
    }
}

fn staff_layout_group(track_count: usize) -> Result<SelectionGroup<StaffLayout>, ConfigError> {
    // A single track is split over two staves by default.
    let options = if track_count == 1 {
        vec![
            SelectionOption::new("Show One Staff Per Track", StaffLayout::OneStaffPerTrack),
            SelectionOption::default_choice("Split Track Into Two Staffs", StaffLayout::TwoStaffCombined),
        ]
    } else {
        vec![
            SelectionOption::default_choice("Show One Staff Per Track", StaffLayout::OneStaffPerTrack),
            SelectionOption::new("Combine All Tracks Into Two Staffs", StaffLayout::TwoStaffCombined),
        ]
    };
    SelectionGroup::from_options(Group::StaffLayout.name(), options)
}

fn time_signature_group(file: &FileSummary) -> Result<SelectionGroup<TimeSigChoice>, ConfigError> {
    let timing = &file.timing;
    let native = |n: u32| timing.denominator == 4 && timing.numerator == n;
    let entry = |n: u32, choice: TimeSigChoice| {
        if native(n) {
            SelectionOption::default_choice(format!("{n}/4 (default)"), choice)
        } else {
            SelectionOption::new(format!("{n}/4"), choice)
        }
    };

    let mut options = vec![
        entry(3, TimeSigChoice::ThreeFour),
        entry(4, TimeSigChoice::FourFour),
    ];
    if !timing.is_common_time() {
        options.push(SelectionOption::default_choice(
            format!("{}/{} (default)", timing.numerator, timing.denominator),
            TimeSigChoice::FileActual,
        ));
    }
    SelectionGroup::from_options(Group::TimeSignature.name(), options)
}

/// Label of the measure-length default entry.
pub fn default_measure_label(pulses: u32) -> String {
    format!("{pulses} pulses (default)")
}

fn measure_length_group(file: &FileSummary) -> Result<SelectionGroup<u32>, ConfigError> {
    let timing = &file.timing;
    let mut options = vec![SelectionOption::default_choice(
        default_measure_label(timing.pulses_per_measure),
        timing.pulses_per_measure,
    )];

    let mut seen = Vec::new();
    for &len in &timing.measure_length_guesses {
        if seen.contains(&len) {
            continue;
        }
        seen.push(len);
        options.push(SelectionOption::new(format!("{len} pulses"), len));
    }
    SelectionGroup::from_options(Group::MeasureLength.name(), options)
}

fn transpose_label(amount: i32) -> String {
    match amount {
        0 => "none".to_string(),
        a if a > 0 => format!("Up {a}"),
        a => format!("Down {}", -a),
    }
}
