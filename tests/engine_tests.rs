//! Integration tests for the configuration engine: file lifecycle,
//! selection groups, cascades, track flags and snapshot derivation.

use pretty_assertions::assert_eq;
use sheetconfig::{
    snapshot_from_json, snapshot_to_json, ColorPalette, ConfigEngine, ConfigError, FileSummary,
    Group, InstrumentTable, LoopSelection, NoteNameMode, NoteSize, ScrollOrientation, ShiftChoice,
    StaffLayout, Switch, TimeSignature, TimingSummary, TrackInfo,
};

fn timing(numerator: u32, denominator: u32, quarter: u32) -> TimingSummary {
    let measure = TimeSignature::new(numerator, denominator, quarter, 500_000).measure();
    TimingSummary {
        pulses_per_quarter: quarter,
        pulses_per_measure: measure,
        numerator,
        denominator,
        tempo: 500_000,
        first_note_start_pulse: 480,
        // Ten measures when counted 1-based
        total_length_pulses: measure * 9,
        measure_length_guesses: vec![quarter * 2, quarter * 3, quarter * 6],
    }
}

fn file_with(tracks: &[&str], timing: TimingSummary) -> FileSummary {
    FileSummary {
        tracks: tracks
            .iter()
            .enumerate()
            .map(|(i, name)| TrackInfo::new(i, *name))
            .collect(),
        timing,
        has_lyrics: false,
    }
}

fn engine_for(file: FileSummary) -> ConfigEngine {
    let mut engine = ConfigEngine::new();
    engine.open(file).expect("Failed to open file");
    engine
}

fn four_four_engine() -> ConfigEngine {
    engine_for(file_with(&["Piano", "Percussion", "Bass"], timing(4, 4, 96)))
}

// ═══════════════════════════════════════════════════════════════════════
// Selection groups
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn exactly_one_active_after_any_sequence() {
    let mut engine = four_four_engine();
    let labels: Vec<String> = engine
        .selections()
        .unwrap()
        .transpose
        .labels()
        .map(String::from)
        .collect();

    // Walk forwards, backwards, and repeat some labels.
    let sequence = labels
        .iter()
        .chain(labels.iter().rev())
        .chain(labels.iter().step_by(3));
    for label in sequence {
        engine.select(Group::Transpose, label).unwrap();
        let group = &engine.selections().unwrap().transpose;
        assert!(group.check().is_ok());
        assert_eq!(group.active_label(), label.as_str());
        assert!(group.options().iter().any(|o| o.payload == *group.active_payload()));
    }
    println!("✓ transpose group stayed consistent over {} selections", labels.len() * 2);
}

#[test]
fn reselecting_active_option_is_a_noop() {
    let mut engine = four_four_engine();
    engine.select(Group::TimeSignature, "3/4").unwrap();
    let before = engine.selections().unwrap().clone();

    assert_eq!(engine.select(Group::TimeSignature, "3/4"), Ok(false));
    assert_eq!(engine.selections().unwrap(), &before);
    assert_eq!(
        engine.selections().unwrap().measure_length.default_option().payload,
        288
    );
}

#[test]
fn unknown_label_is_reported() {
    let mut engine = four_four_engine();
    assert_eq!(
        engine.select(Group::Scroll, "Scroll Sideways"),
        Err(ConfigError::UnknownOption {
            group: "Scroll".to_string(),
            label: "Scroll Sideways".to_string(),
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Cascading defaults
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn measure_default_follows_time_signature() {
    let mut engine = four_four_engine();
    let default = |e: &ConfigEngine| e.selections().unwrap().measure_length.default_option().clone();

    assert_eq!(default(&engine).payload, 384);
    assert_eq!(engine.select(Group::TimeSignature, "3/4"), Ok(true));
    assert_eq!(default(&engine).payload, 288);
    assert_eq!(default(&engine).label, "288 pulses (default)");

    let snap = engine.derive().unwrap();
    assert_eq!(snap.time, TimeSignature::new(3, 4, 96, 500_000));
    assert_eq!(snap.measure_pulses(), 288);

    engine.select(Group::TimeSignature, "4/4 (default)").unwrap();
    assert_eq!(default(&engine).payload, 384);
}

#[test]
fn explicit_measure_length_survives_time_signature_change() {
    let mut engine = four_four_engine();
    engine.select(Group::MeasureLength, "192 pulses").unwrap();
    engine.select(Group::TimeSignature, "3/4").unwrap();

    let sel = engine.selections().unwrap();
    assert_eq!(sel.measure_length.active_label(), "192 pulses");
    assert_eq!(*sel.measure_length.active_payload(), 192);
    assert_eq!(sel.measure_length.default_option().payload, 288);

    // 192 pulses per 3/4 measure: quarter rescaled to 64
    let snap = engine.derive().unwrap();
    assert_eq!(snap.time, TimeSignature::new(3, 4, 64, 500_000));
}

#[test]
fn file_actual_signature_restores_native_measure() {
    let mut engine = engine_for(file_with(&["Flute", "Oboe"], timing(6, 8, 96)));
    let sel = engine.selections().unwrap();
    assert_eq!(sel.time_signature.active_label(), "6/8 (default)");
    assert_eq!(sel.measure_length.default_option().payload, 288);

    engine.select(Group::TimeSignature, "4/4").unwrap();
    assert_eq!(engine.selections().unwrap().measure_length.default_option().payload, 384);

    engine.select(Group::TimeSignature, "6/8 (default)").unwrap();
    assert_eq!(engine.selections().unwrap().measure_length.default_option().payload, 288);
    assert_eq!(engine.derive().unwrap().time, TimeSignature::new(6, 8, 96, 500_000));
}

// ═══════════════════════════════════════════════════════════════════════
// Time shift
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn right_shift_by_eighths() {
    let mut engine = engine_for(file_with(&["Piano", "Bass"], timing(4, 4, 120)));
    engine.select_shift(ShiftChoice::RightEighths(4)).unwrap();
    assert_eq!(engine.derive().unwrap().shift_time, 240);
}

#[test]
fn left_shift_to_first_note() {
    let mut engine = engine_for(file_with(&["Piano", "Bass"], timing(4, 4, 120)));
    engine.select(Group::Shift, "Left to start").unwrap();
    assert_eq!(engine.derive().unwrap().shift_time, -480);
}

#[test]
fn left_shift_follows_reloaded_timing() {
    let mut engine = engine_for(file_with(&["Piano"], timing(4, 4, 120)));
    engine.select(Group::Shift, "Left to start").unwrap();
    assert_eq!(engine.derive().unwrap().shift_time, -480);

    let mut later = timing(4, 4, 120);
    later.first_note_start_pulse = 960;
    engine.open(file_with(&["Piano"], later)).unwrap();
    engine.select(Group::Shift, "Left to start").unwrap();
    assert_eq!(engine.derive().unwrap().shift_time, -960);
}

// ═══════════════════════════════════════════════════════════════════════
// Tracks
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn percussion_hidden_and_muted_on_load() {
    let engine = four_four_engine();
    let snap = engine.derive().unwrap();
    assert_eq!(snap.tracks_visible, vec![true, false, true]);
    assert_eq!(snap.tracks_muted, vec![false, true, false]);
}

#[test]
fn track_operations_flow_into_snapshot() {
    let mut engine = four_four_engine();
    assert_eq!(engine.select_all_tracks(), Ok(true));
    assert_eq!(engine.toggle_track_muted(0), Ok(true));
    assert_eq!(engine.set_track_visible(2, false), Ok(true));
    assert_eq!(
        engine.set_track_visible(3, true),
        Err(ConfigError::IndexOutOfRange { index: 3, len: 3 })
    );

    let snap = engine.derive().unwrap();
    assert_eq!(snap.tracks_visible, vec![true, true, false]);
    assert_eq!(snap.tracks_muted, vec![true, true, false]);

    engine.unmute_all_tracks().unwrap();
    engine.deselect_all_tracks().unwrap();
    let snap = engine.derive().unwrap();
    assert_eq!(snap.tracks_visible, vec![false, false, false]);
    assert_eq!(snap.tracks_muted, vec![false, false, false]);
}

#[test]
fn reopening_resets_track_flags() {
    let mut engine = four_four_engine();
    engine.mute_all_tracks().unwrap();
    engine.open(file_with(&["Percussion", "Strings"], timing(4, 4, 96))).unwrap();
    let snap = engine.derive().unwrap();
    assert_eq!(snap.tracks_visible, vec![false, true]);
    assert_eq!(snap.tracks_muted, vec![true, false]);
}

// ═══════════════════════════════════════════════════════════════════════
// Loop range
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn reversed_loop_range_is_repaired() {
    let mut engine = four_four_engine();
    engine.set_switch(Switch::Loop, true).unwrap();
    engine
        .set_loop(LoopSelection { start_measure: 7, end_measure: 3 })
        .unwrap();
    let range = engine.derive().unwrap().loop_playback;
    assert!(range.enabled);
    assert_eq!((range.start_measure, range.end_measure), (6, 6));
}

#[test]
fn full_loop_range_converts_to_zero_based() {
    let mut engine = four_four_engine();
    engine
        .set_loop(LoopSelection { start_measure: 1, end_measure: 10 })
        .unwrap();
    let range = engine.derive().unwrap().loop_playback;
    assert_eq!((range.start_measure, range.end_measure), (0, 9));
}

#[test]
fn loop_switch_toggles_without_touching_range() {
    let mut engine = four_four_engine();
    engine
        .set_loop(LoopSelection { start_measure: 2, end_measure: 4 })
        .unwrap();
    assert!(!engine.derive().unwrap().loop_playback.enabled);

    assert_eq!(engine.toggle(Switch::Loop), Ok(true));
    let range = engine.derive().unwrap().loop_playback;
    assert!(range.enabled);
    assert_eq!((range.start_measure, range.end_measure), (1, 3));

    assert_eq!(engine.set_switch(Switch::Loop, true), Ok(false));
    assert_eq!(engine.toggle(Switch::Loop), Ok(false));
    let range = engine.derive().unwrap().loop_playback;
    assert!(!range.enabled);
    assert_eq!((range.start_measure, range.end_measure), (1, 3));
}

// ═══════════════════════════════════════════════════════════════════════
// Snapshot derivation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn defaults_snapshot() {
    let snap = four_four_engine().derive().unwrap();
    assert_eq!(snap.staff_layout, StaffLayout::OneStaffPerTrack);
    assert_eq!(snap.note_size, NoteSize::Small);
    assert_eq!(snap.scroll, ScrollOrientation::Vertical);
    assert_eq!(snap.note_names, NoteNameMode::None);
    assert_eq!(snap.time, TimeSignature::new(4, 4, 96, 500_000));
    assert_eq!(snap.shift_time, 0);
    assert_eq!(snap.transpose, 0);
    assert_eq!(snap.key, None);
    assert_eq!(snap.combine_interval_ms, 40);
    assert_eq!(snap.instruments, InstrumentTable::defaults_for(3));
    assert_eq!(snap.colors, None);
    assert!(!snap.show_lyrics);
    assert!(!snap.show_measure_numbers);
    assert!(!snap.loop_playback.enabled);
    assert_eq!(snap.tempo, 500_000);
}

#[test]
fn derive_twice_gives_equal_but_distinct_values() {
    let engine = four_four_engine();
    let a = engine.derive().unwrap();
    let b = engine.derive().unwrap();
    assert_eq!(a, b);
    assert!(!std::ptr::eq(&a, &b));
    assert_ne!(a.tracks_visible.as_ptr(), b.tracks_visible.as_ptr());
    assert_ne!(a.instruments.instruments.as_ptr(), b.instruments.instruments.as_ptr());
}

#[test]
fn every_group_flows_into_snapshot() {
    let mut engine = engine_for(file_with(&["Piano"], timing(4, 4, 96)));
    engine.select(Group::StaffLayout, "Show One Staff Per Track").unwrap();
    engine.select(Group::NoteSize, "Large Notes").unwrap();
    engine.select(Group::Scroll, "Scroll Horizontally").unwrap();
    engine.select(Group::NoteNames, "Movable Do-Re-Mi").unwrap();
    engine.select_key_tag(3).unwrap();
    engine.select_transpose(-12).unwrap();
    engine.select_combine_interval(100).unwrap();
    engine.set_switch(Switch::MeasureNumbers, true).unwrap();
    engine.toggle(Switch::Color).unwrap();
    engine
        .set_instruments(InstrumentTable { instruments: vec![40], use_defaults: false })
        .unwrap();
    engine.set_pause_time(1920).unwrap();

    let snap = engine.derive().unwrap();
    assert_eq!(snap.staff_layout, StaffLayout::OneStaffPerTrack);
    assert_eq!(snap.note_size, NoteSize::Large);
    assert_eq!(snap.scroll, ScrollOrientation::Horizontal);
    assert_eq!(snap.note_names, NoteNameMode::MovableDoReMi);
    // A major
    assert_eq!(snap.key, Some(0));
    assert_eq!(snap.transpose, -12);
    assert_eq!(snap.combine_interval_ms, 100);
    assert!(snap.show_measure_numbers);
    assert_eq!(snap.colors, Some(ColorPalette::default().colors));
    assert_eq!(snap.instruments.instruments, vec![40]);
    assert!(!snap.instruments.use_defaults);
    assert_eq!(snap.pause_time, 1920);
}

#[test]
fn shade_colors_present_even_with_color_off() {
    let mut engine = four_four_engine();
    let mut palette = ColorPalette::default();
    palette.shade.r = 1;
    assert!(engine.set_palette(palette.clone()));
    let snap = engine.derive().unwrap();
    assert_eq!(snap.colors, None);
    assert_eq!(snap.shade, palette.shade);
    assert_eq!(snap.shade2, palette.shade2);
}

#[test]
fn snapshot_json_round_trip() {
    let mut engine = four_four_engine();
    engine.toggle(Switch::Color).unwrap();
    let snap = engine.derive().unwrap();
    let json = snapshot_to_json(&snap).unwrap();
    assert!(json.contains("\"combine_interval_ms\": 40"));
    assert_eq!(snapshot_from_json(&json).unwrap(), snap);
}
