//! The configuration engine: owns the per-file selection state, applies
//! user actions one at a time, and derives snapshots on demand.
//!
//! Every mutation runs to completion (cascades included) before it
//! returns, and reports whether anything changed so the caller only
//! re-derives and re-renders when needed. The renderer never sees this
//! state, only the [`ConfigurationSnapshot`] values built from it.

use log::info;

use crate::cascade::CascadingDefaults;
use crate::error::ConfigError;
use crate::keysig::{self, KeyChoice};
use crate::loop_range::LoopSelection;
use crate::model::{ColorPalette, FileSummary, InstrumentTable};
use crate::selections::{Group, Selections, Switch};
use crate::snapshot::{self, ConfigurationSnapshot};
use crate::timeshift::ShiftChoice;
use crate::tracks::TrackSelectionSet;

/// State that lives exactly as long as one open file.
#[derive(Debug, Clone)]
struct LoadedFile {
    file: FileSummary,
    selections: Selections,
    tracks: TrackSelectionSet,
    instruments: InstrumentTable,
    loop_selection: LoopSelection,
    pause_time: u32,
}

#[derive(Debug, Default)]
pub struct ConfigEngine {
    loaded: Option<LoadedFile>,
    cascades: CascadingDefaults,
    /// Colors outlive any one file
    palette: ColorPalette,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild all selection state for a newly opened file. Whatever was
    /// open before is discarded.
    pub fn open(&mut self, file: FileSummary) -> Result<(), ConfigError> {
        let selections = Selections::for_file(&file)?;
        let tracks = TrackSelectionSet::for_tracks(&file.tracks);
        let instruments = InstrumentTable::defaults_for(file.track_count());
        let loop_selection = LoopSelection::for_file(&file.timing);

        info!(
            "opened file: {} tracks, {}/{} time, {} pulses per quarter",
            file.track_count(),
            file.timing.numerator,
            file.timing.denominator,
            file.timing.pulses_per_quarter
        );
        self.loaded = Some(LoadedFile {
            file,
            selections,
            tracks,
            instruments,
            loop_selection,
            pause_time: 0,
        });
        Ok(())
    }

    pub fn close(&mut self) {
        if self.loaded.take().is_some() {
            info!("closed file");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn state(&self) -> Result<&LoadedFile, ConfigError> {
        self.loaded.as_ref().ok_or(ConfigError::NoFileLoaded)
    }

    fn state_mut(&mut self) -> Result<&mut LoadedFile, ConfigError> {
        self.loaded.as_mut().ok_or(ConfigError::NoFileLoaded)
    }

    pub fn file(&self) -> Result<&FileSummary, ConfigError> {
        Ok(&self.state()?.file)
    }

    pub fn selections(&self) -> Result<&Selections, ConfigError> {
        Ok(&self.state()?.selections)
    }

    pub fn tracks(&self) -> Result<&TrackSelectionSet, ConfigError> {
        Ok(&self.state()?.tracks)
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    // ── Selection groups ────────────────────────────────────────────

    /// Activate `label` in `group`, then run any cascades the change
    /// triggers. Re-selecting the active option changes nothing and runs
    /// no cascade.
    pub fn select(&mut self, group: Group, label: &str) -> Result<bool, ConfigError> {
        let cascades = &self.cascades;
        let state = self.loaded.as_mut().ok_or(ConfigError::NoFileLoaded)?;
        if !state.selections.set_active(group, label)? {
            return Ok(false);
        }
        cascades.run(group, &mut state.selections, &state.file.timing);
        Ok(true)
    }

    /// Select a key by its signed tag (sharps positive, flats negative,
    /// 0 for the file's own key).
    pub fn select_key_tag(&mut self, tag: i32) -> Result<bool, ConfigError> {
        self.select_key(keysig::decode(tag))
    }

    pub fn select_key(&mut self, choice: KeyChoice) -> Result<bool, ConfigError> {
        self.select_by(Group::KeySignature, |s| {
            s.key.options().iter().find(|o| o.payload == choice).map(|o| o.label.clone())
        })
    }

    pub fn select_transpose(&mut self, semitones: i32) -> Result<bool, ConfigError> {
        self.select_by(Group::Transpose, |s| {
            s.transpose.options().iter().find(|o| o.payload == semitones).map(|o| o.label.clone())
        })
    }

    pub fn select_shift(&mut self, shift: ShiftChoice) -> Result<bool, ConfigError> {
        self.select_by(Group::Shift, |s| {
            s.shift.options().iter().find(|o| o.payload == shift).map(|o| o.label.clone())
        })
    }

    pub fn select_combine_interval(&mut self, ms: u32) -> Result<bool, ConfigError> {
        self.select_by(Group::CombineInterval, |s| {
            s.combine_interval.options().iter().find(|o| o.payload == ms).map(|o| o.label.clone())
        })
    }

    /// Look up a label from the payload side, then go through [`select`](Self::select).
    fn select_by(
        &mut self,
        group: Group,
        find: impl Fn(&Selections) -> Option<String>,
    ) -> Result<bool, ConfigError> {
        let selections = &self.state()?.selections;
        let label = find(selections).ok_or_else(|| ConfigError::UnknownOption {
            group: group.name().to_string(),
            label: "<payload>".to_string(),
        })?;
        self.select(group, &label)
    }

    /// Flip an on/off switch; returns its new state.
    pub fn toggle(&mut self, switch: Switch) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.selections.switch_mut(switch)?.toggle())
    }

    /// Set an on/off switch; returns whether it changed.
    pub fn set_switch(&mut self, switch: Switch, on: bool) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.selections.switch_mut(switch)?.set(on))
    }

    // ── Tracks ──────────────────────────────────────────────────────

    pub fn set_track_visible(&mut self, index: usize, on: bool) -> Result<bool, ConfigError> {
        self.state_mut()?.tracks.set_visible(index, on)
    }

    pub fn set_track_muted(&mut self, index: usize, on: bool) -> Result<bool, ConfigError> {
        self.state_mut()?.tracks.set_muted(index, on)
    }

    pub fn toggle_track_visible(&mut self, index: usize) -> Result<bool, ConfigError> {
        self.state_mut()?.tracks.toggle_visible(index)
    }

    pub fn toggle_track_muted(&mut self, index: usize) -> Result<bool, ConfigError> {
        self.state_mut()?.tracks.toggle_muted(index)
    }

    pub fn select_all_tracks(&mut self) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.tracks.select_all())
    }

    pub fn deselect_all_tracks(&mut self) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.tracks.deselect_all())
    }

    pub fn mute_all_tracks(&mut self) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.tracks.mute_all())
    }

    pub fn unmute_all_tracks(&mut self) -> Result<bool, ConfigError> {
        Ok(self.state_mut()?.tracks.unmute_all())
    }

    // ── Collaborator inputs ─────────────────────────────────────────

    /// Replace the instrument assignment from the instrument dialog.
    pub fn set_instruments(&mut self, instruments: InstrumentTable) -> Result<bool, ConfigError> {
        let state = self.state_mut()?;
        let changed = state.instruments != instruments;
        state.instruments = instruments;
        Ok(changed)
    }

    /// Replace the loop dialog's measure range. Turning looping on or off
    /// goes through [`Switch::Loop`].
    pub fn set_loop(&mut self, selection: LoopSelection) -> Result<bool, ConfigError> {
        let state = self.state_mut()?;
        let changed = state.loop_selection != selection;
        state.loop_selection = selection;
        Ok(changed)
    }

    pub fn set_pause_time(&mut self, pulses: u32) -> Result<bool, ConfigError> {
        let state = self.state_mut()?;
        let changed = state.pause_time != pulses;
        state.pause_time = pulses;
        Ok(changed)
    }

    /// Replace the color dialog's palette. Kept across files.
    pub fn set_palette(&mut self, palette: ColorPalette) -> bool {
        let changed = self.palette != palette;
        self.palette = palette;
        changed
    }

    // ── Derivation ──────────────────────────────────────────────────

    pub fn derive(&self) -> Result<ConfigurationSnapshot, ConfigError> {
        let state = self.state()?;
        snapshot::derive(
            &state.selections,
            &state.tracks,
            &state.file,
            &state.instruments,
            &state.loop_selection,
            &self.palette,
            state.pause_time,
        )
    }
}
