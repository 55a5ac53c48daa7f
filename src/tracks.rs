//! Per-track display and mute flags.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::TrackInfo;

/// Which tracks are shown and which are muted. Both vectors are always
/// exactly as long as the loaded file's track list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelectionSet {
    visible: Vec<bool>,
    muted: Vec<bool>,
}

impl TrackSelectionSet {
    /// Seed the flags for a freshly loaded file. Every track starts shown
    /// and audible except percussion, which starts hidden and muted.
    pub fn for_tracks(tracks: &[TrackInfo]) -> Self {
        let visible = tracks.iter().map(|t| !t.is_percussion()).collect();
        let muted = tracks.iter().map(|t| t.is_percussion()).collect();
        Self { visible, muted }
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn muted(&self) -> &[bool] {
        &self.muted
    }

    fn check_index(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.visible.len() {
            Ok(())
        } else {
            Err(ConfigError::IndexOutOfRange {
                index,
                len: self.visible.len(),
            })
        }
    }

    pub fn is_visible(&self, index: usize) -> Result<bool, ConfigError> {
        self.check_index(index)?;
        Ok(self.visible[index])
    }

    pub fn is_muted(&self, index: usize) -> Result<bool, ConfigError> {
        self.check_index(index)?;
        Ok(self.muted[index])
    }

    /// Returns whether the flag changed.
    pub fn set_visible(&mut self, index: usize, on: bool) -> Result<bool, ConfigError> {
        self.check_index(index)?;
        let changed = self.visible[index] != on;
        if changed {
            debug!("track {index}: visible = {on}");
            self.visible[index] = on;
        }
        Ok(changed)
    }

    /// Returns whether the flag changed.
    pub fn set_muted(&mut self, index: usize, on: bool) -> Result<bool, ConfigError> {
        self.check_index(index)?;
        let changed = self.muted[index] != on;
        if changed {
            debug!("track {index}: muted = {on}");
            self.muted[index] = on;
        }
        Ok(changed)
    }

    pub fn toggle_visible(&mut self, index: usize) -> Result<bool, ConfigError> {
        let on = !self.is_visible(index)?;
        self.set_visible(index, on)?;
        Ok(on)
    }

    pub fn toggle_muted(&mut self, index: usize) -> Result<bool, ConfigError> {
        let on = !self.is_muted(index)?;
        self.set_muted(index, on)?;
        Ok(on)
    }

    pub fn select_all(&mut self) -> bool {
        fill(&mut self.visible, true)
    }

    pub fn deselect_all(&mut self) -> bool {
        fill(&mut self.visible, false)
    }

    pub fn mute_all(&mut self) -> bool {
        fill(&mut self.muted, true)
    }

    pub fn unmute_all(&mut self) -> bool {
        fill(&mut self.muted, false)
    }
}

/// Set every flag; report whether any of them changed.
fn fill(flags: &mut [bool], on: bool) -> bool {
    let changed = flags.iter().any(|&f| f != on);
    flags.iter_mut().for_each(|f| *f = on);
    changed
}
