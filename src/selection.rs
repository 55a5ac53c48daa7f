//! Radio-button style selection groups.
//!
//! A [`SelectionGroup`] holds an ordered list of labelled options, each
//! carrying a typed payload, with exactly one option active at any time.
//! The active member is stored as a single index, so switching is atomic:
//! there is no moment where zero or two options are active.
//!
//! Non-exclusive on/off switches (lyrics, measure numbers, color, loop)
//! use the degenerate [`Toggle`].

use log::{debug, trace};
use serde::Serialize;

use crate::error::ConfigError;

/// One selectable entry in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOption<T> {
    pub label: String,
    pub payload: T,
    /// The entry the group starts on and that cascades may rewrite
    pub is_default: bool,
}

impl<T> SelectionOption<T> {
    pub fn new(label: impl Into<String>, payload: T) -> Self {
        Self {
            label: label.into(),
            payload,
            is_default: false,
        }
    }

    pub fn default_choice(label: impl Into<String>, payload: T) -> Self {
        Self {
            label: label.into(),
            payload,
            is_default: true,
        }
    }
}

/// A mutually exclusive choice among named options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionGroup<T> {
    name: String,
    options: Vec<SelectionOption<T>>,
    active: usize,
}

impl<T> SelectionGroup<T> {
    /// Build a group from its options. Exactly one option must be flagged
    /// as the default; it becomes the active one.
    pub fn from_options(
        name: impl Into<String>,
        options: Vec<SelectionOption<T>>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let defaults = options.iter().filter(|o| o.is_default).count();
        if defaults != 1 {
            return Err(ConfigError::InvariantViolation {
                group: name,
                active: defaults,
            });
        }
        let active = options.iter().position(|o| o.is_default).unwrap_or(0);
        Ok(Self {
            name,
            options,
            active,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[SelectionOption<T>] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }

    /// Activate the option with the given label.
    ///
    /// Returns `Ok(false)` without touching anything when the option is
    /// already active, so callers can skip cascades and re-rendering.
    pub fn set_active(&mut self, label: &str) -> Result<bool, ConfigError> {
        let idx = self
            .options
            .iter()
            .position(|o| o.label == label)
            .ok_or_else(|| ConfigError::UnknownOption {
                group: self.name.clone(),
                label: label.to_string(),
            })?;

        if idx == self.active {
            trace!("{}: '{}' already active", self.name, label);
            return Ok(false);
        }

        debug!(
            "{}: '{}' -> '{}'",
            self.name, self.options[self.active].label, label
        );
        self.active = idx;
        Ok(true)
    }

    pub fn active_label(&self) -> &str {
        &self.options[self.active].label
    }

    pub fn active_payload(&self) -> &T {
        &self.options[self.active].payload
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, label: &str) -> bool {
        self.active_label() == label
    }

    /// True when the active option is the group's default entry.
    pub fn is_default_active(&self) -> bool {
        self.options[self.active].is_default
    }

    /// The default entry.
    pub fn default_option(&self) -> &SelectionOption<T> {
        self.options
            .iter()
            .find(|o| o.is_default)
            .unwrap_or(&self.options[0])
    }

    /// Rewrite the default entry's label and payload in place. The active
    /// marker does not move.
    pub fn rewrite_default(&mut self, label: String, payload: T) {
        if let Some(opt) = self.options.iter_mut().find(|o| o.is_default) {
            opt.label = label;
            opt.payload = payload;
        }
    }

    /// Verify the exactly-one-active invariant.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.active < self.options.len() {
            Ok(())
        } else {
            Err(ConfigError::InvariantViolation {
                group: self.name.clone(),
                active: 0,
            })
        }
    }
}

/// A single on/off switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toggle {
    name: String,
    on: bool,
}

impl Toggle {
    pub fn new(name: impl Into<String>, on: bool) -> Self {
        Self {
            name: name.into(),
            on,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flip the switch and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        debug!("{}: {}", self.name, if self.on { "on" } else { "off" });
        self.on
    }

    /// Set the switch; returns whether anything changed.
    pub fn set(&mut self, on: bool) -> bool {
        if self.on == on {
            return false;
        }
        self.toggle();
        true
    }
}
