//! Error types for the configuration engine.
//!
//! None of these are meant for the end user. They are programmer
//! contracts: a label that no group offers, a track index past the end
//! of the loaded file, or a group caught with the wrong number of active
//! members. Malformed-but-plausible numeric input (loop ranges) is
//! repaired instead of rejected and never reaches this type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested label is not one of the group's options.
    #[error("unknown option '{label}' in group '{group}'")]
    UnknownOption { group: String, label: String },

    /// A track index outside the loaded file's track count.
    #[error("track index {index} out of range (file has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A group observed with zero or several active members.
    #[error("group '{group}' has {active} active options, expected exactly one")]
    InvariantViolation { group: String, active: usize },

    /// A mutation or derivation was attempted with no file open.
    #[error("no file is loaded")]
    NoFileLoaded,
}
