//! sheetconfig — rendering and playback configuration engine for a MIDI
//! sheet music viewer.
//!
//! The viewer's menus and dialogs feed user choices into a
//! [`ConfigEngine`]; the engine keeps every radio group consistent, applies
//! cascading defaults, and derives an immutable [`ConfigurationSnapshot`]
//! for the renderer and the player.
//!
//! # Example
//! ```no_run
//! use sheetconfig::{ConfigEngine, FileSummary, Group};
//!
//! # fn load() -> FileSummary { unimplemented!() }
//! let mut engine = ConfigEngine::new();
//! engine.open(load()).unwrap();
//! if engine.select(Group::TimeSignature, "3/4").unwrap() {
//!     let snapshot = engine.derive().unwrap();
//!     println!("measure: {} pulses", snapshot.measure_pulses());
//! }
//! ```

pub mod cascade;
pub mod engine;
pub mod error;
pub mod keysig;
pub mod loop_range;
pub mod model;
pub mod selection;
pub mod selections;
pub mod snapshot;
pub mod timeshift;
pub mod tracks;

pub use cascade::{Cascade, CascadingDefaults, MeasureLengthDefault};
pub use engine::ConfigEngine;
pub use error::ConfigError;
pub use keysig::{KeyChoice, KeySignature};
pub use loop_range::{LoopRange, LoopSelection};
pub use model::*;
pub use selection::{SelectionGroup, SelectionOption, Toggle};
pub use selections::{Group, Selections, Switch, TimeSigChoice};
pub use snapshot::{derive, ConfigurationSnapshot};
pub use timeshift::ShiftChoice;
pub use tracks::TrackSelectionSet;

/// Convert a snapshot to a JSON string.
/// Useful for passing it across FFI boundaries to a native renderer.
pub fn snapshot_to_json(snapshot: &ConfigurationSnapshot) -> Result<String, String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| format!("JSON serialization error: {e}"))
}

/// Read a snapshot back from [`snapshot_to_json`] output.
pub fn snapshot_from_json(json: &str) -> Result<ConfigurationSnapshot, String> {
    serde_json::from_str(json).map_err(|e| format!("JSON deserialization error: {e}"))
}
