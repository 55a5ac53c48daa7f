//! Defaults in one group that depend on the choice made in another.
//!
//! Each [`Cascade`] names the group that triggers it. After a group's
//! active member changes, [`CascadingDefaults::run`] applies every rule
//! listening to that group. A rule may rewrite a dependent group's
//! default entry but never moves that group's active marker, so an
//! explicit user choice survives.

use log::debug;

use crate::model::TimingSummary;
use crate::selections::{default_measure_label, Group, Selections, TimeSigChoice};

pub trait Cascade {
    /// Group whose change triggers this rule.
    fn trigger(&self) -> Group;

    /// Recompute the dependent default. Returns whether anything changed.
    fn apply(&self, selections: &mut Selections, timing: &TimingSummary) -> bool;
}

/// Measure-length default follows the time signature: `numerator *
/// quarter` for 3/4 and 4/4, the file's native measure otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasureLengthDefault;

impl MeasureLengthDefault {
    pub fn default_measure(choice: TimeSigChoice, timing: &TimingSummary) -> u32 {
        match choice.numerator() {
            Some(n) => n * timing.pulses_per_quarter,
            None => timing.pulses_per_measure,
        }
    }
}

impl Cascade for MeasureLengthDefault {
    fn trigger(&self) -> Group {
        Group::TimeSignature
    }

    fn apply(&self, selections: &mut Selections, timing: &TimingSummary) -> bool {
        let choice = *selections.time_signature.active_payload();
        let pulses = Self::default_measure(choice, timing);

        let current = selections.measure_length.default_option().payload;
        if current == pulses {
            return false;
        }

        debug!(
            "measure length default {current} -> {pulses} pulses (active: '{}')",
            selections.measure_length.active_label()
        );
        selections
            .measure_length
            .rewrite_default(default_measure_label(pulses), pulses);
        true
    }
}

/// The registered rules.
pub struct CascadingDefaults {
    rules: Vec<Box<dyn Cascade>>,
}

impl Default for CascadingDefaults {
    fn default() -> Self {
        Self {
            rules: vec![Box::new(MeasureLengthDefault)],
        }
    }
}

impl std::fmt::Debug for CascadingDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.trigger()))
            .finish()
    }
}

impl CascadingDefaults {
    /// Run every rule triggered by `changed`. Returns whether any
    /// dependent default changed.
    pub fn run(&self, changed: Group, selections: &mut Selections, timing: &TimingSummary) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.trigger() == changed)
            .fold(false, |any, rule| rule.apply(selections, timing) || any)
    }
}
