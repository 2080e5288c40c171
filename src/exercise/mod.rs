//! Exercise model: ordered steps of notes expected to sound together.

pub mod generator;

pub use generator::{ExerciseKind, ExerciseSettings};

use colored::*;
use std::collections::BTreeSet;
use std::fmt;

/// How the exercise's notes are split between the performer's hands.
///
/// Left plays only the bass note of each chord, one octave below the base
/// octave; right plays the remaining upper notes at the base octave; both is
/// their union. Single-note steps are never subset - hand selection only
/// changes their octave placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSelection {
    Left,
    Right,
    Both,
}

impl HandSelection {
    pub const ALL: [HandSelection; 3] = [
        HandSelection::Left,
        HandSelection::Right,
        HandSelection::Both,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandSelection::Left => "left hand",
            HandSelection::Right => "right hand",
            HandSelection::Both => "both hands",
        }
    }
}

impl fmt::Display for HandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One unit of an exercise: the set of note numbers that must sound
/// concurrently, plus a label for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    notes: BTreeSet<u8>,
    label: String,
}

impl Step {
    /// Build a step. Steps are never empty; strategies guarantee this by
    /// construction.
    pub fn new(notes: BTreeSet<u8>, label: impl Into<String>) -> Self {
        debug_assert!(!notes.is_empty(), "exercise steps must not be empty");
        Step {
            notes,
            label: label.into(),
        }
    }

    pub fn notes(&self) -> &BTreeSet<u8> {
        &self.notes
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// An immutable ordered sequence of steps with display metadata.
///
/// Exercises are created once per settings change and replaced wholesale,
/// never patched in place during a practice attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    steps: Vec<Step>,
    kind_name: &'static str,
    title: String,
    hand: HandSelection,
}

impl Exercise {
    pub fn new(
        steps: Vec<Step>,
        kind_name: &'static str,
        title: String,
        hand: HandSelection,
    ) -> Self {
        Exercise {
            steps,
            kind_name,
            title,
            hand,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Exercise type tag, e.g. "scale" or "chord progression".
    pub fn kind_name(&self) -> &'static str {
        self.kind_name
    }

    /// Key/root plus quality description, e.g. "C major".
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hand(&self) -> HandSelection {
        self.hand
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} ({} steps)",
            self.title.cyan().bold(),
            self.kind_name,
            self.hand.name(),
            self.steps.len()
        )
    }
}
