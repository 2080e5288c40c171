//! Practice session state machine.
//!
//! Consumes live note-on/note-off events and advances through the current
//! exercise. Matching is intentionally exact-set: partially held chords do
//! not advance, and extra held notes outside the expected set block
//! advancement until they are released and the step is re-attempted.

pub mod dispatcher;

pub use dispatcher::{SessionCommand, SessionHandle, SessionUpdate};

use crate::exercise::Exercise;
use std::collections::BTreeSet;

/// Lifecycle of a practice attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    Active,
    Completed,
}

type HighlightCallback = Box<dyn FnMut(&BTreeSet<u8>) + Send>;
type CompletionCallback = Box<dyn FnMut() + Send>;

/// The mutable top-level orchestrator of a practice attempt.
///
/// Single-writer: one producer is expected to deliver `note_on`/`note_off`
/// sequentially. Concurrent producers need external serialization - see
/// [`dispatcher::SessionHandle`] for the channel-based way to get it.
pub struct PracticeSession {
    exercise: Exercise,
    step_index: usize,
    held: BTreeSet<u8>,
    state: SessionState,
    on_highlight: Option<HighlightCallback>,
    on_complete: Option<CompletionCallback>,
}

impl PracticeSession {
    pub fn new(exercise: Exercise) -> Self {
        PracticeSession {
            exercise,
            step_index: 0,
            held: BTreeSet::new(),
            state: SessionState::Inactive,
            on_highlight: None,
            on_complete: None,
        }
    }

    /// Register the callback fired with the expected note set whenever the
    /// highlighted step changes (empty set on completion).
    pub fn on_highlighted_notes_changed(
        &mut self,
        callback: impl FnMut(&BTreeSet<u8>) + Send + 'static,
    ) {
        self.on_highlight = Some(Box::new(callback));
    }

    /// Register the callback fired exactly once per Active -> Completed
    /// transition.
    pub fn on_exercise_completed(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Begin the attempt. Only valid from Inactive; anything else is a
    /// no-op.
    pub fn start(&mut self) {
        if self.state != SessionState::Inactive {
            return;
        }
        self.step_index = 0;
        self.held.clear();
        if self.exercise.is_empty() {
            // Nothing to practice; complete immediately
            self.state = SessionState::Completed;
            self.emit_highlight();
            self.emit_completed();
            return;
        }
        self.state = SessionState::Active;
        self.emit_highlight();
    }

    /// Return to Inactive from any state, clearing progress.
    pub fn reset(&mut self) {
        self.state = SessionState::Inactive;
        self.step_index = 0;
        self.held.clear();
    }

    /// Swap in a freshly generated exercise (settings changed) and reset.
    pub fn replace_exercise(&mut self, exercise: Exercise) {
        self.exercise = exercise;
        self.reset();
    }

    /// A key went down. Advances the step when the held set exactly equals
    /// the expected set.
    pub fn note_on(&mut self, note: u8) {
        if self.state != SessionState::Active {
            return;
        }
        self.held.insert(note);

        let matched = self
            .exercise
            .step(self.step_index)
            .is_some_and(|step| &self.held == step.notes());
        if !matched {
            return;
        }

        self.step_index += 1;
        self.held.clear();
        if self.step_index == self.exercise.len() {
            self.state = SessionState::Completed;
            self.emit_highlight();
            self.emit_completed();
        } else {
            self.emit_highlight();
        }
    }

    /// A key came up. Never undoes a step that already advanced.
    pub fn note_off(&mut self, note: u8) {
        self.held.remove(&note);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Current step index, in [0, steps.len()].
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Notes currently held down by the performer.
    pub fn held_notes(&self) -> &BTreeSet<u8> {
        &self.held
    }

    /// The expected note set of the current step; empty unless Active.
    pub fn highlighted_notes(&self) -> BTreeSet<u8> {
        if self.state != SessionState::Active {
            return BTreeSet::new();
        }
        self.exercise
            .step(self.step_index)
            .map(|step| step.notes().clone())
            .unwrap_or_default()
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    fn emit_highlight(&mut self) {
        let notes = self.highlighted_notes();
        if let Some(callback) = &mut self.on_highlight {
            callback(&notes);
        }
    }

    fn emit_completed(&mut self) {
        if let Some(callback) = &mut self.on_complete {
            callback();
        }
    }
}
