//! # Etude
//!
//! Etude is a Rust library for piano practice, pairing music-theory
//! generators with live MIDI performance matching. It builds scale, chord,
//! arpeggio and progression exercises, parses the performer's raw MIDI
//! stream into typed events, and tracks an attempt through a practice
//! session state machine.
//!
//! The theory generators themselves (notes, scales, chords, arpeggios,
//! progressions) live in the `etude-core` crate and are re-exported here.
//!
//! ## Modules
//!
//! - `exercise`: The exercise model and the strategies that compose core
//!   generators into ordered practice steps, including hand selection.
//! - `midi`: The performance-event parser, outgoing message builders, and
//!   midir-backed input/output adapters.
//! - `session`: The practice session state machine plus a channel-based
//!   runner for driving it from MIDI callbacks.

pub mod exercise;
pub mod midi;
pub mod session;

// Re-export commonly used types and functions for convenience
pub use crate::exercise::{Exercise, ExerciseKind, ExerciseSettings, HandSelection, Step};
pub use crate::midi::{MidiInputHandle, MidiOutputHandle, PerformanceEvent, parse_message};
pub use crate::session::{PracticeSession, SessionHandle, SessionState, SessionUpdate};
pub use etude_core::{
    Arpeggio, ArpeggioQuality, Chord, ChordQuality, Inversion, NoteInfo, OctaveSpan, PitchClass,
    Progression, Scale, ScaleType,
};
