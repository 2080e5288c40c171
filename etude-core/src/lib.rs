//! # Etude Core
//!
//! Etude Core is the music-theory engine behind the Etude piano practice
//! library. It deterministically generates musically correct, properly
//! voiced note sequences for scales, chords (with inversions), chord
//! progressions and arpeggios, honoring instrument range and voice-leading
//! constraints.
//!
//! Everything in this crate is a pure, synchronous, allocation-only
//! computation over immutable values: safe to call from any number of
//! threads without coordination.
//!
//! ## Modules
//!
//! - `types`: the core data structures - pitch classes, note-number
//!   conversion, scales, chords, arpeggios and progressions - along with
//!   their generation logic.

pub mod types;

// Re-export commonly used types and functions for convenience
pub use crate::types::{
    Arpeggio, ArpeggioQuality, Chord, ChordQuality, Inversion, NoteInfo, OctaveSpan, PitchClass,
    Progression, Scale, ScaleType, note_name, note_number,
};
