// src/types/mod.rs

pub mod arpeggio;
pub mod chord;
pub mod note;
pub mod progression;
pub mod scale;

pub use arpeggio::{Arpeggio, ArpeggioQuality, OctaveSpan};
pub use chord::{Chord, ChordQuality, Inversion};
pub use note::{NoteInfo, PitchClass, note_name, note_number};
pub use progression::Progression;
pub use scale::{Scale, ScaleType};
