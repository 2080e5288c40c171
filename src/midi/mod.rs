// src/midi/mod.rs

pub mod input;
pub mod message;
pub mod output;
pub mod parser;

pub use input::MidiInputHandle;
pub use message::{all_notes_off_bytes, note_off_bytes, note_on_bytes};
pub use output::MidiOutputHandle;
pub use parser::{EventKind, PerformanceEvent, parse_message};
