//! Raw message construction for virtual-keyboard playback.
//!
//! The byte triples built here are the exact mirror of what the parser
//! recognizes, so notes played back through the output handle round-trip
//! into the same event taxonomy.

/// Controller number for the All Notes Off control change.
pub const ALL_NOTES_OFF: u8 = 123;

/// Note On: `[0x90 | channel, note, velocity]`. Channel is the raw wire
/// channel (0-15).
pub fn note_on_bytes(channel: u8, note: u8, velocity: u8) -> [u8; 3] {
    [0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
}

/// Note Off: `[0x80 | channel, note, 0]`.
pub fn note_off_bytes(channel: u8, note: u8) -> [u8; 3] {
    [0x80 | (channel & 0x0F), note & 0x7F, 0]
}

/// All Notes Off control change: `[0xB0 | channel, 123, 0]`.
pub fn all_notes_off_bytes(channel: u8) -> [u8; 3] {
    [0xB0 | (channel & 0x0F), ALL_NOTES_OFF, 0]
}
