//! Performance-event parser.
//!
//! Turns raw transport-level byte sequences into typed performance events.
//! Malformed input is silently discarded: transient glitches on a live
//! stream must never crash playback, so the consumer simply sees no event.

use etude_core::note_name;
use std::fmt;

/// Maximum accepted raw message length; anything longer is discarded.
const MAX_MESSAGE_LEN: usize = 256;

/// MIDI timing clock status byte, ignored.
const STATUS_CLOCK: u8 = 0xF8;
/// Active sensing status byte, ignored.
const STATUS_ACTIVE_SENSE: u8 = 0xFE;

/// The typed payload of a performance event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    /// Pitch-bend amount normalized to [-1, 1].
    PitchBend { value: f32 },
    Other,
}

/// A single typed event decoded from the live performance stream.
/// Constructed per incoming message, immutable, discarded after use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceEvent {
    pub status: u8,
    /// 1-based channel (raw low nibble + 1).
    pub channel: u8,
    pub data1: u8,
    pub data2: u8,
    pub kind: EventKind,
}

/// Parse one raw message into a typed event.
///
/// Returns `None` for empty input, oversized input, data bytes above 127,
/// realtime clock/active-sense bytes, and any 2-byte message other than a
/// program change. Parsing is deterministic: the same bytes always yield
/// the same event.
pub fn parse_message(bytes: &[u8]) -> Option<PerformanceEvent> {
    if bytes.is_empty() || bytes.len() > MAX_MESSAGE_LEN {
        return None;
    }
    if bytes[1..].iter().any(|&byte| byte > 127) {
        return None;
    }

    let status = bytes[0];
    if status == STATUS_CLOCK || status == STATUS_ACTIVE_SENSE {
        return None;
    }
    let channel = (status & 0x0F) + 1;

    match bytes.len() {
        3 => {
            let data1 = bytes[1];
            let data2 = bytes[2];
            let kind = match status & 0xF0 {
                // A note-on with velocity zero is a note-off in disguise;
                // many keyboards only ever send 0x90.
                0x90 if data2 > 0 => EventKind::NoteOn {
                    note: data1,
                    velocity: data2,
                },
                0x90 => EventKind::NoteOff { note: data1 },
                0x80 => EventKind::NoteOff { note: data1 },
                0xB0 => EventKind::ControlChange {
                    controller: data1,
                    value: data2,
                },
                0xC0 => EventKind::ProgramChange { program: data1 },
                0xE0 => {
                    let raw = data1 as u16 + ((data2 as u16) << 7);
                    EventKind::PitchBend {
                        value: (raw as f32 / 16383.0) * 2.0 - 1.0,
                    }
                }
                _ => EventKind::Other,
            };
            Some(PerformanceEvent {
                status,
                channel,
                data1,
                data2,
                kind,
            })
        }
        2 => {
            if status & 0xF0 == 0xC0 {
                Some(PerformanceEvent {
                    status,
                    channel,
                    data1: bytes[1],
                    data2: 0,
                    kind: EventKind::ProgramChange { program: bytes[1] },
                })
            } else {
                None
            }
        }
        _ => None,
    }
}

impl fmt::Display for PerformanceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::NoteOn { note, velocity } => {
                write!(
                    f,
                    "ch{} note on {} vel {}",
                    self.channel,
                    note_name(note),
                    velocity
                )
            }
            EventKind::NoteOff { note } => {
                write!(f, "ch{} note off {}", self.channel, note_name(note))
            }
            EventKind::ControlChange { controller, value } => {
                write!(f, "ch{} cc {} = {}", self.channel, controller, value)
            }
            EventKind::ProgramChange { program } => {
                write!(f, "ch{} program {}", self.channel, program)
            }
            EventKind::PitchBend { value } => {
                write!(f, "ch{} pitch bend {:+.3}", self.channel, value)
            }
            EventKind::Other => {
                write!(
                    f,
                    "{:02X} {:02X} {:02X}",
                    self.status, self.data1, self.data2
                )
            }
        }
    }
}
