//! MIDI input adapter.
//!
//! Bridges a midir input port into the practice session: every raw message
//! is run through the performance-event parser and forwarded, already typed,
//! into a channel owned by the consumer. Malformed messages and realtime
//! bytes vanish here, so downstream code only ever sees valid events.

use crate::midi::parser::{PerformanceEvent, parse_message};
use anyhow::{Result, anyhow};
use crossbeam_channel::Sender;
use midir::{Ignore, MidiInput, MidiInputConnection};

/// An open MIDI input connection feeding parsed events into a channel.
/// Dropping the handle closes the connection and stops the stream.
pub struct MidiInputHandle {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl MidiInputHandle {
    /// List available MIDI input ports.
    pub fn list_ports() -> Result<Vec<String>> {
        let midi_in = MidiInput::new("Etude")?;
        let ports = midi_in.ports();
        Ok(ports
            .iter()
            .filter_map(|p| midi_in.port_name(p).ok())
            .collect())
    }

    /// Connect to an input port by name (partial match supported) and start
    /// forwarding parsed events into `event_tx`.
    pub fn connect(port_name: &str, event_tx: Sender<PerformanceEvent>) -> Result<Self> {
        let mut midi_in = MidiInput::new("Etude")?;
        midi_in.ignore(Ignore::None);
        let ports = midi_in.ports();

        let port = ports
            .iter()
            .find(|p| {
                midi_in
                    .port_name(p)
                    .map(|name| name.contains(port_name))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("MIDI port '{}' not found", port_name))?;

        let actual_name = midi_in.port_name(port)?;

        let connection = midi_in
            .connect(
                port,
                "etude-in",
                move |_timestamp, bytes, _| {
                    if let Some(event) = parse_message(bytes) {
                        let _ = event_tx.send(event);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("failed to open MIDI input: {}", e))?;

        Ok(Self {
            _connection: connection,
            port_name: actual_name,
        })
    }

    /// Name of the connected port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}
