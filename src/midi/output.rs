//! MIDI output for virtual-keyboard playback.
//!
//! Thread-safe output handle using midir, with a channel-based architecture:
//! a dedicated thread owns the port connection and receives commands over an
//! mpsc channel.

use crate::midi::message::{all_notes_off_bytes, note_off_bytes, note_on_bytes};
use anyhow::{Result, anyhow};
use midir::{MidiOutput, MidiOutputConnection};
use std::sync::mpsc::{Sender, channel};
use std::thread::{self, JoinHandle};

/// Commands that can be sent to the MIDI output thread.
#[derive(Debug, Clone)]
enum OutputCommand {
    Connect { port_name: String },
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    AllNotesOff { channel: u8 },
    Disconnect,
    Shutdown,
}

/// Internal output handler that owns the connection.
struct OutputInternal {
    connection: Option<MidiOutputConnection>,
    command_rx: std::sync::mpsc::Receiver<OutputCommand>,
}

impl OutputInternal {
    fn new(command_rx: std::sync::mpsc::Receiver<OutputCommand>) -> Self {
        Self {
            connection: None,
            command_rx,
        }
    }

    fn connect(&mut self, port_name: &str) -> Result<()> {
        let midi_out = MidiOutput::new("Etude")?;
        let ports = midi_out.ports();

        let port = ports
            .iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .map(|name| name.contains(port_name))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("MIDI port '{}' not found", port_name))?;

        let connection = midi_out
            .connect(port, "etude-out")
            .map_err(|e| anyhow!("failed to open MIDI output: {}", e))?;
        self.connection = Some(connection);
        Ok(())
    }

    fn run(&mut self) {
        while let Ok(command) = self.command_rx.recv() {
            match command {
                OutputCommand::Connect { port_name } => {
                    if let Err(e) = self.connect(&port_name) {
                        eprintln!("MIDI connect error: {}", e);
                    }
                }
                OutputCommand::NoteOn {
                    channel,
                    note,
                    velocity,
                } => {
                    if let Some(conn) = &mut self.connection {
                        let _ = conn.send(&note_on_bytes(channel, note, velocity));
                    }
                }
                OutputCommand::NoteOff { channel, note } => {
                    if let Some(conn) = &mut self.connection {
                        let _ = conn.send(&note_off_bytes(channel, note));
                    }
                }
                OutputCommand::AllNotesOff { channel } => {
                    if let Some(conn) = &mut self.connection {
                        let _ = conn.send(&all_notes_off_bytes(channel));
                    }
                }
                OutputCommand::Disconnect => {
                    self.connection = None;
                }
                OutputCommand::Shutdown => {
                    // Silence everything before shutting down
                    if let Some(conn) = &mut self.connection {
                        for channel in 0..16u8 {
                            let _ = conn.send(&all_notes_off_bytes(channel));
                        }
                    }
                    break;
                }
            }
        }
    }
}

/// Thread-safe handle to the MIDI output, used by the application layer to
/// sound virtual-keyboard presses and exercise playback.
pub struct MidiOutputHandle {
    command_tx: Sender<OutputCommand>,
    _thread: JoinHandle<()>,
}

impl MidiOutputHandle {
    /// Create a new output handle (not connected to any port yet).
    pub fn new() -> Self {
        let (tx, rx) = channel();

        let thread = thread::spawn(move || {
            let mut internal = OutputInternal::new(rx);
            internal.run();
        });

        Self {
            command_tx: tx,
            _thread: thread,
        }
    }

    /// List available MIDI output ports.
    pub fn list_ports() -> Result<Vec<String>> {
        let midi_out = MidiOutput::new("Etude")?;
        let ports = midi_out.ports();
        Ok(ports
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect())
    }

    /// Connect to a MIDI output port by name (partial match supported).
    pub fn connect(&self, port_name: &str) -> Result<()> {
        self.command_tx
            .send(OutputCommand::Connect {
                port_name: port_name.to_string(),
            })
            .map_err(|e| anyhow!("failed to send connect command: {}", e))
    }

    /// Disconnect from the current MIDI port.
    pub fn disconnect(&self) -> Result<()> {
        self.command_tx
            .send(OutputCommand::Disconnect)
            .map_err(|e| anyhow!("failed to send disconnect: {}", e))
    }

    pub fn note_on(&self, channel: u8, note: u8, velocity: u8) -> Result<()> {
        self.command_tx
            .send(OutputCommand::NoteOn {
                channel,
                note,
                velocity,
            })
            .map_err(|e| anyhow!("failed to send note on: {}", e))
    }

    pub fn note_off(&self, channel: u8, note: u8) -> Result<()> {
        self.command_tx
            .send(OutputCommand::NoteOff { channel, note })
            .map_err(|e| anyhow!("failed to send note off: {}", e))
    }

    /// Sound a whole chord or exercise step at once.
    pub fn notes_on(&self, channel: u8, notes: &[u8], velocity: u8) -> Result<()> {
        for &note in notes {
            self.note_on(channel, note, velocity)?;
        }
        Ok(())
    }

    pub fn notes_off(&self, channel: u8, notes: &[u8]) -> Result<()> {
        for &note in notes {
            self.note_off(channel, note)?;
        }
        Ok(())
    }

    /// Send All Notes Off on all 16 channels (MIDI panic).
    pub fn panic_all(&self) -> Result<()> {
        for channel in 0..16u8 {
            self.command_tx
                .send(OutputCommand::AllNotesOff { channel })
                .map_err(|e| anyhow!("failed to send all notes off: {}", e))?;
        }
        Ok(())
    }
}

impl Default for MidiOutputHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MidiOutputHandle {
    fn drop(&mut self) {
        let _ = self.command_tx.send(OutputCommand::Shutdown);
    }
}
