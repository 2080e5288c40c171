//! Channel-based session runner.
//!
//! Owns a [`PracticeSession`] on a dedicated thread so that MIDI input
//! callbacks and UI code can talk to it without sharing state. Commands go
//! in through one channel; highlight and completion updates come back out
//! through another.

use crate::exercise::Exercise;
use crate::midi::parser::{EventKind, PerformanceEvent};
use crate::session::PracticeSession;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Commands accepted by the session thread.
pub enum SessionCommand {
    Start,
    Reset,
    Replace(Exercise),
    Event(PerformanceEvent),
    Shutdown,
}

/// Updates emitted by the session thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The expected note set changed; empty on completion.
    Highlight(BTreeSet<u8>),
    /// The exercise was finished.
    Completed,
}

/// Handle to a session running in its own thread.
///
/// Dropping the handle shuts the thread down.
pub struct SessionHandle {
    command_tx: Sender<SessionCommand>,
    update_rx: Receiver<SessionUpdate>,
    is_running: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Spawn the session thread around `exercise`.
    pub fn spawn(exercise: Exercise) -> SessionHandle {
        let (command_tx, command_rx) = unbounded();
        let (update_tx, update_rx) = unbounded();
        let is_running = Arc::new(AtomicBool::new(true));
        let is_running_clone = is_running.clone();

        let mut session = PracticeSession::new(exercise);
        let highlight_tx = update_tx.clone();
        session.on_highlighted_notes_changed(move |notes| {
            let _ = highlight_tx.send(SessionUpdate::Highlight(notes.clone()));
        });
        session.on_exercise_completed(move || {
            let _ = update_tx.send(SessionUpdate::Completed);
        });

        let runner = SessionRunner {
            session,
            command_rx,
            is_running: is_running_clone,
        };
        thread::spawn(move || runner.run_loop());

        SessionHandle {
            command_tx,
            update_rx,
            is_running,
        }
    }

    pub fn start(&self) {
        let _ = self.command_tx.send(SessionCommand::Start);
    }

    pub fn reset(&self) {
        let _ = self.command_tx.send(SessionCommand::Reset);
    }

    pub fn replace_exercise(&self, exercise: Exercise) {
        let _ = self.command_tx.send(SessionCommand::Replace(exercise));
    }

    /// Feed one parsed performance event.
    pub fn send_event(&self, event: PerformanceEvent) {
        let _ = self.command_tx.send(SessionCommand::Event(event));
    }

    /// A sender that accepts parsed events directly, suitable for
    /// [`MidiInputHandle::connect`](crate::midi::MidiInputHandle::connect).
    /// A forwarding thread wraps each event in [`SessionCommand::Event`];
    /// it exits when this sender is dropped or the session shuts down.
    pub fn event_sender(&self) -> Sender<PerformanceEvent> {
        let (event_tx, event_rx) = unbounded::<PerformanceEvent>();
        let command_tx = self.command_tx.clone();
        thread::spawn(move || {
            for event in event_rx.iter() {
                if command_tx.send(SessionCommand::Event(event)).is_err() {
                    break;
                }
            }
        });
        event_tx
    }

    /// The raw command sender, for producers that need the full command
    /// vocabulary rather than just events.
    pub fn command_sender(&self) -> Sender<SessionCommand> {
        self.command_tx.clone()
    }

    /// Receiver for highlight and completion updates.
    pub fn updates(&self) -> &Receiver<SessionUpdate> {
        &self.update_rx
    }

    pub fn shutdown(&self) {
        let _ = self.command_tx.send(SessionCommand::Shutdown);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct SessionRunner {
    session: PracticeSession,
    command_rx: Receiver<SessionCommand>,
    is_running: Arc<AtomicBool>,
}

impl SessionRunner {
    fn run_loop(mut self) {
        loop {
            match self.command_rx.recv() {
                Ok(cmd) => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        self.is_running.store(false, Ordering::Relaxed);
    }

    /// Handle a command, returns false if should shutdown
    fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Start => self.session.start(),
            SessionCommand::Reset => self.session.reset(),
            SessionCommand::Replace(exercise) => self.session.replace_exercise(exercise),
            SessionCommand::Event(event) => match event.kind {
                EventKind::NoteOn { note, .. } => self.session.note_on(note),
                EventKind::NoteOff { note } => self.session.note_off(note),
                _ => {}
            },
            SessionCommand::Shutdown => return false,
        }
        true
    }
}
