//! End-to-end flow: generate an exercise, feed raw MIDI bytes through the
//! parser, and drive a practice session to completion.

use etude::{
    ExerciseKind, ExerciseSettings, HandSelection, PitchClass, PracticeSession, ScaleType,
    SessionState, parse_message,
};
use etude_core::ChordQuality;

fn play(session: &mut PracticeSession, bytes: &[u8]) {
    let event = parse_message(bytes).expect("valid message");
    match event.kind {
        etude::midi::EventKind::NoteOn { note, .. } => session.note_on(note),
        etude::midi::EventKind::NoteOff { note } => session.note_off(note),
        _ => {}
    }
}

#[test]
fn test_scale_exercise_played_from_raw_midi() {
    let settings = ExerciseSettings {
        kind: ExerciseKind::Scale {
            scale_type: ScaleType::Major,
        },
        root: PitchClass::C,
        hand: HandSelection::Right,
        start_octave: 4,
    };
    let exercise = settings.generate();
    assert_eq!(exercise.len(), 15);

    let notes: Vec<u8> = exercise
        .steps()
        .iter()
        .map(|step| *step.notes().iter().next().unwrap())
        .collect();

    let mut session = PracticeSession::new(exercise);
    session.start();
    assert!(session.is_active());

    for note in notes {
        play(&mut session, &[0x90, note, 100]);
        // Release via velocity-0 note-on, as many keyboards send it
        play(&mut session, &[0x90, note, 0]);
    }

    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn test_chord_exercise_requires_full_chord() {
    let settings = ExerciseSettings {
        kind: ExerciseKind::ChordsByType {
            quality: ChordQuality::Major,
            include_inversions: false,
        },
        root: PitchClass::C,
        hand: HandSelection::Right,
        start_octave: 4,
    };
    let exercise = settings.generate();
    assert_eq!(exercise.len(), 12);

    // First step: C major right hand, upper notes of [60, 64, 67]
    let first: Vec<u8> = exercise.steps()[0].notes().iter().copied().collect();
    assert_eq!(first, vec![64, 67]);

    let mut session = PracticeSession::new(exercise);
    session.start();

    play(&mut session, &[0x90, 64, 90]);
    assert_eq!(session.step_index(), 0);
    play(&mut session, &[0x90, 67, 90]);
    assert_eq!(session.step_index(), 1);

    // Realtime clock bytes in the stream are dropped by the parser
    assert!(parse_message(&[0xF8]).is_none());
}

#[test]
fn test_wrong_note_then_recovery() {
    let settings = ExerciseSettings {
        kind: ExerciseKind::Scale {
            scale_type: ScaleType::NaturalMinor,
        },
        root: PitchClass::A,
        hand: HandSelection::Right,
        start_octave: 3,
    };
    let mut session = PracticeSession::new(settings.generate());
    session.start();
    let expected = *session.highlighted_notes().iter().next().unwrap();
    assert_eq!(expected, 57);

    // Wrong note held down blocks the step
    play(&mut session, &[0x90, 58, 80]);
    play(&mut session, &[0x90, 57, 80]);
    assert_eq!(session.step_index(), 0);

    // Clear both keys and replay the right one
    play(&mut session, &[0x80, 58, 0]);
    play(&mut session, &[0x80, 57, 0]);
    play(&mut session, &[0x90, 57, 80]);
    assert_eq!(session.step_index(), 1);
}
