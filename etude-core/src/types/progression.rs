//! Chord progression construction.
//!
//! A "smooth" progression walks every diatonic chord of a key through an
//! inversion cycle, and the progressive-octave sequencer keeps the melodic
//! contour from leaping downward more than a fifth between chords.

use crate::types::chord::{Chord, Inversion};
use crate::types::scale::Scale;
use std::fmt;
use std::ops::Index;

/// Largest allowed drop (in semitones) from one chord's highest note to the
/// next chord's lowest before the next chord is re-voiced an octave higher.
const MAX_DOWNWARD_LEAP: i16 = 7;

/// An ordered sequence of chords.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    chords: Vec<Chord>,
}

impl Progression {
    pub fn new() -> Self {
        Progression { chords: Vec::new() }
    }

    pub fn from_chords(chords: Vec<Chord>) -> Self {
        Progression { chords }
    }

    /// The smooth inversion-aware progression of a key: each of the seven
    /// diatonic chords in root, first, second and again first inversion
    /// (28 chords total).
    pub fn smooth(scale: &Scale) -> Self {
        let cycle = [
            Inversion::Root,
            Inversion::First,
            Inversion::Second,
            Inversion::First,
        ];
        let mut chords = Vec::with_capacity(28);
        for chord in scale.diatonic_chords() {
            for inversion in cycle {
                chords.push(chord.with_inversion(inversion));
            }
        }
        Progression { chords }
    }

    pub fn push(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chord> {
        self.chords.get(index)
    }

    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    /// Voice the progression chord by chord with progressive octave
    /// placement.
    ///
    /// When the lowest note of the next chord would land more than a perfect
    /// fifth below the highest note of the previous chord, the next chord is
    /// re-voiced one octave higher - unless the higher voicing would push a
    /// member past the MIDI ceiling, in which case the original octave is
    /// kept.
    pub fn midi_sequence(&self, start_octave: i8) -> Vec<Vec<u8>> {
        let mut sequence: Vec<Vec<u8>> = Vec::with_capacity(self.chords.len());
        for chord in &self.chords {
            let mut voiced = chord.midi_notes(start_octave);
            if let Some(previous) = sequence.last() {
                if let (Some(&previous_high), Some(&low)) = (previous.last(), voiced.first()) {
                    if previous_high as i16 - low as i16 > MAX_DOWNWARD_LEAP {
                        let raised = chord.midi_notes(start_octave + 1);
                        // A shorter voicing means a member was dropped at the
                        // ceiling; keep the original octave in that case.
                        if raised.len() == voiced.len() {
                            voiced = raised;
                        }
                    }
                }
            }
            sequence.push(voiced);
        }
        sequence
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Progression {
    type Output = Chord;

    fn index(&self, index: usize) -> &Chord {
        &self.chords[index]
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.chords.iter().map(|c| c.symbol()).collect();
        write!(f, "{}", names.join(" - "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chord::ChordQuality;
    use crate::types::note::PitchClass;
    use crate::types::scale::ScaleType;

    fn c_major() -> Scale {
        Scale::new(PitchClass::C, ScaleType::Major)
    }

    #[test]
    fn test_smooth_progression_shape() {
        let progression = Progression::smooth(&c_major());
        assert_eq!(progression.len(), 28);

        // Every diatonic chord appears four times with the inversion cycle
        let expected_cycle = [
            Inversion::Root,
            Inversion::First,
            Inversion::Second,
            Inversion::First,
        ];
        for (i, chord) in progression.chords().enumerate() {
            assert_eq!(chord.inversion(), expected_cycle[i % 4]);
        }
        assert_eq!(progression[0].root(), PitchClass::C);
        assert_eq!(progression[4].root(), PitchClass::D);
        assert_eq!(progression[4].quality(), ChordQuality::Minor);
        assert_eq!(progression[24].root(), PitchClass::B);
        assert_eq!(progression[24].quality(), ChordQuality::Diminished);
    }

    #[test]
    fn test_midi_sequence_raises_on_large_leap() {
        let progression = Progression::smooth(&c_major());
        let sequence = progression.midi_sequence(4);
        assert_eq!(sequence.len(), 28);

        // C root, C 1st, C 2nd, then the repeated 1st inversion would drop a
        // twelfth below the 2nd-inversion peak, so it is re-voiced an octave
        // up; the following D minor root chord is raised for the same reason.
        assert_eq!(sequence[0], vec![60, 64, 67]);
        assert_eq!(sequence[1], vec![64, 67, 72]);
        assert_eq!(sequence[2], vec![67, 72, 76]);
        assert_eq!(sequence[3], vec![76, 79, 84]);
        assert_eq!(sequence[4], vec![74, 77, 81]);

        // Every voicing is either the base-octave or the raised rendering,
        // and a raise only ever happens to close a leap wider than a fifth.
        for (chord, voiced) in progression.chords().zip(sequence.iter()) {
            let base = chord.midi_notes(4);
            let raised = chord.midi_notes(5);
            assert!(
                *voiced == base || *voiced == raised,
                "{} voiced as {:?}",
                chord.name(),
                voiced
            );
        }
        for pair in sequence.windows(2) {
            let previous_high = *pair[0].last().unwrap() as i16;
            let low = *pair[1].first().unwrap() as i16;
            // A single raise closes the leap by an octave; what remains is
            // bounded by the original leap minus twelve.
            assert!(previous_high - low <= MAX_DOWNWARD_LEAP + 5);
        }
    }

    #[test]
    fn test_midi_sequence_chords_stay_voiced() {
        let progression = Progression::smooth(&c_major());
        for voicing in progression.midi_sequence(4) {
            assert_eq!(voicing.len(), 3);
            assert!(voicing.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_midi_sequence_respects_ceiling() {
        // Near the top of the range the octave raise would drop members, so
        // the original voicing is kept even when the leap rule fires.
        let progression = Progression::smooth(&c_major());
        let sequence = progression.midi_sequence(8);
        for voicing in &sequence {
            assert!(voicing.windows(2).all(|pair| pair[0] < pair[1]));
        }
        // Some voicings lose members to the ceiling instead of wrapping
        assert!(sequence.iter().any(|voicing| voicing.len() < 3));
        // A raise never shrinks a voicing; rejected raises keep the base
        for (chord, voiced) in progression.chords().zip(sequence.iter()) {
            assert_eq!(voiced.len(), chord.midi_notes(8).len());
        }
    }

    #[test]
    fn test_display_uses_symbols() {
        let mut progression = Progression::new();
        progression.push(Chord::new(
            PitchClass::C,
            ChordQuality::Major,
            Inversion::Root,
        ));
        progression.push(Chord::new(
            PitchClass::A,
            ChordQuality::Minor,
            Inversion::Root,
        ));
        assert_eq!(format!("{}", progression), "C - Am");
    }
}
