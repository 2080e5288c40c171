use crate::types::chord::{Chord, ChordQuality, Inversion};
use crate::types::note::{PitchClass, note_number};
use std::fmt;

/// Scale types with their fixed seven-step interval patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
}

impl ScaleType {
    pub const ALL: [ScaleType; 8] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
    ];

    /// Semitone steps between successive scale degrees. Every pattern sums
    /// to 12 across the seven steps.
    pub fn steps(self) -> [u8; 7] {
        match self {
            ScaleType::Major => [2, 2, 1, 2, 2, 2, 1],
            ScaleType::NaturalMinor => [2, 1, 2, 2, 1, 2, 2],
            ScaleType::HarmonicMinor => [2, 1, 2, 2, 1, 3, 1],
            ScaleType::MelodicMinor => [2, 1, 2, 2, 2, 2, 1],
            ScaleType::Dorian => [2, 1, 2, 2, 2, 1, 2],
            ScaleType::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            ScaleType::Lydian => [2, 2, 2, 1, 2, 2, 1],
            ScaleType::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural minor",
            ScaleType::HarmonicMinor => "harmonic minor",
            ScaleType::MelodicMinor => "melodic minor",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scale: a root pitch class plus a scale type. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    root: PitchClass,
    scale_type: ScaleType,
}

impl Scale {
    pub fn new(root: PitchClass, scale_type: ScaleType) -> Self {
        Scale { root, scale_type }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Display name, e.g. "F# harmonic minor".
    pub fn name(&self) -> String {
        format!("{} {}", self.root, self.scale_type.name())
    }

    /// The seven scale-degree pitch classes, root first.
    pub fn pitch_classes(&self) -> [PitchClass; 7] {
        let steps = self.scale_type.steps();
        let mut degrees = [self.root; 7];
        let mut current = self.root;
        for i in 1..7 {
            current = current.transposed(steps[i - 1] as i32);
            degrees[i] = current;
        }
        degrees
    }

    /// The full pitch-class sequence: seven degrees plus the octave repeat
    /// of the root.
    pub fn notes(&self) -> Vec<PitchClass> {
        let mut notes = self.pitch_classes().to_vec();
        notes.push(self.root);
        notes
    }

    /// Ascending note numbers for one octave of the scale, ending on the
    /// octave repeat of the root (8 notes).
    ///
    /// The working octave advances whenever a degree's semitone offset falls
    /// below the previous one's, so the output is strictly increasing. Notes
    /// that would land outside the MIDI range are skipped.
    pub fn midi_notes(&self, start_octave: i8) -> Vec<u8> {
        let mut octave = start_octave;
        let mut previous_semitone: Option<u8> = None;
        let mut out = Vec::with_capacity(8);
        for pitch_class in self.notes() {
            if let Some(prev) = previous_semitone {
                if pitch_class.semitone() < prev {
                    octave += 1;
                }
            }
            let number = note_number(pitch_class, octave);
            if (0..=127).contains(&number) {
                out.push(number as u8);
            }
            previous_semitone = Some(pitch_class.semitone());
        }
        out
    }

    /// The up-then-down practice sequence: the ascending octave followed by
    /// its reverse minus the peak note (15 notes). The result is a palindrome
    /// and the top note is never doubled.
    pub fn full_sequence(&self, start_octave: i8) -> Vec<u8> {
        let ascending = self.midi_notes(start_octave);
        let mut sequence = ascending.clone();
        sequence.extend(ascending.iter().rev().skip(1));
        sequence
    }

    /// Chord quality for each of the seven scale degrees, derived from the
    /// stacked-third intervals within the scale.
    ///
    /// Interval pairs (third, fifth-above-third): (4,3) major, (3,4) minor,
    /// (3,3) diminished, (4,4) augmented. Any other pair falls back to major;
    /// that branch is unreachable for the diatonic modes and only shows up
    /// for scales with an augmented second.
    pub fn diatonic_qualities(&self) -> [ChordQuality; 7] {
        let steps = self.scale_type.steps();
        // Absolute semitone position of each degree above the root.
        let mut positions = [0i32; 7];
        for i in 1..7 {
            positions[i] = positions[i - 1] + steps[i - 1] as i32;
        }

        let mut qualities = [ChordQuality::Major; 7];
        for (degree, quality) in qualities.iter_mut().enumerate() {
            let third_degree = (degree + 2) % 7;
            let fifth_degree = (degree + 4) % 7;
            let third = (positions[third_degree] - positions[degree]).rem_euclid(12);
            let fifth = (positions[fifth_degree] - positions[third_degree]).rem_euclid(12);
            *quality = match (third, fifth) {
                (4, 3) => ChordQuality::Major,
                (3, 4) => ChordQuality::Minor,
                (3, 3) => ChordQuality::Diminished,
                (4, 4) => ChordQuality::Augmented,
                _ => ChordQuality::Major,
            };
        }
        qualities
    }

    /// The seven diatonic triads of the scale, in root position.
    pub fn diatonic_chords(&self) -> Vec<Chord> {
        let degrees = self.pitch_classes();
        let qualities = self.diatonic_qualities();
        degrees
            .iter()
            .zip(qualities.iter())
            .map(|(&root, &quality)| Chord::new(root, quality, Inversion::Root))
            .collect()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
