use crate::types::note::{PitchClass, note_number};
use std::fmt;

/// Arpeggio qualities with their semitone interval tables. Each table ends
/// on the explicit octave doubling of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArpeggioQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
}

impl ArpeggioQuality {
    pub const ALL: [ArpeggioQuality; 7] = [
        ArpeggioQuality::Major,
        ArpeggioQuality::Minor,
        ArpeggioQuality::Diminished,
        ArpeggioQuality::Augmented,
        ArpeggioQuality::DominantSeventh,
        ArpeggioQuality::MajorSeventh,
        ArpeggioQuality::MinorSeventh,
    ];

    /// Semitone offsets from the root, ascending through one octave.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ArpeggioQuality::Major => &[0, 4, 7, 12],
            ArpeggioQuality::Minor => &[0, 3, 7, 12],
            ArpeggioQuality::Diminished => &[0, 3, 6, 12],
            ArpeggioQuality::Augmented => &[0, 4, 8, 12],
            ArpeggioQuality::DominantSeventh => &[0, 4, 7, 10, 12],
            ArpeggioQuality::MajorSeventh => &[0, 4, 7, 11, 12],
            ArpeggioQuality::MinorSeventh => &[0, 3, 7, 10, 12],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArpeggioQuality::Major => "major",
            ArpeggioQuality::Minor => "minor",
            ArpeggioQuality::Diminished => "diminished",
            ArpeggioQuality::Augmented => "augmented",
            ArpeggioQuality::DominantSeventh => "dominant 7th",
            ArpeggioQuality::MajorSeventh => "major 7th",
            ArpeggioQuality::MinorSeventh => "minor 7th",
        }
    }
}

impl fmt::Display for ArpeggioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How far an arpeggio climbs before turning around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OctaveSpan {
    One,
    Two,
}

impl OctaveSpan {
    pub fn name(self) -> &'static str {
        match self {
            OctaveSpan::One => "one octave",
            OctaveSpan::Two => "two octaves",
        }
    }
}

/// An arpeggio: a root, a quality and an octave span. Immutable; note
/// sequences are computed fresh per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arpeggio {
    root: PitchClass,
    quality: ArpeggioQuality,
    span: OctaveSpan,
}

impl Arpeggio {
    pub fn new(root: PitchClass, quality: ArpeggioQuality, span: OctaveSpan) -> Self {
        Arpeggio {
            root,
            quality,
            span,
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ArpeggioQuality {
        self.quality
    }

    pub fn span(&self) -> OctaveSpan {
        self.span
    }

    /// Display name, e.g. "C minor 7th arpeggio (two octaves)".
    pub fn name(&self) -> String {
        format!(
            "{} {} arpeggio ({})",
            self.root,
            self.quality.name(),
            self.span.name()
        )
    }

    /// The pitch classes of the ascending run, octave bumps implied by the
    /// same rule family as scale generation.
    fn ascending_pitch_classes(&self) -> Vec<PitchClass> {
        let intervals = self.quality.intervals();
        let mut classes: Vec<PitchClass> = intervals
            .iter()
            .map(|&interval| self.root.transposed(interval as i32))
            .collect();
        if self.span == OctaveSpan::Two {
            // Second ascending octave: every non-root member again, one
            // octave up, ending on the doubled root.
            classes.extend(
                intervals[1..]
                    .iter()
                    .map(|&interval| self.root.transposed(interval as i32)),
            );
        }
        classes
    }

    /// The up-then-down practice sequence of note numbers. Ascending
    /// placement bumps the working octave whenever a pitch class's semitone
    /// offset falls below the previous one's; the descent replays the ascent
    /// in reverse without doubling the peak.
    pub fn midi_notes(&self, start_octave: i8) -> Vec<u8> {
        let mut octave = start_octave;
        let mut previous_semitone: Option<u8> = None;
        let mut ascent = Vec::new();
        for pitch_class in self.ascending_pitch_classes() {
            if let Some(prev) = previous_semitone {
                if pitch_class.semitone() < prev {
                    octave += 1;
                }
            }
            let number = note_number(pitch_class, octave);
            if (0..=127).contains(&number) {
                ascent.push(number as u8);
            }
            previous_semitone = Some(pitch_class.semitone());
        }

        let mut sequence = ascent.clone();
        sequence.extend(ascent.iter().rev().skip(1));
        sequence
    }
}

impl fmt::Display for Arpeggio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_octave_major() {
        let arpeggio = Arpeggio::new(PitchClass::C, ArpeggioQuality::Major, OctaveSpan::One);
        // C4 E4 G4 C5 G4 E4 C4
        assert_eq!(arpeggio.midi_notes(4), vec![60, 64, 67, 72, 67, 64, 60]);
    }

    #[test]
    fn test_two_octave_major() {
        let arpeggio = Arpeggio::new(PitchClass::C, ArpeggioQuality::Major, OctaveSpan::Two);
        let notes = arpeggio.midi_notes(4);
        // Ascends through both octaves, then the full descent
        assert_eq!(
            notes,
            vec![60, 64, 67, 72, 76, 79, 84, 79, 76, 72, 67, 64, 60]
        );
    }

    #[test]
    fn test_seventh_arpeggio() {
        let arpeggio = Arpeggio::new(
            PitchClass::C,
            ArpeggioQuality::DominantSeventh,
            OctaveSpan::One,
        );
        // C4 E4 G4 Bb4 C5 Bb4 G4 E4 C4
        assert_eq!(
            arpeggio.midi_notes(4),
            vec![60, 64, 67, 70, 72, 70, 67, 64, 60]
        );
    }

    #[test]
    fn test_wrapping_root() {
        // A major arpeggio wraps from C# back to... the octave bump fires on
        // every wrap of the semitone offset.
        let arpeggio = Arpeggio::new(PitchClass::A, ArpeggioQuality::Major, OctaveSpan::One);
        // A3 C#4 E4 A4 E4 C#4 A3
        assert_eq!(arpeggio.midi_notes(3), vec![57, 61, 64, 69, 64, 61, 57]);
    }

    #[test]
    fn test_palindrome_property() {
        for quality in ArpeggioQuality::ALL {
            for span in [OctaveSpan::One, OctaveSpan::Two] {
                for root in PitchClass::ALL {
                    let sequence = Arpeggio::new(root, quality, span).midi_notes(3);
                    let n = sequence.len();
                    for i in 0..n {
                        assert_eq!(sequence[i], sequence[n - 1 - i]);
                    }
                    let peak = *sequence.iter().max().unwrap();
                    assert_eq!(
                        sequence.iter().filter(|&&x| x == peak).count(),
                        1,
                        "peak doubled for {} {:?}",
                        root,
                        quality
                    );
                }
            }
        }
    }

    #[test]
    fn test_ascent_is_strictly_increasing() {
        for quality in ArpeggioQuality::ALL {
            for root in PitchClass::ALL {
                let sequence =
                    Arpeggio::new(root, quality, OctaveSpan::Two).midi_notes(3);
                let ascent_len = sequence.len() / 2 + 1;
                let ascent = &sequence[..ascent_len];
                assert!(
                    ascent.windows(2).all(|pair| pair[0] < pair[1]),
                    "{} {:?} ascent not increasing: {:?}",
                    root,
                    quality,
                    ascent
                );
            }
        }
    }

    #[test]
    fn test_names() {
        let arpeggio = Arpeggio::new(
            PitchClass::FSharp,
            ArpeggioQuality::MinorSeventh,
            OctaveSpan::Two,
        );
        assert_eq!(arpeggio.name(), "F# minor 7th arpeggio (two octaves)");
    }
}
