use crate::types::note::{PitchClass, note_number};
#[cfg(feature = "colored")]
use colored::*;
use std::fmt;

/// Triad qualities with their semitone interval tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 4] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
    ];

    /// Semitone offsets of root, third and fifth from the chord root.
    pub fn intervals(self) -> [u8; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
            ChordQuality::Diminished => [0, 3, 6],
            ChordQuality::Augmented => [0, 4, 8],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
        }
    }

    /// Short chord-symbol suffix ("Cm", "Bdim", ...).
    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Triad inversions as cyclic rotations of the root-position note order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inversion {
    Root,
    First,
    Second,
}

impl Inversion {
    pub const ALL: [Inversion; 3] = [Inversion::Root, Inversion::First, Inversion::Second];

    /// Indices into the root-position triad, lowest voice first.
    fn rotation(self) -> [usize; 3] {
        match self {
            Inversion::Root => [0, 1, 2],
            Inversion::First => [1, 2, 0],
            Inversion::Second => [2, 0, 1],
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Inversion::Root => "",
            Inversion::First => " (1st inversion)",
            Inversion::Second => " (2nd inversion)",
        }
    }
}

/// Upper bound on octave bumps while voicing a single chord member.
/// The MIDI range spans just under eleven octaves, so a member that still
/// collides after this many bumps cannot fit and is dropped.
const OCTAVE_BUMP_CAP: u8 = 11;

/// A triad built from a root, a quality and an inversion.
///
/// Chords are constructed fresh per query and never mutated; `midi_notes`
/// is a pure function of the chord and the requested octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chord {
    root: PitchClass,
    quality: ChordQuality,
    inversion: Inversion,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality, inversion: Inversion) -> Self {
        Chord {
            root,
            quality,
            inversion,
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn inversion(&self) -> Inversion {
        self.inversion
    }

    /// Return this chord re-voiced with a different inversion.
    pub fn with_inversion(&self, inversion: Inversion) -> Self {
        Chord::new(self.root, self.quality, inversion)
    }

    /// The triad's pitch classes in voicing order, lowest voice first.
    pub fn pitch_classes(&self) -> [PitchClass; 3] {
        let intervals = self.quality.intervals();
        let unrotated = [
            self.root,
            self.root.transposed(intervals[1] as i32),
            self.root.transposed(intervals[2] as i32),
        ];
        let rotation = self.inversion.rotation();
        [
            unrotated[rotation[0]],
            unrotated[rotation[1]],
            unrotated[rotation[2]],
        ]
    }

    /// Display name, e.g. "C# minor (1st inversion)".
    pub fn name(&self) -> String {
        format!(
            "{} {}{}",
            self.root,
            self.quality.name(),
            self.inversion.suffix()
        )
    }

    /// Short symbol, e.g. "C#m".
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.quality.symbol())
    }

    /// Voice the chord at the given octave as an ascending list of note
    /// numbers.
    ///
    /// Each member starts at the supplied octave and is bumped up an octave
    /// (bounded by a small cap) until it sounds strictly above the previously
    /// emitted note. A member that cannot fit below the MIDI ceiling is
    /// dropped rather than wrapped. Non-root inversions whose lowest voice
    /// would start below the unrotated root are shifted up a whole octave
    /// first, so inversions climb rather than drop.
    pub fn midi_notes(&self, octave: i8) -> Vec<u8> {
        let members = self.pitch_classes();

        let mut base_octave = octave;
        if self.inversion != Inversion::Root
            && note_number(members[0], octave) < note_number(self.root, octave)
        {
            base_octave += 1;
        }

        let mut notes = Vec::with_capacity(3);
        let mut previous: Option<i16> = None;
        for &member in &members {
            let mut candidate = note_number(member, base_octave);
            if let Some(prev) = previous {
                let mut bumps = 0;
                while candidate <= prev && candidate < 127 && bumps < OCTAVE_BUMP_CAP {
                    candidate += 12;
                    bumps += 1;
                }
                if candidate <= prev {
                    continue;
                }
            }
            if !(0..=127).contains(&candidate) {
                continue;
            }
            notes.push(candidate as u8);
            previous = Some(candidate);
        }
        notes
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.quality {
            ChordQuality::Major => self.name().blue().bold(),
            ChordQuality::Minor => self.name().red().bold(),
            ChordQuality::Diminished => self.name().purple().bold(),
            ChordQuality::Augmented => self.name().bright_red().bold(),
        };
        write!(f, "{}", name)
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
