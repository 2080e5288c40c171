use anyhow::{Result, anyhow};
use std::fmt;
use std::str::FromStr;

/// One of the 12 chromatic pitch classes, octave-independent.
/// Accidentals are spelled with sharps (C#, never Db).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All 12 pitch classes in chromatic order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone offset from C (0-11).
    pub fn semitone(self) -> u8 {
        self as u8
    }

    /// Look up a pitch class by its semitone offset from C.
    pub fn from_semitone(semitone: u8) -> Result<Self> {
        Self::ALL
            .get(semitone as usize)
            .copied()
            .ok_or_else(|| anyhow!("semitone offset must be 0-11, got {}", semitone))
    }

    /// Move by a number of semitones, wrapping within the octave.
    pub fn transposed(self, semitones: i32) -> Self {
        let index = (self as i32 + semitones).rem_euclid(12) as usize;
        Self::ALL[index]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PitchClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Flat spellings are accepted on input and mapped to their sharp
        // equivalents; display always uses sharps.
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(PitchClass::C),
            "C#" | "DB" => Ok(PitchClass::CSharp),
            "D" => Ok(PitchClass::D),
            "D#" | "EB" => Ok(PitchClass::DSharp),
            "E" => Ok(PitchClass::E),
            "F" => Ok(PitchClass::F),
            "F#" | "GB" => Ok(PitchClass::FSharp),
            "G" => Ok(PitchClass::G),
            "G#" | "AB" => Ok(PitchClass::GSharp),
            "A" => Ok(PitchClass::A),
            "A#" | "BB" => Ok(PitchClass::ASharp),
            "B" => Ok(PitchClass::B),
            other => Err(anyhow!("invalid pitch class name: {}", other)),
        }
    }
}

/// Convert a pitch class and octave to a MIDI-style note number.
/// MIDI note 60 = Middle C (C4 in scientific pitch notation).
/// Formula: note_number = (octave + 1) * 12 + semitone offset.
///
/// The result can fall outside 0-127 for extreme octaves; callers that need
/// a playable note must check the range themselves. Conversion never clamps.
pub fn note_number(pitch_class: PitchClass, octave: i8) -> i16 {
    (octave as i16 + 1) * 12 + pitch_class.semitone() as i16
}

/// A note number decoded back into pitch class, octave and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteInfo {
    pub pitch_class: PitchClass,
    pub octave: i8,
    pub name: String,
}

impl NoteInfo {
    /// Decode a note number into pitch class and octave.
    /// Fails for anything outside the MIDI range 0-127.
    pub fn from_number(number: i16) -> Result<Self> {
        if !(0..=127).contains(&number) {
            return Err(anyhow!(
                "note number {} is outside the MIDI range 0-127",
                number
            ));
        }
        let pitch_class = PitchClass::ALL[(number % 12) as usize];
        let octave = (number / 12 - 1) as i8;
        Ok(NoteInfo {
            pitch_class,
            octave,
            name: format!("{}{}", pitch_class, octave),
        })
    }
}

impl fmt::Display for NoteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Format a note number for display, falling back to the raw number when it
/// is out of range.
pub fn note_name(number: u8) -> String {
    match NoteInfo::from_number(number as i16) {
        Ok(info) => info.name,
        Err(_) => number.to_string(),
    }
}
