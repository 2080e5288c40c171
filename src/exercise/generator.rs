//! Exercise strategies.
//!
//! Each practice mode composes the core generators into an ordered list of
//! steps. Selections are a closed enum, so a nonsensical key/quality
//! combination cannot be expressed at all - there is no fallible path here.

use crate::exercise::{Exercise, HandSelection, Step};
use etude_core::{
    Arpeggio, ArpeggioQuality, Chord, ChordQuality, Inversion, OctaveSpan, PitchClass,
    Progression, Scale, ScaleType, note_name,
};
use std::collections::BTreeSet;

/// The practice mode together with the settings that only make sense for
/// that mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    Scale {
        scale_type: ScaleType,
    },
    ChordsByKey {
        scale_type: ScaleType,
        include_inversions: bool,
    },
    ChordsByType {
        quality: ChordQuality,
        include_inversions: bool,
    },
    ChordProgression {
        scale_type: ScaleType,
    },
    Arpeggio {
        quality: ArpeggioQuality,
        span: OctaveSpan,
    },
}

impl ExerciseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Scale { .. } => "scale",
            ExerciseKind::ChordsByKey { .. } => "chords in key",
            ExerciseKind::ChordsByType { .. } => "chords by type",
            ExerciseKind::ChordProgression { .. } => "chord progression",
            ExerciseKind::Arpeggio { .. } => "arpeggio",
        }
    }
}

/// Everything needed to build an exercise. Regeneration is cheap enough to
/// run on every settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseSettings {
    pub kind: ExerciseKind,
    pub root: PitchClass,
    pub hand: HandSelection,
    pub start_octave: i8,
}

impl ExerciseSettings {
    /// Build the exercise for these settings.
    pub fn generate(&self) -> Exercise {
        let steps = match self.kind {
            ExerciseKind::Scale { scale_type } => {
                let scale = Scale::new(self.root, scale_type);
                single_note_steps(&scale.full_sequence(self.start_octave), self.hand)
            }
            ExerciseKind::ChordsByKey {
                scale_type,
                include_inversions,
            } => {
                let scale = Scale::new(self.root, scale_type);
                let mut steps = Vec::new();
                for chord in scale.diatonic_chords() {
                    for inversion in inversion_cycle(include_inversions) {
                        let voiced = chord.with_inversion(*inversion);
                        steps.extend(chord_step(&voiced, self.start_octave, self.hand));
                    }
                }
                steps
            }
            ExerciseKind::ChordsByType {
                quality,
                include_inversions,
            } => {
                let mut steps = Vec::new();
                for root in PitchClass::ALL {
                    for inversion in inversion_cycle(include_inversions) {
                        let chord = Chord::new(root, quality, *inversion);
                        steps.extend(chord_step(&chord, self.start_octave, self.hand));
                    }
                }
                steps
            }
            ExerciseKind::ChordProgression { scale_type } => {
                let scale = Scale::new(self.root, scale_type);
                let progression = Progression::smooth(&scale);
                let voicings = progression.midi_sequence(self.start_octave);
                progression
                    .chords()
                    .zip(voicings.iter())
                    .filter_map(|(chord, voicing)| {
                        hand_selected(voicing, self.hand).map(|notes| Step::new(notes, chord.name()))
                    })
                    .collect()
            }
            ExerciseKind::Arpeggio { quality, span } => {
                let arpeggio = Arpeggio::new(self.root, quality, span);
                single_note_steps(&arpeggio.midi_notes(self.start_octave), self.hand)
            }
        };

        Exercise::new(steps, self.kind.name(), self.title(), self.hand)
    }

    /// Key/root plus quality description for the UI, e.g. "C major" or
    /// "F# minor 7th arpeggio (two octaves)".
    fn title(&self) -> String {
        match self.kind {
            ExerciseKind::Scale { scale_type } => Scale::new(self.root, scale_type).name(),
            ExerciseKind::ChordsByKey { scale_type, .. } => {
                Scale::new(self.root, scale_type).name()
            }
            ExerciseKind::ChordsByType { quality, .. } => format!("{} chords", quality.name()),
            ExerciseKind::ChordProgression { scale_type } => {
                Scale::new(self.root, scale_type).name()
            }
            ExerciseKind::Arpeggio { quality, span } => {
                Arpeggio::new(self.root, quality, span).name()
            }
        }
    }
}

fn inversion_cycle(include_inversions: bool) -> &'static [Inversion] {
    if include_inversions {
        &Inversion::ALL
    } else {
        &[Inversion::Root]
    }
}

/// Shift a note one octave down, keeping it unchanged when the shift would
/// leave the keyboard entirely.
fn octave_below(note: u8) -> u8 {
    note.checked_sub(12).unwrap_or(note)
}

/// Steps for a single-note run (scales, arpeggios). Hand selection never
/// subsets the run; it only moves the octave placement, and "both" doubles
/// each note at the lower octave.
fn single_note_steps(notes: &[u8], hand: HandSelection) -> Vec<Step> {
    notes
        .iter()
        .map(|&note| {
            let mut set = BTreeSet::new();
            match hand {
                HandSelection::Left => {
                    set.insert(octave_below(note));
                }
                HandSelection::Right => {
                    set.insert(note);
                }
                HandSelection::Both => {
                    set.insert(octave_below(note));
                    set.insert(note);
                }
            }
            Step::new(set, note_name(note))
        })
        .collect()
}

/// Apply hand selection to one chord voicing. Returns `None` when the
/// selection has no notes to play (a fully dropped voicing).
fn hand_selected(voicing: &[u8], hand: HandSelection) -> Option<BTreeSet<u8>> {
    let (&lowest, upper) = voicing.split_first()?;
    // A voicing reduced to one note behaves like a single-note step
    if upper.is_empty() {
        let mut set = BTreeSet::new();
        match hand {
            HandSelection::Left => {
                set.insert(octave_below(lowest));
            }
            HandSelection::Right => {
                set.insert(lowest);
            }
            HandSelection::Both => {
                set.insert(octave_below(lowest));
                set.insert(lowest);
            }
        }
        return Some(set);
    }

    let mut set = BTreeSet::new();
    match hand {
        HandSelection::Left => {
            set.insert(octave_below(lowest));
        }
        HandSelection::Right => {
            set.extend(upper.iter().copied());
        }
        HandSelection::Both => {
            set.insert(octave_below(lowest));
            set.extend(upper.iter().copied());
        }
    }
    Some(set)
}

/// Build the step for one chord, if any notes survive voicing.
fn chord_step(chord: &Chord, octave: i8, hand: HandSelection) -> Option<Step> {
    let voicing = chord.midi_notes(octave);
    hand_selected(&voicing, hand).map(|notes| Step::new(notes, chord.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(kind: ExerciseKind, hand: HandSelection) -> ExerciseSettings {
        ExerciseSettings {
            kind,
            root: PitchClass::C,
            hand,
            start_octave: 4,
        }
    }

    #[test]
    fn test_scale_exercise() {
        let exercise = settings(
            ExerciseKind::Scale {
                scale_type: ScaleType::Major,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(exercise.len(), 15);
        assert_eq!(exercise.kind_name(), "scale");
        assert_eq!(exercise.title(), "C major");
        // Single-note steps at the base octave
        assert_eq!(
            exercise.step(0).unwrap().notes().iter().copied().collect::<Vec<_>>(),
            vec![60]
        );
        assert_eq!(exercise.step(0).unwrap().label(), "C4");
    }

    #[test]
    fn test_scale_left_hand_shifts_down() {
        let right = settings(
            ExerciseKind::Scale {
                scale_type: ScaleType::Major,
            },
            HandSelection::Right,
        )
        .generate();
        let left = settings(
            ExerciseKind::Scale {
                scale_type: ScaleType::Major,
            },
            HandSelection::Left,
        )
        .generate();
        for (r, l) in right.steps().iter().zip(left.steps().iter()) {
            let r_note = *r.notes().iter().next().unwrap();
            let l_note = *l.notes().iter().next().unwrap();
            assert_eq!(l_note, r_note - 12);
        }
    }

    #[test]
    fn test_chords_by_key_counts() {
        let without = settings(
            ExerciseKind::ChordsByKey {
                scale_type: ScaleType::Major,
                include_inversions: false,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(without.len(), 7);

        let with = settings(
            ExerciseKind::ChordsByKey {
                scale_type: ScaleType::Major,
                include_inversions: true,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(with.len(), 21);
        assert_eq!(with.steps()[0].label(), "C major");
        assert_eq!(with.steps()[1].label(), "C major (1st inversion)");
    }

    #[test]
    fn test_chords_by_type_covers_all_roots() {
        let exercise = settings(
            ExerciseKind::ChordsByType {
                quality: ChordQuality::Minor,
                include_inversions: false,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(exercise.len(), 12);
        assert_eq!(exercise.title(), "minor chords");
        assert_eq!(exercise.steps()[0].label(), "C minor");
        assert_eq!(exercise.steps()[11].label(), "B minor");
    }

    #[test]
    fn test_progression_exercise() {
        let exercise = settings(
            ExerciseKind::ChordProgression {
                scale_type: ScaleType::Major,
            },
            HandSelection::Both,
        )
        .generate();
        assert_eq!(exercise.len(), 28);
    }

    #[test]
    fn test_arpeggio_exercise() {
        let exercise = settings(
            ExerciseKind::Arpeggio {
                quality: ArpeggioQuality::Major,
                span: OctaveSpan::One,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(exercise.len(), 7);
        assert_eq!(exercise.title(), "C major arpeggio (one octave)");
    }

    #[test]
    fn test_hand_selection_union_invariant() {
        // both.notes == left.notes ∪ right.notes for every chord-bearing step
        let kinds = [
            ExerciseKind::ChordsByKey {
                scale_type: ScaleType::Major,
                include_inversions: true,
            },
            ExerciseKind::ChordsByType {
                quality: ChordQuality::Major,
                include_inversions: true,
            },
            ExerciseKind::ChordProgression {
                scale_type: ScaleType::NaturalMinor,
            },
        ];
        for kind in kinds {
            let left = settings(kind, HandSelection::Left).generate();
            let right = settings(kind, HandSelection::Right).generate();
            let both = settings(kind, HandSelection::Both).generate();
            assert_eq!(left.len(), right.len());
            assert_eq!(left.len(), both.len());
            for ((l, r), b) in left
                .steps()
                .iter()
                .zip(right.steps().iter())
                .zip(both.steps().iter())
            {
                let union: BTreeSet<u8> = l.notes().union(r.notes()).copied().collect();
                assert_eq!(&union, b.notes(), "union invariant broken at {}", b.label());
            }
        }
    }

    #[test]
    fn test_left_hand_chord_is_bass_only() {
        let exercise = settings(
            ExerciseKind::ChordsByKey {
                scale_type: ScaleType::Major,
                include_inversions: false,
            },
            HandSelection::Left,
        )
        .generate();
        // C major root position voices as [60, 64, 67]; left hand takes the
        // bass one octave down.
        assert_eq!(
            exercise.steps()[0].notes().iter().copied().collect::<Vec<_>>(),
            vec![48]
        );
    }

    #[test]
    fn test_right_hand_chord_is_upper_notes() {
        let exercise = settings(
            ExerciseKind::ChordsByKey {
                scale_type: ScaleType::Major,
                include_inversions: false,
            },
            HandSelection::Right,
        )
        .generate();
        assert_eq!(
            exercise.steps()[0].notes().iter().copied().collect::<Vec<_>>(),
            vec![64, 67]
        );
    }
}
