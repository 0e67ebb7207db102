//! Pitched events and the symbols derived from them.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Semitone size of each diatonic degree above the final, in major-scale terms.
const NATURAL_DEGREE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Diatonic step name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// A
    A,
    /// B
    B,
}

impl Step {
    /// Diatonic index within the octave (C = 0).
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Semitones above C.
    pub fn semitones(self) -> i32 {
        NATURAL_DEGREE_SEMITONES[self as usize]
    }

    fn from_letter(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'C' => Step::C,
            'D' => Step::D,
            'E' => Step::E,
            'F' => Step::F,
            'G' => Step::G,
            'A' => Step::A,
            'B' => Step::B,
            _ => return None,
        })
    }

    fn letter(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }
}

/// A pitched note: step, chromatic alteration and octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    /// Diatonic step.
    pub step: Step,
    /// Alteration in semitones (-1 = flat, +1 = sharp).
    pub alter: i8,
    /// Octave number (middle C starts octave 4).
    pub octave: i8,
}

impl Note {
    /// Create a note.
    pub fn new(step: Step, alter: i8, octave: i8) -> Self {
        Self { step, alter, octave }
    }

    /// Absolute pitch in semitones (MIDI numbering).
    pub fn semitone(&self) -> i32 {
        12 * (self.octave as i32 + 1) + self.step.semitones() + self.alter as i32
    }

    /// Absolute diatonic position, used for step distances.
    pub fn diatonic_index(&self) -> i32 {
        7 * self.octave as i32 + self.step.index()
    }

    /// Pitch-class label: step letter, `-` per flat, `#` per sharp.
    pub fn pitch_class_label(&self) -> String {
        let mut s = String::with_capacity(3);
        s.push(self.step.letter());
        let accidental = if self.alter < 0 { '-' } else { '#' };
        for _ in 0..self.alter.unsigned_abs() {
            s.push(accidental);
        }
        s
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class_label(), self.octave)
    }
}

/// Parses spellings such as `D4`, `B-3` or `F#4`.
impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidNote(s.to_string());
        let mut chars = s.chars();
        let step = chars.next().and_then(Step::from_letter).ok_or_else(invalid)?;
        let rest = chars.as_str();
        let digits_at = rest
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (accidentals, octave) = rest.split_at(digits_at);
        let count = i8::try_from(accidentals.len()).map_err(|_| invalid())?;
        let alter = if accidentals.chars().all(|c| c == '-') {
            -count
        } else if accidentals.chars().all(|c| c == '#') {
            count
        } else {
            return Err(invalid());
        };
        let octave = octave.parse::<i8>().map_err(|_| invalid())?;
        Ok(Self::new(step, alter, octave))
    }
}

/// Two adjacent notes of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotePair(pub Note, pub Note);

impl NotePair {
    /// Signed interval in semitones (positive = ascending).
    pub fn semitones(&self) -> i32 {
        self.1.semitone() - self.0.semitone()
    }

    /// True for an ascending or descending perfect fifth.
    pub fn is_leap_of_fifth(&self) -> bool {
        self.semitones().abs() == 7
    }

    /// `<from>_<to>` label used by the leap alphabet.
    pub fn label(&self) -> String {
        format!("{}_{}", self.0.pitch_class_label(), self.1.pitch_class_label())
    }
}

/// Scale degree of a note relative to a reference note (usually the final).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeDegree {
    /// Diatonic degree, 1..=7.
    pub degree: u8,
    /// Alteration against the major-scale size of that degree.
    pub alter: i8,
}

impl ModeDegree {
    /// Degree of `note` above `base`, octave-reduced.
    pub fn from_note_pair(note: &Note, base: &Note) -> Self {
        let steps = (note.diatonic_index() - base.diatonic_index()).rem_euclid(7);
        let semis = (note.semitone() - base.semitone()).rem_euclid(12);
        let natural = NATURAL_DEGREE_SEMITONES[steps as usize];
        let alter = (semis - natural + 6).rem_euclid(12) - 6;
        Self {
            degree: steps as u8 + 1,
            alter: alter as i8,
        }
    }

    /// Label such as `b3`, `5` or `#4`.
    pub fn label(&self) -> String {
        let accidental = if self.alter < 0 { "b" } else { "#" };
        format!(
            "{}{}",
            accidental.repeat(self.alter.unsigned_abs() as usize),
            self.degree
        )
    }
}
