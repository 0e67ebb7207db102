//! Analysis items and the symbol sequences derived from them.
//!
//! An analysis item is anything that exposes an ordered run of notes and a
//! final (reference) note: a whole chant or one of its phrases. From those
//! the analyses derive pitch classes, mode degrees relative to the final,
//! and adjacent note pairs.
//!
//! ```text
//! notes          D4  F4  A4  G4  F4  E4  D4
//! pitch classes  D   F   A   G   F   E   D
//! mode degrees   1   b3  5   4   b3  2   1      (final = D4)
//! note pairs     D-F F-A A-G G-F F-E E-D
//! ```

mod analysis;
mod note;

pub use analysis::{AnalysisType, Unit};
pub use note::{ModeDegree, Note, NotePair, Step};

use crate::error::{Error, Result};
use crate::modal::ModalCategory;

/// A piece or phrase that can be analysed.
pub trait AnalysisItem {
    /// Name used to key the item in a cluster tree.
    fn name(&self) -> &str;

    /// Notes in melodic order.
    fn notes(&self) -> &[Note];

    /// Modal classification assigned upstream.
    fn modal_category(&self) -> ModalCategory;

    /// Reference note for mode degrees; the last note by default.
    fn note_of_final(&self) -> Option<&Note> {
        self.notes().last()
    }

    /// Pitch-class labels of all notes.
    fn pitch_classes(&self) -> Vec<String> {
        self.notes().iter().map(Note::pitch_class_label).collect()
    }

    /// Mode-degree labels relative to the final.
    fn mode_degrees(&self) -> Vec<String> {
        match self.note_of_final() {
            Some(base) => self
                .notes()
                .iter()
                .map(|n| ModeDegree::from_note_pair(n, base).label())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Adjacent note pairs.
    fn note_pairs(&self) -> Vec<NotePair> {
        self.notes()
            .windows(2)
            .map(|w| NotePair(w[0], w[1]))
            .collect()
    }
}

/// A phrase (or a whole chant treated as one unit).
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    name: String,
    notes: Vec<Note>,
    modal_category: ModalCategory,
}

impl Phrase {
    /// Create a phrase; an empty note list is rejected.
    pub fn new(
        name: impl Into<String>,
        notes: Vec<Note>,
        modal_category: ModalCategory,
    ) -> Result<Self> {
        if notes.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            notes,
            modal_category,
        })
    }

    /// Create a phrase from whitespace-separated spellings (`"D4 F4 A4"`).
    pub fn parse(name: impl Into<String>, notes: &str, modal_category: ModalCategory) -> Result<Self> {
        let notes = notes
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Note>>>()?;
        Self::new(name, notes, modal_category)
    }
}

impl AnalysisItem for Phrase {
    fn name(&self) -> &str {
        &self.name
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn modal_category(&self) -> ModalCategory {
        self.modal_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_sequences() -> Result<()> {
        let p = Phrase::parse("p1", "D4 F4 A4 G4 F4 E4 D4", ModalCategory::DAuthentic)?;
        assert_eq!(p.pitch_classes(), ["D", "F", "A", "G", "F", "E", "D"]);
        assert_eq!(p.mode_degrees(), ["1", "b3", "5", "4", "b3", "2", "1"]);
        assert_eq!(p.note_pairs().len(), 6);
        assert_eq!(p.note_of_final().map(Note::to_string), Some("D4".to_string()));
        Ok(())
    }

    #[test]
    fn empty_phrase_is_rejected() {
        assert_eq!(
            Phrase::parse("p", "  ", ModalCategory::GPlagal).unwrap_err(),
            Error::EmptyInput
        );
    }
}
