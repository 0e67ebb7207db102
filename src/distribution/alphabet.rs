//! Fixed, ordered symbol alphabets.

use core::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pitch classes occurring in the repertoire, in canonical order.
pub const PITCH_CLASSES: [&str; 8] = ["A", "B-", "B", "C", "D", "E", "F", "G"];

/// Mode degrees relative to the final, including the lowered alterations.
pub const MODE_DEGREES: [&str; 12] = [
    "b1", "1", "b2", "2", "b3", "3", "4", "5", "b6", "6", "b7", "7",
];

/// Directed leaps of a perfect fifth between occurring pitch classes.
pub const LEAPS_L5: [&str; 14] = [
    "A_D", "A_E", "B-_F", "B_E", "C_F", "C_G", "D_A", "D_G", "E_A", "E_B", "F_B-", "F_C",
    "G_C", "G_D",
];

static PITCH_CLASS_ALPHABET: LazyLock<Alphabet> =
    LazyLock::new(|| Alphabet::from_static("pitch_class", &PITCH_CLASSES));
static MODE_DEGREE_ALPHABET: LazyLock<Alphabet> =
    LazyLock::new(|| Alphabet::from_static("mode_degree", &MODE_DEGREES));
static LEAP_L5_ALPHABET: LazyLock<Alphabet> =
    LazyLock::new(|| Alphabet::from_static("leap_l5", &LEAPS_L5));
static PITCH_CLASS_TENDENCY_ALPHABET: LazyLock<Alphabet> =
    LazyLock::new(|| Alphabet::transitions(&PITCH_CLASS_ALPHABET));
static MODE_DEGREE_TENDENCY_ALPHABET: LazyLock<Alphabet> =
    LazyLock::new(|| Alphabet::transitions(&MODE_DEGREE_ALPHABET));

/// A finite, totally ordered set of symbol labels.
///
/// Cloning is cheap (shared storage). Two alphabets are equal only when both
/// their names and their ordered symbols agree, so two alphabets of the same
/// length never compare equal by accident.
///
/// Symbols are laid out in rows of [`row_len`](Alphabet::row_len). Plain
/// alphabets are a single row; a transition alphabet has one row per source
/// symbol, and relative frequencies are taken within each row.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet(Arc<Inner>);

#[derive(PartialEq, Eq, Hash)]
struct Inner {
    name: String,
    symbols: Vec<String>,
    row_len: usize,
}

impl Alphabet {
    /// Create a caller-defined alphabet.
    ///
    /// Fails on an empty symbol list or on repeated symbols.
    pub fn custom<S: Into<String>>(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(Error::InvalidParameter {
                    name: "symbols",
                    message: format!("symbol '{s}' appears more than once"),
                });
            }
        }
        let row_len = symbols.len();
        Ok(Self(Arc::new(Inner {
            name: name.into(),
            symbols,
            row_len,
        })))
    }

    fn from_static(name: &str, symbols: &[&str]) -> Self {
        Self(Arc::new(Inner {
            name: name.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            row_len: symbols.len(),
        }))
    }

    /// Ordered pairs `<from>_<to>` over `base`, one row per source symbol.
    ///
    /// ```text
    /// base  A B C
    /// rows  A_A A_B A_C | B_A B_B B_C | C_A C_B C_C
    /// ```
    pub fn transitions(base: &Alphabet) -> Self {
        let symbols = base
            .symbols()
            .iter()
            .flat_map(|from| base.symbols().iter().map(move |to| format!("{from}_{to}")))
            .collect();
        Self(Arc::new(Inner {
            name: format!("{}_tendency", base.name()),
            symbols,
            row_len: base.len(),
        }))
    }

    /// Alphabet name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Symbols in canonical order.
    pub fn symbols(&self) -> &[String] {
        &self.0.symbols
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.symbols.len()
    }

    /// Symbols per normalization row; equals `len()` unless built by [`Alphabet::transitions`].
    pub fn row_len(&self) -> usize {
        self.0.row_len
    }

    /// Always false for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.0.symbols.is_empty()
    }

    /// Position of `symbol`, if it belongs to the alphabet.
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.0.symbols.iter().position(|s| s == symbol)
    }

    /// Position of `symbol`, or `InvalidSymbol`.
    pub(crate) fn require(&self, symbol: &str) -> Result<usize> {
        self.index_of(symbol).ok_or_else(|| Error::InvalidSymbol {
            alphabet: self.name().to_string(),
            symbol: symbol.to_string(),
        })
    }

    pub(crate) fn ensure_same(&self, other: &Alphabet) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(Error::AlphabetMismatch {
                expected: self.to_string(),
                found: other.to_string(),
            })
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({}: {:?})", self.name(), self.symbols())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.symbols().join(", "))
    }
}

/// The closed set of distribution kinds, each with its own alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    /// The eight occurring pitch classes.
    PitchClass,
    /// Twelve mode degrees relative to the final.
    ModeDegree,
    /// Directed leaps of a fifth.
    LeapL5,
    /// Transitions between successive pitch classes.
    PitchClassTendency,
    /// Transitions between successive mode degrees.
    ModeDegreeTendency,
}

impl DistributionKind {
    /// All kinds in canonical order.
    pub const ALL: [DistributionKind; 5] = [
        DistributionKind::PitchClass,
        DistributionKind::ModeDegree,
        DistributionKind::LeapL5,
        DistributionKind::PitchClassTendency,
        DistributionKind::ModeDegreeTendency,
    ];

    /// The alphabet this kind counts over.
    pub fn alphabet(self) -> Alphabet {
        match self {
            DistributionKind::PitchClass => PITCH_CLASS_ALPHABET.clone(),
            DistributionKind::ModeDegree => MODE_DEGREE_ALPHABET.clone(),
            DistributionKind::LeapL5 => LEAP_L5_ALPHABET.clone(),
            DistributionKind::PitchClassTendency => PITCH_CLASS_TENDENCY_ALPHABET.clone(),
            DistributionKind::ModeDegreeTendency => MODE_DEGREE_TENDENCY_ALPHABET.clone(),
        }
    }

    /// The all-zero distribution of this kind.
    pub fn zero_distribution(self) -> super::Distribution {
        super::Distribution::zero(&self.alphabet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_alphabets_are_shared() {
        let a = DistributionKind::PitchClass.alphabet();
        let b = DistributionKind::PitchClass.alphabet();
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a.len(), 8);
        assert_eq!(a.index_of("B-"), Some(1));
        assert_eq!(a.index_of("F#"), None);
    }

    #[test]
    fn same_length_alphabets_differ() {
        let a = Alphabet::custom("a", ["x", "y"]).unwrap();
        let b = Alphabet::custom("b", ["x", "y"]).unwrap();
        let c = Alphabet::custom("a", ["y", "x"]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Alphabet::custom("a", ["x", "y"]).unwrap());
        assert!(matches!(a.ensure_same(&b), Err(Error::AlphabetMismatch { .. })));
    }

    #[test]
    fn custom_rejects_empty_and_repeated() {
        assert_eq!(
            Alphabet::custom("e", Vec::<String>::new()).unwrap_err(),
            Error::EmptyInput
        );
        assert!(matches!(
            Alphabet::custom("r", ["x", "x"]),
            Err(Error::InvalidParameter { name: "symbols", .. })
        ));
    }

    #[test]
    fn kind_alphabet_sizes() {
        assert_eq!(DistributionKind::ModeDegree.alphabet().len(), 12);
        assert_eq!(DistributionKind::LeapL5.alphabet().len(), 14);
        assert_eq!(DistributionKind::LeapL5.zero_distribution().total(), 0);
        assert_eq!(DistributionKind::ModeDegreeTendency.alphabet().len(), 144);
    }

    #[test]
    fn transitions_are_row_major() {
        let abc = Alphabet::custom("abc", ["A", "B", "C"]).unwrap();
        assert_eq!(abc.row_len(), 3);
        let t = Alphabet::transitions(&abc);
        assert_eq!(t.name(), "abc_tendency");
        assert_eq!(t.len(), 9);
        assert_eq!(t.row_len(), 3);
        assert_eq!(&t.symbols()[..4], ["A_A", "A_B", "A_C", "B_A"]);

        let pcs = DistributionKind::PitchClassTendency.alphabet();
        assert_eq!(pcs.index_of("B-_C"), Some(8 + 3));
        assert_ne!(pcs, DistributionKind::LeapL5.alphabet());
    }
}
