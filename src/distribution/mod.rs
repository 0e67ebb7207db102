//! Count distributions over fixed symbol alphabets.
//!
//! A [`Distribution`] tallies how often each symbol of an [`Alphabet`] occurs
//! in a sequence (pitch classes of a phrase, mode degrees relative to its
//! final, leaps of a fifth between adjacent notes, transitions from one
//! note to the next). Distributions are immutable: combining two yields a
//! new one.
//!
//! ```text
//! alphabet  A   B-  B   C   D   E   F   G
//! counts    3   0   1   2   6   1   4   2     total = 19
//! relative 15.8 0  5.3 10.5 31.6 5.3 21.1 10.5  (sums to 100)
//! ```
//!
//! Merging is element-wise addition and is only defined between
//! distributions over the same alphabet. [`Distribution::zero`] is the
//! identity, so a collection folds with [`Distribution::sum`].

mod alphabet;

pub use alphabet::{Alphabet, DistributionKind, LEAPS_L5, MODE_DEGREES, PITCH_CLASSES};

use serde::Serialize;

use crate::error::{Error, Result};

/// Absolute symbol counts over an alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    alphabet: Alphabet,
    counts: Vec<u64>,
}

impl Distribution {
    /// Tally `symbols` against `alphabet`.
    ///
    /// Fails with [`Error::InvalidSymbol`] on the first symbol outside the alphabet.
    pub fn from_symbols<I, S>(alphabet: &Alphabet, symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = vec![0u64; alphabet.len()];
        for symbol in symbols {
            counts[alphabet.require(symbol.as_ref())?] += 1;
        }
        Ok(Self {
            alphabet: alphabet.clone(),
            counts,
        })
    }

    /// Rebuild from an existing count vector in alphabet order.
    pub fn from_counts(alphabet: &Alphabet, counts: Vec<u64>) -> Result<Self> {
        if counts.len() != alphabet.len() {
            return Err(Error::AlphabetMismatch {
                expected: alphabet.to_string(),
                found: format!("count vector of length {}", counts.len()),
            });
        }
        Ok(Self {
            alphabet: alphabet.clone(),
            counts,
        })
    }

    /// The all-zero distribution, identity for [`merge`](Self::merge).
    pub fn zero(alphabet: &Alphabet) -> Self {
        Self {
            alphabet: alphabet.clone(),
            counts: vec![0; alphabet.len()],
        }
    }

    /// Element-wise sum of two distributions over the same alphabet.
    pub fn merge(&self, other: &Distribution) -> Result<Self> {
        self.alphabet.ensure_same(&other.alphabet)?;
        Ok(Self {
            alphabet: self.alphabet.clone(),
            counts: self
                .counts
                .iter()
                .zip(&other.counts)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Fold a collection, starting from the zero distribution of `alphabet`.
    pub fn sum<'a, I>(alphabet: &Alphabet, distributions: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Distribution>,
    {
        distributions
            .into_iter()
            .try_fold(Self::zero(alphabet), |acc, d| acc.merge(d))
    }

    /// The alphabet counted over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Counts in alphabet order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count for a single symbol.
    pub fn count(&self, symbol: &str) -> Result<u64> {
        Ok(self.counts[self.alphabet.require(symbol)?])
    }

    /// Total number of counted symbols.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Relative frequencies in percent.
    ///
    /// Each row of the alphabet is normalized on its own: a plain alphabet
    /// sums to 100, a transition alphabet gives the conditional distribution
    /// of the next symbol per source symbol. An empty row yields zeros
    /// rather than NaN.
    pub fn relative(&self) -> Profile {
        let mut values = Vec::with_capacity(self.counts.len());
        for row in self.counts.chunks(self.alphabet.row_len().max(1)) {
            let total: u64 = row.iter().sum();
            if total == 0 {
                values.extend(core::iter::repeat(0.0).take(row.len()));
            } else {
                let total = total as f64;
                values.extend(row.iter().map(|&c| c as f64 / total * 100.0));
            }
        }
        Profile {
            alphabet: self.alphabet.clone(),
            values,
        }
    }
}

/// A relative-frequency vector (percentages) tied to its alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    alphabet: Alphabet,
    values: Vec<f64>,
}

impl Profile {
    /// Arithmetic mean of several profiles over the same alphabet.
    ///
    /// Every profile carries equal weight.
    pub fn mean<'a, I>(alphabet: &Alphabet, profiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Profile>,
    {
        let profiles: Vec<Profile> = profiles.into_iter().cloned().collect();
        if profiles.is_empty() {
            return Err(Error::EmptyInput);
        }
        for p in &profiles {
            alphabet.ensure_same(&p.alphabet)?;
        }
        Ok(Self::mean_of(alphabet, &profiles))
    }

    /// Mean of profiles already known to share `alphabet`.
    pub(crate) fn mean_of(alphabet: &Alphabet, profiles: &[Profile]) -> Self {
        let mut acc = vec![0.0; alphabet.len()];
        for p in profiles {
            for (a, v) in acc.iter_mut().zip(&p.values) {
                *a += v;
            }
        }
        let n = profiles.len().max(1) as f64;
        for a in &mut acc {
            *a /= n;
        }
        Self {
            alphabet: alphabet.clone(),
            values: acc,
        }
    }

    /// The alphabet the values are indexed by.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Percentages in alphabet order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Percentage for a single symbol.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.alphabet.index_of(symbol).map(|i| self.values[i])
    }

    /// `(symbol, percentage)` pairs in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.alphabet
            .symbols()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Sum of all percentages (100 for non-empty input, 0 otherwise).
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Per-row sums; a single entry unless the alphabet is a transition alphabet.
    pub fn row_sums(&self) -> Vec<f64> {
        self.values
            .chunks(self.alphabet.row_len().max(1))
            .map(|row| row.iter().sum())
            .collect()
    }

    /// Symbols with a non-zero share; chart legends only list these.
    pub fn non_zero_symbols(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| *v != 0.0)
            .map(|(s, _)| s)
            .collect()
    }

    /// Owned `(symbol, percentage)` pairs for serialization.
    pub fn to_pairs(&self) -> Vec<(String, f64)> {
        self.iter().map(|(s, v)| (s.to_string(), v)).collect()
    }
}

impl Serialize for Profile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (symbol, value) in self.iter() {
            map.serialize_entry(symbol, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> Alphabet {
        Alphabet::custom("abc", ["A", "B", "C"]).unwrap()
    }

    #[test]
    fn tallies_against_alphabet() -> Result<()> {
        let d = Distribution::from_symbols(&abc(), ["A", "A", "B"])?;
        assert_eq!(d.counts(), &[2, 1, 0]);
        assert_eq!(d.count("A")?, 2);
        assert_eq!(d.total(), 3);
        Ok(())
    }

    #[test]
    fn rejects_symbol_outside_alphabet() {
        let err = Distribution::from_symbols(&abc(), ["A", "D"]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSymbol {
                alphabet: "abc".into(),
                symbol: "D".into()
            }
        );
    }

    #[test]
    fn empty_relative_is_all_zero() {
        let p = Distribution::zero(&abc()).relative();
        assert_eq!(p.values(), &[0.0, 0.0, 0.0]);
        assert!(p.non_zero_symbols().is_empty());
    }

    #[test]
    fn relative_percentages() -> Result<()> {
        let p = Distribution::from_symbols(&abc(), ["A", "B", "B", "B"])?.relative();
        assert_eq!(p.get("A"), Some(25.0));
        assert_eq!(p.get("B"), Some(75.0));
        assert_eq!(p.non_zero_symbols(), vec!["A", "B"]);
        Ok(())
    }

    #[test]
    fn transition_rows_normalize_separately() -> Result<()> {
        let t = Alphabet::transitions(&abc());
        let p = Distribution::from_symbols(&t, ["A_B", "A_B", "A_C", "C_A"])?.relative();
        assert!((p.get("A_B").unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.get("C_A"), Some(100.0));
        assert_eq!(p.get("B_A"), Some(0.0));
        let rows = p.row_sums();
        assert_eq!(rows.len(), 3);
        assert!((rows[0] - 100.0).abs() < 1e-9);
        assert_eq!(rows[1], 0.0);
        assert_eq!(p.sum(), rows.iter().sum::<f64>());
        Ok(())
    }

    #[test]
    fn merge_requires_same_alphabet() -> Result<()> {
        let other = Alphabet::custom("xyz", ["A", "B", "C"])?;
        let a = Distribution::from_symbols(&abc(), ["A"])?;
        let b = Distribution::from_symbols(&other, ["A"])?;
        assert!(matches!(a.merge(&b), Err(Error::AlphabetMismatch { .. })));
        Ok(())
    }

    #[test]
    fn from_counts_checks_length() {
        assert!(Distribution::from_counts(&abc(), vec![1, 2, 3]).is_ok());
        assert!(matches!(
            Distribution::from_counts(&abc(), vec![1, 2]),
            Err(Error::AlphabetMismatch { .. })
        ));
    }

    #[test]
    fn sum_folds_from_zero() -> Result<()> {
        let a = Distribution::from_symbols(&abc(), ["A", "C"])?;
        let b = Distribution::from_symbols(&abc(), ["C"])?;
        let s = Distribution::sum(&abc(), [&a, &b])?;
        assert_eq!(s.counts(), &[1, 0, 2]);
        assert_eq!(Distribution::sum(&abc(), Vec::<&Distribution>::new())?, Distribution::zero(&abc()));
        Ok(())
    }

    #[test]
    fn mean_weights_profiles_equally() -> Result<()> {
        let long = Distribution::from_symbols(&abc(), ["A"; 99])?.relative();
        let short = Distribution::from_symbols(&abc(), ["B"])?.relative();
        let m = Profile::mean(&abc(), [&long, &short])?;
        assert_eq!(m.values(), &[50.0, 50.0, 0.0]);
        assert_eq!(Profile::mean(&abc(), Vec::<&Profile>::new()).unwrap_err(), Error::EmptyInput);
        Ok(())
    }

    #[test]
    fn profile_serializes_as_ordered_map() -> Result<()> {
        let p = Distribution::from_symbols(&abc(), ["A", "B"])?.relative();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"A":50.0,"B":50.0,"C":0.0}"#);
        Ok(())
    }

    fn symbols() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C")], 0..60)
    }

    proptest! {
        #[test]
        fn relative_sums_to_hundred_or_zero(seq in symbols()) {
            let p = Distribution::from_symbols(&abc(), &seq).unwrap().relative();
            if seq.is_empty() {
                prop_assert!(p.values().iter().all(|&v| v == 0.0));
            } else {
                prop_assert!((p.sum() - 100.0).abs() < 1e-9);
            }
            prop_assert!(p.values().iter().all(|&v| (0.0..=100.0).contains(&v)));
        }

        #[test]
        fn merge_is_associative_and_commutative(a in symbols(), b in symbols(), c in symbols()) {
            let (a, b, c) = (
                Distribution::from_symbols(&abc(), &a).unwrap(),
                Distribution::from_symbols(&abc(), &b).unwrap(),
                Distribution::from_symbols(&abc(), &c).unwrap(),
            );
            let left = a.merge(&b).unwrap().merge(&c).unwrap();
            let right = a.merge(&b.merge(&c).unwrap()).unwrap();
            let swapped = a.merge(&c).unwrap().merge(&b).unwrap();
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(&left, &swapped);
            prop_assert_eq!(a.merge(&Distribution::zero(&abc())).unwrap(), a);
        }
    }
}
