use thiserror::Error as ThisError;

/// Result alias for `neumes`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by profile construction, grouping and clustering.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// A symbol outside the distribution's alphabet was counted.
    #[error("symbol '{symbol}' is not part of the {alphabet} alphabet")]
    InvalidSymbol {
        /// Name of the alphabet.
        alphabet: String,
        /// Offending symbol.
        symbol: String,
    },

    /// Two distributions (or a distribution and a count vector) disagree on alphabet.
    #[error("alphabet mismatch: expected {expected}, found {found}")]
    AlphabetMismatch {
        /// Expected alphabet description.
        expected: String,
        /// Actual alphabet description.
        found: String,
    },

    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// The same item name was supplied twice.
    #[error("duplicate item name '{name}'")]
    DuplicateItem {
        /// Item name.
        name: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A note spelling could not be parsed.
    #[error("cannot parse note '{0}'")]
    InvalidNote(String),

    /// The analysis is not defined for the requested unit.
    #[error("analysis '{analysis}' is not defined for unit '{unit}'")]
    UnsupportedUnit {
        /// Analysis name.
        analysis: &'static str,
        /// Unit name.
        unit: &'static str,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
