use super::entry::FractionMode;
use thiserror::Error;

/// Species-resolution failures raised by the composition engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeciesError {
    /// The symbol is malformed or names a nuclide absent from the registry.
    #[error("Unknown species symbol '{symbol}'")]
    UnknownSymbol { symbol: String },

    /// The nuclide exists in the registry but is not registered in this
    /// composition.
    #[error("Symbol '{symbol}' is not registered in this composition")]
    UnregisteredSymbol { symbol: String },
}

/// State, mode, and argument-shape violations of the composition engine.
///
/// Every variant is synchronously reported and locally recoverable; nothing
/// here aborts the process, and failed batch operations leave no partial
/// mutation behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompositionError {
    #[error("Composition is not finalized")]
    NotFinalized,

    #[error("Setter requires {expected:?} mode but the composition is in {actual:?} mode")]
    ModeMismatch {
        expected: FractionMode,
        actual: FractionMode,
    },

    #[error("Batch length mismatch: {symbols} symbols but {values} values")]
    LengthMismatch { symbols: usize, values: usize },

    #[error("Mixing fraction {fraction} is outside [0, 1]")]
    MixFractionOutOfRange { fraction: f64 },

    #[error("Cannot combine compositions with different fraction modes")]
    IncompatibleModes,

    #[error("Unknown subset method '{method}'")]
    UnknownSubsetMethod { method: String },

    #[error("Cannot finalize: abundances sum to zero")]
    EmptyNormalization,

    #[error("Non-finite abundance {value} for '{symbol}'")]
    NonFiniteAbundance { symbol: String, value: f64 },

    #[error("Negative abundance {value} for '{symbol}'")]
    NegativeAbundance { symbol: String, value: f64 },

    #[error("Species index {index} is out of range for {len} species")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No {group} isotope registered for strict canonical composition")]
    MissingCanonicalGroup { group: &'static str },

    #[error(transparent)]
    Species(#[from] SpeciesError),
}
