//! # Composition Module
//!
//! The composition engine: an aggregate of species-abundance pairs with
//! exact, invertible conversions between mass fraction, number fraction, and
//! molar abundance.
//!
//! ## Key Components
//!
//! - [`composition`] - The [`Composition`](composition::Composition) engine:
//!   registration, mode bookkeeping, the finalize/normalize lifecycle,
//!   conversions, mixing, subsetting, canonical ordering, and bit-exact
//!   hashing
//! - [`entry`] - Value types returned by queries:
//!   [`CompositionEntry`](entry::CompositionEntry),
//!   [`GlobalComposition`](entry::GlobalComposition), and the (X, Y, Z)
//!   [`CanonicalComposition`](entry::CanonicalComposition)
//! - [`error`] - The recoverable error taxonomy
//!   ([`CompositionError`](error::CompositionError),
//!   [`SpeciesError`](error::SpeciesError))

pub mod composition;
pub mod entry;
pub mod error;
