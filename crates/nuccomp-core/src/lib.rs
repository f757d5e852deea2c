//! # nuccomp
//!
//! A composition engine for parcels of matter: mixtures of atomic/nuclear
//! species with per-species abundances, and exact, invertible conversions
//! between the three physically equivalent abundance representations (mass
//! fraction, number fraction, molar abundance).
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction:
//!
//! - **[`chem`]: The Foundation.** Immutable nuclide data — the
//!   [`Species`](chem::species::Species) value type, periodic-table lookups,
//!   and the read-only [`SpeciesRegistry`](chem::registry::SpeciesRegistry)
//!   that resolves `"El-A"` symbols and `(A, Z)` pairs.
//!
//! - **[`composition`]: The Engine.** The stateful
//!   [`Composition`](composition::composition::Composition) aggregate:
//!   registration, fraction-mode bookkeeping, the finalize/normalize
//!   lifecycle, conversion math, mixing, subsetting, canonical ordering, and
//!   the bit-exact equality/hash contract that makes finalized compositions
//!   safe keys in associative containers.
//!
//! ## Example
//!
//! ```
//! use nuccomp::composition::composition::Composition;
//!
//! # fn main() -> Result<(), nuccomp::composition::error::CompositionError> {
//! let mut comp = Composition::new();
//! comp.register_symbols(&["H-1", "He-4"])?;
//! comp.set_mass_fractions(&["H-1", "He-4"], &[0.7, 0.3])?;
//! comp.finalize(false)?;
//!
//! let canonical = comp.canonical_composition(true)?;
//! assert_eq!((canonical.x, canonical.y, canonical.z), (0.7, 0.3, 0.0));
//! # Ok(())
//! # }
//! ```

pub mod chem;
pub mod composition;

pub use chem::registry::SpeciesRegistry;
pub use chem::species::Species;
pub use composition::composition::{Composition, SpeciesKey};
pub use composition::entry::{
    CanonicalComposition, CompositionEntry, FractionMode, GlobalComposition,
};
pub use composition::error::{CompositionError, SpeciesError};
