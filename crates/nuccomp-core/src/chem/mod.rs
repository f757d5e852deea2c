//! # Chemistry Module
//!
//! Immutable nuclide identities and the catalogs that resolve them.
//!
//! ## Key Components
//!
//! - [`species`] - The [`Species`](species::Species) value type: one nuclide's
//!   identity and physical constants, totally ordered by atomic mass
//! - [`elements`] - Static periodic-table lookups (element symbol ↔ Z)
//! - [`registry`] - The [`SpeciesRegistry`](registry::SpeciesRegistry):
//!   symbol and (A, Z) resolution over the built-in dataset, synthetic
//!   registries, and CSV loading
//!
//! Everything here is read-only after construction; the process-wide registry
//! is initialized once and safe for unsynchronized concurrent reads.

pub mod elements;
pub mod registry;
pub mod species;

mod data;
