use super::data::NUCLIDES;
use super::species::Species;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Read-only catalog of known nuclides, keyed by `"El-A"` symbol and by
/// `(A, Z)` pair.
///
/// The process-wide instance ([`SpeciesRegistry::global`]) is built once from
/// the built-in dataset and never mutated, so unsynchronized concurrent reads
/// are safe. Synthetic registries for tests or exotic networks are built with
/// [`SpeciesRegistry::new`] or loaded from a CSV file with
/// [`SpeciesRegistry::from_csv`]. A miss at this layer is a normal `None`;
/// escalating it to an error is the composition engine's job.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    by_symbol: HashMap<String, Species>,
    by_az: HashMap<(u32, u32), String>,
}

#[derive(Debug, Deserialize)]
struct NuclideRow {
    el: String,
    a: u32,
    mass: f64,
    mass_unc: f64,
    binding_energy: f64,
    beta_decay_energy: f64,
    beta_code: String,
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unknown nuclide '{el}-{a}' in '{path}'")]
    UnknownNuclide { path: String, el: String, a: u32 },
}

impl SpeciesRegistry {
    /// Builds a registry from an explicit set of species. Later entries win
    /// on duplicate symbols.
    pub fn new<I>(species: I) -> Self
    where
        I: IntoIterator<Item = Species>,
    {
        let mut registry = Self::default();
        for sp in species {
            registry.insert(sp);
        }
        registry
    }

    /// The process-wide registry over the built-in nuclide dataset,
    /// initialized on first use.
    pub fn global() -> &'static SpeciesRegistry {
        static GLOBAL: OnceLock<SpeciesRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = SpeciesRegistry::new(NUCLIDES.iter().filter_map(|r| {
                Species::new(
                    r.el,
                    r.a,
                    r.mass,
                    r.mass_unc,
                    r.binding_energy,
                    r.beta_decay_energy,
                    r.beta_code,
                )
            }));
            debug!("initialized global species registry ({} nuclides)", registry.len());
            registry
        })
    }

    /// Loads a registry from a CSV file with the columns
    /// `el,a,mass,mass_unc,binding_energy,beta_decay_energy,beta_code`.
    pub fn from_csv(path: &Path) -> Result<Self, RegistryLoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| RegistryLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut registry = Self::default();
        for result in reader.deserialize::<NuclideRow>() {
            let row = result.map_err(|e| RegistryLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            let species = Species::new(
                &row.el,
                row.a,
                row.mass,
                row.mass_unc,
                row.binding_energy,
                row.beta_decay_energy,
                &row.beta_code,
            )
            .ok_or_else(|| RegistryLoadError::UnknownNuclide {
                path: path.to_string_lossy().to_string(),
                el: row.el.clone(),
                a: row.a,
            })?;
            registry.insert(species);
        }
        Ok(registry)
    }

    fn insert(&mut self, species: Species) {
        self.by_az
            .insert((species.a(), species.z()), species.name().to_string());
        self.by_symbol.insert(species.name().to_string(), species);
    }

    /// Looks up a species by its `"El-A"` symbol.
    pub fn lookup(&self, symbol: &str) -> Option<&Species> {
        self.by_symbol.get(symbol.trim())
    }

    /// Looks up a species by mass number and proton number.
    pub fn lookup_az(&self, a: u32, z: u32) -> Option<&Species> {
        self.by_az.get(&(a, z)).and_then(|s| self.by_symbol.get(s))
    }

    /// Iterates over all `(symbol, species)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Species)> {
        self.by_symbol.iter().map(|(s, sp)| (s.as_str(), sp))
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}
