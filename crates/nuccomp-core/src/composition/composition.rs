use super::entry::{CanonicalComposition, CompositionEntry, FractionMode, GlobalComposition};
use super::error::{CompositionError, SpeciesError};
use crate::chem::registry::SpeciesRegistry;
use crate::chem::species::Species;
use log::debug;
use nalgebra::DVector;
use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

/// Anything that can name a species in a composition: a `"El-A"` symbol
/// string or a [`Species`] value.
///
/// The engine resolves every keyed operation through this one seam, so the
/// by-symbol and by-species call forms share a single implementation.
pub trait SpeciesKey {
    fn key(&self) -> &str;
}

impl SpeciesKey for str {
    fn key(&self) -> &str {
        self
    }
}

impl SpeciesKey for String {
    fn key(&self) -> &str {
        self
    }
}

impl SpeciesKey for Species {
    fn key(&self) -> &str {
        self.name()
    }
}

impl<T: SpeciesKey + ?Sized> SpeciesKey for &T {
    fn key(&self) -> &str {
        (**self).key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifecycleState {
    Building,
    Finalized,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    species: Species,
    value: f64,
}

/// A mixture of nuclear species with per-species abundances.
///
/// The aggregate stores one scalar per registered species, interpreted under
/// a single [`FractionMode`], and derives any of the three physically
/// equivalent representations (mass fraction, number fraction, molar
/// abundance) on demand. A composition is built in the `Building` state
/// through registration and setters, then [`finalize`](Self::finalize)d;
/// finalization validates the abundances, optionally normalizes them, assigns
/// the canonical ascending-mass species order, and caches the aggregate
/// summary. Most getters and all index-based accessors require a finalized
/// aggregate; any mutation drops it back to `Building`.
///
/// Equality and hashing are bit-exact over the registered species and their
/// stored scalars (see [`Self::hash_exact`]), so finalized compositions are
/// safe keys for associative containers. Two compositions built through
/// mathematically equivalent but differently ordered arithmetic are not
/// guaranteed to compare equal.
#[derive(Debug, Clone)]
pub struct Composition {
    registry: &'static SpeciesRegistry,
    entries: HashMap<String, StoredEntry>,
    mode: FractionMode,
    state: LifecycleState,
    canonical_order: Vec<String>,
    index_of: HashMap<String, usize>,
    global: Option<GlobalComposition>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// An empty composition in mass-fraction mode over the global registry.
    pub fn new() -> Self {
        Self::with_registry(SpeciesRegistry::global())
    }

    /// An empty composition over an explicitly supplied registry. Intended
    /// for synthetic registries in tests and for exotic networks.
    pub fn with_registry(registry: &'static SpeciesRegistry) -> Self {
        Self {
            registry,
            entries: HashMap::new(),
            mode: FractionMode::MassFraction,
            state: LifecycleState::Building,
            canonical_order: Vec::new(),
            index_of: HashMap::new(),
            global: None,
        }
    }

    /// Registers the given symbols at zero abundance, in mass-fraction mode.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, CompositionError> {
        let mut comp = Self::new();
        comp.register_symbols(symbols)?;
        Ok(comp)
    }

    /// Builds from parallel symbol/fraction arrays under the given mode.
    /// The result is left unfinalized.
    pub fn from_fractions<S: AsRef<str>>(
        symbols: &[S],
        fractions: &[f64],
        mode: FractionMode,
    ) -> Result<Self, CompositionError> {
        if symbols.len() != fractions.len() {
            return Err(CompositionError::LengthMismatch {
                symbols: symbols.len(),
                values: fractions.len(),
            });
        }
        let mut comp = Self::new();
        comp.mode = mode;
        comp.register_symbols(symbols)?;
        for (symbol, &fraction) in symbols.iter().zip(fractions) {
            comp.store(symbol.as_ref(), fraction)?;
        }
        Ok(comp)
    }

    /// Builds from parallel species/fraction arrays under the given mode.
    pub fn from_species_fractions(
        species: &[Species],
        fractions: &[f64],
        mode: FractionMode,
    ) -> Result<Self, CompositionError> {
        if species.len() != fractions.len() {
            return Err(CompositionError::LengthMismatch {
                symbols: species.len(),
                values: fractions.len(),
            });
        }
        let mut comp = Self::new();
        comp.mode = mode;
        comp.register_species_list(species)?;
        for (sp, &fraction) in species.iter().zip(fractions) {
            comp.store(sp.name(), fraction)?;
        }
        Ok(comp)
    }

    /// Builds from a mapping of species to molar abundance (mol per unit
    /// mass). Duplicate keys are merged last-write-wins; stored mass
    /// fractions are `X_i = y_i · A_i`. The result is finalized before it is
    /// returned, so every query on it is immediately valid.
    pub fn from_molar_abundances<K, I>(abundances: I) -> Result<Self, CompositionError>
    where
        K: SpeciesKey,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut comp = Self::new();
        for (key, molar) in abundances {
            let symbol = key.key().trim().to_string();
            comp.register_symbol(&symbol)?;
            let a = comp.resolve(&symbol)?.species.a() as f64;
            comp.store(&symbol, molar * a)?;
        }
        comp.finalize(false)?;
        Ok(comp)
    }

    /// The fraction mode under which the stored scalars are interpreted.
    pub fn mode(&self) -> FractionMode {
        self.mode
    }

    /// Whether the composition is finalized and fully queryable.
    pub fn is_finalized(&self) -> bool {
        self.state == LifecycleState::Finalized
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the key names a species registered in this composition.
    pub fn has_symbol<K: SpeciesKey + ?Sized>(&self, key: &K) -> bool {
        self.entries.contains_key(key.key().trim())
    }

    /// The registered symbols, sorted lexicographically.
    pub fn registered_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.entries.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    // ---- registration -----------------------------------------------------

    /// Registers one symbol at zero abundance. Re-registering a present
    /// species is an idempotent no-op; a genuinely new registration drops a
    /// finalized aggregate back to `Building`.
    pub fn register_symbol(&mut self, symbol: &str) -> Result<(), CompositionError> {
        let symbol = symbol.trim();
        if self.entries.contains_key(symbol) {
            return Ok(());
        }
        let species = self
            .registry
            .lookup(symbol)
            .ok_or_else(|| SpeciesError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?
            .clone();
        self.invalidate();
        self.entries.insert(
            symbol.to_string(),
            StoredEntry {
                species,
                value: 0.0,
            },
        );
        Ok(())
    }

    /// Registers a batch of symbols. All symbols are resolved against the
    /// registry before any of them is added, so a failure leaves the
    /// composition untouched.
    pub fn register_symbols<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<(), CompositionError> {
        let mut resolved = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if self.entries.contains_key(symbol) {
                continue;
            }
            let species = self
                .registry
                .lookup(symbol)
                .ok_or_else(|| SpeciesError::UnknownSymbol {
                    symbol: symbol.to_string(),
                })?
                .clone();
            resolved.push((symbol.to_string(), species));
        }
        if resolved.is_empty() {
            return Ok(());
        }
        self.invalidate();
        for (symbol, species) in resolved {
            self.entries
                .entry(symbol)
                .or_insert(StoredEntry { species, value: 0.0 });
        }
        Ok(())
    }

    /// Registers one species, validated against the registry.
    pub fn register_species(&mut self, species: &Species) -> Result<(), CompositionError> {
        if self.registry.lookup(species.name()).is_none() {
            return Err(SpeciesError::UnknownSymbol {
                symbol: species.name().to_string(),
            }
            .into());
        }
        self.register_symbol(species.name())
    }

    /// Registers a batch of species, all-or-nothing.
    pub fn register_species_list(&mut self, species: &[Species]) -> Result<(), CompositionError> {
        for sp in species {
            if self.registry.lookup(sp.name()).is_none() {
                return Err(SpeciesError::UnknownSymbol {
                    symbol: sp.name().to_string(),
                }
                .into());
            }
        }
        let symbols: Vec<&str> = species.iter().map(|sp| sp.name()).collect();
        self.register_symbols(&symbols)
    }

    // ---- setters ----------------------------------------------------------

    /// Sets a mass fraction; the composition must be in mass-fraction mode.
    /// Returns the previous stored value.
    pub fn set_mass_fraction<K: SpeciesKey + ?Sized>(
        &mut self,
        key: &K,
        mass_fraction: f64,
    ) -> Result<f64, CompositionError> {
        self.require_mode(FractionMode::MassFraction)?;
        self.store(key.key(), mass_fraction)
    }

    /// Sets a batch of mass fractions, all-or-nothing. Returns the previous
    /// values in argument order.
    pub fn set_mass_fractions<K: SpeciesKey>(
        &mut self,
        keys: &[K],
        mass_fractions: &[f64],
    ) -> Result<Vec<f64>, CompositionError> {
        self.require_mode(FractionMode::MassFraction)?;
        self.store_batch(keys, mass_fractions)
    }

    /// Sets a number fraction; the composition must be in number-fraction
    /// mode. Returns the previous stored value.
    pub fn set_number_fraction<K: SpeciesKey + ?Sized>(
        &mut self,
        key: &K,
        number_fraction: f64,
    ) -> Result<f64, CompositionError> {
        self.require_mode(FractionMode::NumberFraction)?;
        self.store(key.key(), number_fraction)
    }

    /// Sets a batch of number fractions, all-or-nothing.
    pub fn set_number_fractions<K: SpeciesKey>(
        &mut self,
        keys: &[K],
        number_fractions: &[f64],
    ) -> Result<Vec<f64>, CompositionError> {
        self.require_mode(FractionMode::NumberFraction)?;
        self.store_batch(keys, number_fractions)
    }

    /// Sets a molar abundance (mol per unit mass), stored as the mass
    /// fraction `y · A`; requires mass-fraction mode. Returns the previous
    /// molar abundance.
    pub fn set_molar_abundance<K: SpeciesKey + ?Sized>(
        &mut self,
        key: &K,
        molar_abundance: f64,
    ) -> Result<f64, CompositionError> {
        self.require_mode(FractionMode::MassFraction)?;
        let symbol = key.key().trim();
        let a = self.resolve(symbol)?.species.a() as f64;
        let old = self.store(symbol, molar_abundance * a)?;
        Ok(old / a)
    }

    // ---- lifecycle --------------------------------------------------------

    /// Validates the aggregate and transitions it to `Finalized`: abundances
    /// must be finite, non-negative, and not sum to zero; with `norm` they
    /// are rescaled to sum to exactly 1; the canonical ascending-mass order
    /// and the aggregate summary are assigned. A failed finalize leaves the
    /// stored values untouched. Calling this on an unchanged finalized
    /// composition is a no-op.
    pub fn finalize(&mut self, norm: bool) -> Result<(), CompositionError> {
        if self.state == LifecycleState::Finalized {
            return Ok(());
        }
        for (symbol, entry) in &self.entries {
            if !entry.value.is_finite() {
                return Err(CompositionError::NonFiniteAbundance {
                    symbol: symbol.clone(),
                    value: entry.value,
                });
            }
            if entry.value < 0.0 {
                return Err(CompositionError::NegativeAbundance {
                    symbol: symbol.clone(),
                    value: entry.value,
                });
            }
        }

        // A zero-sum aggregate has no usable summary (the specific number
        // density would be 0 and every derived quantity NaN/inf), so it is
        // rejected in both the normalizing and the raw path. The failed
        // finalize leaves all stored values untouched.
        let sum: f64 = self.entries.values().map(|e| e.value).sum();
        if sum <= 0.0 {
            return Err(CompositionError::EmptyNormalization);
        }
        if norm {
            for entry in self.entries.values_mut() {
                entry.value /= sum;
            }
        }

        let mut order: Vec<String> = self.entries.keys().cloned().collect();
        order.sort_by(|a, b| {
            let (sa, sb) = (&self.entries[a].species, &self.entries[b].species);
            sa.cmp(sb).then_with(|| a.cmp(b))
        });
        self.index_of = order
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        self.canonical_order = order;

        let specific_number_density: f64 = self
            .entries
            .values()
            .map(|e| self.stored_mass_fraction(e) / e.species.a() as f64)
            .sum();
        self.global = Some(GlobalComposition {
            specific_number_density,
            mean_particle_mass: 1.0 / specific_number_density,
        });
        self.state = LifecycleState::Finalized;
        debug!(
            "finalized composition: {} species, mode {:?}, mean particle mass {:.6}",
            self.entries.len(),
            self.mode,
            1.0 / specific_number_density
        );
        Ok(())
    }

    // ---- conversion getters -----------------------------------------------

    /// The mass fraction of one species. Requires a finalized composition.
    pub fn mass_fraction<K: SpeciesKey + ?Sized>(&self, key: &K) -> Result<f64, CompositionError> {
        self.require_finalized()?;
        let entry = self.resolve(key.key())?;
        Ok(self.stored_mass_fraction(entry))
    }

    /// All mass fractions, keyed by symbol.
    pub fn mass_fractions(&self) -> Result<BTreeMap<String, f64>, CompositionError> {
        self.require_finalized()?;
        Ok(self
            .entries
            .iter()
            .map(|(s, e)| (s.clone(), self.stored_mass_fraction(e)))
            .collect())
    }

    /// The number fraction of one species. Requires a finalized composition.
    pub fn number_fraction<K: SpeciesKey + ?Sized>(&self, key: &K) -> Result<f64, CompositionError> {
        let global = self.require_finalized()?;
        let density = global.specific_number_density;
        let entry = self.resolve(key.key())?;
        Ok(self.stored_number_fraction(entry, density))
    }

    /// All number fractions, keyed by symbol.
    pub fn number_fractions(&self) -> Result<BTreeMap<String, f64>, CompositionError> {
        let density = self.require_finalized()?.specific_number_density;
        Ok(self
            .entries
            .iter()
            .map(|(s, e)| (s.clone(), self.stored_number_fraction(e, density)))
            .collect())
    }

    /// The molar abundance (mol per unit mass) of one species, `X_i / A_i`.
    pub fn molar_abundance<K: SpeciesKey + ?Sized>(&self, key: &K) -> Result<f64, CompositionError> {
        self.require_finalized()?;
        let entry = self.resolve(key.key())?;
        Ok(self.stored_mass_fraction(entry) / entry.species.a() as f64)
    }

    /// All molar abundances, keyed by symbol.
    pub fn molar_abundances(&self) -> Result<BTreeMap<String, f64>, CompositionError> {
        self.require_finalized()?;
        Ok(self
            .entries
            .iter()
            .map(|(s, e)| {
                (
                    s.clone(),
                    self.stored_mass_fraction(e) / e.species.a() as f64,
                )
            })
            .collect())
    }

    /// The aggregate summary. Requires a finalized composition.
    pub fn global_composition(&self) -> Result<GlobalComposition, CompositionError> {
        self.require_finalized().copied()
    }

    /// Mean particle mass in amu, `1 / Σ_j molar_abundance_j`.
    pub fn mean_particle_mass(&self) -> Result<f64, CompositionError> {
        Ok(self.require_finalized()?.mean_particle_mass)
    }

    /// Moles of particles per unit mass, `Σ_j X_j / A_j`.
    pub fn specific_number_density(&self) -> Result<f64, CompositionError> {
        Ok(self.require_finalized()?.specific_number_density)
    }

    /// The entry snapshot for one species together with the aggregate
    /// summary.
    pub fn composition_of<K: SpeciesKey + ?Sized>(
        &self,
        key: &K,
    ) -> Result<(CompositionEntry, GlobalComposition), CompositionError> {
        let global = *self.require_finalized()?;
        let entry = self.resolve(key.key())?;
        Ok((
            CompositionEntry::new(entry.species.clone(), entry.value, self.mode, global),
            global,
        ))
    }

    /// Entry snapshots for every species together with the aggregate summary.
    pub fn composition(
        &self,
    ) -> Result<(BTreeMap<String, CompositionEntry>, GlobalComposition), CompositionError> {
        let global = *self.require_finalized()?;
        let entries = self
            .entries
            .iter()
            .map(|(s, e)| {
                (
                    s.clone(),
                    CompositionEntry::new(e.species.clone(), e.value, self.mode, global),
                )
            })
            .collect();
        Ok((entries, global))
    }

    /// The (X, Y, Z) hydrogen/helium/metals summary. In strict mode a
    /// missing hydrogen or helium group is an error; lenient treats it as
    /// exactly zero.
    pub fn canonical_composition(
        &self,
        strict: bool,
    ) -> Result<CanonicalComposition, CompositionError> {
        self.require_finalized()?;
        CanonicalComposition::from_mass_fractions(
            self.entries
                .values()
                .map(|e| (&e.species, self.stored_mass_fraction(e))),
            strict,
        )
    }

    // ---- mixing and subsetting --------------------------------------------

    /// Linear interpolation with another composition:
    /// `result_i = self_i · (1 − fraction) + other_i · fraction` over the
    /// union of species, absences contributing zero. Both operands must be
    /// finalized and share the same mode; `fraction` must lie in `[0, 1]`.
    /// The result is a fresh composition, finalized without normalization so
    /// the endpoints reproduce the operands exactly.
    pub fn mix(&self, other: &Composition, fraction: f64) -> Result<Composition, CompositionError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CompositionError::MixFractionOutOfRange { fraction });
        }
        self.require_finalized()?;
        other.require_finalized()?;
        if self.mode != other.mode {
            return Err(CompositionError::IncompatibleModes);
        }

        let mut result = Composition::with_registry(self.registry);
        result.mode = self.mode;
        for (symbol, entry) in &self.entries {
            let other_value = other.entries.get(symbol).map_or(0.0, |e| e.value);
            result.entries.insert(
                symbol.clone(),
                StoredEntry {
                    species: entry.species.clone(),
                    value: entry.value * (1.0 - fraction) + other_value * fraction,
                },
            );
        }
        for (symbol, entry) in &other.entries {
            if self.entries.contains_key(symbol) {
                continue;
            }
            result.entries.insert(
                symbol.clone(),
                StoredEntry {
                    species: entry.species.clone(),
                    value: entry.value * fraction,
                },
            );
        }
        result.finalize(false)?;
        debug!(
            "mixed compositions ({} + {} species, fraction {})",
            self.entries.len(),
            other.entries.len(),
            fraction
        );
        Ok(result)
    }

    /// A new composition over the requested symbols only. Symbols absent from
    /// this composition are silently omitted. The only supported method is
    /// `"norm"`, which rescales the retained fractions to sum to 1.
    pub fn subset<K: SpeciesKey>(
        &self,
        symbols: &[K],
        method: &str,
    ) -> Result<Composition, CompositionError> {
        self.require_finalized()?;
        if method != "norm" {
            return Err(CompositionError::UnknownSubsetMethod {
                method: method.to_string(),
            });
        }
        let mut result = Composition::with_registry(self.registry);
        result.mode = self.mode;
        for key in symbols {
            let symbol = key.key().trim();
            if let Some(entry) = self.entries.get(symbol) {
                result.entries.insert(symbol.to_string(), entry.clone());
            }
        }
        result.finalize(true)?;
        Ok(result)
    }

    // ---- canonical order, indexing, vectors -------------------------------

    /// The canonical (ascending atomic mass) index of a species. Requires a
    /// finalized composition.
    pub fn species_index<K: SpeciesKey + ?Sized>(&self, key: &K) -> Result<usize, CompositionError> {
        self.require_finalized()?;
        let symbol = key.key().trim();
        // The finalize-time index covers exactly the registered symbols, so a
        // miss is escalated the same way as every other keyed lookup.
        self.index_of
            .get(symbol)
            .copied()
            .ok_or_else(|| self.missing_symbol_error(symbol))
    }

    /// The species at a canonical index. Requires a finalized composition.
    pub fn species_at(&self, index: usize) -> Result<&Species, CompositionError> {
        self.require_finalized()?;
        self.canonical_order
            .get(index)
            .and_then(|s| self.entries.get(s))
            .map(|e| &e.species)
            .ok_or(CompositionError::IndexOutOfRange {
                index,
                len: self.canonical_order.len(),
            })
    }

    /// Mass fractions as a vector in canonical order.
    pub fn mass_fraction_vector(&self) -> Result<DVector<f64>, CompositionError> {
        self.require_finalized()?;
        Ok(DVector::from_iterator(
            self.canonical_order.len(),
            self.canonical_entries().map(|e| self.stored_mass_fraction(e)),
        ))
    }

    /// Number fractions as a vector in canonical order.
    pub fn number_fraction_vector(&self) -> Result<DVector<f64>, CompositionError> {
        let density = self.require_finalized()?.specific_number_density;
        Ok(DVector::from_iterator(
            self.canonical_order.len(),
            self.canonical_entries()
                .map(|e| self.stored_number_fraction(e, density)),
        ))
    }

    /// Molar abundances as a vector in canonical order.
    pub fn molar_abundance_vector(&self) -> Result<DVector<f64>, CompositionError> {
        self.require_finalized()?;
        Ok(DVector::from_iterator(
            self.canonical_order.len(),
            self.canonical_entries()
                .map(|e| self.stored_mass_fraction(e) / e.species.a() as f64),
        ))
    }

    /// Iterates entry snapshots in canonical order. Requires a finalized
    /// composition; the borrow on `self` statically prevents mutation while
    /// the iterator is alive.
    pub fn entries(
        &self,
    ) -> Result<impl Iterator<Item = CompositionEntry> + '_, CompositionError> {
        let global = *self.require_finalized()?;
        let mode = self.mode;
        Ok(self
            .canonical_entries()
            .map(move |e| CompositionEntry::new(e.species.clone(), e.value, mode, global)))
    }

    // ---- mode switching ---------------------------------------------------

    /// Switches the interpretation of all stored scalars between the
    /// mass-fraction and number-fraction bases, converting every value and
    /// re-finalizing. Requires a finalized composition; switching to the
    /// current mode is a no-op.
    pub fn set_composition_mode(&mut self, mass_frac_mode: bool) -> Result<(), CompositionError> {
        self.require_finalized()?;
        let target = if mass_frac_mode {
            FractionMode::MassFraction
        } else {
            FractionMode::NumberFraction
        };
        if target == self.mode {
            return Ok(());
        }

        let denom: f64 = match self.mode {
            FractionMode::MassFraction => self
                .entries
                .values()
                .map(|e| e.value / e.species.a() as f64)
                .sum(),
            FractionMode::NumberFraction => self
                .entries
                .values()
                .map(|e| e.value * e.species.a() as f64)
                .sum(),
        };
        // Checked before any converted value is written, so a failure leaves
        // the aggregate finalized and unchanged. Unreachable through the
        // public API since finalize already rejects zero-sum aggregates.
        if denom <= 0.0 || !denom.is_finite() {
            return Err(CompositionError::EmptyNormalization);
        }

        let converted: HashMap<String, f64> = match self.mode {
            // X -> n: n_i = (X_i / A_i) / Σ_j (X_j / A_j)
            FractionMode::MassFraction => self
                .entries
                .iter()
                .map(|(s, e)| (s.clone(), (e.value / e.species.a() as f64) / denom))
                .collect(),
            // n -> X: X_i = (n_i · A_i) / Σ_j (n_j · A_j)
            FractionMode::NumberFraction => self
                .entries
                .iter()
                .map(|(s, e)| (s.clone(), (e.value * e.species.a() as f64) / denom))
                .collect(),
        };
        for (symbol, value) in converted {
            if let Some(entry) = self.entries.get_mut(&symbol) {
                entry.value = value;
            }
        }
        self.mode = target;
        self.invalidate();
        self.finalize(false)?;
        debug!("switched composition mode to {:?}", target);
        Ok(())
    }

    /// The bit-exact aggregate hash: species identity combined with the raw
    /// bit pattern of each stored scalar, in a deterministic mass-then-symbol
    /// order. Consistent with `==` in every lifecycle state.
    pub fn hash_exact(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    // ---- internals --------------------------------------------------------

    fn invalidate(&mut self) {
        self.state = LifecycleState::Building;
        self.canonical_order.clear();
        self.index_of.clear();
        self.global = None;
    }

    fn require_finalized(&self) -> Result<&GlobalComposition, CompositionError> {
        match (self.state, self.global.as_ref()) {
            (LifecycleState::Finalized, Some(global)) => Ok(global),
            _ => Err(CompositionError::NotFinalized),
        }
    }

    fn require_mode(&self, expected: FractionMode) -> Result<(), CompositionError> {
        if self.mode != expected {
            return Err(CompositionError::ModeMismatch {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }

    /// Resolves a symbol against this composition, escalating misses: a
    /// symbol known to the registry but absent here is `UnregisteredSymbol`;
    /// one the registry has never heard of is `UnknownSymbol`.
    fn resolve(&self, symbol: &str) -> Result<&StoredEntry, CompositionError> {
        let symbol = symbol.trim();
        self.entries
            .get(symbol)
            .ok_or_else(|| self.missing_symbol_error(symbol))
    }

    fn missing_symbol_error(&self, symbol: &str) -> CompositionError {
        if self.registry.lookup(symbol).is_some() {
            SpeciesError::UnregisteredSymbol {
                symbol: symbol.to_string(),
            }
            .into()
        } else {
            SpeciesError::UnknownSymbol {
                symbol: symbol.to_string(),
            }
            .into()
        }
    }

    /// Writes one stored scalar, invalidating a finalized state. Returns the
    /// previous value.
    fn store(&mut self, symbol: &str, value: f64) -> Result<f64, CompositionError> {
        let symbol = symbol.trim();
        self.resolve(symbol)?;
        self.invalidate();
        match self.entries.get_mut(symbol) {
            Some(entry) => Ok(std::mem::replace(&mut entry.value, value)),
            None => Err(SpeciesError::UnregisteredSymbol {
                symbol: symbol.to_string(),
            }
            .into()),
        }
    }

    /// Batch write with full validation up front; no value is applied unless
    /// every target resolves and the shapes match.
    fn store_batch<K: SpeciesKey>(
        &mut self,
        keys: &[K],
        values: &[f64],
    ) -> Result<Vec<f64>, CompositionError> {
        if keys.len() != values.len() {
            return Err(CompositionError::LengthMismatch {
                symbols: keys.len(),
                values: values.len(),
            });
        }
        for key in keys {
            self.resolve(key.key())?;
        }
        let mut old = Vec::with_capacity(keys.len());
        for (key, &value) in keys.iter().zip(values) {
            old.push(self.store(key.key(), value)?);
        }
        Ok(old)
    }

    fn canonical_entries(&self) -> impl Iterator<Item = &StoredEntry> {
        self.canonical_order
            .iter()
            .filter_map(|s| self.entries.get(s))
    }

    fn stored_mass_fraction(&self, entry: &StoredEntry) -> f64 {
        match self.mode {
            FractionMode::MassFraction => entry.value,
            FractionMode::NumberFraction => {
                let denom: f64 = self
                    .entries
                    .values()
                    .map(|e| e.value * e.species.a() as f64)
                    .sum();
                entry.value * entry.species.a() as f64 / denom
            }
        }
    }

    fn stored_number_fraction(&self, entry: &StoredEntry, density: f64) -> f64 {
        match self.mode {
            FractionMode::MassFraction => (entry.value / entry.species.a() as f64) / density,
            FractionMode::NumberFraction => entry.value,
        }
    }
}

impl PartialEq for Composition {
    /// Exact equality: same mode, same registered species, bit-identical
    /// stored scalars. Never tolerance-based.
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(symbol, entry)| {
                other.entries.get(symbol).is_some_and(|o| {
                    o.species == entry.species && o.value.to_bits() == entry.value.to_bits()
                })
            })
    }
}

impl Eq for Composition {}

impl Hash for Composition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        // Sort on demand rather than relying on the finalize-time order so
        // the hash is defined in every lifecycle state; post-finalize the
        // two orders coincide.
        let mut entries: Vec<&StoredEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.species.cmp(&b.species));
        for entry in entries {
            entry.species.hash(state);
            entry.value.to_bits().hash(state);
        }
    }
}

impl Add<&Composition> for &Composition {
    type Output = Result<Composition, CompositionError>;

    /// Equal-parts mixture, `self.mix(other, 0.5)`.
    fn add(self, other: &Composition) -> Self::Output {
        self.mix(other, 0.5)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            FractionMode::MassFraction => "mass fraction",
            FractionMode::NumberFraction => "number fraction",
        };
        write!(f, "<Composition ({mode} mode, {} species:", self.entries.len())?;
        let mut symbols: Vec<&String> = self.entries.keys().collect();
        symbols.sort();
        for symbol in symbols {
            write!(f, " {symbol}={}", self.entries[symbol].value)?;
        }
        write!(f, ")>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar_ish() -> Composition {
        let mut comp = Composition::new();
        comp.register_symbols(&["H-1", "He-4"]).unwrap();
        comp.set_mass_fraction("H-1", 0.7).unwrap();
        comp.set_mass_fraction("He-4", 0.3).unwrap();
        comp.finalize(false).unwrap();
        comp
    }

    #[test]
    fn registration_starts_species_at_zero_abundance() {
        let comp = Composition::from_symbols(&["H-1", "C-12"]).unwrap();
        assert_eq!(comp.len(), 2);
        assert!(comp.has_symbol("H-1"));
        assert!(comp.has_symbol("C-12"));
        assert!(!comp.is_finalized());
    }

    #[test]
    fn registering_unknown_symbol_fails() {
        let mut comp = Composition::new();
        let err = comp.register_symbol("Xx-99").unwrap_err();
        assert!(matches!(
            err,
            CompositionError::Species(SpeciesError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn re_registration_is_an_idempotent_noop() {
        let mut comp = solar_ish();
        comp.register_symbol("H-1").unwrap();
        assert!(comp.is_finalized());
        assert_eq!(comp.mass_fraction("H-1").unwrap(), 0.7);
    }

    #[test]
    fn register_species_validates_against_the_registry() {
        let mut comp = Composition::new();
        let h1 = SpeciesRegistry::global().lookup("H-1").unwrap().clone();
        comp.register_species(&h1).unwrap();
        assert!(comp.has_symbol(&h1));

        let fake = Species::new("H", 1, 0.5, 0.0, 0.0, 0.0, "stable").unwrap();
        // Same name as a registry nuclide, so registration succeeds and is a
        // no-op on the already-present entry.
        comp.register_species(&fake).unwrap();
        assert_eq!(comp.len(), 1);
    }

    #[test]
    fn batch_registration_is_all_or_nothing() {
        let mut comp = Composition::new();
        let err = comp.register_symbols(&["H-1", "Xx-99"]).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::Species(SpeciesError::UnknownSymbol { .. })
        ));
        assert!(comp.is_empty());
    }

    #[test]
    fn setter_returns_previous_value() {
        let mut comp = Composition::from_symbols(&["H-1"]).unwrap();
        assert_eq!(comp.set_mass_fraction("H-1", 0.5).unwrap(), 0.0);
        assert_eq!(comp.set_mass_fraction("H-1", 0.7).unwrap(), 0.5);
    }

    #[test]
    fn setter_accepts_species_keys() {
        let mut comp = Composition::from_symbols(&["He-4"]).unwrap();
        let he4 = SpeciesRegistry::global().lookup("He-4").unwrap().clone();
        comp.set_mass_fraction(&he4, 0.25).unwrap();
        comp.finalize(false).unwrap();
        assert_eq!(comp.mass_fraction(&he4).unwrap(), 0.25);
    }

    #[test]
    fn setter_in_wrong_mode_fails() {
        let mut comp =
            Composition::from_fractions(&["H-1", "C-12"], &[0.5, 0.5], FractionMode::NumberFraction)
                .unwrap();
        let err = comp.set_mass_fraction("H-1", 0.5).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::ModeMismatch {
                expected: FractionMode::MassFraction,
                actual: FractionMode::NumberFraction,
            }
        ));
    }

    #[test]
    fn setter_on_unregistered_symbol_fails() {
        let mut comp = Composition::from_symbols(&["H-1"]).unwrap();
        let err = comp.set_mass_fraction("Fe-56", 0.1).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::Species(SpeciesError::UnregisteredSymbol { .. })
        ));
    }

    #[test]
    fn batch_setter_validates_shape_and_targets_before_applying() {
        let mut comp = Composition::from_symbols(&["H-1", "He-4"]).unwrap();
        comp.set_mass_fraction("H-1", 0.9).unwrap();

        let err = comp
            .set_mass_fractions(&["H-1", "He-4"], &[0.1])
            .unwrap_err();
        assert!(matches!(err, CompositionError::LengthMismatch { symbols: 2, values: 1 }));

        let err = comp
            .set_mass_fractions(&["H-1", "Fe-56"], &[0.1, 0.2])
            .unwrap_err();
        assert!(matches!(
            err,
            CompositionError::Species(SpeciesError::UnregisteredSymbol { .. })
        ));

        // No partial mutation observable after either failure.
        comp.finalize(false).unwrap();
        assert_eq!(comp.mass_fraction("H-1").unwrap(), 0.9);

        let old = comp
            .set_mass_fractions(&["H-1", "He-4"], &[0.7, 0.3])
            .unwrap();
        assert_eq!(old, vec![0.9, 0.0]);
    }

    #[test]
    fn getters_before_finalize_fail() {
        let comp = Composition::from_symbols(&["H-1"]).unwrap();
        assert!(matches!(
            comp.mass_fraction("H-1").unwrap_err(),
            CompositionError::NotFinalized
        ));
        assert!(matches!(
            comp.mean_particle_mass().unwrap_err(),
            CompositionError::NotFinalized
        ));
        assert!(matches!(
            comp.species_index("H-1").unwrap_err(),
            CompositionError::NotFinalized
        ));
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut comp = solar_ish();
        let before = comp.hash_exact();
        comp.finalize(false).unwrap();
        comp.finalize(true).unwrap();
        assert_eq!(comp.hash_exact(), before);
        assert_eq!(comp.mass_fraction("H-1").unwrap(), 0.7);
    }

    #[test]
    fn finalize_with_norm_rescales_to_unit_sum() {
        let mut comp =
            Composition::from_fractions(&["H-1", "He-4"], &[0.2, 0.2], FractionMode::MassFraction)
                .unwrap();
        comp.finalize(true).unwrap();
        let sum: f64 = comp.mass_fractions().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((comp.mass_fraction("H-1").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn finalize_rejects_non_finite_and_negative_values() {
        let mut comp = Composition::from_symbols(&["H-1"]).unwrap();
        comp.set_mass_fraction("H-1", f64::NAN).unwrap();
        assert!(matches!(
            comp.finalize(false).unwrap_err(),
            CompositionError::NonFiniteAbundance { .. }
        ));

        comp.set_mass_fraction("H-1", -0.1).unwrap();
        assert!(matches!(
            comp.finalize(false).unwrap_err(),
            CompositionError::NegativeAbundance { .. }
        ));
    }

    #[test]
    fn finalize_rejects_zero_sum_in_both_paths() {
        let mut comp = Composition::from_symbols(&["H-1", "He-4"]).unwrap();
        assert!(matches!(
            comp.finalize(true).unwrap_err(),
            CompositionError::EmptyNormalization
        ));
        assert!(matches!(
            comp.finalize(false).unwrap_err(),
            CompositionError::EmptyNormalization
        ));
        assert!(!comp.is_finalized());
    }

    #[test]
    fn failed_zero_sum_finalize_leaves_values_intact_and_recoverable() {
        let mut comp = Composition::from_symbols(&["H-1", "He-4"]).unwrap();
        assert!(comp.finalize(false).is_err());

        // The failed finalize wrote nothing: the stored values are still the
        // zero defaults, and the aggregate accepts values and finalizes
        // normally afterwards.
        let old = comp
            .set_mass_fractions(&["H-1", "He-4"], &[0.7, 0.3])
            .unwrap();
        assert_eq!(old, vec![0.0, 0.0]);
        comp.finalize(false).unwrap();
        assert!(comp.number_fraction("H-1").unwrap().is_finite());
        assert!(comp.mean_particle_mass().unwrap().is_finite());
        assert!(
            comp.number_fractions()
                .unwrap()
                .values()
                .all(|n| n.is_finite())
        );
    }

    #[test]
    fn mutation_after_finalize_requires_re_finalization() {
        let mut comp = solar_ish();
        comp.set_mass_fraction("H-1", 0.8).unwrap();
        assert!(!comp.is_finalized());
        assert!(matches!(
            comp.mass_fraction("H-1").unwrap_err(),
            CompositionError::NotFinalized
        ));
        comp.finalize(false).unwrap();
        assert_eq!(comp.mass_fraction("H-1").unwrap(), 0.8);
    }

    #[test]
    fn worked_scenario_canonical_composition_and_mean_mass() {
        let comp = solar_ish();
        let canonical = comp.canonical_composition(true).unwrap();
        assert_eq!(canonical.x, 0.7);
        assert_eq!(canonical.y, 0.3);
        assert_eq!(canonical.z, 0.0);

        let expected = 1.0 / (0.7 / 1.0 + 0.3 / 4.0);
        assert!((comp.mean_particle_mass().unwrap() - expected).abs() < 1e-12);
        assert!((comp.specific_number_density().unwrap() - 0.775).abs() < 1e-12);
    }

    #[test]
    fn canonical_composition_sums_to_one_with_h_and_he() {
        let mut comp = Composition::from_fractions(
            &["H-1", "H-2", "He-3", "He-4", "C-12", "O-16"],
            &[0.69, 0.01, 0.005, 0.275, 0.01, 0.01],
            FractionMode::MassFraction,
        )
        .unwrap();
        comp.finalize(true).unwrap();
        let canonical = comp.canonical_composition(true).unwrap();
        assert!((canonical.x + canonical.y + canonical.z - 1.0).abs() < 1e-12);
        assert!((canonical.x - 0.70).abs() < 1e-12);
        assert!((canonical.y - 0.28).abs() < 1e-12);
    }

    #[test]
    fn strict_canonical_composition_fails_without_helium() {
        let mut comp =
            Composition::from_fractions(&["H-1", "C-12"], &[0.5, 0.5], FractionMode::MassFraction)
                .unwrap();
        comp.finalize(false).unwrap();
        assert!(matches!(
            comp.canonical_composition(true).unwrap_err(),
            CompositionError::MissingCanonicalGroup { group: "helium" }
        ));
        let lenient = comp.canonical_composition(false).unwrap();
        assert_eq!(lenient.y, 0.0);
        assert_eq!(lenient.z, 0.5);
    }

    #[test]
    fn number_fractions_follow_the_conversion_formula() {
        let comp = solar_ish();
        let density = 0.7 / 1.0 + 0.3 / 4.0;
        let n_h1 = (0.7 / 1.0) / density;
        let n_he4 = (0.3 / 4.0) / density;
        assert!((comp.number_fraction("H-1").unwrap() - n_h1).abs() < 1e-12);
        assert!((comp.number_fraction("He-4").unwrap() - n_he4).abs() < 1e-12);
        let sum: f64 = comp.number_fractions().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn molar_abundance_is_mass_fraction_over_mass_number() {
        let comp = solar_ish();
        assert!((comp.molar_abundance("He-4").unwrap() - 0.3 / 4.0).abs() < 1e-15);
        let total: f64 = comp.molar_abundances().unwrap().values().sum();
        assert!((1.0 / total - comp.mean_particle_mass().unwrap()).abs() < 1e-12);
    }

    #[test]
    fn set_molar_abundance_round_trips_with_getter() {
        let mut comp = Composition::from_symbols(&["C-12"]).unwrap();
        let old = comp.set_molar_abundance("C-12", 0.01).unwrap();
        assert_eq!(old, 0.0);
        comp.finalize(false).unwrap();
        assert!((comp.molar_abundance("C-12").unwrap() - 0.01).abs() < 1e-15);
        assert!((comp.mass_fraction("C-12").unwrap() - 0.12).abs() < 1e-15);
    }

    #[test]
    fn mass_to_number_to_mass_round_trip_is_tight() {
        let symbols = ["H-1", "He-4", "C-12", "O-16", "Fe-56"];
        let fractions = [0.55, 0.30, 0.08, 0.05, 0.02];
        let mut comp =
            Composition::from_fractions(&symbols, &fractions, FractionMode::MassFraction).unwrap();
        comp.finalize(false).unwrap();

        comp.set_composition_mode(false).unwrap();
        assert_eq!(comp.mode(), FractionMode::NumberFraction);
        comp.set_composition_mode(true).unwrap();

        for (symbol, &expected) in symbols.iter().zip(&fractions) {
            let got = comp.mass_fraction(symbol).unwrap();
            assert!(
                ((got - expected) / expected).abs() < 1e-9,
                "{symbol}: {got} vs {expected}"
            );
        }
    }

    #[test]
    fn species_index_misses_escalate_like_other_keyed_lookups() {
        let comp = solar_ish();
        assert!(matches!(
            comp.species_index("Fe-56").unwrap_err(),
            CompositionError::Species(SpeciesError::UnregisteredSymbol { .. })
        ));
        assert!(matches!(
            comp.species_index("Xx-99").unwrap_err(),
            CompositionError::Species(SpeciesError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn set_composition_mode_requires_finalized_and_is_noop_on_same_mode() {
        let mut comp = Composition::from_symbols(&["H-1"]).unwrap();
        assert!(matches!(
            comp.set_composition_mode(false).unwrap_err(),
            CompositionError::NotFinalized
        ));

        let mut comp = solar_ish();
        let before = comp.hash_exact();
        comp.set_composition_mode(true).unwrap();
        assert_eq!(comp.hash_exact(), before);
    }

    #[test]
    fn mode_switch_preserves_derived_mass_fractions() {
        let mut comp = solar_ish();
        comp.set_composition_mode(false).unwrap();
        assert!((comp.mass_fraction("H-1").unwrap() - 0.7).abs() < 1e-12);
        let density = 0.7 / 1.0 + 0.3 / 4.0;
        let expected_n = (0.7 / 1.0) / density;
        assert!((comp.number_fraction("H-1").unwrap() - expected_n).abs() < 1e-12);
    }

    #[test]
    fn mix_endpoints_reproduce_the_operands() {
        let a = solar_ish();
        let mut b = Composition::from_fractions(
            &["H-1", "He-4"],
            &[0.5, 0.5],
            FractionMode::MassFraction,
        )
        .unwrap();
        b.finalize(false).unwrap();

        assert_eq!(a.mix(&b, 0.0).unwrap(), a);
        assert_eq!(a.mix(&b, 1.0).unwrap(), b);
    }

    #[test]
    fn mix_interpolates_over_the_species_union() {
        let a = solar_ish();
        let mut b =
            Composition::from_fractions(&["C-12"], &[1.0], FractionMode::MassFraction).unwrap();
        b.finalize(false).unwrap();

        let mixed = a.mix(&b, 0.25).unwrap();
        assert!(mixed.is_finalized());
        assert!((mixed.mass_fraction("H-1").unwrap() - 0.7 * 0.75).abs() < 1e-12);
        assert!((mixed.mass_fraction("He-4").unwrap() - 0.3 * 0.75).abs() < 1e-12);
        assert!((mixed.mass_fraction("C-12").unwrap() - 0.25).abs() < 1e-12);
        let sum: f64 = mixed.mass_fractions().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mix_rejects_bad_fractions_modes_and_states() {
        let a = solar_ish();
        let b = solar_ish();
        assert!(matches!(
            a.mix(&b, 1.5).unwrap_err(),
            CompositionError::MixFractionOutOfRange { .. }
        ));
        assert!(matches!(
            a.mix(&b, f64::NAN).unwrap_err(),
            CompositionError::MixFractionOutOfRange { .. }
        ));

        let unfinalized = Composition::from_symbols(&["H-1"]).unwrap();
        assert!(matches!(
            a.mix(&unfinalized, 0.5).unwrap_err(),
            CompositionError::NotFinalized
        ));

        let mut number_mode =
            Composition::from_fractions(&["H-1"], &[1.0], FractionMode::NumberFraction).unwrap();
        number_mode.finalize(false).unwrap();
        assert!(matches!(
            a.mix(&number_mode, 0.5).unwrap_err(),
            CompositionError::IncompatibleModes
        ));
    }

    #[test]
    fn add_operator_is_an_equal_parts_mix() {
        let a = solar_ish();
        let mut b = Composition::from_fractions(
            &["H-1", "He-4"],
            &[0.5, 0.5],
            FractionMode::MassFraction,
        )
        .unwrap();
        b.finalize(false).unwrap();

        let sum = (&a + &b).unwrap();
        assert_eq!(sum, a.mix(&b, 0.5).unwrap());
        assert!((sum.mass_fraction("H-1").unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn subset_norm_retains_and_rescales() {
        let mut comp = Composition::from_fractions(
            &["H-1", "He-4", "C-12", "O-16"],
            &[0.6, 0.3, 0.06, 0.04],
            FractionMode::MassFraction,
        )
        .unwrap();
        comp.finalize(false).unwrap();

        let metals = comp.subset(&["C-12", "O-16"], "norm").unwrap();
        assert_eq!(metals.registered_symbols(), vec!["C-12", "O-16"]);
        assert!((metals.mass_fraction("C-12").unwrap() - 0.6).abs() < 1e-12);
        assert!((metals.mass_fraction("O-16").unwrap() - 0.4).abs() < 1e-12);
        let sum: f64 = metals.mass_fractions().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn subset_silently_omits_absent_symbols_and_rejects_unknown_methods() {
        let comp = solar_ish();
        let sub = comp.subset(&["H-1", "Fe-56"], "norm").unwrap();
        assert_eq!(sub.registered_symbols(), vec!["H-1"]);
        assert_eq!(sub.mass_fraction("H-1").unwrap(), 1.0);

        assert!(matches!(
            comp.subset(&["H-1"], "raw").unwrap_err(),
            CompositionError::UnknownSubsetMethod { .. }
        ));
    }

    #[test]
    fn canonical_order_is_ascending_mass_and_indexing_is_inverse() {
        let mut comp = Composition::from_fractions(
            &["Fe-56", "H-1", "C-12", "He-4"],
            &[0.1, 0.6, 0.1, 0.2],
            FractionMode::MassFraction,
        )
        .unwrap();
        comp.finalize(false).unwrap();

        let mut last_mass = 0.0;
        for i in 0..comp.len() {
            let species = comp.species_at(i).unwrap();
            assert!(species.mass() >= last_mass);
            last_mass = species.mass();
            assert_eq!(comp.species_index(species.name()).unwrap(), i);
        }
        assert_eq!(comp.species_at(0).unwrap().name(), "H-1");
        assert_eq!(comp.species_at(3).unwrap().name(), "Fe-56");
        assert!(matches!(
            comp.species_at(4).unwrap_err(),
            CompositionError::IndexOutOfRange { index: 4, len: 4 }
        ));
    }

    #[test]
    fn vectors_follow_the_canonical_order() {
        let mut comp = Composition::from_fractions(
            &["He-4", "H-1"],
            &[0.3, 0.7],
            FractionMode::MassFraction,
        )
        .unwrap();
        comp.finalize(false).unwrap();

        let x = comp.mass_fraction_vector().unwrap();
        assert_eq!(x.len(), 2);
        assert_eq!(x[0], 0.7);
        assert_eq!(x[1], 0.3);

        let y = comp.molar_abundance_vector().unwrap();
        assert!((y[0] - 0.7).abs() < 1e-15);
        assert!((y[1] - 0.3 / 4.0).abs() < 1e-15);

        let n = comp.number_fraction_vector().unwrap();
        assert!((n.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entries_iterate_in_canonical_order_with_parent_context() {
        let comp = solar_ish();
        let entries: Vec<CompositionEntry> = comp.entries().unwrap().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol(), "H-1");
        assert_eq!(entries[1].symbol(), "He-4");
        assert_eq!(entries[0].mass_fraction(), 0.7);
        let density = 0.775;
        assert!((entries[1].number_fraction() - (0.3 / 4.0) / density).abs() < 1e-12);

        let unfinalized = Composition::from_symbols(&["H-1"]).unwrap();
        assert!(unfinalized.entries().is_err());
    }

    #[test]
    fn composition_of_pairs_entry_with_global_summary() {
        let comp = solar_ish();
        let (entry, global) = comp.composition_of("He-4").unwrap();
        assert_eq!(entry.symbol(), "He-4");
        assert_eq!(entry.rel_abundance(), 0.3);
        assert!((global.specific_number_density - 0.775).abs() < 1e-12);

        let (all, global) = comp.composition().unwrap();
        assert_eq!(all.len(), 2);
        assert!((1.0 / global.specific_number_density - global.mean_particle_mass).abs() < 1e-12);
    }

    #[test]
    fn equality_and_hash_are_insertion_order_independent() {
        let mut a = Composition::new();
        a.register_symbols(&["H-1", "He-4", "C-12"]).unwrap();
        a.set_mass_fractions(&["H-1", "He-4", "C-12"], &[0.7, 0.25, 0.05])
            .unwrap();
        a.finalize(false).unwrap();

        let mut b = Composition::new();
        b.register_symbols(&["C-12", "H-1", "He-4"]).unwrap();
        b.set_mass_fraction("C-12", 0.05).unwrap();
        b.set_mass_fraction("He-4", 0.25).unwrap();
        b.set_mass_fraction("H-1", 0.7).unwrap();
        b.finalize(false).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.hash_exact(), b.hash_exact());
    }

    #[test]
    fn equality_is_bit_exact_not_tolerant() {
        let mut a = solar_ish();
        let b = solar_ish();
        assert_eq!(a, b);

        a.set_mass_fraction("H-1", 0.7 + 1e-15).unwrap();
        a.finalize(false).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.hash_exact(), b.hash_exact());
    }

    #[test]
    fn compositions_work_as_hash_map_keys() {
        use std::collections::HashMap;

        let mut table: HashMap<Composition, &str> = HashMap::new();
        table.insert(solar_ish(), "solar");
        assert_eq!(table.get(&solar_ish()), Some(&"solar"));
    }

    #[test]
    fn from_molar_abundances_is_immediately_queryable() {
        let comp = Composition::from_molar_abundances([("H-1", 0.7), ("He-4", 0.075)]).unwrap();
        assert!(comp.is_finalized());
        assert!((comp.mass_fraction("H-1").unwrap() - 0.7).abs() < 1e-15);
        assert!((comp.mass_fraction("He-4").unwrap() - 0.3).abs() < 1e-15);
        assert!((comp.molar_abundance("He-4").unwrap() - 0.075).abs() < 1e-15);
    }

    #[test]
    fn from_molar_abundances_merges_duplicates_last_write_wins() {
        let comp =
            Composition::from_molar_abundances([("H-1", 0.1), ("H-1", 0.7)]).unwrap();
        assert!((comp.molar_abundance("H-1").unwrap() - 0.7).abs() < 1e-15);
    }

    #[test]
    fn from_fractions_rejects_length_mismatch() {
        let err =
            Composition::from_fractions(&["H-1", "He-4"], &[0.7], FractionMode::MassFraction)
                .unwrap_err();
        assert!(matches!(
            err,
            CompositionError::LengthMismatch { symbols: 2, values: 1 }
        ));
    }

    #[test]
    fn from_species_fractions_builds_by_species() {
        let registry = SpeciesRegistry::global();
        let species = [
            registry.lookup("H-1").unwrap().clone(),
            registry.lookup("He-4").unwrap().clone(),
        ];
        let mut comp =
            Composition::from_species_fractions(&species, &[0.7, 0.3], FractionMode::MassFraction)
                .unwrap();
        comp.finalize(false).unwrap();
        assert_eq!(comp.mass_fraction("H-1").unwrap(), 0.7);
        assert_eq!(comp.species_index(&species[1]).unwrap(), 1);
    }

    #[test]
    fn with_registry_supports_synthetic_registries() {
        let registry: &'static SpeciesRegistry = Box::leak(Box::new(SpeciesRegistry::new([
            Species::new("H", 1, 1.0, 0.0, 0.0, 0.0, "stable").unwrap(),
            Species::new("He", 4, 4.0, 0.0, 7073.915, 0.0, "stable").unwrap(),
        ])));
        let mut comp = Composition::with_registry(registry);
        comp.register_symbols(&["H-1", "He-4"]).unwrap();
        comp.set_mass_fractions(&["H-1", "He-4"], &[0.75, 0.25])
            .unwrap();
        comp.finalize(false).unwrap();

        let expected = 1.0 / (0.75 / 1.0 + 0.25 / 4.0);
        assert!((comp.mean_particle_mass().unwrap() - expected).abs() < 1e-12);
        assert!(comp.register_symbol("C-12").is_err());
    }

    #[test]
    fn display_summarizes_the_aggregate() {
        let comp = solar_ish();
        let rendered = comp.to_string();
        assert!(rendered.contains("mass fraction mode"));
        assert!(rendered.contains("H-1=0.7"));
        assert!(rendered.contains("He-4=0.3"));
    }
}
