use super::elements::element_z;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity and immutable physical constants of one nuclide.
///
/// A `Species` is constructed by a [`SpeciesRegistry`](super::registry::SpeciesRegistry)
/// (or directly, for synthetic test data) and never mutated afterwards.
/// Identity is carried by the `(Z, A)` pair and the `"El-A"` display name;
/// equality is by value over every field, with float fields compared
/// bit-exactly so that `Eq` and `Hash` stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    el: String,
    name: String,
    z: u32,
    n: u32,
    a: u32,
    mass: f64,
    mass_unc: f64,
    binding_energy: f64,
    beta_decay_energy: f64,
    beta_code: String,
}

impl Species {
    /// Builds a species from its element symbol and nuclear data, resolving
    /// the proton number from the periodic table. Returns `None` when the
    /// element symbol is unknown or the mass number is smaller than Z.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        el: &str,
        a: u32,
        mass: f64,
        mass_unc: f64,
        binding_energy: f64,
        beta_decay_energy: f64,
        beta_code: &str,
    ) -> Option<Self> {
        let z = element_z(el)?;
        if a < z {
            return None;
        }
        Some(Self {
            el: el.to_string(),
            name: format!("{el}-{a}"),
            z,
            n: a - z,
            a,
            mass,
            mass_unc,
            binding_energy,
            beta_decay_energy,
            beta_code: beta_code.to_string(),
        })
    }

    /// Splits an `"El-A"` symbol (e.g. `"Fe-56"`) into its element symbol and
    /// mass number, validating the element against the periodic table.
    pub fn parse_symbol(symbol: &str) -> Option<(&str, u32)> {
        let trimmed = symbol.trim();
        let (el, a_str) = trimmed.split_once('-')?;
        element_z(el)?;
        let a: u32 = a_str.parse().ok()?;
        if a == 0 { None } else { Some((el, a)) }
    }

    /// The element symbol, e.g. `"Fe"`.
    pub fn el(&self) -> &str {
        &self.el
    }

    /// The display name, `"El-A"`, e.g. `"Fe-56"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Proton number Z.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Neutron number N.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Mass number A = N + Z.
    pub fn a(&self) -> u32 {
        self.a
    }

    /// Neutron excess N − Z.
    pub fn nz(&self) -> i32 {
        self.n as i32 - self.z as i32
    }

    /// Atomic mass in amu.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Atomic mass uncertainty in amu.
    pub fn mass_unc(&self) -> f64 {
        self.mass_unc
    }

    /// Binding energy per nucleon in keV.
    pub fn binding_energy(&self) -> f64 {
        self.binding_energy
    }

    /// Beta-decay Q value in keV (zero for stable nuclides).
    pub fn beta_decay_energy(&self) -> f64 {
        self.beta_decay_energy
    }

    /// Beta-decay classification code (`"B-"`, `"B+"`, `"EC"`, `"stable"`, ...).
    pub fn beta_code(&self) -> &str {
        &self.beta_code
    }
}

impl PartialEq for Species {
    fn eq(&self, other: &Self) -> bool {
        self.el == other.el
            && self.name == other.name
            && self.z == other.z
            && self.n == other.n
            && self.a == other.a
            && self.mass.to_bits() == other.mass.to_bits()
            && self.mass_unc.to_bits() == other.mass_unc.to_bits()
            && self.binding_energy.to_bits() == other.binding_energy.to_bits()
            && self.beta_decay_energy.to_bits() == other.beta_decay_energy.to_bits()
            && self.beta_code == other.beta_code
    }
}

impl Eq for Species {}

impl Hash for Species {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal species share (name, Z, A), so hashing the identity fields
        // keeps Hash consistent with the full-value Eq.
        self.name.hash(state);
        self.z.hash(state);
        self.a.hash(state);
    }
}

impl Ord for Species {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ascending atomic mass, ties broken by Z then N. The trailing
        // comparisons keep cmp == Equal in agreement with the full-value Eq.
        self.mass
            .total_cmp(&other.mass)
            .then_with(|| self.z.cmp(&other.z))
            .then_with(|| self.n.cmp(&other.n))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.mass_unc.total_cmp(&other.mass_unc))
            .then_with(|| self.binding_energy.total_cmp(&other.binding_energy))
            .then_with(|| self.beta_decay_energy.total_cmp(&other.beta_decay_energy))
            .then_with(|| self.beta_code.cmp(&other.beta_code))
    }
}

impl PartialOrd for Species {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h1() -> Species {
        Species::new("H", 1, 1.00782503, 1.4e-10, 0.0, 0.0, "stable").unwrap()
    }

    fn he4() -> Species {
        Species::new("He", 4, 4.00260325, 1.6e-10, 7073.915, 0.0, "stable").unwrap()
    }

    #[test]
    fn new_derives_identity_fields() {
        let fe56 = Species::new("Fe", 56, 55.93493633, 4.9e-7, 8790.356, 0.0, "stable").unwrap();
        assert_eq!(fe56.el(), "Fe");
        assert_eq!(fe56.name(), "Fe-56");
        assert_eq!(fe56.z(), 26);
        assert_eq!(fe56.n(), 30);
        assert_eq!(fe56.a(), 56);
        assert_eq!(fe56.nz(), 4);
    }

    #[test]
    fn new_rejects_unknown_element_and_invalid_mass_number() {
        assert!(Species::new("Xx", 99, 99.0, 0.0, 0.0, 0.0, "stable").is_none());
        assert!(Species::new("Fe", 10, 10.0, 0.0, 0.0, 0.0, "stable").is_none());
    }

    #[test]
    fn parse_symbol_splits_valid_symbols() {
        assert_eq!(Species::parse_symbol("H-1"), Some(("H", 1)));
        assert_eq!(Species::parse_symbol("Fe-56"), Some(("Fe", 56)));
        assert_eq!(Species::parse_symbol(" He-4 "), Some(("He", 4)));
    }

    #[test]
    fn parse_symbol_rejects_malformed_input() {
        assert_eq!(Species::parse_symbol("H"), None);
        assert_eq!(Species::parse_symbol("Xx-99"), None);
        assert_eq!(Species::parse_symbol("Fe-"), None);
        assert_eq!(Species::parse_symbol("Fe-abc"), None);
        assert_eq!(Species::parse_symbol("Fe-0"), None);
        assert_eq!(Species::parse_symbol(""), None);
    }

    #[test]
    fn ordering_is_by_ascending_mass() {
        let mut species = vec![he4(), h1()];
        species.sort();
        assert_eq!(species[0].name(), "H-1");
        assert_eq!(species[1].name(), "He-4");
    }

    #[test]
    fn equality_is_bit_exact_over_all_fields() {
        let a = h1();
        let b = h1();
        assert_eq!(a, b);

        let c = Species::new("H", 1, 1.00782504, 1.4e-10, 0.0, 0.0, "stable").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn equal_species_hash_identically() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |s: &Species| {
            let mut hasher = DefaultHasher::new();
            s.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&h1()), hash(&h1()));
    }

    #[test]
    fn display_prints_el_a_name() {
        assert_eq!(h1().to_string(), "H-1");
        assert_eq!(he4().to_string(), "He-4");
    }
}
