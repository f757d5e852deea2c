use super::error::CompositionError;
use crate::chem::species::Species;
use serde::{Deserialize, Serialize};

/// Interpretation of the scalar abundances stored by a composition.
///
/// The mode applies to the aggregate as a whole: every stored value is either
/// a mass fraction or a number fraction, never a mixture of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractionMode {
    MassFraction,
    NumberFraction,
}

/// Aggregate summary of a finalized composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalComposition {
    /// Moles of particles per unit mass, Σ X_i / A_i.
    pub specific_number_density: f64,
    /// Mean particle mass in amu, the reciprocal of the specific number
    /// density.
    pub mean_particle_mass: f64,
}

/// One species' contribution within a composition, snapshotted together with
/// the aggregate context it was taken from.
///
/// The stored scalar keeps the exact value the parent holds; the captured
/// [`GlobalComposition`] lets the entry derive either fraction on its own, and
/// the `_with` variants substitute an explicit context when the caller wants
/// to reinterpret the entry outside its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionEntry {
    species: Species,
    value: f64,
    mode: FractionMode,
    global: GlobalComposition,
}

impl CompositionEntry {
    pub(crate) fn new(
        species: Species,
        value: f64,
        mode: FractionMode,
        global: GlobalComposition,
    ) -> Self {
        Self {
            species,
            value,
            mode,
            global,
        }
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn symbol(&self) -> &str {
        self.species.name()
    }

    /// The raw stored scalar, interpreted under [`Self::mode`].
    pub fn rel_abundance(&self) -> f64 {
        self.value
    }

    pub fn mode(&self) -> FractionMode {
        self.mode
    }

    /// The mass fraction, derived with the parent's mean particle mass when
    /// the stored scalar is a number fraction.
    pub fn mass_fraction(&self) -> f64 {
        self.mass_fraction_with(self.global.mean_particle_mass)
    }

    /// The mass fraction under an explicitly supplied mean molar mass (amu).
    pub fn mass_fraction_with(&self, mean_molar_mass: f64) -> f64 {
        match self.mode {
            FractionMode::MassFraction => self.value,
            FractionMode::NumberFraction => {
                self.value * self.species.a() as f64 / mean_molar_mass
            }
        }
    }

    /// The number fraction, derived with the parent's specific number density
    /// when the stored scalar is a mass fraction.
    pub fn number_fraction(&self) -> f64 {
        self.number_fraction_with(self.global.specific_number_density)
    }

    /// The number fraction under an explicitly supplied total-moles context
    /// (moles of particles per unit mass).
    pub fn number_fraction_with(&self, total_moles: f64) -> f64 {
        match self.mode {
            FractionMode::MassFraction => (self.value / self.species.a() as f64) / total_moles,
            FractionMode::NumberFraction => self.value,
        }
    }

    /// Moles of this species per unit mass, X_i / A_i.
    pub fn molar_abundance(&self) -> f64 {
        self.mass_fraction() / self.species.a() as f64
    }
}

/// The hydrogen/helium/metals summary (X, Y, Z) of a composition.
///
/// `x` is the combined mass fraction of all registered hydrogen isotopes,
/// `y` of all helium isotopes, and `z` the direct sum of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalComposition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CanonicalComposition {
    /// Sums per-species mass fractions into the (X, Y, Z) triple.
    ///
    /// In strict mode a missing hydrogen or helium group is an error; in
    /// lenient mode it contributes exactly zero.
    pub(crate) fn from_mass_fractions<'a, I>(
        fractions: I,
        strict: bool,
    ) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = (&'a Species, f64)>,
    {
        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
        let (mut has_h, mut has_he) = (false, false);
        for (species, mass_fraction) in fractions {
            match species.el() {
                "H" => {
                    has_h = true;
                    x += mass_fraction;
                }
                "He" => {
                    has_he = true;
                    y += mass_fraction;
                }
                _ => z += mass_fraction,
            }
        }
        if strict {
            if !has_h {
                return Err(CompositionError::MissingCanonicalGroup { group: "hydrogen" });
            }
            if !has_he {
                return Err(CompositionError::MissingCanonicalGroup { group: "helium" });
            }
        }
        Ok(Self { x, y, z })
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

    fn c12() -> Species {
        Species::new("C", 12, 12.0, 0.0, 7680.144, 0.0, "stable").unwrap()
    }

    // Context for {H-1: 0.7, He-4: 0.3} in mass-fraction mode.
    fn context() -> GlobalComposition {
        let density = 0.7 / 1.0 + 0.3 / 4.0;
        GlobalComposition {
            specific_number_density: density,
            mean_particle_mass: 1.0 / density,
        }
    }

    #[test]
    fn mass_mode_entry_returns_stored_value_as_mass_fraction() {
        let entry = CompositionEntry::new(h1(), 0.7, FractionMode::MassFraction, context());
        assert_eq!(entry.mass_fraction(), 0.7);
        assert_eq!(entry.rel_abundance(), 0.7);
    }

    #[test]
    fn mass_mode_entry_derives_number_fraction_from_context() {
        let entry = CompositionEntry::new(he4(), 0.3, FractionMode::MassFraction, context());
        let expected = (0.3 / 4.0) / (0.7 / 1.0 + 0.3 / 4.0);
        assert!((entry.number_fraction() - expected).abs() < 1e-12);
    }

    #[test]
    fn number_mode_entry_derives_mass_fraction_from_context() {
        let density = 0.7 / 1.0 + 0.3 / 4.0;
        let n_he4 = (0.3 / 4.0) / density;
        let entry = CompositionEntry::new(he4(), n_he4, FractionMode::NumberFraction, context());
        assert!((entry.mass_fraction() - 0.3).abs() < 1e-12);
        assert_eq!(entry.number_fraction(), n_he4);
    }

    #[test]
    fn explicit_context_overrides_the_parent_snapshot() {
        let entry = CompositionEntry::new(h1(), 0.5, FractionMode::MassFraction, context());
        assert!((entry.number_fraction_with(1.0) - 0.5).abs() < 1e-12);

        let entry = CompositionEntry::new(he4(), 0.25, FractionMode::NumberFraction, context());
        assert!((entry.mass_fraction_with(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn molar_abundance_is_mass_fraction_over_mass_number() {
        let entry = CompositionEntry::new(he4(), 0.3, FractionMode::MassFraction, context());
        assert!((entry.molar_abundance() - 0.3 / 4.0).abs() < 1e-15);
    }

    #[test]
    fn canonical_composition_sums_isotope_groups() {
        let h = h1();
        let he = he4();
        let c = c12();
        let canonical = CanonicalComposition::from_mass_fractions(
            [(&h, 0.7), (&he, 0.25), (&c, 0.05)],
            true,
        )
        .unwrap();
        assert!((canonical.x - 0.7).abs() < 1e-15);
        assert!((canonical.y - 0.25).abs() < 1e-15);
        assert!((canonical.z - 0.05).abs() < 1e-15);
    }

    #[test]
    fn strict_canonical_composition_requires_h_and_he() {
        let he = he4();
        let err =
            CanonicalComposition::from_mass_fractions([(&he, 1.0)], true).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::MissingCanonicalGroup { group: "hydrogen" }
        ));

        let h = h1();
        let err = CanonicalComposition::from_mass_fractions([(&h, 1.0)], true).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::MissingCanonicalGroup { group: "helium" }
        ));
    }

    #[test]
    fn lenient_canonical_composition_treats_missing_groups_as_zero() {
        let c = c12();
        let canonical =
            CanonicalComposition::from_mass_fractions([(&c, 1.0)], false).unwrap();
        assert_eq!(canonical.x, 0.0);
        assert_eq!(canonical.y, 0.0);
        assert_eq!(canonical.z, 1.0);
    }
}
