//! Built-in nuclide dataset used to populate the global species registry.
//!
//! Values are AME-derived: atomic mass and uncertainty in amu, binding energy
//! per nucleon in keV, beta-decay Q value in keV. The beta code marks the slow
//! decay direction (`"B-"`, `"B+"`, `"EC"`) or `"stable"` for beta-stable
//! nuclides. The selection covers the isotopes stellar-network compositions
//! actually carry: the full light-element chains through the iron group, plus
//! a spread of heavier beta-stable reference nuclides.

#[derive(Debug, Clone, Copy)]
pub(crate) struct NuclideRecord {
    pub el: &'static str,
    pub a: u32,
    pub mass: f64,
    pub mass_unc: f64,
    pub binding_energy: f64,
    pub beta_decay_energy: f64,
    pub beta_code: &'static str,
}

pub(crate) static NUCLIDES: &[NuclideRecord] = &[
    // el, A, mass (amu), mass unc, BE/A (keV), beta Q (keV), beta code
    NuclideRecord { el: "H", a: 1, mass: 1.00782503190, mass_unc: 1.4e-10, binding_energy: 0.0, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "H", a: 2, mass: 2.01410177784, mass_unc: 2.2e-10, binding_energy: 1112.283, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "H", a: 3, mass: 3.01604928132, mass_unc: 8.0e-11, binding_energy: 2827.266, beta_decay_energy: 18.592, beta_code: "B-" },
    NuclideRecord { el: "He", a: 3, mass: 3.01602932007, mass_unc: 6.0e-11, binding_energy: 2572.681, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "He", a: 4, mass: 4.00260325413, mass_unc: 1.6e-10, binding_energy: 7073.915, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Li", a: 6, mass: 6.01512288742, mass_unc: 1.5e-9, binding_energy: 5332.331, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Li", a: 7, mass: 7.01600343666, mass_unc: 4.5e-9, binding_energy: 5606.439, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Be", a: 7, mass: 7.016928717, mass_unc: 7.6e-8, binding_energy: 5371.548, beta_decay_energy: 861.82, beta_code: "EC" },
    NuclideRecord { el: "Be", a: 9, mass: 9.012183065, mass_unc: 8.2e-8, binding_energy: 6462.668, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "B", a: 10, mass: 10.01293695, mass_unc: 4.1e-7, binding_energy: 6475.083, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "B", a: 11, mass: 11.00930536, mass_unc: 4.5e-7, binding_energy: 6927.732, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "C", a: 12, mass: 12.0, mass_unc: 0.0, binding_energy: 7680.144, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "C", a: 13, mass: 13.00335483507, mass_unc: 2.3e-10, binding_energy: 7469.849, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "C", a: 14, mass: 14.00324198843, mass_unc: 4.0e-9, binding_energy: 7520.319, beta_decay_energy: 156.475, beta_code: "B-" },
    NuclideRecord { el: "N", a: 13, mass: 13.00573861, mass_unc: 2.9e-7, binding_energy: 7238.863, beta_decay_energy: 2220.47, beta_code: "B+" },
    NuclideRecord { el: "N", a: 14, mass: 14.00307400443, mass_unc: 2.0e-10, binding_energy: 7475.614, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "N", a: 15, mass: 15.00010889888, mass_unc: 6.0e-10, binding_energy: 7699.460, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "O", a: 15, mass: 15.00306562, mass_unc: 5.3e-7, binding_energy: 7463.692, beta_decay_energy: 2754.17, beta_code: "B+" },
    NuclideRecord { el: "O", a: 16, mass: 15.99491461957, mass_unc: 1.7e-10, binding_energy: 7976.206, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "O", a: 17, mass: 16.99913175650, mass_unc: 6.9e-10, binding_energy: 7750.729, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "O", a: 18, mass: 17.99915961286, mass_unc: 7.6e-10, binding_energy: 7767.097, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "F", a: 18, mass: 18.00093733, mass_unc: 5.0e-7, binding_energy: 7631.638, beta_decay_energy: 1655.9, beta_code: "B+" },
    NuclideRecord { el: "F", a: 19, mass: 18.99840316273, mass_unc: 9.2e-10, binding_energy: 7779.018, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ne", a: 20, mass: 19.99244017617, mass_unc: 1.7e-9, binding_energy: 8032.240, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ne", a: 21, mass: 20.99384668, mass_unc: 4.0e-8, binding_energy: 7971.713, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ne", a: 22, mass: 21.99138511, mass_unc: 1.8e-8, binding_energy: 8080.465, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Na", a: 23, mass: 22.98976928196, mass_unc: 1.9e-9, binding_energy: 8111.493, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Mg", a: 24, mass: 23.985041697, mass_unc: 1.4e-8, binding_energy: 8260.709, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Mg", a: 25, mass: 24.985836976, mass_unc: 5.0e-8, binding_energy: 8223.502, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Mg", a: 26, mass: 25.982592968, mass_unc: 3.1e-8, binding_energy: 8333.870, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Al", a: 26, mass: 25.986891904, mass_unc: 6.8e-8, binding_energy: 8149.765, beta_decay_energy: 4004.14, beta_code: "B+" },
    NuclideRecord { el: "Al", a: 27, mass: 26.98153853, mass_unc: 1.1e-7, binding_energy: 8331.553, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Si", a: 28, mass: 27.97692653465, mass_unc: 4.4e-10, binding_energy: 8447.744, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Si", a: 29, mass: 28.97649466490, mass_unc: 5.2e-10, binding_energy: 8448.635, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Si", a: 30, mass: 29.973770136, mass_unc: 2.3e-8, binding_energy: 8520.654, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "P", a: 31, mass: 30.97376199842, mass_unc: 7.0e-10, binding_energy: 8481.167, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "S", a: 32, mass: 31.97207117441, mass_unc: 1.4e-9, binding_energy: 8493.129, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "S", a: 33, mass: 32.97145890985, mass_unc: 1.4e-9, binding_energy: 8497.630, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "S", a: 34, mass: 33.967867012, mass_unc: 4.7e-8, binding_energy: 8583.498, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Cl", a: 35, mass: 34.968852694, mass_unc: 3.8e-8, binding_energy: 8520.278, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Cl", a: 37, mass: 36.965902584, mass_unc: 5.5e-8, binding_energy: 8570.281, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ar", a: 36, mass: 35.967545105, mass_unc: 2.8e-8, binding_energy: 8519.909, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ar", a: 38, mass: 37.962732104, mass_unc: 2.1e-7, binding_energy: 8614.280, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ar", a: 40, mass: 39.96238312372, mass_unc: 2.4e-9, binding_energy: 8595.259, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "K", a: 39, mass: 38.96370648643, mass_unc: 4.9e-9, binding_energy: 8557.025, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "K", a: 40, mass: 39.963998166, mass_unc: 6.0e-8, binding_energy: 8538.090, beta_decay_energy: 1310.89, beta_code: "B-" },
    NuclideRecord { el: "Ca", a: 40, mass: 39.962590863, mass_unc: 2.2e-8, binding_energy: 8551.303, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ca", a: 44, mass: 43.955481561, mass_unc: 3.5e-7, binding_energy: 8658.175, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ti", a: 44, mass: 43.959689949, mass_unc: 7.5e-7, binding_energy: 8533.520, beta_decay_energy: 267.5, beta_code: "EC" },
    NuclideRecord { el: "Ti", a: 48, mass: 47.947940932, mass_unc: 7.9e-8, binding_energy: 8723.006, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Cr", a: 52, mass: 51.940504992, mass_unc: 2.4e-7, binding_energy: 8775.989, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Mn", a: 55, mass: 54.938043042, mass_unc: 2.9e-7, binding_energy: 8765.022, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Fe", a: 54, mass: 53.939608986, mass_unc: 3.7e-7, binding_energy: 8736.382, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Fe", a: 56, mass: 55.934936326, mass_unc: 2.9e-7, binding_energy: 8790.354, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Fe", a: 57, mass: 56.935392841, mass_unc: 2.9e-7, binding_energy: 8770.280, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Fe", a: 58, mass: 57.933274431, mass_unc: 3.4e-7, binding_energy: 8792.250, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Co", a: 59, mass: 58.933194290, mass_unc: 4.1e-7, binding_energy: 8768.035, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ni", a: 56, mass: 55.942128549, mass_unc: 4.3e-7, binding_energy: 8642.779, beta_decay_energy: 2132.9, beta_code: "B+" },
    NuclideRecord { el: "Ni", a: 58, mass: 57.935342414, mass_unc: 5.2e-7, binding_energy: 8732.059, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ni", a: 60, mass: 59.930785885, mass_unc: 5.2e-7, binding_energy: 8780.774, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ni", a: 62, mass: 61.928344871, mass_unc: 5.5e-7, binding_energy: 8794.553, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Cu", a: 63, mass: 62.929597119, mass_unc: 5.6e-7, binding_energy: 8752.138, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Zn", a: 64, mass: 63.929141772, mass_unc: 7.1e-7, binding_energy: 8735.905, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Sr", a: 88, mass: 87.905612254, mass_unc: 5.9e-7, binding_energy: 8732.595, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Ba", a: 138, mass: 137.905247059, mass_unc: 2.6e-7, binding_energy: 8393.422, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "Pb", a: 208, mass: 207.976652071, mass_unc: 1.2e-6, binding_energy: 7867.453, beta_decay_energy: 0.0, beta_code: "stable" },
    NuclideRecord { el: "U", a: 238, mass: 238.050786936, mass_unc: 1.6e-6, binding_energy: 7570.126, beta_decay_energy: 0.0, beta_code: "stable" },
];
