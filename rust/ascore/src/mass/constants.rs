//! Monoisotopic masses used across fragment generation and filtering.

/// Hydrogen minus an electron.
pub const PROTON: f64 = 1.007276466879;
pub const HYDROGEN: f64 = 1.0078250321;
pub const ELECTRON: f64 = 0.000548579867;
/// Spacing between isotopes assuming averagine composition.
pub const NEUTRON: f64 = 1.00286864;
pub const NITROGEN: f64 = 14.0030740052;
pub const CARBON: f64 = 12.0;
pub const OXYGEN: f64 = 15.9949146221;
pub const WATER: f64 = 18.010564686;

/// Offset of the z-dot series before the electron correction.
pub const Z_ION_OFFSET: f64 = 2.99966565;

/// Precursor losses of phosphoric acid related groups (HPO3 and H3PO4).
pub const PHOSPHO_NEUTRAL_LOSSES: [f64; 2] = [79.96633, 97.97689];

/// Converts a neutral fragment mass to the m/z it shows up at with a given charge.
///
/// The neutral masses produced by the fragment generator already carry one proton.
///
/// Example:
/// ```
/// use ascore::mass::constants::{ion_mz, PROTON};
/// assert_eq!(ion_mz(500.0, 1), 500.0);
/// assert!((ion_mz(500.0, 2) - (500.0 + PROTON) / 2.0).abs() < 1e-12);
/// ```
pub fn ion_mz(mass: f64, charge: u8) -> f64 {
    (mass + ((charge as f64 - 1.0) * PROTON)) / charge as f64
}
