use crate::errors::ConfigError;
use crate::models::ModificationDescriptor;

/// Unmodified residue masses indexed by `residue - 'A'`.
///
/// Zero marks letters that are not a residue we know how to weigh (B, J, O, U, Z).
const UNMODIFIED_MASSES: [f64; 26] = [
    71.03711381, // A
    0.0,         // B
    103.0091845, // C
    115.0269431, // D
    129.0425931, // E
    147.0684139, // F
    57.02146374, // G
    137.0589119, // H
    113.084064,  // I
    0.0,         // J
    128.0949631, // K
    113.084064,  // L
    131.0404847, // M
    114.0429275, // N
    0.0,         // O
    97.05276388, // P
    128.0585775, // Q
    156.1011111, // R
    87.03202844, // S
    101.0476785, // T
    0.0,         // U
    99.06841395, // V
    186.079313,  // W
    113.084064,  // X
    163.0633286, // Y
    0.0,         // Z
];

/// Residue mass table with static modifications folded in.
///
/// Built once from the configuration and shared read-only by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct AminoAcidMasses {
    masses: [f64; 26],
    n_term: f64,
    c_term: f64,
}

impl Default for AminoAcidMasses {
    fn default() -> Self {
        Self {
            masses: UNMODIFIED_MASSES,
            n_term: 0.0,
            c_term: 0.0,
        }
    }
}

fn residue_index(aa: char) -> Option<usize> {
    if aa.is_ascii_uppercase() {
        Some(aa as usize - 'A' as usize)
    } else {
        None
    }
}

impl AminoAcidMasses {
    /// Builds the table applying every static modification.
    pub fn with_static_mods(static_mods: &[ModificationDescriptor]) -> Result<Self, ConfigError> {
        let mut out = Self::default();
        for m in static_mods {
            for aa in m.residues.chars() {
                if !out.modify_residue(aa, m.mass) {
                    return Err(ConfigError::InvalidStaticModResidue {
                        symbol: m.symbol,
                        residue: aa,
                    });
                }
            }
            if m.n_term {
                out.n_term += m.mass;
            }
            if m.c_term {
                out.c_term += m.mass;
            }
        }
        Ok(out)
    }

    /// Mass of a residue, `None` for characters that are not a known residue.
    pub fn residue_mass(&self, aa: char) -> Option<f64> {
        let mass = self.masses[residue_index(aa)?];
        if mass == 0.0 { None } else { Some(mass) }
    }

    /// Adds `delta` to the residue mass. Returns false if `aa` is not a residue letter.
    pub fn modify_residue(&mut self, aa: char, delta: f64) -> bool {
        match residue_index(aa) {
            Some(i) => {
                self.masses[i] += delta;
                true
            }
            None => false,
        }
    }

    pub fn n_term_mass(&self) -> f64 {
        self.n_term
    }

    pub fn c_term_mass(&self) -> f64 {
        self.c_term
    }
}
