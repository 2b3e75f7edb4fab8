mod amino_acids;
pub mod constants;
mod tolerance;

pub use amino_acids::AminoAcidMasses;
pub use tolerance::{
    MassUnits,
    MzTolerance,
};
