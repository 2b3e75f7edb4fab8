mod centroid;
mod peptide;
mod peptide_parser;
mod scan;

pub use centroid::Centroid;
pub use peptide::{
    ModificationDescriptor,
    PeakMatch,
    Peptide,
    PeptideMods,
    PlacedMod,
};
pub use peptide_parser::PeptideParser;
pub use scan::{
    Precursor,
    Scan,
};
