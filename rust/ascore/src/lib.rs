pub mod config;
pub mod data_sources;
pub mod errors;
pub mod filters;
pub mod fragment_mass;
pub mod mass;
pub mod matching;
pub mod models;
pub mod scoring;

pub use config::{
    AScoreOptions,
    ScoringConfig,
};
pub use data_sources::{
    ScanCache,
    ScanSource,
};
pub use models::{
    Centroid,
    ModificationDescriptor,
    Peptide,
    PeptideParser,
    Precursor,
    Scan,
};
pub use scoring::{
    AScoreCalculator,
    AScoreOutput,
    SiteScore,
};
