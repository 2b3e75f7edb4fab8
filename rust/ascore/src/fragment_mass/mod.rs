mod combinations;
mod ion_series;
mod peptide_generator;

pub use combinations::combinations;
pub use ion_series::{
    IonKind,
    IonSeries,
};
pub use peptide_generator::{
    FragmentIon,
    GeneratorOptions,
    IonRequest,
    NeutralLoss,
    PeptideGenerator,
};
