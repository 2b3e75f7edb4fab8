use std::fmt::Display;
use std::path::PathBuf;

/// Rejected configuration. Raised before any scoring happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownIonSeries {
        token: String,
    },
    UnknownUnits {
        units: String,
    },
    InvalidTolerance {
        tolerance: f64,
    },
    InvalidWindow {
        window: f64,
    },
    InvalidPeakDepth {
        depth: usize,
    },
    InvalidIntensityFraction {
        fraction: f64,
    },
    InvalidMaxPeptides {
        max_peptides: usize,
    },
    InvalidNeutralLoss {
        mass: f64,
        residues: String,
    },
    EmptyTargetModification,
    UnknownTargetSymbol {
        symbol: char,
    },
    DuplicateModSymbol {
        symbol: char,
    },
    InvalidStaticModResidue {
        symbol: char,
        residue: char,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIonSeries { token } => write!(f, "Unknown ion series: '{}'", token),
            Self::UnknownUnits { units } => {
                write!(f, "Unknown tolerance units: '{}' (expected ppm or da)", units)
            }
            Self::InvalidTolerance { tolerance } => {
                write!(f, "Tolerance must be positive and finite, got {}", tolerance)
            }
            Self::InvalidWindow { window } => {
                write!(f, "m/z window must be positive and finite, got {}", window)
            }
            Self::InvalidPeakDepth { depth } => {
                write!(f, "Max peak depth must be at least 1, got {}", depth)
            }
            Self::InvalidIntensityFraction { fraction } => write!(
                f,
                "Low intensity fraction must be in [0, 1), got {}",
                fraction
            ),
            Self::InvalidMaxPeptides { max_peptides } => {
                write!(f, "Max peptides must be at least 1, got {}", max_peptides)
            }
            Self::InvalidNeutralLoss { mass, residues } => write!(
                f,
                "Neutral loss needs a non zero mass and residues, got mass {} residues '{}'",
                mass, residues
            ),
            Self::EmptyTargetModification => {
                write!(f, "The target modification needs a symbol and residues")
            }
            Self::UnknownTargetSymbol { symbol } => write!(
                f,
                "Target modification '{}' is not defined in the diff mods",
                symbol
            ),
            Self::DuplicateModSymbol { symbol } => {
                write!(f, "Modification symbol '{}' is defined more than once", symbol)
            }
            Self::InvalidStaticModResidue { symbol, residue } => write!(
                f,
                "Static mod '{}' targets an unknown residue '{}'",
                symbol, residue
            ),
        }
    }
}

/// Invariant violations inside the statistics. These point to corrupted
/// candidate or filter state and are never clamped.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    NoTrials,
    NegativeTrials { trials: i64 },
    NegativeSuccesses { successes: i64 },
    SuccessesExceedTrials { successes: i64, trials: i64 },
    InvalidProbability { p: f64 },
    UnrankedPeaks,
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTrials => write!(f, "Binomial probability requested with no trials"),
            Self::NegativeTrials { trials } => write!(f, "Negative trials: {}", trials),
            Self::NegativeSuccesses { successes } => {
                write!(f, "Negative successes: {}", successes)
            }
            Self::SuccessesExceedTrials { successes, trials } => write!(
                f,
                "Successes ({}) greater than trials ({})",
                successes, trials
            ),
            Self::InvalidProbability { p } => write!(f, "Invalid probability: {}", p),
            Self::UnrankedPeaks => write!(f, "Ranks need to be assigned before scoring"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeptideParsingError {
    UnknownModSymbol { symbol: char, peptide: String },
    ModBeforeResidue { symbol: char, peptide: String },
}

impl Display for PeptideParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModSymbol { symbol, peptide } => write!(
                f,
                "Unknown modification symbol '{}' in peptide {}",
                symbol, peptide
            ),
            Self::ModBeforeResidue { symbol, peptide } => write!(
                f,
                "Modification symbol '{}' appears before any residue in {}",
                symbol, peptide
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataProcessingError {
    MissingPrecursor { scan_number: u32 },
    UnknownResidue { residue: char, position: usize },
    ModPositionOutOfRange { position: usize, length: usize },
}

impl Display for DataProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrecursor { scan_number } => {
                write!(f, "Scan {} has no precursor", scan_number)
            }
            Self::UnknownResidue { residue, position } => write!(
                f,
                "Unknown residue '{}' at position {}",
                residue, position
            ),
            Self::ModPositionOutOfRange { position, length } => write!(
                f,
                "Modification position {} outside of a peptide of length {}",
                position, length
            ),
        }
    }
}

#[derive(Debug)]
pub enum DataReadingError {
    FileReadingError {
        source: std::io::Error,
        path: PathBuf,
    },
    JsonParsingError {
        source: serde_json::Error,
        context: String,
    },
    CsvParsingError {
        source: csv::Error,
        path: PathBuf,
    },
    MalformedRecord {
        line: usize,
        msg: String,
    },
    MissingScan {
        scan_number: u32,
    },
}

impl Display for DataReadingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileReadingError { source, path } => {
                write!(f, "Error reading file {}: {}", path.display(), source)
            }
            Self::JsonParsingError { source, context } => {
                write!(f, "Error parsing json ({}): {}", context, source)
            }
            Self::CsvParsingError { source, path } => {
                write!(f, "Error parsing {}: {}", path.display(), source)
            }
            Self::MalformedRecord { line, msg } => write!(f, "Line {}: {}", line, msg),
            Self::MissingScan { scan_number } => write!(f, "Scan {} not found", scan_number),
        }
    }
}

#[derive(Debug)]
pub enum AScoreError {
    Config(ConfigError),
    Scoring(ScoringError),
    PeptideParsing(PeptideParsingError),
    DataProcessing(DataProcessingError),
    DataReading(DataReadingError),
}

impl Display for AScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Config error: {}", e),
            Self::Scoring(e) => write!(f, "Scoring error: {}", e),
            Self::PeptideParsing(e) => write!(f, "Peptide parsing error: {}", e),
            Self::DataProcessing(e) => write!(f, "Data processing error: {}", e),
            Self::DataReading(e) => write!(f, "Data reading error: {}", e),
        }
    }
}

impl std::error::Error for AScoreError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ScoringError {}
impl std::error::Error for PeptideParsingError {}
impl std::error::Error for DataProcessingError {}
impl std::error::Error for DataReadingError {}

pub type Result<T> = std::result::Result<T, AScoreError>;

impl From<ConfigError> for AScoreError {
    fn from(x: ConfigError) -> Self {
        Self::Config(x)
    }
}

impl From<ScoringError> for AScoreError {
    fn from(x: ScoringError) -> Self {
        Self::Scoring(x)
    }
}

impl From<PeptideParsingError> for AScoreError {
    fn from(x: PeptideParsingError) -> Self {
        Self::PeptideParsing(x)
    }
}

impl From<DataProcessingError> for AScoreError {
    fn from(x: DataProcessingError) -> Self {
        Self::DataProcessing(x)
    }
}

impl From<DataReadingError> for AScoreError {
    fn from(x: DataReadingError) -> Self {
        Self::DataReading(x)
    }
}
