use ascore::AScoreOptions;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};

use crate::cli::Cli;
use crate::errors::CliError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub analysis: AScoreOptions,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InputConfig {
    pub scans: Option<PathBuf>,
    pub peptides: Option<PathBuf>,
    /// Annotated peptide for single peptide mode.
    pub peptide: Option<String>,
    pub scan: Option<u32>,
    pub mz: Option<f64>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
}

/// What the run should do once the config is resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Single {
        peptide: String,
        scan: u32,
        mz: Option<f64>,
    },
    Batch {
        peptides: PathBuf,
        output: PathBuf,
    },
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let conf = std::fs::File::open(path).map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(path.to_string_lossy().to_string()),
        })?;
        serde_json::from_reader(conf).map_err(|e| CliError::ParseError { msg: e.to_string() })
    }

    /// Paths given on the command line win over the ones in the file.
    pub fn with_cli_args(mut self, args: &Cli) -> Self {
        if let Some(peptides) = &args.peptides {
            self.input.peptides = Some(peptides.clone());
        }
        if let Some(scans) = &args.scans {
            self.input.scans = Some(scans.clone());
        }
        if let Some(output) = &args.output {
            self.output = Some(OutputConfig {
                path: output.clone(),
            });
        }
        self
    }

    pub fn scans_path(&self) -> Result<&Path, CliError> {
        self.input.scans.as_deref().ok_or_else(|| CliError::Config {
            source: "No scans provided, please provide them in either the config file or with the --scans flag".to_string(),
        })
    }

    pub fn run_mode(&self) -> Result<RunMode, CliError> {
        if let Some(peptide) = &self.input.peptide {
            let scan = self.input.scan.ok_or_else(|| CliError::Config {
                source: "Single peptide mode needs input.scan".to_string(),
            })?;
            return Ok(RunMode::Single {
                peptide: peptide.clone(),
                scan,
                mz: self.input.mz,
            });
        }

        let peptides = self.input.peptides.clone().ok_or_else(|| CliError::Config {
            source: "No peptides provided, please provide them in either the config file or with the --peptides flag".to_string(),
        })?;
        let output = match &self.output {
            Some(x) => x.path.clone(),
            None => {
                return Err(CliError::Config {
                    source: "No output provided, please provide one in either the config file or with the --output flag".to_string(),
                });
            }
        };
        Ok(RunMode::Batch { peptides, output })
    }
}
