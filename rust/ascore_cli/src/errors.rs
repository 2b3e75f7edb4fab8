use ascore::errors::{
    AScoreError,
    ConfigError,
    DataReadingError,
};

#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    ParseError {
        msg: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    DataReading {
        source: String,
    },
    Scoring {
        source: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::ParseError { msg } => write!(f, "Error parsing config: {}", msg),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error reading file {}: {}", path, source)
                } else {
                    write!(f, "Error reading file: {}", source)
                }
            }
            CliError::DataReading { source } => write!(f, "Error reading data: {}", source),
            CliError::Scoring { source } => write!(f, "Error scoring: {}", source),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config {
            source: e.to_string(),
        }
    }
}

impl From<DataReadingError> for CliError {
    fn from(e: DataReadingError) -> Self {
        CliError::DataReading {
            source: e.to_string(),
        }
    }
}

impl From<AScoreError> for CliError {
    fn from(e: AScoreError) -> Self {
        match e {
            AScoreError::Config(e) => e.into(),
            AScoreError::DataReading(e) => e.into(),
            e => CliError::Scoring {
                source: e.to_string(),
            },
        }
    }
}
