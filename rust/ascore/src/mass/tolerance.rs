use crate::errors::ConfigError;
use serde::{
    Deserialize,
    Serialize,
};
use std::str::FromStr;

/// m/z at which ppm tolerances are turned into an absolute width when
/// estimating random match probabilities.
const PPM_REFERENCE_MZ: f64 = 1000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MassUnits {
    #[serde(rename = "ppm")]
    Ppm,
    #[serde(rename = "da")]
    Dalton,
}

impl FromStr for MassUnits {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ppm" => Ok(Self::Ppm),
            "da" | "dalton" | "daltons" => Ok(Self::Dalton),
            _ => Err(ConfigError::UnknownUnits {
                units: s.to_string(),
            }),
        }
    }
}

/// Fragment matching tolerance.
///
/// Convention: the value is the half width of the window, so a tolerance of 0.5 Da
/// on a value of 10 means the range (9.5, 10.5). Matching is strict on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum MzTolerance {
    #[serde(rename = "da")]
    Absolute(f64),
    #[serde(rename = "ppm")]
    Ppm(f64),
}

impl Default for MzTolerance {
    fn default() -> Self {
        MzTolerance::Absolute(0.6)
    }
}

impl MzTolerance {
    pub fn new(value: f64, units: MassUnits) -> Result<Self, ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidTolerance { tolerance: value });
        }
        Ok(match units {
            MassUnits::Ppm => Self::Ppm(value),
            MassUnits::Dalton => Self::Absolute(value),
        })
    }

    pub fn units(&self) -> MassUnits {
        match self {
            Self::Absolute(_) => MassUnits::Dalton,
            Self::Ppm(_) => MassUnits::Ppm,
        }
    }

    /// Bounds of the window centered on `mz`.
    ///
    /// Example:
    /// ```
    /// use ascore::mass::MzTolerance;
    ///
    /// let (low, high) = MzTolerance::Ppm(20.0).mz_range(500.0);
    /// assert!((low - 499.99).abs() < 1e-9);
    /// assert!((high - 500.01).abs() < 1e-9);
    ///
    /// let (low, high) = MzTolerance::Absolute(0.5).mz_range(500.0);
    /// assert_eq!((low, high), (499.5, 500.5));
    /// ```
    pub fn mz_range(&self, mz: f64) -> (f64, f64) {
        match self {
            Self::Absolute(tol) => (mz - tol, mz + tol),
            Self::Ppm(tol) => {
                let delta = mz * tol / 1e6;
                (mz - delta, mz + delta)
            }
        }
    }

    /// Absolute error in the units of the tolerance (Da or ppm of the theoretical value).
    pub fn error(&self, theoretical: f64, observed: f64) -> f64 {
        match self {
            Self::Absolute(_) => (theoretical - observed).abs(),
            Self::Ppm(_) => (1e6 * (theoretical - observed) / theoretical).abs(),
        }
    }

    pub fn contains(&self, theoretical: f64, observed: f64) -> bool {
        let tol = match self {
            Self::Absolute(x) | Self::Ppm(x) => *x,
        };
        self.error(theoretical, observed) < tol
    }

    /// Tolerance as an absolute width in Da, ppm values taken at 1000 m/z.
    pub fn as_dalton(&self) -> f64 {
        match self {
            Self::Absolute(tol) => *tol,
            Self::Ppm(tol) => tol * PPM_REFERENCE_MZ / 1e6,
        }
    }
}
