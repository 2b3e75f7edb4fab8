//! Scoring options as read from JSON and their validated form.

use crate::errors::ConfigError;
use crate::filters::DeisotopingMode;
use crate::fragment_mass::{
    GeneratorOptions,
    IonSeries,
    NeutralLoss,
};
use crate::mass::{
    AminoAcidMasses,
    MassUnits,
    MzTolerance,
};
use crate::models::{
    ModificationDescriptor,
    PeptideParser,
};
use crate::scoring::{
    ScoringMethod,
    StrategyParams,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;
use tracing::warn;

/// Raw options, every field has a default.
///
/// ```
/// use ascore::config::AScoreOptions;
///
/// let options: AScoreOptions = serde_json::from_str(r#"{"tolerance": 20, "units": "ppm"}"#).unwrap();
/// let config = options.validate().unwrap();
/// assert_eq!(config.max_peak_depth, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AScoreOptions {
    pub ion_series: Vec<String>,
    pub tolerance: f64,
    pub units: String,
    pub window: f64,
    /// Zero scores every depth up to `max_peak_depth`.
    pub peak_depth: usize,
    pub max_peak_depth: usize,
    pub filter_low_intensity: f64,
    pub deisotoping: DeisotopingMode,
    pub low_mass_cutoff: bool,
    pub no_cterm: bool,
    pub use_mob_score: bool,
    pub use_delta_ascore: bool,
    /// Symbol of the modification being localized, must be one of `diff_mods`.
    pub symbol: char,
    /// Overrides the residues of the target modification when not empty.
    pub residues: String,
    pub max_peptides: usize,
    pub diff_mods: Vec<ModificationDescriptor>,
    pub static_mods: Vec<ModificationDescriptor>,
    pub neutral_loss: Option<NeutralLoss>,
}

impl Default for AScoreOptions {
    fn default() -> Self {
        Self {
            ion_series: vec!["b".into(), "y".into()],
            tolerance: 0.6,
            units: "da".into(),
            window: 100.0,
            peak_depth: 0,
            max_peak_depth: 10,
            filter_low_intensity: 0.25,
            deisotoping: DeisotopingMode::Off,
            low_mass_cutoff: false,
            no_cterm: false,
            use_mob_score: false,
            use_delta_ascore: false,
            symbol: '#',
            residues: String::new(),
            max_peptides: 1000,
            diff_mods: vec![ModificationDescriptor {
                symbol: '#',
                mass: 79.966331,
                residues: "STY".into(),
                n_term: false,
                c_term: false,
            }],
            static_mods: Vec::new(),
            neutral_loss: None,
        }
    }
}

/// Validated, immutable configuration shared by every request.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub ion_series: IonSeries,
    pub tolerance: MzTolerance,
    pub window: f64,
    pub peak_depth: Option<usize>,
    pub max_peak_depth: usize,
    pub low_intensity_fraction: f64,
    pub deisotoping: DeisotopingMode,
    pub low_mass_cutoff: bool,
    pub method: ScoringMethod,
    pub use_delta_score: bool,
    pub target: Arc<ModificationDescriptor>,
    pub parser: PeptideParser,
    pub masses: AminoAcidMasses,
    pub generator: GeneratorOptions,
}

impl ScoringConfig {
    pub fn strategy_params(&self) -> StrategyParams {
        StrategyParams {
            tolerance: self.tolerance,
            window: self.window,
            max_peak_depth: self.max_peak_depth,
        }
    }
}

impl AScoreOptions {
    pub fn validate(&self) -> Result<ScoringConfig, ConfigError> {
        let ion_series = IonSeries::from_tokens(&self.ion_series)?;
        let unsupported = ion_series.unsupported();
        if !unsupported.is_empty() {
            warn!("Ion series {} do not produce fragments and are ignored", unsupported);
        }

        let units: MassUnits = self.units.parse()?;
        let tolerance = MzTolerance::new(self.tolerance, units)?;

        if !self.window.is_finite() || self.window <= 0.0 {
            return Err(ConfigError::InvalidWindow {
                window: self.window,
            });
        }
        if self.max_peak_depth == 0 {
            return Err(ConfigError::InvalidPeakDepth {
                depth: self.max_peak_depth,
            });
        }
        if !(0.0..1.0).contains(&self.filter_low_intensity) {
            return Err(ConfigError::InvalidIntensityFraction {
                fraction: self.filter_low_intensity,
            });
        }
        if self.max_peptides == 0 {
            return Err(ConfigError::InvalidMaxPeptides {
                max_peptides: self.max_peptides,
            });
        }
        if let Some(nl) = &self.neutral_loss {
            if !nl.mass.is_finite() || nl.mass == 0.0 || nl.residues.is_empty() {
                return Err(ConfigError::InvalidNeutralLoss {
                    mass: nl.mass,
                    residues: nl.residues.clone(),
                });
            }
        }

        let parser = PeptideParser::new(&self.diff_mods)?;
        let masses = AminoAcidMasses::with_static_mods(&self.static_mods)?;

        let mut target = parser
            .get(self.symbol)
            .ok_or(ConfigError::UnknownTargetSymbol {
                symbol: self.symbol,
            })?
            .as_ref()
            .clone();
        if !self.residues.is_empty() {
            target.residues = self.residues.clone();
        }
        if target.residues.is_empty() {
            return Err(ConfigError::EmptyTargetModification);
        }

        let method = if self.use_mob_score {
            ScoringMethod::Mob
        } else {
            ScoringMethod::Original
        };

        Ok(ScoringConfig {
            ion_series,
            tolerance,
            window: self.window,
            peak_depth: (self.peak_depth > 0).then_some(self.peak_depth),
            max_peak_depth: self.max_peak_depth,
            low_intensity_fraction: self.filter_low_intensity,
            deisotoping: self.deisotoping,
            low_mass_cutoff: self.low_mass_cutoff,
            method,
            use_delta_score: self.use_delta_ascore,
            target: Arc::new(target),
            parser,
            masses,
            generator: GeneratorOptions {
                max_peptides: self.max_peptides,
                no_cterm: self.no_cterm,
                neutral_loss: self.neutral_loss.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AScoreOptions::default().validate().unwrap();
        assert_eq!(config.ion_series, IonSeries::B | IonSeries::Y);
        assert_eq!(config.tolerance, MzTolerance::Absolute(0.6));
        assert_eq!(config.peak_depth, None);
        assert_eq!(config.method, ScoringMethod::Original);
        assert_eq!(config.target.symbol, '#');
        assert_eq!(config.target.residues, "STY");
        assert!((config.target.mass - 79.966331).abs() < 1e-9);
    }

    #[test]
    fn test_from_json() {
        let json = r##"{
            "ion_series": ["nB", "b", "y"],
            "tolerance": 20,
            "units": "ppm",
            "peak_depth": 4,
            "use_mob_score": true,
            "deisotoping": "match_offset",
            "symbol": "*",
            "residues": "M",
            "diff_mods": [
                {"symbol": "#", "mass": 79.966331, "residues": "STY"},
                {"symbol": "*", "mass": 15.9949, "residues": "MW"}
            ],
            "static_mods": [{"symbol": "^", "mass": 57.02146, "residues": "C"}],
            "neutral_loss": {"mass": -97.9769, "residues": "ST"}
        }"##;
        let options: AScoreOptions = serde_json::from_str(json).unwrap();
        let config = options.validate().unwrap();
        assert_eq!(config.tolerance, MzTolerance::Ppm(20.0));
        assert_eq!(config.peak_depth, Some(4));
        assert_eq!(config.method, ScoringMethod::Mob);
        assert_eq!(config.deisotoping, DeisotopingMode::MatchOffset);
        assert_eq!(config.target.residues, "M");
        assert!(config.ion_series.contains(IonSeries::B_NEUTRAL_LOSS));
        assert!(config.parser.get('#').is_some());
        assert!(config.generator.neutral_loss.is_some());
        let cys = config.masses.residue_mass('C').unwrap();
        let plain = AminoAcidMasses::default().residue_mass('C').unwrap();
        assert!((cys - plain - 57.02146).abs() < 1e-9);
    }

    #[test]
    fn test_rejects() {
        let bad = |f: fn(&mut AScoreOptions)| {
            let mut options = AScoreOptions::default();
            f(&mut options);
            options.validate().unwrap_err()
        };
        assert!(matches!(
            bad(|o| o.ion_series = vec!["q".into()]),
            ConfigError::UnknownIonSeries { .. }
        ));
        assert!(matches!(
            bad(|o| o.units = "mmu".into()),
            ConfigError::UnknownUnits { .. }
        ));
        assert!(matches!(
            bad(|o| o.tolerance = -1.0),
            ConfigError::InvalidTolerance { .. }
        ));
        assert!(matches!(
            bad(|o| o.window = 0.0),
            ConfigError::InvalidWindow { .. }
        ));
        assert!(matches!(
            bad(|o| o.max_peak_depth = 0),
            ConfigError::InvalidPeakDepth { .. }
        ));
        assert!(matches!(
            bad(|o| o.filter_low_intensity = 1.5),
            ConfigError::InvalidIntensityFraction { .. }
        ));
        assert!(matches!(
            bad(|o| o.max_peptides = 0),
            ConfigError::InvalidMaxPeptides { .. }
        ));
        assert_eq!(
            bad(|o| o.symbol = '@'),
            ConfigError::UnknownTargetSymbol { symbol: '@' }
        );
        assert_eq!(
            bad(|o| o.diff_mods[0].residues.clear()),
            ConfigError::EmptyTargetModification
        );
        assert!(matches!(
            bad(|o| {
                o.neutral_loss = Some(NeutralLoss {
                    mass: 0.0,
                    residues: "ST".into(),
                })
            }),
            ConfigError::InvalidNeutralLoss { .. }
        ));
    }

    #[test]
    fn test_unsupported_series_accepted() {
        let options = AScoreOptions {
            ion_series: vec!["b".into(), "d".into()],
            ..Default::default()
        };
        let config = options.validate().unwrap();
        assert!(config.ion_series.contains(IonSeries::D));
    }
}
