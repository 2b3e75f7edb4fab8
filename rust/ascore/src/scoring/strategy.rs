use super::mob::MobScore;
use super::original::OriginalScore;
use crate::errors::ScoringError;
use crate::fragment_mass::FragmentIon;
use crate::mass::MzTolerance;
use crate::models::{
    Peptide,
    Scan,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Per request values shared by every scoring call of that request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoringState {
    /// Peak depth that gave the best peptide level score, 0 while unknown.
    pub best_peak_depth: usize,
    pub best_peptide_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParams {
    pub tolerance: MzTolerance,
    pub window: f64,
    pub max_peak_depth: usize,
}

impl StrategyParams {
    /// Chance of one random peak per window falling within tolerance of an ion.
    pub fn p_factor(&self) -> f64 {
        2.0 * self.tolerance.as_dalton() / self.window
    }
}

/// Scores a set of theoretical ions against a filtered, ranked scan.
///
/// Implementations fill the match statistics of `peptide` and may update the
/// request `state`.
pub trait ScoringStrategy: std::fmt::Debug + Send + Sync {
    fn score(
        &self,
        peptide: &mut Peptide,
        ions: &[FragmentIon],
        scan: &Scan,
        state: &mut ScoringState,
    ) -> Result<f64, ScoringError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Weighted average over peak depths.
    #[default]
    Original,
    /// Global one to one matching with cumulative depth segments.
    Mob,
}

impl ScoringMethod {
    /// `fixed_depth` pins the peak depth, used when scoring sites.
    pub fn build(
        &self,
        params: StrategyParams,
        fixed_depth: Option<usize>,
    ) -> Box<dyn ScoringStrategy> {
        match self {
            Self::Original => Box::new(OriginalScore::new(params, fixed_depth)),
            Self::Mob => Box::new(MobScore::new(params)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p_factor() {
        let params = StrategyParams {
            tolerance: MzTolerance::Absolute(0.5),
            window: 100.0,
            max_peak_depth: 10,
        };
        assert!((params.p_factor() - 0.01).abs() < 1e-12);

        let params = StrategyParams {
            tolerance: MzTolerance::Ppm(50.0),
            ..params
        };
        assert!((params.p_factor() - 0.001).abs() < 1e-12);
    }
}
