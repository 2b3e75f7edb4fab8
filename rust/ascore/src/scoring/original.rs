use super::binomial::binomial_score;
use super::strategy::{
    ScoringState,
    ScoringStrategy,
    StrategyParams,
};
use crate::errors::ScoringError;
use crate::filters::{
    ScanFilter,
    TopIonsFilter,
};
use crate::fragment_mass::FragmentIon;
use crate::matching::find_match;
use crate::models::{
    Peptide,
    Scan,
};

/// Empirical weights per peak depth (index = depth), 0.5 past the end.
const DEPTH_WEIGHTS: [f64; 11] = [0.25, 0.5, 0.5, 0.75, 1.0, 1.0, 1.0, 0.75, 0.5, 0.5, 0.5];

fn depth_weight(depth: usize) -> f64 {
    DEPTH_WEIGHTS.get(depth).copied().unwrap_or(0.5)
}

/// Binomial score at every peak depth, combined as a weighted mean.
#[derive(Debug, Clone, Copy)]
pub struct OriginalScore {
    params: StrategyParams,
    fixed_depth: Option<usize>,
}

impl OriginalScore {
    pub fn new(params: StrategyParams, fixed_depth: Option<usize>) -> Self {
        Self {
            params,
            fixed_depth,
        }
    }

    fn depth_range(&self) -> std::ops::RangeInclusive<usize> {
        match self.fixed_depth {
            Some(depth) => depth..=depth,
            None => 1..=self.params.max_peak_depth,
        }
    }
}

impl ScoringStrategy for OriginalScore {
    fn score(
        &self,
        peptide: &mut Peptide,
        ions: &[FragmentIon],
        scan: &Scan,
        state: &mut ScoringState,
    ) -> Result<f64, ScoringError> {
        let p_factor = self.params.p_factor();
        let mut best_depth = 0;
        let mut max_score = 0.0;
        let mut best_matched = 0;
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for depth in self.depth_range() {
            let ranked = TopIonsFilter::new(depth, self.params.window).apply(scan);
            let matched = ions
                .iter()
                .filter(|ion| find_match(&ranked.centroids, ion.mz, &self.params.tolerance).is_some())
                .count();
            let score = binomial_score(ions.len() as i64, matched as i64, depth as f64 * p_factor)?;

            // Ties go to the deeper spectrum.
            if score >= max_score {
                max_score = score;
                best_depth = depth;
                best_matched = matched;
            }

            let weight = depth_weight(depth);
            weighted_sum += weight * score;
            weight_total += weight;
        }

        peptide.ions_total = ions.len();
        peptide.ions_matched = best_matched;

        if self.fixed_depth.is_none() && max_score > state.best_peptide_score {
            state.best_peak_depth = best_depth;
            state.best_peptide_score = max_score;
        }

        if weight_total > 0.0 {
            Ok(weighted_sum / weight_total)
        } else {
            Ok(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment_mass::IonKind;
    use crate::mass::MzTolerance;
    use crate::models::{
        Centroid,
        Precursor,
    };

    fn params() -> StrategyParams {
        StrategyParams {
            tolerance: MzTolerance::Absolute(0.1),
            window: 100.0,
            max_peak_depth: 10,
        }
    }

    // Ten peaks in one window, ranked 1 to 10 by m/z.
    fn scan() -> Scan {
        let centroids = (0..10)
            .map(|i| Centroid::new(101.0 + i as f64, 1000.0 - 100.0 * i as f64))
            .collect();
        let scan = Scan::new(1, centroids, vec![Precursor::new(600.0, 2)]);
        TopIonsFilter::new(10, 100.0).apply(&scan)
    }

    fn ions(mzs: &[f64]) -> Vec<FragmentIon> {
        mzs.iter()
            .enumerate()
            .map(|(i, &mz)| FragmentIon {
                mz,
                charge: 1,
                kind: IonKind::y,
                ordinal: i + 1,
                neutral_loss: false,
            })
            .collect()
    }

    #[test]
    fn test_weights() {
        assert_eq!(depth_weight(0), 0.25);
        assert_eq!(depth_weight(4), 1.0);
        assert_eq!(depth_weight(10), 0.5);
        assert_eq!(depth_weight(25), 0.5);
    }

    #[test]
    fn test_ranged() {
        let ions = ions(&[101.0, 103.0, 109.0, 150.5]);
        let scorer = OriginalScore::new(params(), None);
        let mut peptide = Peptide::new("PEPTIDE");
        let mut state = ScoringState::default();
        let score = scorer
            .score(&mut peptide, &ions, &scan(), &mut state)
            .unwrap();

        assert_eq!(state.best_peak_depth, 9);
        assert_eq!(peptide.ions_total, 4);
        assert_eq!(peptide.ions_matched, 3);

        let matched_at = |d: usize| [1, 3, 9].iter().filter(|&&x| x <= d).count() as i64;
        let (sum, total) = (1..=10).fold((0.0, 0.0), |(s, t), d| {
            let w = depth_weight(d);
            let score = binomial_score(4, matched_at(d), d as f64 * 0.002).unwrap();
            (s + w * score, t + w)
        });
        assert!((score - sum / total).abs() < 1e-9);
        assert!(
            (state.best_peptide_score - binomial_score(4, 3, 9.0 * 0.002).unwrap()).abs() < 1e-9
        );
    }

    #[test]
    fn test_fixed_depth() {
        let ions = ions(&[101.0, 103.0, 109.0, 150.5]);
        let scorer = OriginalScore::new(params(), Some(3));
        let mut peptide = Peptide::new("PEPTIDE");
        let mut state = ScoringState::default();
        let score = scorer
            .score(&mut peptide, &ions, &scan(), &mut state)
            .unwrap();

        let expected = binomial_score(4, 2, 3.0 * 0.002).unwrap();
        assert!((score - expected).abs() < 1e-9);
        assert_eq!(peptide.ions_matched, 2);
        assert_eq!(state, ScoringState::default());
    }

    #[test]
    fn test_no_evidence() {
        let scorer = OriginalScore::new(params(), None);
        let mut peptide = Peptide::new("PEPTIDE");
        let mut state = ScoringState::default();
        let empty = Scan::new(1, vec![], vec![]);
        let score = scorer
            .score(&mut peptide, &ions(&[120.0]), &empty, &mut state)
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(state.best_peak_depth, 0);

        let score = scorer.score(&mut peptide, &[], &scan(), &mut state).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(peptide.ions_total, 0);
    }
}
