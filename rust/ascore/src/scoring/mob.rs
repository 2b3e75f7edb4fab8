use super::binomial::binomial_score;
use super::strategy::{
    ScoringState,
    ScoringStrategy,
    StrategyParams,
};
use crate::errors::ScoringError;
use crate::fragment_mass::FragmentIon;
use crate::models::{
    Centroid,
    PeakMatch,
    Peptide,
    Scan,
};

/// One to one matching of ions and peaks, scored cumulatively over peak depth.
///
/// Walking depth by depth, the running score keeps growing while matches come
/// in. When it stops improving the best value so far is banked, the matched
/// ions leave the trials and a new segment starts at that depth. The result is
/// the sum of the banked segments.
#[derive(Debug, Clone, Copy)]
pub struct MobScore {
    params: StrategyParams,
}

/// (theoretical index, observed index) pairs, by theoretical index.
fn match_peaks(ions: &[FragmentIon], peaks: &[Centroid], params: &StrategyParams) -> Vec<(usize, usize)> {
    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
    let mut window_start = 0;
    for (theo_idx, ion) in ions.iter().enumerate() {
        let (low, high) = params.tolerance.mz_range(ion.mz);
        let mut obs_idx = window_start;
        while obs_idx < peaks.len() && peaks[obs_idx].mz < low {
            obs_idx += 1;
        }
        window_start = obs_idx;
        while obs_idx < peaks.len() && peaks[obs_idx].mz < high {
            if params.tolerance.contains(ion.mz, peaks[obs_idx].mz) {
                candidates.push(((peaks[obs_idx].mz - ion.mz).abs(), theo_idx, obs_idx));
            }
            obs_idx += 1;
        }
    }

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut theo_used = vec![false; ions.len()];
    let mut obs_used = vec![false; peaks.len()];
    let mut out = Vec::new();
    for (_, theo_idx, obs_idx) in candidates {
        if theo_used[theo_idx] || obs_used[obs_idx] {
            continue;
        }
        theo_used[theo_idx] = true;
        obs_used[obs_idx] = true;
        out.push((theo_idx, obs_idx));
    }
    out.sort_unstable();
    out
}

impl MobScore {
    pub fn new(params: StrategyParams) -> Self {
        Self { params }
    }

    fn cumulative_score(
        &self,
        ions_total: usize,
        ions_matched: usize,
        matches_by_depth: &[usize],
        state: &mut ScoringState,
    ) -> Result<f64, ScoringError> {
        let p_factor = self.params.p_factor();
        let max_depth = self.params.max_peak_depth;

        let mut banked = 0.0;
        let mut segment_max = 0.0;
        let mut n_cum = 0;
        let mut n_trials = ions_total;
        let mut depth = 1;
        while depth <= max_depth && n_cum < ions_matched {
            n_cum += matches_by_depth[depth];
            let score = binomial_score(n_trials as i64, n_cum as i64, depth as f64 * p_factor)?;
            if score > segment_max || score == 0.0 {
                segment_max = score;
                depth += 1;
            } else {
                banked += segment_max;
                n_trials -= n_cum - matches_by_depth[depth];
                n_cum = 0;
                segment_max = 0.0;
            }
        }

        if state.best_peak_depth == 0 {
            state.best_peak_depth = depth - 1;
        }
        Ok(banked + segment_max)
    }
}

impl ScoringStrategy for MobScore {
    fn score(
        &self,
        peptide: &mut Peptide,
        ions: &[FragmentIon],
        scan: &Scan,
        state: &mut ScoringState,
    ) -> Result<f64, ScoringError> {
        let peaks = &scan.centroids;
        if peaks.first().is_some_and(|p| p.rank == 0) {
            return Err(ScoringError::UnrankedPeaks);
        }

        let max_depth = self.params.max_peak_depth;
        let matches = match_peaks(ions, peaks, &self.params);
        let mut matches_by_depth = vec![0; max_depth + 1];
        for &(_, obs_idx) in matches.iter() {
            let rank = peaks[obs_idx].rank as usize;
            if rank <= max_depth {
                matches_by_depth[rank] += 1;
            }
        }

        peptide.ions_total = ions.len();
        peptide.ions_matched = matches.len();
        peptide.matches = matches
            .iter()
            .map(|&(theo_idx, obs_idx)| PeakMatch {
                theo_mz: ions[theo_idx].mz,
                obs_mz: peaks[obs_idx].mz,
                intensity: peaks[obs_idx].intensity,
                rank: peaks[obs_idx].rank,
            })
            .collect();

        let out = self.cumulative_score(ions.len(), matches.len(), &matches_by_depth, state);
        peptide.matches_by_depth = matches_by_depth;
        out
    }
}
