use super::binomial::MAX_SCORE;
use super::results::{
    AScoreOutput,
    SiteScore,
};
use super::site_ions::site_determining_ions;
use super::strategy::{
    ScoringState,
    ScoringStrategy,
};
use crate::config::ScoringConfig;
use crate::data_sources::ScanSource;
use crate::errors::{
    DataProcessingError,
    DataReadingError,
    Result,
};
use crate::filters::{
    FilterPipeline,
    ScanFilter,
};
use crate::fragment_mass::{
    IonRequest,
    PeptideGenerator,
};
use crate::models::{
    Peptide,
    Scan,
};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Fragments below this fraction of the precursor m/z are dropped when the
/// low mass cutoff is on.
const LOW_MASS_CUTOFF_FRACTION: f64 = 0.28;

/// Scores every placement of the target modification of a peptide against
/// its scan and localizes each target modification of the winner.
#[derive(Debug)]
pub struct AScoreCalculator {
    config: ScoringConfig,
    pipeline: FilterPipeline,
    strategy: Box<dyn ScoringStrategy>,
}

impl AScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        let pipeline = FilterPipeline::baseline(
            config.deisotoping,
            config.tolerance,
            config.low_intensity_fraction,
            config.max_peak_depth,
            config.window,
        );
        let strategy = config
            .method
            .build(config.strategy_params(), config.peak_depth);
        debug!(
            "Scoring with {:?}, {} scan filters",
            config.method,
            pipeline.len()
        );
        Self {
            config,
            pipeline,
            strategy,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Working copy of the scan with the precursor m/z of `peptide` and the
    /// fragment request derived from it.
    fn prepare(&self, peptide: &Peptide, scan: &Scan) -> Result<(Scan, IonRequest)> {
        let mut scan = scan.clone();
        let (min_mz, max_mz) = scan.mz_bounds();
        let Some(precursor) = scan.precursors.first_mut() else {
            return Err(DataProcessingError::MissingPrecursor {
                scan_number: scan.scan_number,
            }
            .into());
        };
        if peptide.precursor_mz > 0.0 {
            precursor.mz = peptide.precursor_mz;
        }
        // Singly charged or unknown precursors leave no fragment charge.
        let max_charge = precursor.charge.saturating_sub(1).min(2);
        let min_mz = if self.config.low_mass_cutoff {
            min_mz.max(LOW_MASS_CUTOFF_FRACTION * precursor.mz)
        } else {
            min_mz
        };

        self.pipeline.filter(&mut scan);
        Ok((
            scan,
            IonRequest {
                series: self.config.ion_series,
                max_charge,
                min_mz,
                max_mz,
            },
        ))
    }

    pub fn run(&self, peptide: &Peptide, scan: &Scan) -> Result<AScoreOutput> {
        let (scan, request) = self.prepare(peptide, scan)?;
        let target = &self.config.target;
        let generator = PeptideGenerator::new(
            peptide,
            target.clone(),
            &self.config.masses,
            &self.config.generator,
        )?;

        let mut state = ScoringState::default();
        let mut candidates = Vec::with_capacity(generator.len());
        for index in 0..generator.len() {
            let (Some(ions), Some(mut candidate)) =
                (generator.ions(index, &request), generator.peptide(index))
            else {
                continue;
            };
            candidate.score = self
                .strategy
                .score(&mut candidate, &ions, &scan, &mut state)?;
            candidates.push(candidate);
        }

        // Ties keep generator order, except the input placement goes first.
        let input_sites = peptide.mods().positions_of(target.symbol);
        let is_input = |p: &Peptide| p.mods().positions_of(target.symbol) == input_sites;
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| is_input(b).cmp(&is_input(a)))
        });

        let site_depth = if state.best_peak_depth > 0 {
            state.best_peak_depth
        } else {
            self.config.peak_depth.unwrap_or(self.config.max_peak_depth)
        };
        debug!(
            "{} on scan {}: {} candidates, site scoring at depth {}",
            peptide,
            scan.scan_number,
            candidates.len(),
            site_depth
        );

        let sites = match candidates.first() {
            Some(top) => self.score_sites(
                top,
                &candidates,
                &generator,
                &request,
                &scan,
                site_depth,
                state,
            )?,
            None => Vec::new(),
        };

        Ok(AScoreOutput {
            scan_number: scan.scan_number,
            mod_count: generator.mod_count(),
            best_peak_depth: state.best_peak_depth,
            best_peptide_score: state.best_peptide_score,
            peptides: candidates,
            sites,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn score_sites(
        &self,
        top: &Peptide,
        candidates: &[Peptide],
        generator: &PeptideGenerator,
        request: &IonRequest,
        scan: &Scan,
        depth: usize,
        mut state: ScoringState,
    ) -> Result<Vec<SiteScore>> {
        let symbol = self.config.target.symbol;
        let site_strategy = self
            .config
            .method
            .build(self.config.strategy_params(), Some(depth));

        let mut sites = Vec::new();
        for position in top.mods().positions_of(symbol) {
            let mut site = SiteScore {
                position: position + 1,
                score: MAX_SCORE,
                ..Default::default()
            };

            let competitor = candidates
                .iter()
                .skip(1)
                .find(|p| !p.mods().has_symbol_at(position, symbol));
            if let Some(next) = competitor {
                let ions = generator
                    .ions(top.generator_index, request)
                    .unwrap_or_default();
                let next_ions = generator
                    .ions(next.generator_index, request)
                    .unwrap_or_default();

                let site_ions = site_determining_ions(&ions, &next_ions);
                let mut scratch = top.clone();
                site.score = site_strategy.score(&mut scratch, &site_ions, scan, &mut state)?;
                site.ions_matched = scratch.ions_matched;
                site.ions_total = scratch.ions_total;
                site.peptides.push(top.clone());
                site.site_ions.push(site_ions);

                if self.config.use_delta_score {
                    let reverse_ions = site_determining_ions(&next_ions, &ions);
                    let mut scratch = next.clone();
                    site.score -=
                        site_strategy.score(&mut scratch, &reverse_ions, scan, &mut state)?;
                    site.site_ions.push(reverse_ions);
                }
                site.peptides.push(next.clone());
            }
            sites.push(site);
        }
        Ok(sites)
    }

    /// Runs independent requests in parallel. Each peptide is looked up in
    /// `scans` by its scan number.
    pub fn run_batch<S: ScanSource + Sync>(
        &self,
        peptides: &[Peptide],
        scans: &S,
    ) -> Vec<Result<AScoreOutput>> {
        peptides
            .par_iter()
            .map(|peptide| match scans.get_scan(peptide.scan_number) {
                Some(scan) => self.run(peptide, scan),
                None => Err(DataReadingError::MissingScan {
                    scan_number: peptide.scan_number,
                }
                .into()),
            })
            .collect()
    }
}
