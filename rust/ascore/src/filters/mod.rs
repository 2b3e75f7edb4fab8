//! Peak list filters applied to a working copy of a scan before scoring.
//!
//! Every filter leaves the centroids sorted by m/z and is a no-op on empty scans.

mod deisotope;
mod intensity;
mod loss;
mod top_ions;

pub use deisotope::MatchDeisotoper;
pub use intensity::IntensityFilter;
pub use loss::{
    NeutralLossFilter,
    WaterLossFilter,
};
pub use top_ions::TopIonsFilter;

use crate::mass::MzTolerance;
use crate::models::Scan;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::trace;

pub trait ScanFilter: std::fmt::Debug + Send + Sync {
    fn filter(&self, scan: &mut Scan);

    /// Filtered copy, `scan` is left untouched.
    fn apply(&self, scan: &Scan) -> Scan {
        let mut out = scan.clone();
        self.filter(&mut out);
        out
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeisotopingMode {
    #[default]
    Off,
    /// Drop peaks sitting one isotope spacing above a comparably intense peak.
    MatchOffset,
    /// Keep only the most intense peak in every 1 m/z window.
    #[serde(alias = "top_1_per_1")]
    Top1Per1,
}

/// Filters run in order over the same scan.
#[derive(Debug, Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn ScanFilter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl ScanFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Full preprocessing used before scoring: deisotoping, intensity trim,
    /// water and phospho loss removal, then top-N ranking at `max_peak_depth`.
    pub fn baseline(
        deisotoping: DeisotopingMode,
        tolerance: MzTolerance,
        low_intensity_fraction: f64,
        max_peak_depth: usize,
        window: f64,
    ) -> Self {
        let out = match deisotoping {
            DeisotopingMode::Off => Self::new(),
            DeisotopingMode::MatchOffset => Self::new().with_filter(MatchDeisotoper::new(tolerance)),
            DeisotopingMode::Top1Per1 => Self::new().with_filter(TopIonsFilter::new(1, 1.0)),
        };
        out.with_filter(IntensityFilter::new(low_intensity_fraction))
            .with_filter(WaterLossFilter::new(tolerance))
            .with_filter(NeutralLossFilter::new(tolerance))
            .with_filter(TopIonsFilter::new(max_peak_depth, window))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl ScanFilter for FilterPipeline {
    fn filter(&self, scan: &mut Scan) {
        for f in self.filters.iter() {
            let before = scan.len();
            f.filter(scan);
            trace!(
                "{:?} on scan {}: {} -> {} peaks",
                f,
                scan.scan_number,
                before,
                scan.len()
            );
        }
    }
}

/// Repeatedly removes the best match of `target` until nothing is within tolerance.
fn remove_matching(scan: &mut Scan, target: f64, tolerance: &MzTolerance) -> usize {
    let mut removed = 0;
    while let Some(i) = crate::matching::find_match(&scan.centroids, target, tolerance) {
        scan.centroids.remove(i);
        removed += 1;
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Centroid,
        Precursor,
    };

    fn scan() -> Scan {
        let centroids = [
            (436.3101, 1347.1),
            (535.4120, 1734.1),
            (619.4920, 1171.1),
            (671.93596, 1280.1),
            (692.4050, 183.1),
            (703.4280, 1245.1),
            (703.9110, 373.1),
            (711.93596, 1001.1),
            (792.497, 341.1),
            (1017.609, 271.1),
        ]
        .iter()
        .map(|&(mz, int)| Centroid::new(mz, int))
        .collect();
        Scan::new(1, centroids, vec![Precursor::new(711.93596, 2)])
    }

    #[test]
    fn test_baseline_composition() {
        let tol = MzTolerance::Absolute(0.5);
        assert_eq!(
            FilterPipeline::baseline(DeisotopingMode::Off, tol, 0.25, 10, 100.0).len(),
            4
        );
        assert_eq!(
            FilterPipeline::baseline(DeisotopingMode::MatchOffset, tol, 0.25, 10, 100.0).len(),
            5
        );
    }

    #[test]
    fn test_baseline_ranks_and_sorts() {
        let pipeline = FilterPipeline::baseline(
            DeisotopingMode::Off,
            MzTolerance::Absolute(0.5),
            0.0,
            10,
            100.0,
        );
        let input = scan();
        let out = pipeline.apply(&input);

        // 703.4280 is within 0.5 of the water loss, 671.93596 of the phospho loss.
        assert_eq!(out.len(), input.len() - 2);
        assert!(out.centroids.iter().all(|p| p.rank > 0));
        assert!(out.centroids.windows(2).all(|w| w[0].mz <= w[1].mz));
        assert!(input.centroids.iter().all(|p| p.rank == 0));
    }

    #[test]
    fn test_baseline_top_one_per_one() {
        let pipeline = FilterPipeline::baseline(
            DeisotopingMode::Top1Per1,
            MzTolerance::Absolute(0.5),
            0.0,
            10,
            100.0,
        );
        let centroids = [
            (100.1, 5.0),
            (100.5, 9.0),
            (100.9, 3.0),
            (101.2, 4.0),
            (101.3, 8.0),
            (250.0, 7.0),
            (250.4, 2.0),
        ]
        .iter()
        .map(|&(mz, int)| Centroid::new(mz, int))
        .collect();
        let input = Scan::new(3, centroids, vec![Precursor::new(900.0, 2)]);
        let out = pipeline.apply(&input);

        let mzs: Vec<f64> = out.centroids.iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![100.5, 101.3, 250.0]);
        // Ranks come from the final 100 Th windows.
        let ranks: Vec<u32> = out.centroids.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 1]);
    }

    #[test]
    fn test_empty_scan() {
        let pipeline = FilterPipeline::baseline(
            DeisotopingMode::MatchOffset,
            MzTolerance::Ppm(20.0),
            0.25,
            10,
            100.0,
        );
        let mut empty = Scan::new(2, vec![], vec![Precursor::new(500.0, 2)]);
        pipeline.filter(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_deisotoping_names() {
        let mode: DeisotopingMode = serde_json::from_str("\"match_offset\"").unwrap();
        assert_eq!(mode, DeisotopingMode::MatchOffset);
        let mode: DeisotopingMode = serde_json::from_str("\"top1_per1\"").unwrap();
        assert_eq!(mode, DeisotopingMode::Top1Per1);
    }
}
