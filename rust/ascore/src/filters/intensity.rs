use super::ScanFilter;
use crate::models::Scan;

/// Drops the lowest intensity fraction of the peaks.
///
/// The cut is the intensity found at `floor(n * fraction)` in ascending order,
/// and only peaks strictly above it are kept, so ties at the cut go too.
#[derive(Debug, Clone, Copy)]
pub struct IntensityFilter {
    fraction: f64,
}

impl IntensityFilter {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }
}

impl ScanFilter for IntensityFilter {
    fn filter(&self, scan: &mut Scan) {
        if self.fraction < 0.01 || scan.len() < 4 {
            return;
        }

        let mut intensities: Vec<f64> = scan.centroids.iter().map(|p| p.intensity).collect();
        intensities.sort_by(|a, b| a.total_cmp(b));
        let i = (intensities.len() as f64 * self.fraction).floor() as usize;
        let Some(&min_intensity) = intensities.get(i) else {
            return;
        };

        scan.centroids.retain(|p| p.intensity > min_intensity);
    }
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
            (631.93596, 1280.1),
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
    fn test_filter() {
        let out = IntensityFilter::new(0.25).apply(&scan());
        assert_eq!(out.len(), 7);
        assert_eq!(out.centroids[0].mz, 436.3101);
        assert_eq!(out.centroids[6].mz, 711.93596);
        assert!(out.centroids.windows(2).all(|w| w[0].mz < w[1].mz));
    }

    #[test]
    fn test_noop_cases() {
        assert_eq!(IntensityFilter::new(0.005).apply(&scan()).len(), 10);

        let mut small = scan();
        small.centroids.truncate(3);
        assert_eq!(IntensityFilter::new(0.5).apply(&small).len(), 3);

        // floor(10 * 1.0) is past the end.
        assert_eq!(IntensityFilter::new(1.0).apply(&scan()).len(), 10);
    }
}
