//! Nearest-peak lookups over m/z sorted centroids.
//!
//! Windows come from [`MzTolerance::mz_range`], acceptance from
//! [`MzTolerance::contains`].

use crate::mass::MzTolerance;
use crate::models::Centroid;

/// Lowest index whose m/z is >= `target`, `peaks.len()` when every peak is lower.
///
/// Example:
/// ```
/// use ascore::matching::nearest_index;
/// use ascore::models::Centroid;
///
/// let peaks: Vec<Centroid> = [100.0, 200.0, 300.0]
///     .iter()
///     .map(|&mz| Centroid::new(mz, 1.0))
///     .collect();
/// assert_eq!(nearest_index(&peaks, 50.0), 0);
/// assert_eq!(nearest_index(&peaks, 200.0), 1);
/// assert_eq!(nearest_index(&peaks, 250.0), 2);
/// assert_eq!(nearest_index(&peaks, 301.0), 3);
/// ```
pub fn nearest_index(peaks: &[Centroid], target: f64) -> usize {
    peaks.partition_point(|p| p.mz < target)
}

/// Index of the peak closest to `target`, if it lies within tolerance.
///
/// Only the two neighbours around the insertion point are considered. On an
/// exact tie in error the lower m/z peak wins.
pub fn find_match(peaks: &[Centroid], target: f64, tolerance: &MzTolerance) -> Option<usize> {
    let i = nearest_index(peaks, target);
    let next = peaks.get(i).map(|p| (i, (p.mz - target).abs()));
    let prev = if i > 0 {
        Some((i - 1, (peaks[i - 1].mz - target).abs()))
    } else {
        None
    };

    let best = match (prev, next) {
        (None, None) => return None,
        (Some(p), None) => p,
        (None, Some(n)) => n,
        (Some(p), Some(n)) => {
            if n.1 < p.1 {
                n
            } else {
                p
            }
        }
    };

    if tolerance.contains(target, peaks[best.0].mz) {
        Some(best.0)
    } else {
        None
    }
}
