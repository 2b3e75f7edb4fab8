use super::ScanFilter;
use crate::models::{
    Centroid,
    Scan,
};

/// Ranks peaks by intensity inside fixed m/z windows and keeps the top `depth`.
///
/// Windows start at `floor(mz / window) * window` of their first peak. A peak
/// exactly on the upper edge stays in the current window.
#[derive(Debug, Clone, Copy)]
pub struct TopIonsFilter {
    depth: usize,
    window: f64,
}

impl TopIonsFilter {
    pub fn new(depth: usize, window: f64) -> Self {
        Self { depth, window }
    }

    fn window_end(&self, mz: f64) -> f64 {
        (mz / self.window).floor() * self.window + self.window
    }

    fn rank(&self, peaks: &mut [Centroid]) {
        let Some(first) = peaks.first() else {
            return;
        };
        let mut start = 0;
        let mut window_end = self.window_end(first.mz);
        for i in 0..=peaks.len() {
            if i < peaks.len() && peaks[i].mz <= window_end {
                continue;
            }
            let current = &mut peaks[start..i];
            current.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
            for (rank, peak) in current.iter_mut().enumerate() {
                peak.rank = rank as u32 + 1;
            }
            if i < peaks.len() {
                start = i;
                window_end = self.window_end(peaks[i].mz);
            }
        }
    }
}

impl ScanFilter for TopIonsFilter {
    fn filter(&self, scan: &mut Scan) {
        if scan.is_empty() {
            return;
        }
        scan.sort_by_mz();
        self.rank(&mut scan.centroids);
        scan.sort_by_mz();
        let depth = self.depth as u32;
        scan.centroids.retain(|p| p.rank <= depth);
    }
}
