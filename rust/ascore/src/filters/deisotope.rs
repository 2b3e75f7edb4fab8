use super::ScanFilter;
use crate::mass::MzTolerance;
use crate::mass::constants::NEUTRON;
use crate::matching::find_match;
use crate::models::Scan;

/// Removes peaks that look like the isotope of a lower m/z peak.
///
/// A peak goes when the best match for `mz - neutron / z` (z up to 2, capped by
/// the precursor charge) is a different peak and the candidate is less than
/// 1.2 times as intense as it. Matches are looked up in the unfiltered list.
#[derive(Debug, Clone, Copy)]
pub struct MatchDeisotoper {
    tolerance: MzTolerance,
}

impl MatchDeisotoper {
    pub fn new(tolerance: MzTolerance) -> Self {
        Self { tolerance }
    }

    fn max_charge(scan: &Scan) -> u8 {
        match scan.precursor() {
            Some(p) if p.charge > 0 => p.charge.min(2),
            _ => 1,
        }
    }
}

impl ScanFilter for MatchDeisotoper {
    fn filter(&self, scan: &mut Scan) {
        if scan.len() < 4 {
            return;
        }

        let max_charge = Self::max_charge(scan);
        let peaks = &scan.centroids;
        let is_isotope = |i: usize| {
            let peak = &peaks[i];
            (1..=max_charge).any(|charge| {
                let target = peak.mz - (NEUTRON / charge as f64);
                match find_match(peaks, target, &self.tolerance) {
                    Some(j) => j != i && peak.intensity < 1.2 * peaks[j].intensity,
                    None => false,
                }
            })
        };

        let kept: Vec<_> = (0..peaks.len())
            .filter(|&i| !is_isotope(i))
            .map(|i| peaks[i])
            .collect();
        scan.centroids = kept;
    }
}
