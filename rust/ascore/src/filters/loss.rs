use super::{
    ScanFilter,
    remove_matching,
};
use crate::mass::MzTolerance;
use crate::mass::constants::{
    PHOSPHO_NEUTRAL_LOSSES,
    WATER,
};
use crate::models::{
    Precursor,
    Scan,
};

fn usable_precursor(scan: &Scan) -> Option<Precursor> {
    match scan.precursor() {
        Some(p) if p.mz >= 1.0 && p.charge > 0 => Some(*p),
        _ => None,
    }
}

/// Strips peaks at the precursor minus one and two waters.
#[derive(Debug, Clone, Copy)]
pub struct WaterLossFilter {
    tolerance: MzTolerance,
}

impl WaterLossFilter {
    pub fn new(tolerance: MzTolerance) -> Self {
        Self { tolerance }
    }
}

impl ScanFilter for WaterLossFilter {
    fn filter(&self, scan: &mut Scan) {
        let Some(precursor) = usable_precursor(scan) else {
            return;
        };
        let charge = precursor.charge as f64;
        for n_waters in [1.0, 2.0] {
            let target = precursor.mz - (n_waters * WATER / charge);
            remove_matching(scan, target, &self.tolerance);
        }
    }
}

/// Strips peaks at the precursor minus the phosphate losses (HPO3, H3PO4).
#[derive(Debug, Clone, Copy)]
pub struct NeutralLossFilter {
    tolerance: MzTolerance,
}

impl NeutralLossFilter {
    pub fn new(tolerance: MzTolerance) -> Self {
        Self { tolerance }
    }
}

impl ScanFilter for NeutralLossFilter {
    fn filter(&self, scan: &mut Scan) {
        let Some(precursor) = usable_precursor(scan) else {
            return;
        };
        let charge = precursor.charge as f64;
        for loss in PHOSPHO_NEUTRAL_LOSSES {
            remove_matching(scan, precursor.mz - (loss / charge), &self.tolerance);
        }
    }
}
