use super::Centroid;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Precursor {
    pub mz: f64,
    #[serde(default)]
    pub intensity: f64,
    /// Zero when the charge state is unknown.
    #[serde(default)]
    pub charge: u8,
}

impl Precursor {
    pub fn new(mz: f64, charge: u8) -> Self {
        Self {
            mz,
            intensity: 0.0,
            charge,
        }
    }
}

/// A fragmentation spectrum.
///
/// Scans are values: everything that filters peaks works on a clone so the
/// spectrum handed in by the caller is never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(alias = "scan")]
    pub scan_number: u32,
    pub centroids: Vec<Centroid>,
    #[serde(default)]
    pub precursors: Vec<Precursor>,
    /// Acquisition m/z range. Both zero when unknown.
    #[serde(default)]
    pub start_mz: f64,
    #[serde(default)]
    pub end_mz: f64,
}

impl Scan {
    pub fn new(scan_number: u32, centroids: Vec<Centroid>, precursors: Vec<Precursor>) -> Self {
        let mut out = Self {
            scan_number,
            centroids,
            precursors,
            start_mz: 0.0,
            end_mz: 0.0,
        };
        out.sort_by_mz();
        out
    }

    pub fn with_mz_bounds(mut self, start_mz: f64, end_mz: f64) -> Self {
        self.start_mz = start_mz;
        self.end_mz = end_mz;
        self
    }

    pub fn sort_by_mz(&mut self) {
        self.centroids.sort_by(|a, b| a.mz.total_cmp(&b.mz));
    }

    pub fn precursor(&self) -> Option<&Precursor> {
        self.precursors.first()
    }

    /// m/z bounds for theoretical fragments. Unbounded above when the scan
    /// carries no acquisition range.
    pub fn mz_bounds(&self) -> (f64, f64) {
        if self.end_mz > self.start_mz {
            (self.start_mz, self.end_mz)
        } else {
            (0.0, f64::INFINITY)
        }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}
