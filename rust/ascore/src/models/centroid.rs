use serde::{
    Deserialize,
    Serialize,
};

/// A single centroided peak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub mz: f64,
    pub intensity: f64,
    #[serde(default)]
    pub baseline: f64,
    #[serde(default)]
    pub noise: f64,
    #[serde(default)]
    pub charge: u8,
    /// Intensity rank inside its m/z window, 1 is the most intense.
    /// Zero means the peak has not been ranked yet.
    #[serde(default)]
    pub rank: u32,
}

impl Centroid {
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self {
            mz,
            intensity,
            ..Default::default()
        }
    }
}
