use crate::fragment_mass::FragmentIon;
use crate::models::Peptide;
use serde::Serialize;

/// Localization score of one target modification of the top candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteScore {
    /// 1 based residue position.
    pub position: usize,
    pub score: f64,
    pub ions_matched: usize,
    pub ions_total: usize,
    /// Top candidate then the competing candidate, empty when unambiguous.
    pub peptides: Vec<Peptide>,
    pub site_ions: Vec<Vec<FragmentIon>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AScoreOutput {
    pub scan_number: u32,
    /// Target modifications on the input peptide.
    pub mod_count: usize,
    pub best_peak_depth: usize,
    pub best_peptide_score: f64,
    /// Candidates, best first.
    pub peptides: Vec<Peptide>,
    pub sites: Vec<SiteScore>,
}

impl AScoreOutput {
    pub fn top_peptide(&self) -> Option<&Peptide> {
        self.peptides.first()
    }
}
