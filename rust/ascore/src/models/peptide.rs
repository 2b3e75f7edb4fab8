use crate::errors::DataProcessingError;
use serde::ser::SerializeStruct;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

/// Template of a modification as written in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationDescriptor {
    pub symbol: char,
    pub mass: f64,
    /// Residues the modification can be placed on, e.g. "STY".
    #[serde(default)]
    pub residues: String,
    #[serde(default, rename = "n-term")]
    pub n_term: bool,
    #[serde(default, rename = "c-term")]
    pub c_term: bool,
}

impl ModificationDescriptor {
    pub fn applies(&self, aa: char) -> bool {
        self.residues.chars().any(|x| x == aa)
    }
}

/// A modification resolved to a residue of a specific peptide.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMod {
    pub position: usize,
    pub modification: Arc<ModificationDescriptor>,
}

impl PlacedMod {
    pub fn symbol(&self) -> char {
        self.modification.symbol
    }

    pub fn mass(&self) -> f64 {
        self.modification.mass
    }
}

impl Serialize for PlacedMod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlacedMod", 3)?;
        state.serialize_field("position", &self.position)?;
        state.serialize_field("symbol", &self.modification.symbol)?;
        state.serialize_field("mass", &self.modification.mass)?;
        state.end()
    }
}

/// Position to modifications map. Several modifications can stack on one residue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeptideMods {
    mods: BTreeMap<usize, Vec<PlacedMod>>,
}

impl PeptideMods {
    pub fn add(&mut self, position: usize, modification: Arc<ModificationDescriptor>) {
        self.mods.entry(position).or_default().push(PlacedMod {
            position,
            modification,
        });
    }

    pub fn mods_at(&self, position: usize) -> &[PlacedMod] {
        match self.mods.get(&position) {
            Some(x) => x.as_slice(),
            None => &[],
        }
    }

    pub fn has_symbol_at(&self, position: usize, symbol: char) -> bool {
        self.mods_at(position).iter().any(|m| m.symbol() == symbol)
    }

    /// Iterates by ascending position, in insertion order within a position.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedMod> {
        self.mods.values().flatten()
    }

    pub fn positions_of(&self, symbol: char) -> Vec<usize> {
        self.iter()
            .filter(|m| m.symbol() == symbol)
            .map(|m| m.position)
            .collect()
    }

    pub fn without_symbol(&self, symbol: char) -> Self {
        let mut out = Self::default();
        for m in self.iter().filter(|m| m.symbol() != symbol) {
            out.add(m.position, m.modification.clone());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.mods.values().map(|x| x.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for PeptideMods {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakMatch {
    pub theo_mz: f64,
    pub obs_mz: f64,
    pub intensity: f64,
    pub rank: u32,
}

/// A peptide sequence with its modifications and the statistics filled in
/// while scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Peptide {
    pub id: u64,
    pub scan_number: u32,
    sequence: String,
    pub left_flank: Option<char>,
    pub right_flank: Option<char>,
    mods: PeptideMods,
    pub precursor_mz: f64,

    pub score: f64,
    pub ions_matched: usize,
    pub ions_total: usize,
    /// Index of the placement that produced this candidate.
    pub generator_index: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<PeakMatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches_by_depth: Vec<usize>,
}

impl Peptide {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            ..Default::default()
        }
    }

    /// Every position in `mods` must be inside `sequence`.
    pub(crate) fn from_parts(sequence: String, mods: PeptideMods) -> Self {
        debug_assert!(mods.iter().all(|m| m.position < sequence.len()));
        Self {
            sequence,
            mods,
            ..Default::default()
        }
    }

    pub fn with_flanks(mut self, left: Option<char>, right: Option<char>) -> Self {
        self.left_flank = left;
        self.right_flank = right;
        self
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn mods(&self) -> &PeptideMods {
        &self.mods
    }

    pub fn add_mod(
        &mut self,
        position: usize,
        modification: Arc<ModificationDescriptor>,
    ) -> Result<(), DataProcessingError> {
        if position >= self.len() {
            return Err(DataProcessingError::ModPositionOutOfRange {
                position,
                length: self.len(),
            });
        }
        self.mods.add(position, modification);
        Ok(())
    }

    /// Copy of the peptide with every modification using `symbol` removed
    /// and the scoring fields reset.
    pub fn without_mods_of(&self, symbol: char) -> Self {
        Self {
            id: self.id,
            scan_number: self.scan_number,
            sequence: self.sequence.clone(),
            left_flank: self.left_flank,
            right_flank: self.right_flank,
            mods: self.mods.without_symbol(symbol),
            precursor_mz: self.precursor_mz,
            ..Default::default()
        }
    }
}

/// Annotated form, e.g. `K.KEES#EES#DDDM*GFGLFD.-`.
impl Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(x) = self.left_flank {
            write!(f, "{}.", x)?;
        }
        for (i, aa) in self.sequence.chars().enumerate() {
            write!(f, "{}", aa)?;
            for m in self.mods.mods_at(i) {
                write!(f, "{}", m.symbol())?;
            }
        }
        if let Some(x) = self.right_flank {
            write!(f, ".{}", x)?;
        }
        Ok(())
    }
}
