use super::{
    ModificationDescriptor,
    Peptide,
    PeptideMods,
};
use crate::errors::{
    ConfigError,
    PeptideParsingError,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Reads annotated peptides such as `K.M*LAES#DDS#GDEESVSQTDK.T`.
///
/// Only the symbols of the differential modifications it was built with are
/// accepted. Flanking residues are optional on both sides.
#[derive(Debug, Clone, Default)]
pub struct PeptideParser {
    mods: HashMap<char, Arc<ModificationDescriptor>>,
}

impl PeptideParser {
    pub fn new(mods: &[ModificationDescriptor]) -> Result<Self, ConfigError> {
        let mut out = HashMap::with_capacity(mods.len());
        for m in mods {
            if out.insert(m.symbol, Arc::new(m.clone())).is_some() {
                return Err(ConfigError::DuplicateModSymbol { symbol: m.symbol });
            }
        }
        Ok(Self { mods: out })
    }

    pub fn get(&self, symbol: char) -> Option<&Arc<ModificationDescriptor>> {
        self.mods.get(&symbol)
    }

    pub fn parse(&self, peptide: &str) -> Result<Peptide, PeptideParsingError> {
        let chars: Vec<char> = peptide.trim().chars().collect();
        let mut start = 0;
        let mut end = chars.len();
        let mut left_flank = None;
        let mut right_flank = None;
        if chars.len() > 1 && chars[1] == '.' {
            left_flank = Some(chars[0]);
            start = 2;
        }
        if chars.len() > 1 && chars[chars.len() - 2] == '.' {
            right_flank = Some(chars[chars.len() - 1]);
            end = chars.len() - 2;
        }

        let mut sequence = String::with_capacity(end.saturating_sub(start));
        let mut mods = PeptideMods::default();
        for &c in chars.get(start..end).unwrap_or(&[]) {
            if c.is_ascii_alphabetic() {
                sequence.push(c);
                continue;
            }
            let Some(m) = self.mods.get(&c) else {
                return Err(PeptideParsingError::UnknownModSymbol {
                    symbol: c,
                    peptide: peptide.to_string(),
                });
            };
            if sequence.is_empty() {
                return Err(PeptideParsingError::ModBeforeResidue {
                    symbol: c,
                    peptide: peptide.to_string(),
                });
            }
            mods.add(sequence.len() - 1, m.clone());
        }

        Ok(Peptide::from_parts(sequence, mods).with_flanks(left_flank, right_flank))
    }
}
