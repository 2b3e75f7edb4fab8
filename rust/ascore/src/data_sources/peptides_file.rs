//! Tab separated peptide requests: `id, scan, peptide, precursor m/z`.

use crate::errors::DataReadingError;
use serde::Serialize;
use std::io::Read;
use std::path::{
    Path,
    PathBuf,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeptideEntry {
    pub id: u64,
    pub scan_number: u32,
    /// Annotated sequence, parsed later with the configured modifications.
    pub peptide: String,
    pub precursor_mz: f64,
}

fn field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<T, DataReadingError> {
    let raw = record.get(index).ok_or_else(|| DataReadingError::MalformedRecord {
        line,
        msg: format!("missing column '{}'", name),
    })?;
    raw.trim()
        .parse()
        .map_err(|_| DataReadingError::MalformedRecord {
            line,
            msg: format!("invalid {} '{}'", name, raw),
        })
}

/// Reads every request. Header rows and blank lines are skipped.
pub fn read_peptides<R: Read>(reader: R) -> Result<Vec<PeptideEntry>, DataReadingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| DataReadingError::MalformedRecord {
            line: i + 1,
            msg: e.to_string(),
        })?;
        let line = record.position().map_or(i + 1, |p| p.line() as usize);
        if record.iter().all(|x| x.trim().is_empty()) {
            continue;
        }
        if record
            .iter()
            .any(|x| x.trim().eq_ignore_ascii_case("peptide"))
        {
            continue;
        }
        out.push(PeptideEntry {
            id: field(&record, 0, "id", line)?,
            scan_number: field(&record, 1, "scan", line)?,
            peptide: field::<String>(&record, 2, "peptide", line)?,
            precursor_mz: field(&record, 3, "precursor m/z", line)?,
        });
    }
    Ok(out)
}

pub fn read_peptides_file(path: &Path) -> Result<Vec<PeptideEntry>, DataReadingError> {
    let file = std::fs::File::open(path).map_err(|e| DataReadingError::FileReadingError {
        source: e,
        path: PathBuf::from(path),
    })?;
    read_peptides(file)
}
