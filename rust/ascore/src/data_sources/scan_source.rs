use crate::errors::DataReadingError;
use crate::models::Scan;
use std::collections::HashMap;
use std::io::{
    BufRead,
    BufReader,
    Read,
};
use std::path::{
    Path,
    PathBuf,
};
use tracing::{
    debug,
    warn,
};

/// Anything that can hand out scans by scan number.
pub trait ScanSource {
    fn get_scan(&self, scan_number: u32) -> Option<&Scan>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
    /// A single JSON array of scans.
    JsonArray,
    /// One scan object per line.
    NdJson,
}

impl ScanFormat {
    /// Looks at the first non blank byte, `[` means an array.
    pub fn detect(head: &[u8]) -> Self {
        match head.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') => Self::JsonArray,
            _ => Self::NdJson,
        }
    }
}

/// In memory scans keyed by scan number.
#[derive(Debug, Clone, Default)]
pub struct ScanCache {
    scans: HashMap<u32, Scan>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan numbers below 1 are not valid and get dropped. Peaks are sorted by m/z.
    pub fn insert(&mut self, mut scan: Scan) -> bool {
        if scan.scan_number < 1 {
            return false;
        }
        scan.sort_by_mz();
        if self.scans.insert(scan.scan_number, scan).is_some() {
            debug!("Replacing duplicated scan");
        }
        true
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    pub fn from_file(path: &Path) -> Result<Self, DataReadingError> {
        let file = std::fs::File::open(path).map_err(|e| DataReadingError::FileReadingError {
            source: e,
            path: PathBuf::from(path),
        })?;
        let mut reader = BufReader::new(file);
        let format = match reader.fill_buf() {
            Ok(head) => ScanFormat::detect(head),
            Err(e) => {
                return Err(DataReadingError::FileReadingError {
                    source: e,
                    path: PathBuf::from(path),
                });
            }
        };
        let out = Self::from_reader(reader, format)?;
        debug!("Loaded {} scans from {}", out.len(), path.display());
        Ok(out)
    }

    pub fn from_reader<R: Read>(reader: R, format: ScanFormat) -> Result<Self, DataReadingError> {
        let scans: Vec<Scan> = match format {
            ScanFormat::JsonArray => serde_json::from_reader(reader).map_err(|e| {
                DataReadingError::JsonParsingError {
                    source: e,
                    context: "scan array".into(),
                }
            })?,
            ScanFormat::NdJson => {
                let mut out = Vec::new();
                for (i, line) in BufReader::new(reader).lines().enumerate() {
                    let line = line.map_err(|e| DataReadingError::FileReadingError {
                        source: e,
                        path: PathBuf::new(),
                    })?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let scan = serde_json::from_str(&line).map_err(|e| {
                        DataReadingError::JsonParsingError {
                            source: e,
                            context: format!("scan on line {}", i + 1),
                        }
                    })?;
                    out.push(scan);
                }
                out
            }
        };

        let mut cache = Self::new();
        let mut skipped = 0;
        for scan in scans {
            if !cache.insert(scan) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!("Skipped {} scans with a scan number below 1", skipped);
        }
        Ok(cache)
    }
}

impl ScanSource for ScanCache {
    fn get_scan(&self, scan_number: u32) -> Option<&Scan> {
        self.scans.get(&scan_number)
    }
}

impl FromIterator<Scan> for ScanCache {
    fn from_iter<T: IntoIterator<Item = Scan>>(iter: T) -> Self {
        let mut out = Self::new();
        for scan in iter {
            out.insert(scan);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ARRAY: &str = r#"[
        {"scan_number": 3, "centroids": [{"mz": 300.0, "intensity": 5.0}, {"mz": 200.0, "intensity": 1.0}],
         "precursors": [{"mz": 600.0, "charge": 2}]},
        {"scan": 0, "centroids": []}
    ]"#;

    #[test]
    fn test_detect() {
        assert_eq!(ScanFormat::detect(b"  \n[{"), ScanFormat::JsonArray);
        assert_eq!(ScanFormat::detect(b"{\"scan\": 1}"), ScanFormat::NdJson);
        assert_eq!(ScanFormat::detect(b""), ScanFormat::NdJson);
    }

    #[test]
    fn test_array() {
        let cache = ScanCache::from_reader(Cursor::new(ARRAY), ScanFormat::JsonArray).unwrap();
        assert_eq!(cache.len(), 1);
        let scan = cache.get_scan(3).unwrap();
        assert_eq!(scan.centroids[0].mz, 200.0);
        assert_eq!(scan.precursor().unwrap().charge, 2);
        assert!(cache.get_scan(0).is_none());
    }

    #[test]
    fn test_ndjson() {
        let text = "{\"scan\": 1, \"centroids\": []}\n\n{\"scan\": 2, \"centroids\": [{\"mz\": 1.0, \"intensity\": 2.0}]}\n";
        let cache = ScanCache::from_reader(Cursor::new(text), ScanFormat::NdJson).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_scan(2).unwrap().len(), 1);
    }

    #[test]
    fn test_bad_line() {
        let text = "{\"scan\": 1, \"centroids\": []}\nnot json\n";
        let err = ScanCache::from_reader(Cursor::new(text), ScanFormat::NdJson).unwrap_err();
        assert!(matches!(
            err,
            DataReadingError::JsonParsingError { ref context, .. } if context == "scan on line 2"
        ));
    }
}
