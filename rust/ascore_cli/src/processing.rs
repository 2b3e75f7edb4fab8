use ascore::data_sources::{
    PeptideEntry,
    read_peptides_file,
};
use ascore::{
    AScoreCalculator,
    AScoreOutput,
    Peptide,
    ScanCache,
    ScanSource,
};
use indicatif::{
    ProgressIterator,
    ProgressStyle,
};
use std::path::Path;
use std::time::Instant;
use tracing::{
    debug,
    info,
    warn,
};

use crate::errors::CliError;

/// Site columns written per row, missing sites are `\N`.
const MAX_SITE_COLUMNS: usize = 6;
const NULL_FIELD: &str = "\\N";

pub fn header() -> Vec<String> {
    let mut out: Vec<String> = ["ID", "ModsScored", "PeptidesScored", "Peptide", "Score"]
        .iter()
        .map(|x| x.to_string())
        .collect();
    for i in 1..=MAX_SITE_COLUMNS {
        out.push(format!("SitePosition{}", i));
        out.push(format!("SiteScore{}", i));
    }
    out
}

pub fn format_row(output: &AScoreOutput) -> Option<Vec<String>> {
    let top = output.top_peptide()?;
    let mut out = vec![
        top.id.to_string(),
        output.mod_count.to_string(),
        output.peptides.len().to_string(),
        top.to_string(),
        format!("{:.9}", top.score),
    ];
    for i in 0..MAX_SITE_COLUMNS {
        match output.sites.get(i) {
            Some(site) => {
                out.push(site.position.to_string());
                out.push(format!("{:.9}", site.score));
            }
            None => {
                out.push(NULL_FIELD.to_string());
                out.push(NULL_FIELD.to_string());
            }
        }
    }
    Some(out)
}

fn to_peptide(calc: &AScoreCalculator, entry: &PeptideEntry) -> Option<Peptide> {
    match calc.config().parser.parse(&entry.peptide) {
        Ok(mut peptide) => {
            peptide.id = entry.id;
            peptide.scan_number = entry.scan_number;
            peptide.precursor_mz = entry.precursor_mz;
            Some(peptide)
        }
        Err(e) => {
            warn!("Skipping peptide {}: {}", entry.id, e);
            None
        }
    }
}

pub fn run_single(
    calc: &AScoreCalculator,
    scans: &ScanCache,
    peptide: &str,
    scan_number: u32,
    mz: Option<f64>,
) -> Result<(), CliError> {
    let mut peptide = calc
        .config()
        .parser
        .parse(peptide)
        .map_err(|e| CliError::Config {
            source: e.to_string(),
        })?;
    peptide.scan_number = scan_number;
    let scan = scans
        .get_scan(scan_number)
        .ok_or(ascore::errors::DataReadingError::MissingScan { scan_number })?;
    // Without an explicit m/z the precursor of the scan is used.
    peptide.precursor_mz = mz.unwrap_or_default();

    let result = calc.run(&peptide, scan)?;
    let text = serde_json::to_string_pretty(&result).map_err(|e| CliError::ParseError {
        msg: e.to_string(),
    })?;
    println!("{}", text);
    Ok(())
}

pub fn run_batch(
    calc: &AScoreCalculator,
    scans: &ScanCache,
    peptides_path: &Path,
    output_path: &Path,
    chunk_size: usize,
) -> Result<(), CliError> {
    let start = Instant::now();
    let entries = read_peptides_file(peptides_path)?;
    info!(
        "Loaded {} peptides from {}",
        entries.len(),
        peptides_path.display()
    );

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(output_path)
        .map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(output_path.to_string_lossy().to_string()),
        })?;
    let write_err = |e: csv::Error| CliError::Io {
        source: e.to_string(),
        path: Some(output_path.to_string_lossy().to_string()),
    };
    writer.write_record(header()).map_err(write_err)?;

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .map_err(|e| CliError::Config {
        source: e.to_string(),
    })?;

    let mut nscored = 0;
    let mut nfailed = 0;
    for chunk in entries.chunks(chunk_size.max(1)).progress_with_style(style) {
        let peptides: Vec<Peptide> = chunk.iter().filter_map(|x| to_peptide(calc, x)).collect();
        nfailed += chunk.len() - peptides.len();
        // Parallelism happens inside run_batch
        let results = calc.run_batch(&peptides, scans);
        for (peptide, result) in peptides.iter().zip(results) {
            match result {
                Ok(output) => {
                    if let Some(row) = format_row(&output) {
                        writer.write_record(&row).map_err(write_err)?;
                        nscored += 1;
                    }
                }
                Err(e) => {
                    warn!("Failed scoring peptide {} ({}): {}", peptide.id, peptide, e);
                    nfailed += 1;
                }
            }
        }
        debug!("Wrote chunk of {} peptides", chunk.len());
    }
    writer.flush().map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(output_path.to_string_lossy().to_string()),
    })?;

    info!(
        "Scored {} peptides ({} failed) in {:?}",
        nscored,
        nfailed,
        start.elapsed()
    );
    Ok(())
}
