mod cli;
mod config;
mod errors;
mod processing;

use ascore::{
    AScoreCalculator,
    ScanCache,
};
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{
    Config,
    RunMode,
};

#[cfg(target_os = "windows")]
use mimalloc::MiMalloc;

#[cfg(target_os = "windows")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> std::result::Result<(), errors::CliError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::from_file(&args.config)?.with_cli_args(&args);
    info!("Parsed configuration: {:#?}", config);

    let mode = config.run_mode()?;
    let calc = AScoreCalculator::new(config.analysis.validate()?);

    let scans_path = config.scans_path()?;
    let st = std::time::Instant::now();
    let scans = ScanCache::from_file(scans_path)?;
    info!(
        "Loading {} scans took: {:?} for {}",
        scans.len(),
        st.elapsed(),
        scans_path.display()
    );

    match mode {
        RunMode::Single { peptide, scan, mz } => {
            processing::run_single(&calc, &scans, &peptide, scan, mz)?
        }
        RunMode::Batch { peptides, output } => processing::run_batch(
            &calc,
            &scans,
            &peptides,
            &output,
            config.input.chunk_size,
        )?,
    }

    Ok(())
}
