use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Path to the tab separated peptides file (will over-write the config file)
    #[arg(short, long)]
    pub peptides: Option<PathBuf>,

    /// Path to the JSON or NDJSON scans file (will over-write the config file)
    #[arg(short, long)]
    pub scans: Option<PathBuf>,

    /// Path of the output table (will over-write the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
