pub mod peptides_file;
pub mod scan_source;

pub use peptides_file::{
    PeptideEntry,
    read_peptides,
    read_peptides_file,
};
pub use scan_source::{
    ScanCache,
    ScanFormat,
    ScanSource,
};
