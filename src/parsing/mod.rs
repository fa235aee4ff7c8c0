//! Readers that build genomes and variant streams from files.
//!
//! This module provides parsers for:
//!
//! - **GenBank files**: annotated reference records (`.gbk`, `.gb`, `.genbank`)
//! - **FASTA files**: a `>id|organism|name|extra` header plus the sequence
//! - **VCF files**: data lines decoded into [`VariantRecord`](crate::core::VariantRecord)s
//!
//! FASTA and VCF input may be gzip (`.gz`) or bzip2 (`.bz2`) compressed; the
//! compression is detected from the file name.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vasta::parsing::{load_genome, vcf::VcfReader};
//!
//! let reference = load_genome(Some(Path::new("H37Rv.gbk")), None).unwrap();
//! let reader = VcfReader::from_path(Path::new("SAMPLE01.vcf")).unwrap();
//! for record in reader {
//!     println!("{:?}", record.unwrap());
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::{Genome, GenomeError};
use crate::utils::validation::ValidationError;

pub mod fasta;
pub mod genbank;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("GenBank error: {0}")]
    GenBank(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Compression of an input file, judged by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputCompression {
    Plain,
    Gzip,
    Bzip2,
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn input_compression(path: &Path) -> InputCompression {
    let path_str = path.to_string_lossy().to_lowercase();
    if path_str.ends_with(".gz") || path_str.ends_with(".bgz") {
        InputCompression::Gzip
    } else if path_str.ends_with(".bz2") {
        InputCompression::Bzip2
    } else {
        InputCompression::Plain
    }
}

/// Open a file for buffered reading, decompressing gzip or bzip2 input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = match input_compression(path) {
        InputCompression::Plain => Box::new(BufReader::new(file)),
        InputCompression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        InputCompression::Bzip2 => Box::new(BufReader::new(BzDecoder::new(file))),
    };
    Ok(reader)
}

/// Check if the path has a GenBank extension
pub fn is_genbank_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref(),
        Some("gbk" | "gb" | "genbank" | "gbff")
    )
}

/// Load a genome from exactly one of a GenBank file or a FASTA file.
///
/// # Errors
///
/// Returns `ValidationError::NoReferenceSource` if neither path is given,
/// `ValidationError::ConflictingReferenceSources` if both are, or the
/// underlying `ParseError` if the file cannot be read.
pub fn load_genome(
    genbank_file: Option<&Path>,
    fasta_file: Option<&Path>,
) -> Result<Genome, GenomeError> {
    match (genbank_file, fasta_file) {
        (Some(path), None) => Ok(genbank::parse_genbank_file(path)?),
        (None, Some(path)) => Ok(fasta::parse_fasta_file(path)?),
        (None, None) => Err(ValidationError::NoReferenceSource.into()),
        (Some(_), Some(_)) => Err(ValidationError::ConflictingReferenceSources.into()),
    }
}

/// Load a genome, choosing the GenBank or FASTA reader from the file extension.
///
/// # Errors
///
/// Returns the underlying `ParseError` if the file cannot be read.
pub fn load_genome_auto(path: &Path) -> Result<Genome, GenomeError> {
    if is_genbank_file(path) {
        load_genome(Some(path), None)
    } else {
        load_genome(None, Some(path))
    }
}
