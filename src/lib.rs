//! # vasta
//!
//! A library for rebuilding a sample's genome from a reference genome and the
//! variants called for that sample.
//!
//! A reference is loaded from a GenBank or FASTA file, cloned, and the
//! single-sample VCF is applied to the clone in place. The sample genome can
//! then be compared against the reference position by position, and written
//! out as (optionally compressed) FASTA or as a raw array dump.
//!
//! ## Features
//!
//! - **Substitutions**: homozygous SNPs and equal-length MNPs are written into the sequence
//! - **Uncertainty markers**: heterozygous calls become `n`, missing calls become `-`
//! - **Indel tolerance**: insertions and deletions are skipped, never fatal
//! - **Positional diff**: Hamming-style comparison between two genomes
//! - **Compression**: gzip and bzip2 on both input and output
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vasta::{apply_vcf_file, compare, load_genome, write_fasta, FastaWriteOptions};
//! use vasta::utils::validation::Compression;
//!
//! let reference = load_genome(Some(Path::new("H37Rv.gbk")), None).unwrap();
//!
//! // Apply the variants to an independent copy
//! let mut sample = reference.clone();
//! apply_vcf_file(&mut sample, Path::new("runs/SAMPLE01.vcf")).unwrap();
//!
//! let differences = compare(&reference, &sample);
//! println!("{} differences", differences.len());
//!
//! let options = FastaWriteOptions::default().with_compression(Compression::Gzip, 2);
//! write_fasta(&sample, Path::new("runs/SAMPLE01.fasta"), &options).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: The genome store, metadata, and variant record types
//! - [`parsing`]: GenBank, FASTA and VCF readers
//! - [`mutation`]: Applying variant calls to a genome
//! - [`comparison`]: Position-by-position genome comparison
//! - [`output`]: FASTA and raw array writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod comparison;
pub mod core;
pub mod mutation;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use comparison::{compare, Difference};
pub use crate::core::genome::{Genome, GenomeError};
pub use crate::core::metadata::{GenomeMetadata, VariantProvenance};
pub use crate::core::variant::{Genotype, VariantRecord};
pub use mutation::{apply_variants, apply_vcf_file, ApplySummary};
pub use output::{load_array, save_array, write_fasta, FastaWriteOptions, OutputError};
pub use parsing::{load_genome, ParseError};
