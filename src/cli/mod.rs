//! Command-line interface for vasta.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **apply**: Rebuild a sample genome from a reference and a VCF file
//! - **compare**: List the positions where two genomes differ
//!
//! ## Usage
//!
//! ```text
//! # Rebuild a sample against the default H37Rv GenBank reference
//! vasta apply --vcf-file runs/SAMPLE01.vcf
//! # -> runs/SAMPLE01.fasta.gz
//!
//! # Use a FASTA reference and write lowercase, 60 characters per line
//! vasta apply --vcf-file SAMPLE01.vcf --fasta-file ref.fasta --chars-per-line 60 --lowercase
//!
//! # Compare a reference against a reconstructed sample
//! vasta compare H37Rv.gbk runs/SAMPLE01.fasta.gz --format json
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::core::Genome;
use crate::output::load_array;
use crate::parsing::load_genome_auto;

pub mod apply;
pub mod compare;

/// Extension used for raw genome array dumps
pub const ARRAY_EXTENSION: &str = "bin";

#[derive(Parser)]
#[command(name = "vasta")]
#[command(version)]
#[command(about = "Rebuild sample genomes from a reference and a VCF file")]
#[command(
    long_about = "vasta applies the variants called in a single-sample VCF file to a reference genome and writes the resulting sample genome as FASTA.\n\nHomozygous substitutions are written into the sequence, heterozygous calls become 'n' and missing calls become '-'. Indels are skipped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a VCF file to a reference and write the sample genome
    Apply(apply::ApplyArgs),

    /// Compare two genomes position by position
    Compare(compare::CompareArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a genome from GenBank, FASTA, or a raw array dump
fn load_any_genome(path: &Path) -> anyhow::Result<Genome> {
    let is_array = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARRAY_EXTENSION));

    if is_array {
        Ok(load_array(path)?)
    } else {
        Ok(load_genome_auto(path)?)
    }
}
