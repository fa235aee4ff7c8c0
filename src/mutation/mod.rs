//! Applying called variants to a genome.
//!
//! A reference [`Genome`](crate::core::Genome) is cloned and the clone is
//! mutated in place, one record at a time, according to the first sample's
//! genotype:
//!
//! | Genotype | Effect |
//! |----------|--------|
//! | homozygous alternate, same length as REF | ALT written over the run starting at `POS` |
//! | homozygous alternate, different length | skipped (indels are not supported) |
//! | heterozygous | `n` written at `POS` |
//! | missing (`./.`) | `-` written at `POS` |
//! | homozygous reference, partial call | ignored |
//!
//! Writes past the end of the genome are skipped with a warning.

pub mod applicator;

pub use applicator::{apply_record, apply_variants, apply_vcf_file, ApplySummary};
