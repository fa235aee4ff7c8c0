//! Core data types for genome reconstruction.
//!
//! - [`Genome`]: the sequence store, one lowercase symbol per position
//! - [`GenomeMetadata`]: identity fields used for display and FASTA headers
//! - [`VariantProvenance`]: the VCF a sample genome was built from
//! - [`VariantRecord`], [`Genotype`]: decoded variant calls
//!
//! ## Coordinates
//!
//! Positions are indexes into the symbol array, counting from 0. VCF
//! coordinates count from 1, but a variant is written at the literal `POS`
//! value with no adjustment, so `POS=3` changes index 3 (the fourth symbol).
//! Every piece of the crate that maps variants onto a genome follows this
//! convention.

pub mod genome;
pub mod metadata;
pub mod variant;

pub use genome::{Genome, GenomeError, AMBIGUOUS_CALL, NO_CALL};
pub use metadata::{GenomeMetadata, VariantProvenance, REFERENCE_NAME};
pub use variant::{Genotype, VariantRecord};
