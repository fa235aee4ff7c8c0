//! Writers for reconstructed genomes.
//!
//! - [`fasta`]: line-wrapped FASTA text, optionally gzip or bzip2 compressed
//! - [`array`]: uncompressed bincode dump of the symbols, for fast reload

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod array;
pub mod fasta;

pub use array::{load_array, save_array};
pub use fasta::{write_fasta, write_fasta_to, FastaWriteOptions};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to encode genome array: {0}")]
    Encode(#[from] bincode::Error),

    #[error("Unsupported genome array version {0}")]
    UnsupportedVersion(u32),
}
