//! Raw symbol dump for fast reload.
//!
//! The genome's symbols are written with bincode, uncompressed, with no
//! header or line wrapping. Metadata is not stored: a reloaded genome is a
//! bare, non-reference genome with the same symbols.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Genome;
use crate::output::OutputError;

/// Format version for compatibility checking
pub const ARRAY_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct GenomeArray<'a> {
    version: u32,
    bases: Cow<'a, [u8]>,
}

/// Dump the genome's symbols to `path`.
///
/// # Errors
///
/// Returns `OutputError::Io` if the file cannot be written, or
/// `OutputError::Encode` if encoding fails.
pub fn save_array(genome: &Genome, path: &Path) -> Result<(), OutputError> {
    let array = GenomeArray {
        version: ARRAY_FORMAT_VERSION,
        bases: Cow::Borrowed(genome.bases()),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &array)?;
    writer.flush()?;

    info!("Wrote {} bases to {}", genome.len(), path.display());
    Ok(())
}

/// Reload a genome written by [`save_array`].
///
/// # Errors
///
/// Returns `OutputError::Io` if the file cannot be read,
/// `OutputError::Encode` if it cannot be decoded, or
/// `OutputError::UnsupportedVersion` for a dump from another format version.
pub fn load_array(path: &Path) -> Result<Genome, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    let array: GenomeArray<'static> = bincode::deserialize_from(reader)?;

    if array.version != ARRAY_FORMAT_VERSION {
        return Err(OutputError::UnsupportedVersion(array.version));
    }

    Ok(Genome::from_sequence(array.bases))
}
