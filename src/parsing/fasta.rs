//! Parser for FASTA genomes using noodles.
//!
//! The definition line is read as up to four `|`-separated fields:
//!
//! ```text
//! >NC_000962.3|Mycobacterium tuberculosis H37Rv|SAMPLE01|lineage4
//!  id          organism                         name     additional metadata
//! ```
//!
//! A name of `Reference` marks the genome as the reference. Only the first
//! record of a multi-record file is used.
//!
//! Supported compression (by extension): `.gz`/`.bgz` and `.bz2`.

use std::io::BufRead;
use std::path::Path;

use noodles::fasta;
use tracing::{info, warn};

use crate::core::{Genome, GenomeMetadata};
use crate::parsing::{open_input, ParseError};

/// Maximum number of header fields; anything after the fourth `|` stays in the last
const MAX_HEADER_FIELDS: usize = 4;

/// Parse a FASTA file, possibly compressed, into a genome.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, or `ParseError::InvalidFormat` if there is no record.
pub fn parse_fasta_file(path: &Path) -> Result<Genome, ParseError> {
    let reader = open_input(path)?;
    let genome = parse_fasta_reader(reader)?;
    info!(
        "Loaded {} bases from FASTA file {}",
        genome.len(),
        path.display()
    );
    Ok(genome)
}

/// Parse FASTA text held in memory
///
/// # Errors
///
/// Returns `ParseError::Noodles` if parsing fails, or
/// `ParseError::InvalidFormat` if there is no record.
pub fn parse_fasta_text(text: &str) -> Result<Genome, ParseError> {
    parse_fasta_reader(text.as_bytes())
}

fn parse_fasta_reader<R: BufRead>(reader: R) -> Result<Genome, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);

    // Read verbatim: `Record::description` drops whitespace at the name split
    let mut line = String::new();
    let read = fasta_reader
        .read_definition(&mut line)
        .map_err(|e| ParseError::Noodles(format!("Failed to read FASTA definition: {e}")))?;
    if read == 0 {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }
    let definition = line.strip_prefix('>').ok_or_else(|| {
        ParseError::InvalidFormat("FASTA definition line must start with '>'".to_string())
    })?;

    let mut sequence = Vec::new();
    fasta_reader
        .read_sequence(&mut sequence)
        .map_err(|e| ParseError::Noodles(format!("Failed to read FASTA sequence: {e}")))?;

    let mut next = String::new();
    if matches!(fasta_reader.read_definition(&mut next), Ok(n) if n > 0) {
        warn!("FASTA input holds more than one record; only the first is used");
    }

    let metadata = parse_header(definition);
    Ok(Genome::from_sequence(&sequence).with_metadata(metadata))
}

/// Split a definition line (without the leading `>`) into metadata fields
pub fn parse_header(definition: &str) -> GenomeMetadata {
    let mut fields = definition
        .trim_end_matches(['\r', '\n'])
        .splitn(MAX_HEADER_FIELDS, '|')
        .map(|field| Some(field.to_string()).filter(|f| !f.is_empty()));

    GenomeMetadata {
        id: fields.next().flatten(),
        organism: fields.next().flatten(),
        name: fields.next().flatten(),
        additional_metadata: fields.next().flatten(),
        ..Default::default()
    }
}
