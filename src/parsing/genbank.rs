//! Parser for annotated GenBank reference records using gb-io.
//!
//! Only the first record in the file is used. The resulting genome is
//! marked as the reference and named `Reference`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gb_io::reader::SeqReader;
use gb_io::seq::Seq;
use tracing::{info, warn};

use crate::core::{Genome, GenomeMetadata, REFERENCE_NAME};
use crate::parsing::ParseError;

/// Parse a GenBank file into a reference genome.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, `ParseError::GenBank`
/// if the record is malformed, or `ParseError::InvalidFormat` if the file
/// holds no record.
pub fn parse_genbank_file(path: &Path) -> Result<Genome, ParseError> {
    let file = File::open(path)?;
    let genome = parse_genbank_reader(file)?;
    info!(
        "Loaded {} bases from GenBank file {}",
        genome.len(),
        path.display()
    );
    Ok(genome)
}

/// Parse a GenBank record from any reader
///
/// # Errors
///
/// Returns `ParseError::GenBank` if the record is malformed, or
/// `ParseError::InvalidFormat` if there is no record.
pub fn parse_genbank_reader<R: Read>(reader: R) -> Result<Genome, ParseError> {
    let mut records = SeqReader::new(reader);

    let seq = records
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("No records found in GenBank file".to_string()))?
        .map_err(|e| ParseError::GenBank(e.to_string()))?;

    if records.next().is_some() {
        warn!("GenBank input holds more than one record; only the first is used");
    }

    let metadata = metadata_from_seq(&seq);
    Ok(Genome::from_sequence(&seq.seq)
        .with_metadata(metadata)
        .with_reference(true))
}

fn metadata_from_seq(seq: &Seq) -> GenomeMetadata {
    let id = seq
        .version
        .clone()
        .or_else(|| seq.accession.clone())
        .or_else(|| seq.name.clone());

    let (organism, taxonomy) = seq
        .source
        .as_ref()
        .and_then(|source| source.organism.as_deref())
        .map(split_organism)
        .unwrap_or_default();

    GenomeMetadata {
        sequence_version: seq.version.as_deref().and_then(sequence_version),
        source: seq.source.as_ref().map(|source| source.source.clone()),
        organism,
        taxonomy,
        id,
        name: Some(REFERENCE_NAME.to_string()),
        ..Default::default()
    }
}

/// Split an ORGANISM block into the organism name and its lineage.
///
/// The first line names the organism; any following lines hold the
/// `;`-separated lineage ending in a period.
fn split_organism(block: &str) -> (Option<String>, Vec<String>) {
    let mut lines = block.lines();
    let organism = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string);

    let lineage = lines.map(str::trim).collect::<Vec<_>>().join(" ");
    let taxonomy = lineage
        .trim_end_matches('.')
        .split(';')
        .map(str::trim)
        .filter(|taxon| !taxon.is_empty())
        .map(str::to_string)
        .collect();

    (organism, taxonomy)
}

/// Integer suffix of an `ACCESSION.VERSION` identifier
fn sequence_version(version: &str) -> Option<u32> {
    version
        .split_whitespace()
        .next()
        .and_then(|accession| accession.rsplit_once('.'))
        .and_then(|(_, number)| number.parse().ok())
}
