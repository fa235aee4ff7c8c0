use thiserror::Error;

use crate::core::metadata::{GenomeMetadata, REFERENCE_NAME};
use crate::parsing::ParseError;
use crate::utils::validation::ValidationError;

/// Symbol written at a heterozygous site
pub const AMBIGUOUS_CALL: u8 = b'n';

/// Symbol written at a site with no genotype call
pub const NO_CALL: u8 = b'-';

/// Number of symbols shown at either end by [`Genome::describe`]
const DESCRIBE_FLANK: usize = 10;

#[derive(Error, Debug)]
pub enum GenomeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A single flat-contig genome held as one lowercase symbol per position.
///
/// The length is fixed at construction. Writes outside `[0, len)` are
/// skipped rather than growing the sequence. `Clone` produces an independent
/// copy with its own backing storage, which is how a sample genome is
/// derived from a reference before variants are applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    bases: Vec<u8>,
    positions: Vec<usize>,
    is_reference: bool,

    /// Display and header metadata
    pub metadata: GenomeMetadata,
}

impl Genome {
    /// Build a non-reference genome from raw symbols, lowercasing them.
    pub fn from_sequence(sequence: impl AsRef<[u8]>) -> Self {
        let bases = sequence.as_ref().to_ascii_lowercase();
        let positions = (0..bases.len()).collect();

        Self {
            bases,
            positions,
            is_reference: false,
            metadata: GenomeMetadata::default(),
        }
    }

    /// Attach identity metadata.
    ///
    /// A sample name of `Reference` marks the genome as the reference.
    #[must_use]
    pub fn with_metadata(mut self, metadata: GenomeMetadata) -> Self {
        if metadata.name.as_deref() == Some(REFERENCE_NAME) {
            self.is_reference = true;
        }
        self.metadata = metadata;
        self
    }

    /// Set whether this is the unmutated reference genome
    #[must_use]
    pub fn with_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = is_reference;
        self
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub(crate) fn mark_as_sample(&mut self) {
        self.is_reference = false;
    }

    /// All symbols, index-aligned with [`Genome::positions`]
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    /// The position index, `0..len`
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Symbol at `position`, if it is inside the genome
    pub fn base(&self, position: usize) -> Option<u8> {
        self.bases.get(position).copied()
    }

    /// Overwrite the symbol at `position` with its lowercase form.
    ///
    /// Returns `false`, leaving the genome untouched, if `position` is past
    /// the end.
    pub fn set_base(&mut self, position: usize, symbol: u8) -> bool {
        match self.bases.get_mut(position) {
            Some(base) => {
                *base = symbol.to_ascii_lowercase();
                true
            }
            None => false,
        }
    }

    /// The whole genome as one string; non-UTF-8 bytes are replaced, so
    /// writers should use [`Genome::bases`]
    pub fn genome_string(&self) -> String {
        String::from_utf8_lossy(&self.bases).into_owned()
    }

    /// Multi-line human readable summary of the genome.
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();

        if let Some(id) = &self.metadata.id {
            lines.push(id.clone());
        }
        if let Some(organism) = &self.metadata.organism {
            lines.push(organism.clone());
        }
        if self.is_reference {
            lines.push(REFERENCE_NAME.to_string());
        } else {
            lines.push(format!(
                "Sample: {}",
                self.metadata.name.as_deref().unwrap_or("unnamed")
            ));
        }
        if let Some(provenance) = &self.metadata.provenance {
            lines.push(format!("Path: {}", provenance.folder.display()));
        }
        lines.push(format!("{} bases", self.len()));

        let head = &self.bases[..DESCRIBE_FLANK.min(self.len())];
        let tail = &self.bases[self.len().saturating_sub(DESCRIBE_FLANK)..];
        lines.push(format!(
            "{}....{}",
            String::from_utf8_lossy(head),
            String::from_utf8_lossy(tail)
        ));

        let mut summary = lines.join("\n");
        summary.push('\n');
        summary
    }
}
