use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::{
    Genome, GenomeError, Genotype, VariantProvenance, VariantRecord, AMBIGUOUS_CALL, NO_CALL,
};
use crate::parsing::vcf::VcfReader;

/// Counts of what happened while applying a variant stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Records read from the stream
    pub records: usize,
    /// Symbols written by homozygous-alternate substitutions
    pub substituted_bases: usize,
    /// Ambiguous-call markers written for heterozygous sites
    pub heterozygous_sites: usize,
    /// No-call markers written for missing sites
    pub missing_sites: usize,
    /// Homozygous-alternate records skipped because REF and ALT differ in length
    pub skipped_indels: usize,
    /// Homozygous-reference and partial calls, which change nothing
    pub ignored_calls: usize,
    /// Writes skipped because the position was past the end of the genome
    pub out_of_bounds: usize,
}

impl ApplySummary {
    /// Total symbols written into the genome
    #[must_use]
    pub fn bases_written(&self) -> usize {
        self.substituted_bases + self.heterozygous_sites + self.missing_sites
    }
}

/// Turn `genome` into a sample genome by applying the calls in a VCF file.
///
/// `genome` is mutated in place; clone the reference first if it must be kept.
/// Provenance and the sample name are recorded before the first record is
/// read, so they are set even for an empty file.
///
/// # Errors
///
/// Returns `GenomeError::Parse` if the file cannot be opened or a record is
/// malformed. The genome is left partly mutated in that case.
pub fn apply_vcf_file(genome: &mut Genome, path: &Path) -> Result<ApplySummary, GenomeError> {
    mark_sample(genome, VariantProvenance::from_vcf_path(path));

    let reader = VcfReader::from_path(path)?;
    let summary = apply_records(genome, reader)?;

    info!(
        "Applied {} records from {} ({} bases written, {} indels skipped)",
        summary.records,
        path.display(),
        summary.bases_written(),
        summary.skipped_indels
    );
    Ok(summary)
}

/// Apply a stream of variant records to `genome`, mutating it in place.
///
/// `provenance` is recorded on the genome and the genome is marked as a
/// sample before any record is consumed.
///
/// # Errors
///
/// Stops at, and returns, the first error yielded by `records`.
pub fn apply_variants<I, E>(
    genome: &mut Genome,
    provenance: VariantProvenance,
    records: I,
) -> Result<ApplySummary, E>
where
    I: IntoIterator<Item = Result<VariantRecord, E>>,
{
    mark_sample(genome, provenance);
    apply_records(genome, records)
}

fn mark_sample(genome: &mut Genome, provenance: VariantProvenance) {
    genome.mark_as_sample();
    genome.metadata.name = Some(provenance.sample_name.clone());
    genome.metadata.provenance = Some(provenance);
}

fn apply_records<I, E>(genome: &mut Genome, records: I) -> Result<ApplySummary, E>
where
    I: IntoIterator<Item = Result<VariantRecord, E>>,
{
    let mut summary = ApplySummary::default();
    for record in records {
        apply_record(genome, &record?, &mut summary);
    }
    Ok(summary)
}

/// Apply one record's first-sample call.
///
/// Positions are used as literal indexes into the genome.
pub fn apply_record(genome: &mut Genome, record: &VariantRecord, summary: &mut ApplySummary) {
    summary.records += 1;
    let start = usize::try_from(record.position).unwrap_or(usize::MAX);

    match record.genotype {
        Genotype::HomozygousAlt { .. } => {
            let Some(alt) = record.chosen_alternate() else {
                summary.ignored_calls += 1;
                return;
            };

            if alt.len() != record.reference_bases.len() {
                debug!(
                    "Skipping indel at {}: {} -> {}",
                    record.position, record.reference_bases, alt
                );
                summary.skipped_indels += 1;
                return;
            }

            for (offset, symbol) in alt.bytes().enumerate() {
                let position = start.saturating_add(offset);
                if genome.set_base(position, symbol) {
                    summary.substituted_bases += 1;
                } else {
                    warn_out_of_bounds(genome, position, summary);
                }
            }
        }
        Genotype::Heterozygous => {
            if genome.set_base(start, AMBIGUOUS_CALL) {
                summary.heterozygous_sites += 1;
            } else {
                warn_out_of_bounds(genome, start, summary);
            }
        }
        Genotype::Missing => {
            if genome.set_base(start, NO_CALL) {
                summary.missing_sites += 1;
            } else {
                warn_out_of_bounds(genome, start, summary);
            }
        }
        Genotype::HomozygousReference | Genotype::PartialCall => {
            debug!(
                "Ignoring {:?} call at {}",
                record.genotype, record.position
            );
            summary.ignored_calls += 1;
        }
    }
}

fn warn_out_of_bounds(genome: &Genome, position: usize, summary: &mut ApplySummary) {
    warn!(
        "Variant position {} is outside the genome (length {}); skipped",
        position,
        genome.len()
    );
    summary.out_of_bounds += 1;
}
