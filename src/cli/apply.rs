use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{OutputFormat, ARRAY_EXTENSION};
use crate::core::Genome;
use crate::mutation::{apply_vcf_file, ApplySummary};
use crate::output::{save_array, write_fasta, FastaWriteOptions};
use crate::parsing::load_genome;
use crate::utils::validation::{Compression, DEFAULT_CHARS_PER_LINE, DEFAULT_COMPRESSION_LEVEL};

/// Reference used when neither --genbank-file nor --fasta-file is given
pub const DEFAULT_GENBANK_FILE: &str = "H37Rv.gbk";

#[derive(Args)]
pub struct ApplyArgs {
    /// The path to a single VCF file (.vcf, .vcf.gz or .vcf.bz2)
    #[arg(long, required = true)]
    pub vcf_file: PathBuf,

    /// GenBank file of the reference genome [default: H37Rv.gbk]
    #[arg(long)]
    pub genbank_file: Option<PathBuf>,

    /// FASTA file of the reference genome, instead of a GenBank file
    #[arg(long, conflicts_with = "genbank_file")]
    pub fasta_file: Option<PathBuf>,

    /// Number of sequence characters per output line
    #[arg(long, default_value_t = DEFAULT_CHARS_PER_LINE)]
    pub chars_per_line: usize,

    /// Write the whole sequence on one line
    #[arg(long, conflicts_with = "chars_per_line")]
    pub single_line: bool,

    /// Write the sequence in lowercase
    #[arg(long)]
    pub lowercase: bool,

    /// Compression of the output FASTA file
    #[arg(long, value_enum, default_value = "gzip")]
    pub compression: Compression,

    /// Compression level (1-9)
    #[arg(long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    pub compression_level: u32,

    /// Also write a raw array dump of the genome next to the FASTA file
    #[arg(long)]
    pub save_array: bool,
}

impl ApplyArgs {
    fn write_options(&self) -> FastaWriteOptions {
        let chars_per_line = if self.single_line {
            None
        } else {
            Some(self.chars_per_line)
        };

        FastaWriteOptions::default()
            .with_compression(self.compression, self.compression_level)
            .with_chars_per_line(chars_per_line)
            .with_uppercase(!self.lowercase)
    }

    fn reference_sources(&self) -> (Option<&Path>, Option<&Path>) {
        match (&self.genbank_file, &self.fasta_file) {
            (None, None) => (Some(Path::new(DEFAULT_GENBANK_FILE)), None),
            (genbank, fasta) => (genbank.as_deref(), fasta.as_deref()),
        }
    }
}

/// Output path for a sample: `<vcf folder>/<sample name>.<extension>`
fn sample_output_path(sample: &Genome, vcf_file: &Path, extension: &str) -> PathBuf {
    let (folder, name) = match &sample.metadata.provenance {
        Some(provenance) => (provenance.folder.clone(), provenance.sample_name.clone()),
        None => (
            vcf_file.parent().map(Path::to_path_buf).unwrap_or_default(),
            "sample".to_string(),
        ),
    };
    folder.join(format!("{name}.{extension}"))
}

pub fn run(args: ApplyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = args.write_options();
    options.validate()?;

    let (genbank_file, fasta_file) = args.reference_sources();
    let reference = load_genome(genbank_file, fasta_file).context("Failed to load reference")?;

    if verbose {
        eprint!("{}", reference.describe());
    }

    let mut sample = reference.clone();
    let summary = apply_vcf_file(&mut sample, &args.vcf_file)
        .with_context(|| format!("Failed to apply {}", args.vcf_file.display()))?;

    let fasta_path = write_fasta(
        &sample,
        &sample_output_path(&sample, &args.vcf_file, "fasta"),
        &options,
    )?;

    let array_path = if args.save_array {
        let path = sample_output_path(&sample, &args.vcf_file, ARRAY_EXTENSION);
        save_array(&sample, &path)?;
        Some(path)
    } else {
        None
    };

    match format {
        OutputFormat::Text => print_text_summary(&sample, &summary, &fasta_path, array_path.as_deref()),
        OutputFormat::Json => print_json_summary(&sample, &summary, &fasta_path, array_path.as_deref())?,
        OutputFormat::Tsv => print_tsv_summary(&sample, &summary, &fasta_path),
    }

    Ok(())
}

fn print_text_summary(
    sample: &Genome,
    summary: &ApplySummary,
    fasta_path: &Path,
    array_path: Option<&Path>,
) {
    print!("{}", sample.describe());
    println!("Records: {}", summary.records);
    println!("  Substituted bases: {}", summary.substituted_bases);
    println!("  Heterozygous sites: {}", summary.heterozygous_sites);
    println!("  Missing sites: {}", summary.missing_sites);
    println!("  Skipped indels: {}", summary.skipped_indels);
    println!("  Ignored calls: {}", summary.ignored_calls);
    println!("  Out of bounds: {}", summary.out_of_bounds);
    println!("Output: {}", fasta_path.display());
    if let Some(path) = array_path {
        println!("Array: {}", path.display());
    }
}

fn print_json_summary(
    sample: &Genome,
    summary: &ApplySummary,
    fasta_path: &Path,
    array_path: Option<&Path>,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "sample": sample.metadata.name,
        "length": sample.len(),
        "output": fasta_path.display().to_string(),
        "array": array_path.map(|p| p.display().to_string()),
        "summary": {
            "records": summary.records,
            "substituted_bases": summary.substituted_bases,
            "heterozygous_sites": summary.heterozygous_sites,
            "missing_sites": summary.missing_sites,
            "skipped_indels": summary.skipped_indels,
            "ignored_calls": summary.ignored_calls,
            "out_of_bounds": summary.out_of_bounds,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(sample: &Genome, summary: &ApplySummary, fasta_path: &Path) {
    println!(
        "sample\tlength\trecords\tsubstituted\theterozygous\tmissing\tskipped_indels\tignored\tout_of_bounds\toutput"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        sample.metadata.name.as_deref().unwrap_or(""),
        sample.len(),
        summary.records,
        summary.substituted_bases,
        summary.heterozygous_sites,
        summary.missing_sites,
        summary.skipped_indels,
        summary.ignored_calls,
        summary.out_of_bounds,
        fasta_path.display(),
    );
}
