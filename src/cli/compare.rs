use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_any_genome, OutputFormat};
use crate::comparison::{compare, Difference};
use crate::core::Genome;

#[derive(Args)]
pub struct CompareArgs {
    /// First genome (GenBank, FASTA, or .bin array dump)
    #[arg(required = true)]
    pub input_a: PathBuf,

    /// Second genome (GenBank, FASTA, or .bin array dump)
    #[arg(required = true)]
    pub input_b: PathBuf,

    /// Number of differences to list (0 lists all of them)
    #[arg(short = 'n', long, default_value = "10")]
    pub max_differences: usize,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let genome_a = load_any_genome(&args.input_a)?;
    let genome_b = load_any_genome(&args.input_b)?;

    if verbose {
        eprint!("{}", genome_a.describe());
        eprint!("{}", genome_b.describe());
    }

    let differences = compare(&genome_a, &genome_b);
    let shown = if args.max_differences == 0 {
        &differences[..]
    } else {
        &differences[..differences.len().min(args.max_differences)]
    };

    match format {
        OutputFormat::Text => print_text_comparison(&args, &genome_a, &genome_b, &differences, shown),
        OutputFormat::Json => print_json_comparison(&args, &differences, shown)?,
        OutputFormat::Tsv => print_tsv_comparison(shown),
    }

    Ok(())
}

fn print_text_comparison(
    args: &CompareArgs,
    genome_a: &Genome,
    genome_b: &Genome,
    differences: &[Difference],
    shown: &[Difference],
) {
    println!("Comparison Results");
    println!("{}", "=".repeat(60));

    println!("\nInput A: {}", args.input_a.display());
    println!("  Length: {}", genome_a.len());
    println!("  Reference: {}", genome_a.is_reference());

    println!("\nInput B: {}", args.input_b.display());
    println!("  Length: {}", genome_b.len());
    println!("  Reference: {}", genome_b.is_reference());

    println!("\nDifferences: {}", differences.len());
    for difference in shown {
        println!(
            "  {}\t{}\t{}",
            difference.position, difference.left, difference.right
        );
    }
    if shown.len() < differences.len() {
        println!("  ... {} more", differences.len() - shown.len());
    }
}

fn print_json_comparison(
    args: &CompareArgs,
    differences: &[Difference],
    shown: &[Difference],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input_a": args.input_a.display().to_string(),
        "input_b": args.input_b.display().to_string(),
        "distance": differences.len(),
        "differences": shown,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(shown: &[Difference]) {
    println!("position\tleft\tright");
    for difference in shown {
        println!(
            "{}\t{}\t{}",
            difference.position, difference.left, difference.right
        );
    }
}
