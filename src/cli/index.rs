use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::index::kmer::{IndexConfig, KmerIndex, WindowMode, DEFAULT_KMER_SIZE};
use crate::index::store::{is_index_file, save_index};
use crate::parsing;

#[derive(Args)]
pub struct IndexArgs {
    /// Reference sequences (FASTA, optionally gzip/bgzip compressed)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Output index file (.kidx, or .kidx.gz for a compressed index)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// K-mer size
    #[arg(short = 'k', long = "kmer-size", default_value_t = DEFAULT_KMER_SIZE)]
    pub k: usize,

    /// Stop one window short of the end of each sequence, reproducing output
    /// of earlier versions
    #[arg(long)]
    pub legacy_windows: bool,
}

/// Execute index subcommand
///
/// # Errors
///
/// Returns an error if the FASTA cannot be loaded or the index cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IndexArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if !is_index_file(&args.output) {
        anyhow::bail!(
            "Output '{}' must end in .kidx or .kidx.gz so it can be recognized as an index",
            args.output.display()
        );
    }

    let sequences = parsing::fasta::parse_fasta_file(&args.fasta)?;
    if verbose {
        eprintln!(
            "Loaded {} sequences ({} residues)",
            sequences.len(),
            sequences.total_residues()
        );
    }

    let config = IndexConfig {
        k: args.k,
        window_mode: WindowMode::from_legacy(args.legacy_windows),
    };
    let index = KmerIndex::build(&sequences, config)?;
    save_index(&index, &args.output)?;

    match format {
        OutputFormat::Text => {
            println!("Wrote {}", args.output.display());
            println!("   k: {}", index.k());
            println!("   Sequences: {}", index.sequence_ids().len());
            println!("   Distinct k-mers: {}", index.len());
            println!("   Occurrences: {}", index.total_occurrences());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": args.output.display().to_string(),
                "k": index.k(),
                "window_mode": index.window_mode(),
                "sequences": index.sequence_ids().len(),
                "distinct_kmers": index.len(),
                "occurrences": index.total_occurrences(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("output\tk\tsequences\tdistinct_kmers\toccurrences");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                args.output.display(),
                index.k(),
                index.sequence_ids().len(),
                index.len(),
                index.total_occurrences()
            );
        }
    }

    Ok(())
}
