use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{MatchingArgs, OutputFormat, QueryArgs};
use crate::core::types::SequenceContext;
use crate::index::lookup::SequenceLookup;
use crate::matching::context::{ContextConfig, DEFAULT_FLANK_LENGTH};
use crate::parsing;

#[derive(Args)]
pub struct ContextArgs {
    /// Reference sequences (FASTA, optionally gzip/bgzip compressed)
    #[arg(required = true)]
    pub fasta: PathBuf,

    #[command(flatten)]
    pub queries: QueryArgs,

    #[command(flatten)]
    pub matching: MatchingArgs,

    /// Residues reported before each hit
    #[arg(short = 'u', long, default_value_t = DEFAULT_FLANK_LENGTH)]
    pub upstream: usize,

    /// Residues reported after each hit
    #[arg(short = 'd', long, default_value_t = DEFAULT_FLANK_LENGTH)]
    pub downstream: usize,

    /// Report flanks as found instead of padding them with '-'
    #[arg(long)]
    pub no_pad: bool,
}

/// Execute context subcommand
///
/// # Errors
///
/// Returns an error if the FASTA cannot be loaded or any query cannot be searched.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ContextArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let queries = args.queries.collect()?;

    let sequences = parsing::fasta::parse_fasta_file(&args.fasta)?;
    if verbose {
        eprintln!(
            "Loaded {} sequences ({} residues)",
            sequences.len(),
            sequences.total_residues()
        );
    }

    let mut lookup = SequenceLookup::new(sequences, args.matching.index_config());
    lookup.index()?;

    let context_config = ContextConfig {
        upstream: args.upstream,
        downstream: args.downstream,
        pad: !args.no_pad,
    };
    let generator =
        lookup.context_generator(args.matching.matching_config(), context_config)?;

    // Keep the order queries were given in
    let mut results = Vec::with_capacity(queries.len());
    for query in &queries {
        let contexts = generator.sequence_contexts(query)?;
        results.push((String::from_utf8_lossy(query).into_owned(), contexts));
    }

    match format {
        OutputFormat::Text => print_text_results(&results),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[(String, Vec<SequenceContext>)]) {
    for (query, contexts) in results {
        println!("{query}");
        if contexts.is_empty() {
            println!("   No occurrences");
            continue;
        }
        for c in contexts {
            println!(
                "   {}\t{}\t{} [{query}] {}",
                c.sequence_id, c.offset, c.upstream, c.downstream
            );
        }
    }
}

fn print_json_results(results: &[(String, Vec<SequenceContext>)]) -> anyhow::Result<()> {
    let output: BTreeMap<&str, &Vec<SequenceContext>> = results
        .iter()
        .map(|(query, contexts)| (query.as_str(), contexts))
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[(String, Vec<SequenceContext>)]) {
    println!("query\tsequence_id\toffset\tupstream\tdownstream");
    for (query, contexts) in results {
        for c in contexts {
            println!(
                "{query}\t{}\t{}\t{}\t{}",
                c.sequence_id, c.offset, c.upstream, c.downstream
            );
        }
    }
}
