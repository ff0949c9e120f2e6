use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{MatchingArgs, OutputFormat, QueryArgs};
use crate::core::types::MatchResult;
use crate::index::kmer::{KmerIndex, WindowMode};
use crate::index::store::{is_index_file, load_index};
use crate::matching::engine::SubsequenceMatcher;
use crate::parsing;

#[derive(Args)]
pub struct FindArgs {
    /// Reference sequences: a FASTA file or an index saved by `index`
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub queries: QueryArgs,

    #[command(flatten)]
    pub matching: MatchingArgs,
}

/// Execute find subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or any query cannot be searched.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FindArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let queries = args.queries.collect()?;
    let index = load_or_build_index(&args.input, &args.matching, verbose)?;

    let matcher = SubsequenceMatcher::with_config(&index, args.matching.matching_config());
    let results = queries
        .iter()
        .map(|query| {
            let result = matcher.find(query)?;
            Ok((String::from_utf8_lossy(query).into_owned(), result))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if verbose {
        let found = results.iter().filter(|(_, r)| !r.is_empty()).count();
        eprintln!("{found} of {} queries found", results.len());
    }

    match format {
        OutputFormat::Text => print_text_results(&results),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

/// Load a saved index, or build one from a FASTA file
fn load_or_build_index(
    input: &Path,
    matching: &MatchingArgs,
    verbose: bool,
) -> anyhow::Result<KmerIndex> {
    if is_index_file(input) {
        let index = load_index(input)?;

        if let Some(k) = matching.k {
            if k != index.k() {
                anyhow::bail!(
                    "k-mer size {k} does not match the saved index (built with k = {})",
                    index.k()
                );
            }
        }
        let requested = WindowMode::from_legacy(matching.legacy_windows);
        if requested != index.window_mode() {
            if matching.legacy_windows {
                anyhow::bail!("--legacy-windows given but the saved index was built without it");
            }
            anyhow::bail!(
                "The saved index was built with --legacy-windows; pass it to search this index"
            );
        }

        if verbose {
            eprintln!(
                "Loaded index with k = {} and {} distinct k-mers over {} sequences",
                index.k(),
                index.len(),
                index.sequence_ids().len()
            );
        }
        return Ok(index);
    }

    let sequences = parsing::fasta::parse_fasta_file(input)?;
    if verbose {
        eprintln!(
            "Loaded {} sequences ({} residues)",
            sequences.len(),
            sequences.total_residues()
        );
    }

    Ok(KmerIndex::build(&sequences, matching.index_config())?)
}

fn print_text_results(results: &[(String, MatchResult)]) {
    for (query, result) in results {
        println!("{query}");
        if result.is_empty() {
            println!("   No occurrences");
            continue;
        }
        for (id, offset) in result.iter() {
            println!("   {id}\t{offset}");
        }
    }
}

fn print_json_results(results: &[(String, MatchResult)]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|(query, result)| {
            serde_json::json!({
                "query": query,
                "total": result.total(),
                "hits": result.as_map(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[(String, MatchResult)]) {
    println!("query\tsequence_id\toffset");
    for (query, result) in results {
        for (id, offset) in result.iter() {
            println!("{query}\t{id}\t{offset}");
        }
    }
}
