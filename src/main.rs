use clap::Parser;
use tracing_subscriber::EnvFilter;

use kmer_lookup::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("kmer_lookup=debug,info")
    } else {
        EnvFilter::new("kmer_lookup=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Find(args) => {
            cli::find::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Context(args) => {
            cli::context::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Index(args) => {
            cli::index::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
