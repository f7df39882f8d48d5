use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use degrees_cli::{load_directory, report, LoadOptions, PromptResolver};
use degrees_core::{SearchConfig, SearchEngine};
use tracing_subscriber::EnvFilter;

/// Find the degrees of separation between two people via shared movies.
#[derive(Parser, Debug)]
#[command(name = "degrees", version)]
struct Cli {
    /// Directory holding people.csv, movies.csv and stars.csv
    #[arg(default_value = "large")]
    directory: PathBuf,

    /// Name of the first person (prompted for when omitted)
    #[arg(long)]
    source: Option<String>,

    /// Name of the second person (prompted for when omitted)
    #[arg(long)]
    target: Option<String>,

    /// Stop searching beyond this many degrees
    #[arg(long)]
    max_depth: Option<u32>,

    /// Refuse to load data sets larger than this (approximate MB)
    #[arg(long)]
    max_memory_mb: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    eprintln!("Loading data...");
    let options = LoadOptions {
        max_memory_mb: cli.max_memory_mb,
    };
    let (graph, _stats) = load_directory(&cli.directory, &options)
        .with_context(|| format!("loading data from {}", cli.directory.display()))?;
    eprintln!("Data loaded.");

    let stdin = io::stdin();
    let mut resolver = PromptResolver::new(&graph, stdin.lock(), io::stderr());

    let source = resolve_person(&mut resolver, cli.source.as_deref())?;
    let target = resolve_person(&mut resolver, cli.target.as_deref())?;

    let config = SearchConfig {
        max_depth: cli.max_depth,
    };
    let path = SearchEngine::with_config(&graph, config).shortest_path(&source, &target)?;

    let mut out = BufWriter::new(io::stdout().lock());
    if cli.json {
        report::write_json(&mut out, &graph, &source, &target, path.as_ref())?;
    } else {
        report::write_text(&mut out, &graph, &source, path.as_ref())?;
    }
    out.flush()?;
    Ok(())
}

fn resolve_person<R, W>(
    resolver: &mut PromptResolver<'_, R, W>,
    given: Option<&str>,
) -> Result<String>
where
    R: io::BufRead,
    W: Write,
{
    let name = match given {
        Some(name) => name.to_string(),
        None => match resolver.ask("Name: ").context("reading name")? {
            Some(name) => name,
            None => bail!("Person not found."),
        },
    };
    match resolver
        .try_resolve(&name)
        .with_context(|| format!("choosing between people named '{name}'"))?
    {
        Some(id) => Ok(id),
        None => bail!("Person not found."),
    }
}
