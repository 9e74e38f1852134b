use clap::{Args, Parser, Subcommand};
use facet_catalog::{
    Catalog, DimensionValue, EngineConfig, FacetError, ScanStrategy, SearchEngine, SearchOptions,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "facet-catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a catalog and print matches with color and size facet counts as JSON
    Search(SearchArgs),
    /// Print a random catalog as JSON
    Generate {
        #[arg(long, default_value_t = 1000)]
        count: usize,
        #[arg(long, env = "FACET_CATALOG_SEED", default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// JSON catalog file (array of {id?, name, color, size})
    #[arg(long, env = "FACET_CATALOG_FILE", conflicts_with = "random")]
    catalog: Option<PathBuf>,

    /// Search a random catalog of this many shirts instead of a file
    #[arg(long)]
    random: Option<usize>,

    #[arg(long, env = "FACET_CATALOG_SEED", default_value_t = 0)]
    seed: u64,

    /// Accepted color; repeat for several. None means any color.
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    /// Accepted size; repeat for several. None means any size.
    #[arg(long = "size", value_name = "SIZE")]
    sizes: Vec<String>,

    /// linear or postings (defaults to FACET_CATALOG_STRATEGY, then linear)
    #[arg(long)]
    strategy: Option<String>,

    /// Print only the facet counts and the number of matches
    #[arg(long)]
    counts_only: bool,
}

fn main() {
    let cli = Cli::parse();

    // stdout carries JSON output; logs go to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let output = match command {
        Command::Search(args) => run_search(&args)?,
        Command::Generate { count, seed } => Catalog::random(count, seed).to_json(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_search(args: &SearchArgs) -> Result<serde_json::Value, FacetError> {
    let catalog = match (&args.catalog, args.random) {
        (Some(path), _) => Catalog::load(path)?,
        (None, Some(count)) => Catalog::random(count, args.seed),
        (None, None) => {
            return Err(FacetError::InvalidArgument(
                "either --catalog or --random is required".to_string(),
            ))
        }
    };

    let config = match &args.strategy {
        Some(raw) => EngineConfig::from_env().with_strategy(raw.parse::<ScanStrategy>()?),
        None => EngineConfig::from_env(),
    };

    let options = SearchOptions::new(parse_values(&args.colors)?, parse_values(&args.sizes)?);
    tracing::info!(
        items = catalog.len(),
        strategy = %config.strategy,
        "Searching catalog"
    );
    let results = SearchEngine::with_config(catalog, config).search(&options)?;

    if args.counts_only {
        return Ok(serde_json::json!({
            "matches": results.shirts.len(),
            "color_counts": results.color_counts,
            "size_counts": results.size_counts,
        }));
    }
    Ok(serde_json::to_value(&results)?)
}

fn parse_values<V: DimensionValue>(raw: &[String]) -> Result<Vec<V>, FacetError> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            V::from_name(name).ok_or_else(|| FacetError::UnknownValue {
                dimension: V::DIMENSION.to_string(),
                value: name.trim().to_string(),
            })
        })
        .collect()
}
