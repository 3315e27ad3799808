use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use amc_catalog::config::Config;
use amc_catalog::logging;
use amc_catalog::Catalog;

#[derive(Parser)]
#[command(name = "amc")]
#[command(about = "Inspect an Ant Movie Catalog XML file")]
#[command(version = "0.1.0")]
struct Cli {
    /// Catalog file (defaults to the configured path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = amc_catalog::constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog metadata and movie count
    Info,
    /// One movie by its Number
    Movie { id: String },
    /// Every movie
    List {
        /// Only Number, FormattedTitle and OriginalTitle
        #[arg(long)]
        lite: bool,
    },
    /// Number of movies
    Count,
    /// Metadata plus every movie as one object
    Dump,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)?;
    logging::init_logging(&config.logging);

    let path = cli
        .catalog
        .or(config.catalog.path)
        .context("no catalog given: pass --catalog or set [catalog] path")?;

    let catalog = match Catalog::open_file(path.clone()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Could not load catalog: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Info => print_json(&catalog.catalog_info())?,
        Commands::Movie { id } => match catalog.movie_by_id(&id) {
            Some(movie) => print_json(&movie)?,
            None => print_json(&serde_json::json!({}))?,
        },
        Commands::List { lite: true } => print_json(&catalog.movies_lite())?,
        Commands::List { lite: false } => print_json(&catalog.all_movies())?,
        Commands::Count => println!("{}", catalog.count()),
        Commands::Dump => print_json(&catalog.catalog_object())?,
    }
    Ok(())
}
