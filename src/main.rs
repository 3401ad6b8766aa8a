mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use commands::{browse, search, stats};
use std::path::PathBuf;
use vendorsearch::browse::filter::parse_selection;
use vendorsearch::browse::FacetDimension;
use vendorsearch::core::config::{default_config_path, load_config_from};
use vendorsearch::search::ScorePolicy;

#[derive(Parser)]
#[command(name = "vendorsearch")]
#[command(about = "Vendor search client - scored search results and faceted catalog browsing", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search vendors through the backend
    Search {
        /// Search query
        query: String,

        /// Number of results to request
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Ask the backend for diversity re-ranking
        #[arg(long, default_value_t = false)]
        mmr: bool,

        /// How raw scores become percentages
        #[arg(long, value_enum)]
        policy: Option<ScorePolicy>,

        /// Hide results below this percentage
        #[arg(long)]
        min_pct: Option<f64>,

        /// Output as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Browse the vendor catalog with facets and filters
    Browse {
        /// Vendor catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Case-insensitive name filter
        #[arg(short, long)]
        text: Option<String>,

        /// Narrow to one facet value, e.g. type=SaaS
        #[arg(long, value_parser = parse_selection)]
        drill: Option<(FacetDimension, String)>,

        /// Multi-select facet value, repeatable, e.g. status=poc
        #[arg(short, long, value_parser = parse_selection)]
        select: Vec<(FacetDimension, String)>,

        /// Output as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Catalog statistics and metadata completeness
    Stats {
        /// Vendor catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Number of top categories to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Output as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {:#}", "[ERROR]".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let load = || load_config_from(&config_path);

    match cli.command {
        Commands::Search {
            query,
            top_k,
            mmr,
            policy,
            min_pct,
            json,
        } => {
            let args = search::SearchArgs {
                query,
                top_k,
                mmr,
                policy,
                min_pct,
                json,
            };
            search::run(&load()?, args).await?;
        }
        Commands::Browse {
            catalog,
            text,
            drill,
            select,
            json,
        } => {
            let args = browse::BrowseArgs {
                catalog,
                text,
                drill,
                select,
                json,
            };
            browse::run(&load()?, args)?;
        }
        Commands::Stats { catalog, top, json } => {
            stats::run(&load()?, catalog, top, json)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let c = load()?;
                println!("{:#?}", c);
            }
            ConfigAction::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}
