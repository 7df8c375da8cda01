//! tread-catalog - Tire and wheel catalog browser
//!
//! Filters, sorts and pages storefront listings from the command line.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tread_catalog::catalog::{BrowseState, Facet, ProductKind, SortKey};
use tread_catalog::commands::{BrowseCommand, FacetsCommand, GarageCommand};
use tread_catalog::config::{Config, OutputFormat};
use tread_catalog::garage::SavedVehicle;

#[derive(Parser)]
#[command(
    name = "tread-catalog",
    version,
    about = "Browse tire and wheel listings",
    long_about = "Search, filter, sort and page tire and wheel listings from a storefront API or local JSON exports."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storefront API base URL
    #[arg(long, global = true, env = "TREAD_API_URL")]
    api_url: Option<String>,

    /// Directory with tires.json / wheels.json exports
    #[arg(long, global = true, env = "TREAD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page of filtered listings
    #[command(alias = "b")]
    Browse(BrowseArgs),

    /// List the options available for each filter
    #[command(alias = "f")]
    Facets {
        /// Product kind (tires or wheels)
        kind: ProductKind,

        /// Only this facet (e.g., brand, year, driving-type)
        #[arg(long)]
        facet: Option<Facet>,
    },

    /// Manage saved vehicles
    #[command(alias = "g")]
    Garage {
        #[command(subcommand)]
        action: GarageAction,
    },
}

#[derive(Args)]
struct BrowseArgs {
    /// Product kind (tires or wheels)
    kind: ProductKind,

    /// Case-insensitive text matched against name and description
    #[arg(short, long)]
    search: Option<String>,

    /// Brands (comma-separated)
    #[arg(long, value_delimiter = ',')]
    brand: Vec<String>,

    /// Vehicle makes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    make: Vec<String>,

    /// Vehicle models (comma-separated)
    #[arg(long, value_delimiter = ',')]
    model: Vec<String>,

    /// Trims (comma-separated)
    #[arg(long, value_delimiter = ',')]
    trim: Vec<String>,

    /// Categories (comma-separated)
    #[arg(long, value_delimiter = ',')]
    category: Vec<String>,

    /// Driving types (comma-separated)
    #[arg(long, value_delimiter = ',')]
    driving_type: Vec<String>,

    /// Years (comma-separated)
    #[arg(long, value_delimiter = ',')]
    year: Vec<String>,

    /// Widths (comma-separated)
    #[arg(long, value_delimiter = ',')]
    width: Vec<String>,

    /// Aspect ratios (comma-separated)
    #[arg(long, value_delimiter = ',')]
    ratio: Vec<String>,

    /// Rim diameters (comma-separated)
    #[arg(long, value_delimiter = ',')]
    diameter: Vec<String>,

    /// Sort order (featured, price-low, price-high, newest)
    #[arg(long)]
    sort: Option<SortKey>,

    /// Page number (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Records per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Do not narrow results to saved vehicles
    #[arg(long)]
    ignore_garage: bool,
}

impl BrowseArgs {
    fn state(&self, config: &Config) -> BrowseState {
        let selections = [
            (Facet::Brand, &self.brand),
            (Facet::Make, &self.make),
            (Facet::Model, &self.model),
            (Facet::Trim, &self.trim),
            (Facet::Category, &self.category),
            (Facet::DrivingType, &self.driving_type),
            (Facet::Year, &self.year),
            (Facet::Width, &self.width),
            (Facet::Ratio, &self.ratio),
            (Facet::Diameter, &self.diameter),
        ];

        let mut state = BrowseState::new().with_search(self.search.clone().unwrap_or_default());
        for (facet, values) in selections {
            state = state.with_selection(facet, values.iter().map(|v| v.trim()));
        }

        state
            .with_sort(self.sort.unwrap_or(config.sort))
            .with_page_size(self.page_size.unwrap_or(config.page_size))
            .with_page(self.page)
    }
}

#[derive(Subcommand)]
enum GarageAction {
    /// Show saved vehicles
    #[command(alias = "ls")]
    List,

    /// Save a vehicle
    Add {
        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        trim: Option<String>,
    },

    /// Remove the vehicle at a position shown by `garage list`
    #[command(alias = "rm")]
    Remove { index: usize },

    /// Remove all saved vehicles
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let output = match cli.command {
        Commands::Browse(args) => {
            let state = args.state(&config);
            let cmd = BrowseCommand::new(config, state).use_garage(!args.ignore_garage);
            cmd.execute(args.kind).await?
        }

        Commands::Facets { kind, facet } => FacetsCommand::new(config).execute(kind, facet).await?,

        Commands::Garage { action } => {
            let mut cmd = GarageCommand::open(&config)?;
            match action {
                GarageAction::List => cmd.list(),
                GarageAction::Add { make, model, year, trim } => {
                    cmd.add(SavedVehicle { make, model, year, trim })?
                }
                GarageAction::Remove { index } => cmd.remove(index)?,
                GarageAction::Clear => cmd.clear()?,
            }
        }
    };

    println!("{}", output);
    Ok(())
}
