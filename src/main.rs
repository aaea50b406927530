//! Party Explorer - ideological positions of political parties over time
//!
//! CLI commands:
//! - serve: Start HTTP server
//! - countries: List countries in the dataset
//! - dimensions: List ideological dimensions
//! - explain: Show the question and coding scheme for a dimension
//! - classify: Classify a single score
//! - view: Build the view model for a country and dimension

mod classify;
mod config;
mod dataset;
mod dimension;
mod error;
mod logging;
mod palette;
mod server;
mod state;
mod view;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::classify::Tiering;
use crate::dimension::Dimension;
use crate::view::ScatterScope;

#[derive(Parser)]
#[command(name = "party_explorer")]
#[command(about = "Explore party ideology scores by country and dimension")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to explorer.yaml config
    #[arg(short, long, default_value = "explorer.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (defaults to $PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List countries present in the dataset
    Countries,

    /// List ideological dimensions
    Dimensions,

    /// Show the question and coding scheme for a dimension
    Explain {
        /// Dimension id, label or slug
        dimension: Dimension,
    },

    /// Classify one score on a dimension
    Classify {
        dimension: Dimension,
        score: f64,
        #[arg(long, value_enum)]
        tiering: Option<TieringArg>,
    },

    /// Build the view model for a selection and print it as JSON
    View {
        #[arg(long)]
        country: String,

        #[arg(long)]
        dimension: Dimension,

        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        #[arg(long, value_enum)]
        tiering: Option<TieringArg>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ScopeArg {
    AllYears,
    LatestYear,
}

impl From<ScopeArg> for ScatterScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::AllYears => ScatterScope::AllYears,
            ScopeArg::LatestYear => ScatterScope::LatestYear,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TieringArg {
    FourBucket,
    Published,
}

impl From<TieringArg> for Tiering {
    fn from(arg: TieringArg) -> Self {
        match arg {
            TieringArg::FourBucket => Tiering::FourBucket,
            TieringArg::Published => Tiering::Published,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let secrets = config::Secrets::load();

    // The logging section lives in the config file, so read it before logging starts
    let found = cli.config.exists();
    let config = if found {
        config::Config::load(&cli.config)
            .with_context(|| format!("Invalid config file {:?}", cli.config))?
    } else {
        config::Config::default()
    };
    let config = config.with_secrets(&secrets);

    logging::init_logging(&config.logging)?;
    tracing::info!("Party Explorer starting up");
    if found {
        tracing::info!("Loaded config from {:?}", cli.config);
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Serve { port } => {
            let state = state::AppState::load(config).context("Failed to load dataset")?;
            server::serve(state, port.unwrap_or(secrets.port)).await?;
        }

        Commands::Countries => {
            let state = state::AppState::load(config).context("Failed to load dataset")?;
            let countries = state.countries();
            println!("Countries ({}):", countries.len());
            for country in countries {
                println!("  - {}", country);
            }
        }

        Commands::Dimensions => list_dimensions(&config),

        Commands::Explain { dimension } => explain(dimension),

        Commands::Classify { dimension, score, tiering } => {
            let tiering = tiering.map(Tiering::from).unwrap_or(config.view.tiering);
            let label = classify::classify_with(tiering, dimension, score)?;
            println!("{} = {} -> {}", dimension.label(), score, label);
        }

        Commands::View { country, dimension, scope, tiering, output } => {
            let defaults = config.view;
            let options = config::ViewConfig {
                scatter_scope: scope.map(ScatterScope::from).unwrap_or(defaults.scatter_scope),
                tiering: tiering.map(Tiering::from).unwrap_or(defaults.tiering),
            };
            let state = state::AppState::load(config).context("Failed to load dataset")?;
            let view = state.view(&country, dimension, Some(options))?;
            if view.is_empty() {
                tracing::warn!("No data available for country '{}'", country);
            }

            let document = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "view": view,
            });
            let text = serde_json::to_string_pretty(&document)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    tracing::info!("View written to {:?}", path);
                }
                None => println!("{}", text),
            }
        }
    }

    Ok(())
}

/// List dimensions with the column each one reads from
fn list_dimensions(config: &config::Config) {
    println!("Dimensions ({}):", Dimension::ALL.len());
    println!();
    for dimension in Dimension::ALL {
        println!(
            "  - {} [{}] (column {})",
            dimension.label(),
            dimension.slug(),
            config.columns.dimension_column(dimension)
        );
    }
}

/// Print the explainer panel for a dimension
fn explain(dimension: Dimension) {
    println!("## {}", dimension.label());
    println!();
    println!("Question: {}", dimension.question());
    println!();
    println!("Coding:");
    for line in dimension.coding_lines() {
        println!("  {}", line);
    }
}
