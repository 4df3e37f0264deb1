//! Command-line access to county boundaries and labels.
//!
//! Resolves a county's water-system boundaries to GeoJSON, formats county
//! labels, and stages the bundled topology files for serving.

mod stage;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cwsbounds::config::Config;
use cwsbounds::naming::county_label;
use cwsbounds::BoundaryResolver;

#[derive(Parser, Debug)]
#[command(name = "cwsbounds")]
#[command(about = "County water-system boundaries and AP style county names")]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override source.base_url (takes precedence over CWS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the boundary FeatureCollection for a county, or null
    Resolve {
        /// 5-digit county FIPS GEOID
        geoid: String,

        /// County name, for the label
        #[arg(long)]
        name: Option<String>,

        /// 2-letter state postal code, for the label
        #[arg(long)]
        state: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print an AP style county label
    Label {
        geoid: String,
        name: String,
        state: Option<String>,
    },

    /// Copy bundled topology files into the public directory
    Stage {
        #[arg(long)]
        from: Option<PathBuf>,

        #[arg(long)]
        to: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays machine-readable)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    }
    .with_env_overrides()?
    .with_base_url(args.base_url.clone())?;

    match args.command {
        Command::Resolve {
            geoid,
            name,
            state,
            pretty,
        } => {
            if let Some(name) = name {
                let label = county_label(&geoid, &name, state.as_deref().unwrap_or(""));
                info!("Resolving boundaries for {} ({})", label, geoid);
            }

            let resolver = BoundaryResolver::from_config(config.source)?;
            match resolver.resolve(&geoid).await {
                Some(collection) => {
                    info!("Found {} boundary features", collection.len());
                    let json = if pretty {
                        serde_json::to_string_pretty(&collection)?
                    } else {
                        serde_json::to_string(&collection)?
                    };
                    println!("{}", json);
                }
                None => {
                    info!("No boundaries available for {}", geoid);
                    println!("null");
                }
            }
        }
        Command::Label { geoid, name, state } => {
            println!(
                "{}",
                county_label(&geoid, &name, state.as_deref().unwrap_or(""))
            );
        }
        Command::Stage { from, to } => {
            let from = from.unwrap_or(config.stage.from);
            let to = to.unwrap_or(config.stage.to);
            stage::stage(&from, &to)?;
        }
    }

    Ok(())
}
