#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! Roster CLI - manage records through the cache-consistent service
//!
//! Usage:
//!   `roster list --all`
//!   `roster create --name Ana --score 5`
//!   `roster --config ./roster.toml demo --cache-size 2`

mod demo;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use roster_core::config::{LoggingConfig, DEFAULT_CONFIG_FILE};
use roster_core::{RecordDraft, RecordId, Roster, RosterConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::output::Format;

#[derive(Parser)]
#[command(name = "roster")]
#[command(
    author,
    version,
    about = "Roster CLI - records with a cache that follows the store"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records
    List {
        /// Include soft-deleted records
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Show one record by id
    Get {
        /// Record id
        id: RecordId,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// List records with an exact score
    ByScore {
        /// Score to match
        score: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Create a record
    Create {
        /// Record name
        #[arg(long)]
        name: String,

        /// Record score (must be > 0)
        #[arg(long, allow_negative_numbers = true)]
        score: f64,
    },

    /// Replace name and score of a record
    Update {
        /// Record id
        id: RecordId,

        /// New name
        #[arg(long)]
        name: String,

        /// New score (must be > 0)
        #[arg(long, allow_negative_numbers = true)]
        score: f64,
    },

    /// Soft-delete a record
    Delete {
        /// Record id
        id: RecordId,
    },

    /// Erase the store and insert the demo records
    Seed,

    /// Walk through cache behaviour on an in-memory store
    Demo {
        /// Cache capacity used for the walkthrough
        #[arg(long, default_value = "2")]
        cache_size: usize,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RosterConfig::load_from_path(&cli.config)?;
    config.validate()?;
    init_logging(&config.logging);

    match cli.command {
        Commands::List { all, format } => {
            let roster = open(&config)?;
            let records = if all {
                roster.service().store().find_all_including_deleted()?
            } else {
                roster.service().get_all()?
            };
            output::print_records(&records, format)?;
        }
        Commands::Get { id, format } => {
            let roster = open(&config)?;
            output::print_record(&roster.service().find_by_id(id)?, format)?;
        }
        Commands::ByScore { score, format } => {
            let roster = open(&config)?;
            output::print_records(&roster.service().get_by_score(score)?, format)?;
        }
        Commands::Create { name, score } => {
            let roster = open(&config)?;
            let record = roster.service().create(&RecordDraft::new(name, score))?;
            println!("{} record {}", "Created".green(), record.id);
        }
        Commands::Update { id, name, score } => {
            let roster = open(&config)?;
            let record = roster.service().update(id, &RecordDraft::new(name, score))?;
            println!("{} record {}", "Updated".green(), record.id);
        }
        Commands::Delete { id } => {
            let roster = open(&config)?;
            let record = roster.service().delete(id)?;
            println!("{} record {}", "Deleted".yellow(), record.id);
        }
        Commands::Seed => {
            let roster = open(&config)?;
            let seeded = roster.service().reseed()?;
            println!("{} {} demo records", "Seeded".green(), seeded.len());
        }
        Commands::Demo { cache_size } => {
            if cache_size == 0 {
                anyhow::bail!("--cache-size must be at least 1");
            }
            demo::run(&config, cache_size)?;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn open(config: &RosterConfig) -> anyhow::Result<Roster> {
    let roster = Roster::open(config)?;
    tracing::debug!(path = %config.database.path.display(), "Store opened");
    Ok(roster)
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let json = logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
