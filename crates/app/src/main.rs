//! `drill`: Italian vocabulary and conjugation drills in the terminal.

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod options;

use options::{DrillArgs, StoreArgs};

#[derive(Parser)]
#[command(name = "drill", version, about = "Italian vocabulary and conjugation drills")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive drill session
    Play {
        #[command(flatten)]
        store: StoreArgs,

        #[command(flatten)]
        drill: DrillArgs,

        /// Print one JSON snapshot per transition instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the questions a session would ask, without running it
    Preview {
        #[command(flatten)]
        store: StoreArgs,

        #[command(flatten)]
        drill: DrillArgs,

        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Import a lexicon file into the database
    Seed {
        /// Lexicon JSON file to import
        #[arg(long, env = "DRILL_LEXICON")]
        lexicon: std::path::PathBuf,

        /// SQLite database URL
        #[arg(long = "db", env = "DRILL_DB_URL", default_value = options::DEFAULT_DB_URL)]
        db_url: String,

        /// Keep existing entries instead of clearing first
        #[arg(long)]
        keep: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drill=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { store, drill, json } => commands::play::execute(store, drill, json).await,
        Commands::Preview { store, drill, json } => {
            commands::preview::execute(store, drill, json).await
        }
        Commands::Seed {
            lexicon,
            db_url,
            keep,
        } => commands::seed::execute(lexicon, db_url, keep).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
