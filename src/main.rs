use caltrack_core::{FileStore, LookupClient, SharedTracker, Tracker};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, MealCommand, ScanCommand, WeekCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "caltrack")]
#[command(version)]
#[command(about = "A daily calorie logging CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, delete and list meals
    Meal(MealCommand),

    /// Look up products by barcode and log them
    Scan(ScanCommand),

    /// Show calorie totals of the last 7 logged days
    Week(WeekCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caltrack=warn,caltrack_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Meal(cmd)) => {
            let mut tracker = open_tracker(&config)?;
            cmd.run(&mut tracker)?;
        }
        Some(Commands::Scan(cmd)) => {
            let tracker = open_tracker(&config)?;
            let client =
                LookupClient::new(config.lookup_url.value.clone(), config.lookup_timeout())?;
            cmd.run(&SharedTracker::new(tracker), &client).await?;
        }
        Some(Commands::Week(cmd)) => {
            let tracker = open_tracker(&config)?;
            cmd.run(tracker.manager())?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Opens the calorie log in the configured data directory.
fn open_tracker(config: &Config) -> Result<Tracker<FileStore>, Box<dyn std::error::Error>> {
    let store = FileStore::new(config.data_dir.value.clone());
    Ok(Tracker::open(
        store,
        commands::today(),
        config.calorie_goal.value,
    )?)
}
