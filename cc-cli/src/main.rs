//! CandyChipaws CLI - Front desk for the pet-care booking ledger.
//!
//! Takes bookings, runs the walk-in waitlist, records contact messages,
//! manages the gallery and gives the owner stats and a JSON export, all
//! against a local SQLite store.

mod commands;

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use cc_core::config::{AppConfig, ConfigHandle};
use cc_core::error::CcResult;
use cc_core::logging;

/// CandyChipaws - bookings and walk-in queue for a pet-care business.
#[derive(Parser)]
#[command(
    name = "candychipaws",
    version,
    about = "CandyChipaws booking and queue ledger",
    long_about = "A command-line front desk for CandyChipaws.\n\
                   Record grooming bookings, manage the walk-in queue, read contact \
                   messages and export everything as JSON."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Book an appointment.
    Book(commands::book::BookArgs),
    /// Join, list and manage the walk-in queue.
    Queue {
        #[command(subcommand)]
        action: commands::queue::QueueAction,
    },
    /// Send a message through the contact form.
    Contact(commands::contact::ContactArgs),
    /// List bookings and change their status.
    Bookings {
        #[command(subcommand)]
        action: commands::bookings::BookingsAction,
    },
    /// Read contact messages.
    Messages {
        #[command(subcommand)]
        action: commands::messages::MessagesAction,
    },
    /// Show business statistics and recent activity.
    Stats,
    /// Export all bookings, queue entries and messages as JSON.
    Export {
        /// File to write (defaults to candychipaws_data_<date>.json in the current directory).
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Manage gallery images.
    Gallery {
        #[command(subcommand)]
        action: commands::gallery::GalleryAction,
    },
    /// Store management commands.
    Db {
        #[command(subcommand)]
        action: commands::db::DbAction,
    },
}

#[tokio::main]
async fn main() -> CcResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    // Initialize logging
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("logs"));
    let _guard = logging::init_logging(&config.logging, &log_dir, cli.verbose)?;

    let config_handle = ConfigHandle::new(config);

    info!("CandyChipaws CLI v{}", cc_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Book(args) => commands::book::run(config_handle, args, cli.format).await,
        Commands::Queue { action } => {
            commands::queue::run(config_handle, action, cli.format).await
        }
        Commands::Contact(args) => commands::contact::run(config_handle, args, cli.format).await,
        Commands::Bookings { action } => {
            commands::bookings::run(config_handle, action, cli.format).await
        }
        Commands::Messages { action } => {
            commands::messages::run(config_handle, action, cli.format).await
        }
        Commands::Stats => commands::stats::run(config_handle, cli.format).await,
        Commands::Export { output } => {
            commands::export::run(config_handle, output, cli.format).await
        }
        Commands::Gallery { action } => {
            commands::gallery::run(config_handle, action, cli.format).await
        }
        Commands::Db { action } => commands::db::run(config_handle, action, cli.format).await,
    }
}
