//! Store management commands.

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use cc_core::config::ConfigHandle;
use cc_core::constants::keys;
use cc_core::error::{CcError, CcResult};
use cc_models::DurableStore;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DbAction {
    /// Show store statistics.
    Stats,
    /// Run an integrity check and verify every stored collection parses.
    Check,
    /// Reset the store (WARNING: destroys all data).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(config: ConfigHandle, action: DbAction, format: OutputFormat) -> CcResult<()> {
    let db_path = config.read().await.effective_store_path()?;
    let db = super::init_database(&config).await?;

    match action {
        DbAction::Stats => {
            let stats = db.stats()?;
            let file_size = std::fs::metadata(&db_path).ok().map(|m| m.len());
            let wal_size = std::fs::metadata(db_path.with_extension("db-wal")).ok().map(|m| m.len());

            let conn = db.conn()?;
            let journal_mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({
                        "path": db_path.display().to_string(),
                        "keys": stats.keys,
                        "value_bytes": stats.bytes,
                        "schema_version": stats.schema_version,
                        "file_size_bytes": file_size,
                        "wal_size_bytes": wal_size,
                        "journal_mode": journal_mode,
                    }));
                }
                OutputFormat::Text => {
                    println!("{}", style("Store Statistics").bold().underlined());
                    println!("  Path:          {}", db_path.display());
                    println!("  Journal mode:  {}", journal_mode);
                    println!("  Schema:        v{}", stats.schema_version);
                    println!();

                    let mut table = super::new_table();
                    table.set_header(vec!["Key", "Size"]);
                    for key in db.keys()? {
                        let size = db.get(&key)?.map_or(0, |v| v.len());
                        table.add_row(vec![key, super::format_bytes(size as u64)]);
                    }
                    println!("{table}");

                    println!();
                    if let Some(size) = file_size {
                        println!("  Database:      {}", super::format_bytes(size));
                    }
                    if let Some(size) = wal_size {
                        println!("  WAL file:      {}", super::format_bytes(size));
                    }
                }
            }
        }
        DbAction::Check => {
            let mut failures = 0;
            match db.run_integrity_check() {
                Ok(()) => println!("  {} Integrity check passed.", style("OK").green().bold()),
                Err(e) => {
                    failures += 1;
                    println!("  {} Integrity check failed: {e}", style("FAIL").red().bold());
                }
            }

            for key in keys::ALL {
                match db.get(key)? {
                    None => println!("  {} {key}: not stored yet", style("--").dim()),
                    Some(raw) => match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                        Ok(items) => {
                            println!("  {} {key}: {} record(s)", style("OK").green().bold(), items.len())
                        }
                        Err(e) => {
                            failures += 1;
                            println!("  {} {key}: unreadable ({e})", style("FAIL").red().bold());
                        }
                    },
                }
            }

            if failures > 0 {
                return Err(CcError::IntegrityCheck(format!("{failures} problem(s) found")));
            }
        }
        DbAction::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Erase every booking, queue entry and message in {}?", db_path.display()))
                    .default(false)
                    .interact()
                    .map_err(|e| CcError::Internal(format!("prompt failed: {e}")))?;

            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }
            db.reset()?;
            println!("  {} Store reset.", style("OK").green().bold());
        }
    }
    Ok(())
}
