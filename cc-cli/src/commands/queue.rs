//! Walk-in queue commands - join, list, and update entries.

use clap::Subcommand;
use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use cc_models::{QueueRequest, QueueStatus};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum QueueAction {
    /// Add a customer to the queue.
    Join {
        /// Customer name.
        #[arg(short, long)]
        name: String,
        /// Customer phone number.
        #[arg(short, long)]
        phone: String,
        /// Service the customer is interested in.
        #[arg(short, long, default_value = "")]
        service: String,
        /// Additional notes.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List queue entries.
    List {
        /// Only show customers still waiting.
        #[arg(short, long)]
        waiting: bool,
    },
    /// Change a queue entry's status (waiting, served, cancelled).
    Status {
        /// Queue entry ID.
        id: String,
        /// New status.
        status: String,
    },
}

pub async fn run(config: ConfigHandle, action: QueueAction, format: OutputFormat) -> CcResult<()> {
    let ledger = super::open_ledger(&config).await?;

    match action {
        QueueAction::Join { name, phone, service, notes } => {
            super::warn_contact_details(None, Some(&phone));
            let entry = ledger.join_queue(QueueRequest {
                customer_name: name,
                customer_phone: phone,
                service_interested: service,
                additional_notes: notes,
            })?;

            match format {
                OutputFormat::Json => super::print_json(&entry)?,
                OutputFormat::Text => {
                    println!("  {} {}", style("OK").green().bold(), entry.confirmation_summary());
                    println!("  Queue ID: {}", style(&entry.id).cyan());
                }
            }
        }
        QueueAction::List { waiting } => {
            let mut entries = ledger.list_queue()?;
            if waiting {
                entries.retain(|q| q.is_waiting());
            }

            match format {
                OutputFormat::Json => super::print_json(&entries)?,
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("Nobody in the queue.");
                    } else {
                        let mut table = super::new_table();
                        table.set_header(vec!["#", "ID", "Name", "Phone", "Service", "Status", "Joined"]);
                        for entry in &entries {
                            table.add_row(vec![
                                entry.position.to_string(),
                                entry.id.clone(),
                                super::truncate(&entry.customer_name, 24),
                                entry.customer_phone.clone(),
                                super::truncate(&entry.service_interested, 24),
                                entry.status.to_string(),
                                entry.joined_at.format("%Y-%m-%d %H:%M").to_string(),
                            ]);
                        }
                        println!("{table}");
                    }
                    println!("\n{} waiting.", ledger.waiting_count()?);
                }
            }
        }
        QueueAction::Status { id, status } => {
            let status: QueueStatus = status.parse()?;
            let entry = ledger.update_queue_status(&id, status)?;

            match format {
                OutputFormat::Json => super::print_json(&entry)?,
                OutputFormat::Text => {
                    println!(
                        "  {} {} (#{}) is now {}",
                        style("OK").green().bold(),
                        entry.customer_name,
                        entry.position,
                        style(entry.status).bold()
                    );
                }
            }
        }
    }
    Ok(())
}
