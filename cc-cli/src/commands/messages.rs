//! Contact message commands.

use clap::Subcommand;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum MessagesAction {
    /// List contact messages, oldest first.
    List {
        /// Show only the most recent N messages.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

pub async fn run(config: ConfigHandle, action: MessagesAction, format: OutputFormat) -> CcResult<()> {
    let ledger = super::open_ledger(&config).await?;

    match action {
        MessagesAction::List { limit } => {
            let mut messages = ledger.list_messages()?;
            if let Some(limit) = limit {
                let skip = messages.len().saturating_sub(limit);
                messages.drain(..skip);
            }

            match format {
                OutputFormat::Json => super::print_json(&messages)?,
                OutputFormat::Text => {
                    if messages.is_empty() {
                        println!("No messages.");
                        return Ok(());
                    }
                    let mut table = super::new_table();
                    table.set_header(vec!["Sent", "Name", "Email", "Phone", "Message"]);
                    for message in &messages {
                        table.add_row(vec![
                            message.sent_at.format("%Y-%m-%d %H:%M").to_string(),
                            super::truncate(&message.name, 20),
                            message.email.clone(),
                            message.phone.clone(),
                            super::truncate(&message.message, 50),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
    }
    Ok(())
}
