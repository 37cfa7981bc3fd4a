//! Business statistics command.

use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use crate::OutputFormat;

pub async fn run(config: ConfigHandle, format: OutputFormat) -> CcResult<()> {
    let ledger = super::open_ledger(&config).await?;
    let stats = ledger.compute_stats()?;

    match format {
        OutputFormat::Json => super::print_json(&stats)?,
        OutputFormat::Text => {
            println!("{}", style("Overview").bold().underlined());
            println!("  Total bookings:     {}", stats.total_bookings);
            println!("  Pending:            {}", stats.pending_bookings);
            println!("  Confirmed:          {}", stats.confirmed_bookings);
            println!("  Waiting in queue:   {}", stats.queue_length);
            println!("  Messages:           {}", stats.total_messages);

            if !stats.popular_services.is_empty() {
                println!();
                println!("{}", style("Popular Services").bold().underlined());
                let mut table = super::new_table();
                table.set_header(vec!["Service", "Bookings"]);
                for service in &stats.popular_services {
                    table.add_row(vec![service.name.clone(), service.count.to_string()]);
                }
                println!("{table}");
            }

            if !stats.recent_activity.is_empty() {
                println!();
                println!("{}", style("Recent Activity").bold().underlined());
                let mut table = super::new_table();
                table.set_header(vec!["When", "Type", "Details"]);
                for entry in &stats.recent_activity {
                    table.add_row(vec![
                        entry.date.format("%Y-%m-%d %H:%M").to_string(),
                        entry.activity.kind().to_string(),
                        super::truncate(&entry.activity.summary(), 60),
                    ]);
                }
                println!("{table}");
            }
        }
    }
    Ok(())
}
