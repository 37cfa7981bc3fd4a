//! Booking management commands - list bookings and change their status.

use clap::Subcommand;
use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use cc_models::BookingStatus;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum BookingsAction {
    /// List all bookings.
    List {
        /// Only show bookings with this status.
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change a booking's status (pending, confirmed, cancelled, completed).
    Status {
        /// Booking ID.
        id: String,
        /// New status.
        status: String,
    },
}

pub async fn run(config: ConfigHandle, action: BookingsAction, format: OutputFormat) -> CcResult<()> {
    let ledger = super::open_ledger(&config).await?;

    match action {
        BookingsAction::List { status } => {
            let filter = status.as_deref().map(str::parse::<BookingStatus>).transpose()?;
            let mut bookings = ledger.list_bookings()?;
            if let Some(filter) = filter {
                bookings.retain(|b| b.status == filter);
            }

            match format {
                OutputFormat::Json => super::print_json(&bookings)?,
                OutputFormat::Text => {
                    if bookings.is_empty() {
                        println!("No bookings.");
                    } else {
                        let mut table = super::new_table();
                        table.set_header(vec!["ID", "Service", "Customer", "Phone", "Date", "Time", "Status"]);
                        for booking in &bookings {
                            table.add_row(vec![
                                booking.id.clone(),
                                super::truncate(&booking.service_name, 28),
                                super::truncate(&booking.customer_name, 24),
                                booking.customer_phone.clone(),
                                booking.preferred_date.format("%Y-%m-%d").to_string(),
                                booking.preferred_time.format("%H:%M").to_string(),
                                booking.status.to_string(),
                            ]);
                        }
                        println!("{table}");
                        println!("\n{} booking(s).", bookings.len());
                    }
                }
            }
        }
        BookingsAction::Status { id, status } => {
            let status: BookingStatus = status.parse()?;
            let booking = ledger.update_booking_status(&id, status)?;

            match format {
                OutputFormat::Json => super::print_json(&booking)?,
                OutputFormat::Text => {
                    println!(
                        "  {} Booking {} for {} is now {}",
                        style("OK").green().bold(),
                        booking.id,
                        booking.customer_name,
                        style(booking.status).bold()
                    );
                }
            }
        }
    }
    Ok(())
}
