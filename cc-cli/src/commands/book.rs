//! Booking form command.

use clap::Args;
use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use cc_models::validation::{parse_form_date, parse_form_time};
use cc_models::BookingRequest;
use crate::OutputFormat;

#[derive(Args)]
pub struct BookArgs {
    /// Service category (grooming, boarding, vet, ...).
    #[arg(long)]
    service_type: String,
    /// Service name as shown on the price list.
    #[arg(long)]
    service_name: String,
    /// Customer name.
    #[arg(short, long)]
    name: String,
    /// Customer phone number.
    #[arg(short, long)]
    phone: String,
    /// Customer email address.
    #[arg(short, long, default_value = "")]
    email: String,
    /// Preferred date (YYYY-MM-DD).
    #[arg(short, long)]
    date: String,
    /// Preferred time (HH:MM, 24-hour).
    #[arg(short, long)]
    time: String,
    /// Anything the groomer should know.
    #[arg(long, default_value = "")]
    notes: String,
}

pub async fn run(config: ConfigHandle, args: BookArgs, format: OutputFormat) -> CcResult<()> {
    super::warn_contact_details(Some(&args.email), Some(&args.phone));

    let request = BookingRequest {
        service_type: args.service_type,
        service_name: args.service_name,
        customer_name: args.name,
        customer_phone: args.phone,
        customer_email: args.email,
        preferred_date: parse_form_date(&args.date)?,
        preferred_time: parse_form_time(&args.time)?,
        additional_notes: args.notes,
    };

    let ledger = super::open_ledger(&config).await?;
    let booking = ledger.submit_booking(request)?;

    match format {
        OutputFormat::Json => super::print_json(&booking)?,
        OutputFormat::Text => {
            println!("  {} {}", style("OK").green().bold(), booking.confirmation_summary());
            println!("  Booking ID: {}", style(&booking.id).cyan());
            println!("  Status:     {}", booking.status);
        }
    }
    Ok(())
}
