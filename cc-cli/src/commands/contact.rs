//! Contact form command.

use clap::Args;
use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use cc_models::ContactRequest;
use crate::OutputFormat;

#[derive(Args)]
pub struct ContactArgs {
    /// Your name.
    #[arg(short, long)]
    name: String,
    /// Your email address.
    #[arg(short, long)]
    email: String,
    /// Your phone number.
    #[arg(short, long, default_value = "")]
    phone: String,
    /// The message.
    #[arg(short, long)]
    message: String,
}

pub async fn run(config: ConfigHandle, args: ContactArgs, format: OutputFormat) -> CcResult<()> {
    super::warn_contact_details(Some(&args.email), Some(&args.phone));

    let ledger = super::open_ledger(&config).await?;
    let message = ledger.submit_contact_message(ContactRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        message: args.message,
    })?;

    match format {
        OutputFormat::Json => super::print_json(&message)?,
        OutputFormat::Text => {
            println!(
                "  {} Thank you for your message! We'll get back to you soon.",
                style("OK").green().bold()
            );
        }
    }
    Ok(())
}
