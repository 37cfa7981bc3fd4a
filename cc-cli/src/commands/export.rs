//! Data export command.

use std::path::PathBuf;

use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use crate::OutputFormat;

pub async fn run(config: ConfigHandle, output: Option<String>, format: OutputFormat) -> CcResult<()> {
    let ledger = super::open_ledger(&config).await?;
    let export = ledger.export_data()?;
    let json = export.to_json_pretty()?;

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(export.suggested_file_name()));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &json)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "path": path.display().to_string(),
                    "bytes": json.len(),
                    "bookings": export.bookings.len(),
                    "queue": export.queue.len(),
                    "messages": export.messages.len(),
                })
            );
        }
        OutputFormat::Text => {
            println!(
                "  {} Exported {} booking(s), {} queue entr(ies), {} message(s) to {} ({})",
                style("OK").green().bold(),
                export.bookings.len(),
                export.queue.len(),
                export.messages.len(),
                style(path.display()).cyan(),
                super::format_bytes(json.len() as u64)
            );
        }
    }
    Ok(())
}
