//! Gallery commands - add, list, and remove images.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum GalleryAction {
    /// Add an image file to the gallery.
    Add {
        /// Image file (png, jpg, gif, webp).
        file: PathBuf,
        /// Caption shown under the image.
        #[arg(short, long, default_value = "")]
        caption: String,
    },
    /// List gallery images.
    List,
    /// Remove an image from the gallery.
    Remove {
        /// Image ID.
        id: String,
    },
}

pub async fn run(config: ConfigHandle, action: GalleryAction, format: OutputFormat) -> CcResult<()> {
    let gallery = super::open_gallery(&config).await?;

    match action {
        GalleryAction::Add { file, caption } => {
            let image = gallery.add_image_file(&file, &caption)?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({
                    "id": image.id,
                    "caption": image.caption,
                    "uploadedAt": image.uploaded_at,
                    "bytes": image.src.len(),
                }))?,
                OutputFormat::Text => {
                    println!(
                        "  {} Added \"{}\" ({})",
                        style("OK").green().bold(),
                        image.caption,
                        style(&image.id).cyan()
                    );
                }
            }
        }
        GalleryAction::List => {
            let images = gallery.list_images()?;
            match format {
                OutputFormat::Json => super::print_json(&images)?,
                OutputFormat::Text => {
                    if images.is_empty() {
                        println!("The gallery is empty.");
                        return Ok(());
                    }
                    let mut table = super::new_table();
                    table.set_header(vec!["ID", "Caption", "Type", "Size", "Uploaded"]);
                    for image in &images {
                        let mime = image
                            .src
                            .strip_prefix("data:")
                            .and_then(|rest| rest.split(';').next())
                            .unwrap_or("url");
                        table.add_row(vec![
                            image.id.clone(),
                            super::truncate(&image.caption, 30),
                            mime.to_string(),
                            super::format_bytes(image.src.len() as u64),
                            image.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        GalleryAction::Remove { id } => {
            let removed = gallery.delete_image(&id)?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "removed": removed.id }))?,
                OutputFormat::Text => {
                    println!("  {} Removed \"{}\"", style("OK").green().bold(), removed.caption);
                }
            }
        }
    }
    Ok(())
}
