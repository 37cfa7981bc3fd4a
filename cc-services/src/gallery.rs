//! Gallery image management.
//!
//! Images are kept as one JSON array under the `catImages` key, with each
//! image inlined as a base64 data URL.

use std::path::Path;

use tracing::{info, warn};

use cc_core::constants::keys;
use cc_core::error::{CcError, CcResult};
use cc_models::models::gallery_image::image_data_url;
use cc_models::store::{load_collection, save_collection};
use cc_models::{DurableStore, GalleryImage};

use crate::event_bus::{EventBus, LedgerEvent};
use crate::service::{Service, ServiceState};

/// Service for adding, listing and removing gallery images.
pub struct GalleryService<S: DurableStore> {
    state: ServiceState,
    store: S,
    event_bus: Option<EventBus>,
}

impl<S: DurableStore> GalleryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            state: ServiceState::Created,
            store,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Add an image whose `src` is already a URL.
    pub fn add_image(&self, src: impl Into<String>, caption: &str) -> CcResult<GalleryImage> {
        let image = GalleryImage::new(src.into(), caption)?;

        let mut images = self.list_images()?;
        images.push(image.clone());
        save_collection(&self.store, keys::GALLERY, &images)?;

        info!(image_id = %image.id, caption = %image.caption, "gallery image added");
        if let Some(bus) = &self.event_bus {
            bus.emit(LedgerEvent::GalleryImageAdded {
                image_id: image.id.clone(),
            });
        }
        Ok(image)
    }

    /// Read an image file and add it as a data URL.
    pub fn add_image_file(&self, path: &Path, caption: &str) -> CcResult<GalleryImage> {
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(CcError::Validation(format!("{} is empty", path.display())));
        }
        self.add_image(image_data_url(&bytes, path), caption)
    }

    /// All images in upload order.
    pub fn list_images(&self) -> CcResult<Vec<GalleryImage>> {
        load_collection(&self.store, keys::GALLERY)
    }

    /// Remove an image by id.
    pub fn delete_image(&self, id: &str) -> CcResult<GalleryImage> {
        let mut images = self.list_images()?;
        let index = images
            .iter()
            .position(|img| img.id == id)
            .ok_or_else(|| CcError::not_found("gallery image", id))?;

        let removed = images.remove(index);
        save_collection(&self.store, keys::GALLERY, &images)?;

        info!(image_id = %id, "gallery image removed");
        if let Some(bus) = &self.event_bus {
            bus.emit(LedgerEvent::GalleryImageRemoved {
                image_id: removed.id.clone(),
            });
        }
        Ok(removed)
    }
}

impl<S: DurableStore + Send + Sync> Service for GalleryService<S> {
    fn name(&self) -> &str {
        "gallery"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> CcResult<()> {
        self.state = ServiceState::Initializing;
        match self.list_images() {
            Ok(images) => {
                info!("gallery service initialized with {} image(s)", images.len());
                self.state = ServiceState::Running;
                Ok(())
            }
            Err(e) => {
                warn!("failed to load gallery images: {e}");
                self.state = ServiceState::Failed;
                Err(e)
            }
        }
    }

    fn shutdown(&mut self) -> CcResult<()> {
        self.state = ServiceState::Stopped;
        info!("gallery service stopped");
        Ok(())
    }
}
