//! # Catalog Boundary
//!
//! Supplies fully assembled [`DeviceDetails`] records. Whatever sits behind a
//! [`CatalogSource`] has already joined devices with their features,
//! customization groups and add-ons; everything here is validated before the
//! pricing engine sees it.
//!
//! The catalog document uses the backend's wire names:
//!
//! ```json
//! [{
//!   "dispositivo": { "id": 1, "nombre": "Pixel", "descripcion": "...",
//!                    "precioBase": 100.0, "moneda": "USD" },
//!   "caracteristicas": [{ "nombre": "Pantalla", "descripcion": "6.1\"" }],
//!   "personalizaciones": [{ "id": 3, "nombre": "Almacenamiento",
//!       "opciones": [{ "id": 30, "nombre": "64GB", "precioAdicional": 0.0 }] }],
//!   "adicionales": [{ "id": 7, "nombre": "Funda", "precio": 15.0, "precioGratis": -1.0 }]
//! }]
//! ```

use async_trait::async_trait;
use tracing::{debug, info};
use venta_core::validation::validate_catalog;
use venta_core::DeviceDetails;

use crate::error::{CatalogLoadError, CatalogResult};

/// Where device records come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every device in the catalog.
    async fn devices(&self) -> CatalogResult<Vec<DeviceDetails>>;

    /// One device by id.
    async fn device(&self, device_id: i64) -> CatalogResult<DeviceDetails> {
        self.devices()
            .await?
            .into_iter()
            .find(|details| details.device.id == device_id)
            .ok_or(CatalogLoadError::DeviceNotFound(device_id))
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A validated catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    devices: Vec<DeviceDetails>,
}

impl InMemoryCatalog {
    /// Wraps already assembled records after validating them.
    pub fn new(devices: Vec<DeviceDetails>) -> CatalogResult<Self> {
        validate_catalog(&devices)?;
        info!(devices = devices.len(), "Catalog loaded");
        Ok(Self { devices })
    }

    /// Parses a catalog document (a JSON array of device records).
    pub fn from_json(document: &str) -> CatalogResult<Self> {
        let devices: Vec<DeviceDetails> = serde_json::from_str(document)?;
        debug!(devices = devices.len(), "Parsed catalog document");
        Self::new(devices)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn devices(&self) -> CatalogResult<Vec<DeviceDetails>> {
        Ok(self.devices.clone())
    }

    async fn device(&self, device_id: i64) -> CatalogResult<DeviceDetails> {
        self.devices
            .iter()
            .find(|details| details.device.id == device_id)
            .cloned()
            .ok_or(CatalogLoadError::DeviceNotFound(device_id))
    }
}
