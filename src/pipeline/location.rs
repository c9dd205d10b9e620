//! Location interaction pipeline.
//!
//! A map click runs one cycle: Idle -> Resolving (reverse geocode) ->
//! Describing (text generation) -> Rendered. A failed lookup only drops the
//! address; the description step always yields text, so every cycle renders.
//!
//! Cycles are not serialized or cancelled. Each one is stamped with a click
//! generation so callers can tell whether a result is still the latest.

use super::lock;
use crate::error::{AppError, LookupError, StorageError};
use crate::favorites::FavoritesStore;
use crate::gemini::LocationNarrator;
use crate::geocoding::Geocoder;
use crate::models::{Coordinate, LocationInfo};
use crate::prompts::{title_from_address, UNNAMED_LOCATION};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct LocationPipeline {
    geocoder: Arc<dyn Geocoder>,
    narrator: Arc<dyn LocationNarrator>,
    favorites: Arc<Mutex<FavoritesStore>>,
    latest_generation: AtomicU64,
}

impl LocationPipeline {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        narrator: Arc<dyn LocationNarrator>,
        favorites: Arc<Mutex<FavoritesStore>>,
    ) -> Self {
        Self {
            geocoder,
            narrator,
            favorites,
            latest_generation: AtomicU64::new(0),
        }
    }

    pub async fn handle_map_click(&self, coordinate: Coordinate) -> LocationInfo {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("[location] #{} resolving {:?}", generation, coordinate);

        let address = match self.geocoder.reverse_geocode(coordinate).await {
            Ok(address) => Some(address),
            Err(e) => {
                warn!("[location] #{} address not available: {}", generation, e);
                None
            }
        };

        debug!("[location] #{} describing (address: {:?})", generation, address);
        let description = self
            .narrator
            .describe_location(coordinate, address.as_deref())
            .await;

        debug!("[location] #{} rendered", generation);
        LocationInfo {
            coordinate,
            address,
            description,
            generation,
        }
    }

    /// Whether no click has been issued since the one that produced `generation`
    pub fn is_latest(&self, generation: u64) -> bool {
        self.latest_generation.load(Ordering::SeqCst) == generation
    }

    /// Forward geocodes `address`, then runs a click cycle at the result
    pub async fn search(&self, address: &str) -> Result<LocationInfo, LookupError> {
        let coordinate = self.geocoder.forward_geocode(address).await?;
        info!("[location] '{}' found at {:?}", address, coordinate);
        Ok(self.handle_map_click(coordinate).await)
    }

    /// Runs a click cycle at the saved location at `index`
    pub async fn revisit(&self, index: usize) -> Result<LocationInfo, AppError> {
        let coordinate = lock(&self.favorites)
            .get(index)
            .map(|location| location.coordinate())
            .ok_or(AppError::NoSuchLocation(index))?;
        Ok(self.handle_map_click(coordinate).await)
    }

    /// Default title for saving `coordinate`: the first segment of its
    /// address, or a fixed name when the lookup fails.
    pub async fn suggest_title(&self, coordinate: Coordinate) -> String {
        match self.geocoder.reverse_geocode(coordinate).await {
            Ok(address) => title_from_address(&address),
            Err(e) => {
                warn!("[location] no address for title: {}", e);
                UNNAMED_LOCATION.to_string()
            }
        }
    }

    /// Saves `coordinate` under the title the user confirmed. A missing or
    /// blank title means the user cancelled; nothing is saved.
    pub fn save(&self, title: Option<&str>, coordinate: Coordinate) -> Result<bool, StorageError> {
        let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
            info!("[location] save cancelled");
            return Ok(false);
        };
        lock(&self.favorites).add(title, coordinate)?;
        Ok(true)
    }
}
