//! Favorites store: the ordered list of saved locations, mirrored into storage
//! after every mutation.

use crate::db::Storage;
use crate::error::{ImportError, ImportValidationError, StorageError};
use crate::models::{Coordinate, SavedLocation};
use log::{error, info, warn};
use serde_json::Value;

/// Storage key holding the JSON array of saved locations
pub const SAVED_LOCATIONS_KEY: &str = "savedLocations";

/// Fields every imported record must carry
const REQUIRED_FIELDS: [&str; 3] = ["lat", "lng", "title"];

pub struct FavoritesStore {
    storage: Storage,
    locations: Vec<SavedLocation>,
}

impl FavoritesStore {
    /// Loads the collection once from storage. An unreadable value is logged
    /// and treated as empty; it is replaced on the next mutation.
    pub fn load(storage: Storage) -> Result<Self, StorageError> {
        let locations = match storage.get(SAVED_LOCATIONS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<SavedLocation>>(&raw) {
                Ok(locations) => locations,
                Err(e) => {
                    error!("[favorites] Error loading saved locations: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        info!("[favorites] Loaded {} saved locations", locations.len());
        Ok(Self { storage, locations })
    }

    pub fn list(&self) -> &[SavedLocation] {
        &self.locations
    }

    pub fn get(&self, index: usize) -> Option<&SavedLocation> {
        self.locations.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn add(&mut self, title: &str, coordinate: Coordinate) -> Result<(), StorageError> {
        self.locations.push(SavedLocation::new(title, coordinate));
        self.persist()?;
        info!("[favorites] Saved '{}' at {:?}", title, coordinate);
        Ok(())
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) -> Result<(), StorageError> {
        if index >= self.locations.len() {
            warn!("[favorites] Ignoring delete of missing index {}", index);
            return Ok(());
        }
        let removed = self.locations.remove(index);
        self.persist()?;
        info!("[favorites] Deleted '{}'", removed.title);
        Ok(())
    }

    /// Appends every candidate, or none of them. The whole batch is rejected
    /// when the payload is not an array or any element lacks `lat`, `lng` or
    /// `title`.
    pub fn import_many(&mut self, candidates: &Value) -> Result<usize, ImportError> {
        let imported = validate_import(candidates)?;
        let count = imported.len();
        self.locations.extend(imported);
        self.persist()?;
        info!("[favorites] Imported {} locations", count);
        Ok(count)
    }

    /// Pretty-printed JSON of the whole collection
    pub fn export_all(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec_pretty(&self.locations)?)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.locations)?;
        self.storage.set(SAVED_LOCATIONS_KEY, &serialized)
    }
}

fn validate_import(candidates: &Value) -> Result<Vec<SavedLocation>, ImportValidationError> {
    let entries = candidates
        .as_array()
        .ok_or(ImportValidationError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let object = entry
                .as_object()
                .ok_or_else(|| ImportValidationError::InvalidEntry {
                    index,
                    reason: "not an object".to_string(),
                })?;
            if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
                return Err(ImportValidationError::InvalidEntry {
                    index,
                    reason: format!("missing field '{}'", missing),
                });
            }
            serde_json::from_value(entry.clone()).map_err(|e| {
                ImportValidationError::InvalidEntry {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}
