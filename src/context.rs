//! Application context: owns the services, the favorites store, the chat
//! pipeline and the current map view, and routes interaction events to them.

use crate::config::{load_config, AppConfig};
use crate::db::Storage;
use crate::error::{AppError, ImportError, ImportValidationError, StorageError};
use crate::favorites::FavoritesStore;
use crate::gemini::{GeminiClient, LocationNarrator};
use crate::geocoding::{Geocoder, GoogleGeocoder};
use crate::models::{ChatMessage, Coordinate, LocationInfo, MapView, SavedLocation};
use crate::pipeline::{lock, ConversationPipeline, LocationPipeline};
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Something the user did in the webview
#[derive(Debug, Clone)]
pub enum InteractionEvent {
    MapClick(Coordinate),
    Search(String),
    Revisit(usize),
    /// Ask for a default title for the selected position
    SuggestTitle,
    /// Save the selected position under the confirmed title; `None` = cancelled
    SaveRequest { title: Option<String> },
    DeleteRequest(usize),
    ChatSubmit(String),
    /// Append the locations stored in a JSON file
    ImportRequest(PathBuf),
    /// Write every saved location to a JSON file
    ExportRequest(PathBuf),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum InteractionOutcome {
    /// `stale` is set when another click started after this one
    Described { info: LocationInfo, stale: bool },
    Title(String),
    Saved(bool),
    Favorites(Vec<SavedLocation>),
    Reply(Option<ChatMessage>),
    Imported(usize),
    /// Number of locations written
    Exported(usize),
}

pub struct AppContext {
    config: AppConfig,
    favorites: Arc<Mutex<FavoritesStore>>,
    location: LocationPipeline,
    conversation: ConversationPipeline,
    view: Mutex<MapView>,
}

impl AppContext {
    /// Loads config and the default database, then wires the Google services
    pub fn bootstrap() -> Result<Self, AppError> {
        let config = load_config()?;
        let storage = Storage::open_default()?;
        Self::new(config, storage)
    }

    pub fn new(config: AppConfig, storage: Storage) -> Result<Self, AppError> {
        let geocoder = Arc::new(GoogleGeocoder::new(
            config.geocode_base_url.clone(),
            config.effective_maps_key(),
        ));
        let narrator = Arc::new(GeminiClient::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.effective_gemini_key(),
        ));
        Self::with_services(config, storage, geocoder, narrator)
    }

    pub fn with_services(
        config: AppConfig,
        storage: Storage,
        geocoder: Arc<dyn Geocoder>,
        narrator: Arc<dyn LocationNarrator>,
    ) -> Result<Self, AppError> {
        let favorites = Arc::new(Mutex::new(FavoritesStore::load(storage)?));
        let view = MapView {
            center: config.map.center,
            zoom: config.map.zoom,
            selected: None,
        };
        Ok(Self {
            location: LocationPipeline::new(geocoder.clone(), narrator.clone(), favorites.clone()),
            conversation: ConversationPipeline::new(geocoder, narrator),
            favorites,
            view: Mutex::new(view),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn view(&self) -> MapView {
        *lock(&self.view)
    }

    /// Records where the webview map currently is
    pub fn set_view(&self, center: Coordinate, zoom: u8) {
        let mut view = lock(&self.view);
        view.center = center;
        view.zoom = zoom;
    }

    pub fn saved_locations(&self) -> Vec<SavedLocation> {
        lock(&self.favorites).list().to_vec()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.conversation.transcript()
    }

    pub async fn dispatch(&self, event: InteractionEvent) -> Result<InteractionOutcome, AppError> {
        match event {
            InteractionEvent::MapClick(coordinate) => {
                lock(&self.view).selected = Some(coordinate);
                let info = self.location.handle_map_click(coordinate).await;
                Ok(self.described(info))
            }
            InteractionEvent::Search(address) => {
                let info = self.location.search(&address).await?;
                Ok(self.focus(info, None))
            }
            InteractionEvent::Revisit(index) => {
                let info = self.location.revisit(index).await?;
                Ok(self.focus(info, Some(self.config.map.focus_zoom)))
            }
            InteractionEvent::SuggestTitle => {
                let selected = self.selected()?;
                Ok(InteractionOutcome::Title(
                    self.location.suggest_title(selected).await,
                ))
            }
            InteractionEvent::SaveRequest { title } => {
                let selected = self.selected()?;
                let saved = self.location.save(title.as_deref(), selected)?;
                Ok(InteractionOutcome::Saved(saved))
            }
            InteractionEvent::DeleteRequest(index) => {
                let mut favorites = lock(&self.favorites);
                favorites.delete(index)?;
                Ok(InteractionOutcome::Favorites(favorites.list().to_vec()))
            }
            InteractionEvent::ChatSubmit(message) => {
                let center = self.view().center;
                Ok(InteractionOutcome::Reply(
                    self.conversation.submit(&message, center).await,
                ))
            }
            InteractionEvent::ImportRequest(path) => {
                Ok(InteractionOutcome::Imported(self.import_from_path(&path).await?))
            }
            InteractionEvent::ExportRequest(path) => {
                Ok(InteractionOutcome::Exported(self.export_to_path(&path).await?))
            }
        }
    }

    async fn import_from_path(&self, path: &Path) -> Result<usize, AppError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(StorageError::from)?;
        let candidates: Value = serde_json::from_str(&text)
            .map_err(|e| ImportError::from(ImportValidationError::Unparseable(e.to_string())))?;
        let count = lock(&self.favorites).import_many(&candidates)?;
        info!("[import] {} locations from {:?}", count, path);
        Ok(count)
    }

    /// Refuses when there is nothing to export
    async fn export_to_path(&self, path: &Path) -> Result<usize, AppError> {
        let (count, bytes) = {
            let favorites = lock(&self.favorites);
            if favorites.is_empty() {
                return Err(AppError::NothingToExport);
            }
            (favorites.list().len(), favorites.export_all()?)
        };
        tokio::fs::write(path, bytes)
            .await
            .map_err(StorageError::from)?;
        info!("[export] {} saved locations written to {:?}", count, path);
        Ok(count)
    }

    fn selected(&self) -> Result<Coordinate, AppError> {
        lock(&self.view).selected.ok_or(AppError::NoLocationSelected)
    }

    /// Moves the view to a searched or revisited result. A stale result only
    /// reports back; the view and the save target stay with the newer click.
    fn focus(&self, info: LocationInfo, zoom: Option<u8>) -> InteractionOutcome {
        let stale = !self.location.is_latest(info.generation);
        if !stale {
            let mut view = lock(&self.view);
            view.center = info.coordinate;
            view.selected = Some(info.coordinate);
            if let Some(zoom) = zoom {
                view.zoom = zoom;
            }
        }
        InteractionOutcome::Described { info, stale }
    }

    fn described(&self, info: LocationInfo) -> InteractionOutcome {
        let stale = !self.location.is_latest(info.generation);
        InteractionOutcome::Described { info, stale }
    }
}
