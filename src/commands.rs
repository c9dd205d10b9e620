//! IPC commands exposed to the webview

use crate::config::{load_config, save_config, MapConfig};
use crate::context::{AppContext, InteractionEvent, InteractionOutcome};
use crate::error::{AppError, ImportError};
use crate::models::{ChatMessage, Coordinate, SavedLocation};
use crate::paths::clear_app_data;
use crate::prompts::CHAT_GREETING;
use log::{error, info, warn};
use std::path::PathBuf;
use tauri::{command, State};

fn to_message(e: AppError) -> String {
    e.to_string()
}

// ============ Location Commands ============

#[command]
pub async fn handle_map_click(
    state: State<'_, AppContext>,
    lat: f64,
    lng: f64,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::MapClick(Coordinate::new(lat, lng)))
        .await
        .map_err(to_message)
}

#[command]
pub async fn search_location(
    state: State<'_, AppContext>,
    address: String,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::Search(address))
        .await
        .map_err(|e| format!("Could not find location: {}", e))
}

#[command]
pub async fn revisit_saved_location(
    state: State<'_, AppContext>,
    index: usize,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::Revisit(index))
        .await
        .map_err(to_message)
}

// ============ Favorites Commands ============

#[command]
pub async fn suggest_location_title(
    state: State<'_, AppContext>,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::SuggestTitle)
        .await
        .map_err(to_message)
}

/// `title` is what the user confirmed; `None` when the prompt was cancelled
#[command]
pub async fn save_location(
    state: State<'_, AppContext>,
    title: Option<String>,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::SaveRequest { title })
        .await
        .map_err(to_message)
}

#[command]
pub fn list_saved_locations(state: State<'_, AppContext>) -> Vec<SavedLocation> {
    state.saved_locations()
}

/// The webview asks for confirmation before calling this
#[command]
pub async fn delete_saved_location(
    state: State<'_, AppContext>,
    index: usize,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::DeleteRequest(index))
        .await
        .map_err(to_message)
}

#[command]
pub async fn import_saved_locations(
    state: State<'_, AppContext>,
    path: PathBuf,
) -> Result<InteractionOutcome, String> {
    match state.dispatch(InteractionEvent::ImportRequest(path.clone())).await {
        Ok(outcome) => Ok(outcome),
        Err(AppError::Import(ImportError::Invalid(e))) => {
            warn!("[import] Rejected {:?}: {}", path, e);
            Err("Invalid import file format.".to_string())
        }
        Err(e) => {
            error!("[import] Import error: {}", e);
            Err("Error importing locations.".to_string())
        }
    }
}

#[command]
pub async fn export_saved_locations(
    state: State<'_, AppContext>,
    path: PathBuf,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::ExportRequest(path))
        .await
        .map_err(to_message)
}

// ============ Chat Commands ============

#[command]
pub async fn send_chat_message(
    state: State<'_, AppContext>,
    message: String,
) -> Result<InteractionOutcome, String> {
    state
        .dispatch(InteractionEvent::ChatSubmit(message))
        .await
        .map_err(to_message)
}

#[command]
pub fn get_chat_transcript(state: State<'_, AppContext>) -> Vec<ChatMessage> {
    state.transcript()
}

#[command]
pub fn get_chat_greeting() -> &'static str {
    CHAT_GREETING
}

// ============ Map / Config Commands ============

#[command]
pub fn set_map_view(state: State<'_, AppContext>, lat: f64, lng: f64, zoom: u8) {
    state.set_view(Coordinate::new(lat, lng), zoom);
}

#[command]
pub fn get_map_config(state: State<'_, AppContext>) -> MapConfig {
    state.config().map.clone()
}

/// Stores the keys in the config file; they are picked up on next launch
#[command]
pub fn save_api_keys(gemini_key: Option<String>, maps_key: Option<String>) -> Result<(), String> {
    let mut config = load_config().map_err(|e| e.to_string())?;
    if gemini_key.is_some() {
        config.gemini_api_key = gemini_key;
    }
    if maps_key.is_some() {
        config.maps_api_key = maps_key;
    }
    save_config(&config).map_err(|e| e.to_string())?;
    info!("[save_api_keys] API keys saved");
    Ok(())
}

#[command]
pub fn has_api_keys(state: State<'_, AppContext>) -> (bool, bool) {
    let config = state.config();
    (
        config.effective_gemini_key().is_some(),
        config.effective_maps_key().is_some(),
    )
}

/// The webview needs the maps key to load the map script
#[command]
pub fn get_maps_api_key(state: State<'_, AppContext>) -> Option<String> {
    state.config().effective_maps_key()
}

#[command]
pub fn clear_all_data() -> Result<(), String> {
    clear_app_data()
}

// ============ Frontend Logging ============

#[command]
pub fn log_from_frontend(level: String, message: String) {
    match level.as_str() {
        "error" => error!("[Frontend] {}", message),
        "warn" => warn!("[Frontend] {}", message),
        _ => info!("[Frontend] {}", message),
    }
}
