// Module declarations
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod favorites;
pub mod gemini;
pub mod geocoding;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod prompts;

#[cfg(feature = "desktop")]
mod commands;

pub use context::{AppContext, InteractionEvent, InteractionOutcome};

#[cfg(feature = "desktop")]
pub fn run() {
    use log::{error, info};
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .target(tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::LogDir {
                        file_name: Some("geoexplorer".into()),
                    },
                ))
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            info!("=== GeoExplorer AI Starting ===");
            if let Ok(db_path) = paths::get_db_path() {
                info!("[startup] Database: {:?}", db_path);
            }

            let context = AppContext::bootstrap().map_err(|e| {
                error!("[startup] Failed to initialize: {}", e);
                e
            })?;
            info!(
                "[startup] {} saved locations, gemini key: {}, maps key: {}",
                context.saved_locations().len(),
                context.config().effective_gemini_key().is_some(),
                context.config().effective_maps_key().is_some()
            );
            app.manage(context);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::handle_map_click,
            commands::search_location,
            commands::revisit_saved_location,
            commands::suggest_location_title,
            commands::save_location,
            commands::list_saved_locations,
            commands::delete_saved_location,
            commands::import_saved_locations,
            commands::export_saved_locations,
            commands::send_chat_message,
            commands::get_chat_transcript,
            commands::get_chat_greeting,
            commands::set_map_view,
            commands::get_map_config,
            commands::save_api_keys,
            commands::has_api_keys,
            commands::get_maps_api_key,
            commands::clear_all_data,
            commands::log_from_frontend,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
