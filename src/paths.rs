//! Path utilities and file system helpers

use std::path::PathBuf;

/// Default file name offered when exporting saved locations
pub const EXPORT_FILE_NAME: &str = "geoexplorer-locations.json";

/// Gets the application data directory
pub fn get_app_data_dir() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|p| p.join("com.geoexplorer.desktop"))
        .ok_or_else(|| "Could not find app data directory".to_string())
}

/// Clears all application data
pub fn clear_app_data() -> Result<(), String> {
    let app_dir = get_app_data_dir()?;
    if app_dir.exists() {
        std::fs::remove_dir_all(&app_dir)
            .map_err(|e| format!("Failed to clear app data: {}", e))?;
    }
    Ok(())
}

/// Gets the database file path
pub fn get_db_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("geoexplorer.db"))
}

/// Gets the application configuration file path
pub fn get_config_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_app_data_dir() {
        let Ok(app_dir) = get_app_data_dir() else {
            return;
        };
        assert!(app_dir.ends_with("com.geoexplorer.desktop"));
        assert!(get_db_path().unwrap().starts_with(&app_dir));
        assert!(get_config_path().unwrap().starts_with(&app_dir));
    }
}
