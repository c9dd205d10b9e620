//! Application configuration and built-in API key support

use crate::error::ConfigError;
use crate::models::Coordinate;
use crate::paths::get_config_path;
use serde::{Deserialize, Serialize};

// ============ Map Configuration ============

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MapConfig {
    #[serde(default = "default_center")]
    pub center: Coordinate,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Zoom used when jumping to a saved location
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
    #[serde(default = "default_map_type")]
    pub map_type: String,
    #[serde(default = "default_styles")]
    pub styles: Vec<String>,
}

fn default_center() -> Coordinate {
    // Washington DC
    Coordinate::new(38.8920621, -77.0199124)
}

fn default_zoom() -> u8 {
    13
}

fn default_focus_zoom() -> u8 {
    15
}

fn default_map_type() -> String {
    "roadmap".to_string()
}

fn default_styles() -> Vec<String> {
    ["default", "satellite", "terrain", "night", "retro", "silver"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
            map_type: default_map_type(),
            styles: default_styles(),
        }
    }
}

// ============ App Configuration ============

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub maps_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    #[serde(default)]
    pub map: MapConfig,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_geocode_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            maps_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            geocode_base_url: default_geocode_base_url(),
            map: MapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Gemini key to use: the compile-time key wins over the configured one
    pub fn effective_gemini_key(&self) -> Option<String> {
        get_builtin_gemini_key().or_else(|| self.gemini_api_key.clone())
    }

    /// Maps key to use: the compile-time key wins over the configured one
    pub fn effective_maps_key(&self) -> Option<String> {
        get_builtin_maps_key().or_else(|| self.maps_api_key.clone())
    }
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_path = get_config_path().map_err(ConfigError::Path)?;
    load_config_from(&config_path)
}

pub fn load_config_from(config_path: &std::path::Path) -> Result<AppConfig, ConfigError> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let config_path = get_config_path().map_err(ConfigError::Path)?;
    save_config_to(&config_path, config)
}

pub fn save_config_to(config_path: &std::path::Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;
    Ok(())
}

// ============ Built-in API Key Support ============

/// XOR key for deobfuscation (must match build.rs)
const XOR_KEY: [u8; 16] = [
    0x47, 0x65, 0x6f, 0x45, 0x78, 0x70, 0x6c, 0x6f, 0x72, 0x65, 0x72, 0x4d, 0x61, 0x70, 0x73,
    0x21,
];

/// Compile-time embedded obfuscated keys (hex-encoded, empty when absent)
const OBFUSCATED_GEMINI_KEY: &str = env!("OBFUSCATED_GEMINI_KEY");
const OBFUSCATED_MAPS_KEY: &str = env!("OBFUSCATED_MAPS_KEY");

/// Deobfuscate the hex-encoded XOR-obfuscated API key
fn deobfuscate_api_key(hex_encoded: &str) -> Option<String> {
    if hex_encoded.is_empty() || hex_encoded.len() % 2 != 0 {
        return None;
    }

    let obfuscated: Vec<u8> = (0..hex_encoded.len())
        .step_by(2)
        .filter_map(|i| u8::from_str_radix(&hex_encoded[i..i + 2], 16).ok())
        .collect();

    if obfuscated.is_empty() {
        return None;
    }

    let deobfuscated: Vec<u8> = obfuscated
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ XOR_KEY[i % XOR_KEY.len()])
        .collect();

    String::from_utf8(deobfuscated).ok()
}

pub fn get_builtin_gemini_key() -> Option<String> {
    deobfuscate_api_key(OBFUSCATED_GEMINI_KEY)
}

pub fn get_builtin_maps_key() -> Option<String> {
    deobfuscate_api_key(OBFUSCATED_MAPS_KEY)
}
