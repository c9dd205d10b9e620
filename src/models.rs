//! Data models and structures used throughout the application

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Human readable label shown next to the map, six decimals like the widget
    pub fn label(&self) -> String {
        format!("Latitude: {:.6}, Longitude: {:.6}", self.lat, self.lng)
    }
}

/// Field holding the creation time of a saved location
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A favorite location persisted under the `savedLocations` key.
///
/// Serialized as `{title, lat, lng, timestamp}`. The timestamp is
/// informational: it lives in `extra` with every other field an imported
/// record carries, untouched, so exports mirror what was imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SavedLocation {
    /// A new entry stamped with the current time, in milliseconds UTC
    pub fn new(title: impl Into<String>, coordinate: Coordinate) -> Self {
        let mut extra = Map::new();
        extra.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Self {
            title: title.into(),
            lat: coordinate.lat,
            lng: coordinate.lng,
            extra,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// The stored timestamp, whatever its format
    pub fn timestamp(&self) -> Option<&Value> {
        self.extra.get(TIMESTAMP_FIELD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A single turn of the in-memory chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// What the info window shows once a map interaction has been described
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfo {
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub description: String,
    /// Click generation this result belongs to
    pub generation: u64,
}

impl LocationInfo {
    pub fn heading(&self) -> &str {
        self.address.as_deref().unwrap_or("Location Information")
    }

    pub fn address_label(&self) -> String {
        format!("Address: {}", self.address.as_deref().unwrap_or("Not available"))
    }
}

/// Current state of the map as reported by the webview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    /// Last clicked position, the target of a save request
    pub selected: Option<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn saved_location_uses_widget_field_names() {
        let location = SavedLocation::new("Capitol", Coordinate::new(38.89, -77.02));
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["title"], "Capitol");
        assert_eq!(value["lat"], 38.89);
        assert_eq!(value["lng"], -77.02);
        let stamp = value["timestamp"].as_str().unwrap();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn saved_location_keeps_timestamp_verbatim() {
        for stamp in [
            json!("2025-03-22T10:00:00.000Z"),
            json!("2025-03-22T12:00:00+02:00"),
            json!("3/22/2025"),
            json!(1742637600000_i64),
        ] {
            let raw = json!({"title": "Pier", "lat": 1.0, "lng": 2.0, "timestamp": stamp});
            let location: SavedLocation = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(location.timestamp(), Some(&stamp));
            assert_eq!(serde_json::to_value(&location).unwrap(), raw);
        }
    }

    #[test]
    fn saved_location_keeps_unknown_fields() {
        let raw = json!({"title": "Pier", "lat": 1.0, "lng": 2.0, "note": "sunset"});
        let location: SavedLocation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(location.timestamp(), None);
        assert_eq!(serde_json::to_value(&location).unwrap(), raw);
    }

    #[test]
    fn labels_fall_back_when_address_missing() {
        let info = LocationInfo {
            coordinate: Coordinate::new(38.8920621, -77.0199124),
            address: None,
            description: "text".into(),
            generation: 1,
        };
        assert_eq!(info.heading(), "Location Information");
        assert_eq!(info.address_label(), "Address: Not available");
        assert_eq!(
            info.coordinate.label(),
            "Latitude: 38.892062, Longitude: -77.019912"
        );
    }

    #[test]
    fn chat_roles_serialize_lowercase() {
        let message = ChatMessage::new(ChatRole::Assistant, "hi");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"role": "assistant", "content": "hi"})
        );
    }
}
