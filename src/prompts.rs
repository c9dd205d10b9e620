//! Prompt templates and fixed user-facing texts for AI interactions

use crate::models::Coordinate;

/// Shown when the model answered but the answer has no extractable text
pub const DESCRIPTION_UNAVAILABLE: &str = "Unable to retrieve information about this location.";

/// Shown when the description request itself failed
pub const DESCRIPTION_ERROR: &str = "Error retrieving information. Please try again later.";

/// Transcript entry appended when a chat answer could not be produced
pub const CHAT_APOLOGY: &str = "Sorry, I couldn't process your request. Please try again.";

/// Greeting displayed by the chat widget; not part of the transcript
pub const CHAT_GREETING: &str = "Ask me about any location on the map!";

/// Default title offered when saving a location that could not be geocoded
pub const UNNAMED_LOCATION: &str = "Unnamed Location";

/// Prompt asking for a short multi-paragraph description of a location
pub fn describe_location_prompt(coordinate: Coordinate, address: Option<&str>) -> String {
    let mut prompt = format!(
        "Provide a brief but informative description (2-3 paragraphs) about the location at latitude: {}, longitude: {}.",
        coordinate.lat, coordinate.lng
    );

    if let Some(address) = address {
        prompt.push_str(&format!(" The address is: {}.", address));
    }

    prompt.push_str(
        " Include notable landmarks, historical significance, cultural relevance, or interesting facts if applicable. Also briefly mention the current typical weather conditions for this time of year.",
    );
    prompt
}

/// Prompt answering a free-form question about the current map view
pub fn chat_prompt(message: &str, center: Coordinate, address: Option<&str>) -> String {
    let address_line = address
        .map(|a| format!("- Address: {}\n", a))
        .unwrap_or_default();

    format!(
        r#"You are a helpful location assistant for GeoExplorer AI.

The user is currently looking at a map centered at:
- Latitude: {lat}
- Longitude: {lng}
{address_line}
The user's question is: {message}

Provide a helpful, informative response about this location relevant to their question.
Include geographical, historical, or cultural information that would be useful.
Keep your response concise but informative (2-3 paragraphs maximum)."#,
        lat = center.lat,
        lng = center.lng,
        address_line = address_line,
        message = message,
    )
}

/// Default save title derived from a formatted address: its first segment
pub fn title_from_address(address: &str) -> String {
    let first = address.split(',').next().unwrap_or_default().trim();
    if first.is_empty() {
        UNNAMED_LOCATION.to_string()
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_prompt_mentions_address_only_when_known() {
        let coordinate = Coordinate::new(48.8584, 2.2945);
        let with = describe_location_prompt(coordinate, Some("Champ de Mars, Paris"));
        let without = describe_location_prompt(coordinate, None);

        assert!(with.contains("latitude: 48.8584, longitude: 2.2945"));
        assert!(with.contains("The address is: Champ de Mars, Paris."));
        assert!(!without.contains("The address is"));
        assert!(without.contains("weather"));
    }

    #[test]
    fn chat_prompt_embeds_question_and_center() {
        let prompt = chat_prompt("Where can I eat?", Coordinate::new(1.5, -2.25), None);
        assert!(prompt.contains("- Latitude: 1.5"));
        assert!(prompt.contains("- Longitude: -2.25"));
        assert!(prompt.contains("The user's question is: Where can I eat?"));
        assert!(!prompt.contains("Address:"));

        let prompt = chat_prompt("Hi", Coordinate::new(0.0, 0.0), Some("Main St"));
        assert!(prompt.contains("- Address: Main St"));
    }

    #[test]
    fn title_is_first_address_segment() {
        assert_eq!(
            title_from_address("1600 Pennsylvania Ave NW, Washington, DC 20500, USA"),
            "1600 Pennsylvania Ave NW"
        );
        assert_eq!(title_from_address("Lonely Island"), "Lonely Island");
        assert_eq!(title_from_address(""), UNNAMED_LOCATION);
    }
}
