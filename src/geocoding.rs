//! Address <-> coordinate lookups against the Google Geocoding API

use crate::error::LookupError;
use crate::models::Coordinate;
use async_trait::async_trait;
use log::warn;
use serde::Deserialize;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address to coordinate
    async fn forward_geocode(&self, address: &str) -> Result<Coordinate, LookupError>;

    /// Coordinate to formatted address
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, LookupError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinate,
}

/// Single-shot geocoder: one request per lookup, no retries
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn lookup(&self, field: &str, value: &str) -> Result<GeocodeResult, LookupError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url).query(&[(field, value)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

        if body.status != "OK" {
            warn!("[geocode] {} lookup failed: {}", field, body.status);
            return Err(LookupError::Status(body.status));
        }

        body.results.into_iter().next().ok_or(LookupError::NoResults)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn forward_geocode(&self, address: &str) -> Result<Coordinate, LookupError> {
        let result = self.lookup("address", address).await?;
        Ok(result.geometry.location)
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, LookupError> {
        let latlng = format!("{},{}", coordinate.lat, coordinate.lng);
        let result = self.lookup("latlng", &latlng).await?;
        Ok(result.formatted_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_body() -> serde_json::Value {
        json!({
            "status": "OK",
            "results": [{
                "formatted_address": "National Mall, Washington, DC, USA",
                "geometry": {"location": {"lat": 38.8899, "lng": -77.0091}}
            }]
        })
    }

    #[tokio::test]
    async fn reverse_geocode_returns_first_formatted_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("latlng", "38.8899,-77.0091"))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = GoogleGeocoder::new(server.uri(), Some("maps-key".into()));
        let address = geocoder
            .reverse_geocode(Coordinate::new(38.8899, -77.0091))
            .await
            .unwrap();
        assert_eq!(address, "National Mall, Washington, DC, USA");
    }

    #[tokio::test]
    async fn forward_geocode_returns_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "National Mall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let geocoder = GoogleGeocoder::new(server.uri(), None);
        let coordinate = geocoder.forward_geocode("National Mall").await.unwrap();
        assert_eq!(coordinate, Coordinate::new(38.8899, -77.0091));
    }

    #[tokio::test]
    async fn non_ok_status_is_a_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        let geocoder = GoogleGeocoder::new(server.uri(), None);
        let err = geocoder.forward_geocode("nowhere").await.unwrap_err();
        assert_eq!(err, LookupError::Status("ZERO_RESULTS".into()));
    }

    #[tokio::test]
    async fn ok_without_results_is_a_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
            .mount(&server)
            .await;

        let geocoder = GoogleGeocoder::new(server.uri(), None);
        let err = geocoder
            .reverse_geocode(Coordinate::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert_eq!(err, LookupError::NoResults);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let geocoder = GoogleGeocoder::new("http://127.0.0.1:1", None);
        let err = geocoder
            .reverse_geocode(Coordinate::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
