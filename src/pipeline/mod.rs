//! Orchestration from map and chat interactions down to the geocoder and
//! the text generator.

pub mod conversation;
pub mod location;

pub use conversation::ConversationPipeline;
pub use location::LocationPipeline;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
pub(crate) mod fakes {
    use crate::error::{GenerationError, LookupError};
    use crate::gemini::LocationNarrator;
    use crate::geocoding::Geocoder;
    use crate::models::Coordinate;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Geocoder answering every lookup with the same outcome
    pub struct FixedGeocoder {
        pub address: Option<String>,
        pub calls: Mutex<Vec<Coordinate>>,
        /// Applied to every reverse lookup
        pub delay: Option<Duration>,
    }

    impl FixedGeocoder {
        pub fn resolving(address: &str) -> Self {
            Self {
                address: Some(address.to_string()),
                calls: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        pub fn failing() -> Self {
            Self {
                address: None,
                calls: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn forward_geocode(&self, _address: &str) -> Result<Coordinate, LookupError> {
            match self.address {
                Some(_) => Ok(Coordinate::new(48.8584, 2.2945)),
                None => Err(LookupError::Status("ZERO_RESULTS".into())),
            }
        }

        async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, LookupError> {
            self.calls.lock().unwrap().push(coordinate);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.address
                .clone()
                .ok_or_else(|| LookupError::Status("ZERO_RESULTS".into()))
        }
    }

    /// Narrator that records what it was asked and replies from a script
    pub struct ScriptedNarrator {
        pub answer: Result<String, GenerationError>,
        pub seen_addresses: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedNarrator {
        pub fn answering(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                seen_addresses: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: GenerationError) -> Self {
            Self {
                answer: Err(error),
                seen_addresses: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LocationNarrator for ScriptedNarrator {
        async fn describe_location(&self, coordinate: Coordinate, address: Option<&str>) -> String {
            self.seen_addresses
                .lock()
                .unwrap()
                .push(address.map(str::to_string));
            format!("About {},{}", coordinate.lat, coordinate.lng)
        }

        async fn answer_question(
            &self,
            _message: &str,
            _center: Coordinate,
            address: Option<&str>,
        ) -> Result<String, GenerationError> {
            self.seen_addresses
                .lock()
                .unwrap()
                .push(address.map(str::to_string));
            self.answer.clone()
        }
    }
}
