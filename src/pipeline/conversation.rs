//! Conversational query pipeline: free-form questions about the current map
//! view, answered by the text generator. The transcript lives in memory only.

use super::lock;
use crate::gemini::LocationNarrator;
use crate::geocoding::Geocoder;
use crate::models::{ChatMessage, ChatRole, Coordinate};
use crate::prompts::CHAT_APOLOGY;
use log::{debug, error};
use std::sync::{Arc, Mutex};

pub struct ConversationPipeline {
    geocoder: Arc<dyn Geocoder>,
    narrator: Arc<dyn LocationNarrator>,
    transcript: Mutex<Vec<ChatMessage>>,
}

impl ConversationPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, narrator: Arc<dyn LocationNarrator>) -> Self {
        Self {
            geocoder,
            narrator,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Handles one submitted message and returns the reply appended for it:
    /// an assistant answer, or a system apology when no answer was produced.
    /// Blank messages are ignored.
    pub async fn submit(&self, message: &str, center: Coordinate) -> Option<ChatMessage> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        self.append(ChatMessage::new(ChatRole::User, message));

        let address = match self.geocoder.reverse_geocode(center).await {
            Ok(address) => Some(address),
            Err(e) => {
                debug!("[chat] Could not get address for context: {}", e);
                None
            }
        };

        let reply = match self
            .narrator
            .answer_question(message, center, address.as_deref())
            .await
        {
            Ok(answer) => ChatMessage::new(ChatRole::Assistant, answer),
            Err(e) => {
                error!("[chat] Chat error: {}", e);
                ChatMessage::new(ChatRole::System, CHAT_APOLOGY)
            }
        };
        self.append(reply.clone());
        Some(reply)
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).clone()
    }

    fn append(&self, message: ChatMessage) {
        lock(&self.transcript).push(message);
    }
}
