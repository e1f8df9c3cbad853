//! JSON dump of the parsed slide model, for inspecting what the parser saw.

use crate::error::DeckError;
use crate::format::Format;
use crate::model::Deck;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Parsed slide model as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, deck: &Deck) -> Result<String, DeckError> {
        serde_json::to_string_pretty(deck)
            .map_err(|e| DeckError::SerializationError(format!("JSON serialization failed: {e}")))
    }
}
