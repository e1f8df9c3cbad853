//! The seam between a [`Deck`] and its text forms
//!
//! A deck has one source form (markdown) and several outputs (HTML, a JSON
//! dump of the model). Each is a [`Format`] that declares which direction it
//! handles; the other direction keeps the `NotSupported` default.

use crate::error::DeckError;
use crate::model::Deck;
use std::collections::HashMap;

/// A named text form of a deck.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, deck: &Deck) -> Result<String, DeckError> {
///         Ok(format!("{} slides", deck.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also the name accepted on the command line.
    fn name(&self) -> &str;

    /// Shown next to the name by `--list-formats`.
    fn description(&self) -> &str {
        ""
    }

    /// Extensions without the dot, e.g. `["md", "markdown"]`.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Builds a deck from source text.
    fn parse(&self, _source: &str) -> Result<Deck, DeckError> {
        Err(DeckError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _deck: &Deck) -> Result<String, DeckError> {
        Err(DeckError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Renders with named options such as `title` or `reload-url`.
    ///
    /// A format without options renders through [`Format::serialize`] and
    /// rejects any option it is given.
    fn serialize_with_options(
        &self,
        deck: &Deck,
        options: &HashMap<String, String>,
    ) -> Result<String, DeckError> {
        if options.is_empty() {
            self.serialize(deck)
        } else {
            Err(DeckError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
