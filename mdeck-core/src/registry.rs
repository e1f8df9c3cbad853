//! Named deck formats
//!
//! The CLI never talks to a format type directly: `build` asks for
//! `"markdown"` then `"html"`, `inspect` for `"json"`, and `--list-formats`
//! prints whatever is registered here.

use crate::error::DeckError;
use crate::format::Format;
use crate::formats::{HtmlFormat, JsonFormat, MarkdownFormat};
use crate::model::Deck;
use crate::rules::DeckRules;
use std::collections::HashMap;

/// Deck formats keyed by name, all built from one [`DeckRules`].
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let deck = registry.parse(source, "markdown")?;
/// let html = registry.serialize(&deck, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Adds `format`, replacing any format already registered under its name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Looks up a format, failing with [`DeckError::FormatNotFound`].
    pub fn get(&self, name: &str) -> Result<&dyn Format, DeckError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| DeckError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in alphabetical order, as printed by `--list-formats`.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// `talk.md` → `markdown`, `talk.htm` → `html`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Reads a deck from `source`. Output-only formats are refused.
    pub fn parse(&self, source: &str, format: &str) -> Result<Deck, DeckError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(DeckError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, deck: &Deck, format: &str) -> Result<String, DeckError> {
        self.serialize_with_options(deck, format, &HashMap::new())
    }

    /// Renders `deck`, passing `options` (the CLI's `--extra-*` values) to the format.
    pub fn serialize_with_options(
        &self,
        deck: &Deck,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, DeckError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(DeckError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(deck, options)
    }

    /// Markdown in, HTML and JSON out, sharing `rules` between parsing and rendering.
    pub fn with_rules(rules: DeckRules) -> Self {
        let mut registry = Self::new();

        registry.register(MarkdownFormat::new(rules.clone()));
        registry.register(HtmlFormat::with_rules(rules));
        registry.register(JsonFormat);

        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_rules(DeckRules::default())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
