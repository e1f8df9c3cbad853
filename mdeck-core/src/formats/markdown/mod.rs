//! Markdown deck format (import only)
//!
//! This is not CommonMark. The deck source is a fixed, line-oriented
//! vocabulary handled by [`crate::parsing`]; this type only adapts that
//! parser to the [`Format`] interface.

use crate::error::DeckError;
use crate::format::Format;
use crate::model::Deck;
use crate::parsing::parse;
use crate::rules::DeckRules;

#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    rules: DeckRules,
}

impl MarkdownFormat {
    pub fn new(rules: DeckRules) -> Self {
        Self { rules }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Line-oriented markdown slide source"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Deck, DeckError> {
        Ok(parse(source, &self.rules))
    }
}
