//! HTML format implementation
//!
//! Export only: a [`Deck`] becomes one self-contained HTML5 document with the
//! stylesheet and navigation script embedded.
//!
//! # Slide Mapping Table
//!
//! | Deck element      | HTML                                                          |
//! |-------------------|---------------------------------------------------------------|
//! | Slide             | `<section class="slide slide-{kind}" data-slide data-total>`   |
//! | Title / section   | `<h1 class="slide-heading">` / `<h2 class="slide-heading">`   |
//! | Divider           | `<div class="divider">` (title slides with text)              |
//! | Subtitle          | `<h3 class="slide-subtitle">`                                 |
//! | Stats             | `<div class="stat-grid">` of `.stat-card`                     |
//! | Ranked list       | `<ol class="ranked-list">` of `.ranked-item`                  |
//! | Bulleted list     | `<ul class="bullet-list">`, label in `.item-label`            |
//! | Text              | `<p class="slide-text">`                                      |
//! | Code              | `<pre class="code-block" data-language>` `<code>`             |
//! | Terminal output   | adds `.terminal-output`, prompt lines in `<span class="prompt">` |
//! | Image             | `<figure class="slide-image">` `<img>`                        |
//!
//! # CSS Classes on the slide container
//!
//! - `.slide-title`, `.slide-section`, `.slide-content`: slide kind
//! - `.slide-alt`: every other slide, by position
//! - `.slide-warning`: title contains the alert phrase
//! - `.slide-terminal`: untitled slide showing terminal output
//!
//! # Options
//!
//! [`Format::serialize_with_options`] accepts:
//! - `title`: document title override
//! - `custom-css`: stylesheet text appended after the embedded one
//! - `reload-url`: endpoint for the live-reload poller

mod serializer;

use crate::error::DeckError;
use crate::format::Format;
use crate::model::Deck;
use crate::rules::DeckRules;
use std::collections::HashMap;

pub use serializer::{
    escape, get_default_css, render_slides, serialize_to_html, HtmlOptions,
};

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    rules: DeckRules,
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(rules: DeckRules, options: HtmlOptions) -> Self {
        Self { rules, options }
    }

    pub fn with_rules(rules: DeckRules) -> Self {
        Self::new(rules, HtmlOptions::default())
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 slide deck with embedded CSS and navigation"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, deck: &Deck) -> Result<String, DeckError> {
        serialize_to_html(deck, &self.rules, &self.options)
    }

    fn serialize_with_options(
        &self,
        deck: &Deck,
        options: &HashMap<String, String>,
    ) -> Result<String, DeckError> {
        let mut html_options = self.options.clone();
        for (key, value) in options {
            match key.as_str() {
                "title" => html_options.title = Some(value.clone()),
                "custom-css" => html_options.custom_css = Some(value.clone()),
                "reload-url" => html_options.reload_url = Some(value.clone()),
                other => {
                    return Err(DeckError::NotSupported(format!(
                        "Format 'html' does not support option '{other}'"
                    )))
                }
            }
        }
        serialize_to_html(deck, &self.rules, &html_options)
    }
}
