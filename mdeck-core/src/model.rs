//! Slide object model
//!
//! A [`Deck`] is the ordered list of retained slides produced by one parse.
//! Nothing here outlives a generation run: the model is rebuilt from scratch
//! every time the source changes.

use serde::{Deserialize, Serialize};

/// The parsed presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Title of the first `# ` slide, used as the document title.
    pub fn title(&self) -> Option<&str> {
        self.slides
            .iter()
            .find(|slide| slide.kind == SlideKind::Title)
            .and_then(|slide| slide.title.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Opened by a level-1 header
    Title,
    /// Opened by a level-2 header
    Section,
    /// Opened lazily by body content with no header in front of it
    Content,
}

/// One screen of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub kind: SlideKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub blocks: Vec<ContentBlock>,
}

impl Slide {
    pub fn titled(kind: SlideKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: Some(title.into()),
            blocks: Vec::new(),
        }
    }

    /// A headerless slide, opened when content shows up with no slide open.
    pub fn content() -> Self {
        Self {
            kind: SlideKind::Content,
            title: None,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }
}

/// One typed unit of body content. Insertion order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    Subtitle { text: String },
    ListItem { text: String },
    Stat { key: String, value: String },
    Image { alt: String, src: String },
    Code { language: String, text: String },
    Text { text: String },
}

impl ContentBlock {
    pub fn subtitle(text: impl Into<String>) -> Self {
        ContentBlock::Subtitle { text: text.into() }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        ContentBlock::ListItem { text: text.into() }
    }

    pub fn stat(key: impl Into<String>, value: impl Into<String>) -> Self {
        ContentBlock::Stat {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        ContentBlock::Image {
            alt: alt.into(),
            src: src.into(),
        }
    }

    pub fn code(language: impl Into<String>, text: impl Into<String>) -> Self {
        ContentBlock::Code {
            language: language.into(),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}
