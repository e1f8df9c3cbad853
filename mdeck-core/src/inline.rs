//! Inline segments for rendered text.
//!
//! The only inline syntax the deck understands is the markdown link
//! `[text](href)`. Depending on where the text ends up, a link is either kept
//! as an anchor or flattened to emphasized text. Numbers inside ranked-list
//! stats are pulled out for emphasis as well.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex"));

static WHOLE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\]\(([^)\s]+)\)$").expect("valid link regex"));

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:,\d{3})*").expect("valid number regex"));

/// A run of inline content. Text is stored raw; escaping happens at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Link { text: String, href: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Inline::Strong(text.into())
    }
}

/// If `text` is exactly one markdown link, return its display text and href.
pub fn whole_link(text: &str) -> Option<(String, String)> {
    WHOLE_LINK
        .captures(text.trim())
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Split text into plain runs and anchors.
pub fn links_as_anchors(text: &str) -> Vec<Inline> {
    split_links(text, |label, href| Inline::Link {
        text: label.to_string(),
        href: href.to_string(),
    })
}

/// Split text into plain runs and emphasized link labels; hrefs are dropped.
pub fn links_as_strong(text: &str) -> Vec<Inline> {
    split_links(text, |label, _| Inline::strong(label))
}

/// Wrap every number (digits with optional thousands separators) for emphasis.
pub fn emphasize_numbers(text: &str) -> Vec<Inline> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in NUMBER.find_iter(text) {
        if m.start() > last {
            segments.push(Inline::text(&text[last..m.start()]));
        }
        segments.push(Inline::strong(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Inline::text(&text[last..]));
    }
    segments
}

fn split_links(text: &str, link: impl Fn(&str, &str) -> Inline) -> Vec<Inline> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in LINK.captures_iter(text) {
        let whole = caps.get(0).expect("capture 0 always present");
        if whole.start() > last {
            segments.push(Inline::text(&text[last..whole.start()]));
        }
        segments.push(link(&caps[1], &caps[2]));
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Inline::text(&text[last..]));
    }
    segments
}
