//! Layout selection
//!
//! Decides how one slide's blocks are presented. Blocks are partitioned by
//! category (each category keeps its relative order) and each category picks
//! its presentation:
//!
//! - stats always render as a card grid; a `value (12.5%)` splits into a main
//!   value and a percentage.
//! - list items render as a ranked grid when every item looks like
//!   `name — metric` (an em-dash plus a digit) and the list is short enough,
//!   otherwise as a bulleted list. See [`ListLayout`].
//! - the slide as a whole gets style flags: title, divider, warning, terminal.
//!
//! Background alternation is positional and belongs to the renderer.

use crate::inline::{emphasize_numbers, links_as_anchors, links_as_strong, whole_link, Inline};
use crate::model::{ContentBlock, Slide, SlideKind};
use crate::rules::DeckRules;

const EM_DASH: char = '—';

/// Whole-slide styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideStyle {
    pub title: bool,
    /// Title slide with body text gets a divider under the heading
    pub divider: bool,
    pub warning: bool,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub percent: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItem {
    /// Hyperlink when the name is a markdown link, emphasized text otherwise
    pub name: Inline,
    pub stats: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletItem {
    pub label: Option<Vec<Inline>>,
    pub body: Vec<Inline>,
}

/// Presentation strategy for a slide's list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLayout {
    None,
    Ranked(Vec<RankedItem>),
    Bulleted(Vec<BulletItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeView<'a> {
    pub language: &'a str,
    pub text: &'a str,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub alt: &'a str,
    pub src: &'a str,
}

/// The layout decision for one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout<'a> {
    pub style: SlideStyle,
    pub subtitles: Vec<&'a str>,
    pub stats: Vec<StatCard<'a>>,
    pub list: ListLayout,
    pub texts: Vec<Vec<Inline>>,
    pub code: Vec<CodeView<'a>>,
    pub images: Vec<ImageRef<'a>>,
}

impl<'a> SlideLayout<'a> {
    pub fn select(slide: &'a Slide, rules: &DeckRules) -> Self {
        let mut subtitles = Vec::new();
        let mut stats = Vec::new();
        let mut items = Vec::new();
        let mut texts = Vec::new();
        let mut code = Vec::new();
        let mut images = Vec::new();

        for block in &slide.blocks {
            match block {
                ContentBlock::Subtitle { text } => subtitles.push(text.as_str()),
                ContentBlock::ListItem { text } => items.push(text.as_str()),
                ContentBlock::Stat { key, value } => stats.push(stat_card(key, value)),
                ContentBlock::Image { alt, src } => images.push(ImageRef { alt, src }),
                ContentBlock::Code { language, text } => code.push(CodeView {
                    language,
                    text,
                    terminal: *language == rules.terminal_language,
                }),
                ContentBlock::Text { text } => texts.push(links_as_anchors(text)),
            }
        }

        let title = slide.kind == SlideKind::Title;
        let style = SlideStyle {
            title,
            divider: title && !texts.is_empty(),
            warning: is_alert(slide.title.as_deref(), &rules.alert_phrase),
            terminal: slide.title.is_none() && code.iter().any(|view| view.terminal),
        };

        Self {
            style,
            subtitles,
            stats,
            list: ListLayout::select(&items, rules.ranked_list_max_items),
            texts,
            code,
            images,
        }
    }
}

impl ListLayout {
    /// Ranked grid when every item is `name — metric` and the list is short.
    pub fn select(items: &[&str], max_ranked: usize) -> Self {
        if items.is_empty() {
            ListLayout::None
        } else if items.len() <= max_ranked && items.iter().all(|item| is_ranked(item)) {
            ListLayout::Ranked(items.iter().map(|item| ranked_item(item)).collect())
        } else {
            ListLayout::Bulleted(items.iter().map(|item| bullet_item(item)).collect())
        }
    }
}

fn is_alert(title: Option<&str>, phrase: &str) -> bool {
    match title {
        Some(title) if !phrase.is_empty() => title.to_lowercase().contains(&phrase.to_lowercase()),
        _ => false,
    }
}

fn is_ranked(item: &str) -> bool {
    item.contains(EM_DASH) && item.chars().any(|c| c.is_ascii_digit())
}

fn ranked_item(item: &str) -> RankedItem {
    let (name, stats) = item.split_once(EM_DASH).unwrap_or((item, ""));
    let name = name.trim();
    let name = match whole_link(name) {
        Some((text, href)) => Inline::Link { text, href },
        None => Inline::strong(name),
    };
    RankedItem {
        name,
        stats: emphasize_numbers(stats.trim()),
    }
}

fn bullet_item(item: &str) -> BulletItem {
    match item.split_once(EM_DASH) {
        Some((label, body)) if !label.trim().is_empty() => BulletItem {
            label: Some(links_as_strong(label.trim())),
            body: links_as_strong(body.trim()),
        },
        _ => BulletItem {
            label: None,
            body: links_as_strong(item),
        },
    }
}

fn stat_card<'a>(key: &'a str, value: &'a str) -> StatCard<'a> {
    let (value, percent) = split_percent(value);
    StatCard {
        key,
        value,
        percent,
    }
}

/// `9,080,774 (45.2%)` → (`9,080,774`, `45.2%`)
///
/// Only a trailing `(…%)` group is split off; the last `(` before it opens
/// the percentage.
fn split_percent(value: &str) -> (&str, Option<&str>) {
    let trimmed = value.trim_end();
    if let Some(body) = trimmed.strip_suffix("%)") {
        if let Some(open) = body.rfind('(') {
            let main = trimmed[..open].trim();
            if !main.is_empty() {
                return (main, Some(&trimmed[open + 1..trimmed.len() - 1]));
            }
        }
    }
    (value, None)
}
