//! HTML serialization (Deck → HTML export)
//!
//! Pipeline: Deck → SlideLayout (per slide) → slide fragments → document shell.
//!
//! Within a slide the content is grouped by category in a fixed order
//! (subtitles, stats, list, text, code, images) no matter how the blocks were
//! interleaved in the source. Every piece of source text goes through
//! [`escape`] before it reaches the output.

use crate::error::DeckError;
use crate::inline::Inline;
use crate::layout::{BulletItem, CodeView, ListLayout, RankedItem, SlideLayout, StatCard};
use crate::model::{Deck, Slide, SlideKind};
use crate::rules::DeckRules;
use std::fmt::Write as _;

const DECK_CSS: &str = include_str!("../../../assets/deck.css");
const DECK_JS: &str = include_str!("../../../assets/deck.js");
const RELOAD_JS: &str = include_str!("../../../assets/reload.js");
const RELOAD_URL_PLACEHOLDER: &str = "__MDECK_RELOAD_URL__";
const FALLBACK_TITLE: &str = "Slides";

/// Options for HTML serialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Document title; defaults to the first title slide's heading
    pub title: Option<String>,
    /// Optional custom CSS appended after the embedded stylesheet
    pub custom_css: Option<String>,
    /// Reload endpoint polled by the page when set (watch mode)
    pub reload_url: Option<String>,
}

impl HtmlOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    pub fn with_reload_url(mut self, url: impl Into<String>) -> Self {
        self.reload_url = Some(url.into());
        self
    }
}

/// The stylesheet embedded in every generated deck
pub fn get_default_css() -> &'static str {
    DECK_CSS
}

/// Serialize a deck to a complete HTML document
pub fn serialize_to_html(
    deck: &Deck,
    rules: &DeckRules,
    options: &HtmlOptions,
) -> Result<String, DeckError> {
    let title = options
        .title
        .as_deref()
        .or_else(|| deck.title())
        .unwrap_or(FALLBACK_TITLE);

    let slides_html = render_slides(deck, rules)?;
    wrap_in_document(&slides_html, title, options)
}

/// Render every slide fragment, in order, without the document shell
pub fn render_slides(deck: &Deck, rules: &DeckRules) -> Result<String, DeckError> {
    let total = deck.len();
    let mut out = String::new();
    for (index, slide) in deck.slides.iter().enumerate() {
        let layout = SlideLayout::select(slide, rules);
        render_slide(&mut out, slide, &layout, index, total, rules)?;
    }
    Ok(out)
}

fn render_slide(
    out: &mut String,
    slide: &Slide,
    layout: &SlideLayout<'_>,
    index: usize,
    total: usize,
    rules: &DeckRules,
) -> Result<(), DeckError> {
    let position = index + 1;
    writeln!(
        out,
        "<section class=\"{}\" id=\"slide-{position}\" data-slide=\"{position}\" data-total=\"{total}\">",
        slide_classes(slide.kind, layout, index)
    )
    .map_err(fmt_error)?;
    out.push_str("<div class=\"slide-body\">\n");

    if let Some(title) = &slide.title {
        let tag = match slide.kind {
            SlideKind::Title => "h1",
            _ => "h2",
        };
        writeln!(out, "<{tag} class=\"slide-heading\">{}</{tag}>", escape(title))
            .map_err(fmt_error)?;
    }
    if layout.style.divider {
        out.push_str("<div class=\"divider\"></div>\n");
    }

    for subtitle in &layout.subtitles {
        writeln!(out, "<h3 class=\"slide-subtitle\">{}</h3>", escape(subtitle))
            .map_err(fmt_error)?;
    }

    if !layout.stats.is_empty() {
        out.push_str("<div class=\"stat-grid\">\n");
        for stat in &layout.stats {
            render_stat(out, stat)?;
        }
        out.push_str("</div>\n");
    }

    match &layout.list {
        ListLayout::None => {}
        ListLayout::Ranked(items) => render_ranked(out, items)?,
        ListLayout::Bulleted(items) => render_bullets(out, items)?,
    }

    for text in &layout.texts {
        writeln!(out, "<p class=\"slide-text\">{}</p>", render_inlines(text)).map_err(fmt_error)?;
    }

    for code in &layout.code {
        render_code(out, code, rules)?;
    }

    for image in &layout.images {
        writeln!(
            out,
            "<figure class=\"slide-image\"><img src=\"{}\" alt=\"{}\"></figure>",
            escape(image.src),
            escape(image.alt)
        )
        .map_err(fmt_error)?;
    }

    out.push_str("</div>\n");
    writeln!(
        out,
        "<div class=\"slide-counter\">{position} / {total}</div>\n</section>"
    )
    .map_err(fmt_error)?;
    Ok(())
}

fn slide_classes(kind: SlideKind, layout: &SlideLayout<'_>, index: usize) -> String {
    let mut classes = vec![
        "slide",
        match kind {
            SlideKind::Title => "slide-title",
            SlideKind::Section => "slide-section",
            SlideKind::Content => "slide-content",
        },
    ];
    if index % 2 == 1 {
        classes.push("slide-alt");
    }
    if layout.style.warning {
        classes.push("slide-warning");
    }
    if layout.style.terminal {
        classes.push("slide-terminal");
    }
    classes.join(" ")
}

fn render_stat(out: &mut String, stat: &StatCard<'_>) -> Result<(), DeckError> {
    out.push_str("<div class=\"stat-card\">");
    write!(out, "<div class=\"stat-value\">{}</div>", escape(stat.value)).map_err(fmt_error)?;
    if let Some(percent) = stat.percent {
        write!(out, "<div class=\"stat-percent\">{}</div>", escape(percent)).map_err(fmt_error)?;
    }
    writeln!(out, "<div class=\"stat-label\">{}</div></div>", escape(stat.key))
        .map_err(fmt_error)
}

fn render_ranked(out: &mut String, items: &[RankedItem]) -> Result<(), DeckError> {
    out.push_str("<ol class=\"ranked-list\">\n");
    for (rank, item) in items.iter().enumerate() {
        writeln!(
            out,
            "<li class=\"ranked-item\"><span class=\"rank\">{}</span><span class=\"ranked-name\">{}</span><span class=\"ranked-stats\">{}</span></li>",
            rank + 1,
            render_inline(&item.name),
            render_inlines(&item.stats)
        )
        .map_err(fmt_error)?;
    }
    out.push_str("</ol>\n");
    Ok(())
}

fn render_bullets(out: &mut String, items: &[BulletItem]) -> Result<(), DeckError> {
    out.push_str("<ul class=\"bullet-list\">\n");
    for item in items {
        let written = match &item.label {
            Some(label) => writeln!(
                out,
                "<li><span class=\"item-label\">{}</span> — {}</li>",
                render_inlines(label),
                render_inlines(&item.body)
            ),
            None => writeln!(out, "<li>{}</li>", render_inlines(&item.body)),
        };
        written.map_err(fmt_error)?;
    }
    out.push_str("</ul>\n");
    Ok(())
}

fn render_code(out: &mut String, code: &CodeView<'_>, rules: &DeckRules) -> Result<(), DeckError> {
    let class = if code.terminal {
        "code-block terminal-output"
    } else {
        "code-block"
    };
    write!(out, "<pre class=\"{class}\"").map_err(fmt_error)?;
    if !code.language.is_empty() {
        write!(out, " data-language=\"{}\"", escape(code.language)).map_err(fmt_error)?;
    }
    out.push_str("><code>");

    if code.terminal {
        let body: Vec<String> = code
            .text
            .split('\n')
            .map(|line| {
                if !rules.terminal_prompt.is_empty() && line.starts_with(&rules.terminal_prompt) {
                    format!("<span class=\"prompt\">{}</span>", escape(line))
                } else {
                    escape(line)
                }
            })
            .collect();
        out.push_str(&body.join("\n"));
    } else {
        out.push_str(&escape(code.text));
    }

    out.push_str("</code></pre>\n");
    Ok(())
}

fn render_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(render_inline).collect()
}

fn render_inline(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => escape(text),
        Inline::Strong(text) => format!("<strong>{}</strong>", escape(text)),
        Inline::Link { text, href } => {
            format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
        }
    }
}

/// Escape the five HTML-sensitive characters: `& < > " '`
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

fn fmt_error(err: std::fmt::Error) -> DeckError {
    DeckError::SerializationError(format!("HTML formatting failed: {err}"))
}

/// Wrap the slide fragments in a complete HTML document with embedded assets
fn wrap_in_document(
    slides_html: &str,
    title: &str,
    options: &HtmlOptions,
) -> Result<String, DeckError> {
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = escape(title);
    let reload_script = match &options.reload_url {
        Some(url) => format!("<script>\n{}</script>\n", reload_script(url)?),
        None => String::new(),
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="mdeck">
  <title>{escaped_title}</title>
  <style>
{DECK_CSS}
{custom_css}
  </style>
</head>
<body>
<main class="deck">
{slides_html}</main>
<script>
{DECK_JS}</script>
{reload_script}</body>
</html>
"#
    );

    Ok(html)
}

/// The reload poller with its endpoint baked in as a JS string literal
fn reload_script(url: &str) -> Result<String, DeckError> {
    let literal = serde_json::to_string(url)
        .map_err(|e| DeckError::SerializationError(format!("invalid reload url: {e}")))?
        .replace("</", "<\\/");
    Ok(RELOAD_JS.replace(RELOAD_URL_PLACEHOLDER, &literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentBlock;
    use crate::parsing::parse;

    fn html_for(source: &str) -> String {
        let rules = DeckRules::default();
        let deck = parse(source, &rules);
        serialize_to_html(&deck, &rules, &HtmlOptions::default()).unwrap()
    }

    #[test]
    fn test_document_shell() {
        let html = html_for("# Hello\nworld\n");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<main class=\"deck\">"));
        assert!(html.contains(".stat-grid"));
        assert!(!html.contains("__reload"));
    }

    #[test]
    fn test_fallback_and_explicit_title() {
        let rules = DeckRules::default();
        let deck = parse("## Only a section\nbody\n", &rules);
        let html = serialize_to_html(&deck, &rules, &HtmlOptions::default()).unwrap();
        assert!(html.contains("<title>Slides</title>"));

        let options = HtmlOptions::default().with_title("Rust & Friends");
        let html = serialize_to_html(&deck, &rules, &options).unwrap();
        assert!(html.contains("<title>Rust &amp; Friends</title>"));
    }

    #[test]
    fn test_custom_css_appended() {
        let rules = DeckRules::default();
        let deck = parse("text\n", &rules);
        let options = HtmlOptions::default().with_custom_css(".my-custom-class { color: red; }");
        let html = serialize_to_html(&deck, &rules, &options).unwrap();
        assert!(html.contains(".my-custom-class { color: red; }"));
        assert!(html.contains(".stat-grid"));
    }

    #[test]
    fn test_reload_script_embeds_url() {
        let rules = DeckRules::default();
        let deck = parse("text\n", &rules);
        let options = HtmlOptions::default().with_reload_url("http://127.0.0.1:3000/__reload");
        let html = serialize_to_html(&deck, &rules, &options).unwrap();
        assert!(html.contains("\"http://127.0.0.1:3000/__reload\""));
        assert!(!html.contains(RELOAD_URL_PLACEHOLDER));
    }

    #[test]
    fn test_blocks_grouped_by_category() {
        let deck = Deck::new(vec![Slide {
            kind: SlideKind::Content,
            title: None,
            blocks: vec![
                ContentBlock::image("pic", "a.png"),
                ContentBlock::text("para"),
                ContentBlock::list_item("item"),
                ContentBlock::stat("users", "5"),
                ContentBlock::subtitle("sub"),
            ],
        }]);
        let html = render_slides(&deck, &DeckRules::default()).unwrap();

        let order: Vec<usize> = [
            "slide-subtitle",
            "stat-grid",
            "bullet-list",
            "slide-text",
            "slide-image",
        ]
        .iter()
        .map(|class| html.find(class).expect("class present"))
        .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_terminal_prompt_lines() {
        let html = html_for("```terminal\n$ cargo test\nrunning 3 tests\n```\n");
        assert!(html.contains("class=\"slide slide-content slide-terminal\""));
        assert!(html.contains("<pre class=\"code-block terminal-output\" data-language=\"terminal\"><code><span class=\"prompt\">$ cargo test</span>\nrunning 3 tests</code></pre>"));
    }

    #[test]
    fn test_alternating_backgrounds() {
        let html = html_for("a\n---\nb\n---\nc\n");
        assert!(html.contains("<section class=\"slide slide-content\" id=\"slide-1\""));
        assert!(html.contains("<section class=\"slide slide-content slide-alt\" id=\"slide-2\""));
        assert!(html.contains("<section class=\"slide slide-content\" id=\"slide-3\""));
    }

    #[test]
    fn test_escape_five_characters() {
        assert_eq!(escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
        assert!(!escape("it's").contains('\''));
    }
}
