//! Export tests for HTML format (Deck → HTML)
//!
//! These tests verify that decks are correctly converted to HTML by checking
//! the slide fragments and the document shell.

use insta::assert_snapshot;
use mdeck_core::format::Format;
use mdeck_core::formats::html::{render_slides, HtmlFormat, HtmlOptions};
use mdeck_core::{parse, render, DeckRules};
use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<section\b").unwrap());

/// Helper to render only the slide fragments
fn md_to_slides(md: &str) -> String {
    let rules = DeckRules::default();
    render_slides(&parse(md, &rules), &rules).unwrap()
}

/// Helper to render a full document with default options
fn md_to_html(md: &str) -> String {
    render(md, &DeckRules::default(), &HtmlOptions::default()).unwrap()
}

fn ranked_source(count: usize) -> String {
    let mut source = String::from("## Top crates\n");
    for n in 1..=count {
        source.push_str(&format!("- crate{n} — {n},000 downloads\n"));
    }
    source
}

// ============================================================================
// FRAGMENTS
// ============================================================================

#[test]
fn test_end_to_end_fragments() {
    let html =
        md_to_slides("# Title\nIntro text\n\n---\n\n## Stats\npackages: 100\nusers: 50\n");

    assert_snapshot!(html.trim_end(), @r#"
    <section class="slide slide-title" id="slide-1" data-slide="1" data-total="2">
    <div class="slide-body">
    <h1 class="slide-heading">Title</h1>
    <div class="divider"></div>
    <p class="slide-text">Intro text</p>
    </div>
    <div class="slide-counter">1 / 2</div>
    </section>
    <section class="slide slide-section slide-alt" id="slide-2" data-slide="2" data-total="2">
    <div class="slide-body">
    <h2 class="slide-heading">Stats</h2>
    <div class="stat-grid">
    <div class="stat-card"><div class="stat-value">100</div><div class="stat-label">packages</div></div>
    <div class="stat-card"><div class="stat-value">50</div><div class="stat-label">users</div></div>
    </div>
    </div>
    <div class="slide-counter">2 / 2</div>
    </section>
    "#);
}

#[test]
fn test_ranked_grid_fragment() {
    let html = md_to_slides("## Top\n- [serde](https://serde.rs) — 9,080,774 downloads\n");

    assert!(html.contains(
        "<li class=\"ranked-item\"><span class=\"rank\">1</span><span class=\"ranked-name\"><a href=\"https://serde.rs\">serde</a></span><span class=\"ranked-stats\"><strong>9,080,774</strong> downloads</span></li>"
    ));
}

#[test]
fn test_six_ranked_items_render_as_grid() {
    let html = md_to_slides(&ranked_source(6));

    assert!(html.contains("<ol class=\"ranked-list\">"));
    assert!(!html.contains("<ul class=\"bullet-list\">"));
}

#[test]
fn test_seventh_ranked_item_switches_to_bullets() {
    let html = md_to_slides(&ranked_source(7));

    assert!(!html.contains("<ol class=\"ranked-list\">"));
    assert!(html.contains("<ul class=\"bullet-list\">"));
    assert!(html.contains("<li><span class=\"item-label\">crate7</span> — 7,000 downloads</li>"));
}

#[test]
fn test_stat_percentage_split() {
    let html = md_to_slides("## Share\nlinux: 1,204 (61.5%)\n");

    assert!(html.contains(
        "<div class=\"stat-card\"><div class=\"stat-value\">1,204</div><div class=\"stat-percent\">61.5%</div><div class=\"stat-label\">linux</div></div>"
    ));
}

#[test]
fn test_script_in_code_is_escaped() {
    let html = md_to_slides("## XSS\n```html\n<script>alert('x')</script>\n```\n");

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_text_and_attributes_are_escaped() {
    let html = md_to_slides("## A <b> & \"c\"\n![x\"y](a.png?b=1&c=2)\n");

    assert!(html.contains("<h2 class=\"slide-heading\">A &lt;b&gt; &amp; &quot;c&quot;</h2>"));
    assert!(html.contains("src=\"a.png?b=1&amp;c=2\""));
    assert!(html.contains("alt=\"x&quot;y\""));
}

#[test]
fn test_warning_slide() {
    let html = md_to_slides("## Pop Quiz: lifetimes\nWhat does 'a mean?\n");

    assert!(html.contains("class=\"slide slide-section slide-warning\""));
}

#[test]
fn test_links_in_text_become_anchors() {
    let html = md_to_slides("Read [the book](https://doc.rust-lang.org/book/) today\n");

    assert!(html.contains(
        "<p class=\"slide-text\">Read <a href=\"https://doc.rust-lang.org/book/\">the book</a> today</p>"
    ));
}

#[test]
fn test_links_in_bullets_become_emphasis() {
    let html = md_to_slides("- see [docs](https://docs.rs)\n");

    assert!(html.contains("<li>see <strong>docs</strong></li>"));
    assert!(!html.contains("https://docs.rs"));
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[test]
fn test_document_shell_and_title() {
    let html = md_to_html("# Rust in Production\nwhy and how\n");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Rust in Production</title>"));
    assert!(html.contains("<main class=\"deck\">"));
    assert_eq!(SECTION_OPEN.find_iter(&html).count(), 1);
}

#[test]
fn test_rendering_is_deterministic() {
    let source = "# A\nb\n---\n## C\nd: 1\n- e — 2\n```terminal\n$ ls\n```\n";

    assert_eq!(md_to_html(source), md_to_html(source));
}

#[test]
fn test_format_trait_serialization() {
    let rules = DeckRules::default();
    let deck = parse("## One\ntext\n", &rules);
    let format = HtmlFormat::new(
        rules,
        HtmlOptions::default().with_reload_url("http://127.0.0.1:3000/__reload"),
    );

    let html = format.serialize(&deck).unwrap();
    assert!(html.contains("http://127.0.0.1:3000/__reload"));
    assert!(html.contains("setInterval"));
}
