//! Import tests for the Markdown format (deck source → Deck)
//!
//! These tests verify that deck sources are turned into the right slides and
//! blocks, going through the registry the same way the CLI does.

use mdeck_core::{ContentBlock, Deck, DeckRules, FormatRegistry, SlideKind};

/// Helper to parse deck source through the default registry
fn md_to_deck(md: &str) -> Deck {
    FormatRegistry::default()
        .parse(md, "markdown")
        .expect("Should parse markdown")
}

#[test]
fn test_end_to_end_scenario() {
    let deck = md_to_deck("# Title\nIntro text\n\n---\n\n## Stats\npackages: 100\nusers: 50\n");

    assert_eq!(deck.len(), 2);
    assert_eq!(deck.slides[0].kind, SlideKind::Title);
    assert_eq!(deck.slides[0].blocks, vec![ContentBlock::text("Intro text")]);
    assert_eq!(deck.slides[1].kind, SlideKind::Section);
    assert_eq!(deck.slides[1].title.as_deref(), Some("Stats"));
    assert_eq!(
        deck.slides[1].blocks,
        vec![
            ContentBlock::stat("packages", "100"),
            ContentBlock::stat("users", "50"),
        ]
    );
}

#[test]
fn test_header_followed_by_header_leaves_no_slide() {
    let deck = md_to_deck("# Opening\n## Agenda\n- intro\n- demo\n");

    assert_eq!(deck.len(), 1);
    assert_eq!(deck.slides[0].title.as_deref(), Some("Agenda"));
    assert_eq!(deck.title(), None);
}

#[test]
fn test_slide_count_matches_boundaries_with_content() {
    let source = "\
# Intro
welcome

---
---

## Empty

## Filled
body
<hr>
trailing content
";
    let deck = md_to_deck(source);

    let kinds: Vec<SlideKind> = deck.slides.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SlideKind::Title, SlideKind::Section, SlideKind::Content]
    );
}

#[test]
fn test_fenced_markers_stay_code() {
    let source = "## Shell\n```bash\n# not a title\n- not an item\nkey: 42\n```\nafter\n";
    let deck = md_to_deck(source);

    assert_eq!(deck.len(), 1);
    assert_eq!(
        deck.slides[0].blocks,
        vec![
            ContentBlock::code("bash", "# not a title\n- not an item\nkey: 42"),
            ContentBlock::text("after"),
        ]
    );
}

#[test]
fn test_stat_heuristic_examples() {
    let deck = md_to_deck("Total packages: 9,080,774\npackages: 9,080,774\n");

    assert_eq!(
        deck.slides[0].blocks,
        vec![
            ContentBlock::text("Total packages: 9,080,774"),
            ContentBlock::stat("packages", "9,080,774"),
        ]
    );
}

#[test]
fn test_discard_lines_never_render() {
    let deck = md_to_deck("Presentation: 2024-05-01\nAlso share with the team\n## Real\ncontent\n");

    assert_eq!(deck.len(), 1);
    assert_eq!(deck.slides[0].blocks, vec![ContentBlock::text("content")]);
}

#[test]
fn test_images_and_subtitles() {
    let deck = md_to_deck("## Gallery\n### A picture\n![Ferris](img/ferris.png)\n");

    assert_eq!(
        deck.slides[0].blocks,
        vec![
            ContentBlock::subtitle("A picture"),
            ContentBlock::image("Ferris", "img/ferris.png"),
        ]
    );
}

#[test]
fn test_custom_rules_through_registry() {
    let rules = DeckRules {
        discard_prefixes: vec!["Speaker notes:".to_string()],
        ..DeckRules::default()
    };
    let registry = FormatRegistry::with_rules(rules);
    let deck = registry
        .parse("Speaker notes: slow down\nPresentation: 1\n", "markdown")
        .unwrap();

    assert_eq!(
        deck.slides[0].blocks,
        vec![ContentBlock::stat("Presentation", "1")]
    );
}

#[test]
fn test_json_dump_of_parsed_model() {
    let registry = FormatRegistry::default();
    let deck = registry.parse("## Stats\nusers: 50\n", "markdown").unwrap();
    let json = registry.serialize(&deck, "json").unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["slides"][0]["kind"], "section");
    assert_eq!(value["slides"][0]["blocks"][0]["type"], "stat");
    assert_eq!(value["slides"][0]["blocks"][0]["value"], "50");
}
