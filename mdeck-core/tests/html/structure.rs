//! Structural checks on generated documents
//!
//! The generated document is parsed back with html5ever, so these tests see
//! exactly the element tree a browser would build.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use mdeck_core::formats::html::HtmlOptions;
use mdeck_core::{render, DeckRules};

fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

fn collect_elements(handle: &Handle, name: &str, found: &mut Vec<Handle>) {
    if let NodeData::Element { name: qual, .. } = &handle.data {
        if &*qual.local == name {
            found.push(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        collect_elements(child, name, found);
    }
}

fn elements(dom: &RcDom, name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(&dom.document, name, &mut found);
    found
}

fn attr(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        out.push_str(&text_content(child));
    }
    out
}

fn render_default(source: &str) -> String {
    render(source, &DeckRules::default(), &HtmlOptions::default()).unwrap()
}

#[test]
fn test_one_section_per_slide_with_counters() {
    let html = render_default("# One\na\n---\n## Two\nb\n---\nc\n");
    let dom = parse_html(&html);

    let sections = elements(&dom, "section");
    assert_eq!(sections.len(), 3);
    for (index, section) in sections.iter().enumerate() {
        assert_eq!(attr(section, "data-slide"), Some((index + 1).to_string()));
        assert_eq!(attr(section, "data-total"), Some("3".to_string()));
    }
}

#[test]
fn test_code_survives_escaping_as_text() {
    let html = render_default("```html\n<script>alert(\"hi\")</script>\n```\n");
    let dom = parse_html(&html);

    let code = elements(&dom, "code");
    assert_eq!(code.len(), 1);
    assert_eq!(text_content(&code[0]), "<script>alert(\"hi\")</script>");

    // only the navigation script, no live reload and nothing from the slide
    assert_eq!(elements(&dom, "script").len(), 1);
}

#[test]
fn test_reload_script_present_only_when_configured() {
    let options = HtmlOptions::default().with_reload_url("http://localhost:3000/__reload");
    let html = render("text\n", &DeckRules::default(), &options).unwrap();
    let dom = parse_html(&html);

    assert_eq!(elements(&dom, "script").len(), 2);
}

#[test]
fn test_document_title_and_style() {
    let html = render_default("# Tom & Jerry\nchase\n");
    let dom = parse_html(&html);

    let titles = elements(&dom, "title");
    assert_eq!(text_content(&titles[0]), "Tom & Jerry");
    assert_eq!(elements(&dom, "style").len(), 1);
}
