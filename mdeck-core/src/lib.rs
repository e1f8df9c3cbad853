//! Markdown slide decks rendered to self-contained HTML
//!
//!     This crate turns a small, line-oriented markdown vocabulary into a slide deck: one HTML
//!     document with the stylesheet and navigation script embedded, ready to open from disk.
//!
//!     This is a pure lib, that is, it powers mdeck-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std printing, env vars etc. Logging goes
//!     through `tracing` and it is up to the binary to install a subscriber.
//!
//! Architecture
//!
//!     The pipeline is two stages with a typed model in between:
//!
//!         source text → classifier (per line) → parser → Deck → layout (per slide) → HTML
//!
//!     The parser only decides what each line *is*. How a slide *looks* (stat grid, ranked
//!     list, bullets, terminal styling) is decided later by the layout selector, so both sides
//!     can be tested in isolation against the same model.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # DeckError
//!     ├── model.rs                # Deck, Slide, ContentBlock
//!     ├── rules.rs                # DeckRules: the tunable heuristics
//!     ├── parsing
//!     │   ├── classifier.rs       # one line → ClassifiedLine
//!     │   └── parser.rs           # fold over lines → Deck
//!     ├── inline.rs               # links and number emphasis inside text
//!     ├── layout.rs               # Slide → SlideLayout
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # file in, file out
//!     └── formats
//!         ├── markdown            # parse only
//!         ├── html                # serialize only
//!         └── json                # model dump
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown
//!     └── html
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     Classification is a precedence table: inside a fence everything is code; outside, discard
//!     prefixes win over break markers, which win over headers, and so on down to plain text.
//!     No line is ever an error. See [`parsing::classifier`].
//!
//!     The parser is a fold over an explicit [`ParseState`]. A slide is kept only if it received
//!     at least one block, so a header followed directly by another header leaves nothing behind.
//!
//!     Layout is a partition of the slide's blocks by category plus a closed [`ListLayout`]
//!     choice, which keeps every rendering decision a pure function of one slide.

pub mod error;
pub mod format;
pub mod formats;
pub mod inline;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod publish;
pub mod registry;
pub mod rules;

pub use error::DeckError;
pub use format::Format;
pub use formats::{HtmlFormat, HtmlOptions, JsonFormat, MarkdownFormat};
pub use layout::{ListLayout, SlideLayout};
pub use model::{ContentBlock, Deck, Slide, SlideKind};
pub use parsing::ParseState;
pub use publish::{publish, publish_file, BuildReport, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
pub use rules::DeckRules;

/// Parses deck source with the given rules.
pub fn parse(source: &str, rules: &DeckRules) -> Deck {
    parsing::parse(source, rules)
}

/// Parses and renders in one call, returning the complete HTML document.
pub fn render(source: &str, rules: &DeckRules, options: &HtmlOptions) -> Result<String, DeckError> {
    let deck = parse(source, rules);
    formats::html::serialize_to_html(&deck, rules, options)
}
