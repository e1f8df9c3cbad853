//! Line classification
//!
//! Maps one source line, plus whether a code fence is currently open, to its
//! semantic kind. The rules are checked in a fixed precedence order and the
//! first match wins:
//!
//! | # | Rule                                   | Result                       |
//! |---|----------------------------------------|------------------------------|
//! | 1 | starts with three backticks            | `FenceOpen` / `FenceClose`   |
//! | 2 | inside an open fence                   | `Code` (raw, uninterpreted)  |
//! | 3 | starts with a discard prefix           | `Discard`                    |
//! | 4 | `---` or `<hr>`                        | `Break`                      |
//! | 5 | `# ` / `## `                           | `Title` / `Section`          |
//! | 6 | `### `                                 | subtitle block               |
//! | 7 | `- `                                   | list item block              |
//! | 8 | `key: value` with a digit in the value | stat block                   |
//! | 9 | `![alt](src)`                          | image block                  |
//! |10 | anything else non-blank                | text block                   |
//! |11 | blank                                  | `Blank`                      |
//!
//! Ambiguity never produces an error: when a line could be read more than one
//! way the earlier, more specific rule wins, and anything left over is text.

use crate::model::ContentBlock;
use crate::rules::DeckRules;
use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]*)\)$").expect("valid image regex"));

static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid url scheme regex"));

/// The semantic kind of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Opening fence, carrying the language token (possibly empty)
    FenceOpen { language: String },
    /// Closing fence
    FenceClose,
    /// A raw line inside an open fence
    Code(String),
    /// Metadata line that never becomes content
    Discard,
    /// Explicit slide break
    Break,
    /// `# ` header
    Title(String),
    /// `## ` header
    Section(String),
    /// Body content for the current slide
    Block(ContentBlock),
    Blank,
}

/// Classify a single line.
///
/// `in_code_block` must reflect whether a fence was left open by the previous
/// lines; the classifier itself holds no state.
pub fn classify(line: &str, in_code_block: bool, rules: &DeckRules) -> ClassifiedLine {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix(FENCE) {
        return if in_code_block {
            ClassifiedLine::FenceClose
        } else {
            let language = rest.split_whitespace().next().unwrap_or("");
            ClassifiedLine::FenceOpen {
                language: language.to_string(),
            }
        };
    }

    if in_code_block {
        return ClassifiedLine::Code(line.to_string());
    }

    if rules
        .discard_prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && trimmed.starts_with(prefix.as_str()))
    {
        return ClassifiedLine::Discard;
    }

    if is_break(trimmed) {
        return ClassifiedLine::Break;
    }

    if let Some(title) = trimmed.strip_prefix("# ") {
        return ClassifiedLine::Title(title.trim().to_string());
    }
    if let Some(title) = trimmed.strip_prefix("## ") {
        return ClassifiedLine::Section(title.trim().to_string());
    }
    if let Some(subtitle) = trimmed.strip_prefix("### ") {
        return ClassifiedLine::Block(ContentBlock::subtitle(subtitle.trim()));
    }
    if let Some(item) = trimmed.strip_prefix("- ") {
        return ClassifiedLine::Block(ContentBlock::list_item(item.trim()));
    }

    if let Some(stat) = classify_stat(trimmed) {
        return ClassifiedLine::Block(stat);
    }

    if let Some(caps) = IMAGE.captures(trimmed) {
        return ClassifiedLine::Block(ContentBlock::image(&caps[1], caps[2].trim()));
    }

    if trimmed.is_empty() {
        ClassifiedLine::Blank
    } else {
        ClassifiedLine::Block(ContentBlock::text(trimmed))
    }
}

fn is_break(trimmed: &str) -> bool {
    matches!(trimmed, "---" | "<hr>" | "<hr/>" | "<hr />")
}

/// `key: value` where the key is a single word and the value carries a number.
fn classify_stat(trimmed: &str) -> Option<ContentBlock> {
    if looks_like_url(trimmed) {
        return None;
    }

    let (key, rest) = trimmed.split_once(':')?;
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return None;
    }

    let value = rest.trim();
    if value.is_empty() || !value.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(ContentBlock::stat(key, value))
}

/// A scheme at the start of the line, or a first colon that opens `://`.
fn looks_like_url(trimmed: &str) -> bool {
    URL_SCHEME.is_match(trimmed)
        || trimmed
            .split_once(':')
            .is_some_and(|(_, rest)| rest.starts_with("//"))
}
