//! Slide parser
//!
//! The parser is a fold over the document's lines. [`ParseState`] is the
//! whole machine: the slides retained so far, the slide currently open (if
//! any) and an independent open-fence buffer. Each line consumes a state and
//! yields the next one, so no mutable state is shared between calls.
//!
//! Retention rule: a slide is pushed to the output only if it holds at least
//! one block when its boundary is reached. A header followed directly by
//! another boundary disappears, title and all.

use super::classifier::{classify, ClassifiedLine};
use crate::model::{ContentBlock, Deck, Slide, SlideKind};
use crate::rules::DeckRules;
use tracing::debug;

/// Parse a document into its deck of retained slides.
pub fn parse(source: &str, rules: &DeckRules) -> Deck {
    let state = source
        .lines()
        .fold(ParseState::default(), |state, line| state.advance(line, rules));
    Deck::new(state.finish())
}

/// Lines collected between an opening and a closing fence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct OpenCode {
    language: String,
    lines: Vec<String>,
}

impl OpenCode {
    fn into_block(self) -> ContentBlock {
        ContentBlock::code(self.language, self.lines.join("\n"))
    }
}

/// Parser state threaded through the fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    slides: Vec<Slide>,
    current: Option<Slide>,
    code: Option<OpenCode>,
}

impl ParseState {
    /// Whether a code fence is open at this point.
    pub fn in_code_block(&self) -> bool {
        self.code.is_some()
    }

    /// Consume one line.
    pub fn advance(mut self, line: &str, rules: &DeckRules) -> Self {
        match classify(line, self.in_code_block(), rules) {
            ClassifiedLine::FenceOpen { language } => {
                self.code = Some(OpenCode {
                    language,
                    lines: Vec::new(),
                });
                self
            }
            ClassifiedLine::FenceClose => match self.code.take() {
                Some(code) => self.append(code.into_block()),
                None => self,
            },
            ClassifiedLine::Code(raw) => {
                if let Some(code) = self.code.as_mut() {
                    code.lines.push(raw);
                }
                self
            }
            ClassifiedLine::Discard | ClassifiedLine::Blank => self,
            ClassifiedLine::Break => {
                self.close_slide();
                self
            }
            ClassifiedLine::Title(title) => self.open_slide(Slide::titled(SlideKind::Title, title)),
            ClassifiedLine::Section(title) => {
                self.open_slide(Slide::titled(SlideKind::Section, title))
            }
            ClassifiedLine::Block(block) => self.append(block),
        }
    }

    /// Close out the input and return the retained slides.
    ///
    /// A fence still open at end of input is flushed as a code block rather
    /// than dropped.
    pub fn finish(mut self) -> Vec<Slide> {
        if let Some(code) = self.code.take() {
            debug!(language = %code.language, "unterminated code fence flushed at end of input");
            self = self.append(code.into_block());
        }
        self.close_slide();
        self.slides
    }

    fn open_slide(mut self, slide: Slide) -> Self {
        self.close_slide();
        self.current = Some(slide);
        self
    }

    fn append(mut self, block: ContentBlock) -> Self {
        self.current.get_or_insert_with(Slide::content).push(block);
        self
    }

    fn close_slide(&mut self) {
        if let Some(slide) = self.current.take() {
            if slide.blocks.is_empty() {
                debug!(kind = ?slide.kind, title = ?slide.title, "dropping slide without content");
            } else {
                self.slides.push(slide);
            }
        }
    }
}
