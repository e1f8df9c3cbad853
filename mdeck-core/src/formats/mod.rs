//! Format implementations
//!
//! This module contains the formats a deck can be read from or written to.

pub mod html;
pub mod json;
pub mod markdown;

pub use html::{get_default_css, HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
