//! HTML format tests
//!
//! Fragment snapshots plus structural checks against a real HTML5 parser.

mod export;
mod structure;
