//! Markdown format tests
//!
//! Tests for deck source → slide model import.

mod import;
