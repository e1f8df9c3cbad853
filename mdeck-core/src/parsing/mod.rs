//! Source parsing: line classification and the slide state machine

pub mod classifier;
pub mod parser;

pub use classifier::{classify, ClassifiedLine};
pub use parser::{parse, ParseState};
