//! Selector engine: tokenizer, parser, matcher.

pub mod matcher;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use matcher::matches;
pub use model::SelectorList;
pub use parser::{parse_selector_list, ParseError};
