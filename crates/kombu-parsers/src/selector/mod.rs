//! CSS selector tokenization and stringification.

mod stringify;
mod token;
mod tokenize;

pub use stringify::stringify_selector;
pub use token::{AttributeOperator, CombinatorKind, SelectorToken};
pub use tokenize::tokenize_selector;
