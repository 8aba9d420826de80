//! CSS token parsing and re-serialization for Kombu.
//!
//! This crate provides two small, independent, hand-written lexers with
//! their matching stringifiers:
//!
//! - **Selectors**: `div.card:hover > span` and friends, tokenized into
//!   typed tokens (type, class, id, attribute, pseudo, combinator, comma)
//!   and re-serialized with normalized combinator spacing.
//! - **At-rule preludes**: the text between an at-keyword and its block,
//!   e.g. `screen and (min-width: 768px)` in a `@media` rule, tokenized
//!   into identifiers, functions, numbers, dimensions, operators and
//!   delimiters, and re-serialized by space-joining token contents.
//!
//! Both pipelines are pure functions over strings: no shared state, no
//! I/O, safe to call from any thread.
//!
//! # Example
//!
//! ```
//! use kombu_parsers::{tokenize_at_rule, stringify_at_rule};
//!
//! let tokens = tokenize_at_rule("@media   screen and (min-width: 768px)");
//! assert_eq!(stringify_at_rule(&tokens), "@media screen and ( min-width : 768px )");
//! ```

pub mod at_rule;
pub mod selector;

mod error;

pub use error::{ParseError, Result};

pub use at_rule::{stringify_at_rule, tokenize_at_rule, AtRuleOperator, AtRuleToken, Delimiter};
pub use selector::{
    stringify_selector, tokenize_selector, AttributeOperator, CombinatorKind, SelectorToken,
};
