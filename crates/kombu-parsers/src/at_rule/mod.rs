//! At-rule prelude tokenization and stringification.

mod stringify;
mod token;
mod tokenize;

pub use stringify::stringify_at_rule;
pub use token::{AtRuleOperator, AtRuleToken, Delimiter};
pub use tokenize::tokenize_at_rule;
