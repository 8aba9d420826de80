//! Error types for the authoring DSL.

use kombu_parsers::ParseError;

/// Result type alias for DSL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while authoring styles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A selector handed to the DSL failed to tokenize.
    #[error("invalid selector '{selector}': {source}")]
    Selector {
        selector: String,
        #[source]
        source: ParseError,
    },

    /// A selector was empty or all whitespace.
    #[error("selector must not be empty")]
    EmptySelector,
}

impl Error {
    /// Wrap a tokenizer error with the offending selector text.
    pub fn selector(selector: impl Into<String>, source: ParseError) -> Self {
        Self::Selector {
            selector: selector.into(),
            source,
        }
    }
}
