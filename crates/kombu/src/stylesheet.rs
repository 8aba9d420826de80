//! Stylesheet accumulator.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::{parse_selector, SelectorBuilder, SharedRoot};
use crate::css::CssRoot;
use crate::error::Result;

/// The explicit accumulator behind a set of builder chains.
///
/// Every builder started from one `StyleSheet` writes into the same
/// shared [`CssRoot`]; the sheet owns the handle and renders or resets
/// it. Cloning a `StyleSheet` clones the handle, not the tree.
///
/// # Example
///
/// ```
/// use kombu::StyleSheet;
///
/// let sheet = StyleSheet::new();
/// sheet.select("body")?.style([("margin", "0")]);
/// sheet.select(".card")?.hover().style([("box-shadow", "none")]);
///
/// let css = sheet.build();
/// assert!(css.contains("body {"));
/// assert!(css.contains(".card:hover {"));
/// # Ok::<(), kombu::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    root: SharedRoot,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder chain for a selector.
    ///
    /// The selector is tokenized and normalized; selector lists
    /// (`".a, .b"`) are accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) when the selector is empty or
    /// fails to tokenize.
    pub fn select(&self, selector: &str) -> Result<SelectorBuilder> {
        let tokens = parse_selector(selector)?;
        Ok(SelectorBuilder::new(self.root.clone(), tokens))
    }

    /// Render the accumulated rule tree as formatted CSS.
    ///
    /// An empty sheet renders to the empty string.
    pub fn build(&self) -> String {
        self.root.lock().to_string()
    }

    /// Remove every rule, keeping builder handles valid.
    pub fn clear(&self) {
        self.root.lock().clear();
    }

    /// Number of top-level nodes (rules and at-rule blocks).
    pub fn len(&self) -> usize {
        self.root.lock().len()
    }

    /// Check whether the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.root.lock().is_empty()
    }

    /// The shared rule tree, for advanced usage.
    pub fn root(&self) -> Arc<Mutex<CssRoot>> {
        self.root.clone()
    }
}
