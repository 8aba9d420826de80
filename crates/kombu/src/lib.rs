//! Fluent CSS authoring for Rust.
//!
//! Kombu turns chained selector/style declarations into plain CSS:
//!
//! - **Selection**: `sheet.select(".button")?` starts a chain; pseudo
//!   adapters (`hover`, `focus`, ...), navigation (`child`,
//!   `descendant`, ...), grouping (`and`) and at-rule scoping
//!   (`media`) refine it.
//! - **Styling**: `.style([...])` materializes the chain into a shared
//!   CSS rule tree.
//! - **Building**: `sheet.build()` renders the accumulated tree as
//!   formatted CSS.
//!
//! Selectors and at-rule preludes are validated and normalized through
//! the hand-written tokenizers in [`kombu_parsers`] before they touch
//! the rule tree, so `div>p` and `div  >  p` land in the same rule.
//!
//! # Example
//!
//! ```
//! use kombu::StyleSheet;
//!
//! let sheet = StyleSheet::new();
//! sheet
//!     .select(".button")?
//!     .hover()
//!     .style([("background-color", "lightgray")]);
//!
//! assert_eq!(
//!     sheet.build(),
//!     ".button:hover {\n    background-color: lightgray;\n}"
//! );
//! # Ok::<(), kombu::Error>(())
//! ```

pub mod builder;
pub mod css;
pub mod stylesheet;

mod error;

pub use error::{Error, Result};

pub use builder::SelectorBuilder;
pub use css::{AtRule, CssNode, CssRoot, Declaration, Rule};
pub use stylesheet::StyleSheet;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::builder::SelectorBuilder;
    pub use crate::css::{AtRule, CssNode, CssRoot, Declaration, Rule};
    pub use crate::stylesheet::StyleSheet;
    pub use crate::{Error, Result};
}
