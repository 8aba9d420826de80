//! CSS rule tree and serialization.

mod declaration;
mod root;

pub use declaration::Declaration;
pub use root::{AtRule, CssNode, CssRoot, Rule};
