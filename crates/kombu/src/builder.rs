//! Fluent selector/style builder.
//!
//! Builders chain by value: every step consumes the builder and
//! returns a new one carrying the updated context, while all builders
//! created from one [`StyleSheet`](crate::StyleSheet) write into the
//! same shared rule tree. The shared-mutation contract is explicit: a
//! builder holds an `Arc<Mutex<CssRoot>>` handle, nothing more.

use std::sync::Arc;

use parking_lot::Mutex;

use kombu_parsers::{
    stringify_at_rule, stringify_selector, tokenize_at_rule, tokenize_selector, CombinatorKind,
    SelectorToken,
};

use crate::css::{CssRoot, Declaration};
use crate::error::{Error, Result};

/// Handle to the rule tree shared by every builder of one stylesheet.
pub(crate) type SharedRoot = Arc<Mutex<CssRoot>>;

/// Tokenize a selector handed to the DSL, rejecting empty input.
pub(crate) fn parse_selector(selector: &str) -> Result<Vec<SelectorToken>> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptySelector);
    }
    tokenize_selector(trimmed).map_err(|e| Error::selector(trimmed, e))
}

/// At-rule scope a chain is currently styling into.
#[derive(Debug, Clone)]
struct AtRuleScope {
    name: String,
    prelude: String,
}

/// A selector chain in progress.
///
/// The context carries the selector as tokens plus pending
/// pseudo-classes and pseudo-elements. Pending pseudo state is
/// consumed by [`style`](Self::style): `hover().style(...)` styles the
/// `:hover` variant, and the returned builder is back on the base
/// selector. Navigation (`child`, `descendant`, ...) bakes pending
/// pseudo state into the selector before extending it.
///
/// # Example
///
/// ```
/// use kombu::StyleSheet;
///
/// let sheet = StyleSheet::new();
/// sheet
///     .select(".form")?
///     .child("input")?
///     .style([("border", "1px solid gray")]);
///
/// assert_eq!(
///     sheet.build(),
///     ".form > input {\n    border: 1px solid gray;\n}"
/// );
/// # Ok::<(), kombu::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SelectorBuilder {
    root: SharedRoot,
    selector: Vec<SelectorToken>,
    pseudo_classes: Vec<String>,
    pseudo_elements: Vec<String>,
    at_rule: Option<AtRuleScope>,
}

impl SelectorBuilder {
    pub(crate) fn new(root: SharedRoot, selector: Vec<SelectorToken>) -> Self {
        Self {
            root,
            selector,
            pseudo_classes: vec![],
            pseudo_elements: vec![],
            at_rule: None,
        }
    }

    /// Apply declarations to the current context.
    ///
    /// Materializes the chain into the shared rule tree, reusing an
    /// existing rule when one with the same selector (and at-rule
    /// scope) was created earlier. Pending pseudo state is consumed;
    /// the returned builder continues from the base selector within
    /// the same at-rule scope.
    pub fn style<I, K, V>(self, declarations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let selector = self.complete_selector();
        {
            let mut root = self.root.lock();
            let rule = match &self.at_rule {
                Some(scope) => root.at_rule_mut(&scope.name, &scope.prelude).rule_mut(&selector),
                None => root.rule_mut(&selector),
            };
            for (property, value) in declarations {
                rule.push(Declaration::new(property.as_ref(), value));
            }
        }

        Self {
            root: self.root,
            selector: self.selector,
            pseudo_classes: vec![],
            pseudo_elements: vec![],
            at_rule: self.at_rule,
        }
    }

    // === Pseudo-classes ===

    /// Target a pseudo-class by name, e.g. `pseudo_class("visited")`.
    pub fn pseudo_class(mut self, name: impl Into<String>) -> Self {
        self.pseudo_classes.push(name.into());
        self
    }

    /// Target `:hover`.
    pub fn hover(self) -> Self {
        self.pseudo_class("hover")
    }

    /// Target `:focus`.
    pub fn focus(self) -> Self {
        self.pseudo_class("focus")
    }

    /// Target `:active`.
    pub fn active(self) -> Self {
        self.pseudo_class("active")
    }

    /// Target `:disabled`.
    pub fn disabled(self) -> Self {
        self.pseudo_class("disabled")
    }

    // === Pseudo-elements ===

    /// Target a pseudo-element by name, e.g. `pseudo_element("placeholder")`.
    pub fn pseudo_element(mut self, name: impl Into<String>) -> Self {
        self.pseudo_elements.push(name.into());
        self
    }

    /// Target `::before`.
    pub fn before(self) -> Self {
        self.pseudo_element("before")
    }

    /// Target `::after`.
    pub fn after(self) -> Self {
        self.pseudo_element("after")
    }

    // === Navigation ===

    /// Extend the selector with a direct-child combinator (`>`).
    pub fn child(self, selector: &str) -> Result<Self> {
        self.navigate(CombinatorKind::Child, selector)
    }

    /// Extend the selector with a descendant combinator (space).
    pub fn descendant(self, selector: &str) -> Result<Self> {
        self.navigate(CombinatorKind::Descendant, selector)
    }

    /// Extend the selector with an adjacent-sibling combinator (`+`).
    pub fn adjacent(self, selector: &str) -> Result<Self> {
        self.navigate(CombinatorKind::AdjacentSibling, selector)
    }

    /// Extend the selector with a general-sibling combinator (`~`).
    pub fn sibling(self, selector: &str) -> Result<Self> {
        self.navigate(CombinatorKind::GeneralSibling, selector)
    }

    /// Group with another selector using a comma.
    ///
    /// ```
    /// # use kombu::StyleSheet;
    /// # let sheet = StyleSheet::new();
    /// sheet.select(".btn")?.and(".link")?.style([("color", "blue")]);
    /// assert_eq!(sheet.build(), ".btn, .link {\n    color: blue;\n}");
    /// # Ok::<(), kombu::Error>(())
    /// ```
    pub fn and(mut self, selector: &str) -> Result<Self> {
        let tokens = parse_selector(selector)?;
        self.flush_pseudo_state();
        self.selector.push(SelectorToken::Comma {
            content: ", ".to_string(),
        });
        self.selector.extend(tokens);
        Ok(self)
    }

    /// Compound with another selector, no separator.
    ///
    /// The selector order is not validated: joining a type selector
    /// onto a class selector yields invalid CSS without an error.
    ///
    /// ```
    /// # use kombu::StyleSheet;
    /// # let sheet = StyleSheet::new();
    /// sheet.select(".btn")?.join(".link")?.style([("color", "blue")]);
    /// assert_eq!(sheet.build(), ".btn.link {\n    color: blue;\n}");
    /// # Ok::<(), kombu::Error>(())
    /// ```
    pub fn join(mut self, selector: &str) -> Result<Self> {
        let tokens = parse_selector(selector)?;
        self.flush_pseudo_state();
        self.selector.extend(tokens);
        Ok(self)
    }

    // === At-rule scoping ===

    /// Scope subsequent styling into `@media <prelude>`.
    ///
    /// The prelude is normalized through the at-rule tokenizer, so
    /// `(min-width:768px)` and `(min-width: 768px)` land in the same
    /// block; the normalized form space-separates every token.
    pub fn media(self, prelude: &str) -> Self {
        self.at_rule_scope("media", prelude)
    }

    /// Scope subsequent styling into `@supports <prelude>`.
    pub fn supports(self, prelude: &str) -> Self {
        self.at_rule_scope("supports", prelude)
    }

    /// Scope subsequent styling into `@container <prelude>`.
    pub fn container(self, prelude: &str) -> Self {
        self.at_rule_scope("container", prelude)
    }

    /// Render the shared rule tree. Convenience alias for
    /// [`StyleSheet::build`](crate::StyleSheet::build).
    pub fn build(&self) -> String {
        self.root.lock().to_string()
    }

    fn at_rule_scope(mut self, name: &str, prelude: &str) -> Self {
        let normalized = stringify_at_rule(&tokenize_at_rule(prelude));
        self.at_rule = Some(AtRuleScope {
            name: name.to_string(),
            prelude: normalized,
        });
        self
    }

    fn navigate(mut self, kind: CombinatorKind, selector: &str) -> Result<Self> {
        let tokens = parse_selector(selector)?;
        self.flush_pseudo_state();
        self.selector.push(SelectorToken::Combinator {
            kind,
            content: match kind {
                CombinatorKind::Descendant => " ".to_string(),
                other => format!(" {} ", other.as_str()),
            },
        });
        self.selector.extend(tokens);
        Ok(self)
    }

    /// Bake pending pseudo state into the selector tokens.
    fn flush_pseudo_state(&mut self) {
        for name in self.pseudo_classes.drain(..) {
            self.selector.push(SelectorToken::PseudoClass {
                content: format!(":{name}"),
                name,
                argument: None,
            });
        }
        for name in self.pseudo_elements.drain(..) {
            self.selector.push(SelectorToken::PseudoElement {
                content: format!("::{name}"),
                name,
                argument: None,
            });
        }
    }

    /// The full selector for the current context: the normalized token
    /// sequence followed by pending pseudo-classes and pseudo-elements.
    fn complete_selector(&self) -> String {
        let mut selector = stringify_selector(&self.selector);
        for name in &self.pseudo_classes {
            selector.push(':');
            selector.push_str(name);
        }
        for name in &self.pseudo_elements {
            selector.push_str("::");
            selector.push_str(name);
        }
        selector
    }
}
