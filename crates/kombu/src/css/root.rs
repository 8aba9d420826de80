//! The accumulating CSS rule tree.

use std::fmt;

use super::declaration::Declaration;

/// A style rule: a selector and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Normalized selector text.
    pub selector: String,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Create an empty rule for a selector.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: vec![],
        }
    }

    /// Append a declaration.
    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        writeln!(f, "{pad}{} {{", self.selector)?;
        for declaration in &self.declarations {
            writeln!(f, "{pad}    {declaration};")?;
        }
        write!(f, "{pad}}}")
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// An at-rule wrapper (e.g. `@media ...`) around nested rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// At-rule name without the `@`, e.g. `media`.
    pub name: String,
    /// Normalized prelude text.
    pub prelude: String,
    /// Rules inside the block.
    pub rules: Vec<Rule>,
}

impl AtRule {
    /// Create an empty at-rule block.
    pub fn new(name: impl Into<String>, prelude: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prelude: prelude.into(),
            rules: vec![],
        }
    }

    /// Find or append the rule for a selector inside this block.
    pub fn rule_mut(&mut self, selector: &str) -> &mut Rule {
        let index = match self.rules.iter().position(|r| r.selector == selector) {
            Some(index) => index,
            None => {
                tracing::debug!(selector, at_rule = %self.name, "appending nested rule");
                self.rules.push(Rule::new(selector));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index]
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.prelude.is_empty() {
            write!(f, " {}", self.prelude)?;
        }
        writeln!(f, " {{")?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            rule.fmt_indented(f, 4)?;
        }
        if !self.rules.is_empty() {
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// A top-level node: either a plain rule or an at-rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssNode {
    Rule(Rule),
    AtRule(AtRule),
}

impl fmt::Display for CssNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => write!(f, "{rule}"),
            Self::AtRule(at_rule) => write!(f, "{at_rule}"),
        }
    }
}

/// The accumulating stylesheet tree.
///
/// Appending to an existing `(selector)` or `(at-rule, prelude,
/// selector)` coordinate reuses the existing node, so repeated chains
/// targeting the same place merge their declarations instead of
/// duplicating rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssRoot {
    nodes: Vec<CssNode>,
}

impl CssRoot {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes in insertion order.
    pub fn nodes(&self) -> &[CssNode] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Find or append the top-level rule for a selector.
    pub fn rule_mut(&mut self, selector: &str) -> &mut Rule {
        let index = match self
            .nodes
            .iter()
            .position(|n| matches!(n, CssNode::Rule(r) if r.selector == selector))
        {
            Some(index) => index,
            None => {
                tracing::debug!(selector, "appending rule");
                self.nodes.push(CssNode::Rule(Rule::new(selector)));
                self.nodes.len() - 1
            }
        };
        match &mut self.nodes[index] {
            CssNode::Rule(rule) => rule,
            // The index always points at a Rule node.
            CssNode::AtRule(_) => unreachable!(),
        }
    }

    /// Find or append the at-rule block for a `(name, prelude)` pair.
    pub fn at_rule_mut(&mut self, name: &str, prelude: &str) -> &mut AtRule {
        let index = match self.nodes.iter().position(
            |n| matches!(n, CssNode::AtRule(a) if a.name == name && a.prelude == prelude),
        ) {
            Some(index) => index,
            None => {
                tracing::debug!(name, prelude, "appending at-rule block");
                self.nodes.push(CssNode::AtRule(AtRule::new(name, prelude)));
                self.nodes.len() - 1
            }
        };
        match &mut self.nodes[index] {
            CssNode::AtRule(at_rule) => at_rule,
            // The index always points at an AtRule node.
            CssNode::Rule(_) => unreachable!(),
        }
    }
}

impl fmt::Display for CssRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
