//! Selector token definitions.

use std::fmt;

/// A single lexical unit of a CSS selector.
///
/// Every variant carries `content`, the exact substring of the input
/// that produced the token. Concatenating contents (with combinator
/// and comma normalization) reconstructs a semantically equivalent
/// selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorToken {
    /// A tag name, e.g. `div` or `svg|circle`.
    Type {
        name: String,
        namespace: Option<String>,
        content: String,
    },
    /// The universal selector `*`, optionally namespaced.
    Universal {
        namespace: Option<String>,
        content: String,
    },
    /// An id selector, e.g. `#header`. `name` excludes the `#`.
    Id { name: String, content: String },
    /// A class selector, e.g. `.card`. `name` excludes the `.`.
    Class { name: String, content: String },
    /// An attribute selector, e.g. `[href^="https" i]`.
    /// `value` keeps the author's quotes; `case_sensitivity` is the
    /// trailing flag character (`i`, `I`, `s`, `S`) when present.
    Attribute {
        name: String,
        namespace: Option<String>,
        operator: Option<AttributeOperator>,
        value: Option<String>,
        case_sensitivity: Option<char>,
        content: String,
    },
    /// A pseudo-class, e.g. `:hover` or `:nth-child(2)`. `argument` is
    /// the raw text between the parentheses of the functional form.
    PseudoClass {
        name: String,
        argument: Option<String>,
        content: String,
    },
    /// A pseudo-element, e.g. `::before` or `::highlight(name)`.
    PseudoElement {
        name: String,
        argument: Option<String>,
        content: String,
    },
    /// A combinator between two compound selectors. `content` is the
    /// raw source slice including surrounding whitespace.
    Combinator {
        kind: CombinatorKind,
        content: String,
    },
    /// A selector-list separator. `content` is the raw source slice
    /// including surrounding whitespace.
    Comma { content: String },
}

impl SelectorToken {
    /// The exact source text this token was produced from.
    pub fn content(&self) -> &str {
        match self {
            Self::Type { content, .. }
            | Self::Universal { content, .. }
            | Self::Id { content, .. }
            | Self::Class { content, .. }
            | Self::Attribute { content, .. }
            | Self::PseudoClass { content, .. }
            | Self::PseudoElement { content, .. }
            | Self::Combinator { content, .. }
            | Self::Comma { content } => content,
        }
    }

    /// Short name of the token's lexical category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Type { .. } => "type",
            Self::Universal { .. } => "universal",
            Self::Id { .. } => "id",
            Self::Class { .. } => "class",
            Self::Attribute { .. } => "attribute",
            Self::PseudoClass { .. } => "pseudo-class",
            Self::PseudoElement { .. } => "pseudo-element",
            Self::Combinator { .. } => "combinator",
            Self::Comma { .. } => "comma",
        }
    }

    /// Whether this token separates compound selectors rather than
    /// being part of one.
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Combinator { .. } | Self::Comma { .. })
    }
}

/// Structural relationship expressed by a combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    /// Whitespace: matches any descendant.
    Descendant,
    /// `>`: matches direct children only.
    Child,
    /// `+`: matches the immediately following sibling.
    AdjacentSibling,
    /// `~`: matches any following sibling.
    GeneralSibling,
}

impl CombinatorKind {
    /// The combinator's canonical text, without surrounding whitespace.
    /// The descendant combinator renders as a single space.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::AdjacentSibling => "+",
            Self::GeneralSibling => "~",
        }
    }

    /// Look up a combinator by its character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::AdjacentSibling),
            '~' => Some(Self::GeneralSibling),
            _ => None,
        }
    }
}

impl fmt::Display for CombinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match operator inside an attribute selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=` exact match.
    Equal,
    /// `~=` whitespace-separated word match.
    Includes,
    /// `|=` exact or dash-prefixed match.
    DashMatch,
    /// `^=` prefix match.
    Prefix,
    /// `$=` suffix match.
    Suffix,
    /// `*=` substring match.
    Substring,
}

impl AttributeOperator {
    /// The operator's source text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

impl fmt::Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
