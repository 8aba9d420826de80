//! At-rule token definitions.

use std::fmt;

/// A single lexical unit of a CSS at-rule prelude.
///
/// Every variant carries `content`, the exact substring of the input
/// that produced the token. Space-joining the contents of a token
/// sequence reconstructs a semantically equivalent prelude.
#[derive(Debug, Clone, PartialEq)]
pub enum AtRuleToken {
    /// The at-keyword itself, e.g. `@media`. `name` excludes the `@`.
    AtRuleName { name: String, content: String },
    /// An unquoted name, e.g. `screen`, `min-width`, `--custom`.
    Identifier { value: String, content: String },
    /// A function call, e.g. `selector(:hover)`. `argument` is the raw,
    /// unparsed text between the outer parentheses.
    Function {
        name: String,
        argument: String,
        content: String,
    },
    /// A quoted string. `value` keeps the quotes.
    String { value: String, content: String },
    /// A unitless number, e.g. `16`.
    Number { value: f64, content: String },
    /// A number with a unit, e.g. `768px`.
    Dimension {
        value: f64,
        unit: String,
        content: String,
    },
    /// A percentage, e.g. `50%`.
    Percentage { value: f64, content: String },
    /// A logical or comparison operator.
    Operator {
        operator: AtRuleOperator,
        content: String,
    },
    /// A structural single-character delimiter.
    Delimiter {
        delimiter: Delimiter,
        content: String,
    },
    /// A hash, e.g. `#fff`. `value` excludes the `#`.
    Hash { value: String, content: String },
    /// A `url(...)` value. `value` is the trimmed argument, quotes
    /// preserved if the author wrote them.
    Url { value: String, content: String },
}

impl AtRuleToken {
    /// The exact source text this token was produced from.
    pub fn content(&self) -> &str {
        match self {
            Self::AtRuleName { content, .. }
            | Self::Identifier { content, .. }
            | Self::Function { content, .. }
            | Self::String { content, .. }
            | Self::Number { content, .. }
            | Self::Dimension { content, .. }
            | Self::Percentage { content, .. }
            | Self::Operator { content, .. }
            | Self::Delimiter { content, .. }
            | Self::Hash { content, .. }
            | Self::Url { content, .. } => content,
        }
    }

    /// Short name of the token's lexical category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AtRuleName { .. } => "at-rule-name",
            Self::Identifier { .. } => "identifier",
            Self::Function { .. } => "function",
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::Dimension { .. } => "dimension",
            Self::Percentage { .. } => "percentage",
            Self::Operator { .. } => "operator",
            Self::Delimiter { .. } => "delimiter",
            Self::Hash { .. } => "hash",
            Self::Url { .. } => "url",
        }
    }
}

/// Logical and comparison operators valid in at-rule preludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtRuleOperator {
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
}

impl AtRuleOperator {
    /// The operator's source text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
        }
    }

    /// Look up the logical keyword form (`and`, `or`, `not`).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            _ => None,
        }
    }
}

impl fmt::Display for AtRuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural delimiter characters in at-rule preludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `/`
    Slash,
}

impl Delimiter {
    /// The delimiter character.
    pub fn as_char(&self) -> char {
        match self {
            Self::OpenParen => '(',
            Self::CloseParen => ')',
            Self::Comma => ',',
            Self::Colon => ':',
            Self::Slash => '/',
        }
    }

    /// Look up a delimiter by its character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::OpenParen),
            ')' => Some(Self::CloseParen),
            ',' => Some(Self::Comma),
            ':' => Some(Self::Colon),
            '/' => Some(Self::Slash),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_accessor() {
        let token = AtRuleToken::Dimension {
            value: 768.0,
            unit: "px".into(),
            content: "768px".into(),
        };
        assert_eq!(token.content(), "768px");
        assert_eq!(token.kind(), "dimension");
    }

    #[test]
    fn operator_keywords() {
        assert_eq!(AtRuleOperator::from_keyword("and"), Some(AtRuleOperator::And));
        assert_eq!(AtRuleOperator::from_keyword("or"), Some(AtRuleOperator::Or));
        assert_eq!(AtRuleOperator::from_keyword("not"), Some(AtRuleOperator::Not));
        assert_eq!(AtRuleOperator::from_keyword("xor"), None);
        assert_eq!(AtRuleOperator::GreaterEqual.as_str(), ">=");
    }

    #[test]
    fn delimiter_round_trip() {
        for c in ['(', ')', ',', ':', '/'] {
            assert_eq!(Delimiter::from_char(c).unwrap().as_char(), c);
        }
        assert_eq!(Delimiter::from_char('.'), None);
    }
}
