//! Selector tokenizer.
//!
//! A single left-to-right scan producing typed tokens for compound
//! selectors (type, id, class, attribute, pseudo) interleaved with
//! combinators and commas. Whitespace is syntactically significant
//! only when it is not adjacent to an explicit combinator, in which
//! case it denotes the descendant combinator.
//!
//! Unlike the at-rule tokenizer, this grammar fails loudly: selectors
//! are authored directly at the DSL boundary, and a silently wrong
//! token sequence would mask authoring bugs. Malformed input returns a
//! [`ParseError`](crate::ParseError) instead of a best-effort sequence.

use crate::error::{ParseError, Result};

use super::token::{AttributeOperator, CombinatorKind, SelectorToken};

/// Tokenize a CSS selector.
///
/// # Example
///
/// ```
/// use kombu_parsers::tokenize_selector;
///
/// let tokens = tokenize_selector("button.primary:hover").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].content(), ".primary");
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`](crate::ParseError) for unclosed brackets
/// or arguments, dangling combinators or commas, missing names after
/// `#`/`.`/`:`, and characters that cannot start a selector token.
pub fn tokenize_selector(input: &str) -> Result<Vec<SelectorToken>> {
    Scanner::new(input).run()
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Selector identifiers: ASCII letters, `-`, `_`, and any non-ASCII
/// character may start a name; digits may continue one.
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            self.bump();
        }
    }

    fn read_name(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Consume a balanced-parenthesis argument, starting just after
    /// the opening `(`. Quote-aware; depth is an explicit counter. The
    /// closing `)` is consumed but excluded from the result.
    fn read_argument(&mut self, name: &str, start: usize) -> Result<String> {
        let mut result = String::new();
        let mut depth: u32 = 1;
        let mut escaped = false;
        let mut in_string: Option<char> = None;

        loop {
            let Some(c) = self.bump() else {
                return Err(ParseError::UnclosedArgument {
                    name: name.to_string(),
                    position: start,
                });
            };

            if let Some(quote) = in_string {
                result.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    in_string = Some(c);
                    result.push(c);
                }
                '(' => {
                    depth += 1;
                    result.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(result);
                    }
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
    }

    /// Find the end of an attribute selector, starting just after the
    /// opening `[`. Returns the inner text (brackets excluded); the
    /// closing `]` is consumed. Quote-aware, so a `]` inside a quoted
    /// value does not terminate the selector.
    fn read_attribute_body(&mut self, start: usize) -> Result<&'a str> {
        let body_start = self.pos;
        let mut escaped = false;
        let mut in_string: Option<char> = None;

        loop {
            let end = self.pos;
            let Some(c) = self.bump() else {
                return Err(ParseError::UnclosedAttribute { position: start });
            };

            if let Some(quote) = in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }

            match c {
                '"' | '\'' => in_string = Some(c),
                ']' => return Ok(&self.input[body_start..end]),
                _ => {}
            }
        }
    }

    /// Emit a combinator, rejecting it when there is nothing on its
    /// left side to combine.
    fn push_combinator(
        &self,
        tokens: &mut Vec<SelectorToken>,
        kind: CombinatorKind,
        content: &str,
        position: usize,
    ) -> Result<()> {
        if tokens.last().is_none_or(SelectorToken::is_separator) {
            return Err(ParseError::DanglingCombinator {
                combinator: kind.as_str().trim().to_string(),
                position,
            });
        }
        tokens.push(SelectorToken::Combinator {
            kind,
            content: content.to_string(),
        });
        Ok(())
    }

    fn run(mut self) -> Result<Vec<SelectorToken>> {
        let mut tokens: Vec<SelectorToken> = vec![];

        while let Some(c) = self.peek() {
            let start = self.pos;

            // Whitespace: either the descendant combinator, or padding
            // around an explicit combinator or comma.
            if is_whitespace(c) {
                self.skip_whitespace();
                match self.peek() {
                    // Trailing whitespace.
                    None => break,
                    Some(',') => {
                        self.bump();
                        self.skip_whitespace();
                        self.push_comma(&mut tokens, start)?;
                    }
                    Some(next) => match CombinatorKind::from_char(next) {
                        Some(kind) => {
                            self.bump();
                            self.skip_whitespace();
                            let content = &self.input[start..self.pos];
                            self.push_combinator(&mut tokens, kind, content, start)?;
                        }
                        // Leading whitespace is insignificant; between
                        // two compounds it is itself the descendant
                        // combinator.
                        None => {
                            if !tokens.is_empty() {
                                let content = &self.input[start..self.pos];
                                self.push_combinator(
                                    &mut tokens,
                                    CombinatorKind::Descendant,
                                    content,
                                    start,
                                )?;
                            }
                        }
                    },
                }
                continue;
            }

            // Explicit combinator with no leading whitespace.
            if let Some(kind) = CombinatorKind::from_char(c) {
                self.bump();
                self.skip_whitespace();
                let content = &self.input[start..self.pos];
                self.push_combinator(&mut tokens, kind, content, start)?;
                continue;
            }

            if c == ',' {
                self.bump();
                self.skip_whitespace();
                self.push_comma(&mut tokens, start)?;
                continue;
            }

            if c == '#' {
                self.bump();
                let name = self.read_name();
                if name.is_empty() {
                    return Err(ParseError::ExpectedName {
                        prefix: '#',
                        position: start,
                    });
                }
                tokens.push(SelectorToken::Id {
                    name: name.to_string(),
                    content: self.input[start..self.pos].to_string(),
                });
                continue;
            }

            if c == '.' {
                self.bump();
                let name = self.read_name();
                if name.is_empty() {
                    return Err(ParseError::ExpectedName {
                        prefix: '.',
                        position: start,
                    });
                }
                tokens.push(SelectorToken::Class {
                    name: name.to_string(),
                    content: self.input[start..self.pos].to_string(),
                });
                continue;
            }

            if c == ':' {
                self.bump();
                let is_element = self.peek() == Some(':');
                if is_element {
                    self.bump();
                }
                let name = self.read_name().to_string();
                if name.is_empty() {
                    return Err(ParseError::ExpectedName {
                        prefix: ':',
                        position: start,
                    });
                }

                let argument = if self.peek() == Some('(') {
                    self.bump();
                    Some(self.read_argument(&name, start)?)
                } else {
                    None
                };

                let content = self.input[start..self.pos].to_string();
                tokens.push(if is_element {
                    SelectorToken::PseudoElement {
                        name,
                        argument,
                        content,
                    }
                } else {
                    SelectorToken::PseudoClass {
                        name,
                        argument,
                        content,
                    }
                });
                continue;
            }

            if c == '[' {
                self.bump();
                let body = self.read_attribute_body(start)?;
                let token = parse_attribute(body, &self.input[start..self.pos], start)?;
                tokens.push(token);
                continue;
            }

            // Type, universal, or namespaced form of either.
            if c == '*' || c == '|' || is_name_start(c) {
                let token = self.read_type_or_universal(start)?;
                tokens.push(token);
                continue;
            }

            return Err(ParseError::UnexpectedChar {
                character: c,
                position: start,
            });
        }

        // A selector must not end on a separator.
        if let Some(last) = tokens.last() {
            if last.is_separator() {
                return Err(ParseError::DanglingCombinator {
                    combinator: last.content().trim().to_string(),
                    position: self.pos,
                });
            }
        }

        Ok(tokens)
    }

    fn push_comma(&self, tokens: &mut Vec<SelectorToken>, position: usize) -> Result<()> {
        if tokens.last().is_none_or(SelectorToken::is_separator) {
            return Err(ParseError::DanglingCombinator {
                combinator: ",".to_string(),
                position,
            });
        }
        tokens.push(SelectorToken::Comma {
            content: self.input[position..self.pos].to_string(),
        });
        Ok(())
    }

    /// Parse `div`, `*`, `svg|circle`, `*|span`, `|div` and friends.
    fn read_type_or_universal(&mut self, start: usize) -> Result<SelectorToken> {
        // First segment: a name, `*`, or nothing (empty namespace).
        let first = if self.peek() == Some('*') {
            self.bump();
            None
        } else if self.peek().is_some_and(is_name_start) {
            Some(self.read_name().to_string())
        } else {
            // Leading `|`: empty namespace.
            Some(String::new())
        };

        // A `|` not followed by `=` separates namespace from element.
        let namespaced =
            self.peek() == Some('|') && self.peek_second().is_none_or(|c| c != '=' && c != '|');

        if !namespaced {
            let content = self.input[start..self.pos].to_string();
            return match first {
                None => Ok(SelectorToken::Universal {
                    namespace: None,
                    content,
                }),
                // A lone `|` with no element part is not a selector.
                Some(name) if name.is_empty() => Err(ParseError::ExpectedName {
                    prefix: '|',
                    position: start,
                }),
                Some(name) => Ok(SelectorToken::Type {
                    name,
                    namespace: None,
                    content,
                }),
            };
        }

        self.bump();
        let namespace = Some(first.map_or_else(|| "*".to_string(), |name| name));

        if self.peek() == Some('*') {
            self.bump();
            return Ok(SelectorToken::Universal {
                namespace,
                content: self.input[start..self.pos].to_string(),
            });
        }

        let name = self.read_name();
        if name.is_empty() {
            return Err(ParseError::ExpectedName {
                prefix: '|',
                position: start,
            });
        }
        Ok(SelectorToken::Type {
            name: name.to_string(),
            namespace,
            content: self.input[start..self.pos].to_string(),
        })
    }
}

/// Parse the interior of an attribute selector. `body` is the text
/// between the brackets, `content` the full `[...]` source slice.
fn parse_attribute(body: &str, content: &str, position: usize) -> Result<SelectorToken> {
    let mut cursor = Scanner::new(body);
    cursor.skip_whitespace();

    // Optional namespace, then the attribute name.
    let first = if cursor.peek() == Some('*') {
        cursor.bump();
        "*".to_string()
    } else {
        cursor.read_name().to_string()
    };

    let (namespace, name) = if cursor.peek() == Some('|')
        && cursor.peek_second().is_none_or(|c| c != '=')
    {
        cursor.bump();
        let name = cursor.read_name();
        if name.is_empty() {
            return Err(ParseError::ExpectedName {
                prefix: '|',
                position,
            });
        }
        (Some(first), name.to_string())
    } else {
        if first.is_empty() || first == "*" {
            return Err(ParseError::ExpectedName {
                prefix: '[',
                position,
            });
        }
        (None, first)
    };

    cursor.skip_whitespace();

    // Optional match operator.
    let operator = match cursor.peek() {
        Some('=') => {
            cursor.bump();
            Some(AttributeOperator::Equal)
        }
        Some(c @ ('~' | '|' | '^' | '$' | '*')) if cursor.peek_second() == Some('=') => {
            cursor.bump();
            cursor.bump();
            Some(match c {
                '~' => AttributeOperator::Includes,
                '|' => AttributeOperator::DashMatch,
                '^' => AttributeOperator::Prefix,
                '$' => AttributeOperator::Suffix,
                _ => AttributeOperator::Substring,
            })
        }
        _ => None,
    };

    // Value, only meaningful after an operator. Quotes are preserved.
    let value = if operator.is_some() {
        cursor.skip_whitespace();
        let value_start = cursor.pos;
        match cursor.peek() {
            Some(quote @ ('"' | '\'')) => {
                cursor.bump();
                let mut escaped = false;
                loop {
                    let Some(c) = cursor.bump() else { break };
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == quote {
                        break;
                    }
                }
            }
            _ => {
                while let Some(c) = cursor.peek() {
                    if is_whitespace(c) {
                        break;
                    }
                    cursor.bump();
                }
            }
        }
        if cursor.pos == value_start {
            return Err(ParseError::ExpectedName {
                prefix: '[',
                position,
            });
        }
        Some(body[value_start..cursor.pos].to_string())
    } else {
        None
    };

    // Optional case-sensitivity flag.
    cursor.skip_whitespace();
    let case_sensitivity = match cursor.peek() {
        Some(flag @ ('i' | 'I' | 's' | 'S')) if value.is_some() => {
            cursor.bump();
            Some(flag)
        }
        _ => None,
    };

    cursor.skip_whitespace();
    if let Some(c) = cursor.peek() {
        return Err(ParseError::UnexpectedChar {
            character: c,
            position,
        });
    }

    Ok(SelectorToken::Attribute {
        name,
        namespace,
        operator,
        value,
        case_sensitivity,
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> SelectorToken {
        SelectorToken::Class {
            name: name.into(),
            content: format!(".{name}"),
        }
    }

    fn id(name: &str) -> SelectorToken {
        SelectorToken::Id {
            name: name.into(),
            content: format!("#{name}"),
        }
    }

    fn type_sel(name: &str) -> SelectorToken {
        SelectorToken::Type {
            name: name.into(),
            namespace: None,
            content: name.into(),
        }
    }

    fn pseudo_class(name: &str) -> SelectorToken {
        SelectorToken::PseudoClass {
            name: name.into(),
            argument: None,
            content: format!(":{name}"),
        }
    }

    fn pseudo_element(name: &str) -> SelectorToken {
        SelectorToken::PseudoElement {
            name: name.into(),
            argument: None,
            content: format!("::{name}"),
        }
    }

    fn combinator(kind: CombinatorKind, content: &str) -> SelectorToken {
        SelectorToken::Combinator {
            kind,
            content: content.into(),
        }
    }

    #[test]
    fn classes() {
        assert_eq!(
            tokenize_selector("div.class.another").unwrap(),
            vec![type_sel("div"), class("class"), class("another")]
        );
    }

    #[test]
    fn id_selector() {
        assert_eq!(
            tokenize_selector("span#uniqueId").unwrap(),
            vec![type_sel("span"), id("uniqueId")]
        );
    }

    #[test]
    fn attributes() {
        assert_eq!(
            tokenize_selector(r#"a[href="https://example.com"][target="_blank"]"#).unwrap(),
            vec![
                type_sel("a"),
                SelectorToken::Attribute {
                    name: "href".into(),
                    namespace: None,
                    operator: Some(AttributeOperator::Equal),
                    value: Some(r#""https://example.com""#.into()),
                    case_sensitivity: None,
                    content: r#"[href="https://example.com"]"#.into(),
                },
                SelectorToken::Attribute {
                    name: "target".into(),
                    namespace: None,
                    operator: Some(AttributeOperator::Equal),
                    value: Some(r#""_blank""#.into()),
                    case_sensitivity: None,
                    content: r#"[target="_blank"]"#.into(),
                },
            ]
        );
    }

    #[test]
    fn bare_attribute() {
        assert_eq!(
            tokenize_selector("[disabled]").unwrap(),
            vec![SelectorToken::Attribute {
                name: "disabled".into(),
                namespace: None,
                operator: None,
                value: None,
                case_sensitivity: None,
                content: "[disabled]".into(),
            }]
        );
    }

    #[test]
    fn attribute_operators_and_flags() {
        assert_eq!(
            tokenize_selector(r#"[href^="https" i]"#).unwrap(),
            vec![SelectorToken::Attribute {
                name: "href".into(),
                namespace: None,
                operator: Some(AttributeOperator::Prefix),
                value: Some(r#""https""#.into()),
                case_sensitivity: Some('i'),
                content: r#"[href^="https" i]"#.into(),
            }]
        );

        assert_eq!(
            tokenize_selector("[lang|=en]").unwrap(),
            vec![SelectorToken::Attribute {
                name: "lang".into(),
                namespace: None,
                operator: Some(AttributeOperator::DashMatch),
                value: Some("en".into()),
                case_sensitivity: None,
                content: "[lang|=en]".into(),
            }]
        );
    }

    #[test]
    fn pseudo_classes() {
        assert_eq!(
            tokenize_selector("button:disabled:hover").unwrap(),
            vec![
                type_sel("button"),
                pseudo_class("disabled"),
                pseudo_class("hover"),
            ]
        );
    }

    #[test]
    fn pseudo_elements() {
        assert_eq!(
            tokenize_selector("p::first-line").unwrap(),
            vec![type_sel("p"), pseudo_element("first-line")]
        );
    }

    #[test]
    fn functional_pseudo_class() {
        assert_eq!(
            tokenize_selector("li:nth-child(2n+1)").unwrap(),
            vec![
                type_sel("li"),
                SelectorToken::PseudoClass {
                    name: "nth-child".into(),
                    argument: Some("2n+1".into()),
                    content: ":nth-child(2n+1)".into(),
                },
            ]
        );
    }

    #[test]
    fn nested_pseudo_argument() {
        assert_eq!(
            tokenize_selector(":not(:is(a, b))").unwrap(),
            vec![SelectorToken::PseudoClass {
                name: "not".into(),
                argument: Some(":is(a, b)".into()),
                content: ":not(:is(a, b))".into(),
            }]
        );
    }

    #[test]
    fn complex_selector() {
        assert_eq!(
            tokenize_selector("div#container > ul.items li.item:first-child::before").unwrap(),
            vec![
                type_sel("div"),
                id("container"),
                combinator(CombinatorKind::Child, " > "),
                type_sel("ul"),
                class("items"),
                combinator(CombinatorKind::Descendant, " "),
                type_sel("li"),
                class("item"),
                pseudo_class("first-child"),
                pseudo_element("before"),
            ]
        );
    }

    #[test]
    fn combinators_without_spacing() {
        assert_eq!(
            tokenize_selector("div>p+span~a").unwrap(),
            vec![
                type_sel("div"),
                combinator(CombinatorKind::Child, ">"),
                type_sel("p"),
                combinator(CombinatorKind::AdjacentSibling, "+"),
                type_sel("span"),
                combinator(CombinatorKind::GeneralSibling, "~"),
                type_sel("a"),
            ]
        );
    }

    #[test]
    fn selector_list() {
        assert_eq!(
            tokenize_selector(".btn, .link").unwrap(),
            vec![
                class("btn"),
                SelectorToken::Comma {
                    content: ", ".into(),
                },
                class("link"),
            ]
        );
    }

    #[test]
    fn universal_and_namespaces() {
        assert_eq!(
            tokenize_selector("*").unwrap(),
            vec![SelectorToken::Universal {
                namespace: None,
                content: "*".into(),
            }]
        );
        assert_eq!(
            tokenize_selector("svg|circle").unwrap(),
            vec![SelectorToken::Type {
                name: "circle".into(),
                namespace: Some("svg".into()),
                content: "svg|circle".into(),
            }]
        );
        assert_eq!(
            tokenize_selector("*|span").unwrap(),
            vec![SelectorToken::Type {
                name: "span".into(),
                namespace: Some("*".into()),
                content: "*|span".into(),
            }]
        );
    }

    #[test]
    fn leading_and_trailing_whitespace_is_insignificant() {
        assert_eq!(
            tokenize_selector("  .card  ").unwrap(),
            vec![class("card")]
        );
        assert!(tokenize_selector("   ").unwrap().is_empty());
        assert!(tokenize_selector("").unwrap().is_empty());
    }

    #[test]
    fn unclosed_attribute_fails() {
        assert_eq!(
            tokenize_selector("a[href"),
            Err(ParseError::UnclosedAttribute { position: 1 })
        );
        // A `]` hidden inside a quoted value does not close the selector.
        assert_eq!(
            tokenize_selector(r#"[title="]"#),
            Err(ParseError::UnclosedAttribute { position: 0 })
        );
    }

    #[test]
    fn unclosed_argument_fails() {
        assert_eq!(
            tokenize_selector(":nth-child(2"),
            Err(ParseError::UnclosedArgument {
                name: "nth-child".into(),
                position: 0,
            })
        );
    }

    #[test]
    fn dangling_combinators_fail() {
        assert!(matches!(
            tokenize_selector("div >"),
            Err(ParseError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            tokenize_selector("> div"),
            Err(ParseError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            tokenize_selector("a, , b"),
            Err(ParseError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            tokenize_selector("a ~ > b"),
            Err(ParseError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            tokenize_selector(".card,"),
            Err(ParseError::DanglingCombinator { .. })
        ));
    }

    #[test]
    fn missing_names_fail() {
        assert_eq!(
            tokenize_selector("."),
            Err(ParseError::ExpectedName {
                prefix: '.',
                position: 0,
            })
        );
        assert_eq!(
            tokenize_selector("div.#x"),
            Err(ParseError::ExpectedName {
                prefix: '.',
                position: 3,
            })
        );
        assert_eq!(
            tokenize_selector("a:"),
            Err(ParseError::ExpectedName {
                prefix: ':',
                position: 1,
            })
        );
    }

    #[test]
    fn unexpected_characters_fail() {
        assert_eq!(
            tokenize_selector("div { color: red }"),
            Err(ParseError::UnexpectedChar {
                character: '{',
                position: 4,
            })
        );
    }
}
