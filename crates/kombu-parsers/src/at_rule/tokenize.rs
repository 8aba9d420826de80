//! At-rule prelude tokenizer.
//!
//! A single left-to-right scan with one cursor and no backtracking.
//! The tokenizer never fails: unrecognized characters are skipped and
//! unterminated strings or parenthesized groups read to end of input,
//! so every call returns a (possibly empty) token sequence.

use super::token::{AtRuleOperator, AtRuleToken, Delimiter};

/// Tokenize a CSS at-rule prelude (everything before the `{` or `;`).
///
/// Accepts the full rule head including the at-keyword, e.g.
/// `@media screen and (min-width: 768px)` or `@keyframes slide-in`.
///
/// # Example
///
/// ```
/// use kombu_parsers::tokenize_at_rule;
///
/// let tokens = tokenize_at_rule("@media screen");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].content(), "@media");
/// assert_eq!(tokens[1].content(), "screen");
/// ```
pub fn tokenize_at_rule(input: &str) -> Vec<AtRuleToken> {
    Scanner::new(input).run()
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || is_digit(c)
}

/// Cursor over the prelude text. `pos` is a byte offset and always
/// sits on a character boundary.
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

    /// Consume a maximal identifier run and return it as a slice.
    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Consume a numeric literal: optional sign, integer part, and a
    /// fractional part only when the `.` is immediately followed by a
    /// digit (otherwise the `.` is left unconsumed).
    fn read_number(&mut self) -> &'a str {
        let start = self.pos;

        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }
        while self.peek().is_some_and(is_digit) {
            self.bump();
        }
        if self.peek() == Some('.') && self.peek_second().is_some_and(is_digit) {
            self.bump();
            while self.peek().is_some_and(is_digit) {
                self.bump();
            }
        }

        &self.input[start..self.pos]
    }

    /// Consume a quoted string through the matching unescaped closing
    /// quote. An unterminated string reads to end of input.
    fn read_quoted_string(&mut self, quote: char) -> String {
        let mut result = String::new();
        result.push(quote);
        self.bump();

        let mut escaped = false;
        while let Some(c) = self.bump() {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                break;
            }
        }

        result
    }

    /// Consume a balanced-parenthesis group, starting just after the
    /// opening `(`. Parens inside quoted substrings do not count toward
    /// depth. The closing `)` is consumed but not included. Depth is an
    /// explicit counter, so adversarial nesting cannot grow the stack.
    fn read_until_close_paren(&mut self) -> String {
        let mut result = String::new();
        let mut depth: u32 = 1;
        let mut escaped = false;
        let mut in_string: Option<char> = None;

        while depth > 0 {
            let Some(c) = self.bump() else { break };

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
                    if depth > 0 {
                        result.push(c);
                    }
                }
                _ => result.push(c),
            }
        }

        result
    }

    fn run(mut self) -> Vec<AtRuleToken> {
        let mut tokens = vec![];

        while let Some(c) = self.peek() {
            // Whitespace separates tokens but is never emitted.
            if is_whitespace(c) {
                self.skip_whitespace();
                continue;
            }

            // At-keyword: @media, @-webkit-keyframes, ...
            if c == '@' {
                self.bump();
                let name = self.read_identifier();
                tokens.push(AtRuleToken::AtRuleName {
                    name: name.to_string(),
                    content: format!("@{name}"),
                });
                continue;
            }

            // String literal, quotes preserved.
            if c == '"' || c == '\'' {
                let value = self.read_quoted_string(c);
                tokens.push(AtRuleToken::String {
                    value: value.clone(),
                    content: value,
                });
                continue;
            }

            // Hash: #fff
            if c == '#' {
                self.bump();
                let value = self.read_identifier();
                tokens.push(AtRuleToken::Hash {
                    value: value.to_string(),
                    content: format!("#{value}"),
                });
                continue;
            }

            // Numeric literal, then lookahead on the character
            // immediately following it: identifier-start means a
            // dimension, `%` means a percentage, anything else a bare
            // number. No whitespace is permitted in between.
            if is_digit(c)
                || ((c == '-' || c == '+' || c == '.') && self.peek_second().is_some_and(is_digit))
            {
                let start = self.pos;
                let literal = self.read_number();
                // The literal is a valid f64 by construction.
                let value = literal.parse::<f64>().unwrap_or(0.0);

                if self.peek().is_some_and(is_identifier_start) {
                    let unit = self.read_identifier();
                    tokens.push(AtRuleToken::Dimension {
                        value,
                        unit: unit.to_string(),
                        content: self.input[start..self.pos].to_string(),
                    });
                } else if self.peek() == Some('%') {
                    self.bump();
                    tokens.push(AtRuleToken::Percentage {
                        value,
                        content: self.input[start..self.pos].to_string(),
                    });
                } else {
                    tokens.push(AtRuleToken::Number {
                        value,
                        content: self.input[start..self.pos].to_string(),
                    });
                }
                continue;
            }

            // Identifier run: logical keyword, function, url, or plain
            // identifier, checked in that order.
            if is_identifier_start(c) {
                let word = self.read_identifier();

                // `and`, `or`, `not` are never function names even when
                // immediately followed by `(`.
                if let Some(operator) = AtRuleOperator::from_keyword(word) {
                    tokens.push(AtRuleToken::Operator {
                        operator,
                        content: word.to_string(),
                    });
                    continue;
                }

                self.skip_whitespace();
                if self.peek() == Some('(') {
                    self.bump();
                    let argument = self.read_until_close_paren();

                    if word == "url" {
                        tokens.push(AtRuleToken::Url {
                            value: argument.trim().to_string(),
                            content: format!("url({argument})"),
                        });
                    } else {
                        tokens.push(AtRuleToken::Function {
                            name: word.to_string(),
                            content: format!("{word}({argument})"),
                            argument,
                        });
                    }
                } else {
                    tokens.push(AtRuleToken::Identifier {
                        value: word.to_string(),
                        content: word.to_string(),
                    });
                }
                continue;
            }

            // Comparison operators. `<` and `>` may combine with a
            // following `=`; a bare `=` stays single-character.
            if c == '>' || c == '<' || c == '=' {
                self.bump();
                let operator = if c != '=' && self.peek() == Some('=') {
                    self.bump();
                    match c {
                        '>' => AtRuleOperator::GreaterEqual,
                        _ => AtRuleOperator::LessEqual,
                    }
                } else {
                    match c {
                        '>' => AtRuleOperator::Greater,
                        '<' => AtRuleOperator::Less,
                        _ => AtRuleOperator::Equal,
                    }
                };
                tokens.push(AtRuleToken::Operator {
                    operator,
                    content: operator.as_str().to_string(),
                });
                continue;
            }

            // Single-character delimiters.
            if let Some(delimiter) = Delimiter::from_char(c) {
                self.bump();
                tokens.push(AtRuleToken::Delimiter {
                    delimiter,
                    content: c.to_string(),
                });
                continue;
            }

            // Anything else is skipped. This is the fail-soft fallback
            // that keeps the tokenizer total.
            tracing::trace!(character = %c, position = self.pos, "skipping unrecognized character");
            self.bump();
        }

        tokens
    }
}
