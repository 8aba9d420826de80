//! Selector token stringification.

use super::token::{CombinatorKind, SelectorToken};

/// Reassemble a token sequence into a canonical selector string.
///
/// Non-descendant combinators get exactly one space on each side, the
/// descendant combinator renders as a single space, and every comma is
/// followed by one space. All other tokens contribute their `content`
/// verbatim. The result is canonical rather than byte-identical: the
/// author's original spacing around combinators is not reproduced.
///
/// An empty token sequence stringifies to the empty string.
pub fn stringify_selector(tokens: &[SelectorToken]) -> String {
    let mut result = String::new();
    for token in tokens {
        match token {
            SelectorToken::Combinator { kind, .. } => match kind {
                CombinatorKind::Descendant => result.push(' '),
                other => {
                    result.push(' ');
                    result.push_str(other.as_str());
                    result.push(' ');
                }
            },
            SelectorToken::Comma { .. } => result.push_str(", "),
            other => result.push_str(other.content()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::super::tokenize::tokenize_selector;
    use super::*;

    fn normalize(selector: &str) -> String {
        stringify_selector(&tokenize_selector(selector).unwrap())
    }

    #[test]
    fn compound_tokens_concatenate_verbatim() {
        assert_eq!(
            normalize("div.card#main[data-x=\"1\"]:hover::before"),
            "div.card#main[data-x=\"1\"]:hover::before"
        );
    }

    #[test]
    fn combinator_spacing_is_normalized() {
        assert_eq!(normalize("div>p"), "div > p");
        assert_eq!(normalize("div   >   p"), "div > p");
        assert_eq!(normalize("a+b~c"), "a + b ~ c");
        assert_eq!(normalize("ul   li"), "ul li");
    }

    #[test]
    fn commas_get_a_trailing_space() {
        assert_eq!(normalize(".btn,.link"), ".btn, .link");
        assert_eq!(normalize(".btn ,  .link"), ".btn, .link");
    }

    #[test]
    fn empty_tokens_stringify_to_empty_string() {
        assert_eq!(stringify_selector(&[]), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for selector in [
            "div.class.another",
            "span#uniqueId",
            "a[href=\"https://example.com\"][target=\"_blank\"]",
            "button:disabled:hover",
            "p::first-line",
            "div#container > ul.items li.item:first-child::before",
            ".a,.b ,   .c",
            "*|span~svg|circle",
        ] {
            let once = normalize(selector);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent: {selector}");
        }
    }
}
