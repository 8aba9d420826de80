//! At-rule token stringification.

use super::token::AtRuleToken;

/// Reassemble a token sequence into an at-rule prelude string.
///
/// Joins every token's `content` with a single space, including around
/// delimiters. The result is a normalizing round trip: re-tokenizing
/// it yields the same token sequence, but the original tight spacing
/// (e.g. `min-width:768px`) is not reproduced byte for byte.
///
/// An empty token sequence stringifies to the empty string.
pub fn stringify_at_rule(tokens: &[AtRuleToken]) -> String {
    tokens
        .iter()
        .map(AtRuleToken::content)
        .collect::<Vec<_>>()
        .join(" ")
}
