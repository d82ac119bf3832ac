/*!
Token: a regular-expression match anchored at the cursor (§4.5).
*/

use regex::bytes::Regex;

use crate::context::Context;
use crate::element::ElementHandle;
use crate::error::GrammarBuildError;
use crate::matching::{MatchData, Match, Recognized, RecognitionFailure};

/// A Token's configuration: a compiled byte-oriented regex. Compiled once at
/// grammar-build time, not per recognition attempt.
pub struct TokenConfig {
    pattern: Regex,
}

impl TokenConfig {
    pub(crate) fn new(pattern: &str) -> Result<Self, GrammarBuildError> {
        let pattern =
            Regex::new(pattern).map_err(|source| GrammarBuildError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })?;
        Ok(TokenConfig { pattern })
    }

    /// The source text of this token's pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Recognize a Token at the cursor: `config`'s pattern must match starting
/// exactly at offset 0 of the remaining input (anchored-at-cursor, not
/// merely found somewhere ahead — `regex` has no native "anchor to start of
/// this slice" flag, so this checks the match's start offset explicitly
/// rather than prefixing every pattern with `^`, which would also change
/// the meaning of any `^`/`$` the caller's pattern already contains).
pub(crate) fn recognize<U>(
    config: &TokenConfig,
    handle: ElementHandle,
    ctx: &mut Context<'_, U>,
) -> Recognized {
    let start = ctx.iterator().pos();
    let input = ctx.iterator().peek_rest();

    let captures = match config.pattern.captures(input) {
        Some(captures) => captures,
        None => return Err(RecognitionFailure),
    };

    let whole = captures.get(0).expect("group 0 always participates");
    if whole.start() != 0 {
        return Err(RecognitionFailure);
    }
    let length = whole.end();

    let groups = captures
        .iter()
        .map(|group| group.map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned()))
        .collect();

    ctx.iterator().move_to(start + length);

    Ok(Match::leaf(
        ctx.grammar()
            .element(handle)
            .id()
            .expect("prepare() assigns an id to every reachable element"),
        start,
        length,
        MatchData::Captures(groups),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn matches_only_when_anchored_at_cursor() {
        let mut grammar = Grammar::<()>::new();
        let digits = grammar.token(r"[0-9]+").unwrap();
        grammar.set_axiom(digits);
        grammar.prepare().unwrap();

        cool_asserts::assert_matches!(grammar.parse_str("123abc"), Ok(Ok(_)));
        cool_asserts::assert_matches!(grammar.parse_str("abc123"), Ok(Err(_)));
    }

    #[test]
    fn captures_are_copied_out() {
        let mut grammar = Grammar::<()>::new();
        let kv = grammar.token(r"(?P<key>[a-z]+)=(?P<value>[0-9]+)").unwrap();
        grammar.set_axiom(kv);
        grammar.prepare().unwrap();

        let matched = grammar.parse_str("x=42").unwrap().unwrap();
        assert_eq!(matched.capture_group(1), Some("x"));
        assert_eq!(matched.capture_group(2), Some("42"));
    }

    #[test]
    fn invalid_pattern_reports_build_error() {
        let config = TokenConfig::new("(unterminated");
        assert!(config.is_err());
    }
}
