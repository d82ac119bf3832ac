/*!
Word: a literal byte-string match at the cursor (§4.4).
*/

use nom::bytes::complete::tag;

use crate::context::Context;
use crate::element::ElementHandle;
use crate::matching::{MatchData, Recognized, RecognitionFailure};

/// A Word's configuration: the literal bytes it must match.
pub struct WordConfig {
    literal: Vec<u8>,
}

impl WordConfig {
    pub(crate) fn new(literal: impl AsRef<[u8]>) -> Self {
        let literal = literal.as_ref().to_vec();
        assert!(!literal.is_empty(), "a word's literal must not be empty");
        WordConfig { literal }
    }

    /// The literal bytes this word matches.
    pub fn literal(&self) -> &[u8] {
        &self.literal
    }
}

/// Recognize a Word at the cursor: the input must begin with `config`'s
/// literal bytes exactly.
pub(crate) fn recognize<U>(
    config: &WordConfig,
    handle: ElementHandle,
    ctx: &mut Context<'_, U>,
) -> Recognized {
    let start = ctx.iterator().pos();
    let input = ctx.iterator().peek(config.literal.len());

    match tag::<_, _, nom::error::Error<&[u8]>>(config.literal.as_slice())(input) {
        Ok(_) => {
            ctx.iterator().move_to(start + config.literal.len());
            Ok(crate::matching::Match {
                offset: start,
                length: config.literal.len(),
                element: ctx.grammar().element(handle).id(),
                data: MatchData::None,
                child: None,
                next: None,
            })
        }
        Err(_) => Err(RecognitionFailure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::Iterator as ByteIterator;

    fn recognize_against(literal: &str, input: &str) -> Recognized {
        use crate::context::Context;
        use crate::grammar::Grammar;
        let mut grammar = Grammar::<()>::new();
        let handle = grammar.word(literal);
        let mut ctx = Context::new(&grammar, ByteIterator::from_str(input), ());
        recognize(&WordConfig::new(literal), handle, &mut ctx)
    }

    #[test]
    fn exact_literal_matches() {
        let result = recognize_against("foo", "foobar");
        let matched = result.expect("literal present at start");
        assert_eq!(matched.length, 3);
    }

    #[test]
    fn mismatch_fails_without_consuming() {
        assert!(recognize_against("foo", "barfoo").is_err());
    }
}
