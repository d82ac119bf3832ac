/*!
Group: ordered choice among child references (§4.6).
*/

use crate::context::Context;
use crate::element::ElementHandle;
use crate::error::{EngineResult, GrammarBuildError};
use crate::matching::{Match, Recognized, RecognitionFailure};
use crate::reference::Reference;

/// A Group's configuration: an ordered list of child references, tried in
/// order until one succeeds.
pub struct GroupConfig {
    references: Vec<Reference>,
}

impl GroupConfig {
    pub(crate) fn new(references: Vec<Reference>) -> Result<Self, GrammarBuildError> {
        if references.is_empty() {
            return Err(GrammarBuildError::EmptyComposite { kind: "group" });
        }
        Ok(GroupConfig { references })
    }

    /// This group's children, in trial order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

/// Recognize a Group at the cursor: try each reference in order at the
/// unchanged starting position, and succeed with the first one that does.
/// Each attempted reference is responsible for rewinding the iterator on
/// its own failure (the rewind-on-failure invariant, §5); a Group never
/// rewinds on behalf of its children, only relies on it.
pub(crate) fn recognize<U>(
    config: &GroupConfig,
    handle: ElementHandle,
    ctx: &mut Context<'_, U>,
) -> EngineResult<Recognized> {
    let start = ctx.iterator().pos();

    for reference in &config.references {
        match reference.recognize(ctx)? {
            Ok(matched) => {
                let length = matched.length;
                let id = ctx
                    .grammar()
                    .element(handle)
                    .id()
                    .expect("prepare() assigns an id to every reachable element");
                return Ok(Ok(Match::composite(id, start, length, matched)));
            }
            Err(failure) => {
                debug_assert_eq!(
                    ctx.iterator().pos(),
                    start,
                    "reference must rewind on failure"
                );
                let _ = failure;
            }
        }
    }

    Ok(Err(RecognitionFailure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::reference::Reference;

    #[test]
    fn first_matching_alternative_wins() {
        let mut grammar = Grammar::<()>::new();
        let cat = grammar.word("cat");
        let dog = grammar.word("dog");
        let choice = grammar
            .group_handle([Reference::to(cat), Reference::to(dog)])
            .unwrap();
        grammar.set_axiom(choice);
        grammar.prepare().unwrap();

        cool_asserts::assert_matches!(grammar.parse_str("dog"), Ok(Ok(_)));
        cool_asserts::assert_matches!(grammar.parse_str("cow"), Ok(Err(_)));
    }

    #[test]
    fn empty_group_is_rejected_at_build_time() {
        let mut grammar = Grammar::<()>::new();
        assert!(grammar.group_handle(Vec::new()).is_err());
    }
}
