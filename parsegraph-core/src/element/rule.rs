/*!
Rule: ordered concatenation of child references (§4.7), with optional
whitespace elision between them via the grammar's skip element (§4.9).
*/

use crate::context::Context;
use crate::element::ElementHandle;
use crate::error::{EngineResult, GrammarBuildError};
use crate::matching::{Match, Recognized, RecognitionFailure};
use crate::reference::{recognize_many_optional, Reference};

/// A Rule's configuration: an ordered list of child references, all of
/// which must match in sequence.
pub struct RuleConfig {
    references: Vec<Reference>,
}

impl RuleConfig {
    pub(crate) fn new(references: Vec<Reference>) -> Result<Self, GrammarBuildError> {
        if references.is_empty() {
            return Err(GrammarBuildError::EmptyComposite { kind: "rule" });
        }
        Ok(RuleConfig { references })
    }

    /// This rule's children, in match order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

/// Recognize a Rule at the cursor: every reference must match in sequence,
/// with the grammar's skip element (if any) consumed between them. Skip
/// application is a `many_optional` recognition of the skip element (§4.9),
/// not a single attempt, so a composite skip (e.g. whitespace-or-comment)
/// keeps eliding runs of either until neither matches. If any reference
/// fails, the whole rule fails and the iterator is rewound to the rule's
/// starting offset, even though the references that already succeeded did
/// not themselves fail (§4.7: a rule is all-or-nothing).
pub(crate) fn recognize<U>(
    config: &RuleConfig,
    handle: ElementHandle,
    ctx: &mut Context<'_, U>,
) -> EngineResult<Recognized> {
    let start = ctx.iterator().pos();
    let skip = ctx.grammar().skip();
    let mut children: Vec<Match> = Vec::with_capacity(config.references.len());

    for (index, reference) in config.references.iter().enumerate() {
        if index > 0 {
            if let Some(skip) = skip {
                let _ = recognize_many_optional(ctx, skip)?;
            }
        }

        match reference.recognize(ctx)? {
            Ok(matched) => children.push(matched),
            Err(failure) => {
                let _ = failure;
                ctx.iterator().move_to(start);
                return Ok(Err(RecognitionFailure));
            }
        }
    }

    let end = ctx.iterator().pos();
    let mut iter = children.into_iter();
    let first = iter.next().expect("non-empty by construction");
    let chain = iter.fold(first, |acc, next| acc.push_next(next));

    let id = ctx
        .grammar()
        .element(handle)
        .id()
        .expect("prepare() assigns an id to every reachable element");
    Ok(Ok(Match::composite(id, start, end - start, chain)))
}
