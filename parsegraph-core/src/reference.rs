/*!
References: decorated edges from a composite element to a child element,
and the cardinality loop (§4.8) that each one applies.
*/

use crate::context::Context;
use crate::element::ElementHandle;
use crate::error::EngineResult;
use crate::matching::{Match, Recognized};

/// How many times a reference's element may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Exactly one match required. The default.
    #[default]
    One,
    /// Zero or one match.
    Optional,
    /// One or more matches.
    Many,
    /// Zero or more matches.
    ManyOptional,
}

/// A typed edge from a composite element (Group or Rule) to one child
/// element, carrying a [`Cardinality`] and an optional name used by
/// consumer callbacks to look children up by name.
#[derive(Debug, Clone)]
pub struct Reference {
    target: ElementHandle,
    cardinality: Cardinality,
    name: Option<String>,
}

impl Reference {
    /// A reference to `target` with `one` cardinality and no name.
    pub fn to(target: ElementHandle) -> Self {
        Reference {
            target,
            cardinality: Cardinality::default(),
            name: None,
        }
    }

    /// Set this reference's cardinality. Builder-style; consumes and
    /// returns `self`.
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Set this reference's name. Builder-style; consumes and returns
    /// `self`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The element this reference points at.
    pub fn target(&self) -> ElementHandle {
        self.target
    }

    /// This reference's cardinality.
    pub fn cardinality_value(&self) -> Cardinality {
        self.cardinality
    }

    /// This reference's name, if one was set.
    pub fn name_value(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Apply the cardinality loop (§4.8) for this reference at the
    /// iterator's current position.
    pub(crate) fn recognize<U>(&self, ctx: &mut Context<'_, U>) -> EngineResult<Recognized> {
        match self.cardinality {
            Cardinality::One => self.recognize_one(ctx),
            Cardinality::Optional => self.recognize_optional(ctx),
            Cardinality::Many => self.recognize_many(ctx, true),
            Cardinality::ManyOptional => self.recognize_many(ctx, false),
        }
    }

    fn recognize_one<U>(&self, ctx: &mut Context<'_, U>) -> EngineResult<Recognized> {
        ctx.recognize_element(self.target)
    }

    fn recognize_optional<U>(&self, ctx: &mut Context<'_, U>) -> EngineResult<Recognized> {
        let start = ctx.iterator().pos();
        match ctx.recognize_element(self.target)? {
            Ok(matched) => Ok(Ok(matched)),
            Err(failure) => {
                let _ = failure;
                debug_assert_eq!(ctx.iterator().pos(), start, "element must rewind on failure");
                Ok(Ok(Match::empty(start)))
            }
        }
    }

    /// Shared implementation for `many` (require_one = true) and
    /// `many_optional` (require_one = false).
    fn recognize_many<U>(
        &self,
        ctx: &mut Context<'_, U>,
        require_one: bool,
    ) -> EngineResult<Recognized> {
        let start = ctx.iterator().pos();
        let matches = recognize_many_optional(ctx, self.target)?;

        if matches.is_empty() {
            if require_one {
                Ok(Err(crate::matching::RecognitionFailure))
            } else {
                Ok(Ok(Match::empty(start)))
            }
        } else {
            let mut iter = matches.into_iter().rev();
            let mut chain = iter.next().expect("non-empty");
            for earlier in iter {
                chain = earlier.push_next(chain);
            }
            Ok(Ok(chain))
        }
    }
}

/// Repeatedly recognize `target` at the cursor until it fails, collecting
/// every success along the way. The zero-width termination guard (§4.8,
/// invariant 5) applies here too: a zero-width success ends the loop
/// immediately, since recognizing the same zero-width match again would
/// never fail and never advance the cursor.
///
/// This is the `many_optional` cardinality loop, factored out so it can also
/// drive the grammar's skip element (§4.9), which the spec describes as
/// "itself a Reference recognition with `many_optional` semantics" rather
/// than a single recognition attempt.
pub(crate) fn recognize_many_optional<U>(
    ctx: &mut Context<'_, U>,
    target: ElementHandle,
) -> EngineResult<Vec<Match>> {
    let mut matches = Vec::new();

    loop {
        let before = ctx.iterator().pos();
        match ctx.recognize_element(target)? {
            Err(failure) => {
                debug_assert_eq!(
                    ctx.iterator().pos(),
                    before,
                    "element must rewind on failure"
                );
                let _ = failure;
                break;
            }
            Ok(matched) => {
                let zero_width = matched.length == 0;
                matches.push(matched);
                if zero_width {
                    break;
                }
            }
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn optional_on_mismatch_yields_empty_match_without_consuming() {
        let mut grammar = Grammar::<()>::new();
        let word = grammar.word("foo");
        grammar.set_axiom(
            grammar.rule_handle([Reference::to(word).cardinality(Cardinality::Optional)])
                .unwrap(),
        );
        grammar.prepare().unwrap();

        let outcome = grammar.parse_str("bar").unwrap();
        let matched = outcome.expect("rule always succeeds with optional child");
        assert_eq!(matched.length, 0);
    }

    #[test]
    fn many_requires_at_least_one() {
        let mut grammar = Grammar::<()>::new();
        let word = grammar.word("a");
        let many_a = grammar
            .group_handle([Reference::to(word).cardinality(Cardinality::Many)])
            .unwrap();
        grammar.set_axiom(many_a);
        grammar.prepare().unwrap();

        cool_asserts::assert_matches!(grammar.parse_str(""), Ok(Err(_)));
        cool_asserts::assert_matches!(grammar.parse_str("aaa"), Ok(Ok(_)));
    }
}
