/*!
Procedure and Condition: zero-width elements that run a consumer callback
instead of consuming input (§4.10).
*/

use crate::context::Context;
use crate::error::EngineResult;
use crate::matching::{Match, Recognized, RecognitionFailure};

/// A callback invoked by a Procedure: runs for its side effect and cannot
/// fail the parse by itself (a genuine error still propagates via the
/// `EngineResult` outer layer).
pub type ProcedureFn<U> = Box<dyn Fn(&mut Context<'_, U>) -> EngineResult<()>>;

/// A callback invoked by a Condition: inspects context and reports whether
/// parsing may continue from here.
pub type ConditionFn<U> = Box<dyn Fn(&Context<'_, U>) -> EngineResult<bool>>;

/// A Procedure's configuration: a single callback run for effect.
pub struct ProcedureConfig<U> {
    callback: ProcedureFn<U>,
}

impl<U> ProcedureConfig<U> {
    pub(crate) fn new(callback: ProcedureFn<U>) -> Self {
        ProcedureConfig { callback }
    }
}

/// A Condition's configuration: a single callback consulted as a predicate.
pub struct ConditionConfig<U> {
    callback: ConditionFn<U>,
}

impl<U> ConditionConfig<U> {
    pub(crate) fn new(callback: ConditionFn<U>) -> Self {
        ConditionConfig { callback }
    }
}

/// Run a Procedure: always succeeds with a zero-width match at the current
/// offset, after running its callback for effect.
pub(crate) fn recognize_procedure<U>(
    config: &ProcedureConfig<U>,
    ctx: &mut Context<'_, U>,
) -> EngineResult<Recognized> {
    let offset = ctx.iterator().pos();
    (config.callback)(ctx)?;
    Ok(Ok(Match::empty(offset)))
}

/// Run a Condition: a zero-width match if the callback reports `true`,
/// `RecognitionFailure` (not an error) if it reports `false`.
pub(crate) fn recognize_condition<U>(
    config: &ConditionConfig<U>,
    ctx: &mut Context<'_, U>,
) -> EngineResult<Recognized> {
    let offset = ctx.iterator().pos();
    if (config.callback)(ctx)? {
        Ok(Ok(Match::empty(offset)))
    } else {
        Ok(Err(RecognitionFailure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn procedure_always_succeeds_and_runs_once() {
        let mut grammar = Grammar::<()>::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let proc = grammar.procedure(move |_ctx| {
            calls_clone.set(calls_clone.get() + 1);
            Ok(())
        });
        grammar.set_axiom(proc);
        grammar.prepare().unwrap();

        let matched = grammar.parse_str("anything").unwrap().unwrap();
        assert_eq!(matched.length, 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn condition_false_fails_without_error() {
        let mut grammar = Grammar::<()>::new();
        let never = grammar.condition(|_ctx| Ok(false));
        grammar.set_axiom(never);
        grammar.prepare().unwrap();

        assert!(grammar.parse_str("x").unwrap().is_err());
    }
}
