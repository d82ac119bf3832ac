/*!
Error types for the engine. Each concern gets its own type rather than one
flat enum, matching the shape of the rest of the public API: construction
errors, I/O errors, and user-callback errors are raised from different
operations and are never confused with `FAILURE`, which is not an error
at all (see [`crate::matching::Recognized`]).
*/

use thiserror::Error;

use crate::element::ElementHandle;

/// Grammar construction failed. Raised by the [`Grammar`][crate::grammar::Grammar]
/// builder methods, or by [`Grammar::prepare`][crate::grammar::Grammar::prepare]
/// once a grammar's full reachable shape is known; never raised during
/// parsing.
#[derive(Debug, Error)]
pub enum GrammarBuildError {
    /// A [`Token`][crate::element::token::TokenConfig] was built from a pattern
    /// the regex engine rejected.
    #[error("invalid token pattern {pattern:?}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: regex::Error,
    },

    /// A [`Group`][crate::element::group::GroupConfig] or
    /// [`Rule`][crate::element::rule::RuleConfig] was constructed with no
    /// child references.
    #[error("{kind} must have at least one child reference")]
    EmptyComposite {
        /// `"group"` or `"rule"`, for the error message.
        kind: &'static str,
    },

    /// A handle obtained from [`Grammar::reserve`][crate::grammar::Grammar::reserve]
    /// is reachable from the axiom or skip element but was never given a
    /// definition via `define_group`/`define_rule`. Detected by
    /// [`Grammar::prepare`][crate::grammar::Grammar::prepare], which is the
    /// earliest point a grammar's full reachable shape is known.
    #[error("element {handle} is reachable from the axiom but was never defined")]
    UndefinedElement {
        /// The dangling, reserved-but-undefined handle.
        handle: ElementHandle,
    },
}

/// The iterator could not open or read its source.
#[derive(Debug, Error)]
#[error("iterator I/O error")]
pub struct IoError(#[from] pub std::io::Error);

/// A [`Procedure`][crate::element::procedure::ProcedureConfig] or
/// [`Condition`][crate::element::procedure::ConditionConfig] callback raised
/// an error. This aborts the parse synchronously; the partial match tree is
/// dropped and the iterator is left at an implementation-defined position.
#[derive(Debug, Error)]
#[error("user callback error: {0}")]
pub struct UserCallbackError(pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl UserCallbackError {
    /// Wrap any error as a `UserCallbackError`.
    pub fn new(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(error))
    }

    /// Build a `UserCallbackError` from a plain message, for callbacks that
    /// don't have a richer error type of their own.
    pub fn msg(message: impl Into<String>) -> Self {
        #[derive(Debug, Error)]
        #[error("{0}")]
        struct Message(String);

        Self(Box::new(Message(message.into())))
    }
}

/// The result of an operation that may be aborted by a user callback.
/// Ordinary recognition failure is *not* an error and never appears here;
/// see [`crate::matching::Recognized`].
pub type EngineResult<T> = Result<T, UserCallbackError>;
