/*!
The match tree: the result datum of recognition.

The spec describes `Match | FAILURE` as a tagged union with a statically
allocated failure sentinel compared by identity. The natural Rust rendering
of "a sum of a real value and a valueless, non-allocating failure case" is
[`Result`] with a zero-sized error type — so [`Recognized`] plays the role
of the spec's `Match*` return value, and [`RecognitionFailure`] plays the
role of `FAILURE`: it carries no data, requires no allocation, and (being
zero-sized) every instance of it is indistinguishable from every other,
which is the only property the spec actually needs from pointer identity.
*/

use crate::element::ElementId;

/// The `FAILURE` sentinel. Zero-sized: there is nothing to allocate and
/// nothing to free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecognitionFailure;

/// The result of recognizing one element or reference: either a match, or
/// [`RecognitionFailure`]. Not an error — see [`crate::error`] for the
/// distinction between this and a genuine aborted parse.
pub type Recognized = Result<Match, RecognitionFailure>;

/// Per-variant data carried by a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchData {
    /// No payload (Word, Group, Rule, Procedure, Condition, and empty
    /// matches all carry none).
    #[default]
    None,
    /// Captured groups from a [`Token`][crate::element::token] match, copied
    /// out of the input buffer. Index 0 is the whole match.
    Captures(Vec<Option<String>>),
}

/// One node of the match tree.
///
/// `child` points at the first nested match (for Group and Rule); `next`
/// chains repetitions produced by a `many*` [`Reference`][crate::reference::Reference]
/// or successive children of a Rule. Both are owned, so dropping a `Match`
/// recursively drops its entire subtree — the Rust analogue of the spec's
/// "freeing a match recursively frees its child and next chain".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Absolute input offset where this match began.
    pub offset: usize,
    /// Number of input bytes consumed.
    pub length: usize,
    /// The element that produced this match. `None` for the zero-width
    /// "empty" match produced by an unmatched `optional`/`many_optional`
    /// reference.
    pub element: Option<ElementId>,
    /// Variant-specific payload.
    pub data: MatchData,
    /// First child match, for composite (Group/Rule) matches.
    pub child: Option<Box<Match>>,
    /// Next sibling in a repetition chain or Rule child chain.
    pub next: Option<Box<Match>>,
}

impl Match {
    /// Build an empty (zero-width, element-less) match at `offset`. This is
    /// the "empty match" result for an unmatched `optional`/`many_optional`
    /// reference.
    pub fn empty(offset: usize) -> Self {
        Match {
            offset,
            length: 0,
            element: None,
            data: MatchData::None,
            child: None,
            next: None,
        }
    }

    /// Build a leaf match (no children) for `element`, spanning
    /// `[offset, offset + length)`.
    pub fn leaf(element: ElementId, offset: usize, length: usize, data: MatchData) -> Self {
        Match {
            offset,
            length,
            element: Some(element),
            data,
            child: None,
            next: None,
        }
    }

    /// Build a composite match for `element`, wrapping `child` as its first
    /// nested match.
    pub fn composite(element: ElementId, offset: usize, length: usize, child: Match) -> Self {
        Match {
            offset,
            length,
            element: Some(element),
            data: MatchData::None,
            child: Some(Box::new(child)),
            next: None,
        }
    }

    /// Append `sibling` at the end of this match's `next` chain, returning
    /// `self` for chaining.
    pub fn push_next(mut self, sibling: Match) -> Self {
        let mut tail = &mut self.next;
        while let Some(existing) = tail {
            tail = &mut existing.next;
        }
        *tail = Some(Box::new(sibling));
        self
    }

    /// The `i`-th capture group of a Token match, or `None` if this isn't a
    /// Token match, the group didn't participate, or the index is out of
    /// range. Index 0 is the whole match, matching the regex convention.
    pub fn capture_group(&self, i: usize) -> Option<&str> {
        match &self.data {
            MatchData::Captures(groups) => groups.get(i)?.as_deref(),
            MatchData::None => None,
        }
    }

    /// Pre-order depth-first walk starting at `self`: visit `self`, then
    /// recursively walk `child`, then advance to `next` and repeat. Returns
    /// the number of nodes visited.
    pub fn walk(&self, visit: &mut impl FnMut(&Match)) -> usize {
        let mut count = 0;
        let mut current = Some(self);
        while let Some(node) = current {
            visit(node);
            count += 1;
            if let Some(child) = node.child.as_deref() {
                count += child.walk(visit);
            }
            current = node.next.as_deref();
        }
        count
    }

    /// Collect the `next`-chain starting at `self` (inclusive) into a
    /// `Vec`, for callers that would rather index named children than walk.
    pub fn siblings(&self) -> Vec<&Match> {
        let mut out = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            out.push(node);
            current = node.next.as_deref();
        }
        out
    }
}
