/*!
The parsing context: the per-parse-run state threaded through recognition.
*/

use crate::element::ElementHandle;
use crate::error::EngineResult;
use crate::grammar::Grammar;
use crate::iterator::Iterator;
use crate::matching::Recognized;

/// Per-parse-run state: the current iterator position, an offset history
/// (used for diagnostics — each entry is the start offset of a
/// currently-in-flight recognition attempt), a borrow of the grammar being
/// parsed, and a consumer-owned state slot of type `U` that
/// [`Procedure`][crate::element::procedure::ProcedureConfig] and
/// [`Condition`][crate::element::procedure::ConditionConfig] callbacks may
/// read and write (indentation stacks, symbol tables, and the like — never
/// process-wide globals).
pub struct Context<'g, U> {
    grammar: &'g Grammar<U>,
    iterator: Iterator,
    offset_history: Vec<usize>,
    /// Consumer-owned mutable state, visible to every Procedure and
    /// Condition callback during this parse.
    pub state: U,
}

impl<'g, U> Context<'g, U> {
    pub(crate) fn new(grammar: &'g Grammar<U>, iterator: Iterator, state: U) -> Self {
        Context {
            grammar,
            iterator,
            offset_history: Vec::new(),
            state,
        }
    }

    /// The grammar this context is parsing against.
    pub fn grammar(&self) -> &'g Grammar<U> {
        self.grammar
    }

    /// Mutable access to the iterator, for element recognition functions.
    pub fn iterator(&mut self) -> &mut Iterator {
        &mut self.iterator
    }

    /// Read-only access to the iterator, e.g. for a Condition callback that
    /// only wants to inspect position.
    pub fn iterator_ref(&self) -> &Iterator {
        &self.iterator
    }

    /// The offsets of recognition attempts currently in flight, outermost
    /// first. Purely diagnostic.
    pub fn offset_history(&self) -> &[usize] {
        &self.offset_history
    }

    /// Recognize the element identified by `handle` at the iterator's
    /// current position. This is how composite recognition (Group, Rule,
    /// Reference) recurses into children without the borrow checker
    /// confusing "the grammar I'm walking" with "the context I'm mutating":
    /// `grammar` is borrowed for `'g`, independent of `&mut self`, so it can
    /// be read out and handed to the child's `recognize` alongside a fresh
    /// `&mut self`.
    pub(crate) fn recognize_element(&mut self, handle: ElementHandle) -> EngineResult<Recognized> {
        let start = self.iterator.pos();
        self.offset_history.push(start);
        let grammar = self.grammar;
        let element = grammar.element(handle);
        let result = element.recognize(self);
        self.offset_history.pop();
        result
    }
}
