/*!
Grammar: the arena owning every element, and the builder/driver API used to
construct and run one.
*/

use std::collections::HashSet;
use std::path::Path;

use crate::context::Context;
use crate::element::group::GroupConfig;
use crate::element::procedure::{ConditionConfig, ConditionFn, ProcedureConfig, ProcedureFn};
use crate::element::rule::RuleConfig;
use crate::element::token::TokenConfig;
use crate::element::word::WordConfig;
use crate::element::{Element, ElementHandle, ElementId, ElementPayload};
use crate::error::{EngineResult, GrammarBuildError, IoError};
use crate::iterator::Iterator;
use crate::matching::Recognized;
use crate::reference::Reference;

/// A grammar: an arena of [`Element`]s plus the axiom and (optional) skip
/// element that together define how to parse an input.
///
/// `U` is consumer state threaded through every [`Procedure`][crate::element::procedure::ProcedureConfig]
/// and [`Condition`][crate::element::procedure::ConditionConfig] callback
/// during a parse; grammars with no need for shared state use `U = ()`.
pub struct Grammar<U> {
    // `None` slots are reserved handles (see `reserve`) awaiting a
    // definition; recursive and mutually recursive grammars wire a
    // `Reference` to a handle before its element exists.
    elements: Vec<Option<Element<U>>>,
    axiom: Option<ElementHandle>,
    skip: Option<ElementHandle>,
}

impl<U> Grammar<U> {
    /// Build an empty grammar with no elements, axiom, or skip.
    pub fn new() -> Self {
        Grammar {
            elements: Vec::new(),
            axiom: None,
            skip: None,
        }
    }

    fn push(&mut self, payload: ElementPayload<U>) -> ElementHandle {
        let handle = ElementHandle(self.elements.len() as u32);
        self.elements.push(Some(Element::new(handle, payload)));
        handle
    }

    /// Reserve a handle with no definition yet. Used to build recursive or
    /// mutually recursive grammars: obtain the handle, wire up
    /// [`Reference`]s to it, and fill it in afterward with one of the
    /// `define_*` methods.
    ///
    /// # Panics
    ///
    /// `prepare()` and parsing both panic if a reserved handle reachable
    /// from the axiom is never defined.
    pub fn reserve(&mut self) -> ElementHandle {
        let handle = ElementHandle(self.elements.len() as u32);
        self.elements.push(None);
        handle
    }

    fn define(&mut self, handle: ElementHandle, payload: ElementPayload<U>) {
        let slot = &mut self.elements[handle.index()];
        assert!(slot.is_none(), "element {handle} is already defined");
        *slot = Some(Element::new(handle, payload));
    }

    /// Add a Word element matching the given literal bytes exactly.
    pub fn word(&mut self, literal: impl AsRef<[u8]>) -> ElementHandle {
        self.push(ElementPayload::Word(WordConfig::new(literal)))
    }

    /// Add a Token element matching `pattern` anchored at the cursor.
    pub fn token(&mut self, pattern: &str) -> Result<ElementHandle, GrammarBuildError> {
        let config = TokenConfig::new(pattern)?;
        Ok(self.push(ElementPayload::Token(config)))
    }

    /// Add a Group element: ordered choice among `references`.
    pub fn group_handle(
        &mut self,
        references: impl IntoIterator<Item = Reference>,
    ) -> Result<ElementHandle, GrammarBuildError> {
        let config = GroupConfig::new(references.into_iter().collect())?;
        Ok(self.push(ElementPayload::Group(config)))
    }

    /// Add a Rule element: ordered concatenation of `references`.
    pub fn rule_handle(
        &mut self,
        references: impl IntoIterator<Item = Reference>,
    ) -> Result<ElementHandle, GrammarBuildError> {
        let config = RuleConfig::new(references.into_iter().collect())?;
        Ok(self.push(ElementPayload::Rule(config)))
    }

    /// Add a Procedure element: runs `callback` for effect and always
    /// succeeds with a zero-width match.
    pub fn procedure(
        &mut self,
        callback: impl Fn(&mut Context<'_, U>) -> EngineResult<()> + 'static,
    ) -> ElementHandle {
        let config = ProcedureConfig::new(Box::new(callback) as ProcedureFn<U>);
        self.push(ElementPayload::Procedure(config))
    }

    /// Add a Condition element: consults `callback` as a zero-width
    /// predicate.
    pub fn condition(
        &mut self,
        callback: impl Fn(&Context<'_, U>) -> EngineResult<bool> + 'static,
    ) -> ElementHandle {
        let config = ConditionConfig::new(Box::new(callback) as ConditionFn<U>);
        self.push(ElementPayload::Condition(config))
    }

    /// Define a previously [`reserve`][Self::reserve]d handle as a Group.
    pub fn define_group(
        &mut self,
        handle: ElementHandle,
        references: impl IntoIterator<Item = Reference>,
    ) -> Result<(), GrammarBuildError> {
        let config = GroupConfig::new(references.into_iter().collect())?;
        self.define(handle, ElementPayload::Group(config));
        Ok(())
    }

    /// Define a previously [`reserve`][Self::reserve]d handle as a Rule.
    pub fn define_rule(
        &mut self,
        handle: ElementHandle,
        references: impl IntoIterator<Item = Reference>,
    ) -> Result<(), GrammarBuildError> {
        let config = RuleConfig::new(references.into_iter().collect())?;
        self.define(handle, ElementPayload::Rule(config));
        Ok(())
    }

    /// Attach a debug name to an element, used in trace logging and visible
    /// via [`Element::name`].
    pub fn name(&mut self, handle: ElementHandle, name: impl Into<String>) {
        self.elements[handle.index()]
            .as_mut()
            .expect("element is reserved but not yet defined")
            .set_name(name);
    }

    /// Set the grammar's axiom: the element `parse_*` starts recognition
    /// from.
    pub fn set_axiom(&mut self, handle: ElementHandle) {
        self.axiom = Some(handle);
    }

    /// Set the grammar's skip element, consumed between a Rule's children
    /// (§4.9). `None` (the default) means no whitespace elision.
    pub fn set_skip(&mut self, handle: ElementHandle) {
        self.skip = Some(handle);
    }

    /// The grammar's current skip element, if any.
    pub(crate) fn skip(&self) -> Option<ElementHandle> {
        self.skip
    }

    /// The grammar's current axiom, if any.
    pub fn axiom(&self) -> Option<ElementHandle> {
        self.axiom
    }

    /// Look up an element by its construction-time handle.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was [`reserve`][Self::reserve]d but never defined.
    /// Not reachable from ordinary recognition: every handle this is called
    /// with either belongs to the element currently recognizing itself, or
    /// was validated reachable-and-defined by [`prepare`][Self::prepare],
    /// which reports the same condition as
    /// [`GrammarBuildError::UndefinedElement`] instead of panicking.
    pub(crate) fn element(&self, handle: ElementHandle) -> &Element<U> {
        self.elements[handle.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("element {handle} was reserved but never defined"))
    }

    /// Assign every reachable element a fresh [`ElementId`], as its
    /// breadth-first distance from the axiom. The axiom and the skip
    /// element (if set) both seed the search at distance 0, since the skip
    /// element is consulted during parsing even though it is never a
    /// regular child reference. Elements unreachable from either keep no
    /// id and cannot appear in a produced [`Match`][crate::matching::Match].
    ///
    /// Safe to call more than once; each call recomputes ids from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarBuildError::UndefinedElement`] if a handle obtained
    /// from [`reserve`][Self::reserve] is reachable from the axiom or skip
    /// element but was never filled in with `define_group`/`define_rule`.
    /// `prepare` is the first point such a handle's reachability is known,
    /// so it is where this is caught rather than at `reserve`-time.
    pub fn prepare(&mut self) -> Result<(), GrammarBuildError> {
        log::debug!("preparing grammar: {} elements total", self.elements.len());

        for slot in &self.elements {
            if let Some(element) = slot {
                element.clear_id();
            }
        }

        let mut visited: HashSet<ElementHandle> = HashSet::new();
        let mut frontier: Vec<ElementHandle> = self.axiom.into_iter().chain(self.skip).collect();
        for handle in &frontier {
            visited.insert(*handle);
        }

        let mut distance = 0u32;
        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for handle in &frontier {
                let element = self.elements[handle.index()]
                    .as_ref()
                    .ok_or(GrammarBuildError::UndefinedElement { handle: *handle })?;
                element.set_id(ElementId::from_raw(distance));
                for reference in element.children() {
                    let target = reference.target();
                    if visited.insert(target) {
                        next_frontier.push(target);
                    }
                }
            }
            log::trace!("prepare: distance {} has {} elements", distance, frontier.len());
            frontier = next_frontier;
            distance += 1;
        }
        Ok(())
    }

    /// Parse `iterator` against this grammar's axiom, threading `state`
    /// through any Procedure/Condition callbacks invoked along the way.
    ///
    /// # Panics
    ///
    /// Panics if no axiom has been set via [`set_axiom`][Self::set_axiom].
    pub fn parse_from_iterator(&self, iterator: Iterator, state: U) -> EngineResult<Recognized> {
        let axiom = self
            .axiom
            .expect("grammar has no axiom set; call set_axiom before parsing");
        let mut ctx = Context::new(self, iterator, state);
        ctx.recognize_element(axiom)
    }
}

impl<U: Default> Grammar<U> {
    /// Parse a byte buffer, using `U::default()` as the initial consumer
    /// state.
    pub fn parse_bytes(&self, bytes: impl Into<Vec<u8>>) -> EngineResult<Recognized> {
        self.parse_from_iterator(Iterator::from_bytes(bytes), U::default())
    }

    /// Parse a string's UTF-8 bytes, using `U::default()` as the initial
    /// consumer state.
    pub fn parse_str(&self, input: &str) -> EngineResult<Recognized> {
        self.parse_from_iterator(Iterator::from_str(input), U::default())
    }

    /// Parse a file's contents, using `U::default()` as the initial
    /// consumer state.
    pub fn parse_from_path(&self, path: impl AsRef<Path>) -> Result<EngineResult<Recognized>, IoError> {
        let iterator = Iterator::open(path)?;
        Ok(self.parse_from_iterator(iterator, U::default()))
    }
}

impl<U> Default for Grammar<U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Cardinality;

    #[test]
    fn prepare_assigns_bfs_distance_ids() {
        let mut grammar = Grammar::<()>::new();
        let a = grammar.word("a");
        let b = grammar.word("b");
        let rule = grammar
            .rule_handle([Reference::to(a), Reference::to(b)])
            .unwrap();
        grammar.set_axiom(rule);
        grammar.prepare().unwrap();

        assert_eq!(grammar.element(rule).id().unwrap().value(), 0);
        assert_eq!(grammar.element(a).id().unwrap().value(), 1);
        assert_eq!(grammar.element(b).id().unwrap().value(), 1);
    }

    #[test]
    fn unreachable_elements_have_no_id_after_prepare() {
        let mut grammar = Grammar::<()>::new();
        let reachable = grammar.word("a");
        let orphan = grammar.word("b");
        grammar.set_axiom(reachable);
        grammar.prepare().unwrap();

        assert!(grammar.element(reachable).id().is_some());
        assert!(grammar.element(orphan).id().is_none());
    }

    #[test]
    #[should_panic(expected = "no axiom set")]
    fn parsing_without_an_axiom_panics() {
        let grammar = Grammar::<()>::new();
        let _ = grammar.parse_str("x");
    }

    #[test]
    fn reserve_then_define_supports_self_reference() {
        let mut grammar = Grammar::<()>::new();
        let number = grammar.token(r"\d+").unwrap();
        let comma = grammar.word(",");

        let list = grammar.reserve();
        let tail = grammar
            .rule_handle([Reference::to(comma), Reference::to(list)])
            .unwrap();
        let optional_tail = grammar
            .group_handle([Reference::to(tail).cardinality(Cardinality::Optional)])
            .unwrap();
        grammar
            .define_rule(list, [Reference::to(number), Reference::to(optional_tail)])
            .unwrap();

        grammar.set_axiom(list);
        grammar.prepare().unwrap();

        let matched = grammar.parse_str("1,2,3").unwrap().expect("full match");
        assert_eq!(matched.length, 5);
    }

    #[test]
    fn unfilled_reservation_is_reported_by_prepare() {
        let mut grammar = Grammar::<()>::new();
        let dangling = grammar.reserve();
        grammar.set_axiom(dangling);

        let err = grammar.prepare().unwrap_err();
        assert!(matches!(
            err,
            GrammarBuildError::UndefinedElement { handle } if handle == dangling
        ));
    }
}
