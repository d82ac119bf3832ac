/*!
Parsing elements: the nodes of the grammar graph.

An element is a polymorphic recognizer with one of six variants (Word,
Token, Group, Rule, Procedure, Condition). The spec's design notes call for
modeling the grammar as an arena that owns all elements, with edges
(references) carrying ids rather than owning pointers, so that cyclic
grammar graphs — direct or mutual recursion — don't require an owning tree.
This module realizes that: [`ElementHandle`] is the construction-time arena
key a consumer holds onto and wires into [`Reference`][crate::reference::Reference]s,
while [`ElementId`] is the separate, BFS-distance-from-axiom id that
[`Grammar::prepare`][crate::grammar::Grammar::prepare] assigns and that
appears on produced [`Match`][crate::matching::Match] nodes.
*/

pub mod group;
pub mod procedure;
pub mod rule;
pub mod token;
pub mod word;

use std::cell::Cell;
use std::fmt;

use crate::context::Context;
use crate::error::EngineResult;
use crate::matching::Recognized;

use group::GroupConfig;
use procedure::{ConditionConfig, ProcedureConfig};
use rule::RuleConfig;
use token::TokenConfig;
use word::WordConfig;

/// A construction-time handle to an element, returned by the
/// [`Grammar`][crate::grammar::Grammar] builder methods. Stable for the
/// lifetime of the grammar; used to wire [`Reference`][crate::reference::Reference]s,
/// the axiom, and the skip element together before (or after) `prepare()`
/// has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub(crate) u32);

impl ElementHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The id `Grammar::prepare` assigns to a reachable element, as its
/// breadth-first distance from the axiom. Unlike [`ElementHandle`], this is
/// only meaningful after `prepare()` has run, is re-derived on every call to
/// `prepare()`, and is what appears on produced [`Match`][crate::matching::Match]
/// nodes (see invariant 3, id uniqueness, in the spec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn from_raw(n: u32) -> Self {
        ElementId(n)
    }

    /// The raw BFS distance this id represents.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type tag of a parsing element. Exists separately from [`ElementPayload`]
/// so consumers (and the `prepare()` logger) can ask "what kind of element is
/// this" without matching out the (possibly large) payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Word,
    Token,
    Group,
    Rule,
    Procedure,
    Condition,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Word => "word",
            ElementKind::Token => "token",
            ElementKind::Group => "group",
            ElementKind::Rule => "rule",
            ElementKind::Procedure => "procedure",
            ElementKind::Condition => "condition",
        };
        f.write_str(s)
    }
}

/// The variant-specific configuration of an element.
pub enum ElementPayload<U> {
    Word(WordConfig),
    Token(TokenConfig),
    Group(GroupConfig),
    Rule(RuleConfig),
    Procedure(ProcedureConfig<U>),
    Condition(ConditionConfig<U>),
}

impl<U> ElementPayload<U> {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementPayload::Word(_) => ElementKind::Word,
            ElementPayload::Token(_) => ElementKind::Token,
            ElementPayload::Group(_) => ElementKind::Group,
            ElementPayload::Rule(_) => ElementKind::Rule,
            ElementPayload::Procedure(_) => ElementKind::Procedure,
            ElementPayload::Condition(_) => ElementKind::Condition,
        }
    }
}

/// One node of the grammar graph. Owned by the [`Grammar`][crate::grammar::Grammar]'s
/// element registry; never owned by a single parent, since composites refer
/// to their children by [`ElementHandle`], not by owning pointer.
pub struct Element<U> {
    handle: ElementHandle,
    name: Option<String>,
    id: Cell<Option<ElementId>>,
    payload: ElementPayload<U>,
}

impl<U> Element<U> {
    pub(crate) fn new(handle: ElementHandle, payload: ElementPayload<U>) -> Self {
        Element {
            handle,
            name: None,
            id: Cell::new(None),
            payload,
        }
    }

    /// This element's construction-time handle.
    pub fn handle(&self) -> ElementHandle {
        self.handle
    }

    /// This element's debug name, if one was set via
    /// [`Grammar::name`][crate::grammar::Grammar::name].
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// This element's type tag.
    pub fn kind(&self) -> ElementKind {
        self.payload.kind()
    }

    /// This element's BFS id, if `Grammar::prepare` has run since this
    /// element was added.
    pub fn id(&self) -> Option<ElementId> {
        self.id.get()
    }

    pub(crate) fn set_id(&self, id: ElementId) {
        self.id.set(Some(id));
    }

    pub(crate) fn clear_id(&self) {
        self.id.set(None);
    }

    pub(crate) fn payload(&self) -> &ElementPayload<U> {
        &self.payload
    }

    /// If this is a composite element (Group or Rule), its child references
    /// in declaration order; otherwise an empty slice.
    pub fn children(&self) -> &[crate::reference::Reference] {
        match &self.payload {
            ElementPayload::Group(config) => config.references(),
            ElementPayload::Rule(config) => config.references(),
            _ => &[],
        }
    }

    /// Recognize this element at the iterator's current position.
    pub(crate) fn recognize(&self, ctx: &mut Context<'_, U>) -> EngineResult<Recognized> {
        log::trace!(
            "recognizing {} {:?} at offset {}",
            self.kind(),
            self.name(),
            ctx.iterator().pos()
        );
        match &self.payload {
            ElementPayload::Word(config) => Ok(word::recognize(config, self.handle, ctx)),
            ElementPayload::Token(config) => Ok(token::recognize(config, self.handle, ctx)),
            ElementPayload::Group(config) => group::recognize(config, self.handle, ctx),
            ElementPayload::Rule(config) => rule::recognize(config, self.handle, ctx),
            ElementPayload::Procedure(config) => procedure::recognize_procedure(config, ctx),
            ElementPayload::Condition(config) => procedure::recognize_condition(config, ctx),
        }
    }
}
