/*!
A library for building and running dynamic, runtime-constructed parsing
grammars: a grammar is an arena of [`Element`][element::Element]s — Word,
Token, Group, Rule, Procedure, and Condition — wired together with
cardinality-decorated [`Reference`][reference::Reference]s, with no
compilation step between building a grammar and parsing with it.

A typical grammar is built incrementally:

```
use parsegraph_core::{Grammar, Reference};

let mut grammar = Grammar::<()>::new();
let hello = grammar.word("hello");
let world = grammar.word("world");
let space = grammar.token(r"\s+").unwrap();
let greeting = grammar
    .rule_handle([
        Reference::to(hello),
        Reference::to(space),
        Reference::to(world),
    ])
    .unwrap();
grammar.set_axiom(greeting);
grammar.prepare().unwrap();

let outcome = grammar.parse_str("hello world").unwrap();
assert!(outcome.is_ok());
```

Recursive and mutually recursive grammars are supported directly: since
references carry [`ElementHandle`][element::ElementHandle]s rather than
owning pointers, a Group or Rule can refer to an element defined later, or
to itself, without any forward-declaration ceremony beyond obtaining the
handle first.
*/

pub mod context;
pub mod element;
pub mod error;
pub mod grammar;
pub mod iterator;
pub mod matching;
pub mod reference;

pub use context::Context;
pub use element::{Element, ElementHandle, ElementId, ElementKind};
pub use error::{EngineResult, GrammarBuildError, IoError, UserCallbackError};
pub use grammar::Grammar;
pub use iterator::{Iterator, IteratorStatus};
pub use matching::{Match, MatchData, Recognized, RecognitionFailure};
pub use reference::{Cardinality, Reference};
