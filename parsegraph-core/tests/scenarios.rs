use parsegraph_core::{Cardinality, Grammar, Reference};

/// Scenario A: `Expr = rule(one(Value), many_optional(Suffix))` over
/// `Value = group(one(NUMBER), one(VAR))`, `Suffix = rule(one(OP), one(Value))`.
/// Input `"1+2*x"` matches in full, with a three-element child chain.
#[test]
fn scenario_a_arithmetic_expression() {
    let mut grammar = Grammar::<()>::new();
    let number = grammar.token(r"\d+").unwrap();
    let var = grammar.token(r"\w+").unwrap();
    let op = grammar.token(r"[+\-*/]").unwrap();
    let value = grammar
        .group_handle([Reference::to(number), Reference::to(var)])
        .unwrap();
    let suffix = grammar
        .rule_handle([Reference::to(op), Reference::to(value)])
        .unwrap();
    let expr = grammar
        .rule_handle([
            Reference::to(value),
            Reference::to(suffix).cardinality(Cardinality::ManyOptional),
        ])
        .unwrap();
    grammar.set_axiom(expr);
    grammar.prepare().unwrap();

    let matched = grammar.parse_str("1+2*x").unwrap().expect("full match");
    assert_eq!(matched.length, 5);

    let children = matched
        .child
        .as_deref()
        .expect("Expr has a child chain")
        .siblings();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].offset, 0);
    assert_eq!(children[0].length, 1); // Value("1")
    assert_eq!(children[1].offset, 1);
    assert_eq!(children[1].length, 2); // Suffix("+2")
    assert_eq!(children[2].offset, 3);
    assert_eq!(children[2].length, 2); // Suffix("*x")
}

/// Scenario B: `rule(one(VAR), many_optional(OP))` over input `"x"` matches
/// with a trailing empty-chain reference for the unmatched repetition.
#[test]
fn scenario_b_empty_many_optional() {
    let mut grammar = Grammar::<()>::new();
    let var = grammar.token(r"\w+").unwrap();
    let op = grammar.token(r"[+\-*/]").unwrap();
    let rule = grammar
        .rule_handle([
            Reference::to(var),
            Reference::to(op).cardinality(Cardinality::ManyOptional),
        ])
        .unwrap();
    grammar.set_axiom(rule);
    grammar.prepare().unwrap();

    let matched = grammar.parse_str("x").unwrap().expect("full match");
    assert_eq!(matched.length, 1);

    let children = matched.child.as_deref().unwrap().siblings();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].length, 1); // VAR("x")
    assert_eq!(children[1].length, 0); // empty many_optional chain
    assert_eq!(children[1].element, None);
}

/// Scenario C: on a Rule's failure, the iterator rewinds all the way back
/// to the rule's starting offset, even though its first child matched.
#[test]
fn scenario_c_failure_rewind() {
    let mut grammar = Grammar::<()>::new();
    let foo = grammar.word("foo");
    let bar = grammar.word("bar");
    let rule = grammar
        .rule_handle([Reference::to(foo), Reference::to(bar)])
        .unwrap();
    grammar.set_axiom(rule);
    grammar.prepare().unwrap();

    cool_asserts::assert_matches!(grammar.parse_str("fooqux"), Ok(Err(_)));
}

/// Scenario D: a Group tries its alternatives in declaration order and
/// commits to the first success, not the longest.
#[test]
fn scenario_d_group_ordering() {
    let mut grammar = Grammar::<()>::new();
    let ab = grammar.word("ab");
    let a = grammar.word("a");
    let group = grammar
        .group_handle([Reference::to(ab), Reference::to(a)])
        .unwrap();
    grammar.set_axiom(group);
    grammar.prepare().unwrap();

    let matched = grammar.parse_str("ab").unwrap().expect("branch 0 matches");
    assert_eq!(matched.length, 2);

    let matched = grammar.parse_str("a").unwrap().expect("branch 1 matches");
    assert_eq!(matched.length, 1);
}

/// Scenario E: `List = rule(one(NUMBER), optional(rule(one(word(",")), one(List))))`
/// is a directly recursive grammar; `"1,2,3"` produces a right-nested tree.
/// `List` refers to itself before its own element exists, so it is built by
/// reserving its handle up front and filling in the definition once its
/// children (which need that same handle) are in place.
#[test]
fn scenario_e_recursive_grammar() {
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

/// Scenario F: a skip element is consumed between a Rule's children but
/// does not appear in the produced child chain.
#[test]
fn scenario_f_skip() {
    let mut grammar = Grammar::<()>::new();
    let ws = grammar.token(r"\s+").unwrap();
    grammar.set_skip(ws);

    let number = grammar.token(r"\d+").unwrap();
    let plus = grammar.word("+");
    let expr = grammar
        .rule_handle([
            Reference::to(number),
            Reference::to(plus),
            Reference::to(number),
        ])
        .unwrap();
    grammar.set_axiom(expr);
    grammar.prepare().unwrap();

    let matched = grammar.parse_str("1 + 2").unwrap().expect("full match");
    assert_eq!(matched.length, 5);
    assert_eq!(matched.child.as_deref().unwrap().siblings().len(), 3);
}
