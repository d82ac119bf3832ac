use std::io::{self, Read};

use anyhow::Context;
use parsegraph_core::{Cardinality, Grammar, Match, Reference};

/// Builds the arithmetic-expression grammar used throughout this binary:
///
/// ```text
/// NUMBER = token("\d+")
/// VAR    = token("\w+")
/// OP     = token("[+\-*/]")
/// Value  = group(one(NUMBER), one(VAR))
/// Suffix = rule(one(OP), one(Value))
/// Expr   = rule(one(Value), many_optional(Suffix))
/// ```
fn arithmetic_grammar() -> anyhow::Result<Grammar<()>> {
    let mut grammar = Grammar::new();

    let number = grammar.token(r"\d+").context("building NUMBER token")?;
    grammar.name(number, "NUMBER");
    let var = grammar.token(r"\w+").context("building VAR token")?;
    grammar.name(var, "VAR");
    let op = grammar.token(r"[+\-*/]").context("building OP token")?;
    grammar.name(op, "OP");

    let value = grammar
        .group_handle([Reference::to(number), Reference::to(var)])
        .context("building Value group")?;
    grammar.name(value, "Value");

    let suffix = grammar
        .rule_handle([Reference::to(op), Reference::to(value)])
        .context("building Suffix rule")?;
    grammar.name(suffix, "Suffix");

    let expr = grammar
        .rule_handle([
            Reference::to(value),
            Reference::to(suffix).cardinality(Cardinality::ManyOptional),
        ])
        .context("building Expr rule")?;
    grammar.name(expr, "Expr");

    grammar.set_axiom(expr);
    grammar.prepare().context("preparing grammar")?;

    Ok(grammar)
}

fn print_match(m: &Match, depth: usize) {
    println!(
        "{:indent$}[{}..{}] element={:?}",
        "",
        m.offset,
        m.offset + m.length,
        m.element.map(|id| id.value()),
        indent = depth * 2,
    );
    if let Some(child) = m.child.as_deref() {
        print_match(child, depth + 1);
    }
    if let Some(next) = m.next.as_deref() {
        print_match(next, depth);
    }
}

fn main() -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read from stdin")?;
    let input = input.trim_end_matches('\n');

    let grammar = arithmetic_grammar().context("failed to build grammar")?;

    match grammar
        .parse_str(input)
        .context("a user callback aborted the parse")?
    {
        Ok(matched) => {
            println!("parsed {} bytes:", matched.length);
            print_match(&matched, 0);
        }
        Err(_) => {
            println!("no match");
        }
    }

    Ok(())
}
