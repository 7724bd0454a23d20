//! Built-in primitive predicates for `@apply`.
//!
//! Only two binary comparators are built in, per the language's non-goals
//! (no user-defined primitives, no general arithmetic). Arguments arrive
//! already resolved to either a number (parsed as `i64`) or a word.

use crate::term::Term;

/// A fully-resolved `@apply` argument: either a numeric value or an
/// arbitrary word, matching the reference's "numeric strings are coerced to
/// integers" rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Word(String),
}

impl Value {
    fn from_term(term: &Term) -> Option<Value> {
        let atom = term.as_atom()?;
        if atom.value.chars().all(|c| c.is_ascii_digit()) && !atom.value.is_empty() {
            atom.value.parse::<i64>().ok().map(Value::Number)
        } else {
            Some(Value::Word(atom.value.clone()))
        }
    }
}

/// Look up a predicate by name and apply it to the resolved arguments.
/// Returns `None` for an unknown predicate name (per-frame failure, never an
/// exception) and `Some(bool)` for a known one.
pub fn invoke(predicate: &str, args: &[Term]) -> Option<bool> {
    let values: Vec<Value> = args.iter().map(Value::from_term).collect::<Option<_>>()?;
    match predicate {
        "<" => Some(less_than(&values)),
        ">" => Some(greater_than(&values)),
        _ => None,
    }
}

fn less_than(args: &[Value]) -> bool {
    matches!((args.first(), args.get(1)), (Some(Value::Number(a)), Some(Value::Number(b))) if a < b)
}

fn greater_than(args: &[Value]) -> bool {
    matches!((args.first(), args.get(1)), (Some(Value::Number(a)), Some(Value::Number(b))) if a > b)
}
