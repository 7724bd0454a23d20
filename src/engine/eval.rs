//! The query evaluator: dispatch over connectives, and simple-query
//! resolution as the union of assertion hits and rule firings.

use crate::engine::apply;
use crate::engine::matcher::match_term;
use crate::engine::rename::rename;
use crate::engine::unify::unify;
use crate::frame::{resolve_alias, Frame};
use crate::kb::KnowledgeBase;
use crate::term::{Domain, Term};

/// Evaluate `query` against each frame in `frames`, returning the union of
/// solutions in source order.
pub fn run(kb: &KnowledgeBase, query: &Term, frames: Vec<Frame>) -> Vec<Frame> {
    if let Term::Sequence(items) = query {
        if let Some(Term::Atom(head)) = items.first() {
            match head.domain {
                Domain::And => return eval_and(kb, &items[1..], frames),
                Domain::Or => return eval_or(kb, &items[1..], frames),
                Domain::Not => return eval_not(kb, &items[1], frames),
                Domain::Apply => {
                    let predicate = items.get(1).and_then(Term::as_atom).map(|a| a.value.as_str()).unwrap_or_default();
                    return eval_apply(predicate, &items[2..], frames);
                }
                _ => {}
            }
        }
    }
    run_simple_query(kb, query, frames)
}

fn eval_and(kb: &KnowledgeBase, conjuncts: &[Term], frames: Vec<Frame>) -> Vec<Frame> {
    let Some((first, rest)) = conjuncts.split_first() else {
        return frames;
    };
    let next = run(kb, first, frames);
    eval_and(kb, rest, next)
}

fn eval_or(kb: &KnowledgeBase, disjuncts: &[Term], frames: Vec<Frame>) -> Vec<Frame> {
    let mut solutions = Vec::new();
    for disjunct in disjuncts {
        solutions.extend(run(kb, disjunct, frames.clone()));
    }
    solutions
}

fn eval_not(kb: &KnowledgeBase, operand: &Term, frames: Vec<Frame>) -> Vec<Frame> {
    frames.into_iter().filter(|frame| run(kb, operand, vec![frame.clone()]).is_empty()).collect()
}

fn eval_apply(predicate: &str, arg_terms: &[Term], frames: Vec<Frame>) -> Vec<Frame> {
    frames
        .into_iter()
        .filter(|frame| {
            let Some(resolved) = resolve_args(arg_terms, frame) else { return false };
            apply::invoke(predicate, &resolved).unwrap_or(false)
        })
        .collect()
}

/// Resolve every `@apply` argument through `frame`, walking variable
/// aliases. Fails (returns `None`) if any argument does not resolve to an
/// atom, since a sequence binding is not a valid primitive argument.
fn resolve_args(args: &[Term], frame: &Frame) -> Option<Vec<Term>> {
    args.iter()
        .map(|arg| match arg {
            Term::Atom(a) if a.is_variable() => resolve_alias(frame, &a.value).cloned().filter(|t| t.as_atom().is_some()),
            other => Some(other.clone()),
        })
        .collect()
}

fn run_simple_query(kb: &KnowledgeBase, query: &Term, frames: Vec<Frame>) -> Vec<Frame> {
    let mut solutions = Vec::new();
    for frame in &frames {
        solutions.extend(find_assertions(kb, query, frame));
    }
    for frame in &frames {
        solutions.extend(apply_rules(kb, query, frame));
    }
    solutions
}

fn find_assertions(kb: &KnowledgeBase, query: &Term, frame: &Frame) -> Vec<Frame> {
    kb.fetch_assertions(query).into_iter().filter_map(|assertion| match_term(query, assertion, frame.clone())).collect()
}

fn apply_rules(kb: &KnowledgeBase, query: &Term, frame: &Frame) -> Vec<Frame> {
    kb.fetch_rules(query).into_iter().filter_map(|rule| apply_rule(kb, rule, query, frame.clone())).collect()
}

fn apply_rule(kb: &KnowledgeBase, rule: &Term, query: &Term, frame: Frame) -> Option<Vec<Frame>> {
    let renamed = rename(rule);
    let Term::Sequence(items) = &renamed else { return None };
    let conclusion = items.get(1)?;
    let unified = unify(query, conclusion, frame)?;
    match items.get(2) {
        None => Some(vec![unified]),
        Some(body) => Some(run(kb, body, vec![unified])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::KnowledgeBase;
    use crate::parser::parse;
    use crate::term::Atom;

    fn insert(kb: &mut KnowledgeBase, src: &str) {
        let Term::Sequence(cmd) = parse(src).unwrap() else { panic!() };
        assert_eq!(cmd[0], Term::Atom(Atom::new(Domain::New, "@new")));
        let Term::Sequence(entity) = &cmd[1] else { panic!() };
        if entity.first() == Some(&Term::Atom(Atom::new(Domain::Rule, "@rule"))) {
            kb.insert_rule(&cmd[1], &entity[1]);
        } else {
            kb.insert_assertion(cmd[1].clone());
        }
    }

    fn query_results(kb: &KnowledgeBase, src: &str) -> Vec<String> {
        let query = parse(src).unwrap();
        run(kb, &query, vec![Frame::new()]).iter().map(|f| crate::engine::instantiate(&query, f)).collect()
    }

    #[test]
    fn basic_match_in_insertion_order() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (hello world))");
        insert(&mut kb, "(@new (hello (Pichugin Vladislav)))");
        assert_eq!(query_results(&kb, "(hello $x)"), vec!["(hello world)", "(hello (Pichugin Vladislav))"]);
    }

    #[test]
    fn repeated_variable_binding() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (boss Mike Jack))");
        insert(&mut kb, "(@new (boss Bob Jack))");
        insert(&mut kb, "(@new (boss Jack Jack))");
        assert_eq!(query_results(&kb, "(boss $x $x)"), vec!["(boss Jack Jack)"]);
    }

    #[test]
    fn dotted_tail_matches_variable_length_suffix() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (position Nikita (developer)))");
        insert(&mut kb, "(@new (position (Pichugin Vladislav) (developer frontend backend)))");
        assert_eq!(
            query_results(&kb, "(position $x (developer . $type))"),
            vec!["(position Nikita (developer))", "(position (Pichugin Vladislav) (developer frontend backend))"]
        );
        assert_eq!(query_results(&kb, "(position $x (developer $type))"), Vec::<String>::new());
    }

    #[test]
    fn recursive_append_rule_enumerates_all_splits() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (@rule (append () $y $y)))");
        insert(&mut kb, "(@new (@rule (append ($u . $v) $y ($u . $z)) (append $v $y $z)))");
        let results = query_results(&kb, "(append $x $y (a b c d))");
        assert_eq!(
            results,
            vec![
                "(append () (a b c d) (a b c d))",
                "(append (a) (b c d) (a b c d))",
                "(append (a b) (c d) (a b c d))",
                "(append (a b c) (d) (a b c d))",
                "(append (a b c d) () (a b c d))",
            ]
        );
    }

    #[test]
    fn negation_as_failure() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (boss Mike Denis))");
        insert(&mut kb, "(@new (boss Bob Denis))");
        insert(&mut kb, "(@new (position Mike developer))");
        let query = parse("(@and (boss $person Denis) (@not (position $person developer)))").unwrap();
        let out: Vec<String> = run(&kb, &query, vec![Frame::new()]).iter().map(|f| crate::engine::instantiate(&query, f)).collect();
        assert_eq!(out, vec!["(and (boss Bob Denis) (not (position Bob developer)))"]);
    }

    #[test]
    fn apply_with_comparator_filters_by_numeric_value() {
        let mut kb = KnowledgeBase::new();
        for (person, amount) in [("Alice", 90), ("Bob", 330), ("Carol", 12), ("Dave", 66), ("Eve", 5)] {
            insert(&mut kb, &format!("(@new (salary {person} {amount}))"));
        }
        let query = parse("(@and (salary $person $amount) (@apply > $amount 50))").unwrap();
        let out: Vec<String> = run(&kb, &query, vec![Frame::new()]).iter().map(|f| crate::engine::instantiate(&query, f)).collect();
        assert_eq!(
            out,
            vec![
                "(and (salary Alice 90) (@apply > 90 50))",
                "(and (salary Bob 330) (@apply > 330 50))",
                "(and (salary Dave 66) (@apply > 66 50))",
            ]
        );
    }

    #[test]
    fn empty_query_matches_nothing() {
        let mut kb = KnowledgeBase::new();
        insert(&mut kb, "(@new (hello world))");
        let query = Term::empty();
        assert!(run(&kb, &query, vec![Frame::new()]).is_empty());
    }
}
