//! The symmetric unifier with occurs check.
//!
//! `unify(t1, t2, frame)` unifies a query pattern against a (freshly
//! renamed) rule conclusion. Unlike [`crate::engine::matcher::match_term`],
//! either side may introduce bindings.

use crate::frame::Frame;
use crate::term::Term;

/// Unify `t1` and `t2` under `frame`, returning the extended frame on
/// success or `None` on failure (including an occurs-check violation).
pub fn unify(t1: &Term, t2: &Term, frame: Frame) -> Option<Frame> {
    if t1 == t2 {
        return Some(frame);
    }
    if t1.is_variable() {
        return extend(t1, t2, frame);
    }
    if t2.is_variable() {
        return extend(t2, t1, frame);
    }
    if t1.starts_with_dot() {
        if let Term::Sequence(_) = t2 {
            return unify(t1.after_dot(), t2, frame);
        }
    }
    if t2.starts_with_dot() {
        if let Term::Sequence(_) = t1 {
            return unify(t1, t2.after_dot(), frame);
        }
    }
    if let (Some((h1, r1)), Some((h2, r2))) = (t1.split_first(), t2.split_first()) {
        let frame = unify(h1, h2, frame)?;
        return unify(&Term::Sequence(r1.to_vec()), &Term::Sequence(r2.to_vec()), frame);
    }
    None
}

/// Extend `frame` by binding the variable `var` to `term`.
fn extend(var: &Term, term: &Term, mut frame: Frame) -> Option<Frame> {
    let Term::Atom(var_atom) = var else { unreachable!("extend is only called with a variable") };

    if let Some(binding) = frame.get(&var_atom.value) {
        let binding = binding.clone();
        return unify(&binding, term, frame);
    }
    if term.is_variable() {
        let Term::Atom(term_atom) = term else { unreachable!() };
        if let Some(binding) = frame.get(&term_atom.value) {
            let binding = binding.clone();
            return unify(var, &binding, frame);
        }
        frame.insert(var_atom.value.clone(), term.clone());
        return Some(frame);
    }
    if depends_on(term, &var_atom.value, &frame) {
        return None;
    }
    frame.insert(var_atom.value.clone(), term.clone());
    Some(frame)
}

/// The occurs check: does `term` reflexively reference `var`, directly or by
/// following bindings already present in `frame`?
fn depends_on(term: &Term, var: &str, frame: &Frame) -> bool {
    match term {
        Term::Atom(a) if a.is_variable() => {
            if a.value == var {
                return true;
            }
            match frame.get(&a.value) {
                Some(binding) => depends_on(binding, var, frame),
                None => false,
            }
        }
        Term::Atom(_) => false,
        Term::Sequence(items) => items.iter().any(|t| depends_on(t, var, frame)),
    }
}
