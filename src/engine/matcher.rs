//! The asymmetric pattern matcher.
//!
//! `match_term(pattern, data, frame)` tests whether `data` (typically a
//! stored assertion) is consistent with `pattern` (typically a query),
//! extending `frame` with any bindings `pattern`'s variables pick up.
//! Variables that appear only in `data` are never bound, which is what makes
//! the matcher one-directional, unlike [`crate::engine::unify::unify`].

use crate::frame::Frame;
use crate::term::Term;

/// Match `pattern` against `data` under `frame`, returning the extended
/// frame on success or `None` on failure.
pub fn match_term(pattern: &Term, data: &Term, frame: Frame) -> Option<Frame> {
    if pattern == data {
        return Some(frame);
    }
    if pattern.is_variable() {
        return extend(pattern, data, frame);
    }
    if pattern.starts_with_dot() {
        if let Term::Sequence(_) = data {
            return match_term(pattern.after_dot(), data, frame);
        }
        return None;
    }
    if let (Some((p_head, p_tail)), Some((d_head, d_tail))) = (pattern.split_first(), data.split_first()) {
        let frame = match_term(p_head, d_head, frame)?;
        return match_term(&Term::Sequence(p_tail.to_vec()), &Term::Sequence(d_tail.to_vec()), frame);
    }
    None
}

fn extend(var: &Term, data: &Term, mut frame: Frame) -> Option<Frame> {
    let Term::Atom(atom) = var else { unreachable!("extend is only called with a variable pattern") };
    match frame.get(&atom.value) {
        Some(binding) => {
            let binding = binding.clone();
            match_term(&binding, data, frame)
        }
        None => {
            frame.insert(atom.value.clone(), data.clone());
            Some(frame)
        }
    }
}
